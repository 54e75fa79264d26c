//! Embed header generation.
//!
//! [`Embedder`] drives the three modes:
//!
//! 1. [`Embedder::embed_file`]: one source file to one `<stem>_embed.h`
//! 2. [`Embedder::embed_directory`]: `embed_file` for every file of a directory
//! 3. [`Embedder::embed_combine`]: every file of a directory into one blob
//!    header with a per-file offset table
//!
//! The text itself is produced by [`render_single`] and [`render_combined`],
//! which write into any [`std::io::Write`] sink.

mod header;

use crate::blob::CombinedBlob;
use crate::error::{Error, Result};
use crate::naming;
use crate::source::{self, SourceFile};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub use header::HeaderWriter;

/// Default number of byte tokens per array line
pub const DEFAULT_BYTES_PER_LINE: usize = 16;

/// Default tool name written in the header banner
pub const DEFAULT_BANNER: &str = "cembed";

/// Configuration for header generation
#[derive(Debug, Clone)]
pub struct EmbedConfig {
    /// Byte tokens per array line
    pub bytes_per_line: usize,
    /// Tool name written in the banner comment
    pub banner: String,
    /// Sort directory listings by file name instead of OS order
    pub sorted: bool,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            bytes_per_line: DEFAULT_BYTES_PER_LINE,
            banner: DEFAULT_BANNER.to_string(),
            sorted: false,
        }
    }
}

impl EmbedConfig {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of byte tokens per array line
    pub fn bytes_per_line(mut self, count: usize) -> Self {
        self.bytes_per_line = count;
        self
    }

    /// Sets the banner tool name
    pub fn banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// Sets whether directory listings are sorted by file name
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Checks the config for values that can't produce a header
    pub fn validate(&self) -> Result<()> {
        if self.bytes_per_line == 0 {
            return Err(Error::invalid_config("bytes per line must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome of a directory batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Headers written, in listing order
    pub generated: Vec<PathBuf>,
    /// Source files that were skipped, with the reason
    pub failures: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    /// Returns true if every listed file produced a header
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcome of a combine run
#[derive(Debug, Clone)]
pub struct CombineReport {
    /// Header written
    pub output: PathBuf,
    /// Number of files in the blob
    pub file_count: usize,
    /// Blob length in bytes
    pub total_len: u64,
}

/// Generates embed headers
#[derive(Debug, Clone, Default)]
pub struct Embedder {
    config: EmbedConfig,
}

impl Embedder {
    /// Creates a new embedder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new embedder with custom configuration
    pub fn with_config(config: EmbedConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration
    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Embeds one file and returns the header path.
    ///
    /// Nothing is written unless the source loads. A write fault leaves the
    /// partially written header in place.
    pub fn embed_file(&self, path: &Path) -> Result<PathBuf> {
        let source = SourceFile::load(path)?;
        let output = naming::output_path(path)?;

        write_header(&output, |out| render_single(&source, &self.config, out))?;

        info!("Generated {} ({} bytes)", output.display(), source.len());
        Ok(output)
    }

    /// Embeds every regular file directly inside `directory`.
    ///
    /// A failing file is recorded in the report and the batch carries on.
    pub fn embed_directory(&self, directory: &Path) -> Result<BatchReport> {
        let files = source::list_files(directory, None, self.config.sorted)?;
        let mut report = BatchReport::default();

        for path in files {
            debug!("Embedding {}", path.display());
            match self.embed_file(&path) {
                Ok(output) => report.generated.push(output),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    report.failures.push((path, e));
                }
            }
        }

        info!(
            "Embedded {} of {} file(s) from {}",
            report.generated.len(),
            report.generated.len() + report.failures.len(),
            directory.display()
        );
        Ok(report)
    }

    /// Embeds every regular file of `directory` into `<dir>/<name>_embed.h`.
    ///
    /// The directory is listed once and every file is loaded before the
    /// header is created, so the offset table always matches the blob. The
    /// header itself is excluded from the listing.
    pub fn embed_combine(&self, directory: &Path) -> Result<CombineReport> {
        if !directory.is_dir() {
            return Err(Error::not_a_directory(directory));
        }

        let name = naming::directory_name(directory)?;
        let output = naming::combine_output_path(directory, &name);
        let paths = source::list_files(directory, Some(&output), self.config.sorted)?;

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            debug!("Loading {}", path.display());
            files.push(SourceFile::load(path)?);
        }
        let blob = CombinedBlob::new(files);

        let label = directory.join(format!("{name}.h"));
        write_header(&output, |out| {
            render_combined(&blob, &name, &label.to_string_lossy(), &self.config, out)
        })?;

        info!(
            "Generated {} ({} file(s), {} bytes)",
            output.display(),
            blob.file_count(),
            blob.total_len()
        );
        Ok(CombineReport {
            output,
            file_count: blob.file_count(),
            total_len: blob.total_len(),
        })
    }
}

/// Creates `output` and runs `render` against it
fn write_header<F>(output: &Path, render: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let file = File::create(output).map_err(|e| Error::write_failure(output, e))?;
    let mut out = BufWriter::new(file);

    render(&mut out).map_err(|e| Error::write_failure(output, e))?;
    out.flush().map_err(|e| Error::write_failure(output, e))
}

/// Writes the header for a single source file
pub fn render_single<W: Write>(source: &SourceFile, config: &EmbedConfig, out: W) -> io::Result<()> {
    let path = source.path();
    let guard = naming::include_guard(path);
    let name = naming::embed_name(path);

    let mut writer = HeaderWriter::new(out, config.bytes_per_line);
    writer.write_prologue(&config.banner, &path.to_string_lossy(), &guard)?;
    writer.begin_array(&name, source.len() as u64)?;
    writer.write_bytes(source.as_bytes())?;
    writer.end_array()?;
    writer.write_epilogue(&guard)?;
    writer.finish()?;
    Ok(())
}

/// Writes the header for a combined blob.
///
/// `name` names the blob constants and, upper-cased, the include guard;
/// `label` is the source shown in the banner.
pub fn render_combined<W: Write>(
    blob: &CombinedBlob,
    name: &str,
    label: &str,
    config: &EmbedConfig,
    out: W,
) -> io::Result<()> {
    let guard = name.to_uppercase();

    let mut writer = HeaderWriter::new(out, config.bytes_per_line);
    writer.write_prologue(&config.banner, label, &guard)?;

    writer.write_section("OFFSETS")?;
    for entry in blob.entries() {
        writer.write_offset(&entry.identifier, entry.offset)?;
    }

    writer.write_blank_line()?;
    writer.write_section("DATA BLOB")?;
    writer.begin_array(name, blob.total_len())?;
    for (i, file) in blob.files().iter().enumerate() {
        if i > 0 {
            writer.break_line();
        }
        writer.write_bytes(file.as_bytes())?;
    }
    debug_assert_eq!(writer.bytes_written(), blob.total_len());

    writer.end_array()?;
    writer.write_epilogue(&guard)?;
    writer.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn render_to_string(source: &SourceFile) -> String {
        let mut out = Vec::new();
        render_single(source, &EmbedConfig::default(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn array_body(header: &str) -> &str {
        let start = header.find("] = {\n\t").unwrap() + "] = {\n\t".len();
        let end = header.find("\n};\n").unwrap();
        &header[start..end]
    }

    #[test]
    fn test_render_single() {
        let source = SourceFile::new("a/b.c", vec![0x00, 0xFF, 0x10]);
        let text = render_to_string(&source);

        assert_eq!(
            text,
            "/**\n * cembed\n * Source : a/b.c\n **/\n\
             #ifndef A_B_C_H_\n#define A_B_C_H_\n\n\
             #ifdef __cplusplus\nextern \"C\" {\n#endif\n\n\
             const unsigned long g_embed_b_size = 3;\n\
             const unsigned char g_embed_b_data[ 3 ] = {\n\t0x00, 0xFF, 0x10\n};\n\n\
             #ifdef __cplusplus\n};\n#endif\n\n\
             #endif /* !A_B_C_H_ */\n"
        );
    }

    #[test]
    fn test_render_single_token_count() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let text = render_to_string(&SourceFile::new("big.bin", data));
        let body = array_body(&text);

        let tokens: Vec<&str> = body
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        assert_eq!(tokens.len(), 1000);
        assert!(tokens.iter().all(|t| {
            t.len() == 4
                && t.starts_with("0x")
                && t[2..].chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        }));
        assert!(!body.trim_end().ends_with(','));
        assert!(body.lines().all(|line| line.matches("0x").count() <= 16));
    }

    #[test]
    fn test_render_single_wrap_boundary() {
        let data: Vec<u8> = (0..17).collect();
        let text = render_to_string(&SourceFile::new("wrap.bin", data));
        let lines: Vec<&str> = array_body(&text).lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches("0x").count(), 16);
        assert_eq!(lines[1], "\t0x10");
    }

    #[test]
    fn test_render_respects_bytes_per_line() {
        let config = EmbedConfig::new().bytes_per_line(4).banner("tool");
        let mut out = Vec::new();
        render_single(&SourceFile::new("x.bin", vec![7; 9]), &config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("/**\n * tool\n"));
        assert_eq!(array_body(&text).lines().count(), 3);
    }

    #[test]
    fn test_render_combined() {
        let blob = CombinedBlob::new(vec![
            SourceFile::new("res/a.bin", vec![0xA0; 4]),
            SourceFile::new("res/b-2.bin", vec![0xB0; 10]),
            SourceFile::new("res/c.txt", vec![0xC0; 2]),
        ]);
        let mut out = Vec::new();
        render_combined(&blob, "res", "res/res.h", &EmbedConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(" * Source : res/res.h\n"));
        assert!(text.contains("#ifndef RES_H_\n#define RES_H_\n"));
        assert!(text.contains(
            "// --- OFFSETS ---\n\
             const unsigned long g_embed_a_offset = 0;\n\
             const unsigned long g_embed_b_2_offset = 4;\n\
             const unsigned long g_embed_c_offset = 14;\n\
             \n// --- DATA BLOB ---\n\
             const unsigned long g_embed_res_size = 16;\n\
             const unsigned char g_embed_res_data[ 16 ] = {\n\t"
        ));

        let body = array_body(&text);
        assert_eq!(
            body,
            "0xA0, 0xA0, 0xA0, 0xA0,\n\t\
             0xB0, 0xB0, 0xB0, 0xB0, 0xB0, 0xB0, 0xB0, 0xB0, 0xB0, 0xB0,\n\t\
             0xC0, 0xC0"
        );
        assert!(text.ends_with("#endif /* !RES_H_ */\n"));
    }

    #[test]
    fn test_config_validation() {
        assert!(EmbedConfig::default().validate().is_ok());
        let err = Embedder::with_config(EmbedConfig::new().bytes_per_line(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_embed_file() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("logo.png");
        fs::write(&source, [0x89, 0x50, 0x4E, 0x47]).unwrap();

        let output = Embedder::new().embed_file(&source).unwrap();
        assert_eq!(output, temp_dir.path().join("logo_embed.h"));

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("const unsigned long g_embed_logo_size = 4;\n"));
        assert!(text.contains("{\n\t0x89, 0x50, 0x4E, 0x47\n};"));
    }

    #[test]
    fn test_embed_file_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("data.bin");
        fs::write(&source, (0..100u8).collect::<Vec<_>>()).unwrap();

        let embedder = Embedder::new();
        let output = embedder.embed_file(&source).unwrap();
        let first = fs::read(&output).unwrap();
        embedder.embed_file(&source).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_embed_file_not_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.bin");

        let err = Embedder::new().embed_file(&missing).unwrap_err();
        assert!(matches!(err, Error::NotAFile { .. }));
        assert!(!temp_dir.path().join("missing_embed.h").exists());
    }

    #[test]
    fn test_embed_file_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("blocked.bin");
        fs::write(&source, b"x").unwrap();
        fs::create_dir(temp_dir.path().join("blocked_embed.h")).unwrap();

        let err = Embedder::new().embed_file(&source).unwrap_err();
        assert!(matches!(err, Error::WriteFailure { .. }));
    }

    #[test]
    fn test_embed_directory_continues_past_failures() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("one.bin"), b"1").unwrap();
        fs::write(dir.join("two.bin"), b"22").unwrap();
        fs::write(dir.join("three.bin"), b"333").unwrap();
        // Occupy the output path so the third file can't be written
        fs::create_dir(dir.join("three_embed.h")).unwrap();

        let report = Embedder::new().embed_directory(dir).unwrap();

        let mut generated = report.generated.clone();
        generated.sort();
        assert_eq!(generated, vec![dir.join("one_embed.h"), dir.join("two_embed.h")]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, dir.join("three.bin"));
        assert!(report.failures[0].1.is_recoverable());
        assert!(!report.is_complete());
    }

    #[test]
    fn test_embed_directory_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.bin");
        fs::write(&file, b"x").unwrap();

        let err = Embedder::new().embed_directory(&file).unwrap_err();
        assert!(matches!(err, Error::NotADirectory { .. }));
    }

    #[test]
    fn test_embed_combine() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("assets");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("a.bin"), [1u8; 4]).unwrap();
        fs::write(dir.join("b.bin"), [2u8; 10]).unwrap();
        fs::write(dir.join("c.bin"), [3u8; 2]).unwrap();
        fs::create_dir(dir.join("nested")).unwrap();

        let embedder = Embedder::with_config(EmbedConfig::new().sorted(true)).unwrap();
        let report = embedder.embed_combine(&dir).unwrap();

        assert_eq!(report.output, dir.join("assets_embed.h"));
        assert_eq!(report.file_count, 3);
        assert_eq!(report.total_len, 16);

        let text = fs::read_to_string(&report.output).unwrap();
        assert!(text.contains("g_embed_a_offset = 0;"));
        assert!(text.contains("g_embed_b_offset = 4;"));
        assert!(text.contains("g_embed_c_offset = 14;"));
        assert!(text.contains("#ifndef ASSETS_H_"));
        assert!(text.contains("g_embed_assets_data[ 16 ]"));

        // A second run skips its own previous output
        let again = embedder.embed_combine(&dir).unwrap();
        assert_eq!(again.file_count, 3);
        assert_eq!(fs::read_to_string(&again.output).unwrap(), text);
    }

    #[test]
    fn test_embed_combine_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = Embedder::new()
            .embed_combine(&temp_dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::NotADirectory { .. }));
    }
}
