//! Derivation of output paths and C identifiers from source paths.
//!
//! All names are derived from the path text exactly as the caller supplied
//! it, so `assets/logo.png` and `./assets/logo.png` produce different include
//! guards but the same embed name.

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix that replaces the source extension
pub const EMBED_SUFFIX: &str = "_embed.h";

/// Characters turned into `_` when building an include guard
const GUARD_SEPARATORS: &[char] = &['/', '\\', '.'];

/// Characters turned into `_` when building a combine-mode identifier
const IDENTIFIER_SEPARATORS: &[char] = &['/', '.', '-'];

/// Computes the header path for a single source file.
///
/// The last extension of the file name is replaced with [`EMBED_SUFFIX`];
/// the parent directory is kept as-is.
///
/// ```
/// use cembed_core::naming::output_path;
/// use std::path::Path;
///
/// let path = output_path(Path::new("a/b.c"))?;
/// assert_eq!(path, Path::new("a/b_embed.h"));
/// # Ok::<(), cembed_core::Error>(())
/// ```
pub fn output_path(source: &Path) -> Result<PathBuf> {
    let file_name = source
        .file_name()
        .map(|name| name.to_string_lossy())
        .ok_or_else(|| Error::missing_extension(source))?;

    let (stem, _extension) = file_name
        .rsplit_once('.')
        .ok_or_else(|| Error::missing_extension(source))?;

    Ok(source.with_file_name(format!("{stem}{EMBED_SUFFIX}")))
}

/// Computes the lower-case name used in `g_embed_<name>_*` constants.
pub fn embed_name(source: &Path) -> String {
    let text = source.to_string_lossy();
    let last = text.rsplit('/').next().unwrap_or_default();

    last.split('.').next().unwrap_or_default().to_lowercase()
}

/// Computes the include guard token (without the `_H_` suffix).
pub fn include_guard(source: &Path) -> String {
    source
        .to_string_lossy()
        .replace(GUARD_SEPARATORS, "_")
        .to_uppercase()
}

/// Computes the identifier of a file inside a combined blob.
pub fn combine_identifier(file_name: &str) -> String {
    file_name
        .split('.')
        .next()
        .unwrap_or_default()
        .replace(IDENTIFIER_SEPARATORS, "_")
}

/// Returns the last segment of a directory path.
///
/// Paths such as `.` or `assets/..` have no usable final segment, so they are
/// canonicalized first.
pub fn directory_name(directory: &Path) -> Result<String> {
    let named = match directory.file_name() {
        Some(name) => Some(name.to_string_lossy().into_owned()),
        None => fs::canonicalize(directory)
            .ok()
            .and_then(|resolved| resolved.file_name().map(|n| n.to_string_lossy().into_owned())),
    };

    named
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::invalid_directory_name(directory))
}

/// Computes the header path written by a combine run over `directory`.
pub fn combine_output_path(directory: &Path, name: &str) -> PathBuf {
    directory.join(format!("{name}{EMBED_SUFFIX}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_path() {
        assert_eq!(output_path(Path::new("a/b.c")).unwrap(), Path::new("a/b_embed.h"));
        assert_eq!(
            output_path(Path::new("./assets/logo.png")).unwrap(),
            Path::new("./assets/logo_embed.h")
        );
        assert_eq!(output_path(Path::new("font.ttf")).unwrap(), Path::new("font_embed.h"));
    }

    #[test]
    fn test_output_path_multiple_dots() {
        // Only the final extension is dropped
        assert_eq!(
            output_path(Path::new("data/archive.tar.gz")).unwrap(),
            Path::new("data/archive.tar_embed.h")
        );
    }

    #[test]
    fn test_output_path_without_extension() {
        let err = output_path(Path::new("build/Makefile")).unwrap_err();
        assert!(matches!(err, Error::MissingExtension { .. }));

        // A dot in a parent directory doesn't count as an extension
        let err = output_path(Path::new("v1.2/LICENSE")).unwrap_err();
        assert!(matches!(err, Error::MissingExtension { .. }));
    }

    #[test]
    fn test_embed_name() {
        assert_eq!(embed_name(Path::new("a/b.c")), "b");
        assert_eq!(embed_name(Path::new("shaders/Main.Frag.spv")), "main");
        assert_eq!(embed_name(Path::new("LOGO.PNG")), "logo");
    }

    #[test]
    fn test_include_guard() {
        assert_eq!(include_guard(Path::new("dir/name.txt")), "DIR_NAME_TXT");
        assert_eq!(include_guard(Path::new("a/b.c")), "A_B_C");
        assert_eq!(include_guard(Path::new("./res/icon.ico")), "__RES_ICON_ICO");
    }

    #[test]
    fn test_combine_identifier() {
        assert_eq!(combine_identifier("font-bold.ttf"), "font_bold");
        assert_eq!(combine_identifier("Splash.min.png"), "Splash");
        assert_eq!(combine_identifier("noext"), "noext");
    }

    #[test]
    fn test_directory_name() {
        assert_eq!(directory_name(Path::new("assets")).unwrap(), "assets");
        assert_eq!(directory_name(Path::new("res/assets/")).unwrap(), "assets");

        let temp_dir = tempfile::TempDir::new().unwrap();
        let nested = temp_dir.path().join("shaders");
        fs::create_dir(&nested).unwrap();
        assert_eq!(directory_name(&nested.join(".")).unwrap(), "shaders");
    }

    #[test]
    fn test_combine_output_path() {
        assert_eq!(
            combine_output_path(Path::new("res/assets"), "assets"),
            Path::new("res/assets/assets_embed.h")
        );
    }
}
