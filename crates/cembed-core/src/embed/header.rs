//! C header text emission.
//!
//! [`HeaderWriter`] writes the pieces of an embed header in order: banner
//! and guard, optional offset table, the array declaration, the array body
//! and the closing guard. The array body is one continuous token sequence
//! even when it is fed from several files.

use std::io::{self, Write};

/// Writes an embed header to any [`Write`] sink
#[derive(Debug)]
pub struct HeaderWriter<W: Write> {
    out: W,
    bytes_per_line: usize,
    /// Tokens on the current line of the array body
    column: usize,
    /// Tokens written to the array body so far
    written: u64,
    /// Next token starts a new line regardless of the column
    break_pending: bool,
}

impl<W: Write> HeaderWriter<W> {
    /// Creates a writer wrapping `out` lines after `bytes_per_line` tokens
    pub fn new(out: W, bytes_per_line: usize) -> Self {
        Self {
            out,
            bytes_per_line: bytes_per_line.max(1),
            column: 0,
            written: 0,
            break_pending: false,
        }
    }

    /// Writes the banner comment, the include guard and the `extern "C"` opening
    pub fn write_prologue(&mut self, banner: &str, source: &str, guard: &str) -> io::Result<()> {
        write!(self.out, "/**\n * {banner}\n * Source : {source}\n **/\n")?;
        write!(self.out, "#ifndef {guard}_H_\n#define {guard}_H_\n\n")?;
        write!(self.out, "#ifdef __cplusplus\nextern \"C\" {{\n#endif\n\n")
    }

    /// Writes a `// --- TITLE ---` section marker
    pub fn write_section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "// --- {title} ---")
    }

    /// Writes one `g_embed_<identifier>_offset` constant
    pub fn write_offset(&mut self, identifier: &str, offset: u64) -> io::Result<()> {
        writeln!(
            self.out,
            "const unsigned long g_embed_{identifier}_offset = {offset};"
        )
    }

    /// Writes a bare newline
    pub fn write_blank_line(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    /// Writes the size constant and opens the `g_embed_<name>_data` array
    pub fn begin_array(&mut self, name: &str, size: u64) -> io::Result<()> {
        writeln!(self.out, "const unsigned long g_embed_{name}_size = {size};")?;
        write!(
            self.out,
            "const unsigned char g_embed_{name}_data[ {size} ] = {{\n\t"
        )?;
        self.column = 0;
        self.written = 0;
        self.break_pending = false;
        Ok(())
    }

    /// Appends bytes to the array body.
    ///
    /// The separator is written ahead of each token, so the last token of the
    /// array never carries a trailing comma.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        for byte in bytes {
            if self.written > 0 {
                if self.break_pending || self.column == self.bytes_per_line {
                    self.out.write_all(b",\n\t")?;
                    self.column = 0;
                    self.break_pending = false;
                } else {
                    self.out.write_all(b", ")?;
                }
            }

            write!(self.out, "0x{byte:02X}")?;
            self.column += 1;
            self.written += 1;
        }
        Ok(())
    }

    /// Starts a new line before the next token, unless one is started anyway.
    ///
    /// Has no effect if nothing follows.
    pub fn break_line(&mut self) {
        if self.written > 0 {
            self.break_pending = true;
        }
    }

    /// Closes the array
    pub fn end_array(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n};\n\n")
    }

    /// Closes the `extern "C"` block and the include guard
    pub fn write_epilogue(&mut self, guard: &str) -> io::Result<()> {
        write!(self.out, "#ifdef __cplusplus\n}};\n#endif\n\n")?;
        writeln!(self.out, "#endif /* !{guard}_H_ */")
    }

    /// Number of tokens written to the current array
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Flushes and returns the underlying sink
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
