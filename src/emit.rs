use crate::envelope::Envelope;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::Formatter;
use std::io::{self, Write};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// JSON layout the desktop caller was written against: `", "` and `": "`
/// separators, with non-ASCII optionally escaped as lowercase `\uXXXX`.
#[derive(Debug, Clone, Copy)]
pub struct CallerFormatter {
    ascii_only: bool,
}

impl CallerFormatter {
    pub fn new(ascii_only: bool) -> Self {
        Self { ascii_only }
    }
}

impl Formatter for CallerFormatter {
    fn begin_array_value<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        if !self.ascii_only || fragment.bytes().all(|b| b < 0x7f) {
            return writer.write_all(fragment.as_bytes());
        }

        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() && ch != '\x7f' {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize any value with the caller's layout.
pub fn to_caller_json<T: Serialize>(value: &T, ascii_only: bool) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, CallerFormatter::new(ascii_only));
    value
        .serialize(&mut ser)
        .context("Failed to serialize JSON document")?;
    Ok(buf)
}

#[derive(Serialize)]
struct Status<'a> {
    status: &'static str,
    query: &'a str,
}

/// Writes the envelope and the optional status line.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    bom: bool,
    ascii_only: bool,
}

impl Emitter {
    pub fn new(bom: bool, ascii_only: bool) -> Self {
        Self { bom, ascii_only }
    }

    /// Render one line: optional BOM, the JSON document, a newline.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if self.bom {
            out.extend_from_slice(UTF8_BOM);
        }
        out.extend(to_caller_json(value, self.ascii_only)?);
        out.push(b'\n');
        Ok(out)
    }

    pub fn write_envelope<W: Write>(&self, writer: &mut W, envelope: &Envelope) -> Result<()> {
        let line = self.render(envelope)?;
        writer.write_all(&line).context("Failed to write envelope")?;
        writer.flush().context("Failed to flush envelope")?;
        Ok(())
    }

    pub fn write_status<W: Write>(&self, writer: &mut W, query: &str) -> Result<()> {
        let mut line = to_caller_json(
            &Status {
                status: "searching",
                query,
            },
            self.ascii_only,
        )?;
        line.push(b'\n');
        writer.write_all(&line).context("Failed to write status line")?;
        Ok(())
    }
}
