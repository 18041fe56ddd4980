use crate::domain::model::OrderAuditEntry;
use crate::utils::error::{ForwarderError, Result};
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, Serializer};
use std::fmt;
use std::io;
use std::str::FromStr;

/// How each audit line is rendered.
///
/// `Spaced` writes `", "` between members and `": "` after keys, and escapes
/// every non-ASCII character and DEL as lowercase `\uXXXX` (surrogate pairs above the
/// BMP). `Compact` is plain serde_json output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum JsonLineStyle {
    #[default]
    Spaced,
    Compact,
}

impl FromStr for JsonLineStyle {
    type Err = ForwarderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "spaced" => Ok(JsonLineStyle::Spaced),
            "compact" => Ok(JsonLineStyle::Compact),
            _ => Err(ForwarderError::InvalidConfigValueError {
                field: "line_style".to_string(),
                value: s.to_string(),
                reason: "Expected 'spaced' or 'compact'".to_string(),
            }),
        }
    }
}

impl fmt::Display for JsonLineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonLineStyle::Spaced => f.write_str("spaced"),
            JsonLineStyle::Compact => f.write_str("compact"),
        }
    }
}

struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (pos, ch) in fragment.char_indices() {
            // DEL is ASCII but escaped like the control characters
            if ch.is_ascii() && ch != '\u{7f}' {
                continue;
            }
            writer.write_all(fragment[start..pos].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = pos + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

fn to_string_with<T, F>(value: &T, formatter: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: Formatter,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| {
        ForwarderError::SerializationError(<serde_json::Error as serde::ser::Error>::custom(e))
    })
}

/// Renders one entry as a single JSON line, without the trailing newline.
pub fn encode_line(entry: &OrderAuditEntry, style: JsonLineStyle) -> Result<String> {
    match style {
        JsonLineStyle::Spaced => to_string_with(entry, SpacedAsciiFormatter),
        JsonLineStyle::Compact => to_string_with(entry, CompactFormatter),
    }
}

/// Newline-terminates every line and concatenates them in order.
pub fn build_payload(entries: &[OrderAuditEntry], style: JsonLineStyle) -> Result<String> {
    let mut payload = String::new();
    for entry in entries {
        payload.push_str(&encode_line(entry, style)?);
        payload.push('\n');
    }
    Ok(payload)
}
