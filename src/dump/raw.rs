//! Rendering of extensions without a specific renderer.
//!
//! The value of such an extension is shown as text. Everything up to and
//! including the first carriage return is dropped, which gets rid of the
//! leading junk of many text-like extensions, and anything not printable
//! ASCII is replaced by a full stop.

use crate::der::{MalformedEncoding, Tlv};


/// The maximum number of characters per line.
pub const MAX_LINE: usize = 129;

/// Renders the extension value `value`.
///
/// The value has to be a single encoded value. Its content is rendered.
pub fn render(value: &[u8]) -> Result<String, MalformedEncoding> {
    let content = Tlv::read_single(value)?.content();
    let start = content.iter().position(|&ch| ch == b'\r')
        .map(|pos| pos + 1).unwrap_or(0);
    let text: String = content[start..].iter().map(|&ch| {
        if (32..=126).contains(&ch) { char::from(ch) }
        else { '.' }
    }).collect();
    Ok(wrap(&text, MAX_LINE))
}

/// Wraps `text` into lines of `width` characters.
///
/// The text is expected to be ASCII only. The last line holds whatever is
/// left over. It is present even if that is nothing.
fn wrap(text: &str, width: usize) -> String {
    let mut res = String::with_capacity(text.len() + text.len() / width + 1);
    let mut text = text;
    while text.len() >= width {
        let (line, rest) = text.split_at(width);
        res.push_str(line);
        res.push('\n');
        text = rest;
    }
    res.push_str(text);
    res
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strip_and_replace() {
        assert_eq!(
            render(b"\x0c\x19hello\rworld of extensions").unwrap(),
            "world of extensions"
        );
        assert_eq!(render(b"\x04\x04a\x00b\x7f").unwrap(), "a.b.");
        assert_eq!(render(b"\x04\x05a\rb\rc").unwrap(), "b.c");
        assert_eq!(render(b"\x04\x00").unwrap(), "");
    }

    #[test]
    fn wrap_lines() {
        let text = "x".repeat(300);
        let res = wrap(&text, MAX_LINE);
        let lines: Vec<_> = res.split('\n').collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 129);
        assert_eq!(lines[2].len(), 42);

        // An exact multiple ends in an empty line.
        let res = wrap(&"y".repeat(258), MAX_LINE);
        assert_eq!(res.split('\n').count(), 3);
        assert!(res.ends_with('\n'));
    }

    #[test]
    fn not_a_single_value() {
        assert!(render(b"").is_err());
        assert!(render(b"\x04\x01a\x00").is_err());
        assert!(render(b"\x04\x05a").is_err());
    }
}
