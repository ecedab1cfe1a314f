//! Converting octets into hex strings.

const LOWER: &[u8] = b"0123456789abcdef";
const UPPER: &[u8] = b"0123456789ABCDEF";

/// Returns the two hex digits of an octet.
pub fn encode_u8(ch: u8, upper: bool) -> [char; 2] {
    let digits = if upper { UPPER } else { LOWER };
    [
        char::from(digits[usize::from(ch >> 4)]),
        char::from(digits[usize::from(ch & 0x0F)])
    ]
}

/// Appends the hex digits of `src` to `target` without any separators.
pub fn write_plain(src: &[u8], target: &mut String) {
    target.reserve(src.len() * 2);
    for &ch in src {
        target.extend(encode_u8(ch, false))
    }
}

/// Encodes an octet sequence as colon separated lowercase hex digits.
pub fn colon_lower(src: &[u8]) -> String {
    colon(src, false)
}

/// Encodes an octet sequence as colon separated uppercase hex digits.
///
/// This is used for key identifiers.
pub fn colon_upper(src: &[u8]) -> String {
    colon(src, true)
}

fn colon(src: &[u8], upper: bool) -> String {
    let mut res = String::with_capacity(src.len() * 3);
    for (i, &ch) in src.iter().enumerate() {
        if i > 0 {
            res.push(':');
        }
        res.extend(encode_u8(ch, upper));
    }
    res
}


//============ Tests =========================================================
