//! Wrapped hex dumps of octet sequences.

use crate::util::hex;


/// The number of octets per line for moduli and public values.
pub const KEY_WIDTH: usize = 15;

/// The number of octets per line for signatures.
pub const SIGNATURE_WIDTH: usize = 18;

/// Renders octets as colon separated lowercase hex wrapped over lines.
///
/// Each line starts with `margin` and contains at most `width` octets. All
/// lines but the last end in a colon. The lines are separated by a line
/// feed and there is none at the end.
///
/// If `pad` is given, it is rendered before the first octet of `data`.
/// If there is nothing to render at all, the result is empty.
pub fn multiline(
    margin: &str, width: usize, data: &[u8], pad: Option<u8>
) -> String {
    let width = width.max(1);
    let total = data.len() + usize::from(pad.is_some());
    let mut res = String::with_capacity(
        total * 3 + (total / width + 1) * (margin.len() + 1)
    );
    let octets = pad.into_iter().chain(data.iter().copied());
    for (i, ch) in octets.enumerate() {
        if i % width == 0 {
            if i > 0 {
                res.push_str(":\n");
            }
            res.push_str(margin);
        }
        else {
            res.push(':');
        }
        res.extend(hex::encode_u8(ch, false));
    }
    res
}


//============ Tests =========================================================
