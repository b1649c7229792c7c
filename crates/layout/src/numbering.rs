//! Question label formatting.

use crate::model::NumberingStyle;

/// Formats the label of the `n`th placed question (1-based).
///
/// Alphabetic labels use bijective base-26, so `z)` is followed by `aa)`,
/// `ab)`, ... and `zz)` by `aaa)`.
pub fn label(style: NumberingStyle, n: usize) -> String {
    match style {
        NumberingStyle::Numeric => format!("{n}."),
        NumberingStyle::Alphabetic => format!("{})", letters(n)),
    }
}

/// Bijective base-26 letters for `n >= 1`. `n == 0` yields an empty string.
pub fn letters(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'a' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}
