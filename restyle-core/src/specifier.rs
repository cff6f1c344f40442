//! Printf-style format specifier extraction and comparison.

const CONVERSION_CHARS: &str = "diuoxXfFeEgGaAcCsSpn";

/// Extracts the printf-style placeholders of `text`, in order of appearance.
///
/// A `%` opens a placeholder unless it forms an escaped `%%` pair. Pairs are
/// consumed left to right, so `%%%d` reads as one escaped percent followed by
/// a live `%d`. The placeholder runs to the nearest conversion character, so
/// flags, width, precision, and length modifiers stay inside the token
/// (`%-5.2f`, `%08lx`). A `%` with no terminator anywhere after it cannot be
/// positively identified and yields nothing; malformed input never errors.
pub fn extract_specifiers(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut specifiers = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '%' {
            i += 1;
            continue;
        }
        if chars.get(i + 1) == Some(&'%') {
            i += 2;
            continue;
        }
        match (i + 1..chars.len()).find(|&j| CONVERSION_CHARS.contains(chars[j])) {
            Some(end) => {
                specifiers.push(chars[i..=end].iter().collect());
                i = end + 1;
            }
            None => break,
        }
    }
    specifiers
}

/// True iff both strings carry the same specifiers in the same order.
/// Partial overlap or reordering is a mismatch.
pub fn is_compatible(a: &str, b: &str) -> bool {
    extract_specifiers(a) == extract_specifiers(b)
}
