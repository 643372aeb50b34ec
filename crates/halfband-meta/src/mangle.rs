//! C-like identifier rules for parameter symbols and class identifiers.

/// Turns an arbitrary name into an identifier.
///
/// Works on the UTF-8 bytes of `name`. ASCII letters are kept and digits are
/// kept after the first position. Every other byte, including `_`, is
/// written as `_`, so a multi-byte character turns into one `_` per byte.
/// An empty name becomes `"_"`.
///
/// ```rust
/// use halfband_meta::mangle;
///
/// assert_eq!(mangle("Cutoff Hz"), "Cutoff_Hz");
/// assert_eq!(mangle("2nd harmonic"), "_nd_harmonic");
/// assert_eq!(mangle(""), "_");
/// assert_eq!(mangle("Größe"), "Gr____e");
/// ```
pub fn mangle(name: &str) -> String {
    if name.is_empty() {
        return "_".to_string();
    }

    name.bytes()
        .enumerate()
        .map(|(i, b)| {
            if b.is_ascii_alphabetic() || (i > 0 && b.is_ascii_digit()) {
                char::from(b)
            } else {
                '_'
            }
        })
        .collect()
}

/// Returns `true` if `name` is already a valid identifier.
pub fn is_valid_identifier(name: &str) -> bool {
    !name.is_empty() && mangle(name) == name
}
