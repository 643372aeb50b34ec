//! Key/value tags attached to widgets, channels and whole files.
//!
//! Tags come as ordered `(key, value)` string pairs. Values are typed lazily
//! with [`TagValue::parse`]: integer first, then float, then plain string.

use serde::Serialize;

/// A tag value after type inference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    /// Integer in decimal, `0x` hexadecimal or leading-`0` octal form.
    Int(i64),
    /// Anything else that parses as a float.
    Float(f64),
    /// Everything else, verbatim.
    Str(String),
}

impl TagValue {
    /// Infers the type of `text`. The whole string must be consumed for a
    /// numeric interpretation to win.
    ///
    /// ```rust
    /// use halfband_meta::TagValue;
    ///
    /// assert_eq!(TagValue::parse("42"), TagValue::Int(42));
    /// assert_eq!(TagValue::parse("0x1f"), TagValue::Int(31));
    /// assert_eq!(TagValue::parse("0.5"), TagValue::Float(0.5));
    /// assert_eq!(TagValue::parse("dB"), TagValue::Str("dB".into()));
    /// ```
    pub fn parse(text: &str) -> Self {
        if let Some(i) = parse_c_int(text) {
            Self::Int(i)
        } else if let Some(f) = parse_c_float(text) {
            Self::Float(f)
        } else {
            Self::Str(text.to_string())
        }
    }

    /// Returns the value as `f64` when numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Str(_) => None,
        }
    }
}

impl std::fmt::Display for TagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Parses an integer with C `%i` conventions: optional sign, then `0x`
/// hexadecimal, leading-`0` octal or decimal digits.
fn parse_c_int(text: &str) -> Option<i64> {
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i64::from_str_radix(hex, 16).ok()?
    } else if body.len() > 1 && body.starts_with('0') {
        if !body.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
            return None;
        }
        i64::from_str_radix(body, 8).ok()?
    } else {
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        body.parse::<i64>().ok()?
    };

    Some(if negative { -magnitude } else { magnitude })
}

fn parse_c_float(text: &str) -> Option<f64> {
    if text.is_empty() || text.starts_with(char::is_whitespace) {
        return None;
    }
    text.parse::<f64>().ok()
}

/// Parses a numeric literal as written in generated C code, accepting a
/// trailing `f` / `F` suffix (`"1.5f"`).
pub fn parse_float_literal(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_suffix('f')
        .or_else(|| trimmed.strip_suffix('F'))
        .unwrap_or(trimmed);
    if body.is_empty() {
        return None;
    }
    body.parse::<f32>().ok()
}

/// Returns `true` for ordering tags: a key made of an optional `-` and
/// decimal digits.
pub fn is_ordering_key(key: &str) -> bool {
    let digits = key.strip_prefix('-').unwrap_or(key);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Ordered key/value tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<(String, String)>);

impl Tags {
    /// Builds a tag list, dropping ordering tags (numeric key, empty value).
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let kept = pairs
            .into_iter()
            .filter(|(key, value)| {
                let ordering = value.is_empty() && is_ordering_key(key);
                if ordering {
                    tracing::trace!(key = %key, "dropping ordering tag");
                }
                !ordering
            })
            .collect();
        Self(kept)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of the first tag named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if a tag named `key` exists, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Iterates over `(key, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over `(key, typed value)` pairs in order.
    pub fn typed(&self) -> impl Iterator<Item = (&str, TagValue)> {
        self.iter().map(|(k, v)| (k, TagValue::parse(v)))
    }
}

/// Splits a controller string such as `"Left [unit:dB][hidden]"` into its
/// trimmed name and its tags.
///
/// A tag without `:` has an empty value. An unterminated `[` runs to the
/// end of the string.
///
/// ```rust
/// use halfband_meta::split_label;
///
/// let (name, tags) = split_label("Left in [style:knob] [1]");
/// assert_eq!(name, "Left in");
/// assert_eq!(tags.get("style"), Some("knob"));
/// assert_eq!(tags.len(), 1);
/// ```
pub fn split_label(text: &str) -> (String, Tags) {
    let mut name = String::with_capacity(text.len());
    let mut pairs = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(open) = rest.find('[') else {
            name.push_str(rest);
            break;
        };
        name.push_str(&rest[..open]);
        rest = &rest[open + 1..];

        let body = match rest.find(']') {
            Some(close) => {
                let body = &rest[..close];
                rest = &rest[close + 1..];
                body
            }
            None => std::mem::take(&mut rest),
        };

        let (key, value) = body.split_once(':').unwrap_or((body, ""));
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }

    (name.trim().to_string(), Tags::new(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_forms() {
        assert_eq!(TagValue::parse("0"), TagValue::Int(0));
        assert_eq!(TagValue::parse("-17"), TagValue::Int(-17));
        assert_eq!(TagValue::parse("+3"), TagValue::Int(3));
        assert_eq!(TagValue::parse("0X10"), TagValue::Int(16));
        assert_eq!(TagValue::parse("010"), TagValue::Int(8));
    }

    #[test]
    fn falls_back_to_float_then_string() {
        // not octal, but a valid float
        assert_eq!(TagValue::parse("08"), TagValue::Float(8.0));
        assert_eq!(TagValue::parse("1e3"), TagValue::Float(1000.0));
        assert_eq!(TagValue::parse("-0.25"), TagValue::Float(-0.25));
        assert_eq!(TagValue::parse(""), TagValue::Str(String::new()));
        assert_eq!(TagValue::parse("12 dB"), TagValue::Str("12 dB".into()));
        assert_eq!(TagValue::parse("0x"), TagValue::Str("0x".into()));
    }

    #[test]
    fn typed_value_display() {
        assert_eq!(TagValue::parse("42").to_string(), "42");
        assert_eq!(TagValue::parse("knob").to_string(), "knob");
        assert_eq!(TagValue::parse("2.5").as_f64(), Some(2.5));
        assert_eq!(TagValue::parse("x").as_f64(), None);
    }

    #[test]
    fn float_literals_with_suffix() {
        assert_eq!(parse_float_literal("1.5f"), Some(1.5));
        assert_eq!(parse_float_literal("20000.0F"), Some(20000.0));
        assert_eq!(parse_float_literal(" -3 "), Some(-3.0));
        assert_eq!(parse_float_literal("f"), None);
        assert_eq!(parse_float_literal("abc"), None);
    }

    #[test]
    fn ordering_keys() {
        assert!(is_ordering_key("0"));
        assert!(is_ordering_key("12"));
        assert!(is_ordering_key("-1"));
        assert!(!is_ordering_key("-"));
        assert!(!is_ordering_key(""));
        assert!(!is_ordering_key("1a"));
    }

    #[test]
    fn ordering_tags_dropped_only_when_empty() {
        let tags = Tags::new([
            ("1".to_string(), String::new()),
            ("2".to_string(), "kept".to_string()),
            ("unit".to_string(), "Hz".to_string()),
        ]);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("2"), Some("kept"));
        assert_eq!(tags.get("unit"), Some("Hz"));
        assert!(!tags.contains("1"));
    }

    #[test]
    fn split_plain_name() {
        let (name, tags) = split_label("  Output  ");
        assert_eq!(name, "Output");
        assert!(tags.is_empty());
    }

    #[test]
    fn split_keeps_tag_order_and_trims() {
        let (name, tags) = split_label("Side [ role : aux ] chain [hidden][role:second]");
        assert_eq!(name, "Side  chain");
        let pairs: Vec<_> = tags.iter().collect();
        assert_eq!(
            pairs,
            [("role", "aux"), ("hidden", ""), ("role", "second")]
        );
        assert_eq!(tags.get("role"), Some("aux"));
    }

    #[test]
    fn split_unterminated_tag() {
        let (name, tags) = split_label("In [unit:V");
        assert_eq!(name, "In");
        assert_eq!(tags.get("unit"), Some("V"));
    }

    #[test]
    fn typed_iteration() {
        let (_, tags) = split_label("x [a:1][b:0.5][c:z]");
        let typed: Vec<_> = tags.typed().collect();
        assert_eq!(typed[0], ("a", TagValue::Int(1)));
        assert_eq!(typed[1], ("b", TagValue::Float(0.5)));
        assert_eq!(typed[2], ("c", TagValue::Str("z".into())));
    }
}
