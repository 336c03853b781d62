//! Field coercion helpers shared by the format parsers.
//!
//! Every helper either produces a typed value or an error message naming
//! the offending field; callers turn those messages into row errors.
//! Nothing here falls back to a default.

/// True when `s` is a base-10 integer with an optional leading minus.
pub(crate) fn is_integer(s: &str) -> bool {
    let t = s.trim();
    let t = t.strip_prefix('-').unwrap_or(t);
    !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit())
}

pub(crate) fn parse_int(value: &str, field: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("{field} must be an integer, got '{value}'"))
}

pub(crate) fn parse_positive_int(value: &str, field: &str) -> Result<i64, String> {
    let n = parse_int(value, field)?;
    if n <= 0 {
        return Err(format!("{field} must be positive, got {n}"));
    }
    Ok(n)
}

pub(crate) fn parse_int_in_range(
    value: &str,
    field: &str,
    min: i64,
    max: i64,
) -> Result<i64, String> {
    let n = parse_int(value, field)?;
    if n < min || n > max {
        return Err(format!("{field} must be between {min} and {max}, got {n}"));
    }
    Ok(n)
}

pub(crate) fn parse_flag(value: &str, field: &str) -> Result<bool, String> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(format!("{field} must be 0 or 1, got '{value}'")),
    }
}

/// Empty fields become `None`; anything else is kept verbatim.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub(crate) fn required_text(value: &str, field: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert!(is_integer("42"));
        assert!(is_integer("-7"));
        assert!(is_integer(" 13 "));
        assert!(!is_integer(""));
        assert!(!is_integer("-"));
        assert!(!is_integer("1,5"));
        assert!(!is_integer("abc"));
    }

    #[test]
    fn range_check() {
        assert_eq!(parse_int_in_range("95", "karma", 0, 100), Ok(95));
        assert!(parse_int_in_range("150", "karma", 0, 100).is_err());
        assert!(parse_int_in_range("-1", "karma", 0, 100).is_err());
    }

    #[test]
    fn positive_check() {
        assert_eq!(parse_positive_int("42", "item id"), Ok(42));
        assert!(parse_positive_int("0", "item id").is_err());
        assert!(parse_positive_int("-3", "item id").is_err());
    }

    #[test]
    fn flags() {
        assert_eq!(parse_flag("0", "premium"), Ok(false));
        assert_eq!(parse_flag("1", "premium"), Ok(true));
        assert!(parse_flag("yes", "premium").is_err());
        assert!(parse_flag("", "premium").is_err());
    }
}
