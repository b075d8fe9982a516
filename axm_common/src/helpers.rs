use std::str::FromStr;

/// Parse a value from an optional string, falling back to `default` when the string is missing or
/// malformed. Callers that care about the substitution log it themselves.
pub fn parse_or_default<T>(value: Option<String>, default: T) -> T
where T: FromStr {
    match value {
        Some(v) => v.trim().parse::<T>().unwrap_or(default),
        None => default,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn numbers_with_fallback() {
        assert_eq!(parse_or_default(Some("250".to_string()), 200u32), 250);
        assert_eq!(parse_or_default(Some("not-a-number".to_string()), 200u32), 200);
        assert_eq!(parse_or_default(None, 200u32), 200);
    }
}
