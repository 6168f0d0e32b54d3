use crate::error::{Error, Result};

/// Parses a surrogate id taken from a path or query string.
pub fn parse_id(raw: &str, what: &str) -> Result<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(Error::InvalidArgument(format!(
            "{} must be a positive integer, got '{}'",
            what, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_id("42", "application id").unwrap(), 42);
        assert_eq!(parse_id(" 7 ", "application id").unwrap(), 7);
    }

    #[test]
    fn non_numeric_or_non_positive_ids_are_rejected() {
        for raw in ["abc", "", "0", "-3", "1.5", "99999999999"] {
            let err = parse_id(raw, "proposal id").unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{}", raw);
        }
    }
}
