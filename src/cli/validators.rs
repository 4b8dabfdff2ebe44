//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

use chrono::NaiveDate;

use crate::utils::date::parse_date;

/// Labels merged into their first member, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinGroup(pub Vec<i64>);

/// Parse a non-negative number of seconds.
pub fn parse_seconds(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value < 0.0 {
        return Err(format!("seconds must be non-negative, got {value}"));
    }

    Ok(value)
}

/// Parse a single printable symbol character.
pub fn parse_symbol(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() && !c.is_control() => Ok(c),
        (Some(_), None) => Err(format!("symbol must be printable, got {s:?}")),
        _ => Err(format!("symbol must be exactly one character, got '{s}'")),
    }
}

/// Parse a comma-separated join group such as `5,6,7`.
pub fn parse_join_group(s: &str) -> Result<JoinGroup, String> {
    let labels = s
        .split(',')
        .map(|part| {
            let part = part.trim();
            part.parse::<i64>()
                .map_err(|_| format!("'{part}' is not a valid label in join group '{s}'"))
        })
        .collect::<Result<Vec<i64>, String>>()?;

    if labels.len() < 2 {
        return Err(format!("join group '{s}' needs at least two labels"));
    }

    Ok(JoinGroup(labels))
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).map_err(|e| e.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds_valid() {
        assert_eq!(parse_seconds("0.5").ok(), Some(0.5));
        assert_eq!(parse_seconds("0").ok(), Some(0.0));
        assert_eq!(parse_seconds("12").ok(), Some(12.0));
    }

    #[test]
    fn test_parse_seconds_invalid() {
        assert!(parse_seconds("-0.1").is_err());
        assert!(parse_seconds("inf").is_err());
        assert!(parse_seconds("abc").is_err());
    }

    #[test]
    fn test_parse_symbol() {
        assert_eq!(parse_symbol("<").ok(), Some('<'));
        assert_eq!(parse_symbol("é").ok(), Some('é'));
        assert!(parse_symbol("").is_err());
        assert!(parse_symbol("ab").is_err());
        assert!(parse_symbol(" ").is_err());
    }

    #[test]
    fn test_parse_join_group() {
        assert_eq!(
            parse_join_group("5, 6,7").unwrap(),
            JoinGroup(vec![5, 6, 7])
        );
        assert!(parse_join_group("5").is_err());
        assert!(parse_join_group("5,x").is_err());
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2020-05-01").ok(),
            NaiveDate::from_ymd_opt(2020, 5, 1)
        );
        let err = parse_date_arg("20200501").unwrap_err();
        assert!(err.contains("20200501"));
    }
}
