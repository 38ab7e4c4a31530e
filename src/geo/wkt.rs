use crate::geo::error::GeoError;

/// Parses a WKT point such as `POINT (2683009.89 1243936.2)` into its two
/// coordinates. Case and whitespace around the tokens are not significant.
pub fn parse_point(text: &str) -> Result<(f64, f64), GeoError> {
    let malformed = || GeoError::MalformedPoint(text.to_string());

    let trimmed = text.trim();
    let body = trimmed
        .get(..5)
        .filter(|keyword| keyword.eq_ignore_ascii_case("POINT"))
        .map(|_| trimmed[5..].trim())
        .ok_or_else(malformed)?;
    let inner = body
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut parts = inner.split_whitespace().map(str::parse::<f64>);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) => Ok((x, y)),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lv95_point() {
        assert_eq!(
            parse_point("POINT (2683009.89 1243936.2)"),
            Ok((2_683_009.89, 1_243_936.2))
        );
        assert_eq!(parse_point("  point(1 2)  "), Ok((1.0, 2.0)));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in [
            "",
            "POINT",
            "POINT (1)",
            "POINT (1 2 3)",
            "POINT (a b)",
            "LINESTRING (1 2, 3 4)",
            "POINT 1 2",
        ] {
            assert!(parse_point(text).is_err(), "accepted '{}'", text);
        }
    }
}
