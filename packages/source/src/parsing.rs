//! Cell coercion shared by the table loaders.
//!
//! Source cells are raw text. Numeric coercion never fails a load: anything
//! that is not a finite number becomes `None`.

/// Coerces a cell to a finite `f64`.
///
/// Returns `None` for empty cells, non-numeric text, and values that parse
/// but are not finite (`NaN`, `inf`).
#[must_use]
pub fn coerce_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses a year cell. Accepts integers and integral floats (`2008.0`,
/// as spreadsheet exports often write them).
#[must_use]
pub fn parse_year(cell: &str) -> Option<i32> {
    let trimmed = cell.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    let value = coerce_numeric(trimmed)?;
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(value as i32)
}

/// Whether a cell holds something other than blank space. Used to tell a
/// missing value apart from an unparseable one.
#[must_use]
pub fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_plain_numbers() {
        assert_eq!(coerce_numeric("1000"), Some(1000.0));
        assert_eq!(coerce_numeric(" 12.5 "), Some(12.5));
        assert_eq!(coerce_numeric("-3"), Some(-3.0));
    }

    #[test]
    fn non_numeric_becomes_none() {
        assert_eq!(coerce_numeric(""), None);
        assert_eq!(coerce_numeric("   "), None);
        assert_eq!(coerce_numeric("n/a"), None);
        assert_eq!(coerce_numeric("1,234"), None);
        assert_eq!(coerce_numeric("12abc"), None);
    }

    #[test]
    fn non_finite_becomes_none() {
        assert_eq!(coerce_numeric("NaN"), None);
        assert_eq!(coerce_numeric("inf"), None);
        assert_eq!(coerce_numeric("-infinity"), None);
    }

    #[test]
    fn parses_years() {
        assert_eq!(parse_year("2008"), Some(2008));
        assert_eq!(parse_year(" 2009 "), Some(2009));
        assert_eq!(parse_year("2010.0"), Some(2010));
    }

    #[test]
    fn rejects_bad_years() {
        assert_eq!(parse_year("2010.5"), None);
        assert_eq!(parse_year("Total"), None);
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("1e20"), None);
    }

    #[test]
    fn blank_cells() {
        assert!(is_blank(""));
        assert!(is_blank(" \t"));
        assert!(!is_blank("x"));
    }
}
