use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// Discord snowflakes are stored as text columns; this converts them back at the
/// repository boundary.
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake() {
        assert_eq!(
            parse_u64_from_string("1234567890123".to_string()).unwrap(),
            1234567890123
        );
    }

    #[test]
    fn rejects_non_numeric() {
        let result = parse_u64_from_string("abc".to_string());
        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ParseStringId { .. }))
        ));
    }
}
