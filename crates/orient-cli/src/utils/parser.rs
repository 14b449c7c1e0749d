use nalgebra::Vector3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid direction '{0}'. Expected three comma-separated numbers (e.g., '0,0,1').")]
    InvalidDirection(String),

    #[error("Invalid target '{0}'. Expected 'FRAGMENT=X,Y,Z' (e.g., '12=1,0,0').")]
    InvalidTarget(String),

    #[error("Invalid fragment identifier '{0}'. Expected an integer.")]
    InvalidFragmentId(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Parses `x,y,z` into a direction vector.
pub fn parse_direction(s: &str) -> Result<Vector3<f64>, ParseError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(ParseError::InvalidDirection(s.to_string()));
    }

    let mut components = [0.0; 3];
    for (slot, part) in components.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|_| ParseError::InvalidDirection(s.to_string()))?;
    }
    Ok(Vector3::from(components))
}

/// Parses `fragment=x,y,z` into a fragment identifier and its target direction.
pub fn parse_target(s: &str) -> Result<(isize, Vector3<f64>), ParseError> {
    let (id, direction) = s
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidTarget(s.to_string()))?;
    let fragment_id = id
        .trim()
        .parse::<isize>()
        .map_err(|_| ParseError::InvalidFragmentId(id.trim().to_string()))?;
    let direction =
        parse_direction(direction).map_err(|_| ParseError::InvalidTarget(s.to_string()))?;
    Ok((fragment_id, direction))
}

/// Splits a `-S KEY=VALUE` override.
pub fn parse_key_value(s: &str) -> Result<(&str, &str), ParseError> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_direction_accepts_signed_and_spaced_components() {
        assert_eq!(parse_direction("0,0,1").unwrap(), Vector3::z());
        assert_eq!(
            parse_direction(" -1.5, 2 ,0.25").unwrap(),
            Vector3::new(-1.5, 2.0, 0.25)
        );
    }

    #[test]
    fn parse_direction_rejects_wrong_arity_and_garbage() {
        assert!(matches!(
            parse_direction("1,0"),
            Err(ParseError::InvalidDirection(_))
        ));
        assert!(matches!(
            parse_direction("1,0,0,0"),
            Err(ParseError::InvalidDirection(_))
        ));
        assert!(matches!(
            parse_direction("x,0,0"),
            Err(ParseError::InvalidDirection(_))
        ));
    }

    #[test]
    fn parse_target_splits_id_and_direction() {
        assert_eq!(parse_target("12=1,0,0").unwrap(), (12, Vector3::x()));
        assert_eq!(parse_target("-3=0,-1,0").unwrap(), (-3, -Vector3::y()));
    }

    #[test]
    fn parse_target_reports_which_part_failed() {
        assert_eq!(
            parse_target("1,0,0"),
            Err(ParseError::InvalidTarget("1,0,0".to_string()))
        );
        assert_eq!(
            parse_target("abc=1,0,0"),
            Err(ParseError::InvalidFragmentId("abc".to_string()))
        );
        assert_eq!(
            parse_target("4=1,0"),
            Err(ParseError::InvalidTarget("4=1,0".to_string()))
        );
    }

    #[test]
    fn parse_key_value_requires_key() {
        assert_eq!(
            parse_key_value("orientation.tail-count=3").unwrap(),
            ("orientation.tail-count", "3")
        );
        assert_eq!(
            parse_key_value("output.title=A=B").unwrap(),
            ("output.title", "A=B")
        );
        assert!(parse_key_value("=3").is_err());
        assert!(parse_key_value("novalue").is_err());
    }
}
