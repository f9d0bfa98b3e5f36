//! Configuration errors
//!
//! Raised when tuning values would push NaNs or negative sizes into the
//! collision math. Level text and fragment data never produce errors.

/// Invalid physical or level configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// A size or tunable that must be strictly positive was zero, negative or not finite.
    NonPositive { field: &'static str, value: f32 },
    /// A coordinate that must be finite was NaN or infinite.
    NonFinite { field: &'static str, value: f32 },
    /// A value is finite but below the smallest the simulation supports.
    BelowMinimum {
        field: &'static str,
        value: f32,
        min: f32,
    },
    /// Settings JSON could not be parsed.
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositive { field, value } => {
                write!(f, "{} must be positive and finite, got {}", field, value)
            }
            Self::NonFinite { field, value } => write!(f, "{} must be finite, got {}", field, value),
            Self::BelowMinimum { field, value, min } => {
                write!(f, "{} must be at least {}, got {}", field, min, value)
            }
            Self::Parse(e) => write!(f, "invalid settings json: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Require a strictly positive, finite value.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if crate::is_positive(value) {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

/// Require a finite value no smaller than `min`.
pub(crate) fn at_least(field: &'static str, value: f32, min: f32) -> Result<f32, ConfigError> {
    let value = finite(field, value)?;
    if value >= min {
        Ok(value)
    } else {
        Err(ConfigError::BelowMinimum { field, value, min })
    }
}

/// Require a finite value.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_nan_and_zero() {
        assert!(positive("gravity", 25.0).is_ok());
        assert!(matches!(
            positive("gravity", 0.0),
            Err(ConfigError::NonPositive { field: "gravity", .. })
        ));
        assert!(positive("gravity", f32::NAN).is_err());
        assert!(positive("gravity", -1.0).is_err());
    }

    #[test]
    fn test_at_least() {
        assert!(at_least("segment_width", 30.0, 1.0).is_ok());
        assert!(matches!(
            at_least("segment_width", 1e-6, 1.0),
            Err(ConfigError::BelowMinimum { min, .. }) if min == 1.0
        ));
        assert!(matches!(
            at_least("segment_width", f32::NAN, 1.0),
            Err(ConfigError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_finite() {
        assert!(finite("ground_y", -8.0).is_ok());
        assert!(finite("ground_y", f32::INFINITY).is_err());
    }

    #[test]
    fn test_display_names_field() {
        let err = ConfigError::NonPositive {
            field: "segment_width",
            value: -3.0,
        };
        assert!(err.to_string().contains("segment_width"));
    }
}
