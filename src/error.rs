//! Error types and classification for the airweather core

use std::fmt;

use thiserror::Error;

/// Main error type for airport and weather operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WeatherError {
    /// Referenced airport (or other entity) does not exist
    #[error("The {entity} is not found. Please check your provided IATA code information again")]
    NotFound { entity: String },

    /// Malformed IATA code, numeric input or coordinate range
    #[error("Incorrect format of {field} information. {reason}")]
    Format { field: String, reason: String },

    /// Entity already registered
    #[error("Duplication of {entity}")]
    Duplicate { entity: String },

    /// Unknown weather variable or data point outside its accepted range
    #[error("Could not update atmospheric data. {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Stable classification of [`WeatherError`] values for transport layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Config,
    Validation,
    NotFound,
    Format,
    Duplicate,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Config => "WEA_1000",
            ErrorCode::Validation => "WEA_1001",
            ErrorCode::NotFound => "WEA_1002",
            ErrorCode::Format => "WEA_1003",
            ErrorCode::Duplicate => "WEA_1004",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WeatherError {
    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(entity: S) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Create a not-found error for an airport code
    pub fn airport_not_found<S: AsRef<str>>(iata: S) -> Self {
        Self::not_found(format!("airport {}", iata.as_ref()))
    }

    /// Create a new format error
    pub fn format<F: Into<String>, R: Into<String>>(field: F, reason: R) -> Self {
        Self::Format {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a duplicate error for an airport code
    pub fn duplicate_airport<S: AsRef<str>>(iata: S) -> Self {
        Self::Duplicate {
            entity: format!("airport {}", iata.as_ref()),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            WeatherError::NotFound { .. } => ErrorCode::NotFound,
            WeatherError::Format { .. } => ErrorCode::Format,
            WeatherError::Duplicate { .. } => ErrorCode::Duplicate,
            WeatherError::Validation { .. } => ErrorCode::Validation,
            WeatherError::Config { .. } => ErrorCode::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = WeatherError::airport_not_found("BOS");
        assert!(matches!(err, WeatherError::NotFound { .. }));
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = WeatherError::format("IATA Code", "IATA Code should contain 3 characters.");
        assert!(matches!(err, WeatherError::Format { .. }));

        let err = WeatherError::duplicate_airport("BOS");
        assert_eq!(err.code(), ErrorCode::Duplicate);
    }

    #[test]
    fn test_error_messages() {
        let err = WeatherError::airport_not_found("XYZ");
        assert_eq!(
            err.to_string(),
            "The airport XYZ is not found. Please check your provided IATA code information again"
        );

        let err = WeatherError::duplicate_airport("BOS");
        assert_eq!(err.to_string(), "Duplication of airport BOS");

        let err = WeatherError::validation("Illegal data point value");
        assert!(err.to_string().starts_with("Could not update atmospheric data."));
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ErrorCode::Validation.as_str(), "WEA_1001");
        assert_eq!(ErrorCode::NotFound.as_str(), "WEA_1002");
        assert_eq!(ErrorCode::Format.as_str(), "WEA_1003");
        assert_eq!(ErrorCode::Duplicate.as_str(), "WEA_1004");
        assert_eq!(WeatherError::config("x").code().to_string(), "WEA_1000");
    }
}
