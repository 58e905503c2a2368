use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Invalid staffing profile (team size {team_size}, dentists {dentists}): {reason}")]
    InvalidProfile {
        team_size: i64,
        dentists: i64,
        reason: String,
    },

    #[error("No training institute available in the catalog")]
    NoInstituteAvailable,

    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Address resolution failed: {message}")]
    AddressResolution { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Catalog,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CalcError {
    pub fn invalid_profile(team_size: i64, dentists: i64, reason: impl Into<String>) -> Self {
        Self::InvalidProfile {
            team_size,
            dentists,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProfile { .. }
            | Self::InvalidCoordinates { .. }
            | Self::AddressResolution { .. } => ErrorCategory::Input,
            Self::NoInstituteAvailable => ErrorCategory::Catalog,
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::Io,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // the calculator still produces a result without travel figures
            Self::NoInstituteAvailable | Self::AddressResolution { .. } => ErrorSeverity::Low,
            Self::InvalidProfile { .. } | Self::InvalidCoordinates { .. } => ErrorSeverity::Medium,
            Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InvalidProfile { .. } => {
                "Use non-negative counts and make sure dentists do not exceed the team size"
            }
            Self::NoInstituteAvailable => {
                "Add at least one institute under [catalog] to include travel costs"
            }
            Self::InvalidCoordinates { .. } => {
                "Latitude must lie in [-90, 90] and longitude in [-180, 180]"
            }
            Self::AddressResolution { .. } => {
                "Check the address; the calculation continues without travel costs"
            }
            Self::MissingConfigError { .. } => "Add the missing field to the configuration file",
            Self::InvalidConfigValueError { .. } | Self::ConfigValidationError { .. } => {
                "Fix the reported configuration value and try again"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::CsvError(_) => "Institute CSV rows must have the columns name,latitude,longitude",
            Self::SerializationError(_) => "Report this problem; the result could not be encoded",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidProfile { reason, .. } => format!("The team details are not valid: {}", reason),
            Self::NoInstituteAvailable => "No training institute is known yet".to_string(),
            Self::InvalidCoordinates { .. } => "The practice location is not valid".to_string(),
            Self::AddressResolution { .. } => "The address could not be located".to_string(),
            Self::MissingConfigError { field } => format!("Configuration is missing '{}'", field),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::CsvError(e) => format!("Institute list could not be read: {}", e),
            Self::SerializationError(e) => format!("Result could not be written: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_errors_are_input_errors() {
        let err = CalcError::invalid_profile(5, 6, "dentists exceed team size");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.to_string().contains("team size 5"));
        assert!(err.user_friendly_message().contains("dentists exceed team size"));
    }

    #[test]
    fn test_missing_institute_is_low_severity() {
        let err = CalcError::NoInstituteAvailable;
        assert_eq!(err.category(), ErrorCategory::Catalog);
        assert_eq!(err.severity(), ErrorSeverity::Low);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = CalcError::MissingConfigError {
            field: "online_pricing.bands".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.severity() > ErrorSeverity::Medium);
    }
}
