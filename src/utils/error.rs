use crate::domain::model::PayloadKind;
use qrcode::types::QrError;
use qrcode::EcLevel;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrGenError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("QR encoding failed: {0}")]
    EncodeError(#[from] QrError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Payload '{kind}' is {length} bytes and does not fit a QR code at level {level:?}")]
    PayloadTooLong {
        kind: PayloadKind,
        length: usize,
        level: EcLevel,
    },

    #[error("Logo of {logo}px is too large for a {image}px QR code")]
    LogoTooLarge { logo: u32, image: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Payload,
    Rendering,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QrGenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QrGenError::ConfigError { .. }
            | QrGenError::ConfigValidationError { .. }
            | QrGenError::MissingConfigError { .. }
            | QrGenError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            QrGenError::PayloadTooLong { .. } | QrGenError::EncodeError(_) => {
                ErrorCategory::Payload
            }
            QrGenError::ImageError(_)
            | QrGenError::LogoTooLarge { .. }
            | QrGenError::SerializationError(_) => ErrorCategory::Rendering,
            QrGenError::IoError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Payload => ErrorSeverity::High,
            ErrorCategory::Rendering => ErrorSeverity::Medium,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QrGenError::IoError(e) => format!("Could not write QR images: {}", e),
            QrGenError::ImageError(e) => format!("Could not encode the PNG image: {}", e),
            QrGenError::SerializationError(e) => format!("Could not serialize output: {}", e),
            QrGenError::EncodeError(e) => format!("Could not encode QR code: {}", e),
            QrGenError::ConfigError { message } => format!("Configuration problem: {}", message),
            QrGenError::ConfigValidationError { field, message } => {
                format!("Configuration field '{}' is invalid: {}", field, message)
            }
            QrGenError::MissingConfigError { field } => {
                format!("Configuration field '{}' is required", field)
            }
            QrGenError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}': {}", value, field, reason),
            QrGenError::PayloadTooLong { kind, length, .. } => format!(
                "The {} payload ({} bytes) is too long to fit in a QR code",
                kind, length
            ),
            QrGenError::LogoTooLarge { logo, image } => format!(
                "A {}px logo would hide too much of a {}px QR code",
                logo, image
            ),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QrGenError::IoError(_) => {
                "Check that the output directory is writable and the disk is not full"
            }
            QrGenError::ImageError(_) | QrGenError::SerializationError(_) => {
                "Re-run with --verbose and report the problem"
            }
            QrGenError::EncodeError(_) | QrGenError::PayloadTooLong { .. } => {
                "Shorten the organization fields (note, organization name, address)"
            }
            QrGenError::ConfigError { .. } | QrGenError::ConfigValidationError { .. } => {
                "Make sure the configuration file exists and is valid TOML"
            }
            QrGenError::MissingConfigError { .. } | QrGenError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the configuration file"
            }
            QrGenError::LogoTooLarge { .. } => {
                "Lower render.logo_size or raise render.logo_module_size"
            }
        }
    }

    /// 依嚴重程度決定 CLI 退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, QrGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_exit_with_one() {
        let err = QrGenError::MissingConfigError {
            field: "organization.email".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = QrGenError::from(std::io::Error::other("disk full"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("disk full"));
    }

    #[test]
    fn test_payload_too_long_message() {
        let err = QrGenError::PayloadTooLong {
            kind: PayloadKind::FullCard,
            length: 4000,
            level: EcLevel::H,
        };
        assert_eq!(err.category(), ErrorCategory::Payload);
        assert!(err.to_string().contains("full-card"));
        assert!(err.user_friendly_message().contains("4000"));
    }
}
