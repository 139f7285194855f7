use crate::utils::error::{QrGenError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(QrGenError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// 檔名前綴不能包含路徑分隔符，否則會寫到輸出目錄以外
pub fn validate_file_prefix(field_name: &str, prefix: &str) -> Result<()> {
    validate_non_empty_string(field_name, prefix)?;

    if prefix.contains(['/', '\\', '\0']) || prefix == "." || prefix == ".." {
        return Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: prefix.to_string(),
            reason: "Prefix must be a plain file name fragment".to_string(),
        });
    }

    Ok(())
}

pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    let invalid = |reason: &str| QrGenError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: email.to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("Email must contain '@'"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("Email must have exactly one '@' and a local part"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("Email domain must be a dotted host name"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("Email cannot contain whitespace"));
    }

    Ok(())
}

pub fn validate_phone(field_name: &str, phone: &str) -> Result<()> {
    validate_non_empty_string(field_name, phone)?;

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '.' | '(' | ')');
    if !phone.chars().all(allowed) || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: phone.to_string(),
            reason: "Phone may only contain digits, '+', spaces, '-', '.', '(' and ')'"
                .to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(QrGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("organization.website", "https://ffo-sa.com").is_ok());
        assert!(validate_url("organization.website", "http://example.com").is_ok());
        assert!(validate_url("organization.website", "").is_err());
        assert!(validate_url("organization.website", "ffo-sa.com").is_err());
        assert!(validate_url("organization.website", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("organization.email", "info@ffo.com.ar").is_ok());
        assert!(validate_email("organization.email", "info.ffo.com.ar").is_err());
        assert!(validate_email("organization.email", "@ffo.com.ar").is_err());
        assert!(validate_email("organization.email", "info@localhost").is_err());
        assert!(validate_email("organization.email", "a@b@c.com").is_err());
        assert!(validate_email("organization.email", "in fo@ffo.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("organization.phone", "+54 11 1234-5678").is_ok());
        assert!(validate_phone("organization.phone", "(011) 1234.5678").is_ok());
        assert!(validate_phone("organization.phone", "call me").is_err());
        assert!(validate_phone("organization.phone", "+-").is_err());
        assert!(validate_phone("organization.phone", "  ").is_err());
    }

    #[test]
    fn test_validate_file_prefix() {
        assert!(validate_file_prefix("output.prefix", "ffo").is_ok());
        assert!(validate_file_prefix("output.prefix", "../ffo").is_err());
        assert!(validate_file_prefix("output.prefix", "..").is_err());
        assert!(validate_file_prefix("output.prefix", "").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("render.border", 4u32, 0, 20).is_ok());
        assert!(validate_range("render.border", 21u32, 0, 20).is_err());
        assert!(validate_range("organization.address.latitude", -91.0, -90.0, 90.0).is_err());
    }
}
