use crate::utils::error::{ConvertError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks a user supplied image URL. Only absolute http(s) URLs are fetched.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let reject = |reason: String| ConvertError::BadRequest {
        message: format!("Invalid {} '{}': {}", field_name, url_str, reason),
    };

    if url_str.is_empty() {
        return Err(reject("URL cannot be empty".to_string()));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(reject(format!(
                "Unsupported URL scheme: {}. Must start with http:// or https://",
                scheme
            ))),
        },
        Err(e) => Err(reject(format!(
            "Invalid URL format: {}. Must start with http:// or https://",
            e
        ))),
    }
}

/// Lower-cased extension of `filename`, if it has one.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

pub fn validate_file_extension(kind: &str, filename: &str, allowed_extensions: &[&str]) -> Result<()> {
    let allowed = file_extension(filename)
        .map(|ext| allowed_extensions.contains(&ext.as_str()))
        .unwrap_or(false);

    if allowed {
        return Ok(());
    }

    Err(ConvertError::UnsupportedFileType {
        kind: kind.to_string(),
        allowed: allowed_extensions
            .iter()
            .map(|ext| ext.to_ascii_uppercase())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ConvertError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Request fields arrive as `Option`s; absence is a client error.
pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ConvertError::MissingField {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ConvertError::InvalidConfigValueError {
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
        return Err(ConvertError::InvalidConfigValueError {
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
        assert!(validate_url("url", "https://example.com/cat.png").is_ok());
        assert!(validate_url("url", "http://example.com").is_ok());
        assert!(validate_url("url", "").is_err());
        assert!(validate_url("url", "invalid-url").is_err());
        assert!(validate_url("url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_url_is_client_error() {
        let err = validate_url("url", "file:///etc/passwd").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("port", 5000, 1).is_ok());
        assert!(validate_positive_number("port", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["png", "jpg", "jpeg"];
        assert!(validate_file_extension("image", "photo.png", &allowed).is_ok());
        assert!(validate_file_extension("image", "PHOTO.JPEG", &allowed).is_ok());
        assert!(validate_file_extension("image", "notes.txt", &allowed).is_err());
        assert!(validate_file_extension("image", "no_extension", &allowed).is_err());

        match validate_file_extension("image", "a.bmp", &allowed) {
            Err(ConvertError::UnsupportedFileType { kind, allowed }) => {
                assert_eq!(kind, "image");
                assert_eq!(allowed, "PNG, JPG, JPEG");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("1010".to_string());
        let absent: Option<String> = None;
        assert_eq!(validate_required_field("inputValue", &present).unwrap(), "1010");
        assert!(matches!(
            validate_required_field("targetBase", &absent),
            Err(ConvertError::MissingField { field }) if field == "targetBase"
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("timeout", 30u64, 1, 3600).is_ok());
        assert!(validate_range("timeout", 0u64, 1, 3600).is_err());
        assert!(validate_range("timeout", 3601u64, 1, 3600).is_err());
    }
}
