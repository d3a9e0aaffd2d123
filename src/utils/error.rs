use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Unknown base '{name}'. Supported bases: binary, octal, decimal, hexadecimal")]
    UnknownBase { name: String },

    #[error("Invalid {base} number '{value}'. Expected one or more of the digits {alphabet}")]
    InvalidNumeralFormat {
        base: String,
        value: String,
        alphabet: String,
    },

    #[error("Number '{value}' is too large to convert (values must fit in 128 bits and be at most 4096 digits long)")]
    NumeralOutOfRange { value: String },

    #[error("Internal computation error: {message}")]
    InternalComputationError { message: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Invalid {kind} file type. Allowed: {allowed}")]
    UnsupportedFileType { kind: String, allowed: String },

    #[error("Could not identify image file. Please ensure it is a valid image.")]
    UnrecognizedImage,

    #[error("Failed to fetch image from URL: {message}. Please ensure it's a valid, accessible image URL.")]
    FetchFailed { message: String },

    #[error("An error occurred during conversion: {message}")]
    ConversionFailed { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },
}

/// 錯誤分類，決定 HTTP 狀態碼與日誌等級
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Caller sent something we refuse to process (HTTP 400).
    Client,
    /// A remote resource we depend on failed.
    Upstream,
    /// Something broke on our side.
    Internal,
    /// Startup configuration is wrong.
    Configuration,
}

impl ConvertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConvertError::MissingField { .. }
            | ConvertError::UnknownBase { .. }
            | ConvertError::InvalidNumeralFormat { .. }
            | ConvertError::NumeralOutOfRange { .. }
            | ConvertError::BadRequest { .. }
            | ConvertError::UnsupportedFileType { .. }
            | ConvertError::UnrecognizedImage => ErrorCategory::Client,
            ConvertError::FetchFailed { .. } => ErrorCategory::Upstream,
            ConvertError::ConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ConvertError::InternalComputationError { .. }
            | ConvertError::ConversionFailed { .. }
            | ConvertError::IoError(_)
            | ConvertError::ImageError(_)
            | ConvertError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Client
    }

    /// Message safe to show to an end user.
    ///
    /// Client and upstream errors are already phrased for the caller; internal
    /// failures of arithmetic are collapsed into a generic sentence.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConvertError::InternalComputationError { .. } => {
                "An unexpected error occurred while converting the number.".to_string()
            }
            ConvertError::IoError(e) => format!("An unexpected error occurred: {}", e),
            ConvertError::ImageError(e) => format!("An unexpected error occurred: {}", e),
            ConvertError::SerializationError(e) => format!("An unexpected error occurred: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ConvertError::MissingField { .. } => {
                "Send inputValue, sourceBase and targetBase in the JSON body"
            }
            ConvertError::UnknownBase { .. } => {
                "Use one of: binary, octal, decimal, hexadecimal"
            }
            ConvertError::InvalidNumeralFormat { .. } => {
                "Check that every digit is valid for the selected source base"
            }
            ConvertError::NumeralOutOfRange { .. } => "Use a shorter number",
            ConvertError::BadRequest { .. } => "Check the request body and content type",
            ConvertError::UnsupportedFileType { .. } => "Upload a file with a supported extension",
            ConvertError::UnrecognizedImage => "Upload a valid PNG, JPEG, GIF or WEBP image",
            ConvertError::FetchFailed { .. } => {
                "Make sure the URL is reachable and points directly at an image"
            }
            ConvertError::ConversionFailed { .. } => {
                "Make sure an office suite is installed and `office_binary` points at it"
            }
            ConvertError::ConfigError { .. }
            | ConvertError::InvalidConfigValueError { .. }
            | ConvertError::MissingConfigError { .. } => {
                "Fix the configuration file or command line flags and restart"
            }
            ConvertError::InternalComputationError { .. }
            | ConvertError::IoError(_)
            | ConvertError::ImageError(_)
            | ConvertError::SerializationError(_) => "Retry later or check the server logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
