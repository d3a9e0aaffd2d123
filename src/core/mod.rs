pub mod base_converter;
pub mod document_converter;
pub mod image_converter;

pub use crate::domain::model::{Base, ConversionRequest, ConversionResult, ConvertedFile, DocumentFormat};
pub use crate::domain::ports::DocumentConverter;
pub use crate::utils::error::Result;
