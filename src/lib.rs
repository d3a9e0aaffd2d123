pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use crate::config::{CliArgs, ServerConfig};
pub use crate::core::base_converter::convert_number;
pub use crate::domain::model::{Base, ConversionRequest, ConversionResult};
pub use crate::server::{routes::create_router, AppState};
pub use crate::utils::error::{ConvertError, Result};
