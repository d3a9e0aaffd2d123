//! POST /api/convert-number

use crate::core::base_converter;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::validate_required_field;
use axum::{extract::rejection::JsonRejection, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberConversionBody {
    pub input_value: Option<String>,
    pub source_base: Option<String>,
    pub target_base: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NumberConversionResponse {
    pub result: String,
    pub solution: String,
}

/// Converts a numeral between binary, octal, decimal and hexadecimal and
/// returns the worked solution alongside the result.
pub async fn convert_number(
    payload: std::result::Result<Json<NumberConversionBody>, JsonRejection>,
) -> Result<Json<NumberConversionResponse>> {
    let Json(body) = payload.map_err(|e| ConvertError::BadRequest {
        message: e.body_text(),
    })?;

    // 先檢查所有欄位，再開始計算
    let input_value = validate_required_field("inputValue", &body.input_value)?;
    let source_base = validate_required_field("sourceBase", &body.source_base)?;
    let target_base = validate_required_field("targetBase", &body.target_base)?;

    tracing::info!(
        "Received number conversion: {} from {} to {}",
        input_value,
        source_base,
        target_base
    );

    let converted = base_converter::convert_number(input_value, source_base, target_base)?;

    Ok(Json(NumberConversionResponse {
        solution: converted.solution(),
        result: converted.result,
    }))
}
