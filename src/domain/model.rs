use crate::utils::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Positional numeral systems supported by the number converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

struct BaseEntry {
    name: &'static str,
    radix: u32,
    /// Digit alphabet in value order, so a digit's index is its value.
    digits: &'static str,
    alphabet: &'static str,
}

// 依 Base 的宣告順序排列
const BASE_TABLE: [BaseEntry; 4] = [
    BaseEntry {
        name: "binary",
        radix: 2,
        digits: "01",
        alphabet: "0-1",
    },
    BaseEntry {
        name: "octal",
        radix: 8,
        digits: "01234567",
        alphabet: "0-7",
    },
    BaseEntry {
        name: "decimal",
        radix: 10,
        digits: "0123456789",
        alphabet: "0-9",
    },
    BaseEntry {
        name: "hexadecimal",
        radix: 16,
        digits: "0123456789ABCDEF",
        alphabet: "0-9, A-F",
    },
];

impl Base {
    pub const ALL: [Base; 4] = [Base::Binary, Base::Octal, Base::Decimal, Base::Hexadecimal];

    fn entry(self) -> &'static BaseEntry {
        &BASE_TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    pub fn radix(self) -> u32 {
        self.entry().radix
    }

    /// Human readable digit range, e.g. `0-7`.
    pub fn alphabet(self) -> &'static str {
        self.entry().alphabet
    }

    pub fn is_valid_digit(self, c: char) -> bool {
        self.entry().digits.contains(c)
    }

    /// Value of an uppercase digit, `None` if it is not part of this base.
    pub fn digit_value(self, c: char) -> Option<u32> {
        self.entry().digits.find(c).map(|index| index as u32)
    }

    /// Renders `value` (which must be below the radix) as a single digit.
    pub fn render_digit(self, value: u32) -> Option<char> {
        self.entry().digits.chars().nth(value as usize)
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Base {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Base::ALL
            .into_iter()
            .find(|base| base.name() == s)
            .ok_or_else(|| ConvertError::UnknownBase {
                name: s.to_string(),
            })
    }
}

/// A validated number conversion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Upper-cased numeral, exactly as validated.
    pub numeral: String,
    pub source: Base,
    pub target: Base,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub result: String,
    pub steps: Vec<String>,
}

impl ConversionResult {
    /// The derivation trace as one newline separated block.
    pub fn solution(&self) -> String {
        self.steps.join("\n")
    }
}

/// Office document formats handled by the document converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn extension(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// The format a file with extension `ext` gets converted into.
    /// PDF becomes DOCX, Word documents become PDF.
    pub fn conversion_target(ext: &str) -> Option<DocumentFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Docx),
            "doc" | "docx" => Some(DocumentFormat::Pdf),
            _ => None,
        }
    }
}

/// Converted file held in memory, ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}
