//! Number base conversion with a step-by-step derivation trace.
//!
//! Conversion always goes through decimal: the source numeral is expanded
//! positionally into an integer (Step 1), which is then rendered in the target
//! base by repeated division (Step 2). Values are held in `u128`; anything
//! larger is rejected with [`ConvertError::NumeralOutOfRange`].

use crate::domain::model::{Base, ConversionRequest, ConversionResult};
use crate::utils::error::{ConvertError, Result};

impl ConversionRequest {
    /// Parses base names and validates the numeral against the source base.
    pub fn parse(numeral: &str, source: &str, target: &str) -> Result<Self> {
        let source: Base = source.parse()?;
        let target: Base = target.parse()?;
        let numeral = normalize_numeral(numeral);
        validate_numeral(&numeral, source)?;

        Ok(Self {
            numeral,
            source,
            target,
        })
    }
}

/// Longest numeral accepted, leading zeros included.
pub const MAX_NUMERAL_LENGTH: usize = 4096;

pub fn normalize_numeral(numeral: &str) -> String {
    numeral.to_ascii_uppercase()
}

/// Every character of an already normalized numeral must belong to `base`.
pub fn validate_numeral(numeral: &str, base: Base) -> Result<()> {
    if numeral.is_empty() || !numeral.chars().all(|c| base.is_valid_digit(c)) {
        return Err(ConvertError::InvalidNumeralFormat {
            base: base.name().to_string(),
            value: numeral.to_string(),
            alphabet: base.alphabet().to_string(),
        });
    }

    // 前導零不受 u128 範圍檢查限制，需另設長度上限
    if numeral.len() > MAX_NUMERAL_LENGTH {
        let preview: String = numeral.chars().take(16).collect();
        return Err(ConvertError::NumeralOutOfRange {
            value: format!("{}...", preview),
        });
    }
    Ok(())
}

/// Converts `numeral` between the named bases.
pub fn convert_number(numeral: &str, source: &str, target: &str) -> Result<ConversionResult> {
    let request = ConversionRequest::parse(numeral, source, target)?;
    convert(&request)
}

pub fn convert(request: &ConversionRequest) -> Result<ConversionResult> {
    let mut steps = Vec::new();

    let value = to_decimal(&request.numeral, request.source, &mut steps)?;
    let result = from_decimal(value, request.target, &mut steps)?;

    tracing::debug!(
        numeral = %request.numeral,
        source = %request.source,
        target = %request.target,
        result = %result,
        "number converted"
    );

    Ok(ConversionResult { result, steps })
}

fn out_of_range(numeral: &str) -> ConvertError {
    ConvertError::NumeralOutOfRange {
        value: numeral.to_string(),
    }
}

/// Step 1: positional expansion of `numeral` into an integer.
fn to_decimal(numeral: &str, base: Base, steps: &mut Vec<String>) -> Result<u128> {
    if base == Base::Decimal {
        let value = numeral.parse::<u128>().map_err(|_| out_of_range(numeral))?;
        steps.push(format!(
            "Step 1: {} is already a decimal number, so no conversion to decimal is needed.",
            numeral
        ));
        return Ok(value);
    }

    let radix = base.radix();
    let mut value: u128 = 0;
    let mut terms = Vec::with_capacity(numeral.len());

    // 由最右邊 (位置 0) 往左展開
    for (position, c) in numeral.chars().rev().enumerate() {
        let digit = base
            .digit_value(c)
            .ok_or_else(|| ConvertError::InternalComputationError {
                message: format!("'{}' is not a {} digit", c, base),
            })?;

        // 前導零不論位置多高都貢獻 0，不必計算權重
        if digit != 0 {
            let product = u32::try_from(position)
                .ok()
                .and_then(|exp| u128::from(radix).checked_pow(exp))
                .and_then(|weight| weight.checked_mul(u128::from(digit)))
                .ok_or_else(|| out_of_range(numeral))?;
            value = value.checked_add(product).ok_or_else(|| out_of_range(numeral))?;
        }

        terms.push(format!("{}×{}^{}", digit, radix, position));
    }
    terms.reverse();

    steps.push(format!(
        "Step 1: Convert {} from {} (base {}) to decimal.",
        numeral, base, radix
    ));
    steps.push(format!(
        "Multiply each digit by {}^k, where k is the digit's position counting from 0 at the right, then add the products.",
        radix
    ));
    steps.push(terms.join(" + "));
    steps.push(format!("= {}", value));

    Ok(value)
}

/// Step 2: repeated division of `value` by the target radix.
fn from_decimal(value: u128, base: Base, steps: &mut Vec<String>) -> Result<String> {
    if base == Base::Decimal {
        steps.push(format!(
            "Step 2: The target base is decimal, so no further conversion is needed. The result is {}.",
            value
        ));
        return Ok(value.to_string());
    }

    let radix = u128::from(base.radix());
    steps.push(format!(
        "Step 2: Convert {} from decimal to {} (base {}).",
        value, base, radix
    ));
    steps.push(format!(
        "Divide by {} repeatedly and write down each remainder until the quotient is 0.",
        radix
    ));

    let mut remainders = Vec::new();
    if value == 0 {
        steps.push(format!("0 ÷ {} = 0 R0", radix));
        remainders.push('0');
    }

    let mut dividend = value;
    while dividend > 0 {
        let quotient = dividend / radix;
        let remainder = (dividend % radix) as u32;
        let digit = base
            .render_digit(remainder)
            .ok_or_else(|| ConvertError::InternalComputationError {
                message: format!("remainder {} has no {} digit", remainder, base),
            })?;

        steps.push(format!("{} ÷ {} = {} R{}", dividend, radix, quotient, digit));
        remainders.push(digit);
        dividend = quotient;
    }

    let result: String = remainders.iter().rev().collect();
    steps.push(format!(
        "Reading the remainders from bottom to top gives {}.",
        result
    ));

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_of(numeral: &str, source: &str, target: &str) -> String {
        convert_number(numeral, source, target).unwrap().result
    }

    /// Normalized form: upper case, no leading zeros (but "0" stays "0").
    fn canonical(numeral: &str) -> String {
        let upper = numeral.to_ascii_uppercase();
        let trimmed = upper.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }

    #[test]
    fn test_known_values() {
        assert_eq!(result_of("1010", "binary", "decimal"), "10");
        assert_eq!(result_of("255", "decimal", "hexadecimal"), "FF");
        assert_eq!(result_of("FF", "hexadecimal", "octal"), "377");
        assert_eq!(result_of("777", "octal", "binary"), "111111111");
    }

    #[test]
    fn test_lowercase_hex_is_normalized() {
        assert_eq!(result_of("ff", "hexadecimal", "decimal"), "255");
        assert_eq!(result_of("1a", "hexadecimal", "binary"), "11010");
    }

    #[test]
    fn test_surrounding_whitespace_is_invalid() {
        for (numeral, base) in [
            (" 1010 ", "binary"),
            ("ff\n", "hexadecimal"),
            ("  1a  ", "hexadecimal"),
            ("\t777", "octal"),
        ] {
            assert!(
                matches!(
                    convert_number(numeral, base, "decimal"),
                    Err(ConvertError::InvalidNumeralFormat { .. })
                ),
                "{:?} should be rejected",
                numeral
            );
        }
    }

    #[test]
    fn test_round_trip_all_base_pairs() {
        let samples: [(Base, &[&str]); 4] = [
            (Base::Binary, &["0", "1", "1010", "11111111", "0011"]),
            (Base::Octal, &["0", "7", "377", "1234567", "007"]),
            (Base::Decimal, &["0", "9", "255", "1000000", "18446744073709551616"]),
            (Base::Hexadecimal, &["0", "F", "ff", "DEADBEEF", "00A0"]),
        ];

        for (source, numerals) in samples {
            for numeral in numerals {
                for target in Base::ALL {
                    let there = convert_number(numeral, source.name(), target.name()).unwrap();
                    let back =
                        convert_number(&there.result, target.name(), source.name()).unwrap();
                    assert_eq!(
                        back.result,
                        canonical(numeral),
                        "{} {} -> {} -> back",
                        numeral,
                        source,
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn test_identity_conversion() {
        assert_eq!(result_of("0101", "binary", "binary"), "101");
        assert_eq!(result_of("abc", "hexadecimal", "hexadecimal"), "ABC");
        assert_eq!(result_of("0042", "decimal", "decimal"), "42");

        // 同一進位仍完整經過兩個步驟
        let identity = convert_number("17", "octal", "octal").unwrap();
        assert!(identity.steps[0].starts_with("Step 1: Convert 17 from octal"));
        assert!(identity.steps.iter().any(|s| s.starts_with("Step 2: Convert 15")));
    }

    #[test]
    fn test_zero_from_every_base() {
        for source in Base::ALL {
            for target in Base::ALL {
                let converted = convert_number("0", source.name(), target.name()).unwrap();
                assert_eq!(converted.result, "0");

                if target != Base::Decimal {
                    let division_lines: Vec<_> =
                        converted.steps.iter().filter(|s| s.contains('÷')).collect();
                    assert_eq!(division_lines.len(), 1);
                    assert_eq!(division_lines[0], &format!("0 ÷ {} = 0 R0", target.radix()));
                }
            }
        }
    }

    #[test]
    fn test_alphabet_rejection() {
        assert!(matches!(
            convert_number("2", "binary", "decimal"),
            Err(ConvertError::InvalidNumeralFormat { base, .. }) if base == "binary"
        ));
        assert!(matches!(
            convert_number("G", "hexadecimal", "decimal"),
            Err(ConvertError::InvalidNumeralFormat { .. })
        ));
        assert!(matches!(
            convert_number("8", "octal", "binary"),
            Err(ConvertError::InvalidNumeralFormat { .. })
        ));
        assert!(matches!(
            convert_number("12.5", "decimal", "binary"),
            Err(ConvertError::InvalidNumeralFormat { .. })
        ));
        assert!(matches!(
            convert_number("-5", "decimal", "binary"),
            Err(ConvertError::InvalidNumeralFormat { .. })
        ));
    }

    #[test]
    fn test_empty_numeral_is_invalid() {
        for base in Base::ALL {
            assert!(matches!(
                convert_number("", base.name(), "decimal"),
                Err(ConvertError::InvalidNumeralFormat { .. })
            ));
        }
        assert!(convert_number("   ", "decimal", "binary").is_err());
    }

    #[test]
    fn test_unknown_base() {
        assert!(matches!(
            convert_number("10", "roman", "decimal"),
            Err(ConvertError::UnknownBase { name }) if name == "roman"
        ));
        assert!(matches!(
            convert_number("10", "decimal", "base64"),
            Err(ConvertError::UnknownBase { name }) if name == "base64"
        ));
        // 空字串的進制名稱也是未知進制，不是缺欄位
        assert!(matches!(
            convert_number("10", "", "decimal"),
            Err(ConvertError::UnknownBase { name }) if name.is_empty()
        ));
    }

    #[test]
    fn test_step_one_trace() {
        let converted = convert_number("1010", "binary", "decimal").unwrap();
        assert_eq!(
            converted.steps,
            vec![
                "Step 1: Convert 1010 from binary (base 2) to decimal.".to_string(),
                "Multiply each digit by 2^k, where k is the digit's position counting from 0 at the right, then add the products.".to_string(),
                "1×2^3 + 0×2^2 + 1×2^1 + 0×2^0".to_string(),
                "= 10".to_string(),
                "Step 2: The target base is decimal, so no further conversion is needed. The result is 10.".to_string(),
            ]
        );
    }

    #[test]
    fn test_step_two_trace() {
        let converted = convert_number("255", "decimal", "hexadecimal").unwrap();
        assert_eq!(
            converted.solution(),
            "Step 1: 255 is already a decimal number, so no conversion to decimal is needed.\n\
             Step 2: Convert 255 from decimal to hexadecimal (base 16).\n\
             Divide by 16 repeatedly and write down each remainder until the quotient is 0.\n\
             255 ÷ 16 = 15 RF\n\
             15 ÷ 16 = 0 RF\n\
             Reading the remainders from bottom to top gives FF."
        );
    }

    #[test]
    fn test_hex_digits_expand_to_values() {
        let converted = convert_number("FF", "hexadecimal", "octal").unwrap();
        assert!(converted.steps.contains(&"15×16^1 + 15×16^0".to_string()));
        assert!(converted.steps.contains(&"= 255".to_string()));
        assert!(converted.steps.contains(&"255 ÷ 8 = 31 R7".to_string()));
        assert!(converted.steps.contains(&"31 ÷ 8 = 3 R7".to_string()));
        assert!(converted.steps.contains(&"3 ÷ 8 = 0 R3".to_string()));
    }

    #[test]
    fn test_large_values() {
        let max = u128::MAX.to_string();
        assert_eq!(
            result_of(&max, "decimal", "hexadecimal"),
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF"
        );
        assert_eq!(
            result_of("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF", "hexadecimal", "decimal"),
            max
        );
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            convert_number("340282366920938463463374607431768211456", "decimal", "binary"),
            Err(ConvertError::NumeralOutOfRange { .. })
        ));
        let too_wide = format!("1{}", "0".repeat(128));
        assert!(matches!(
            convert_number(&too_wide, "binary", "decimal"),
            Err(ConvertError::NumeralOutOfRange { .. })
        ));
    }

    #[test]
    fn test_long_leading_zeros_are_accepted() {
        let padded = format!("{}1", "0".repeat(300));
        assert_eq!(result_of(&padded, "binary", "decimal"), "1");
        assert_eq!(result_of(&padded, "decimal", "binary"), "1");
    }

    #[test]
    fn test_numeral_length_limit() {
        let longest = format!("{}1", "0".repeat(MAX_NUMERAL_LENGTH - 1));
        assert_eq!(result_of(&longest, "binary", "decimal"), "1");

        let too_long = format!("{}1", "0".repeat(MAX_NUMERAL_LENGTH));
        match convert_number(&too_long, "binary", "decimal") {
            Err(ConvertError::NumeralOutOfRange { value }) => assert!(value.len() < 32),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
