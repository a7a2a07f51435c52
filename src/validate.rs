use std::str::FromStr;

use crate::record::{SalesRecord, StockRecord, SANDWICH_COUNT};

/// The delimiter between sales figures on an input line
pub const DELIMITER: char = ',';

/// Possible errors to occur while validating user input
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("expected only numbers but received {0:?}")]
    NonNumericInput(Vec<String>),
    #[error("expected 6 values but received {0}")]
    WrongCount(usize),
    #[error("{0:?} are too large to be sales figures")]
    OutOfRange(Vec<String>),
}

/// Checks that the tokens are exactly six whole, non-negative numbers
///
/// Surrounding whitespace of each token is ignored. The content of the tokens
/// is checked before their count, so non-numeric input is reported even if
/// the count is wrong as well. Every offending token is reported.
pub fn validate<S: AsRef<str>>(tokens: &[S]) -> Result<(), ValidationError> {
    let non_numeric = tokens
        .iter()
        .map(|token| token.as_ref().trim())
        .filter(|token| !is_decimal(token))
        .map(str::to_string)
        .collect::<Vec<_>>();
    if !non_numeric.is_empty() {
        return Err(ValidationError::NonNumericInput(non_numeric));
    }

    if tokens.len() != SANDWICH_COUNT {
        return Err(ValidationError::WrongCount(tokens.len()));
    }

    let out_of_range = tokens
        .iter()
        .map(|token| token.as_ref().trim())
        .filter(|token| token.parse::<u32>().is_err())
        .map(str::to_string)
        .collect::<Vec<_>>();
    if !out_of_range.is_empty() {
        return Err(ValidationError::OutOfRange(out_of_range));
    }

    Ok(())
}

fn is_decimal(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Splits a line on [`DELIMITER`] and converts the validated tokens
fn parse_line(line: &str) -> Result<[u32; SANDWICH_COUNT], ValidationError> {
    let tokens = line.trim().split(DELIMITER).collect::<Vec<_>>();
    validate(tokens.as_slice())?;

    let mut values = [0; SANDWICH_COUNT];
    for (value, token) in values.iter_mut().zip(&tokens) {
        *value = token
            .trim()
            .parse()
            .map_err(|_| ValidationError::OutOfRange(vec![token.trim().to_string()]))?;
    }

    Ok(values)
}

impl FromStr for SalesRecord {
    type Err = ValidationError;

    /// Parses a line of comma separated sales figures
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_line(line).map(SalesRecord::new)
    }
}

impl FromStr for StockRecord {
    type Err = ValidationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        parse_line(line).map(StockRecord::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! validate_test {
        ($name:ident $tokens:expr => Ok) => {
            #[test]
            fn $name() {
                let tokens: &[&str] = &$tokens;
                assert_eq!(validate(tokens), Ok(()));
                // no hidden state between calls
                assert_eq!(validate(tokens), Ok(()));
            }
        };
        ($name:ident $tokens:expr => $error:expr) => {
            #[test]
            fn $name() {
                let tokens: &[&str] = &$tokens;
                assert_eq!(validate(tokens), Err($error));
            }
        };
    }

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    validate_test!(six_numbers ["10", "20", "30", "40", "50", "60"] => Ok);
    validate_test!(zeros ["0", "0", "0", "0", "0", "0"] => Ok);
    validate_test!(padded_numbers [" 10", "20 ", " 30 ", "40", "50", "60"] => Ok);
    validate_test!(too_few ["10", "20", "30"]
        => ValidationError::WrongCount(3));
    validate_test!(too_many ["1", "2", "3", "4", "5", "6", "7"]
        => ValidationError::WrongCount(7));
    validate_test!(nothing []
        => ValidationError::WrongCount(0));
    validate_test!(single_word ["10", "20", "thirty", "40", "50", "60"]
        => ValidationError::NonNumericInput(strings(&["thirty"])));
    validate_test!(every_word_reported ["ten", "20", "-3", "4.5", "50", "sixty"]
        => ValidationError::NonNumericInput(strings(&["ten", "-3", "4.5", "sixty"])));
    validate_test!(content_before_count ["1", "x"]
        => ValidationError::NonNumericInput(strings(&["x"])));
    validate_test!(sign_rejected ["+1", "2", "3", "4", "5", "6"]
        => ValidationError::NonNumericInput(strings(&["+1"])));
    validate_test!(inner_whitespace ["1 0", "2", "3", "4", "5", "6"]
        => ValidationError::NonNumericInput(strings(&["1 0"])));
    validate_test!(empty_token ["1", "", "3", "4", "5", "6"]
        => ValidationError::NonNumericInput(strings(&[""])));
    validate_test!(non_ascii_digits ["١٢", "2", "3", "4", "5", "6"]
        => ValidationError::NonNumericInput(strings(&["١٢"])));
    validate_test!(too_large ["1", "2", "3", "4", "5", "99999999999"]
        => ValidationError::OutOfRange(strings(&["99999999999"])));

    #[test]
    fn parse_line() {
        let record = "10,20,30,40,50,60".parse::<SalesRecord>().unwrap();
        assert_eq!(record, SalesRecord::new([10, 20, 30, 40, 50, 60]));
    }

    #[test]
    fn parse_line_with_spaces() {
        let record = " 10, 20, 30, 40, 50, 60\n".parse::<SalesRecord>().unwrap();
        assert_eq!(record, SalesRecord::new([10, 20, 30, 40, 50, 60]));
    }

    #[test]
    fn parse_preserves_order() {
        let record = "6,5,4,3,2,1".parse::<SalesRecord>().unwrap();
        assert_eq!(record.values(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn parse_space_delimited_line() {
        let error = "10 20 30 40 50 60".parse::<SalesRecord>().unwrap_err();
        assert_eq!(
            error,
            ValidationError::NonNumericInput(strings(&["10 20 30 40 50 60"])),
        );
    }

    #[test]
    fn parse_stock_line() {
        let record = "5,0,12,3,3,8".parse::<StockRecord>().unwrap();
        assert_eq!(record, StockRecord::new([5, 0, 12, 3, 3, 8]));
    }

    #[test]
    fn parse_empty_line() {
        let error = "".parse::<SalesRecord>().unwrap_err();
        assert_eq!(error, ValidationError::NonNumericInput(strings(&[""])));
    }
}
