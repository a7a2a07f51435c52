use crate::record::{Sandwich, StockEstimate, SurplusRecord, SANDWICH_COUNT};

/// The number of recent sales entries the stock estimate is based on
pub const HISTORY_LEN: usize = 5;

/// Possible errors to occur during surplus and stock calculations
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    #[error("expected 6 values per input but received {0}")]
    LengthMismatch(usize),
    #[error("there is no sales history for {0}")]
    EmptyHistory(Sandwich),
}

/// Calculates the surplus of each sandwich type as `stock - sales`
///
/// A positive surplus is wasted stock, a negative one is the number of
/// sandwiches that could have been sold on top.
pub fn surplus(stock: &[u32], sales: &[u32]) -> Result<SurplusRecord, CalcError> {
    check_len(stock.len())?;
    check_len(sales.len())?;

    let mut values = [0; SANDWICH_COUNT];
    for ((value, &stock), &sales) in values.iter_mut().zip(stock).zip(sales) {
        *value = i64::from(stock) - i64::from(sales);
    }

    Ok(SurplusRecord::new(values))
}

/// Estimates the stock for the next market
///
/// Each sandwich type gets the average of its sales history plus 10%, rounded
/// half to even. The computation is exact, so `5 * 1.1` is a tie and rounds to
/// `6`, not whatever binary floating point makes of it.
pub fn estimate<H: AsRef<[u32]>>(history: &[H]) -> Result<StockEstimate, CalcError> {
    check_len(history.len())?;

    let mut values = [0; SANDWICH_COUNT];
    for ((value, column), sandwich) in values.iter_mut().zip(history).zip(Sandwich::ALL) {
        let column = column.as_ref();
        if column.is_empty() {
            return Err(CalcError::EmptyHistory(sandwich));
        }

        let sum = column.iter().map(|&sales| u128::from(sales)).sum::<u128>();
        let estimate = div_round_half_even(sum * 11, column.len() as u128 * 10);
        // saturates, 1.1 * u32::MAX does not fit
        *value = u32::try_from(estimate).unwrap_or(u32::MAX);
    }

    Ok(StockEstimate::new(values))
}

fn check_len(len: usize) -> Result<(), CalcError> {
    match len {
        SANDWICH_COUNT => Ok(()),
        len => Err(CalcError::LengthMismatch(len)),
    }
}

fn div_round_half_even(numerator: u128, denominator: u128) -> u128 {
    let quotient = numerator / denominator;
    let twice_remainder = (numerator % denominator) * 2;

    match twice_remainder.cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + quotient % 2,
    }
}
