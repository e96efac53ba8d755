use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RentalAnalysisError;
use crate::investment::out_of_range;
use crate::types::{Money, Percent};
use crate::RentalAnalysisResult;

/// Cash put into the deal: down payment plus closing cost.
pub fn total_investment(down_payment: Money, closing_cost: Money) -> RentalAnalysisResult<Money> {
    down_payment
        .checked_add(closing_cost)
        .ok_or_else(|| out_of_range("total_investment"))
}

/// Cash-on-cash return as a percentage: annual cash flow / total investment * 100.
pub fn return_on_investment(
    annual_cash_flow: Money,
    total_investment: Money,
) -> RentalAnalysisResult<Percent> {
    if total_investment <= Decimal::ZERO {
        return Err(RentalAnalysisError::InvalidInput {
            field: "total_investment".into(),
            reason: "Down payment plus closing cost must be positive".into(),
        });
    }

    annual_cash_flow
        .checked_div(total_investment)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| RentalAnalysisError::InvalidInput {
            field: "total_investment".into(),
            reason: "Investment is too small relative to cash flow to express a return".into(),
        })
}
