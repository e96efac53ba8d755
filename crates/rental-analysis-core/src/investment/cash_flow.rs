use crate::investment::{out_of_range, MONTHS_PER_YEAR};
use crate::types::Money;
use crate::RentalAnalysisResult;

/// Rent left over each month after the mortgage and operating costs.
pub fn monthly_cash_flow(
    average_rental: Money,
    monthly_mortgage: Money,
    total_monthly_expenses: Money,
) -> RentalAnalysisResult<Money> {
    average_rental
        .checked_sub(monthly_mortgage)
        .and_then(|net| net.checked_sub(total_monthly_expenses))
        .ok_or_else(|| out_of_range("average_rental"))
}

/// Monthly cash flow scaled to a year. Negative when the property loses money.
pub fn annual_cash_flow(
    average_rental: Money,
    monthly_mortgage: Money,
    total_monthly_expenses: Money,
) -> RentalAnalysisResult<Money> {
    monthly_cash_flow(average_rental, monthly_mortgage, total_monthly_expenses)?
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| out_of_range("average_rental"))
}
