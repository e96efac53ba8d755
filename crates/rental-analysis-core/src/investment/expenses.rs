use crate::investment::{out_of_range, MONTHS_PER_YEAR};
use crate::types::Money;
use crate::RentalAnalysisResult;

/// Average monthly operating cost.
///
/// All five components are annual totals; they are summed and spread over
/// twelve months. Management fees are a currency amount here, not a share
/// of rent.
pub fn monthly_expenses(
    property_taxes: Money,
    insurance: Money,
    management_fees: Money,
    water_and_sewer: Money,
    hoa: Money,
) -> RentalAnalysisResult<Money> {
    let annual = annual_expenses(property_taxes, insurance, management_fees, water_and_sewer, hoa)?;
    Ok(annual / MONTHS_PER_YEAR)
}

/// Sum of the annual operating cost components.
///
/// Fails naming the first component whose addition leaves the decimal range.
pub fn annual_expenses(
    property_taxes: Money,
    insurance: Money,
    management_fees: Money,
    water_and_sewer: Money,
    hoa: Money,
) -> RentalAnalysisResult<Money> {
    [
        ("insurance", insurance),
        ("management_fees", management_fees),
        ("water_and_sewer", water_and_sewer),
        ("hoa", hoa),
    ]
    .into_iter()
    .try_fold(property_taxes, |total, (field, amount)| {
        total.checked_add(amount).ok_or_else(|| out_of_range(field))
    })
}
