use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::RentalAnalysisError;
use crate::investment::{cash_flow, expenses, mortgage, roi};
use crate::types::{round_display, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::RentalAnalysisResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Descriptive location of the property. Never enters a formula.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl PropertyAddress {
    pub fn is_empty(&self) -> bool {
        self.street_address.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
    }
}

/// Property and financing figures for a single analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentInput {
    /// Property location (optional, informational only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<PropertyAddress>,
    /// Acquisition price
    pub purchase_price: Money,
    /// Closing costs paid in cash at acquisition
    pub closing_cost: Money,
    /// Equity paid towards the price
    pub down_payment: Money,
    /// Annual nominal mortgage rate (e.g. 0.05 = 5%)
    pub interest_rate: Rate,
    /// Mortgage term in whole years
    pub loan_term_years: u32,
    /// Expected monthly rent
    pub average_rental: Money,
    /// Annual property taxes
    #[serde(default)]
    pub property_taxes: Money,
    /// Annual insurance premium
    #[serde(default)]
    pub insurance: Money,
    /// Annual management fees, as a currency amount
    #[serde(default)]
    pub management_fees: Money,
    /// Annual water and sewer charges
    #[serde(default)]
    pub water_and_sewer: Money,
    /// Annual HOA dues
    #[serde(default)]
    pub hoa: Money,
}

/// Derived investment metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    /// Fixed monthly mortgage payment
    pub monthly_mortgage: Money,
    /// Average monthly operating expenses
    pub total_monthly_expenses: Money,
    /// Rent less mortgage and expenses, per year
    pub annual_cash_flow: Money,
    /// Annual cash flow / total investment, as a percentage
    pub roi: Percent,
    /// Amount financed (purchase price - down payment)
    pub loan_amount: Money,
    /// Rent less mortgage and expenses, per month
    pub monthly_cash_flow: Money,
    /// Down payment + closing cost
    pub total_investment: Money,
}

impl InvestmentResult {
    /// Copy with every figure rounded half away from zero to `dp` places.
    pub fn rounded(&self, dp: u32) -> InvestmentResult {
        let r = |v: Decimal| round_display(v, dp);
        InvestmentResult {
            monthly_mortgage: r(self.monthly_mortgage),
            total_monthly_expenses: r(self.total_monthly_expenses),
            annual_cash_flow: r(self.annual_cash_flow),
            roi: r(self.roi),
            loan_amount: r(self.loan_amount),
            monthly_cash_flow: r(self.monthly_cash_flow),
            total_investment: r(self.total_investment),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full calculation sequence: mortgage, expenses, cash flow, ROI.
///
/// All preconditions are checked before anything is computed, so an invalid
/// request never produces a partial result. Conditions that are computable
/// but unusual (negative cash flow, no loan) are reported as warnings.
pub fn analyze_investment(
    input: &InvestmentInput,
) -> RentalAnalysisResult<ComputationOutput<InvestmentResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    log::debug!(
        "analyzing investment: price={} down={} rate={} term={}y rent={}",
        input.purchase_price,
        input.down_payment,
        input.interest_rate,
        input.loan_term_years,
        input.average_rental
    );

    if let Err(e) = validate_input(input, &mut warnings) {
        log::debug!("investment input rejected: {e}");
        return Err(e);
    }

    // --- Mortgage ---
    let loan_amount = mortgage::loan_amount(input.purchase_price, input.down_payment)?;
    let monthly_mortgage = mortgage::monthly_mortgage(
        input.purchase_price,
        input.down_payment,
        input.interest_rate,
        input.loan_term_years,
    )?;

    if loan_amount <= Decimal::ZERO {
        warnings.push(format!(
            "Loan amount {loan_amount} is not positive — down payment covers the purchase price"
        ));
    }

    // --- Operating expenses ---
    let total_monthly_expenses = expenses::monthly_expenses(
        input.property_taxes,
        input.insurance,
        input.management_fees,
        input.water_and_sewer,
        input.hoa,
    )?;

    // --- Cash flow ---
    let monthly_cash_flow = cash_flow::monthly_cash_flow(
        input.average_rental,
        monthly_mortgage,
        total_monthly_expenses,
    )?;
    let annual_cash_flow = cash_flow::annual_cash_flow(
        input.average_rental,
        monthly_mortgage,
        total_monthly_expenses,
    )?;

    if annual_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Annual cash flow {:.2} is negative — rent does not cover mortgage and expenses",
            annual_cash_flow
        ));
    }

    // --- ROI ---
    let total_investment = roi::total_investment(input.down_payment, input.closing_cost)?;
    let roi = roi::return_on_investment(annual_cash_flow, total_investment)?;

    for w in &warnings {
        log::warn!("{w}");
    }

    let output = InvestmentResult {
        monthly_mortgage,
        total_monthly_expenses,
        annual_cash_flow,
        roi,
        loan_amount,
        monthly_cash_flow,
        total_investment,
    };

    log::debug!(
        "investment analysis complete: mortgage={:.2} expenses={:.2} cash_flow={:.2} roi={:.2}%",
        output.monthly_mortgage,
        output.total_monthly_expenses,
        output.annual_cash_flow,
        output.roi
    );

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Property Cash Flow and ROI (fixed-rate amortising mortgage)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &InvestmentInput, warnings: &mut Vec<String>) -> RentalAnalysisResult<()> {
    if input.loan_term_years == 0 {
        return Err(RentalAnalysisError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }

    if roi::total_investment(input.down_payment, input.closing_cost)? <= Decimal::ZERO {
        return Err(RentalAnalysisError::InvalidInput {
            field: "total_investment".into(),
            reason: "Down payment and closing cost cannot both be zero".into(),
        });
    }

    // --- Warnings for values outside the documented domain ---
    if input.interest_rate < Decimal::ZERO {
        warnings.push(format!("Interest rate {} is negative", input.interest_rate));
    }

    let non_negative = [
        ("purchase_price", input.purchase_price),
        ("closing_cost", input.closing_cost),
        ("down_payment", input.down_payment),
        ("property_taxes", input.property_taxes),
        ("insurance", input.insurance),
        ("management_fees", input.management_fees),
        ("water_and_sewer", input.water_and_sewer),
        ("hoa", input.hoa),
    ];
    for (field, value) in non_negative {
        if value < Decimal::ZERO {
            warnings.push(format!("{field} is negative ({value})"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sample_input() -> InvestmentInput {
        InvestmentInput {
            property: None,
            purchase_price: dec!(200000),
            closing_cost: dec!(5000),
            down_payment: dec!(40000),
            interest_rate: dec!(0.04),
            loan_term_years: 30,
            average_rental: dec!(1800),
            property_taxes: dec!(2400),
            insurance: dec!(1200),
            management_fees: dec!(600),
            water_and_sewer: dec!(360),
            hoa: dec!(240),
        }
    }

    #[test]
    fn test_full_pipeline_known_answer() {
        let out = analyze_investment(&sample_input()).unwrap();
        let r = &out.result;

        assert!((r.monthly_mortgage - dec!(763.86)).abs() < dec!(0.01));
        assert_eq!(r.total_monthly_expenses, dec!(400));
        assert!((r.annual_cash_flow - dec!(7633.68)).abs() < dec!(0.1));
        assert!((r.roi - dec!(16.96)).abs() < dec!(0.01), "ROI {}", r.roi);
        assert_eq!(r.loan_amount, dec!(160000));
        assert_eq!(r.total_investment, dec!(45000));
        assert_eq!(r.annual_cash_flow, r.monthly_cash_flow * dec!(12));
        assert!(out.warnings.is_empty(), "{:?}", out.warnings);
    }

    #[test]
    fn test_deterministic() {
        let a = analyze_investment(&sample_input()).unwrap();
        let b = analyze_investment(&sample_input()).unwrap();
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_zero_term_rejected_before_compute() {
        let mut input = sample_input();
        input.loan_term_years = 0;
        let err = analyze_investment(&input).unwrap_err();
        assert_eq!(err.field(), Some("loan_term_years"));
    }

    #[test]
    fn test_zero_investment_rejected() {
        let mut input = sample_input();
        input.down_payment = Decimal::ZERO;
        input.closing_cost = Decimal::ZERO;
        let err = analyze_investment(&input).unwrap_err();
        assert_eq!(err.field(), Some("total_investment"));
    }

    #[test]
    fn test_loan_term_checked_first() {
        let mut input = sample_input();
        input.loan_term_years = 0;
        input.down_payment = Decimal::ZERO;
        input.closing_cost = Decimal::ZERO;
        let err = analyze_investment(&input).unwrap_err();
        assert_eq!(err.field(), Some("loan_term_years"));
    }

    #[test]
    fn test_negative_cash_flow_warns() {
        let mut input = sample_input();
        input.average_rental = dec!(900);
        let out = analyze_investment(&input).unwrap();
        assert!(out.result.annual_cash_flow < Decimal::ZERO);
        assert!(out.result.roi < Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("negative")));
    }

    #[test]
    fn test_all_cash_purchase_warns() {
        let mut input = sample_input();
        input.down_payment = input.purchase_price;
        let out = analyze_investment(&input).unwrap();
        assert_eq!(out.result.monthly_mortgage, Decimal::ZERO);
        assert!(out.warnings.iter().any(|w| w.contains("Loan amount")));
    }

    #[test]
    fn test_zero_rate_pipeline() {
        let mut input = sample_input();
        input.purchase_price = dec!(120000);
        input.down_payment = dec!(20000);
        input.interest_rate = Decimal::ZERO;
        input.loan_term_years = 10;
        let out = analyze_investment(&input).unwrap();
        assert_eq!(out.result.rounded(2).monthly_mortgage, dec!(833.33));
    }

    #[test]
    fn test_rounded_two_places() {
        let out = analyze_investment(&sample_input()).unwrap();
        let shown = out.result.rounded(2);
        assert_eq!(shown.monthly_mortgage, dec!(763.86));
        assert_eq!(shown.total_monthly_expenses, dec!(400.00));
        assert_eq!(shown.roi, dec!(16.96));
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let r = InvestmentResult {
            monthly_mortgage: dec!(1.005),
            total_monthly_expenses: dec!(-1.005),
            annual_cash_flow: dec!(2.5),
            roi: dec!(0.125),
            loan_amount: dec!(0),
            monthly_cash_flow: dec!(0),
            total_investment: dec!(0),
        };
        let shown = r.rounded(2);
        assert_eq!(shown.monthly_mortgage, dec!(1.01));
        assert_eq!(shown.total_monthly_expenses, dec!(-1.01));
        assert_eq!(shown.roi, dec!(0.13));
        assert_eq!(r.rounded(0).annual_cash_flow, dec!(3));
    }

    #[test]
    fn test_assumptions_echo_property_address() {
        let mut input = sample_input();
        input.property = Some(PropertyAddress {
            street_address: Some("12 Elm St".into()),
            city: Some("Springfield".into()),
            state: None,
            zip_code: None,
        });
        let out = analyze_investment(&input).unwrap();
        assert_eq!(out.assumptions["property"]["city"], "Springfield");
        assert!(out.assumptions["property"].get("state").is_none());
    }

    #[test]
    fn test_overflowing_roi_is_invalid_input_not_panic() {
        let mut input = sample_input();
        input.closing_cost = dec!(0.0001);
        input.down_payment = Decimal::ZERO;
        input.average_rental = dec!(1000000000000000000000000);
        input.interest_rate = Decimal::ZERO;
        input.loan_term_years = 1;
        let err = analyze_investment(&input).unwrap_err();
        assert_eq!(err.field(), Some("total_investment"));
    }

    #[test]
    fn test_high_rate_pipeline_completes() {
        let mut input = sample_input();
        input.interest_rate = dec!(2.26);
        let out = analyze_investment(&input).unwrap();
        assert!(out.result.monthly_mortgage > dec!(30000));
        assert!(out.result.annual_cash_flow < Decimal::ZERO);
    }

    #[test]
    fn test_methodology_string() {
        let out = analyze_investment(&sample_input()).unwrap();
        assert!(out.methodology.contains("ROI"));
    }
}
