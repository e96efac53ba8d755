//! Rental property investment metrics.
//!
//! Four stateless calculators (mortgage, operating expenses, cash flow and
//! return on investment) and the [`analysis`] pipeline that runs them in
//! sequence over a single [`analysis::InvestmentInput`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::RentalAnalysisError;

pub mod analysis;
pub mod cash_flow;
pub mod expenses;
pub mod mortgage;
pub mod roi;

pub use analysis::{analyze_investment, InvestmentInput, InvestmentResult, PropertyAddress};

/// Months per year, as used by every monthly/annual conversion.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Error for a checked `Decimal` operation that left the representable range.
pub(crate) fn out_of_range(field: &str) -> RentalAnalysisError {
    RentalAnalysisError::InvalidInput {
        field: field.into(),
        reason: "Value is too large to compute with decimal precision".into(),
    }
}
