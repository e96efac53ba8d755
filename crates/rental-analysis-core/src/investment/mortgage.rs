use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::RentalAnalysisError;
use crate::investment::{out_of_range, MONTHS_PER_YEAR};
use crate::types::{Money, Rate};
use crate::RentalAnalysisResult;

/// Amount financed: purchase price less the down payment.
///
/// Zero or negative when the down payment covers the price.
pub fn loan_amount(purchase_price: Money, down_payment: Money) -> RentalAnalysisResult<Money> {
    purchase_price
        .checked_sub(down_payment)
        .ok_or_else(|| out_of_range("down_payment"))
}

/// Fixed monthly payment that fully amortises `purchase_price - down_payment`
/// over `loan_term_years` at the annual nominal `interest_rate`.
///
/// Standard annuity formula: P * r(1+r)^n / ((1+r)^n - 1), with r the monthly
/// rate and n the number of monthly payments. A zero rate falls back to
/// straight-line repayment (P / n). A non-positive loan amount yields a
/// non-positive payment rather than an error.
pub fn monthly_mortgage(
    purchase_price: Money,
    down_payment: Money,
    interest_rate: Rate,
    loan_term_years: u32,
) -> RentalAnalysisResult<Money> {
    if loan_term_years == 0 {
        return Err(RentalAnalysisError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }

    let principal = loan_amount(purchase_price, down_payment)?;
    let monthly_rate = interest_rate / MONTHS_PER_YEAR;
    let total_payments = loan_term_years.checked_mul(12).ok_or_else(|| {
        RentalAnalysisError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Loan term is too long".into(),
        }
    })?;

    amortizing_payment(principal, monthly_rate, total_payments)
}

/// Level payment for `principal` over `total_payments` periods at `periodic_rate`.
///
/// Evaluated as P * r * ((1+r)^n / ((1+r)^n - 1)) so the growth factor is
/// reduced to a ratio near 1 before it meets the principal; high rates that
/// compound to a representable value still produce a payment.
pub fn amortizing_payment(
    principal: Money,
    periodic_rate: Rate,
    total_payments: u32,
) -> RentalAnalysisResult<Money> {
    if total_payments == 0 {
        return Err(RentalAnalysisError::InvalidInput {
            field: "loan_term_years".into(),
            reason: "Number of payments must be > 0".into(),
        });
    }

    if periodic_rate.is_zero() {
        return principal
            .checked_div(Decimal::from(total_payments))
            .ok_or_else(|| out_of_range("purchase_price"));
    }

    let compound = (Decimal::ONE + periodic_rate)
        .checked_powu(u64::from(total_payments))
        .ok_or_else(|| RentalAnalysisError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Compounded rate overflows over the loan term".into(),
        })?;

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(RentalAnalysisError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Rate produces a degenerate amortisation factor".into(),
        });
    }

    let growth_ratio = compound
        .checked_div(denominator)
        .ok_or_else(|| out_of_range("interest_rate"))?;

    principal
        .checked_mul(periodic_rate)
        .and_then(|interest| interest.checked_mul(growth_ratio))
        .ok_or_else(|| out_of_range("interest_rate"))
}
