use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use rental_analysis_core::form::{self, FormInput};
use rental_analysis_core::investment::{self, mortgage, InvestmentInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, raw: &str) -> NapiResult<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|e| napi::Error::from_reason(format!("{field}: {e}")))
}

// ---------------------------------------------------------------------------
// Investment analysis
// ---------------------------------------------------------------------------

/// Full analysis from an `InvestmentInput` JSON document.
#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    let input: InvestmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = investment::analyze_investment(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Apply the form field rules and return the resulting `InvestmentInput` JSON.
#[napi]
pub fn parse_form(form_json: String) -> NapiResult<String> {
    let raw: FormInput = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let input = form::parse_form(&raw).map_err(to_napi_error)?;
    serde_json::to_string(&input).map_err(to_napi_error)
}

/// Parse a raw form and analyse it, with results rounded for display.
#[napi]
pub fn analyze_form(form_json: String, decimals: Option<u32>) -> NapiResult<String> {
    let raw: FormInput = serde_json::from_str(&form_json).map_err(to_napi_error)?;
    let input = form::parse_form(&raw).map_err(to_napi_error)?;
    let mut output = investment::analyze_investment(&input).map_err(to_napi_error)?;
    output.result = output.result.rounded(decimals.unwrap_or(2));
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Monthly mortgage payment. Amounts and rate are decimal strings.
#[napi]
pub fn monthly_mortgage(
    purchase_price: String,
    down_payment: String,
    interest_rate: String,
    loan_term_years: u32,
) -> NapiResult<String> {
    let payment = mortgage::monthly_mortgage(
        parse_decimal("purchase_price", &purchase_price)?,
        parse_decimal("down_payment", &down_payment)?,
        parse_decimal("interest_rate", &interest_rate)?,
        loan_term_years,
    )
    .map_err(to_napi_error)?;
    Ok(payment.to_string())
}
