//! Raw form input and the transformation rules that turn it into an
//! [`InvestmentInput`].
//!
//! Every field arrives as text exactly as a user typed it. Each field has a
//! declared [`FieldRule`]; the rules are applied uniformly before the
//! engine's input record is built, so display formatting never leaks into
//! the numbers.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RentalAnalysisError;
use crate::investment::analysis::{InvestmentInput, PropertyAddress};
use crate::RentalAnalysisResult;

/// How a raw text field is converted into an engine value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRule {
    /// Currency amount. Empty means zero.
    Amount,
    /// Percentage as typed (5 = 5%), stored as a fraction (0.05).
    /// A trailing `%` is accepted. Empty means zero.
    Percent,
    /// Non-negative whole number of years.
    WholeYears,
    /// Free text, trimmed. Empty means absent.
    Text,
}

/// The form exactly as submitted. Missing fields deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub purchase_price: String,
    pub closing_cost: String,
    pub interest_rate: String,
    pub down_payment: String,
    pub loan_term: String,
    pub average_rental: String,
    pub property_taxes: String,
    pub insurance: String,
    pub management_fees: String,
    pub water_and_sewer: String,
    pub hoa: String,
}

/// Rule applied to every form field, in form order.
pub fn field_rules() -> &'static [(&'static str, FieldRule)] {
    &[
        ("street_address", FieldRule::Text),
        ("city", FieldRule::Text),
        ("state", FieldRule::Text),
        ("zip_code", FieldRule::Text),
        ("purchase_price", FieldRule::Amount),
        ("closing_cost", FieldRule::Amount),
        ("interest_rate", FieldRule::Percent),
        ("down_payment", FieldRule::Amount),
        ("loan_term", FieldRule::WholeYears),
        ("average_rental", FieldRule::Amount),
        ("property_taxes", FieldRule::Amount),
        ("insurance", FieldRule::Amount),
        ("management_fees", FieldRule::Amount),
        ("water_and_sewer", FieldRule::Amount),
        ("hoa", FieldRule::Amount),
    ]
}

/// Look up the rule for a named field.
pub fn rule_for(field: &str) -> Option<FieldRule> {
    field_rules()
        .iter()
        .find(|(name, _)| *name == field)
        .map(|(_, rule)| *rule)
}

/// A raw field after its rule has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Number(Decimal),
    Years(u32),
    Text(Option<String>),
}

impl FormInput {
    /// Raw text of a field by its rule-table name.
    pub fn raw(&self, field: &str) -> Option<&str> {
        let value = match field {
            "street_address" => &self.street_address,
            "city" => &self.city,
            "state" => &self.state,
            "zip_code" => &self.zip_code,
            "purchase_price" => &self.purchase_price,
            "closing_cost" => &self.closing_cost,
            "interest_rate" => &self.interest_rate,
            "down_payment" => &self.down_payment,
            "loan_term" => &self.loan_term,
            "average_rental" => &self.average_rental,
            "property_taxes" => &self.property_taxes,
            "insurance" => &self.insurance,
            "management_fees" => &self.management_fees,
            "water_and_sewer" => &self.water_and_sewer,
            "hoa" => &self.hoa,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// Convert one raw field according to `rule`.
pub fn apply_rule(rule: FieldRule, field: &str, raw: &str) -> RentalAnalysisResult<FieldValue> {
    match rule {
        FieldRule::Amount => parse_amount(field, raw).map(FieldValue::Number),
        FieldRule::Percent => parse_percent(field, raw).map(FieldValue::Number),
        FieldRule::WholeYears => parse_whole_years(field, raw).map(FieldValue::Years),
        FieldRule::Text => Ok(FieldValue::Text(parse_text(raw))),
    }
}

/// Apply the field rules and build the engine input.
///
/// Every field in [`field_rules`] is converted in table order; the first one
/// that does not satisfy its rule fails the whole form. Engine-level
/// preconditions (loan term > 0, positive investment) are left to the engine.
pub fn parse_form(form: &FormInput) -> RentalAnalysisResult<InvestmentInput> {
    let mut values = Vec::with_capacity(field_rules().len());
    for (field, rule) in field_rules() {
        let raw = form.raw(field).ok_or_else(|| RentalAnalysisError::InvalidInput {
            field: (*field).into(),
            reason: "No such form field".into(),
        })?;
        values.push((*field, apply_rule(*rule, field, raw)?));
    }
    let fields = ParsedFields(values);

    let property = PropertyAddress {
        street_address: fields.text("street_address")?,
        city: fields.text("city")?,
        state: fields.text("state")?,
        zip_code: fields.text("zip_code")?,
    };

    let input = InvestmentInput {
        property: (!property.is_empty()).then_some(property),
        purchase_price: fields.number("purchase_price")?,
        closing_cost: fields.number("closing_cost")?,
        interest_rate: fields.number("interest_rate")?,
        down_payment: fields.number("down_payment")?,
        loan_term_years: fields.years("loan_term")?,
        average_rental: fields.number("average_rental")?,
        property_taxes: fields.number("property_taxes")?,
        insurance: fields.number("insurance")?,
        management_fees: fields.number("management_fees")?,
        water_and_sewer: fields.number("water_and_sewer")?,
        hoa: fields.number("hoa")?,
    };

    log::debug!("form parsed into investment input: {input:?}");
    Ok(input)
}

/// Rule outputs keyed by field name.
struct ParsedFields(Vec<(&'static str, FieldValue)>);

impl ParsedFields {
    fn get(&self, field: &str) -> RentalAnalysisResult<&FieldValue> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
            .ok_or_else(|| RentalAnalysisError::InvalidInput {
                field: field.into(),
                reason: "Field has no parsing rule".into(),
            })
    }

    fn number(&self, field: &str) -> RentalAnalysisResult<Decimal> {
        match self.get(field)? {
            FieldValue::Number(n) => Ok(*n),
            other => Err(mismatch(field, "a number", other)),
        }
    }

    fn years(&self, field: &str) -> RentalAnalysisResult<u32> {
        match self.get(field)? {
            FieldValue::Years(y) => Ok(*y),
            other => Err(mismatch(field, "whole years", other)),
        }
    }

    fn text(&self, field: &str) -> RentalAnalysisResult<Option<String>> {
        match self.get(field)? {
            FieldValue::Text(t) => Ok(t.clone()),
            other => Err(mismatch(field, "text", other)),
        }
    }
}

fn mismatch(field: &str, expected: &str, got: &FieldValue) -> RentalAnalysisError {
    RentalAnalysisError::InvalidInput {
        field: field.into(),
        reason: format!("Rule produced {got:?}, expected {expected}"),
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_amount(field: &str, raw: &str) -> RentalAnalysisResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }
    parse_number(field, trimmed)
}

fn parse_percent(field: &str, raw: &str) -> RentalAnalysisResult<Decimal> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    if number.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Ok(parse_number(field, number)? / dec!(100))
}

fn parse_whole_years(field: &str, raw: &str) -> RentalAnalysisResult<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let value = parse_number(field, trimmed)?;
    if value < Decimal::ZERO || !value.fract().is_zero() {
        return Err(RentalAnalysisError::InvalidInput {
            field: field.into(),
            reason: format!("'{trimmed}' is not a whole number of years"),
        });
    }
    value.to_u32().ok_or_else(|| RentalAnalysisError::InvalidInput {
        field: field.into(),
        reason: format!("'{trimmed}' years is out of range"),
    })
}

fn parse_number(field: &str, text: &str) -> RentalAnalysisResult<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| RentalAnalysisError::InvalidInput {
            field: field.into(),
            reason: format!("'{text}' is not a number"),
        })
}
