use rental_analysis_core::form::{self, FormInput};
use rental_analysis_core::investment::{
    analyze_investment, cash_flow, expenses, mortgage, roi, InvestmentInput,
};
use rental_analysis_core::RentalAnalysisError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn base_input() -> InvestmentInput {
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

// ===========================================================================
// Individual calculators
// ===========================================================================

#[test]
fn test_zero_rate_mortgage_known_answer() {
    let payment = mortgage::monthly_mortgage(dec!(120000), dec!(20000), Decimal::ZERO, 10).unwrap();
    assert_eq!(payment.round_dp(2), dec!(833.33));
}

#[test]
fn test_standard_mortgage_known_answer() {
    let payment = mortgage::monthly_mortgage(dec!(200000), dec!(40000), dec!(0.04), 30).unwrap();
    assert!(
        (payment - dec!(763.86)).abs() < dec!(0.01),
        "Expected ~763.86, got {}",
        payment
    );
}

#[test]
fn test_shorter_term_raises_payment() {
    let thirty = mortgage::monthly_mortgage(dec!(300000), dec!(60000), dec!(0.06), 30).unwrap();
    let fifteen = mortgage::monthly_mortgage(dec!(300000), dec!(60000), dec!(0.06), 15).unwrap();
    assert!(fifteen > thirty);
}

#[test]
fn test_expenses_known_answer() {
    let monthly =
        expenses::monthly_expenses(dec!(2400), dec!(1200), dec!(600), dec!(360), dec!(240))
            .unwrap();
    assert_eq!(monthly.round_dp(2), dec!(400.00));
}

#[test]
fn test_cash_flow_and_roi_chain() {
    let annual = cash_flow::annual_cash_flow(dec!(1800), dec!(763.86), dec!(400.00)).unwrap();
    assert_eq!(annual, dec!(7633.68));

    let invested = roi::total_investment(dec!(40000), dec!(5000)).unwrap();
    let pct = roi::return_on_investment(annual, invested).unwrap();
    assert_eq!(pct.round_dp(2), dec!(16.96));
}

// ===========================================================================
// Pipeline
// ===========================================================================

#[test]
fn test_pipeline_matches_individual_calculators() {
    let input = base_input();
    let out = analyze_investment(&input).unwrap().result;

    let m = mortgage::monthly_mortgage(
        input.purchase_price,
        input.down_payment,
        input.interest_rate,
        input.loan_term_years,
    )
    .unwrap();
    let e = expenses::monthly_expenses(
        input.property_taxes,
        input.insurance,
        input.management_fees,
        input.water_and_sewer,
        input.hoa,
    )
    .unwrap();
    let a = cash_flow::annual_cash_flow(input.average_rental, m, e).unwrap();
    let r = roi::return_on_investment(a, input.down_payment + input.closing_cost).unwrap();

    assert_eq!(out.monthly_mortgage, m);
    assert_eq!(out.total_monthly_expenses, e);
    assert_eq!(out.annual_cash_flow, a);
    assert_eq!(out.roi, r);
}

#[test]
fn test_pipeline_zero_term_is_invalid_input() {
    let mut input = base_input();
    input.loan_term_years = 0;
    match analyze_investment(&input) {
        Err(RentalAnalysisError::InvalidInput { field, .. }) => {
            assert_eq!(field, "loan_term_years")
        }
        other => panic!("Expected InvalidInput for loan_term_years, got {other:?}"),
    }
}

#[test]
fn test_pipeline_zero_investment_is_invalid_input() {
    let mut input = base_input();
    input.down_payment = Decimal::ZERO;
    input.closing_cost = Decimal::ZERO;
    match analyze_investment(&input) {
        Err(RentalAnalysisError::InvalidInput { field, .. }) => {
            assert_eq!(field, "total_investment")
        }
        other => panic!("Expected InvalidInput for total_investment, got {other:?}"),
    }
}

#[test]
fn test_closing_cost_alone_is_enough_investment() {
    let mut input = base_input();
    input.down_payment = Decimal::ZERO;
    let out = analyze_investment(&input).unwrap();
    assert_eq!(out.result.total_investment, dec!(5000));
    assert_eq!(out.result.loan_amount, dec!(200000));
}

#[test]
fn test_extreme_inputs_return_errors_instead_of_panicking() {
    let mut input = base_input();
    input.closing_cost = dec!(0.0001);
    input.down_payment = Decimal::ZERO;
    input.average_rental = dec!(1000000000000000000000000);
    input.interest_rate = Decimal::ZERO;
    input.loan_term_years = 1;
    match analyze_investment(&input) {
        Err(RentalAnalysisError::InvalidInput { field, .. }) => {
            assert_eq!(field, "total_investment")
        }
        other => panic!("Expected InvalidInput for total_investment, got {other:?}"),
    }

    let mut input = base_input();
    input.interest_rate = dec!(2.26);
    assert!(analyze_investment(&input).is_ok());

    let mut input = base_input();
    input.hoa = Decimal::MAX;
    input.insurance = Decimal::MAX;
    assert!(analyze_investment(&input).is_err());
}

#[test]
fn test_json_round_trip_input() {
    let json = r#"{
        "purchase_price": "200000",
        "closing_cost": "5000",
        "down_payment": "40000",
        "interest_rate": "0.04",
        "loan_term_years": 30,
        "average_rental": "1800",
        "property_taxes": "2400"
    }"#;
    let input: InvestmentInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.hoa, Decimal::ZERO);

    let out = analyze_investment(&input).unwrap();
    assert_eq!(out.result.total_monthly_expenses, dec!(200));

    let value = serde_json::to_value(&out).unwrap();
    assert!(value["result"]["roi"].is_string());
    assert!(value["metadata"]["version"].is_string());
}

// ===========================================================================
// Form -> engine
// ===========================================================================

#[test]
fn test_form_to_analysis() {
    let form = FormInput {
        purchase_price: "200000".into(),
        closing_cost: "5000".into(),
        interest_rate: "4%".into(),
        down_payment: "40000".into(),
        loan_term: "30".into(),
        average_rental: "1800".into(),
        property_taxes: "2400".into(),
        insurance: "1200".into(),
        management_fees: "600".into(),
        water_and_sewer: "360".into(),
        hoa: "240".into(),
        ..FormInput::default()
    };
    let input = form::parse_form(&form).unwrap();
    assert_eq!(input, base_input());

    let shown = analyze_investment(&input).unwrap().result.rounded(2);
    assert_eq!(shown.monthly_mortgage, dec!(763.86));
    assert_eq!(shown.roi, dec!(16.96));
}

#[test]
fn test_blank_form_fails_in_engine_not_parser() {
    let input = form::parse_form(&FormInput::default()).unwrap();
    assert_eq!(input.loan_term_years, 0);
    let err = analyze_investment(&input).unwrap_err();
    assert_eq!(err.field(), Some("loan_term_years"));
}
