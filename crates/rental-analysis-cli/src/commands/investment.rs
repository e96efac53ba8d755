use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use rental_analysis_core::form::{self, FormInput};
use rental_analysis_core::investment::{
    self, cash_flow, expenses, mortgage, roi, InvestmentInput,
};
use rental_analysis_core::round_display;

use crate::input;

/// Presentation options shared by every calculation command
#[derive(Args)]
pub struct DisplayArgs {
    /// Decimal places shown in the result
    #[arg(long, default_value = "2")]
    pub decimals: u32,
}

/// Arguments for the full investment analysis
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Treat the JSON document as raw form text (percent interest rate, "" = 0)
    #[arg(long)]
    pub form: bool,

    /// Purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Closing cost paid at acquisition
    #[arg(long)]
    pub closing_cost: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Annual interest rate as a fraction (e.g. 0.05 for 5%)
    #[arg(long)]
    pub interest_rate: Option<Decimal>,

    /// Loan term in whole years
    #[arg(long)]
    pub loan_term_years: Option<u32>,

    /// Expected monthly rent
    #[arg(long)]
    pub average_rental: Option<Decimal>,

    #[command(flatten)]
    pub components: ExpenseComponents,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Arguments for the monthly mortgage payment
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct MortgageArgs {
    /// Purchase price
    #[arg(long)]
    pub purchase_price: Decimal,

    /// Down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual interest rate as a fraction (e.g. 0.05 for 5%)
    #[arg(long)]
    pub interest_rate: Decimal,

    /// Loan term in whole years
    #[arg(long)]
    pub loan_term_years: u32,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Annual operating cost components (all default to 0)
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ExpenseComponents {
    /// Annual property taxes
    #[arg(long, default_value = "0")]
    pub property_taxes: Decimal,

    /// Annual insurance
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Annual management fees (currency amount)
    #[arg(long, default_value = "0")]
    pub management_fees: Decimal,

    /// Annual water and sewer
    #[arg(long, default_value = "0")]
    pub water_and_sewer: Decimal,

    /// Annual HOA dues
    #[arg(long, default_value = "0")]
    pub hoa: Decimal,
}

/// Arguments for the monthly expenses calculation
#[derive(Args)]
pub struct ExpensesArgs {
    #[command(flatten)]
    pub components: ExpenseComponents,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Arguments for the cash flow calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CashFlowArgs {
    /// Expected monthly rent
    #[arg(long)]
    pub average_rental: Decimal,

    /// Monthly mortgage payment
    #[arg(long)]
    pub monthly_mortgage: Decimal,

    /// Average monthly operating expenses
    #[arg(long)]
    pub total_monthly_expenses: Decimal,

    #[command(flatten)]
    pub display: DisplayArgs,
}

/// Arguments for the ROI calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RoiArgs {
    /// Annual cash flow
    #[arg(long)]
    pub annual_cash_flow: Decimal,

    /// Down payment
    #[arg(long)]
    pub down_payment: Decimal,

    /// Closing cost
    #[arg(long, default_value = "0")]
    pub closing_cost: Decimal,

    #[command(flatten)]
    pub display: DisplayArgs,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = if let Some(ref path) = args.input {
        Some(input::file::read_json_value(path)?)
    } else {
        input::stdin::read_stdin()?
    };

    let inv_input: InvestmentInput = match document {
        Some(data) if args.form => {
            let raw: FormInput = serde_json::from_value(data)?;
            form::parse_form(&raw)?
        }
        Some(data) => serde_json::from_value(data)?,
        None if args.form => {
            return Err("--form needs a JSON document via --input <file.json> or stdin".into())
        }
        None => InvestmentInput {
            property: None,
            purchase_price: args
                .purchase_price
                .ok_or("--purchase-price is required (or provide --input)")?,
            closing_cost: args.closing_cost.unwrap_or(Decimal::ZERO),
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            loan_term_years: args
                .loan_term_years
                .ok_or("--loan-term-years is required (or provide --input)")?,
            average_rental: args
                .average_rental
                .ok_or("--average-rental is required (or provide --input)")?,
            property_taxes: args.components.property_taxes,
            insurance: args.components.insurance,
            management_fees: args.components.management_fees,
            water_and_sewer: args.components.water_and_sewer,
            hoa: args.components.hoa,
        },
    };

    let mut result = investment::analyze_investment(&inv_input)?;
    result.result = result.result.rounded(args.display.decimals);
    Ok(serde_json::to_value(result)?)
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dp = args.display.decimals;
    let payment = mortgage::monthly_mortgage(
        args.purchase_price,
        args.down_payment,
        args.interest_rate,
        args.loan_term_years,
    )?;
    let loan = mortgage::loan_amount(args.purchase_price, args.down_payment)?;
    Ok(json!({
        "result": {
            "monthly_mortgage": round_display(payment, dp),
            "loan_amount": round_display(loan, dp),
        }
    }))
}

pub fn run_expenses(args: ExpensesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let c = &args.components;
    let annual = expenses::annual_expenses(
        c.property_taxes,
        c.insurance,
        c.management_fees,
        c.water_and_sewer,
        c.hoa,
    )?;
    let monthly = expenses::monthly_expenses(
        c.property_taxes,
        c.insurance,
        c.management_fees,
        c.water_and_sewer,
        c.hoa,
    )?;
    let dp = args.display.decimals;
    Ok(json!({
        "result": {
            "total_monthly_expenses": round_display(monthly, dp),
            "annual_expenses": round_display(annual, dp),
        }
    }))
}

pub fn run_cash_flow(args: CashFlowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let monthly = cash_flow::monthly_cash_flow(
        args.average_rental,
        args.monthly_mortgage,
        args.total_monthly_expenses,
    )?;
    let annual = cash_flow::annual_cash_flow(
        args.average_rental,
        args.monthly_mortgage,
        args.total_monthly_expenses,
    )?;
    let dp = args.display.decimals;
    Ok(json!({
        "result": {
            "annual_cash_flow": round_display(annual, dp),
            "monthly_cash_flow": round_display(monthly, dp),
        }
    }))
}

pub fn run_roi(args: RoiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let invested = roi::total_investment(args.down_payment, args.closing_cost)?;
    let pct = roi::return_on_investment(args.annual_cash_flow, invested)?;
    let dp = args.display.decimals;
    Ok(json!({
        "result": {
            "roi": round_display(pct, dp),
            "total_investment": round_display(invested, dp),
        }
    }))
}
