use clap::{Parser, Subcommand};
use serde_json::json;

use finchat::core::{CalcError, debt_payoff_months, estimate_progressive_tax, future_value};

#[derive(Parser, Debug)]
#[command(
    name = "finchat",
    about = "Personal finance chatbot backend: advice replies plus tax, debt payoff and future value calculators"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API with the bundled chat UI
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Estimate progressive tax on an annual income
    Tax {
        #[arg(long)]
        annual_income: f64,
    },
    /// Months to pay off a debt at a fixed rate and monthly payment
    DebtPayoff {
        #[arg(long)]
        principal: f64,
        #[arg(long, help = "Annual interest rate in percent, e.g. 5.5")]
        rate: f64,
        #[arg(long)]
        payment: f64,
    },
    /// Future value of a fixed monthly investment
    FutureValue {
        #[arg(long)]
        monthly: f64,
        #[arg(long)]
        years: u32,
        #[arg(long, help = "Annual return rate in percent, e.g. 7")]
        rate: f64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Serve { port } => {
            if let Err(e) = finchat::api::run_http_server(port).await {
                eprintln!("Server error: {e}");
                std::process::exit(1);
            }
        }
        Command::Tax { annual_income } => print_calc(|| {
            let estimated_tax = estimate_progressive_tax(annual_income)?;
            Ok(json!({
                "annualIncome": annual_income,
                "estimatedTax": estimated_tax,
                "netIncome": annual_income - estimated_tax,
            }))
        }),
        Command::DebtPayoff {
            principal,
            rate,
            payment,
        } => print_calc(|| {
            let months = debt_payoff_months(principal, rate, payment)?.months();
            Ok(json!({
                "months": months,
                "years": months.map(|m| m / 12),
                "paysOff": months.is_some(),
            }))
        }),
        Command::FutureValue {
            monthly,
            years,
            rate,
        } => print_calc(|| {
            Ok(json!({ "futureValue": future_value(monthly, years, rate)? }))
        }),
    }
}

fn print_calc(calc: impl FnOnce() -> Result<serde_json::Value, CalcError>) {
    match calc() {
        Ok(value) => println!("{value}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
