use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;

use crate::core::{
    BudgetLine, BudgetState, InvestmentIdea, SpendingInsight, UserType, advice_reply,
    budget_overview, debt_payoff_months, estimate_progressive_tax, future_value, investment_ideas,
    pick_guidance, spending_insights,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ChatPayload {
    message: String,
    user_type: Option<UserType>,
    budget: Option<BudgetState>,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatResponse {
    reply: String,
    guidance: &'static str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TaxPayload {
    annual_income: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaxResponse {
    annual_income: f64,
    estimated_tax: f64,
    net_income: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DebtPayload {
    principal: Option<f64>,
    #[serde(alias = "annualRatePercent")]
    rate: Option<f64>,
    #[serde(alias = "monthlyPayment")]
    payment: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DebtResponse {
    months: Option<u32>,
    years: Option<u32>,
    pays_off: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FutureValuePayload {
    monthly_investment: Option<f64>,
    years: Option<u32>,
    #[serde(alias = "annualRatePercent")]
    rate: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FutureValueResponse {
    future_value: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetSlice {
    name: String,
    amount: f64,
    share_percent: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BudgetResponse {
    income: f64,
    expenses: f64,
    savings: f64,
    breakdown: Vec<BudgetSlice>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct InsightsQuery {
    user_type: Option<UserType>,
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsightsResponse {
    guidance: &'static str,
    budget: Vec<BudgetLine>,
    spending: Vec<SpendingInsight>,
    investments: Vec<InvestmentIdea>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    println!("finchat HTTP API listening on http://{addr}");
    println!("Local access: http://127.0.0.1:{port}/");

    axum::serve(listener, router()).await
}

fn router() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/tax", get(tax_get_handler).post(tax_post_handler))
        .route(
            "/api/debt-payoff",
            get(debt_get_handler).post(debt_post_handler),
        )
        .route(
            "/api/future-value",
            get(future_value_get_handler).post(future_value_post_handler),
        )
        .route("/api/budget", post(budget_handler))
        .route("/api/insights", get(insights_handler))
        .fallback(not_found_handler)
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn chat_handler(Json(payload): Json<ChatPayload>) -> Response {
    respond(chat_response(payload))
}

async fn tax_get_handler(Query(payload): Query<TaxPayload>) -> Response {
    respond(tax_response(payload))
}

async fn tax_post_handler(Json(payload): Json<TaxPayload>) -> Response {
    respond(tax_response(payload))
}

async fn debt_get_handler(Query(payload): Query<DebtPayload>) -> Response {
    respond(debt_response(payload))
}

async fn debt_post_handler(Json(payload): Json<DebtPayload>) -> Response {
    respond(debt_response(payload))
}

async fn future_value_get_handler(Query(payload): Query<FutureValuePayload>) -> Response {
    respond(future_value_response(payload))
}

async fn future_value_post_handler(Json(payload): Json<FutureValuePayload>) -> Response {
    respond(future_value_response(payload))
}

async fn budget_handler(Json(state): Json<BudgetState>) -> Response {
    respond(budget_response(state))
}

async fn insights_handler(Query(query): Query<InsightsQuery>) -> Response {
    let user_type = query.user_type.unwrap_or_default();
    let seed = query.seed.unwrap_or_else(clock_seed);
    json_response(
        StatusCode::OK,
        InsightsResponse {
            guidance: pick_guidance(user_type, seed),
            budget: budget_overview(),
            spending: spending_insights(),
            investments: investment_ideas(),
        },
    )
}

fn respond<T: Serialize>(result: Result<T, String>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(msg) => error_response(StatusCode::BAD_REQUEST, &msg),
    }
}

fn chat_response(payload: ChatPayload) -> Result<ChatResponse, String> {
    if payload.message.trim().is_empty() {
        return Err("message must not be empty".to_string());
    }
    let user_type = payload.user_type.unwrap_or_default();
    let budget = payload.budget.unwrap_or_default();
    let seed = payload.seed.unwrap_or_else(clock_seed);

    Ok(ChatResponse {
        reply: advice_reply(&payload.message, user_type, &budget),
        guidance: pick_guidance(user_type, seed),
    })
}

fn tax_response(payload: TaxPayload) -> Result<TaxResponse, String> {
    let annual_income = required(payload.annual_income, "annualIncome")?;
    let estimated_tax = estimate_progressive_tax(annual_income).map_err(|e| e.to_string())?;
    Ok(TaxResponse {
        annual_income,
        estimated_tax,
        net_income: annual_income - estimated_tax,
    })
}

fn debt_response(payload: DebtPayload) -> Result<DebtResponse, String> {
    let principal = required(payload.principal, "principal")?;
    let rate = required(payload.rate, "rate")?;
    let payment = required(payload.payment, "payment")?;

    let payoff = debt_payoff_months(principal, rate, payment).map_err(|e| e.to_string())?;
    let months = payoff.months();
    Ok(DebtResponse {
        months,
        years: months.map(|m| m / 12),
        pays_off: months.is_some(),
    })
}

fn future_value_response(payload: FutureValuePayload) -> Result<FutureValueResponse, String> {
    let monthly_investment = required(payload.monthly_investment, "monthlyInvestment")?;
    let years = required(payload.years, "years")?;
    let rate = required(payload.rate, "rate")?;

    let fv = future_value(monthly_investment, years, rate).map_err(|e| e.to_string())?;
    Ok(FutureValueResponse { future_value: fv })
}

fn budget_response(state: BudgetState) -> Result<BudgetResponse, String> {
    if !state.monthly_income.is_finite() || state.monthly_income < 0.0 {
        return Err("monthlyIncome must be a finite number >= 0".to_string());
    }
    for category in &state.categories {
        if !category.amount.is_finite() || category.amount < 0.0 {
            return Err(format!(
                "amount for category '{}' must be a finite number >= 0",
                category.name
            ));
        }
    }

    let expenses = state.total_expenses();
    let breakdown = state
        .categories
        .iter()
        .map(|category| BudgetSlice {
            name: category.name.clone(),
            amount: category.amount,
            share_percent: if expenses > 0.0 {
                ((category.amount / expenses) * 1000.0).round() / 10.0
            } else {
                0.0
            },
        })
        .collect();

    Ok(BudgetResponse {
        income: state.monthly_income,
        expenses,
        savings: state.savings(),
        breakdown,
    })
}

fn required<T>(value: Option<T>, name: &'static str) -> Result<T, String> {
    value.ok_or_else(|| format!("{name} is required"))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15)
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
