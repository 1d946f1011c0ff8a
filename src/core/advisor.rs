use serde::Serialize;

use super::{BudgetState, UserType};

const STUDENT_GUIDANCE: [&str; 4] = [
    "As a student, consider starting with a high-yield savings account for your emergency fund.",
    "Many students qualify for education tax credits. Let me help you explore options.",
    "Starting investments early gives you the power of compound interest. Even small amounts matter!",
    "Budgeting apps can help track your spending between classes and social activities.",
];

const PROFESSIONAL_GUIDANCE: [&str; 4] = [
    "For professionals, maximizing pension contributions should be a priority for retirement planning.",
    "Consider tax-loss harvesting strategies to optimize your investment portfolio this year.",
    "Real estate investments can provide both rental income and long-term appreciation benefits.",
    "Diversifying your investment portfolio across different asset classes reduces overall risk.",
];

/// Keyword-matched advice reply. Substring matching on the lowercased
/// message, not language understanding; "budget" answers from the supplied
/// budget state instead of canned text.
pub fn advice_reply(message: &str, user_type: UserType, budget: &BudgetState) -> String {
    let query = message.to_lowercase();
    if query.contains("budget") {
        return budget_summary(budget);
    }

    let advice = if query.contains("tax") {
        "Set aside around 20% of your income for taxes."
    } else if query.contains("save") {
        "Aim to save at least 15-20% of your monthly income."
    } else if query.contains("invest") {
        "Consider diversifying investments across mutual funds, stocks, and bonds."
    } else {
        "Track your expenses carefully and adjust your budget every month."
    };

    format!(
        "Here's some financial advice: {advice} {}",
        tone_for(user_type)
    )
}

fn tone_for(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Student => "I'll keep it simple and easy to understand.",
        UserType::Professional => "I'll provide a detailed and professional explanation.",
    }
}

pub fn budget_summary(budget: &BudgetState) -> String {
    format!(
        "Budget Summary:\nIncome: {}\nExpenses: {}\nSavings: {}",
        format_money(budget.monthly_income),
        format_money(budget.total_expenses()),
        format_money(budget.savings()),
    )
}

/// `$1,234.56` formatting with thousands grouping. Single implicit currency.
pub fn format_money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    // Amounts that round to zero cents drop the sign.
    let negative = amount < 0.0 && cents > 0;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

/// One canned guidance line for the profile, chosen by the seed. Same seed,
/// same line.
pub fn pick_guidance(user_type: UserType, seed: u64) -> &'static str {
    let pool: &[&'static str] = match user_type {
        UserType::Student => &STUDENT_GUIDANCE,
        UserType::Professional => &PROFESSIONAL_GUIDANCE,
    };
    pool[Picker::new(seed).pick(pool.len())]
}

// xorshift64*, enough spread for picking a pool index.
struct Picker {
    state: u64,
}

impl Picker {
    fn new(seed: u64) -> Self {
        let state = if seed == 0 { 0xA5A5_A5A5_A5A5_A5A5 } else { seed };
        Self { state }
    }

    fn pick(&mut self, len: usize) -> usize {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        (x.wrapping_mul(0x2545F4914F6CDD1D) % len as u64) as usize
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetLine {
    pub category: &'static str,
    pub spent: f64,
    pub budget: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsight {
    pub category: &'static str,
    pub change_percent: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentIdea {
    pub name: &'static str,
    pub risk_level: &'static str,
    pub description: &'static str,
    pub expected_return_percent: f64,
}

// Placeholder dashboard rows; a transaction feed would replace these.
pub fn budget_overview() -> Vec<BudgetLine> {
    vec![
        BudgetLine {
            category: "Housing",
            spent: 1_200.0,
            budget: 1_500.0,
        },
        BudgetLine {
            category: "Food & Dining",
            spent: 600.0,
            budget: 800.0,
        },
        BudgetLine {
            category: "Entertainment",
            spent: 300.0,
            budget: 400.0,
        },
    ]
}

pub fn spending_insights() -> Vec<SpendingInsight> {
    vec![
        SpendingInsight {
            category: "Dining out",
            change_percent: 25.0,
            trend: Trend::Up,
        },
        SpendingInsight {
            category: "Shopping",
            change_percent: 15.0,
            trend: Trend::Down,
        },
    ]
}

pub fn investment_ideas() -> Vec<InvestmentIdea> {
    vec![
        InvestmentIdea {
            name: "Index Funds",
            risk_level: "Low",
            description: "Low risk, long-term growth",
            expected_return_percent: 8.2,
        },
        InvestmentIdea {
            name: "Tech Stocks",
            risk_level: "Medium",
            description: "Medium risk, high potential",
            expected_return_percent: 12.5,
        },
        InvestmentIdea {
            name: "Real Estate",
            risk_level: "Stable",
            description: "Stable returns, tax benefits",
            expected_return_percent: 6.8,
        },
    ]
}
