mod advisor;
mod calc;
mod types;

pub use advisor::{
    BudgetLine, InvestmentIdea, SpendingInsight, Trend, advice_reply, budget_overview,
    budget_summary, format_money, investment_ideas, pick_guidance, spending_insights,
};
pub use calc::{
    CalcError, TAX_BRACKETS, TaxBracket, debt_payoff_months, estimate_progressive_tax,
    future_value,
};
pub use types::{BudgetState, DebtPayoff, ExpenseCategory, UserType};
