use serde::{Deserialize, Serialize};

/// Outcome of a debt payoff simulation.
///
/// `Never` means the payment schedule cannot clear the balance; callers must
/// branch on it before doing month arithmetic such as a years display.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DebtPayoff {
    Months(u32),
    Never,
}

impl DebtPayoff {
    pub fn months(self) -> Option<u32> {
        match self {
            DebtPayoff::Months(months) => Some(months),
            DebtPayoff::Never => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[serde(alias = "Student")]
    Student,
    #[default]
    #[serde(alias = "Professional")]
    Professional,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub name: String,
    pub amount: f64,
}

/// Budget figures supplied with each request.
///
/// Held by the caller, not the server: every handler receives the state it
/// needs and returns derived figures, so the API stays stateless.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BudgetState {
    pub monthly_income: f64,
    pub categories: Vec<ExpenseCategory>,
}

impl BudgetState {
    pub fn total_expenses(&self) -> f64 {
        self.categories.iter().map(|category| category.amount).sum()
    }

    pub fn savings(&self) -> f64 {
        self.monthly_income - self.total_expenses()
    }
}
