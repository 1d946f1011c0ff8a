use thiserror::Error;

use super::DebtPayoff;

/// One slice of the progressive tax schedule. Each bracket taxes the portion
/// of income above its threshold and below the next bracket's threshold.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TaxBracket {
    pub threshold: f64,
    pub rate: f64,
}

/// Fixed marginal schedule, ordered by threshold. Income at or below the
/// first threshold is untaxed.
pub const TAX_BRACKETS: [TaxBracket; 3] = [
    TaxBracket {
        threshold: 250_000.0,
        rate: 0.05,
    },
    TaxBracket {
        threshold: 500_000.0,
        rate: 0.10,
    },
    TaxBracket {
        threshold: 1_000_000.0,
        rate: 0.15,
    },
];

/// Safety bound on the payoff simulation for inputs that shrink the balance
/// slower than the guard can detect.
const PAYOFF_MONTH_CAP: u32 = 1000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("{0} must be a finite number >= 0")]
    OutOfDomain(&'static str),
    #[error("years must be >= 1")]
    YearsTooSmall,
}

fn require_non_negative(name: &'static str, value: f64) -> Result<(), CalcError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::OutOfDomain(name));
    }
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimated tax owed on an annual income under the fixed progressive
/// schedule, rounded to 2 decimal places.
pub fn estimate_progressive_tax(annual_income: f64) -> Result<f64, CalcError> {
    require_non_negative("annual income", annual_income)?;

    let mut tax = 0.0;
    for (idx, bracket) in TAX_BRACKETS.iter().enumerate() {
        let above = (annual_income - bracket.threshold).max(0.0);
        let taxed = match TAX_BRACKETS.get(idx + 1) {
            Some(next) => above.min(next.threshold - bracket.threshold),
            None => above,
        };
        tax += taxed * bracket.rate;
    }
    Ok(round2(tax))
}

/// Whole months until a debt reaches zero balance under a fixed monthly
/// payment, or [`DebtPayoff::Never`] when the schedule cannot clear it.
///
/// The balance compounds monthly at `annual_rate_percent / 12 / 100` before
/// each payment is applied. A payment that does not exceed the interest
/// accrued on the remaining balance can never reduce principal, so that case
/// resolves to `Never` immediately instead of iterating to the cap.
pub fn debt_payoff_months(
    principal: f64,
    annual_rate_percent: f64,
    monthly_payment: f64,
) -> Result<DebtPayoff, CalcError> {
    require_non_negative("principal", principal)?;
    require_non_negative("annual rate", annual_rate_percent)?;
    require_non_negative("monthly payment", monthly_payment)?;

    if principal <= 0.0 {
        return Ok(DebtPayoff::Months(0));
    }
    if monthly_payment <= 0.0 {
        return Ok(DebtPayoff::Never);
    }

    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let mut balance = principal;
    let mut months = 0;
    while balance > 0.0 && months < PAYOFF_MONTH_CAP {
        balance = balance * (1.0 + monthly_rate) - monthly_payment;
        months += 1;
        // Negative amortization: interest on what remains eats the whole
        // payment, so the balance can only grow from here.
        if balance > 0.0 && monthly_payment <= balance * monthly_rate {
            return Ok(DebtPayoff::Never);
        }
    }

    if balance > 0.0 {
        Ok(DebtPayoff::Never)
    } else {
        Ok(DebtPayoff::Months(months))
    }
}

/// Future value of an ordinary annuity: a fixed monthly investment
/// compounding at `annual_rate_percent / 12 / 100` for `years * 12` periods.
/// Rounded to 2 decimal places.
pub fn future_value(
    monthly_investment: f64,
    years: u32,
    annual_rate_percent: f64,
) -> Result<f64, CalcError> {
    require_non_negative("monthly investment", monthly_investment)?;
    require_non_negative("annual rate", annual_rate_percent)?;
    if years < 1 {
        return Err(CalcError::YearsTooSmall);
    }

    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let periods = f64::from(years) * 12.0;
    // The closed form divides by the rate; a zero-rate annuity is a plain sum.
    let fv = if monthly_rate == 0.0 {
        monthly_investment * periods
    } else {
        monthly_investment * ((1.0 + monthly_rate).powf(periods) - 1.0) / monthly_rate
    };
    Ok(round2(fv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn tax_is_zero_at_and_below_first_threshold() {
        assert_approx(estimate_progressive_tax(0.0).expect("valid"), 0.0);
        assert_approx(estimate_progressive_tax(100_000.0).expect("valid"), 0.0);
        assert_approx(estimate_progressive_tax(250_000.0).expect("valid"), 0.0);
    }

    #[test]
    fn tax_applies_first_bracket_rate_above_its_threshold() {
        assert_approx(estimate_progressive_tax(300_000.0).expect("valid"), 2_500.0);
    }

    #[test]
    fn tax_stacks_marginal_rates_across_brackets() {
        // 250k at 5% fully used, plus 100k at 10%.
        assert_approx(
            estimate_progressive_tax(600_000.0).expect("valid"),
            22_500.0,
        );
        // 250k at 5%, 500k at 10%, 200k at 15%.
        assert_approx(
            estimate_progressive_tax(1_200_000.0).expect("valid"),
            92_500.0,
        );
    }

    #[test]
    fn tax_is_continuous_at_bracket_boundaries() {
        for bracket in TAX_BRACKETS {
            let below = estimate_progressive_tax(bracket.threshold - 0.01).expect("valid");
            let at = estimate_progressive_tax(bracket.threshold).expect("valid");
            let above = estimate_progressive_tax(bracket.threshold + 0.01).expect("valid");
            assert!(at - below <= 0.02, "jump below threshold {}", bracket.threshold);
            assert!(above - at <= 0.02, "jump above threshold {}", bracket.threshold);
        }
    }

    #[test]
    fn tax_rejects_negative_and_non_finite_income() {
        assert_eq!(
            estimate_progressive_tax(-1.0),
            Err(CalcError::OutOfDomain("annual income"))
        );
        assert!(estimate_progressive_tax(f64::NAN).is_err());
        assert!(estimate_progressive_tax(f64::INFINITY).is_err());
    }

    #[test]
    fn debt_payoff_zero_rate_reduces_to_simple_division() {
        assert_eq!(
            debt_payoff_months(1_000.0, 0.0, 100.0).expect("valid"),
            DebtPayoff::Months(10)
        );
    }

    #[test]
    fn debt_payoff_matches_amortization_example() {
        assert_eq!(
            debt_payoff_months(10_000.0, 5.5, 300.0).expect("valid"),
            DebtPayoff::Months(37)
        );
    }

    #[test]
    fn debt_payoff_zero_principal_is_immediate() {
        assert_eq!(
            debt_payoff_months(0.0, 12.0, 0.0).expect("valid"),
            DebtPayoff::Months(0)
        );
        assert_eq!(
            debt_payoff_months(0.0, 0.0, 500.0).expect("valid"),
            DebtPayoff::Months(0)
        );
    }

    #[test]
    fn debt_payoff_zero_payment_never_pays_off() {
        assert_eq!(
            debt_payoff_months(1_000.0, 0.0, 0.0).expect("valid"),
            DebtPayoff::Never
        );
        assert_eq!(
            debt_payoff_months(1_000.0, 8.0, 0.0).expect("valid"),
            DebtPayoff::Never
        );
    }

    #[test]
    fn debt_payoff_reports_never_when_cap_is_reached() {
        // Zero rate means the insufficient-payment guard can never fire; the
        // month cap is what stops a 2000-month schedule.
        assert_eq!(
            debt_payoff_months(2_000.0, 0.0, 1.0).expect("valid"),
            DebtPayoff::Never
        );
    }

    #[test]
    fn debt_payoff_detects_negative_amortization() {
        // Monthly interest on 100k at 12% is 1000; a 50 payment loses ground.
        assert_eq!(
            debt_payoff_months(100_000.0, 12.0, 50.0).expect("valid"),
            DebtPayoff::Never
        );
    }

    #[test]
    fn debt_payoff_rejects_negative_inputs() {
        assert_eq!(
            debt_payoff_months(-1.0, 5.0, 100.0),
            Err(CalcError::OutOfDomain("principal"))
        );
        assert_eq!(
            debt_payoff_months(1_000.0, -5.0, 100.0),
            Err(CalcError::OutOfDomain("annual rate"))
        );
        assert_eq!(
            debt_payoff_months(1_000.0, 5.0, -100.0),
            Err(CalcError::OutOfDomain("monthly payment"))
        );
    }

    #[test]
    fn future_value_zero_rate_is_a_plain_sum() {
        assert_approx(future_value(100.0, 10, 0.0).expect("valid"), 12_000.0);
    }

    #[test]
    fn future_value_compounds_monthly() {
        // 100 * ((1.01^12 - 1) / 0.01) at 12% annual.
        assert_approx(future_value(100.0, 1, 12.0).expect("valid"), 1_268.25);
    }

    #[test]
    fn future_value_requires_at_least_one_year() {
        assert_eq!(future_value(100.0, 0, 5.0), Err(CalcError::YearsTooSmall));
    }

    #[test]
    fn future_value_rejects_negative_inputs() {
        assert_eq!(
            future_value(-100.0, 10, 5.0),
            Err(CalcError::OutOfDomain("monthly investment"))
        );
        assert_eq!(
            future_value(100.0, 10, -5.0),
            Err(CalcError::OutOfDomain("annual rate"))
        );
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_tax_is_non_negative_and_monotonic(
            income_a in 0u32..3_000_000,
            income_b in 0u32..3_000_000
        ) {
            let lo = income_a.min(income_b) as f64;
            let hi = income_a.max(income_b) as f64;
            let tax_lo = estimate_progressive_tax(lo).expect("valid");
            let tax_hi = estimate_progressive_tax(hi).expect("valid");
            prop_assert!(tax_lo >= 0.0);
            prop_assert!(tax_lo <= tax_hi);
        }

        #[test]
        fn prop_tax_is_deterministic(income in 0u32..3_000_000) {
            let income = income as f64;
            prop_assert_eq!(
                estimate_progressive_tax(income).expect("valid"),
                estimate_progressive_tax(income).expect("valid")
            );
        }

        #[test]
        fn prop_payoff_months_shrink_with_larger_payments(
            principal in 100u32..200_000,
            rate_bp in 0u32..2_000,
            payment in 50u32..5_000
        ) {
            let principal = principal as f64;
            let rate = rate_bp as f64 / 100.0;
            let base = debt_payoff_months(principal, rate, payment as f64).expect("valid");
            let faster = debt_payoff_months(principal, rate, (payment * 2) as f64).expect("valid");
            if let DebtPayoff::Months(base_months) = base {
                let faster_months = faster.months();
                prop_assert!(faster_months.is_some(), "doubling the payment lost convergence");
                prop_assert!(faster_months.unwrap_or(u32::MAX) <= base_months);
            }
        }

        #[test]
        fn prop_future_value_increases_in_each_input(
            monthly in 1u32..5_000,
            years in 1u32..40,
            rate_bp in 1u32..1_500
        ) {
            let monthly = monthly as f64;
            let rate = rate_bp as f64 / 100.0;
            let base = future_value(monthly, years, rate).expect("valid");
            prop_assert!(future_value(monthly + 1.0, years, rate).expect("valid") > base);
            prop_assert!(future_value(monthly, years + 1, rate).expect("valid") > base);
            prop_assert!(future_value(monthly, years, rate + 0.5).expect("valid") > base);
        }
    }
}
