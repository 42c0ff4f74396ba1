//! Financial health scoring
//!
//! Four factors worth up to 25 points each: savings rate, expense ratio,
//! emergency fund coverage and debt ratio. A ratio with a zero denominator is
//! zero when its numerator is zero and unbounded otherwise, so empty months
//! score deterministically.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Money;

/// Monthly aggregates the score is computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInput {
    pub income: Money,
    pub expenses: Money,
    pub savings: Money,
    pub debt: Money,
    pub emergency_fund: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthLevel {
    /// Band a 0-100 score at 40, 60 and 80
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 80 => Self::Excellent,
            s if s >= 60 => Self::Good,
            s if s >= 40 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poor => write!(f, "poor"),
            Self::Fair => write!(f, "fair"),
            Self::Good => write!(f, "good"),
            Self::Excellent => write!(f, "excellent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: u32,
    pub level: HealthLevel,
    pub recommendations: Vec<String>,
}

const FULL: u32 = 25;
const PARTIAL: u32 = 15;
const LOW: u32 = 5;

/// Score a month of finances
pub fn financial_health_score(input: &HealthInput) -> HealthScore {
    let mut score = 0;
    let mut recommendations = Vec::new();

    let savings_rate = ratio(input.savings, input.income) * 100.0;
    score += if savings_rate >= 20.0 {
        FULL
    } else if savings_rate >= 10.0 {
        recommendations.push("Intenta ahorrar al menos el 20% de tus ingresos".to_string());
        PARTIAL
    } else {
        recommendations.push("Tu tasa de ahorro es muy baja, considera reducir gastos".to_string());
        LOW
    };

    let expense_ratio = ratio(input.expenses, input.income) * 100.0;
    score += if expense_ratio <= 70.0 {
        FULL
    } else if expense_ratio <= 80.0 {
        recommendations
            .push("Tus gastos están en el límite, controla mejor tu presupuesto".to_string());
        PARTIAL
    } else {
        recommendations
            .push("Tus gastos son muy altos, necesitas reducirlos urgentemente".to_string());
        LOW
    };

    let emergency_months = ratio(input.emergency_fund, input.expenses);
    score += if emergency_months >= 6.0 {
        FULL
    } else if emergency_months >= 3.0 {
        recommendations
            .push("Intenta tener 6 meses de gastos en tu fondo de emergencia".to_string());
        PARTIAL
    } else {
        recommendations
            .push("Necesitas un fondo de emergencia de al menos 3-6 meses de gastos".to_string());
        LOW
    };

    let debt_ratio = ratio(input.debt, input.income) * 100.0;
    score += if debt_ratio <= 20.0 {
        FULL
    } else if debt_ratio <= 40.0 {
        recommendations
            .push("Considera reducir tus deudas para mejorar tu salud financiera".to_string());
        PARTIAL
    } else {
        recommendations
            .push("Tus deudas son muy altas, enfócate en pagarlas lo antes posible".to_string());
        LOW
    };

    HealthScore {
        score,
        level: HealthLevel::from_score(score),
        recommendations,
    }
}

fn ratio(numerator: Money, denominator: Money) -> f64 {
    if denominator.is_zero() {
        if numerator.is_zero() {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        numerator.as_f64() / denominator.as_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(income: i64, expenses: i64, savings: i64, debt: i64, fund: i64) -> HealthInput {
        HealthInput {
            income: Money::from_units(income),
            expenses: Money::from_units(expenses),
            savings: Money::from_units(savings),
            debt: Money::from_units(debt),
            emergency_fund: Money::from_units(fund),
        }
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(HealthLevel::from_score(85), HealthLevel::Excellent);
        assert_eq!(HealthLevel::from_score(80), HealthLevel::Excellent);
        assert_eq!(HealthLevel::from_score(79), HealthLevel::Good);
        assert_eq!(HealthLevel::from_score(60), HealthLevel::Good);
        assert_eq!(HealthLevel::from_score(40), HealthLevel::Fair);
        assert_eq!(HealthLevel::from_score(39), HealthLevel::Poor);
        assert_eq!(HealthLevel::from_score(0), HealthLevel::Poor);
    }

    #[test]
    fn test_perfect_score() {
        let result = financial_health_score(&input(10000, 6000, 3000, 1000, 40000));
        assert_eq!(result.score, 100);
        assert_eq!(result.level, HealthLevel::Excellent);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_partial_factors() {
        // savings 15%, expenses 75%, 4 months of fund, debt 30%
        let result = financial_health_score(&input(10000, 7500, 1500, 3000, 30000));
        assert_eq!(result.score, 60);
        assert_eq!(result.level, HealthLevel::Good);
        assert_eq!(result.recommendations.len(), 4);
        assert_eq!(
            result.recommendations[0],
            "Intenta ahorrar al menos el 20% de tus ingresos"
        );
    }

    #[test]
    fn test_poor_finances() {
        let result = financial_health_score(&input(10000, 9500, 500, 6000, 1000));
        assert_eq!(result.score, 20);
        assert_eq!(result.level, HealthLevel::Poor);
    }

    #[test]
    fn test_zero_income_and_expenses() {
        let result = financial_health_score(&HealthInput::default());
        // savings 0 -> low, expenses 0 -> full, fund 0 -> low, debt 0 -> full
        assert_eq!(result.score, 60);

        let no_income = financial_health_score(&input(0, 5000, 0, 100, 0));
        assert_eq!(no_income.score, 20);
        assert_eq!(no_income.level, HealthLevel::Poor);
    }

    #[test]
    fn test_score_always_in_range() {
        let cases = [
            input(0, 0, 0, 0, 0),
            input(1, 1_000_000, 0, 1_000_000, 0),
            input(1_000_000, 0, 1_000_000, 0, 1),
            input(5000, 5000, 5000, 5000, 5000),
        ];
        for case in cases {
            let result = financial_health_score(&case);
            assert!(result.score <= 100);
            assert_eq!(result.level, HealthLevel::from_score(result.score));
        }
    }
}
