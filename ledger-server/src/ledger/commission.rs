//! Commission Calculator
//!
//! Pure function from (service price, payment model) to the worker's share.

use serde::Serialize;
use shared::models::{
    DEFAULT_COMMISSION_PERCENTAGE, DEFAULT_HYBRID_COMMISSION_PERCENTAGE, PaymentModel,
};

use super::money;

/// Commission applied to one service
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Commission {
    /// Percentage applied (40 = 40%)
    pub percentage: f64,
    /// Worker share, minor units
    pub amount: i64,
}

/// Percentage a payment model earns per service.
///
/// Configured values outside `0..=100` are clamped; a non-finite value falls
/// back to the model's default.
pub fn resolve_percentage(model: &PaymentModel) -> f64 {
    let (configured, default) = match model {
        PaymentModel::PercentageCommission {
            commission_percentage,
        } => (*commission_percentage, DEFAULT_COMMISSION_PERCENTAGE),
        PaymentModel::Hybrid {
            commission_percentage,
            ..
        } => (*commission_percentage, DEFAULT_HYBRID_COMMISSION_PERCENTAGE),
        // salaried workers are paid outside the per-service ledger
        PaymentModel::FixedSalary { .. } => return 0.0,
        PaymentModel::Unset => (None, DEFAULT_COMMISSION_PERCENTAGE),
    };
    match configured {
        Some(p) if p.is_finite() => p.clamp(0.0, 100.0),
        _ => default,
    }
}

/// Compute the worker's earning for a service
pub fn compute_earning(service_price: i64, model: &PaymentModel) -> Commission {
    let percentage = resolve_percentage(model);
    Commission {
        percentage,
        amount: money::percentage_of(service_price, percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_percentage() {
        let model = PaymentModel::PercentageCommission {
            commission_percentage: Some(40.0),
        };
        assert_eq!(
            compute_earning(10_000, &model),
            Commission {
                percentage: 40.0,
                amount: 4_000
            }
        );
    }

    #[test]
    fn test_unset_defaults_to_fifty() {
        assert_eq!(
            compute_earning(10_000, &PaymentModel::Unset),
            Commission {
                percentage: 50.0,
                amount: 5_000
            }
        );
        let model = PaymentModel::PercentageCommission {
            commission_percentage: None,
        };
        assert_eq!(compute_earning(10_000, &model).percentage, 50.0);
    }

    #[test]
    fn test_hybrid_defaults_to_thirty() {
        let model = PaymentModel::Hybrid {
            commission_percentage: None,
            base_salary: Some(150_000),
        };
        assert_eq!(
            compute_earning(20_000, &model),
            Commission {
                percentage: 30.0,
                amount: 6_000
            }
        );
        let model = PaymentModel::Hybrid {
            commission_percentage: Some(20.0),
            base_salary: None,
        };
        assert_eq!(compute_earning(20_000, &model).amount, 4_000);
    }

    #[test]
    fn test_fixed_salary_earns_nothing() {
        let model = PaymentModel::FixedSalary {
            monthly_salary: Some(200_000),
        };
        assert_eq!(
            compute_earning(20_000, &model),
            Commission {
                percentage: 0.0,
                amount: 0
            }
        );
    }

    #[test]
    fn test_out_of_range_percentages() {
        let over = PaymentModel::PercentageCommission {
            commission_percentage: Some(150.0),
        };
        assert_eq!(compute_earning(10_000, &over).amount, 10_000);

        let nan = PaymentModel::Hybrid {
            commission_percentage: Some(f64::NAN),
            base_salary: None,
        };
        assert_eq!(resolve_percentage(&nan), 30.0);
    }

    #[test]
    fn test_zero_and_negative_prices_pass_through() {
        assert_eq!(compute_earning(0, &PaymentModel::Unset).amount, 0);
        assert_eq!(compute_earning(-1_000, &PaymentModel::Unset).amount, -500);
    }
}
