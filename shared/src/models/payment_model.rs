//! Worker payment model (提成方式)
//!
//! Stored flat on the worker row (`payment_type`, `commission_percentage`,
//! `base_salary`) and lifted into the closed [`PaymentModel`] union before any
//! commission is computed.

use serde::{Deserialize, Serialize};

/// Commission applied when a worker has no payment model configured
pub const DEFAULT_COMMISSION_PERCENTAGE: f64 = 50.0;

/// Commission applied to hybrid workers without an explicit percentage
pub const DEFAULT_HYBRID_COMMISSION_PERCENTAGE: f64 = 30.0;

/// Payment type column value
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "snake_case"))]
pub enum PaymentType {
    PercentageCommission,
    Hybrid,
    FixedSalary,
}

/// How a worker is paid
///
/// `Unset` is an explicit variant: a worker without a configured model earns the
/// system default commission exactly like `PercentageCommission` with no
/// percentage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaymentModel {
    PercentageCommission {
        #[serde(default)]
        commission_percentage: Option<f64>,
    },
    /// Commission plus a monthly base salary (salary is paid out elsewhere)
    Hybrid {
        #[serde(default)]
        commission_percentage: Option<f64>,
        #[serde(default)]
        base_salary: Option<i64>,
    },
    /// Salaried: no per-service earnings
    FixedSalary {
        #[serde(default)]
        monthly_salary: Option<i64>,
    },
    Unset,
}

impl Default for PaymentModel {
    fn default() -> Self {
        Self::Unset
    }
}

impl PaymentModel {
    /// Rebuild the union from the flat worker columns
    pub fn from_columns(
        payment_type: Option<PaymentType>,
        commission_percentage: Option<f64>,
        base_salary: Option<i64>,
    ) -> Self {
        match payment_type {
            Some(PaymentType::PercentageCommission) => Self::PercentageCommission {
                commission_percentage,
            },
            Some(PaymentType::Hybrid) => Self::Hybrid {
                commission_percentage,
                base_salary,
            },
            Some(PaymentType::FixedSalary) => Self::FixedSalary {
                monthly_salary: base_salary,
            },
            None => Self::Unset,
        }
    }

    /// Label persisted on each earning (`payment_type` column)
    pub fn label(&self) -> &'static str {
        match self {
            Self::PercentageCommission { .. } => "percentage_commission",
            Self::Hybrid { .. } => "hybrid",
            Self::FixedSalary { .. } => "fixed_salary",
            Self::Unset => "unset",
        }
    }
}
