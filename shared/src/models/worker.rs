//! Salon & Worker Models

use serde::{Deserialize, Serialize};

use super::payment_model::{PaymentModel, PaymentType};

/// Salon (tenant)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Salon {
    pub id: i64,
    pub name: String,
    /// User id of the owning account
    pub owner_id: i64,
    pub created_at: i64,
}

/// Worker entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Worker {
    pub id: i64,
    pub salon_id: i64,
    /// Login account of the worker, if any
    pub user_id: Option<i64>,
    pub name: String,
    pub payment_type: Option<PaymentType>,
    /// Commission percentage (40 = 40%)
    pub commission_percentage: Option<f64>,
    /// Base / monthly salary in minor units
    pub base_salary: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}

impl Worker {
    pub fn payment_model(&self) -> PaymentModel {
        PaymentModel::from_columns(
            self.payment_type,
            self.commission_percentage,
            self.base_salary,
        )
    }
}
