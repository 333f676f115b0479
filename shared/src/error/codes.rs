//! Unified error codes for the salon ledger
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant errors
//! - 4xxx: Worker errors
//! - 5xxx: Earning errors
//! - 6xxx: Advance errors
//! - 7xxx: Invoice errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Salon owner role is required
    OwnerRequired = 2002,

    // ==================== 3xxx: Tenant ====================
    /// Caller is not bound to any salon
    TenantNotFound = 3002,

    // ==================== 4xxx: Worker ====================
    /// Worker not found
    WorkerNotFound = 4001,
    /// Worker is inactive
    WorkerInactive = 4002,

    // ==================== 5xxx: Earning ====================
    /// Earning not found
    EarningNotFound = 5001,
    /// Client already paid for this earning
    EarningAlreadyPaid = 5002,
    /// No earnings eligible for a payout
    NoPayableEarnings = 5101,

    // ==================== 6xxx: Advance ====================
    /// Advance not found
    AdvanceNotFound = 6001,
    /// Advance would exceed the configured limit
    AdvanceLimitExceeded = 6002,

    // ==================== 7xxx: Invoice ====================
    /// Invoice not found
    InvoiceNotFound = 7001,
    /// Payout settlement could not complete and was rolled back
    SettlementFailed = 7002,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// System busy (database locked, retry later)
    SystemBusy = 9404,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Authentication token is invalid",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::OwnerRequired => "Salon owner role is required",

            // Tenant
            ErrorCode::TenantNotFound => "No salon is bound to the caller",

            // Worker
            ErrorCode::WorkerNotFound => "Worker not found",
            ErrorCode::WorkerInactive => "Worker is inactive",

            // Earning
            ErrorCode::EarningNotFound => "Earning not found",
            ErrorCode::EarningAlreadyPaid => "Client has already paid for this service",
            ErrorCode::NoPayableEarnings => "No payable earnings found for this worker",

            // Advance
            ErrorCode::AdvanceNotFound => "Advance not found",
            ErrorCode::AdvanceLimitExceeded => "Advance would exceed the worker's advance limit",

            // Invoice
            ErrorCode::InvoiceNotFound => "Invoice not found",
            ErrorCode::SettlementFailed => "Payout settlement failed and was rolled back",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::SystemBusy => "System busy, please retry later",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::OwnerRequired),

            // Tenant
            3002 => Ok(ErrorCode::TenantNotFound),

            // Worker
            4001 => Ok(ErrorCode::WorkerNotFound),
            4002 => Ok(ErrorCode::WorkerInactive),

            // Earning
            5001 => Ok(ErrorCode::EarningNotFound),
            5002 => Ok(ErrorCode::EarningAlreadyPaid),
            5101 => Ok(ErrorCode::NoPayableEarnings),

            // Advance
            6001 => Ok(ErrorCode::AdvanceNotFound),
            6002 => Ok(ErrorCode::AdvanceLimitExceeded),

            // Invoice
            7001 => Ok(ErrorCode::InvoiceNotFound),
            7002 => Ok(ErrorCode::SettlementFailed),

            // System
            9002 => Ok(ErrorCode::DatabaseError),
            9404 => Ok(ErrorCode::SystemBusy),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
