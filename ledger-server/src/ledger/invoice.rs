//! Invoice Generator
//!
//! Settles a worker's paid, not yet invoiced earnings into an immutable payout
//! record, netting all outstanding advances. Selection and settlement run under
//! the worker lock inside one write transaction; any failure after selection
//! rolls the whole settlement back.

use shared::models::{
    Advance, Earning, Invoice, InvoiceCreate, InvoiceDetail, InvoiceLine, InvoiceQuery,
    InvoiceStatus,
};
use sqlx::SqliteConnection;

use super::{Ledger, commit, money};
use crate::db::repository::earning::PayoutDiagnostics;
use crate::db::repository::{RepoResult, advance, earning, invoice, invoice_counter, wallet};
use crate::utils::time;
use crate::utils::validation::{
    MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 200;

/// How outstanding advances are netted against one payout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub total_earnings: i64,
    pub total_outstanding: i64,
    /// Advances absorbed by the earnings
    pub advance_deduction: i64,
    /// Advances beyond the earnings, cleared without a payout
    pub advance_write_off: i64,
    /// Cash handed to the worker, never negative
    pub payout_amount: i64,
}

impl Settlement {
    pub fn compute(total_earnings: i64, total_outstanding: i64) -> Self {
        let advance_deduction = total_outstanding.min(total_earnings).max(0);
        Self {
            total_earnings,
            total_outstanding,
            advance_deduction,
            advance_write_off: total_outstanding - advance_deduction,
            payout_amount: (total_earnings - advance_deduction).max(0),
        }
    }
}

/// Human-readable advance note appended to the invoice notes
fn settlement_notes(notes: Option<&str>, s: &Settlement) -> Option<String> {
    let mut parts: Vec<String> = notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(|n| vec![n.to_string()])
        .unwrap_or_default();
    if s.advance_deduction > 0 {
        parts.push(format!(
            "Advance deduction: {}",
            money::format_amount(s.advance_deduction)
        ));
    }
    if s.advance_write_off > 0 {
        parts.push(format!(
            "Advance write-off: {}",
            money::format_amount(s.advance_write_off)
        ));
    }
    (!parts.is_empty()).then(|| parts.join("\n"))
}

fn no_payable_earnings(d: PayoutDiagnostics, wallet_balance: i64) -> AppError {
    let message = if d.available > 0 {
        "No payable earnings in the requested period"
    } else if d.unpaid_by_client > 0 {
        "No payable earnings: remaining earnings are waiting for client payment"
    } else {
        "No payable earnings found for this worker"
    };
    AppError::with_message(ErrorCode::NoPayableEarnings, message)
        .with_detail("totalPaid", d.total_paid)
        .with_detail("alreadyInvoiced", d.already_invoiced)
        .with_detail("unpaidByClient", d.unpaid_by_client)
        .with_detail("available", d.available)
        .with_detail("walletBalance", wallet_balance)
}

/// Data needed to write one settlement
struct SettlementPlan<'a> {
    salon_id: i64,
    worker_id: i64,
    period_start: String,
    period_end: String,
    earnings: &'a [Earning],
    advances: &'a [Advance],
    settlement: Settlement,
    payment_method: &'a str,
    notes: Option<String>,
    generated_by: i64,
    now: i64,
}

/// Writes the invoice and settles earnings, advances and the wallet
async fn write_settlement(
    conn: &mut SqliteConnection,
    plan: SettlementPlan<'_>,
) -> RepoResult<InvoiceDetail> {
    let sequence = invoice_counter::next_value(conn, plan.salon_id).await?;
    let invoice_id = shared::util::snowflake_id();

    let record = Invoice {
        id: invoice_id,
        salon_id: plan.salon_id,
        worker_id: plan.worker_id,
        invoice_number: invoice_counter::format_invoice_number(sequence),
        sequence,
        period_start: plan.period_start,
        period_end: plan.period_end,
        total_earnings: plan.settlement.total_earnings,
        advance_deduction: plan.settlement.advance_deduction,
        advance_write_off: plan.settlement.advance_write_off,
        total_amount: plan.settlement.payout_amount,
        appointments_count: plan.earnings.len() as i64,
        status: InvoiceStatus::Paid,
        paid_date: plan.now,
        payment_method: plan.payment_method.to_string(),
        notes: plan.notes,
        generated_by: plan.generated_by,
        created_at: plan.now,
    };
    invoice::insert(conn, &record).await?;

    let mut lines = Vec::with_capacity(plan.earnings.len());
    for e in plan.earnings {
        let line = InvoiceLine {
            id: shared::util::snowflake_id(),
            invoice_id,
            earning_id: e.id,
            appointment_id: e.appointment_id,
            service_name: e.service_name.clone(),
            service_price: e.service_price,
            commission_percentage: e.commission_percentage,
            worker_earning: e.worker_earning,
            service_date: e.service_date.clone(),
        };
        invoice::insert_line(conn, &line).await?;
        earning::assign_invoice(conn, e.id, invoice_id).await?;
        lines.push(line);
    }

    for a in plan.advances {
        advance::mark_deducted(conn, a.id, invoice_id, plan.now).await?;
    }

    wallet::apply_payout(
        conn,
        plan.worker_id,
        plan.settlement.total_earnings,
        plan.settlement.payout_amount,
        plan.settlement.total_outstanding,
        plan.now,
    )
    .await?;

    Ok(InvoiceDetail {
        invoice: record,
        lines,
    })
}

impl Ledger {
    /// Generate (and record as paid) a payout invoice for one worker
    pub async fn generate_invoice(
        &self,
        salon_id: i64,
        data: InvoiceCreate,
        generated_by: i64,
    ) -> AppResult<InvoiceDetail> {
        validate_required_text(&data.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;
        let (start, end) =
            time::parse_date_range(data.period_start.as_deref(), data.period_end.as_deref())?;
        let start = start.map(time::format_date);
        let end = end.map(time::format_date);

        let worker_id = data.worker_id;
        self.load_worker(salon_id, worker_id).await?;

        let _guard = self.locks.acquire(salon_id, worker_id).await;
        let now = shared::util::now_millis();
        let mut tx = self.begin().await?;
        wallet::ensure(&mut tx, salon_id, worker_id, now).await?;

        let earnings =
            earning::find_payable(&mut tx, salon_id, worker_id, start.as_deref(), end.as_deref())
                .await?;
        if earnings.is_empty() {
            let diagnostics = earning::payout_diagnostics(&mut tx, salon_id, worker_id).await?;
            let balance = wallet::get(&mut tx, worker_id).await?.balance;
            tracing::warn!(
                worker_id,
                salon_id,
                total_paid = diagnostics.total_paid,
                already_invoiced = diagnostics.already_invoiced,
                unpaid_by_client = diagnostics.unpaid_by_client,
                available = diagnostics.available,
                wallet_balance = balance,
                "Invoice requested with no payable earnings"
            );
            return Err(no_payable_earnings(diagnostics, balance));
        }

        let total_earnings: i64 = earnings.iter().map(|e| e.worker_earning).sum();
        let advances = advance::find_outstanding(&mut tx, salon_id, worker_id).await?;
        let total_outstanding: i64 = advances.iter().map(|a| a.amount).sum();
        let settlement = Settlement::compute(total_earnings, total_outstanding);

        // derive missing bounds from the settled earnings (sorted by service_date)
        let period_start = match start {
            Some(s) => s,
            None => earnings
                .first()
                .map(|e| e.service_date.clone())
                .unwrap_or_default(),
        };
        let period_end = match end {
            Some(e) => e,
            None => earnings
                .iter()
                .map(|e| e.service_date.as_str())
                .max()
                .unwrap_or_default()
                .to_string(),
        };

        let plan = SettlementPlan {
            salon_id,
            worker_id,
            period_start,
            period_end,
            earnings: &earnings,
            advances: &advances,
            settlement,
            payment_method: data.payment_method.trim(),
            notes: settlement_notes(data.notes.as_deref(), &settlement),
            generated_by,
            now,
        };

        let detail = match write_settlement(&mut tx, plan).await {
            Ok(detail) => detail,
            Err(e) => {
                tracing::error!(worker_id, salon_id, error = %e, "Invoice settlement failed, rolling back");
                return Err(AppError::with_message(
                    ErrorCode::SettlementFailed,
                    format!("Invoice settlement failed: {e}"),
                ));
            }
        };
        if let Err(e) = commit(tx).await {
            tracing::error!(worker_id, salon_id, error = %e, "Invoice commit failed");
            return Err(AppError::with_message(
                ErrorCode::SettlementFailed,
                format!("Invoice settlement failed: {}", e.message),
            ));
        }

        tracing::info!(
            invoice_number = %detail.invoice.invoice_number,
            worker_id,
            salon_id,
            total_earnings = settlement.total_earnings,
            advance_deduction = settlement.advance_deduction,
            advance_write_off = settlement.advance_write_off,
            payout = settlement.payout_amount,
            earnings = detail.lines.len(),
            "Invoice generated"
        );
        Ok(detail)
    }

    /// Invoice with its line items
    pub async fn invoice_detail(&self, salon_id: i64, invoice_id: i64) -> AppResult<InvoiceDetail> {
        let record = invoice::find_by_id(&self.pool, invoice_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::InvoiceNotFound,
                    format!("Invoice {} not found", invoice_id),
                )
            })?;
        if record.salon_id != salon_id {
            tracing::warn!(invoice_id, salon_id, "Cross-tenant invoice access rejected");
            return Err(AppError::permission_denied(format!(
                "Invoice {} does not belong to this salon",
                invoice_id
            )));
        }
        let lines = invoice::find_lines(&self.pool, invoice_id).await?;
        Ok(InvoiceDetail {
            invoice: record,
            lines,
        })
    }

    /// Invoices of a salon (optionally one worker), newest first
    pub async fn list_invoices(&self, salon_id: i64, query: &InvoiceQuery) -> AppResult<Vec<Invoice>> {
        if let Some(worker_id) = query.worker_id {
            self.load_worker(salon_id, worker_id).await?;
        }
        let limit = query
            .limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT);
        Ok(invoice::list(&self.pool, salon_id, query.worker_id, limit).await?)
    }
}
