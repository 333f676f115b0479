//! Earning Recorder
//!
//! Turns a completed service into an immutable earning. Ordinary appointment
//! completion and walk-in creation both go through [`Ledger::record_completion`].

use shared::models::{
    CompletionOutcome, CompletionSource, Earning, EarningList, EarningQuery, ServiceCompletion,
};

use super::{Ledger, commission, commit, money};
use crate::db::repository::appointment::{self, PaymentStamp};
use crate::db::repository::earning::{self, EarningFilter};
use crate::db::repository::wallet;
use crate::utils::time;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative_amount, validate_optional_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// A completion event as received from the appointment subsystem
#[derive(Debug, Clone)]
pub struct CompletionEvent {
    pub salon_id: i64,
    pub appointment_id: i64,
    pub source: CompletionSource,
    pub completion: ServiceCompletion,
}

fn validate_completion(c: &ServiceCompletion) -> AppResult<()> {
    if c.service_price.abs() > money::MAX_SERVICE_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!(
                "service_price exceeds maximum allowed ({}), got {}",
                money::MAX_SERVICE_PRICE,
                c.service_price
            ),
        ));
    }
    if let Some(p) = c.original_price {
        validate_non_negative_amount(p, "original_price")?;
    }
    if let Some(p) = c.final_price {
        validate_non_negative_amount(p, "final_price")?;
    }
    validate_optional_text(&c.service_name, "service_name", MAX_NAME_LEN)?;
    validate_optional_text(&c.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

impl Ledger {
    /// `POST /api/appointments/{id}/complete`
    pub async fn complete_appointment(
        &self,
        salon_id: i64,
        appointment_id: i64,
        completion: ServiceCompletion,
    ) -> AppResult<CompletionOutcome> {
        self.record_completion(CompletionEvent {
            salon_id,
            appointment_id,
            source: CompletionSource::Appointment,
            completion,
        })
        .await
    }

    /// Walk-ins are created already completed under a fresh appointment id
    pub async fn record_walk_in(
        &self,
        salon_id: i64,
        completion: ServiceCompletion,
    ) -> AppResult<CompletionOutcome> {
        self.record_completion(CompletionEvent {
            salon_id,
            appointment_id: shared::util::snowflake_id(),
            source: CompletionSource::WalkIn,
            completion,
        })
        .await
    }

    /// Record one completed service.
    ///
    /// Repeating the event for the same appointment and service returns the
    /// earning recorded the first time and credits nothing.
    pub async fn record_completion(&self, event: CompletionEvent) -> AppResult<CompletionOutcome> {
        let CompletionEvent {
            salon_id,
            appointment_id,
            source,
            completion,
        } = event;
        validate_completion(&completion)?;

        let worker = self.load_worker(salon_id, completion.worker_id).await?;
        let model = worker.payment_model();
        let commission = commission::compute_earning(completion.service_price, &model);
        let now = shared::util::now_millis();

        let mut tx = self.begin().await?;
        // write first: takes the database write lock
        wallet::ensure(&mut tx, salon_id, worker.id, now).await?;

        if let Some(existing) = appointment::find_by_id(&mut *tx, appointment_id).await?
            && existing.salon_id != salon_id
        {
            return Err(AppError::permission_denied(format!(
                "Appointment {} does not belong to this salon",
                appointment_id
            )));
        }

        if let Some(existing) =
            earning::find_by_completion(&mut *tx, appointment_id, completion.service_id).await?
        {
            commit(tx).await?;
            tracing::info!(
                earning_id = existing.id,
                appointment_id,
                service_id = completion.service_id,
                "Duplicate completion event ignored"
            );
            return Ok(CompletionOutcome {
                appointment_id,
                earning: Some(existing),
                wallet_credited: false,
                duplicate: true,
            });
        }

        let payment = completion.client_paid.then(|| PaymentStamp {
            method: completion.payment_method.as_deref(),
            paid_at: now,
        });
        appointment::mark_completed(
            &mut tx,
            appointment_id,
            salon_id,
            worker.id,
            source == CompletionSource::WalkIn,
            payment,
            now,
        )
        .await?;

        if commission.amount == 0 {
            commit(tx).await?;
            tracing::info!(
                worker_id = worker.id,
                appointment_id,
                payment_type = model.label(),
                "No per-service earning for this payment model"
            );
            return Ok(CompletionOutcome {
                appointment_id,
                earning: None,
                wallet_credited: false,
                duplicate: false,
            });
        }

        let record = Earning {
            id: shared::util::snowflake_id(),
            salon_id,
            worker_id: worker.id,
            appointment_id,
            service_id: completion.service_id,
            service_name: completion.service_name.clone(),
            service_price: completion.service_price,
            original_price: completion.original_price,
            final_price: completion.final_price,
            commission_percentage: commission.percentage,
            worker_earning: commission.amount,
            payment_type: model.label().to_string(),
            is_paid: completion.client_paid,
            payment_method: if completion.client_paid {
                completion.payment_method.clone()
            } else {
                None
            },
            paid_at: completion.client_paid.then_some(now),
            invoice_id: None,
            service_date: time::format_date(time::millis_to_date(now, self.tz)),
            created_at: now,
        };
        earning::insert(&mut tx, &record).await?;

        if record.is_paid {
            wallet::credit_earning(
                &mut tx,
                salon_id,
                worker.id,
                record.worker_earning,
                record.service_price,
                now,
            )
            .await?;
        }
        commit(tx).await?;

        tracing::info!(
            earning_id = record.id,
            worker_id = worker.id,
            salon_id,
            appointment_id,
            source = source.as_str(),
            service_price = record.service_price,
            worker_earning = record.worker_earning,
            client_paid = record.is_paid,
            "Earning recorded"
        );

        Ok(CompletionOutcome {
            appointment_id,
            wallet_credited: record.is_paid,
            earning: Some(record),
            duplicate: false,
        })
    }

    /// Client settled a previously unpaid service: apply the deferred wallet credit
    pub async fn mark_earning_paid(
        &self,
        salon_id: i64,
        earning_id: i64,
        payment_method: &str,
    ) -> AppResult<Earning> {
        crate::utils::validation::validate_required_text(
            payment_method,
            "payment_method",
            MAX_SHORT_TEXT_LEN,
        )?;
        let found = self.find_earning(salon_id, earning_id).await?;
        if found.is_paid {
            return Err(already_paid(earning_id));
        }

        let _guard = self.locks.acquire(salon_id, found.worker_id).await;
        let now = shared::util::now_millis();
        let mut tx = self.begin().await?;

        if !earning::mark_paid(&mut tx, earning_id, payment_method, now).await? {
            return Err(already_paid(earning_id));
        }
        wallet::credit_earning(
            &mut tx,
            salon_id,
            found.worker_id,
            found.worker_earning,
            found.service_price,
            now,
        )
        .await?;
        appointment::mark_paid(&mut tx, found.appointment_id, payment_method, now).await?;

        let updated = earning::find_by_id(&mut *tx, earning_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::EarningNotFound))?;
        commit(tx).await?;

        tracing::info!(
            earning_id,
            worker_id = found.worker_id,
            salon_id,
            worker_earning = found.worker_earning,
            payment_method,
            "Deferred client payment recorded"
        );
        Ok(updated)
    }

    /// Earning of a salon by id
    pub async fn find_earning(&self, salon_id: i64, earning_id: i64) -> AppResult<Earning> {
        match earning::find_by_id(&self.pool, earning_id).await? {
            Some(e) if e.salon_id == salon_id => Ok(e),
            _ => Err(AppError::with_message(
                ErrorCode::EarningNotFound,
                format!("Earning {} not found", earning_id),
            )),
        }
    }

    pub async fn list_earnings(&self, salon_id: i64, query: &EarningQuery) -> AppResult<EarningList> {
        time::parse_date_range(query.start_date.as_deref(), query.end_date.as_deref())?;
        if let Some(worker_id) = query.worker_id {
            self.load_worker(salon_id, worker_id).await?;
        }

        let filter = EarningFilter {
            worker_id: query.worker_id,
            status: query.status,
            start_date: query.start_date.as_deref(),
            end_date: query.end_date.as_deref(),
        };
        let earnings = earning::list(&self.pool, salon_id, &filter).await?;
        let total_earning = earnings.iter().map(|e| e.worker_earning).sum();
        Ok(EarningList {
            count: earnings.len(),
            total_earning,
            earnings,
        })
    }
}

fn already_paid(earning_id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::EarningAlreadyPaid,
        format!("Earning {} is already marked as paid", earning_id),
    )
}
