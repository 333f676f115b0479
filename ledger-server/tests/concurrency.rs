//! Concurrent writers against one worker's wallet.

mod common;

use common::{completion, setup};
use ledger_server::ErrorCode;
use shared::models::{AdvanceCreate, InvoiceCreate};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_invoice_generation_settles_once() {
    let env = setup().await;
    let worker = env.commission_worker(50.0).await;

    for i in 0..5_i64 {
        env.ledger
            .complete_appointment(env.salon_id, i + 1, completion(worker.id, 1, 2_000, true))
            .await
            .unwrap();
    }

    let mut handles = Vec::new();
    for _ in 0..4 {
        let ledger = env.ledger.clone();
        let salon_id = env.salon_id;
        let worker_id = worker.id;
        handles.push(tokio::spawn(async move {
            ledger
                .generate_invoice(
                    salon_id,
                    InvoiceCreate {
                        worker_id,
                        period_start: None,
                        period_end: None,
                        payment_method: "cash".to_string(),
                        notes: None,
                    },
                    common::OWNER_ID,
                )
                .await
        }));
    }

    let mut settled = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(detail) => settled.push(detail),
            Err(e) => assert_eq!(e.code, ErrorCode::NoPayableEarnings),
        }
    }
    assert_eq!(settled.len(), 1);
    assert_eq!(settled[0].invoice.total_earnings, 5_000);
    assert_eq!(settled[0].lines.len(), 5);

    let invoices: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoice WHERE worker_id = ?")
        .bind(worker.id)
        .fetch_one(&env.pool)
        .await
        .unwrap();
    assert_eq!(invoices, 1);

    let wallet = env.ledger.wallet_snapshot(env.salon_id, worker.id).await.unwrap();
    assert_eq!(wallet.balance, 0);
    assert_eq!(wallet.total_paid, 5_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_completions_lose_no_credit() {
    let env = setup().await;
    let worker = env.commission_worker(50.0).await;

    let mut handles = Vec::new();
    for i in 0..20_i64 {
        let ledger = env.ledger.clone();
        let salon_id = env.salon_id;
        let worker_id = worker.id;
        handles.push(tokio::spawn(async move {
            ledger
                .complete_appointment(salon_id, 1_000 + i, completion(worker_id, 1, 100, true))
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let wallet = env.ledger.wallet_snapshot(env.salon_id, worker.id).await.unwrap();
    assert_eq!(wallet.balance, 20 * 50);
    assert_eq!(wallet.total_earned, 20 * 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_duplicate_completion_credits_once() {
    let env = setup().await;
    let worker = env.commission_worker(50.0).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let ledger = env.ledger.clone();
        let salon_id = env.salon_id;
        let worker_id = worker.id;
        handles.push(tokio::spawn(async move {
            ledger
                .complete_appointment(salon_id, 77, completion(worker_id, 5, 1_000, true))
                .await
        }));
    }

    let mut fresh = 0;
    for handle in handles {
        let outcome = handle.await.unwrap().unwrap();
        if !outcome.duplicate {
            fresh += 1;
        }
    }
    assert_eq!(fresh, 1);

    let wallet = env.ledger.wallet_snapshot(env.salon_id, worker.id).await.unwrap();
    assert_eq!(wallet.balance, 500);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_advances_respect_limit() {
    let env = setup().await;
    let worker = env.commission_worker(50.0).await;
    env.ledger
        .update_wallet_settings(
            env.salon_id,
            worker.id,
            shared::models::WalletSettingsUpdate {
                advance_limit: Some(1_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let ledger = env.ledger.clone();
        let salon_id = env.salon_id;
        let worker_id = worker.id;
        handles.push(tokio::spawn(async move {
            ledger
                .give_advance(
                    salon_id,
                    worker_id,
                    AdvanceCreate {
                        amount: 300,
                        reason: "bus fare".to_string(),
                    },
                    common::OWNER_ID,
                )
                .await
        }));
    }

    let mut granted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => granted += 1,
            Err(e) => assert_eq!(e.code, ErrorCode::AdvanceLimitExceeded),
        }
    }
    assert_eq!(granted, 3);

    let wallet = env.ledger.wallet_snapshot(env.salon_id, worker.id).await.unwrap();
    assert_eq!(wallet.outstanding_advances, 900);
}
