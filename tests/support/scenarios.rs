// tests/support/scenarios.rs
//! Ledger scenarios shared by the in-memory and PostgreSQL suites.
use std::sync::Arc;

use rust_decimal::Decimal;
use stockroom::domain::errors::DomainError;
use stockroom::domain::inventory::InventoryLedger;
use stockroom::domain::leftover::{Custodian, LeftOverId, LeftOverUpdate, NewLeftOver, Quantity};
use stockroom::domain::product::{
    NewProduct, Price, ProductDetails, ProductId, ProductName, ProductRepository, Stock,
};
use tokio::task::JoinSet;

use super::mocks::fixed_now;

pub async fn insert_product(repo: &dyn ProductRepository, name: &str, stock: i32) -> ProductId {
    let product = repo
        .insert(NewProduct {
            details: ProductDetails {
                name: ProductName::new(name).unwrap(),
                product_number: None,
                description: None,
                price: Price::new(Decimal::new(1250, 2)).unwrap(),
                category: None,
                location: None,
                product_type: None,
                images: Vec::new(),
                color_variants: serde_json::json!([]),
            },
            stock: Stock::new(stock).unwrap(),
            created_at: fixed_now(),
        })
        .await
        .unwrap();
    product.id
}

pub async fn stock_of(repo: &dyn ProductRepository, id: ProductId) -> i32 {
    repo.find_by_id(id).await.unwrap().unwrap().stock.get()
}

fn reservation(product_id: ProductId, quantity: i32, who: &str) -> NewLeftOver {
    NewLeftOver {
        product_id,
        custodian: Custodian::new(who, "Dock").unwrap(),
        quantity: Quantity::new(quantity).unwrap(),
        created_at: fixed_now(),
    }
}

/// Twenty single-unit reservations race for ten units: exactly ten win.
pub async fn racing_reservations_never_oversell(
    products: Arc<dyn ProductRepository>,
    ledger: Arc<dyn InventoryLedger>,
) {
    let product = insert_product(products.as_ref(), "Contested", 10).await;

    let mut tasks = JoinSet::new();
    for n in 0..20 {
        let ledger = Arc::clone(&ledger);
        tasks.spawn(async move { ledger.reserve(reservation(product, 1, &format!("c{n}"))).await });
    }

    let mut won = 0;
    let mut rejected = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => won += 1,
            Err(DomainError::InsufficientStock { available }) => {
                assert_eq!(available, 0);
                rejected += 1;
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(won, 10);
    assert_eq!(rejected, 10);
    assert_eq!(stock_of(products.as_ref(), product).await, 0);
}

/// Leftovers bounce between two products concurrently; the combined stock
/// plus outstanding quantities never changes.
pub async fn concurrent_moves_conserve_units(
    products: Arc<dyn ProductRepository>,
    ledger: Arc<dyn InventoryLedger>,
) {
    let first = insert_product(products.as_ref(), "Left", 20).await;
    let second = insert_product(products.as_ref(), "Right", 20).await;

    let mut ids: Vec<LeftOverId> = Vec::new();
    for n in 0..4 {
        let target = if n % 2 == 0 { first } else { second };
        ids.push(ledger.reserve(reservation(target, 2, "mover")).await.unwrap().id);
    }

    let mut tasks = JoinSet::new();
    for (n, id) in ids.iter().copied().enumerate() {
        let ledger = Arc::clone(&ledger);
        tasks.spawn(async move {
            for round in 0..5 {
                let target = if (n + round) % 2 == 0 { second } else { first };
                ledger
                    .reconcile(LeftOverUpdate {
                        id,
                        product_id: target,
                        custodian: Custodian::new("mover", "Dock").unwrap(),
                        quantity: Quantity::new(1 + i32::try_from(round).unwrap()).unwrap(),
                        updated_at: fixed_now(),
                    })
                    .await
                    .unwrap();
            }
        });
    }
    while let Some(result) = tasks.join_next().await {
        result.unwrap();
    }

    let mut outstanding = 0;
    for id in ids {
        outstanding += ledger.release(id, fixed_now()).await.unwrap().quantity.get();
    }
    assert_eq!(outstanding, 4 * 5);

    assert_eq!(stock_of(products.as_ref(), first).await, 20);
    assert_eq!(stock_of(products.as_ref(), second).await, 20);
}

/// A rejected reconcile leaves both the leftover and the stock untouched.
pub async fn rejected_reconcile_changes_nothing(
    products: Arc<dyn ProductRepository>,
    ledger: Arc<dyn InventoryLedger>,
) {
    let product = insert_product(products.as_ref(), "Scarce", 5).await;
    let leftover = ledger.reserve(reservation(product, 3, "Dana")).await.unwrap();

    let err = ledger
        .reconcile(LeftOverUpdate {
            id: leftover.id,
            product_id: product,
            custodian: Custodian::new("Dana", "Dock").unwrap(),
            quantity: Quantity::new(9).unwrap(),
            updated_at: fixed_now(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InsufficientStock { available: 5 }));
    assert_eq!(stock_of(products.as_ref(), product).await, 2);

    let released = ledger.release(leftover.id, fixed_now()).await.unwrap();
    assert_eq!(released.quantity.get(), 3);
    assert_eq!(stock_of(products.as_ref(), product).await, 5);
}
