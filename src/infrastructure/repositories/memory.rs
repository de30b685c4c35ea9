// src/infrastructure/repositories/memory.rs
//! Process-local backend used with `STORAGE_BACKEND=memory` and by the test
//! suite. One mutex guards all tables and acts as the transaction boundary:
//! a ledger operation validates its whole plan before writing anything.

use crate::domain::audit::{
    AuditLog, AuditLogCursor, AuditLogFilter, AuditLogRepository, NewAuditLog,
};
use crate::domain::category::{
    Category, CategoryId, CategoryRepository, CategoryUpdate, NewCategory,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::inventory::{
    Change, InventoryLedger, Restock, StockPlan,
    plan::{plan_reconcile, plan_release, plan_reserve, plan_restock},
};
use crate::domain::leftover::{
    LeftOver, LeftOverId, LeftOverReadRepository, LeftOverUpdate, LeftOverWithProduct,
    NewLeftOver,
};
use crate::domain::product::{
    NewProduct, Product, ProductId, ProductRepository, ProductUpdate, Stock,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, Category>,
    leftovers: BTreeMap<LeftOverId, LeftOver>,
    audit_logs: Vec<AuditLog>,
    next_product_id: i64,
    next_category_id: i64,
    next_leftover_id: i64,
    next_audit_id: i64,
}

impl Tables {
    fn product(&self, id: ProductId) -> DomainResult<&Product> {
        self.products
            .get(&id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))
    }

    fn leftover(&self, id: LeftOverId) -> DomainResult<&LeftOver> {
        self.leftovers
            .get(&id)
            .ok_or_else(|| DomainError::NotFound("leftover not found".into()))
    }

    fn category_name_taken(&self, name: &str, except: Option<CategoryId>) -> bool {
        self.categories
            .values()
            .any(|c| c.name.as_str() == name && Some(c.id) != except)
    }

    /// Validate every adjustment first, then write them all.
    fn apply_plan(&mut self, plan: &StockPlan, at: DateTime<Utc>) -> DomainResult<()> {
        let mut staged: Vec<(ProductId, Stock)> = Vec::with_capacity(plan.adjustments().len());
        for adjustment in plan.adjustments() {
            let current = self.product(adjustment.product_id)?.stock;
            staged.push((adjustment.product_id, adjustment.apply(current)?));
        }
        for (id, stock) in staged {
            if let Some(product) = self.products.get_mut(&id) {
                product.stock = stock;
                product.updated_at = at;
            }
        }
        Ok(())
    }

    fn joined(&self, leftover: &LeftOver) -> DomainResult<LeftOverWithProduct> {
        Ok(LeftOverWithProduct {
            leftover: leftover.clone(),
            product: self.product(leftover.product_id)?.clone(),
        })
    }
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn insert(&self, product: NewProduct) -> DomainResult<Product> {
        let mut tables = self.lock()?;
        let id = ProductId::new(next_id(&mut tables.next_product_id))?;
        let details = product.details;
        let created = Product {
            id,
            name: details.name,
            product_number: details.product_number,
            description: details.description,
            price: details.price,
            stock: product.stock,
            category: details.category,
            location: details.location,
            product_type: details.product_type,
            images: details.images,
            color_variants: details.color_variants,
            created_at: product.created_at,
            updated_at: product.created_at,
        };
        tables.products.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let mut tables = self.lock()?;
        let product = tables
            .products
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("product not found".into()))?;
        let details = update.details;
        product.name = details.name;
        product.product_number = details.product_number;
        product.description = details.description;
        product.price = details.price;
        product.category = details.category;
        product.location = details.location;
        product.product_type = details.product_type;
        product.images = details.images;
        product.color_variants = details.color_variants;
        product.updated_at = update.updated_at;
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let mut tables = self.lock()?;
        if tables.leftovers.values().any(|l| l.product_id == id) {
            return Err(DomainError::Conflict("product has leftover records".into()));
        }
        tables
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("product not found".into()))
    }

    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        Ok(self.lock()?.products.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Product>> {
        let mut products: Vec<_> = self.lock()?.products.values().cloned().collect();
        products.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()).then(a.id.cmp(&b.id)));
        Ok(products)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn insert(&self, category: NewCategory) -> DomainResult<Category> {
        let mut tables = self.lock()?;
        if tables.category_name_taken(category.name.as_str(), None) {
            return Err(DomainError::Conflict("category name already exists".into()));
        }
        let id = CategoryId::new(next_id(&mut tables.next_category_id))?;
        let created = Category {
            id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.created_at,
        };
        tables.categories.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, update: CategoryUpdate) -> DomainResult<Category> {
        let mut tables = self.lock()?;
        if tables.category_name_taken(update.name.as_str(), Some(update.id)) {
            return Err(DomainError::Conflict("category name already exists".into()));
        }
        let category = tables
            .categories
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("category not found".into()))?;
        category.name = update.name;
        category.description = update.description;
        category.updated_at = update.updated_at;
        Ok(category.clone())
    }

    async fn delete(&self, id: CategoryId) -> DomainResult<()> {
        self.lock()?
            .categories
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("category not found".into()))
    }

    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        Ok(self.lock()?.categories.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        let mut categories: Vec<_> = self.lock()?.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        Ok(categories)
    }
}

#[async_trait]
impl LeftOverReadRepository for InMemoryStore {
    async fn find_by_id(&self, id: LeftOverId) -> DomainResult<Option<LeftOverWithProduct>> {
        let tables = self.lock()?;
        tables
            .leftovers
            .get(&id)
            .map(|leftover| tables.joined(leftover))
            .transpose()
    }

    async fn list(&self) -> DomainResult<Vec<LeftOverWithProduct>> {
        let tables = self.lock()?;
        let mut rows = tables
            .leftovers
            .values()
            .map(|leftover| tables.joined(leftover))
            .collect::<DomainResult<Vec<_>>>()?;
        rows.sort_by(|a, b| {
            b.leftover
                .created_at
                .cmp(&a.leftover.created_at)
                .then(b.leftover.id.0.cmp(&a.leftover.id.0))
        });
        Ok(rows)
    }
}

#[async_trait]
impl InventoryLedger for InMemoryStore {
    async fn reserve(&self, reservation: NewLeftOver) -> DomainResult<LeftOver> {
        let mut tables = self.lock()?;
        let stock = tables.product(reservation.product_id)?.stock;
        let plan = plan_reserve(reservation.product_id, stock, reservation.quantity)?;
        tables.apply_plan(&plan, reservation.created_at)?;

        let id = LeftOverId::new(next_id(&mut tables.next_leftover_id))?;
        let created = LeftOver {
            id,
            product_id: reservation.product_id,
            custodian: reservation.custodian,
            quantity: reservation.quantity,
            created_at: reservation.created_at,
            updated_at: reservation.created_at,
        };
        tables.leftovers.insert(id, created.clone());
        Ok(created)
    }

    async fn reconcile(&self, update: LeftOverUpdate) -> DomainResult<Change<LeftOver>> {
        let mut tables = self.lock()?;
        let previous = tables.leftover(update.id)?.clone();
        let target_stock = tables.product(update.product_id)?.stock;
        let plan = plan_reconcile(&previous, update.product_id, target_stock, update.quantity)?;
        tables.apply_plan(&plan, update.updated_at)?;

        let current = LeftOver {
            id: previous.id,
            product_id: update.product_id,
            custodian: update.custodian,
            quantity: update.quantity,
            created_at: previous.created_at,
            updated_at: update.updated_at,
        };
        tables.leftovers.insert(current.id, current.clone());
        Ok(Change { previous, current })
    }

    async fn release(&self, id: LeftOverId, at: DateTime<Utc>) -> DomainResult<LeftOver> {
        let mut tables = self.lock()?;
        let existing = tables.leftover(id)?.clone();
        let plan = plan_release(&existing);
        tables.apply_plan(&plan, at)?;
        tables.leftovers.remove(&id);
        Ok(existing)
    }

    async fn restock(&self, restock: Restock) -> DomainResult<Change<Product>> {
        let mut tables = self.lock()?;
        let previous = tables.product(restock.product_id)?.clone();
        let plan = plan_restock(previous.id, previous.stock, restock.stock);
        tables.apply_plan(&plan, restock.updated_at)?;
        let current = tables.product(restock.product_id)?.clone();
        Ok(Change { previous, current })
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryStore {
    async fn insert(&self, log: NewAuditLog) -> DomainResult<()> {
        let mut tables = self.lock()?;
        let id = next_id(&mut tables.next_audit_id);
        tables.audit_logs.push(AuditLog { id, entry: log });
        Ok(())
    }

    async fn list(
        &self,
        filter: AuditLogFilter,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<AuditLogCursor>)> {
        let limit = limit.clamp(1, 100) as usize;
        let tables = self.lock()?;

        let mut logs: Vec<AuditLog> = tables
            .audit_logs
            .iter()
            .filter(|log| {
                filter
                    .entity_type
                    .is_none_or(|kind| log.entry.entity_type == kind)
            })
            .filter(|log| filter.entity_id.is_none_or(|id| log.entry.entity_id == id))
            .filter(|log| {
                cursor.as_ref().is_none_or(|c| {
                    (log.entry.created_at, log.id) < (c.created_at, c.id)
                })
            })
            .cloned()
            .collect();
        logs.sort_by(|a, b| {
            (b.entry.created_at, b.id).cmp(&(a.entry.created_at, a.id))
        });

        let mut next_cursor = None;
        if logs.len() > limit {
            logs.truncate(limit);
            if let Some(last) = logs.last() {
                next_cursor = Some(AuditLogCursor::new(last.entry.created_at, last.id));
            }
        }
        Ok((logs, next_cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::leftover::{Custodian, Quantity};
    use crate::domain::product::{Price, ProductDetails, ProductName};
    use rust_decimal::Decimal;

    fn details(name: &str) -> ProductDetails {
        ProductDetails {
            name: ProductName::new(name).expect("name"),
            product_number: None,
            description: None,
            price: Price::new(Decimal::new(1999, 2)).expect("price"),
            category: None,
            location: None,
            product_type: None,
            images: Vec::new(),
            color_variants: serde_json::json!([]),
        }
    }

    async fn seed(store: &InMemoryStore, name: &str, stock: i32) -> ProductId {
        ProductRepository::insert(
            store,
            NewProduct {
                details: details(name),
                stock: Stock::new(stock).expect("stock"),
                created_at: Utc::now(),
            },
        )
        .await
        .expect("insert product")
        .id
    }

    fn reservation(product_id: ProductId, quantity: i32) -> NewLeftOver {
        NewLeftOver {
            product_id,
            custodian: Custodian::new("Alice", "Warehouse A").expect("custodian"),
            quantity: Quantity::new(quantity).expect("quantity"),
            created_at: Utc::now(),
        }
    }

    async fn stock_of(store: &InMemoryStore, id: ProductId) -> i32 {
        ProductRepository::find_by_id(store, id)
            .await
            .expect("find")
            .expect("product exists")
            .stock
            .get()
    }

    #[tokio::test]
    async fn rejected_reservation_leaves_stock_untouched() {
        let store = InMemoryStore::new();
        let id = seed(&store, "Mug", 3).await;

        let err = store.reserve(reservation(id, 4)).await.unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { available: 3 }));
        assert_eq!(stock_of(&store, id).await, 3);
        assert!(LeftOverReadRepository::list(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reassignment_moves_stock_between_products() {
        let store = InMemoryStore::new();
        let mug = seed(&store, "Mug", 10).await;
        let cap = seed(&store, "Cap", 5).await;

        let leftover = store.reserve(reservation(mug, 4)).await.unwrap();
        let change = store
            .reconcile(LeftOverUpdate {
                id: leftover.id,
                product_id: cap,
                custodian: Custodian::new("Bob", "Shop").unwrap(),
                quantity: Quantity::new(2).unwrap(),
                updated_at: Utc::now(),
            })
            .await
            .unwrap();

        assert_eq!(change.previous.product_id, mug);
        assert_eq!(change.current.product_id, cap);
        assert_eq!(stock_of(&store, mug).await, 10);
        assert_eq!(stock_of(&store, cap).await, 3);
    }

    #[tokio::test]
    async fn product_with_leftovers_cannot_be_deleted() {
        let store = InMemoryStore::new();
        let id = seed(&store, "Mug", 2).await;
        store.reserve(reservation(id, 1)).await.unwrap();

        let err = ProductRepository::delete(&store, id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn duplicate_category_name_conflicts() {
        let store = InMemoryStore::new();
        let new = || NewCategory {
            name: crate::domain::category::CategoryName::new("Shirts").unwrap(),
            description: crate::domain::category::CategoryDescription::new("Tops").unwrap(),
            created_at: Utc::now(),
        };
        CategoryRepository::insert(&store, new()).await.unwrap();
        let err = CategoryRepository::insert(&store, new()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn release_stamps_the_product_with_the_given_time() {
        let store = InMemoryStore::new();
        let id = seed(&store, "Mug", 5).await;
        let leftover = store.reserve(reservation(id, 2)).await.unwrap();

        let at = DateTime::parse_from_rfc3339("2030-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let released = store.release(leftover.id, at).await.unwrap();
        assert_eq!(released.id, leftover.id);

        let product = ProductRepository::find_by_id(&store, id)
            .await
            .unwrap()
            .expect("product exists");
        assert_eq!(product.stock.get(), 5);
        assert_eq!(product.updated_at, at);
    }
}
