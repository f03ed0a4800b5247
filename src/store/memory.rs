// In-memory repositories
//
// Evaluates each query through its `RecordQuery` implementation, so the
// semantics match what the MySQL repositories translate into SQL.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::traits::{Record, RecordQuery, Repository};
use crate::core::{AppError, Result};
use crate::modules::payments::models::Payment;
use crate::modules::payments::repositories::{PaymentQuery, PaymentRepository};
use crate::modules::reports::engine::PaymentTotals;

/// Vec-backed repository for any record type, kept in insertion order
pub struct MemoryRepository<T, Q> {
    records: RwLock<Vec<T>>,
    unique_key: Option<fn(&T) -> String>,
    online: AtomicBool,
    _query: PhantomData<fn() -> Q>,
}

impl<T, Q> Default for MemoryRepository<T, Q> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            unique_key: None,
            online: AtomicBool::new(true),
            _query: PhantomData,
        }
    }
}

impl<T, Q> MemoryRepository<T, Q>
where
    T: Record,
    Q: RecordQuery<T>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject inserts whose key collides with an existing record
    pub fn with_unique_key(mut self, key: fn(&T) -> String) -> Self {
        self.unique_key = Some(key);
        self
    }

    /// Make every subsequent call fail with `StoreUnavailable`
    pub fn take_offline(&self) {
        self.online.store(false, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::StoreUnavailable(
                "in-memory store is offline".to_string(),
            ))
        }
    }

    async fn matching(&self, query: &Q) -> Result<Vec<T>> {
        self.ensure_online()?;
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| query.matches(r)).cloned().collect())
    }
}

#[async_trait]
impl<T, Q> Repository<T> for MemoryRepository<T, Q>
where
    T: Record,
    Q: RecordQuery<T> + 'static,
{
    type Query = Q;

    async fn create(&self, entity: &T) -> Result<()> {
        self.ensure_online()?;
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.id() == entity.id()) {
            return Err(AppError::conflict(format!(
                "Record '{}' already exists",
                entity.id()
            )));
        }
        if let Some(key) = self.unique_key {
            let wanted = key(entity);
            if records.iter().any(|r| key(r) == wanted) {
                return Err(AppError::conflict(format!("'{}' already exists", wanted)));
            }
        }

        records.push(entity.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>> {
        self.ensure_online()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<T>> {
        self.ensure_online()?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| ids.contains(&r.id()))
            .cloned()
            .collect())
    }

    async fn list(&self, query: &Q) -> Result<Vec<T>> {
        let mut rows = self.matching(query).await?;
        rows.sort_by(|a, b| query.order(a, b));
        if let Some(limit) = query.limit() {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    async fn count(&self, query: &Q) -> Result<i64> {
        self.ensure_online()?;
        let records = self.records.read().await;
        Ok(records.iter().filter(|r| query.matches(r)).count() as i64)
    }

    async fn update(&self, entity: &T) -> Result<bool> {
        self.ensure_online()?;
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == entity.id()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.ensure_online()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() < before)
    }
}

#[async_trait]
impl PaymentRepository for MemoryRepository<Payment, PaymentQuery> {
    async fn totals(&self, query: &PaymentQuery) -> Result<PaymentTotals> {
        let rows = self.matching(query).await?;
        Ok(PaymentTotals::of(&rows))
    }
}
