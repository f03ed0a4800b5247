use std::cmp::Ordering;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::Result;

/// A persisted entity owned by the store
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

/// Store-side predicate with its sort order and row cap.
///
/// `matches`/`order` define the semantics; SQL-backed repositories must
/// translate them faithfully.
pub trait RecordQuery<T>: Send + Sync {
    fn matches(&self, record: &T) -> bool;

    fn order(&self, a: &T, b: &T) -> Ordering;

    fn limit(&self) -> Option<usize> {
        None
    }
}

/// Base repository trait for CRUD operations
/// All entity repositories implement this trait for consistency
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    type Query: RecordQuery<T>;

    /// Insert a new entity
    async fn create(&self, entity: &T) -> Result<()>;

    /// Find entity by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>>;

    /// Fetch every entity whose ID is in `ids` (unknown IDs are skipped)
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<T>>;

    /// Filter, sort and cap
    async fn list(&self, query: &Self::Query) -> Result<Vec<T>>;

    /// Count matching entities (limit is ignored)
    async fn count(&self, query: &Self::Query) -> Result<i64>;

    /// Replace an existing entity; false when no row matched
    async fn update(&self, entity: &T) -> Result<bool>;

    /// Delete an entity by ID; false when no row matched
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
