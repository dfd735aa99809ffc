use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::models::{Bid, NewBid, NewProduct, NewUser, Product};

pub mod memory;
pub mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Mongo(#[from] mongodb::error::Error),
    #[error("malformed document: {0}")]
    Document(#[from] bson::document::ValueAccessError),
    #[error("malformed document: {0}")]
    Malformed(String),
    #[error("serialization error: {0}")]
    Serialize(#[from] bson::ser::Error),
}

/// Access to the three collections backing the service. A single long-lived
/// implementation is shared by all in-flight requests, so implementors must
/// be safe for concurrent use. Handlers receive it as an injected dependency,
/// which lets tests substitute [`MemoryStore`].
#[async_trait]
pub trait Store: Send + Sync {
    /// Connection liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    // products
    async fn list_products(&self, email: Option<&str>) -> Result<Vec<Product>, StoreError>;
    /// Bounded sample in store-default order; no ordering is guaranteed.
    async fn latest_products(&self, limit: i64) -> Result<Vec<Product>, StoreError>;
    /// Bounded set ordered by creation time ascending.
    async fn all_products(&self, limit: i64) -> Result<Vec<Product>, StoreError>;
    async fn product(&self, id: &ObjectId) -> Result<Option<Product>, StoreError>;
    async fn insert_product(&self, product: &NewProduct) -> Result<String, StoreError>;

    // bids
    async fn bids_for_product(&self, product_id: &str) -> Result<Vec<Bid>, StoreError>;
    /// All bids for one buyer, bid price descending.
    async fn bids_for_buyer(&self, buyer_email: &str) -> Result<Vec<Bid>, StoreError>;
    async fn insert_bid(&self, bid: &NewBid) -> Result<String, StoreError>;
    /// Delete scoped by id AND owner; returns how many records matched, so
    /// the caller can treat zero as not-found-or-not-owned.
    async fn delete_bid(&self, id: &ObjectId, buyer_email: &str) -> Result<u64, StoreError>;

    // users
    async fn user_exists(&self, email: &str) -> Result<bool, StoreError>;
    async fn insert_user(&self, user: &NewUser) -> Result<String, StoreError>;
}
