use std::sync::RwLock;

use async_trait::async_trait;
use bson::oid::ObjectId;
use serde_json::{Map, Value};

use super::{Store, StoreError};
use crate::models::{Bid, NewBid, NewProduct, NewUser, Product};

/// In-memory store substitute for tests and local development. Insertion
/// order is preserved, and sorts are stable, so ties keep arrival order.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    products: Vec<Product>,
    bids: Vec<Bid>,
    users: Vec<StoredUser>,
}

struct StoredUser {
    #[allow(dead_code)]
    id: String,
    email: String,
    #[allow(dead_code)]
    profile: Map<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test support: how many user documents carry this email.
    pub fn user_count(&self, email: &str) -> usize {
        self.read().users.iter().filter(|u| u.email == email).count()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("memory store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("memory store lock poisoned")
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_products(&self, email: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let inner = self.read();
        Ok(inner
            .products
            .iter()
            .filter(|p| match email {
                Some(email) => p.email.as_deref() == Some(email),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn latest_products(&self, limit: i64) -> Result<Vec<Product>, StoreError> {
        let inner = self.read();
        Ok(inner
            .products
            .iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn all_products(&self, limit: i64) -> Result<Vec<Product>, StoreError> {
        let inner = self.read();
        let mut products: Vec<Product> = inner.products.clone();
        products.sort_by_key(|p| p.created_at);
        products.truncate(limit.max(0) as usize);
        Ok(products)
    }

    async fn product(&self, id: &ObjectId) -> Result<Option<Product>, StoreError> {
        let hex = id.to_hex();
        let inner = self.read();
        Ok(inner.products.iter().find(|p| p.id == hex).cloned())
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<String, StoreError> {
        let id = ObjectId::new().to_hex();
        self.write().products.push(Product {
            id: id.clone(),
            name: product.name.clone(),
            price: product.price,
            email: product.email.clone(),
            created_at: product.created_at,
        });
        Ok(id)
    }

    async fn bids_for_product(&self, product_id: &str) -> Result<Vec<Bid>, StoreError> {
        let inner = self.read();
        let mut bids: Vec<Bid> = inner
            .bids
            .iter()
            .filter(|b| b.product == product_id)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.bid_price.total_cmp(&a.bid_price));
        Ok(bids)
    }

    async fn bids_for_buyer(&self, buyer_email: &str) -> Result<Vec<Bid>, StoreError> {
        let inner = self.read();
        let mut bids: Vec<Bid> = inner
            .bids
            .iter()
            .filter(|b| b.buyer_email == buyer_email)
            .cloned()
            .collect();
        bids.sort_by(|a, b| b.bid_price.total_cmp(&a.bid_price));
        Ok(bids)
    }

    async fn insert_bid(&self, bid: &NewBid) -> Result<String, StoreError> {
        let id = ObjectId::new().to_hex();
        self.write().bids.push(Bid {
            id: id.clone(),
            product: bid.product.clone(),
            bid_price: bid.bid_price,
            buyer_email: bid.buyer_email.clone(),
            buyer_name: bid.buyer_name.clone(),
            created_at: bid.created_at,
        });
        Ok(id)
    }

    async fn delete_bid(&self, id: &ObjectId, buyer_email: &str) -> Result<u64, StoreError> {
        let hex = id.to_hex();
        let mut inner = self.write();
        let before = inner.bids.len();
        inner
            .bids
            .retain(|b| !(b.id == hex && b.buyer_email == buyer_email));
        Ok((before - inner.bids.len()) as u64)
    }

    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.read().users.iter().any(|u| u.email == email))
    }

    async fn insert_user(&self, user: &NewUser) -> Result<String, StoreError> {
        let id = ObjectId::new().to_hex();
        self.write().users.push(StoredUser {
            id: id.clone(),
            email: user.email.clone(),
            profile: user.profile.clone(),
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn bid(product: &str, price: f64, buyer: &str) -> NewBid {
        NewBid {
            product: product.to_string(),
            bid_price: price,
            buyer_email: buyer.to_string(),
            buyer_name: buyer.split('@').next().unwrap_or(buyer).to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn buyer_bids_sort_descending_with_stable_ties() {
        let store = MemoryStore::new();
        let first = store.insert_bid(&bid("p1", 10.0, "a@x.com")).await.unwrap();
        let second = store.insert_bid(&bid("p2", 25.0, "a@x.com")).await.unwrap();
        let third = store.insert_bid(&bid("p3", 10.0, "a@x.com")).await.unwrap();

        let bids = store.bids_for_buyer("a@x.com").await.unwrap();
        let ids: Vec<&str> = bids.iter().map(|b| b.id.as_str()).collect();
        // Highest price first; the two 10.0 bids keep insertion order.
        assert_eq!(ids, vec![second.as_str(), first.as_str(), third.as_str()]);
    }

    #[tokio::test]
    async fn delete_requires_matching_owner() {
        let store = MemoryStore::new();
        let id = store.insert_bid(&bid("p1", 5.0, "owner@x.com")).await.unwrap();
        let oid = ObjectId::parse_str(&id).unwrap();

        assert_eq!(store.delete_bid(&oid, "other@x.com").await.unwrap(), 0);
        assert_eq!(store.delete_bid(&oid, "owner@x.com").await.unwrap(), 1);
        assert_eq!(store.delete_bid(&oid, "owner@x.com").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn all_products_orders_by_creation_time() {
        use chrono::Duration;
        let store = MemoryStore::new();
        let base = Utc::now();
        for offset in [3i64, 1, 2] {
            store
                .insert_product(&NewProduct {
                    name: format!("p{}", offset),
                    price: 1.0,
                    email: None,
                    created_at: base + Duration::seconds(offset),
                })
                .await
                .unwrap();
        }

        let products = store.all_products(21).await.unwrap();
        let names: Vec<&str> = products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["p1", "p2", "p3"]);
    }
}
