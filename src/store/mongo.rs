use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use futures::stream::TryStreamExt;
use mongodb::{Client, Collection, Database};

use super::{Store, StoreError};
use crate::config::DatabaseConfig;
use crate::models::{Bid, NewBid, NewProduct, NewUser, Product};

/// MongoDB-backed store. Holds one long-lived client (internally pooled)
/// shared across all in-flight requests.
pub struct MongoStore {
    db: Database,
    products: Collection<Document>,
    bids: Collection<Document>,
    users: Collection<Document>,
}

impl MongoStore {
    /// Connect and ping once so an unreachable store fails at boot rather
    /// than on the first request.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(&config.uri).await?;
        let db = client.database(&config.database);

        let store = Self {
            products: db.collection("products"),
            bids: db.collection("bids"),
            users: db.collection("users"),
            db,
        };
        store.ping().await?;
        Ok(store)
    }
}

#[async_trait]
impl Store for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn list_products(&self, email: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let filter = match email {
            Some(email) => doc! { "email": email },
            None => doc! {},
        };
        let docs: Vec<Document> = self.products.find(filter).await?.try_collect().await?;
        docs.into_iter().map(product_from_doc).collect()
    }

    async fn latest_products(&self, limit: i64) -> Result<Vec<Product>, StoreError> {
        // No sort on purpose; the route contract is a bounded sample in
        // store-default order.
        let docs: Vec<Document> = self
            .products
            .find(doc! {})
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(product_from_doc).collect()
    }

    async fn all_products(&self, limit: i64) -> Result<Vec<Product>, StoreError> {
        let docs: Vec<Document> = self
            .products
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(product_from_doc).collect()
    }

    async fn product(&self, id: &ObjectId) -> Result<Option<Product>, StoreError> {
        match self.products.find_one(doc! { "_id": id }).await? {
            Some(doc) => Ok(Some(product_from_doc(doc)?)),
            None => Ok(None),
        }
    }

    async fn insert_product(&self, product: &NewProduct) -> Result<String, StoreError> {
        let mut doc = doc! {
            "name": &product.name,
            "price": product.price,
            "created_at": bson::DateTime::from_chrono(product.created_at),
        };
        if let Some(email) = &product.email {
            doc.insert("email", email);
        }
        let result = self.products.insert_one(doc).await?;
        Ok(inserted_hex(result.inserted_id))
    }

    async fn bids_for_product(&self, product_id: &str) -> Result<Vec<Bid>, StoreError> {
        let docs: Vec<Document> = self
            .bids
            .find(doc! { "product": product_id })
            .sort(doc! { "bid_price": -1 })
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(bid_from_doc).collect()
    }

    async fn bids_for_buyer(&self, buyer_email: &str) -> Result<Vec<Bid>, StoreError> {
        let docs: Vec<Document> = self
            .bids
            .find(doc! { "buyer_email": buyer_email })
            .sort(doc! { "bid_price": -1 })
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(bid_from_doc).collect()
    }

    async fn insert_bid(&self, bid: &NewBid) -> Result<String, StoreError> {
        let doc = doc! {
            "product": &bid.product,
            "bid_price": bid.bid_price,
            "buyer_email": &bid.buyer_email,
            "buyer_name": &bid.buyer_name,
            "created_at": bson::DateTime::from_chrono(bid.created_at),
        };
        let result = self.bids.insert_one(doc).await?;
        Ok(inserted_hex(result.inserted_id))
    }

    async fn delete_bid(&self, id: &ObjectId, buyer_email: &str) -> Result<u64, StoreError> {
        // Compound filter: a bid owned by someone else matches nothing, which
        // the handler reports identically to an absent id.
        let result = self
            .bids
            .delete_one(doc! { "_id": id, "buyer_email": buyer_email })
            .await?;
        Ok(result.deleted_count)
    }

    async fn user_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users.find_one(doc! { "email": email }).await?.is_some())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<String, StoreError> {
        let doc = bson::to_document(user)?;
        let result = self.users.insert_one(doc).await?;
        Ok(inserted_hex(result.inserted_id))
    }
}

fn inserted_hex(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    }
}

fn product_from_doc(doc: Document) -> Result<Product, StoreError> {
    Ok(Product {
        id: doc.get_object_id("_id")?.to_hex(),
        name: doc.get_str("name")?.to_string(),
        price: number(&doc, "price")?,
        email: doc.get_str("email").ok().map(ToString::to_string),
        created_at: doc.get_datetime("created_at")?.to_chrono(),
    })
}

fn bid_from_doc(doc: Document) -> Result<Bid, StoreError> {
    Ok(Bid {
        id: doc.get_object_id("_id")?.to_hex(),
        product: doc.get_str("product")?.to_string(),
        bid_price: number(&doc, "bid_price")?,
        buyer_email: doc.get_str("buyer_email")?.to_string(),
        buyer_name: doc.get_str("buyer_name")?.to_string(),
        created_at: doc.get_datetime("created_at")?.to_chrono(),
    })
}

/// Numeric field accessor tolerant of integer-typed documents written by
/// earlier clients.
fn number(doc: &Document, key: &str) -> Result<f64, StoreError> {
    match doc.get(key) {
        Some(Bson::Double(v)) => Ok(*v),
        Some(Bson::Int32(v)) => Ok(f64::from(*v)),
        Some(Bson::Int64(v)) => Ok(*v as f64),
        _ => Err(StoreError::Malformed(format!("field {} is not numeric", key))),
    }
}
