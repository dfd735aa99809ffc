use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored bid. `product` references a product id as a plain string; it is
/// not enforced as a foreign key.
#[derive(Debug, Clone, Serialize)]
pub struct Bid {
    pub id: String,
    pub product: String,
    pub bid_price: f64,
    pub buyer_email: String,
    pub buyer_name: String,
    pub created_at: DateTime<Utc>,
}

/// A bid ready for insertion. Buyer identity comes from the verified token,
/// never from the request body.
#[derive(Debug, Clone)]
pub struct NewBid {
    pub product: String,
    pub bid_price: f64,
    pub buyer_email: String,
    pub buyer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for POST /bids. There are deliberately no buyer fields here:
/// anything the client sends for buyer_email or buyer_name is dropped at
/// deserialization and replaced with the authenticated identity.
#[derive(Debug, Deserialize)]
pub struct PlaceBid {
    pub product: String,
    pub bid_price: f64,
}
