use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored product. The id is the store-assigned ObjectId in hex form.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    /// Owning email, when the seller supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A product ready for insertion, creation time already stamped server-side.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request body for POST /products. Creation time is never accepted from the
/// client; the handler stamps it.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub email: Option<String>,
}

impl CreateProduct {
    pub fn into_new(self, created_at: DateTime<Utc>) -> NewProduct {
        NewProduct {
            name: self.name,
            price: self.price,
            email: self.email,
            created_at,
        }
    }
}
