use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body for POST /users: an email plus whatever profile fields the
/// client sends. Uniqueness is by email, checked with a pre-insert existence
/// query rather than a database constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}
