pub mod bid;
pub mod product;
pub mod user;

pub use bid::{Bid, NewBid, PlaceBid};
pub use product::{CreateProduct, NewProduct, Product};
pub use user::NewUser;
