pub mod bids;
pub mod products;
pub mod system;
pub mod users;
