pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod router;
pub mod service;

pub use db::{InventoryStore, StockUnit};
pub use error::StoreError;
