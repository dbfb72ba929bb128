pub mod dbs;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;

pub use error::{PersistError, Result};
pub use memory::InMemoryHistoryStore;
pub use models::{Thread, ThreadMetadata, Turn};
pub use store::HistoryStore;

#[cfg(feature = "mongodb")]
pub use dbs::mongo::MongoHistoryStore;
