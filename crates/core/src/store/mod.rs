//! Store module - the persisted document behind a storage seam.

mod app_store;
mod store_traits;

pub use app_store::{backup_file_name, AppStore};
pub use store_traits::{DocumentStorage, InMemoryDocumentStorage};
