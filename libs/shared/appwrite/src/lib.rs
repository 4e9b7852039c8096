pub mod client;
pub mod query;

pub use client::{AppwriteClient, DocumentList, GatewayError, StoredFile, UserList};
pub use query::Query;
