// Service exports
pub mod appwrite;
pub mod directory;
pub mod postgres;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use directory::{Directory, DirectoryError, InMemoryDirectory};
pub use postgres::{PostgresClient, PostgresError};
