//! File storage adapters

pub mod disk;

pub use disk::{DiskFileStore, StorageError, UploadKind};
