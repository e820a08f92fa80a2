// src/core/mod.rs
//! Configuration, persistence and file storage

pub mod config_manager;
pub mod database;
pub mod fs_ops;
pub mod profile_store;

pub use config_manager::ConfigManager;
pub use database::Database;
pub use fs_ops::{FileStore, FsOps};
pub use profile_store::{ProfileStore, SqliteProfileStore};
