//! # variant-db: SQLite Catalog Store
//!
//! Persists product catalogs and loads them back as
//! [`variant_core::ProductCatalog`] values, ready for
//! [`variant_core::CatalogIndex::build`].
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Variant Resolution Data Flow                        │
//! │                                                                         │
//! │  Product page opens (product_id)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    variant-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │   Repository    │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│  (catalog.rs)   │   │  (embedded)  │  │   │
//! │  │   │ SqlitePool    │    │ CatalogRepo     │   │ 001_catalog  │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductCatalog                         │
//! │                                ▼                                        │
//! │  variant-core: CatalogIndex::build → SelectionState                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use variant_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./catalog.db")).await?;
//!
//! match db.catalogs().load_catalog("tee").await? {
//!     Some(catalog) => { /* build index, start a session */ }
//!     None => { /* unknown product */ }
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;

/// Environment variable overriding the database path.
pub const DB_PATH_ENV: &str = "VARIANT_DB_PATH";

/// Database path used when neither `--db` nor [`DB_PATH_ENV`] is given.
pub const DEFAULT_DB_PATH: &str = "./variant_dev.db";
