//! # Repository Module
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product page loader                                                    │
//! │       │                                                                 │
//! │       │  db.catalogs().load_catalog("tee")                              │
//! │       ▼                                                                 │
//! │  CatalogRepository                                                      │
//! │  ├── load_catalog(&self, product_id)                                    │
//! │  ├── load_index(&self, product_id)                                      │
//! │  ├── insert_catalog(&self, catalog)                                     │
//! │  ├── update_variant_stock(&self, product_id, variant_id, stock)         │
//! │  └── count_products(&self)                                              │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogRepository`] - Catalog load/store and stock updates

pub mod catalog;
