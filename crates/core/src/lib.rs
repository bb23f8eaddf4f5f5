//! Juniper Goods Core - Shared types library.
//!
//! This crate provides common types used across all Juniper Goods components:
//! - `storefront` - Public-facing e-commerce API
//! - `admin` - Internal back-office API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, phone numbers,
//!   and the order/customer status enums
//! - [`models`] - Domain models (products, categories, customers, orders)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use types::*;
