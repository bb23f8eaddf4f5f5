//! Models used by the admin API.
//!
//! The domain models are shared with the storefront binary via
//! `juniper_goods_core::models`; only session-stored types live here.

pub mod session;

pub use juniper_goods_core::models::{
    Category, Customer, Order, OrderLineItem, Product, ShippingAddress,
};
pub use session::{CurrentAdmin, session_keys};
