//! Models used by the storefront.
//!
//! The domain models are shared with the admin binary via
//! `juniper_goods_core::models`; only session-stored types live here.

pub mod session;

pub use juniper_goods_core::models::{
    Category, Customer, Order, OrderLineItem, Product, ShippingAddress,
};
pub use session::{CurrentCustomer, session_keys};
