//! Gymtastic Core - Shared domain library.
//!
//! This crate provides the domain used across all Gymtastic components:
//! - `storefront` - Cart and session containers, service clients, checkout
//! - `cli` - Command-line storefront and back-office
//!
//! # Architecture
//!
//! The core crate contains types, pure rules and form helpers - no I/O, no
//! storage, no HTTP clients. Persistence of the cart and the session lives
//! in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, emails, stock and labels
//! - [`product`], [`user`], [`order`] - Catalog, account and order records
//! - [`cart`] - Cart lines and the merge/clamp rules over them
//! - [`validation`] - Registration, login and checkout form checks
//! - [`format`] - Currency and stock display
//! - [`location`] - Static region and commune lookup

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod format;
pub mod location;
pub mod order;
pub mod product;
pub mod types;
pub mod user;
pub mod validation;

pub use cart::{Cart, CartError, CartLine, QuantityChange};
pub use order::{CustomerDetails, Order, OrderId};
pub use product::Product;
pub use types::*;
pub use user::User;
