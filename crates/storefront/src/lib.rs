//! Gymtastic Storefront - stateful containers and backend clients.
//!
//! This crate holds everything with side effects:
//!
//! - [`cart`] - The persistent shopping cart
//! - [`session`] - The persistent login session and role checks
//! - [`storage`] - Key-value persistence behind both containers
//! - [`api`] - REST clients for the catalog, user and checkout services
//! - [`checkout`] - Turning the cart into an order
//! - [`config`] - Environment configuration
//! - [`error`] - The unified [`AppError`]
//!
//! Pure rules (cart arithmetic, validation, formatting, locations) live in
//! `gymtastic-core`.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

pub use cart::CartStore;
pub use checkout::{CheckoutError, place_order};
pub use config::{ApiConfig, ConfigError, StorefrontConfig};
pub use error::AppError;
pub use session::{AccessError, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
