//! # caja-core: Pure Business Logic for Caja POS
//!
//! This crate is the **heart** of the Caja till simulator: a small product
//! catalog, purchases against its stock, and a dated sales log.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Caja POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    caja-cli (interactive till)                  │   │
//! │  │    inventario ──► comprar ──► informe ──► exportar-*            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &mut Store                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ caja-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │  │   money   │  │  exchange │  │   clock   │  │   │
//! │  │   │  catalog  │  │   Money   │  │  CSV in/  │  │  Clock    │  │   │
//! │  │   │  ledger   │  │  S/x.xx   │  │  CSV out  │  │  injected │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILES • NO WALL CLOCK IN LOGIC • NO GLOBAL STATE          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The `Store`: inventory table, purchase, sales report
//! - [`types`] - Domain types (Product, SaleRecord, Receipt, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`clock`] - Injectable time source for sale timestamps
//! - [`exchange`] - CSV import/export of inventory and sales
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use caja_core::clock::FixedClock;
//! use caja_core::{PurchaseError, Store};
//! use chrono::NaiveDate;
//!
//! let clock = FixedClock::new(
//!     NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap(),
//! );
//! let mut store = Store::with_clock(clock);
//!
//! let receipt = store.purchase("sticker", 5).unwrap();
//! assert_eq!(receipt.to_string(), "El precio total de 5 'sticker' es: S/5.00");
//! assert_eq!(store.product("sticker").unwrap().stock, 195);
//!
//! let refused = store.purchase("widget", 1).unwrap_err();
//! assert!(matches!(refused, PurchaseError::UnknownProduct { .. }));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod clock;
pub mod error;
pub mod exchange;
pub mod money;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ExchangeError, PurchaseError, ValidationError};
pub use money::Money;
pub use store::Store;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol printed before every amount (Peruvian sol).
pub const CURRENCY_SYMBOL: &str = "S/";

/// Longest product name accepted from an inventory file.
pub const MAX_PRODUCT_NAME_LEN: usize = 60;

/// Inventory a fresh store starts with: (name, price in céntimos, stock).
pub const DEFAULT_INVENTORY: &[(&str, i64, i64)] = &[
    ("pulsera", 300, 50),
    ("sticker", 100, 200),
    ("llavero", 1000, 12),
    ("postit", 350, 12),
];
