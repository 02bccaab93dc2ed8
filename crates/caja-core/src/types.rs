//! # Domain Types
//!
//! Core domain types used throughout Caja POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                     Ledger                                     │
//! │  ┌─────────────────┐         ┌─────────────────┐                        │
//! │  │    Product      │         │    SalesDay     │                        │
//! │  │  ─────────────  │         │  ─────────────  │                        │
//! │  │  name (key)     │◄────┐   │  date (key)     │                        │
//! │  │  price (Money)  │     │   │  sales ─────────┼──► SaleRecord          │
//! │  │  stock (i64)    │     │   └─────────────────┘    time, quantity,     │
//! │  └─────────────────┘     └──────────────────────── product, unit_price  │
//! │                                                                         │
//! │  Outputs: Receipt (one purchase), SalesReport (revenue per sale)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique name, also the key the cashier types.
    pub name: String,

    /// Unit price. Fixed for the lifetime of the store.
    pub price: Money,

    /// Units on hand. Never negative.
    pub stock: i64,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            name: name.into(),
            price,
            stock,
        }
    }

    /// Checks if `quantity` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// One successful purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRecord {
    /// Time of day, `HH:MM:SS`.
    pub time: String,

    /// Name of the catalog product sold.
    pub product: String,

    /// Units sold, always > 0.
    pub quantity: i64,

    /// Price per unit when the sale happened.
    pub unit_price: Money,
}

impl SaleRecord {
    /// Revenue of this sale.
    #[inline]
    pub fn income(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// All sales recorded on one calendar date, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesDay {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub sales: Vec<SaleRecord>,
}

// =============================================================================
// Receipt
// =============================================================================

/// Result of an accepted purchase.
///
/// `Display` renders the message shown at the till:
/// `El precio total de 5 'sticker' es: S/5.00`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    pub product: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "El precio total de {} '{}' es: {}",
            self.quantity, self.product, self.total
        )
    }
}

// =============================================================================
// Sales Report
// =============================================================================

/// One line of the revenue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReportRow {
    pub date: String,
    pub time: String,
    pub product: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub income: Money,
}

/// Revenue per sale plus the store total.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    pub rows: Vec<SalesReportRow>,
    pub total_income: Money,
}

impl SalesReport {
    /// Footer line printed under the report table.
    pub fn total_line(&self) -> String {
        format!("Ingreso Total de la Tienda: {}", self.total_income)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
