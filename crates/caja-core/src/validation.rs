//! # Validation Module
//!
//! Input validation utilities for Caja POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Till input (caja-cli)                                        │
//! │  ├── parse_quantity: "1.5" → "La cantidad debe ser un número entero."  │
//! │  └── validate_csv_filename: blank names, missing .csv suffix           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Inventory import (THIS MODULE)                               │
//! │  ├── validate_product_name                                             │
//! │  └── parse_stock                                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store::purchase                                              │
//! │  └── unknown product → non-positive quantity → insufficient stock      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_PRODUCT_NAME_LEN;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_PRODUCT_NAME_LEN` characters
///
/// ```rust
/// use caja_core::validation::validate_product_name;
///
/// assert!(validate_product_name("pulsera").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "producto".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "producto".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Normalizes an export file name.
///
/// Blank names are rejected and `.csv` is appended when missing. Whether the
/// parent directory exists is the caller's concern.
///
/// ```rust
/// use caja_core::validation::validate_csv_filename;
///
/// assert_eq!(validate_csv_filename("ventas").unwrap(), "ventas.csv");
/// assert_eq!(validate_csv_filename("out/inv.csv").unwrap(), "out/inv.csv");
/// assert!(validate_csv_filename("   ").is_err());
/// ```
pub fn validate_csv_filename(filename: &str) -> ValidationResult<String> {
    let filename = filename.trim();

    if filename.is_empty() {
        return Err(ValidationError::EmptyFileName);
    }

    if filename.ends_with(".csv") {
        Ok(filename.to_string())
    } else {
        Ok(format!("{filename}.csv"))
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses the quantity typed at the till.
///
/// Only whole numbers are accepted; `"1.5"` or `"dos"` fail here so that the
/// store never sees a fractional quantity. Sign is left to the store, which
/// reports non-positive quantities itself.
///
/// ```rust
/// use caja_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity("5").unwrap(), 5);
/// assert_eq!(parse_quantity("-3").unwrap(), -3);
/// assert!(parse_quantity("1.5").is_err());
/// ```
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let raw = input.trim();
    raw.parse::<i64>()
        .map_err(|_| ValidationError::QuantityNotInteger {
            value: raw.to_string(),
        })
}

/// Parses a stock level from an inventory file.
///
/// ## Rules
/// - Whole number
/// - Zero or greater
pub fn parse_stock(input: &str) -> ValidationResult<i64> {
    let raw = input.trim();
    let stock = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "cantidad".to_string(),
            value: raw.to_string(),
            reason: "debe ser un número entero".to_string(),
        })?;

    if stock < 0 {
        return Err(ValidationError::Negative {
            field: "cantidad".to_string(),
        });
    }

    Ok(stock)
}

// =============================================================================
// Unit Tests
// =============================================================================
