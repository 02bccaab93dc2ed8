//! # Error Types
//!
//! Domain-specific error types for caja-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  caja-core errors (this file)                                          │
//! │  ├── PurchaseError    - Why a purchase was refused                     │
//! │  ├── ValidationError  - Input validation failures                      │
//! │  └── ExchangeError    - CSV import/export failures                     │
//! │                                                                         │
//! │  caja-cli errors (app crate)                                           │
//! │  └── CliError         - Config, files, terminal I/O                    │
//! │                                                                         │
//! │  Flow: ValidationError → ExchangeError → CliError → stderr             │
//! │        PurchaseError   → Display message → stdout                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. The `Display` text of every variant is the message shown to the cashier
//! 3. Errors are enum variants, never String
//! 4. A refused purchase is an ordinary value, not a panic

use thiserror::Error;

// =============================================================================
// Purchase Error
// =============================================================================

/// Reasons a purchase can be refused.
///
/// The store checks these in declaration order and reports the first one
/// that applies. None of them changes stock or the sales ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    /// The product name is not in the catalog.
    #[error("'{product}' no está disponible en la tienda.")]
    UnknownProduct { product: String },

    /// Quantity is zero or negative.
    #[error("La cantidad debe ser un número positivo.")]
    InvalidQuantity { quantity: i64 },

    /// Quantity exceeds the units on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// comprar sticker 500
    ///      │
    ///      ▼
    /// Check stock: available=200
    ///      │
    ///      ▼
    /// InsufficientStock { product: "sticker", available: 200, requested: 500 }
    ///      │
    ///      ▼
    /// "No hay suficiente stock de 'sticker'. Stock disponible: 200 unidades."
    /// ```
    #[error("No hay suficiente stock de '{product}'. Stock disponible: {available} unidades.")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while parsing user or file input, before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} es obligatorio")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} no puede superar {max} caracteres")]
    TooLong { field: String, max: usize },

    /// Value could not be parsed.
    #[error("{field} '{value}' no es válido: {reason}")]
    InvalidFormat {
        field: String,
        value: String,
        reason: String,
    },

    /// Value must be zero or greater.
    #[error("{field} no puede ser negativo")]
    Negative { field: String },

    /// Duplicate value (e.g. the same product twice in an inventory file).
    #[error("{field} '{value}' está repetido")]
    Duplicate { field: String, value: String },

    /// Quantity typed at the till is not a whole number.
    #[error("La cantidad debe ser un número entero.")]
    QuantityNotInteger { value: String },

    /// Export file name is blank.
    #[error("El nombre del archivo no puede estar vacío.")]
    EmptyFileName,
}

// =============================================================================
// Exchange Error
// =============================================================================

/// CSV import/export errors.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Malformed CSV or failure of the underlying reader/writer.
    #[error("Error de CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failure flushing the writer.
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// A row has the wrong number of columns.
    #[error("Fila {line}: se esperaban {expected} columnas, hay {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A row parsed but holds an invalid value.
    #[error("Fila {line}: {source}")]
    InvalidRow {
        line: u64,
        #[source]
        source: ValidationError,
    },

    /// The rows parsed but do not form a valid catalog.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The file holds a header but no products.
    #[error("El inventario no contiene productos.")]
    EmptyInventory,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of a purchase attempt.
pub type PurchaseResult<T> = Result<T, PurchaseError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for CSV import/export.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

// =============================================================================
// Unit Tests
// =============================================================================
