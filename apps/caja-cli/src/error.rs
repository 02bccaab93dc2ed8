//! # CLI Error Type
//!
//! Everything that can go wrong outside the store itself.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  toml / io / csv errors                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CliError (this module)                                                 │
//! │       │                                                                 │
//! │       ├── during a till command → printed, session continues            │
//! │       └── during startup        → printed to stderr, exit code 1        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Refused purchases never reach this type: they are ordinary
//! `PurchaseError` values printed as till messages.

use caja_core::{ExchangeError, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration values are unusable.
    #[error("Configuración inválida: {0}")]
    InvalidConfig(String),

    /// Config file is not valid TOML for `CliConfig`.
    #[error("No se pudo leer la configuración: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// A file the user pointed at does not exist.
    #[error("El archivo '{0}' no existe.")]
    MissingFile(String),

    /// The parent directory of an export target does not exist.
    #[error("La ruta del archivo '{0}' no existe.")]
    MissingDirectory(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error("Error al generar JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Whether the error comes from what the user typed, as opposed to a
    /// failure while reading or writing.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CliError::Validation(_) | CliError::MissingDirectory(_) | CliError::MissingFile(_)
        )
    }
}

pub type CliResult<T> = Result<T, CliError>;
