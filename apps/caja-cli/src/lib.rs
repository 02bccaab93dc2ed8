//! # Caja Till Library
//!
//! Startup and session wiring for the `caja` binary.
//!
//! ## Module Organization
//! ```text
//! caja_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Layered configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Till line parsing, Session loop
//! │   ├── inventory.rs◄─── inventario, exportar-inventario
//! │   └── sale.rs     ◄─── comprar, informe, exportar-ventas
//! └── error.rs        ◄─── CliError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load config: defaults → caja.toml → CAJA_* env → flags              │
//! │  2. Initialize logging (stderr, RUST_LOG or logging.filter)             │
//! │  3. Build the Store: inventory CSV if configured, else built-in         │
//! │  4. Run the Session over stdin/stdout until EOF or `salir`              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use caja_core::{Store, SystemClock};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::Session;
use config::CliConfig;
use error::{CliError, CliResult};

/// Process arguments.
#[derive(Debug, Parser)]
#[command(name = "caja", version, about = "Simulador de caja de venta")]
pub struct Args {
    /// Archivo de configuración (caja.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSV con el inventario inicial (Producto,Precio,Cantidad)
    #[arg(long)]
    pub inventory: Option<PathBuf>,

    /// Nombre de la tienda
    #[arg(long)]
    pub store_name: Option<String>,
}

/// Runs the till until stdin closes or the cashier types `salir`.
pub fn run(args: Args) -> CliResult<()> {
    let mut config = CliConfig::load(args.config.clone())?;
    config.apply_args(&args)?;

    init_tracing(&config.logging.filter);
    info!(store = %config.store.name, "Starting Caja till");

    let store = open_store(&config)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(store, config.store.name.clone(), stdout.lock());
    session.run(stdin.lock())?;

    info!(sales = session.store().sales_count(), "Till closed");
    Ok(())
}

/// Builds the store from the configured inventory CSV, or the built-in one.
pub fn open_store(config: &CliConfig) -> CliResult<Store<SystemClock>> {
    let Some(path) = &config.store.inventory_path else {
        return Ok(Store::new());
    };

    if !path.exists() {
        return Err(CliError::MissingFile(path.display().to_string()));
    }

    let file = File::open(path)?;
    let store = Store::from_inventory_csv(BufReader::new(file), SystemClock)?;
    info!(?path, products = store.products().len(), "Inventory loaded");
    Ok(store)
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=caja_core=debug` - Every purchase attempt
/// - `RUST_LOG=caja_core=info` - Completed sales and exports
/// - Default: `logging.filter` from config (`warn`)
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
