//! # Till Commands
//!
//! One line typed at the till is one command:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line typed                     Handler                   Store call    │
//! │  ──────────                     ───────                   ──────────    │
//! │  inventario              ──► inventory::show        ──► render_inventory│
//! │  comprar sticker 5       ──► sale::purchase         ──► purchase        │
//! │  informe [--json]        ──► sale::report           ──► sales_report    │
//! │  exportar-ventas f.csv   ──► sale::export           ──► write_sales_csv │
//! │  exportar-inventario f   ──► inventory::export      ──► write_inv...csv │
//! │  salir [--guardar i v]   ──► both exports, then end of session          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod inventory;
pub mod sale;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use caja_core::validation::validate_csv_filename;
use caja_core::{Clock, Store};
use clap::{Parser, Subcommand};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// A single till line, parsed without a binary name.
#[derive(Debug, Parser)]
#[command(name = "caja", no_binary_name = true, disable_version_flag = true)]
pub struct TillLine {
    #[command(subcommand)]
    pub command: TillCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum TillCommand {
    /// Muestra el inventario
    Inventario,

    /// Vende un producto: comprar <producto> <cantidad>
    // last word is the quantity, the rest is the name: `comprar post it 2`
    Comprar {
        /// Producto seguido de las unidades (número entero)
        #[arg(num_args = 2.., required = true, allow_hyphen_values = true)]
        palabras: Vec<String>,
    },

    /// Muestra el informe de ventas
    Informe {
        /// Informe de ingresos en JSON
        #[arg(long)]
        json: bool,
    },

    /// Exporta el informe de ventas a CSV
    ExportarVentas { archivo: String },

    /// Exporta el inventario a CSV
    ExportarInventario { archivo: String },

    /// Termina la sesión
    Salir {
        /// Exporta inventario y ventas antes de salir
        #[arg(long, num_args = 2, value_names = ["INVENTARIO", "VENTAS"])]
        guardar: Option<Vec<String>>,
    },
}

/// Splits the words after `comprar` into product name and quantity.
///
/// Surrounding double quotes on the name are dropped.
pub fn split_purchase(palabras: &[String]) -> (String, &str) {
    match palabras.split_last() {
        Some((cantidad, nombre)) => {
            let nombre = nombre.join(" ");
            let nombre = match nombre.strip_prefix('"').and_then(|n| n.strip_suffix('"')) {
                Some(inner) => inner.to_string(),
                None => nombre,
            };
            (nombre, cantidad.as_str())
        }
        None => (String::new(), ""),
    }
}

/// Whether the session keeps reading lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// An interactive till bound to one store and one output.
pub struct Session<C: Clock, W: Write> {
    store: Store<C>,
    store_name: String,
    out: W,
}

impl<C: Clock, W: Write> Session<C, W> {
    pub fn new(store: Store<C>, store_name: impl Into<String>, out: W) -> Self {
        Self {
            store,
            store_name: store_name.into(),
            out,
        }
    }

    pub fn store(&self) -> &Store<C> {
        &self.store
    }

    pub fn into_parts(self) -> (Store<C>, W) {
        (self.store, self.out)
    }

    /// Reads commands until EOF or `salir`.
    pub fn run<R: BufRead>(&mut self, input: R) -> CliResult<()> {
        writeln!(
            self.out,
            "{}: escriba 'help' para ver los comandos.",
            self.store_name
        )?;

        for line in input.lines() {
            let line = line?;
            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            match TillLine::try_parse_from(words) {
                Ok(parsed) => {
                    if self.execute(parsed.command)? == Flow::Exit {
                        break;
                    }
                }
                Err(err) => write!(self.out, "{err}")?,
            }
        }

        self.out.flush()?;
        Ok(())
    }

    /// Runs one command and prints its result.
    ///
    /// Mistakes in what the user typed are printed and the session goes on;
    /// only failures writing to the terminal are returned.
    pub fn execute(&mut self, command: TillCommand) -> CliResult<Flow> {
        debug!(?command, "Till command");

        let message = match command {
            TillCommand::Inventario => inventory::show(&self.store),
            TillCommand::Comprar { palabras } => {
                let (producto, cantidad) = split_purchase(&palabras);
                sale::purchase(&mut self.store, &producto, cantidad)
            }
            TillCommand::Informe { json } => sale::report(&self.store, json)?,
            TillCommand::ExportarVentas { archivo } => sale::export(&self.store, &archivo),
            TillCommand::ExportarInventario { archivo } => {
                inventory::export(&self.store, &archivo)
            }
            TillCommand::Salir { guardar: None } => return Ok(Flow::Exit),
            TillCommand::Salir {
                guardar: Some(archivos),
            } => {
                if let [inventario, ventas] = archivos.as_slice() {
                    let saved = inventory::export(&self.store, inventario);
                    writeln!(self.out, "{saved}")?;
                    let saved = sale::export(&self.store, ventas);
                    writeln!(self.out, "{saved}")?;
                }
                return Ok(Flow::Exit);
            }
        };

        writeln!(self.out, "{message}")?;
        Ok(Flow::Continue)
    }
}

/// Resolves an export file name to a path whose directory exists.
fn export_target(archivo: &str) -> CliResult<PathBuf> {
    let path = PathBuf::from(validate_csv_filename(archivo)?);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            return Err(CliError::MissingDirectory(dir.display().to_string()));
        }
    }
    Ok(path)
}

/// Till message for a failed export.
fn export_failure(what: &str, err: CliError) -> String {
    if err.is_user_error() {
        err.to_string()
    } else {
        format!("Ha ocurrido un error al exportar {what}: {err}")
    }
}
