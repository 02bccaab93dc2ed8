//! Inventory commands: `inventario`, `exportar-inventario`.

use std::fs::File;
use std::io::BufWriter;

use caja_core::{Clock, Store};
use tracing::info;

use super::{export_failure, export_target};

pub fn show<C: Clock>(store: &Store<C>) -> String {
    store.render_inventory()
}

/// Writes the inventory CSV and returns the till message.
pub fn export<C: Clock>(store: &Store<C>, archivo: &str) -> String {
    let written = export_target(archivo).and_then(|path| {
        let file = File::create(&path)?;
        store.write_inventory_csv(BufWriter::new(file))?;
        Ok(path)
    });

    match written {
        Ok(path) => {
            info!(?path, "Inventory exported");
            format!("El inventario ha sido exportado a {}", path.display())
        }
        Err(err) => export_failure("el inventario", err),
    }
}
