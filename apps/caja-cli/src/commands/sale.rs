//! Sale commands: `comprar`, `informe`, `exportar-ventas`.

use std::fs::File;
use std::io::BufWriter;

use caja_core::validation::parse_quantity;
use caja_core::{Clock, Store};
use tracing::info;

use super::{export_failure, export_target};
use crate::error::CliResult;

/// Sells `cantidad` units of `producto` and returns the till message.
///
/// A quantity that is not a whole number never reaches the store.
pub fn purchase<C: Clock>(store: &mut Store<C>, producto: &str, cantidad: &str) -> String {
    match parse_quantity(cantidad) {
        Ok(quantity) => store.purchase_message(producto, quantity),
        Err(err) => err.to_string(),
    }
}

/// Sales log table plus the income footer, or the revenue report as JSON.
pub fn report<C: Clock>(store: &Store<C>, json: bool) -> CliResult<String> {
    let report = store.sales_report();
    if json {
        return Ok(serde_json::to_string_pretty(&report)?);
    }
    Ok(format!(
        "{}\n{}",
        store.render_sales_report(),
        report.total_line()
    ))
}

/// Writes the sales CSV and returns the till message.
pub fn export<C: Clock>(store: &Store<C>, archivo: &str) -> String {
    let written = export_target(archivo).and_then(|path| {
        let file = File::create(&path)?;
        store.write_sales_csv(BufWriter::new(file))?;
        Ok(path)
    });

    match written {
        Ok(path) => {
            info!(?path, sales = store.sales_count(), "Sales report exported");
            format!("El informe de ventas ha sido exportado a {}", path.display())
        }
        Err(err) => export_failure("el informe", err),
    }
}
