//! # CSV Exchange
//!
//! Import and export of the catalog and the sales log as CSV.
//!
//! Everything here works over `std::io::Read`/`Write`; opening files is the
//! caller's job.
//!
//! ## Formats
//! ```text
//! inventory.csv                      ventas.csv
//! ─────────────────────────          ─────────────────────────────────────────────────────────
//! Producto,Precio,Cantidad           Fecha,Hora,Producto,Precio,Cantidad Vendida,Ingresos
//! pulsera,3.00,50                    2024-05-01,09:30:00,sticker,S/1.00,5,S/5.00
//! postit,3.50,12
//! ```

use std::io::{Read, Write};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::error::{ExchangeError, ExchangeResult, ValidationError};
use crate::money::Money;
use crate::store::Store;
use crate::types::Product;
use crate::validation::{parse_stock, validate_product_name};

/// Header row of the inventory file.
pub const INVENTORY_HEADER: [&str; 3] = ["Producto", "Precio", "Cantidad"];

/// Header row of the sales file.
pub const SALES_HEADER: [&str; 6] = [
    "Fecha",
    "Hora",
    "Producto",
    "Precio",
    "Cantidad Vendida",
    "Ingresos",
];

impl<C: Clock> Store<C> {
    /// Builds a store whose catalog is read from an inventory CSV.
    ///
    /// The first row is a header and is skipped. Every other row must be
    /// `name,price,stock`. Errors carry the 1-based line number.
    pub fn from_inventory_csv<R: Read>(reader: R, clock: C) -> ExchangeResult<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let product = parse_inventory_row(&record, line)?;
            if products.iter().any(|p: &Product| p.name == product.name) {
                return Err(ExchangeError::InvalidRow {
                    line,
                    source: ValidationError::Duplicate {
                        field: "producto".to_string(),
                        value: product.name,
                    },
                });
            }
            products.push(product);
        }

        if products.is_empty() {
            return Err(ExchangeError::EmptyInventory);
        }

        let store = Store::with_products(products, clock)?;
        info!(products = store.products().len(), "Inventory loaded from CSV");
        Ok(store)
    }

    /// Writes the catalog as CSV, prices as plain two-decimal numbers.
    pub fn write_inventory_csv<W: Write>(&self, writer: W) -> ExchangeResult<()> {
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(INVENTORY_HEADER)?;
        for product in self.products() {
            writer.write_record([
                product.name.as_str(),
                product.price.amount().as_str(),
                product.stock.to_string().as_str(),
            ])?;
        }
        writer.flush()?;
        debug!(rows = self.products().len(), "Inventory exported");
        Ok(())
    }

    /// Writes the revenue report as CSV, money columns as `S/x.xx`.
    pub fn write_sales_csv<W: Write>(&self, writer: W) -> ExchangeResult<()> {
        let report = self.sales_report();
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(SALES_HEADER)?;
        for row in &report.rows {
            writer.write_record([
                row.date.as_str(),
                row.time.as_str(),
                row.product.as_str(),
                row.unit_price.to_string().as_str(),
                row.quantity.to_string().as_str(),
                row.income.to_string().as_str(),
            ])?;
        }
        writer.flush()?;
        debug!(rows = report.rows.len(), "Sales report exported");
        Ok(())
    }
}

fn parse_inventory_row(record: &StringRecord, line: u64) -> ExchangeResult<Product> {
    if record.len() != INVENTORY_HEADER.len() {
        return Err(ExchangeError::ColumnCount {
            line,
            expected: INVENTORY_HEADER.len(),
            found: record.len(),
        });
    }
    let invalid = |source| ExchangeError::InvalidRow { line, source };

    let name = &record[0];
    validate_product_name(name).map_err(invalid)?;
    let price = Money::parse_decimal(&record[1]).map_err(invalid)?;
    let stock = parse_stock(&record[2]).map_err(invalid)?;
    if price.checked_multiply_quantity(stock).is_none() {
        return Err(invalid(ValidationError::InvalidFormat {
            field: "cantidad".to_string(),
            value: stock.to_string(),
            reason: "es demasiado grande".to_string(),
        }));
    }

    Ok(Product::new(name, price, stock))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_load_inventory() {
        let csv = "Producto,Precio,Cantidad\ncuaderno,4.5,30\n lapicero , 0.80 , 100\n";
        let store = Store::from_inventory_csv(csv.as_bytes(), clock()).unwrap();

        assert_eq!(store.products().len(), 2);
        assert_eq!(
            store.products()[0],
            Product::new("cuaderno", Money::from_cents(450), 30)
        );
        assert_eq!(store.product("lapicero").unwrap().price.cents(), 80);
    }

    #[test]
    fn test_load_inventory_reports_line() {
        let csv = "Producto,Precio,Cantidad\ncuaderno,4.5,30\nlapicero,abc,100\n";
        let err = Store::from_inventory_csv(csv.as_bytes(), clock()).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::InvalidRow {
                line: 3,
                source: ValidationError::InvalidFormat { .. }
            }
        ));
    }

    #[test]
    fn test_load_inventory_rejects_wrong_columns() {
        let csv = "Producto,Precio,Cantidad\ncuaderno,4.5\n";
        let err = Store::from_inventory_csv(csv.as_bytes(), clock()).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::ColumnCount {
                line: 2,
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_load_inventory_rejects_duplicates_and_empty() {
        let csv = "Producto,Precio,Cantidad\na,1,1\na,2,2\n";
        assert!(matches!(
            Store::from_inventory_csv(csv.as_bytes(), clock()),
            Err(ExchangeError::InvalidRow {
                line: 3,
                source: ValidationError::Duplicate { .. },
            })
        ));

        let csv = "Producto,Precio,Cantidad\n";
        assert!(matches!(
            Store::from_inventory_csv(csv.as_bytes(), clock()),
            Err(ExchangeError::EmptyInventory)
        ));
    }

    #[test]
    fn test_load_inventory_rejects_unsellable_stock() {
        let csv = "Producto,Precio,Cantidad\ncuaderno,4.5,30\ngranel,100.00,1000000000000000\n";
        let err = Store::from_inventory_csv(csv.as_bytes(), clock()).unwrap_err();
        assert!(matches!(
            err,
            ExchangeError::InvalidRow {
                line: 3,
                source: ValidationError::InvalidFormat { .. }
            }
        ));
    }

    #[test]
    fn test_huge_stock_from_csv_sells_out() {
        let csv = "Producto,Precio,Cantidad\ngranel,100.00,922337203685477\n";
        let mut store = Store::from_inventory_csv(csv.as_bytes(), clock()).unwrap();

        assert_eq!(
            store.purchase_message("granel", 922_337_203_685_477),
            "El precio total de 922337203685477 'granel' es: S/92233720368547700.00"
        );
        assert_eq!(store.product("granel").unwrap().stock, 0);
    }

    #[test]
    fn test_inventory_export_reloads_identically() {
        let mut store = Store::with_clock(clock());
        store.purchase("sticker", 5).unwrap();

        let mut buffer = Vec::new();
        store.write_inventory_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("Producto,Precio,Cantidad\npulsera,3.00,50\nsticker,1.00,195\n"));

        let reloaded = Store::from_inventory_csv(buffer.as_slice(), clock()).unwrap();
        assert_eq!(reloaded.products(), store.products());
    }

    #[test]
    fn test_sales_export() {
        let mut store = Store::with_clock(clock());
        store.purchase("sticker", 5).unwrap();
        store.purchase("postit", 2).unwrap();

        let mut buffer = Vec::new();
        store.write_sales_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            [
                "Fecha,Hora,Producto,Precio,Cantidad Vendida,Ingresos",
                "2024-05-01,09:30:00,sticker,S/1.00,5,S/5.00",
                "2024-05-01,09:30:00,postit,S/3.50,2,S/7.00",
            ]
        );
    }
}
