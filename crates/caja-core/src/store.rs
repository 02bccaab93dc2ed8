//! # Store
//!
//! The in-memory till: product catalog, sales ledger, and the operations the
//! cashier runs against them.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  purchase("sticker", 5)                                                 │
//! │       │                                                                 │
//! │       ├── not in catalog?  → UnknownProduct      (nothing changes)      │
//! │       ├── quantity <= 0?   → InvalidQuantity     (nothing changes)      │
//! │       ├── quantity > stock? → InsufficientStock  (nothing changes)      │
//! │       │                                                                 │
//! │       └── OK: stock -= 5 ──► record_sale ──► Receipt (S/5.00)           │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                    ledger["2024-05-01"].push(09:30:00, sticker, 5)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! There is no global store. Callers construct one and hand `&mut Store` to
//! whatever drives it; the exclusive borrow makes check-then-decrement on
//! stock a single critical section.

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock, DATE_FORMAT, TIME_FORMAT};
use crate::error::{PurchaseError, PurchaseResult, ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{Product, Receipt, SaleRecord, SalesDay, SalesReport, SalesReportRow};
use crate::validation::validate_product_name;
use crate::DEFAULT_INVENTORY;

/// Product catalog plus sales ledger.
#[derive(Debug)]
pub struct Store<C: Clock = SystemClock> {
    catalog: Vec<Product>,
    ledger: Vec<SalesDay>,
    clock: C,
}

impl Store<SystemClock> {
    /// Store with the default inventory and the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for Store<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

/// The inventory every fresh store starts with.
pub fn default_inventory() -> Vec<Product> {
    DEFAULT_INVENTORY
        .iter()
        .map(|&(name, cents, stock)| Product::new(name, Money::from_cents(cents), stock))
        .collect()
}

impl<C: Clock> Store<C> {
    /// Store with the default inventory and the given clock.
    pub fn with_clock(clock: C) -> Self {
        Store {
            catalog: default_inventory(),
            ledger: Vec::new(),
            clock,
        }
    }

    /// Store seeded with `products`, in that display order.
    ///
    /// Names must be valid and unique, prices and stock non-negative.
    ///
    /// The value of the whole catalog (price × stock, summed) must fit in
    /// an `i64` of céntimos. Stock and prices never grow after this point,
    /// so every receipt total and every revenue sum stays in range.
    pub fn with_products(products: Vec<Product>, clock: C) -> ValidationResult<Self> {
        let mut catalog_value = Money::zero();
        for (index, product) in products.iter().enumerate() {
            validate_product_name(&product.name)?;
            if product.price.is_negative() {
                return Err(ValidationError::Negative {
                    field: "precio".to_string(),
                });
            }
            if product.stock < 0 {
                return Err(ValidationError::Negative {
                    field: "cantidad".to_string(),
                });
            }
            if products[..index].iter().any(|p| p.name == product.name) {
                return Err(ValidationError::Duplicate {
                    field: "producto".to_string(),
                    value: product.name.clone(),
                });
            }
            catalog_value = product
                .price
                .checked_multiply_quantity(product.stock)
                .and_then(|value| catalog_value.checked_add(value))
                .ok_or_else(|| ValidationError::InvalidFormat {
                    field: "cantidad".to_string(),
                    value: product.stock.to_string(),
                    reason: "es demasiado grande".to_string(),
                })?;
        }

        debug!(products = products.len(), "Store seeded");
        Ok(Store {
            catalog: products,
            ledger: Vec::new(),
            clock,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Catalog in display order.
    pub fn products(&self) -> &[Product] {
        &self.catalog
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.catalog.iter().find(|p| p.name == name)
    }

    /// Sales days in the order they were first written.
    pub fn ledger(&self) -> &[SalesDay] {
        &self.ledger
    }

    /// Number of sale records across all dates.
    pub fn sales_count(&self) -> usize {
        self.ledger.iter().map(|day| day.sales.len()).sum()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Inventory as a fixed-width table.
    ///
    /// ```text
    /// Producto        Precio     Cantidad
    /// sticker         1.00       200
    /// ```
    pub fn render_inventory(&self) -> String {
        let mut lines = Vec::with_capacity(self.catalog.len() + 1);
        lines.push(format!("{:<15} {:<10} {:<10}", "Producto", "Precio", "Cantidad"));
        for product in &self.catalog {
            lines.push(format!(
                "{:<15} {:<10} {:<10}",
                product.name,
                product.price.amount(),
                product.stock
            ));
        }
        lines.join("\n")
    }

    /// Sells `quantity` units of `product_name`.
    ///
    /// Checks run in a fixed order and the first failure wins. On failure
    /// neither stock nor ledger change.
    pub fn purchase(&mut self, product_name: &str, quantity: i64) -> PurchaseResult<Receipt> {
        debug!(product = product_name, quantity, "Purchase requested");

        let outcome = self.try_purchase(product_name, quantity);
        match &outcome {
            Ok(receipt) => info!(
                product = product_name,
                quantity,
                total = %receipt.total,
                "Sale completed"
            ),
            Err(reason) => warn!(product = product_name, quantity, %reason, "Purchase rejected"),
        }
        outcome
    }

    /// Same as [`Store::purchase`], rendered as the message shown at the till.
    pub fn purchase_message(&mut self, product_name: &str, quantity: i64) -> String {
        match self.purchase(product_name, quantity) {
            Ok(receipt) => receipt.to_string(),
            Err(reason) => reason.to_string(),
        }
    }

    fn try_purchase(&mut self, product_name: &str, quantity: i64) -> PurchaseResult<Receipt> {
        let product = self
            .catalog
            .iter_mut()
            .find(|p| p.name == product_name)
            .ok_or_else(|| PurchaseError::UnknownProduct {
                product: product_name.to_string(),
            })?;

        if quantity <= 0 {
            return Err(PurchaseError::InvalidQuantity { quantity });
        }

        if !product.can_sell(quantity) {
            return Err(PurchaseError::InsufficientStock {
                product: product.name.clone(),
                available: product.stock,
                requested: quantity,
            });
        }

        // quantity <= stock, so the total is bounded by the catalog value
        let unit_price = product.price;
        let total = unit_price.multiply_quantity(quantity);
        product.stock -= quantity;

        self.record_sale(product_name, quantity, unit_price);

        Ok(Receipt {
            product: product_name.to_string(),
            quantity,
            unit_price,
            total,
        })
    }

    /// Appends a sale under today's date, creating the date entry if needed.
    fn record_sale(&mut self, product: &str, quantity: i64, unit_price: Money) {
        let now = self.clock.now();
        let date = now.format(DATE_FORMAT).to_string();
        let record = SaleRecord {
            time: now.format(TIME_FORMAT).to_string(),
            product: product.to_string(),
            quantity,
            unit_price,
        };

        match self.ledger.iter().position(|day| day.date == date) {
            Some(index) => self.ledger[index].sales.push(record),
            None => {
                debug!(%date, "Opening sales day");
                self.ledger.push(SalesDay {
                    date,
                    sales: vec![record],
                });
            }
        }
    }

    /// Sales log as a fixed-width table, one row per sale.
    ///
    /// ```text
    /// Fecha        Hora       Producto        Cantidad
    /// 2024-05-01   09:30:00   sticker         5
    /// ```
    pub fn render_sales_report(&self) -> String {
        let mut lines = Vec::with_capacity(self.sales_count() + 1);
        lines.push(format!(
            "{:<12} {:<10} {:<15} {:<10}",
            "Fecha", "Hora", "Producto", "Cantidad"
        ));
        for day in &self.ledger {
            for sale in &day.sales {
                lines.push(format!(
                    "{:<12} {:<10} {:<15} {:<10}",
                    day.date, sale.time, sale.product, sale.quantity
                ));
            }
        }
        lines.join("\n")
    }

    /// Revenue per sale in ledger order, with the store total.
    pub fn sales_report(&self) -> SalesReport {
        let rows: Vec<SalesReportRow> = self
            .ledger
            .iter()
            .flat_map(|day| {
                day.sales.iter().map(move |sale| SalesReportRow {
                    date: day.date.clone(),
                    time: sale.time.clone(),
                    product: sale.product.clone(),
                    unit_price: sale.unit_price,
                    quantity: sale.quantity,
                    income: sale.income(),
                })
            })
            .collect();
        let total_income = rows.iter().map(|row| row.income).sum();

        SalesReport { rows, total_income }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{Duration, NaiveDate};

    fn clock() -> FixedClock {
        FixedClock::new(
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        )
    }

    fn stock_of<C: Clock>(store: &Store<C>, name: &str) -> i64 {
        store.product(name).unwrap().stock
    }

    #[test]
    fn test_default_inventory_order() {
        let store = Store::with_clock(clock());
        let names: Vec<&str> = store.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["pulsera", "sticker", "llavero", "postit"]);
        assert_eq!(store.product("postit").unwrap().price.cents(), 350);
        assert!(store.ledger().is_empty());
    }

    #[test]
    fn test_render_inventory() {
        let store = Store::with_clock(clock());
        let table = store.render_inventory();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].trim_end(), "Producto        Precio     Cantidad");
        assert_eq!(lines[2].trim_end(), "sticker         1.00       200");
        assert_eq!(lines[4].trim_end(), "postit          3.50       12");
    }

    #[test]
    fn test_purchase_success() {
        let mut store = Store::with_clock(clock());
        let receipt = store.purchase("postit", 3).unwrap();

        assert_eq!(receipt.total.cents(), 1050);
        assert_eq!(receipt.to_string(), "El precio total de 3 'postit' es: S/10.50");
        assert_eq!(stock_of(&store, "postit"), 9);
        assert_eq!(store.ledger().len(), 1);
        assert_eq!(store.ledger()[0].date, "2024-05-01");
        assert_eq!(
            store.ledger()[0].sales[0],
            SaleRecord {
                time: "09:30:00".to_string(),
                product: "postit".to_string(),
                quantity: 3,
                unit_price: Money::from_cents(350),
            }
        );
    }

    #[test]
    fn test_unknown_product_checked_before_quantity() {
        let mut store = Store::with_clock(clock());
        assert_eq!(
            store.purchase("widget", 0),
            Err(PurchaseError::UnknownProduct {
                product: "widget".to_string()
            })
        );
    }

    #[test]
    fn test_quantity_checked_before_stock() {
        let mut store = Store::with_clock(clock());
        store.purchase("llavero", 12).unwrap();
        assert_eq!(stock_of(&store, "llavero"), 0);

        assert_eq!(
            store.purchase("llavero", 0),
            Err(PurchaseError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            store.purchase("llavero", 1),
            Err(PurchaseError::InsufficientStock {
                product: "llavero".to_string(),
                available: 0,
                requested: 1,
            })
        );
    }

    #[test]
    fn test_selling_whole_stock_is_allowed() {
        let mut store = Store::with_clock(clock());
        let receipt = store.purchase("pulsera", 50).unwrap();
        assert_eq!(receipt.total.to_string(), "S/150.00");
        assert_eq!(stock_of(&store, "pulsera"), 0);
    }

    #[test]
    fn test_purchase_message() {
        let mut store = Store::with_clock(clock());
        assert_eq!(
            store.purchase_message("sticker", 5),
            "El precio total de 5 'sticker' es: S/5.00"
        );
        assert_eq!(
            store.purchase_message("sticker", -1),
            "La cantidad debe ser un número positivo."
        );
    }

    #[test]
    fn test_ledger_groups_by_date_in_insertion_order() {
        let clock = clock();
        let mut store = Store::with_clock(clock.clone());

        store.purchase("sticker", 1).unwrap();
        clock.advance(Duration::minutes(10));
        store.purchase("pulsera", 2).unwrap();
        clock.advance(Duration::days(1));
        store.purchase("llavero", 3).unwrap();

        let ledger = store.ledger();
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].date, "2024-05-01");
        assert_eq!(ledger[0].sales.len(), 2);
        assert_eq!(ledger[0].sales[1].time, "09:40:00");
        assert_eq!(ledger[1].date, "2024-05-02");
        assert_eq!(ledger[1].sales[0].product, "llavero");
        assert_eq!(store.sales_count(), 3);
    }

    #[test]
    fn test_render_sales_report() {
        let clock = clock();
        let mut store = Store::with_clock(clock.clone());
        store.purchase("sticker", 5).unwrap();
        clock.advance(Duration::seconds(42));
        store.purchase("postit", 1).unwrap();

        let report = store.render_sales_report();
        let lines: Vec<&str> = report.lines().map(str::trim_end).collect();
        assert_eq!(
            lines,
            [
                "Fecha        Hora       Producto        Cantidad",
                "2024-05-01   09:30:00   sticker         5",
                "2024-05-01   09:30:42   postit          1",
            ]
        );
    }

    #[test]
    fn test_empty_sales_report_has_header_only() {
        let store = Store::with_clock(clock());
        assert_eq!(store.render_sales_report().lines().count(), 1);
        assert_eq!(store.sales_report(), SalesReport::default());
    }

    #[test]
    fn test_sales_report_income() {
        let mut store = Store::with_clock(clock());
        store.purchase("postit", 2).unwrap();
        store.purchase("llavero", 1).unwrap();

        let report = store.sales_report();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].income.cents(), 700);
        assert_eq!(report.rows[1].income.cents(), 1000);
        assert_eq!(report.total_income.to_string(), "S/17.00");
    }

    #[test]
    fn test_with_products_rejects_bad_catalogs() {
        let dup = vec![
            Product::new("a", Money::from_cents(1), 1),
            Product::new("a", Money::from_cents(2), 2),
        ];
        assert!(matches!(
            Store::with_products(dup, clock()),
            Err(ValidationError::Duplicate { .. })
        ));

        let negative = vec![Product::new("a", Money::from_cents(1), -1)];
        assert!(matches!(
            Store::with_products(negative, clock()),
            Err(ValidationError::Negative { .. })
        ));

        let blank = vec![Product::new(" ", Money::from_cents(1), 1)];
        assert!(Store::with_products(blank, clock()).is_err());
    }

    #[test]
    fn test_with_products_rejects_catalog_value_overflow() {
        let huge = vec![Product::new("granel", Money::from_cents(10_000), 1_000_000_000_000_000)];
        assert!(matches!(
            Store::with_products(huge, clock()),
            Err(ValidationError::InvalidFormat { ref reason, .. }) if reason == "es demasiado grande"
        ));

        // each row fits on its own, the sum does not
        let half = i64::MAX / 2 + 1;
        let pair = vec![
            Product::new("a", Money::from_cents(1), half),
            Product::new("b", Money::from_cents(1), half),
        ];
        assert!(Store::with_products(pair, clock()).is_err());
    }

    #[test]
    fn test_buying_largest_allowed_stock() {
        let stock = i64::MAX / 10_000;
        let catalog = vec![Product::new("granel", Money::from_cents(10_000), stock)];
        let mut store = Store::with_products(catalog, clock()).unwrap();

        let receipt = store.purchase("granel", stock).unwrap();
        assert_eq!(receipt.total.cents(), 10_000 * stock);
        assert_eq!(stock_of(&store, "granel"), 0);
        assert_eq!(store.sales_report().total_income, receipt.total);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn snapshot<C: Clock>(store: &Store<C>) -> (Vec<Product>, Vec<SalesDay>) {
            (store.products().to_vec(), store.ledger().to_vec())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Names outside the catalog are refused without side effects.
            #[test]
            fn unknown_product_changes_nothing(
                name in "[a-z]{1,12}",
                quantity in any::<i64>(),
            ) {
                prop_assume!(default_inventory().iter().all(|p| p.name != name));
                let mut store = Store::with_clock(clock());
                let before = snapshot(&store);

                let outcome = store.purchase(&name, quantity);
                prop_assert_eq!(outcome, Err(PurchaseError::UnknownProduct { product: name.clone() }));
                prop_assert_eq!(snapshot(&store), before);
            }

            /// Non-positive quantities are refused without side effects.
            #[test]
            fn non_positive_quantity_changes_nothing(
                index in 0usize..4,
                quantity in i64::MIN..=0,
            ) {
                let mut store = Store::with_clock(clock());
                let name = store.products()[index].name.clone();
                let before = snapshot(&store);

                prop_assert_eq!(
                    store.purchase(&name, quantity),
                    Err(PurchaseError::InvalidQuantity { quantity })
                );
                prop_assert_eq!(snapshot(&store), before);
            }

            /// Asking for more than is on hand reports the exact stock.
            #[test]
            fn oversized_quantity_reports_stock(
                index in 0usize..4,
                excess in 1i64..1_000_000,
            ) {
                let mut store = Store::with_clock(clock());
                let product = store.products()[index].clone();
                let before = snapshot(&store);

                let outcome = store.purchase(&product.name, product.stock + excess);
                prop_assert_eq!(
                    outcome,
                    Err(PurchaseError::InsufficientStock {
                        product: product.name.clone(),
                        available: product.stock,
                        requested: product.stock + excess,
                    })
                );
                prop_assert_eq!(snapshot(&store), before);
            }

            /// Valid sales decrement stock and append exactly one record.
            #[test]
            fn valid_purchase_updates_stock_and_ledger(
                index in 0usize..4,
                fraction in 0.0f64..=1.0,
            ) {
                let mut store = Store::with_clock(clock());
                let product = store.products()[index].clone();
                let quantity = ((product.stock as f64 * fraction) as i64).max(1);

                let receipt = store.purchase(&product.name, quantity).unwrap();
                prop_assert_eq!(receipt.total, product.price * quantity);
                prop_assert_eq!(stock_of(&store, &product.name), product.stock - quantity);
                prop_assert_eq!(store.sales_count(), 1);
                prop_assert_eq!(&store.ledger()[0].date, "2024-05-01");
                prop_assert_eq!(store.ledger()[0].sales[0].quantity, quantity);
            }

            /// Repeating a refused purchase is a fixed point.
            #[test]
            fn failing_purchase_is_idempotent(
                repeats in 1usize..20,
                quantity in prop_oneof![i64::MIN..=0, 51i64..10_000],
            ) {
                let mut store = Store::with_clock(clock());
                let first = store.purchase("pulsera", quantity);
                prop_assert!(first.is_err());
                let after_first = snapshot(&store);

                for _ in 0..repeats {
                    prop_assert_eq!(store.purchase("pulsera", quantity), first.clone());
                    prop_assert_eq!(snapshot(&store), after_first.clone());
                }
            }

            /// Any accepted catalog can sell its whole stock in any split
            /// without the totals overflowing.
            #[test]
            fn accepted_catalog_totals_never_overflow(
                price in 0i64..=i64::MAX,
                stock in 0i64..=i64::MAX,
                split in 1i64..=4,
            ) {
                let catalog = vec![Product::new("granel", Money::from_cents(price), stock)];
                let fits = (price as i128) * (stock as i128) <= i64::MAX as i128;
                let Ok(mut store) = Store::with_products(catalog, clock()) else {
                    prop_assert!(!fits);
                    return Ok(());
                };
                prop_assert!(fits);

                let first = stock / split;
                if first > 0 {
                    store.purchase("granel", first).unwrap();
                }
                if stock - first > 0 {
                    store.purchase("granel", stock - first).unwrap();
                }
                prop_assert_eq!(stock_of(&store, "granel"), 0);
                prop_assert_eq!(
                    store.sales_report().total_income.cents() as i128,
                    (price as i128) * (stock as i128)
                );
            }

            /// Stock never goes negative whatever the order of requests.
            #[test]
            fn stock_never_negative(
                requests in proptest::collection::vec((0usize..4, -5i64..80), 0..60),
            ) {
                let mut store = Store::with_clock(clock());
                let mut accepted = 0usize;
                for (index, quantity) in requests {
                    let name = store.products()[index].name.clone();
                    if store.purchase(&name, quantity).is_ok() {
                        accepted += 1;
                    }
                    prop_assert!(store.products().iter().all(|p| p.stock >= 0));
                }
                prop_assert_eq!(store.sales_count(), accepted);
            }
        }
    }
}
