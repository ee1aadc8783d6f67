//! CSV loaders for catalog and sales exports.
//!
//! Exports from older application versions drifted on column names
//! (`cost_price` vs `purchase_price`, `min_stock` vs `stock_min`,
//! date-only timestamps). All of that is absorbed here, at the loading
//! boundary; downstream code only ever sees the canonical types.
//!
//! Expected product columns:
//!   id, name, category, stock, stock_min, unit, purchase_price,
//!   sale_price, supplier, created_at
//! Expected sale columns:
//!   id, product_id, product_name, quantity, unit_price, total, timestamp

use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use simpligest_insights::{Product, Sale};

/// A product row as it appears in a CSV export.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub stock: f64,
    #[serde(alias = "min_stock")]
    pub stock_min: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(alias = "cost_price")]
    pub purchase_price: f64,
    #[serde(alias = "price")]
    pub sale_price: f64,
    #[serde(default)]
    pub supplier: String,
    /// Absent in exports predating the timestamp column.
    #[serde(default, alias = "created")]
    pub created_at: Option<String>,
}

impl ProductRecord {
    /// Convert to the canonical product type.
    pub fn into_product(self) -> Result<Product, String> {
        let created_at = match &self.created_at {
            Some(raw) if !raw.trim().is_empty() => Some(
                parse_timestamp(raw)
                    .map_err(|e| format!("product '{}': {}", self.id, e))?,
            ),
            _ => None,
        };
        Ok(Product {
            id: self.id,
            name: self.name,
            category: self.category,
            stock: self.stock,
            stock_min: self.stock_min,
            unit: self.unit,
            purchase_price: self.purchase_price,
            sale_price: self.sale_price,
            supplier: self.supplier,
            created_at,
        })
    }
}

/// A sale row as it appears in a CSV export.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleRecord {
    pub id: String,
    #[serde(alias = "product")]
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    pub quantity: f64,
    #[serde(alias = "price")]
    pub unit_price: f64,
    /// Absent in exports from before totals were precomputed.
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(alias = "date")]
    pub timestamp: String,
}

impl SaleRecord {
    /// Convert to the canonical sale type, computing the total when the
    /// export lacks it.
    pub fn into_sale(self) -> Result<Sale, String> {
        let timestamp = parse_timestamp(&self.timestamp)
            .map_err(|e| format!("sale '{}': {}", self.id, e))?;
        Ok(Sale {
            total: self.total.unwrap_or(self.quantity * self.unit_price),
            id: self.id,
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
            timestamp,
        })
    }
}

/// Parse an RFC 3339 timestamp, or a bare `YYYY-MM-DD` from older
/// exports (normalized to midnight UTC).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(DateTime::from_naive_utc_and_offset(
            date.and_time(chrono::NaiveTime::MIN),
            Utc,
        ));
    }
    Err(format!("unparseable timestamp '{}'", raw))
}

fn default_unit() -> String {
    "un".to_string()
}

/// Load product records from a CSV reader.
pub fn load_products<R: Read>(reader: R) -> Result<Vec<Product>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut products = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: ProductRecord =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        products.push(record.into_product()?);
    }
    Ok(products)
}

/// Load product records from a CSV file path.
pub fn load_products_file(path: &str) -> Result<Vec<Product>, String> {
    let file =
        std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_products(file)
}

/// Load sale records from a CSV reader.
pub fn load_sales<R: Read>(reader: R) -> Result<Vec<Sale>, String> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut sales = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let record: SaleRecord =
            result.map_err(|e| format!("CSV parse error at line {}: {}", line_num + 2, e))?;
        sales.push(record.into_sale()?);
    }
    Ok(sales)
}

/// Load sale records from a CSV file path.
pub fn load_sales_file(path: &str) -> Result<Vec<Sale>, String> {
    let file =
        std::fs::File::open(path).map_err(|e| format!("Failed to open '{}': {}", path, e))?;
    load_sales(file)
}

/// Group products by category, sorted by category name.
pub fn group_by_category(products: &[Product]) -> Vec<(String, Vec<Product>)> {
    let mut groups: std::collections::HashMap<String, Vec<Product>> =
        std::collections::HashMap::new();
    for product in products {
        groups
            .entry(product.category.clone())
            .or_default()
            .push(product.clone());
    }
    let mut result: Vec<_> = groups.into_iter().collect();
    result.sort_by(|a, b| a.0.cmp(&b.0));
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PRODUCTS: &str = "\
id,name,category,stock,stock_min,unit,purchase_price,sale_price,supplier,created_at
p-001,Harina 1kg,almacen,24,10,un,850,1190,Molinos Sur,2025-11-02T14:30:00Z
p-002,Detergente 3L,limpieza,4,6,un,2990,4490,DistClean,2026-01-15
p-003,Queso mantecoso,lacteos,3.5,2,kg,6200,8990,Lacteos del Maule,
";

    const SAMPLE_SALES: &str = "\
id,product_id,product_name,quantity,unit_price,total,timestamp
s-001,p-001,Harina 1kg,2,1190,2380,2026-06-28T10:05:00Z
s-002,p-003,Queso mantecoso,0.5,8990,4495,2026-06-28
s-003,p-001,Harina 1kg,1,1190,,2026-06-29T18:42:00Z
";

    const DRIFTED_PRODUCTS: &str = "\
id,name,category,stock,min_stock,unit,cost_price,price,supplier,created
p-009,Aceite 1L,almacen,12,4,un,1890,2590,DistSur,2025-03-03
";

    #[test]
    fn load_sample_products() {
        let products = load_products(SAMPLE_PRODUCTS.as_bytes()).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, "p-001");
        assert!((products[0].purchase_price - 850.0).abs() < 1e-9);
        assert!(products[0].created_at.is_some());
        // Date-only created_at normalizes to midnight UTC.
        assert_eq!(
            products[1].created_at.unwrap().to_rfc3339(),
            "2026-01-15T00:00:00+00:00"
        );
        // Empty created_at column is tolerated.
        assert!(products[2].created_at.is_none());
        assert!((products[2].stock - 3.5).abs() < 1e-9);
    }

    #[test]
    fn load_sample_sales_fills_missing_total() {
        let sales = load_sales(SAMPLE_SALES.as_bytes()).unwrap();
        assert_eq!(sales.len(), 3);
        assert!((sales[0].total - 2380.0).abs() < 1e-9);
        // s-003 has an empty total column; quantity x unit_price.
        assert!((sales[2].total - 1190.0).abs() < 1e-9);
        // Date-only timestamp normalizes to midnight UTC.
        assert_eq!(sales[1].timestamp.to_rfc3339(), "2026-06-28T00:00:00+00:00");
    }

    #[test]
    fn drifted_headers_normalize_to_canonical_schema() {
        let products = load_products(DRIFTED_PRODUCTS.as_bytes()).unwrap();
        assert_eq!(products.len(), 1);
        assert!((products[0].stock_min - 4.0).abs() < 1e-9);
        assert!((products[0].purchase_price - 1890.0).abs() < 1e-9);
        assert!((products[0].sale_price - 2590.0).abs() < 1e-9);
    }

    #[test]
    fn unparseable_timestamp_is_a_line_error() {
        let bad = "\
id,product_id,product_name,quantity,unit_price,total,timestamp
s-001,p-001,Harina 1kg,2,1190,2380,yesterday
";
        let err = load_sales(bad.as_bytes()).unwrap_err();
        assert!(err.contains("unparseable timestamp"), "got: {}", err);
    }

    #[test]
    fn group_products_by_category() {
        let products = load_products(SAMPLE_PRODUCTS.as_bytes()).unwrap();
        let groups = group_by_category(&products);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, "almacen");
    }
}
