//! Schema adapters: typed business records to generic [`Document`]s.
//!
//! Each record type maps its nullable fields into display strings, builds
//! address blocks and computes fallback totals, then hands layout a plain
//! [`Document`]. Records deserialize from JSON tagged by `document_type`:
//!
//! ```json
//! { "document_type": "pick_list", "pick_list": { ... }, "items": [ ... ] }
//! ```

mod branding;
mod delivery_order;
mod invoice;
mod pick_list;
mod purchase_order;
mod sales_order;

pub use branding::{build_company_branding, CompanyDetails};
pub use delivery_order::{DeliveryCustomer, DeliveryOrderItem, DeliveryOrderRecord, LinkedSalesOrder};
pub use invoice::{InvoiceCustomer, InvoiceItem, InvoiceRecord, InvoiceTotals};
pub use pick_list::{PickListHeader, PickListItem, PickListRecord};
pub use purchase_order::{PurchaseOrderItem, PurchaseOrderRecord, PurchaseOrderTotals, Vendor};
pub use sales_order::{SalesOrderCustomer, SalesOrderItem, SalesOrderRecord, SalesOrderTotals};

use crate::document::{Align, Branding, Column, Document};
use crate::error::{Error, Result};
use crate::format::{format_quantity, non_empty, Formatters};
use serde::{Deserialize, Serialize};

/// One record of any supported document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type", rename_all = "snake_case")]
pub enum DocumentRecord {
    /// Purchase order sent to a vendor
    PurchaseOrder(PurchaseOrderRecord),
    /// Warehouse pick list
    PickList(PickListRecord),
    /// Customer sales order
    SalesOrder(SalesOrderRecord),
    /// Outbound delivery
    DeliveryOrder(DeliveryOrderRecord),
    /// Customer invoice
    Invoice(InvoiceRecord),
}

impl DocumentRecord {
    /// Parse a record from JSON.
    ///
    /// Errors are reported against `record`; the reason carries serde's
    /// message, which names the offending field and its line and column.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::malformed("record", e.to_string()))
    }

    /// Build the generic document.
    pub fn to_document(
        &self,
        formatters: &dyn Formatters,
        branding: Option<&Branding>,
    ) -> Result<Document> {
        let document = match self {
            DocumentRecord::PurchaseOrder(r) => r.to_document(formatters)?,
            DocumentRecord::PickList(r) => r.to_document(formatters)?,
            DocumentRecord::SalesOrder(r) => r.to_document(formatters)?,
            DocumentRecord::DeliveryOrder(r) => r.to_document(formatters)?,
            DocumentRecord::Invoice(r) => r.to_document(formatters)?,
        };
        Ok(document.with_branding(branding.cloned()))
    }

    /// Slug used as the filename prefix.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentRecord::PurchaseOrder(_) => "purchase-order",
            DocumentRecord::PickList(_) => "pick-list",
            DocumentRecord::SalesOrder(_) => "sales-order",
            DocumentRecord::DeliveryOrder(_) => "delivery-order",
            DocumentRecord::Invoice(_) => "invoice",
        }
    }

    /// Identifier shown under the title, if any.
    pub fn document_id(&self) -> Option<String> {
        match self {
            DocumentRecord::PurchaseOrder(r) => r.document_id(),
            DocumentRecord::PickList(r) => r.document_id(),
            DocumentRecord::SalesOrder(r) => r.document_id(),
            DocumentRecord::DeliveryOrder(r) => r.document_id(),
            DocumentRecord::Invoice(r) => r.document_id(),
        }
    }
}

/// First non-blank value.
pub(crate) fn first_present(values: &[Option<&str>]) -> Option<String> {
    values.iter().find_map(|v| non_empty(*v))
}

/// Reject NaN and infinities.
pub(crate) fn finite(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::malformed(field, format!("{} is not a finite number", value)))
    }
}

/// Reject non-finite stored aggregates; absent values stay absent.
pub(crate) fn finite_opt(field: &str, value: Option<f64>) -> Result<Option<f64>> {
    value.map(|v| finite(field, v)).transpose()
}

/// Sum of per-row amounts, failing on the first non-finite one.
pub(crate) fn sum_finite<T>(field: &str, rows: &[T], amount: impl Fn(&T) -> f64) -> Result<f64> {
    rows.iter()
        .try_fold(0.0, |sum, row| -> Result<f64> { Ok(sum + finite(field, amount(row))?) })
}

/// A line item with its money cells already formatted.
///
/// Currency formatting needs the caller's formatter, which does not outlive
/// the adapter call, so money columns are formatted while shaping rows.
#[derive(Debug, Clone)]
pub(crate) struct PricedLine {
    pub name: String,
    pub sku: Option<String>,
    pub quantity: f64,
    pub unit_price: String,
    pub total: String,
}

/// Item / SKU / Qty / Unit / Total columns shared by orders and invoices.
pub(crate) fn priced_columns() -> Vec<Column<PricedLine>> {
    vec![
        Column::new("Item", 4.0, |r: &PricedLine| Ok(r.name.clone())).with_wrap(true),
        Column::new("SKU", 2.0, |r: &PricedLine| Ok(r.sku.clone().unwrap_or_default())),
        Column::new("Qty", 1.0, |r: &PricedLine| quantity_cell("quantity", r.quantity))
            .with_align(Align::Center),
        Column::new("Unit", 1.5, |r: &PricedLine| Ok(r.unit_price.clone()))
            .with_align(Align::Right),
        Column::new("Total", 1.5, |r: &PricedLine| Ok(r.total.clone())).with_align(Align::Right),
    ]
}

/// Quantity display text, rejecting non-finite values.
pub(crate) fn quantity_cell(field: &str, value: f64) -> Result<String> {
    finite(field, value).map(format_quantity)
}

/// Keep the present lines; `None` entries are dropped.
pub(crate) fn present_lines(lines: Vec<Option<String>>) -> Vec<String> {
    lines.into_iter().flatten().collect()
}
