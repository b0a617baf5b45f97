//! Sales order adapter.

use super::{finite, finite_opt, first_present, present_lines, priced_columns, sum_finite, PricedLine};
use crate::document::{Document, Section, TextBlock, TotalsRow};
use crate::error::Result;
use crate::format::{
    combine_city_state_postal, format_address_lines, format_status, non_empty, or_placeholder,
    AddressParts, Formatters,
};
use serde::{Deserialize, Serialize};

/// Ordering customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesOrderCustomer {
    /// Customer name
    pub name: String,
    /// Contact person
    pub contact_name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
}

/// One ordered line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderItem {
    /// Item name
    pub item_name: String,
    /// Item SKU
    #[serde(default)]
    pub sku: Option<String>,
    /// Quantity ordered
    pub quantity_ordered: f64,
    /// Price per unit
    pub unit_price: f64,
    /// Stored line total (after line discounts)
    pub line_total: f64,
}

/// A customer sales order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesOrderRecord {
    /// Human-facing identifier, e.g. `SO-0100`
    pub display_id: Option<String>,
    /// Legacy order number; used when there is no display id
    pub order_number: Option<String>,
    /// Workflow status (`snake_case`)
    pub status: Option<String>,
    /// `low`, `normal`, `high` or `urgent`
    pub priority: Option<String>,
    /// Order date
    pub order_date: Option<String>,
    /// Date the customer asked for
    pub requested_date: Option<String>,
    /// Date promised to the customer
    pub promised_date: Option<String>,
    /// Stored subtotal; computed from lines when absent
    pub subtotal: Option<f64>,
    /// Order-level discount
    pub discount_total: Option<f64>,
    /// Tax amount
    pub tax_total: Option<f64>,
    /// Shipping charge
    pub shipping_total: Option<f64>,
    /// Stored total; computed when absent
    pub total: Option<f64>,
    /// Notes visible to the customer
    pub customer_notes: Option<String>,
    /// Ordering customer
    pub customer: Option<SalesOrderCustomer>,
    /// Ship-to recipient
    pub ship_to_name: Option<String>,
    /// Ship-to street line 1
    pub ship_to_address1: Option<String>,
    /// Ship-to street line 2
    pub ship_to_address2: Option<String>,
    /// Ship-to city
    pub ship_to_city: Option<String>,
    /// Ship-to state
    pub ship_to_state: Option<String>,
    /// Ship-to postal code
    pub ship_to_postal_code: Option<String>,
    /// Ship-to country
    pub ship_to_country: Option<String>,
    /// Bill-to name; the customer name when absent
    pub bill_to_name: Option<String>,
    /// Bill-to street line 1
    pub bill_to_address1: Option<String>,
    /// Bill-to street line 2
    pub bill_to_address2: Option<String>,
    /// Bill-to city
    pub bill_to_city: Option<String>,
    /// Bill-to state
    pub bill_to_state: Option<String>,
    /// Bill-to postal code
    pub bill_to_postal_code: Option<String>,
    /// Bill-to country
    pub bill_to_country: Option<String>,
    /// Assignee display name
    pub assigned_to_name: Option<String>,
    /// Ordered lines
    pub items: Vec<SalesOrderItem>,
}

/// Computed sales order totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesOrderTotals {
    /// Stored or `Σ line_total`
    pub subtotal: f64,
    /// Stored or zero
    pub discount: f64,
    /// Stored or zero
    pub tax: f64,
    /// Stored or zero
    pub shipping: f64,
    /// Stored or `subtotal − discount + tax + shipping`
    pub total: f64,
}

impl SalesOrderRecord {
    pub(crate) fn document_id(&self) -> Option<String> {
        first_present(&[self.display_id.as_deref(), self.order_number.as_deref()])
    }

    /// Totals with the same fallbacks the order service uses.
    pub fn totals(&self) -> Result<SalesOrderTotals> {
        let subtotal = match finite_opt("subtotal", self.subtotal)? {
            Some(stored) => stored,
            None => sum_finite("line_total", &self.items, |i| i.line_total)?,
        };
        let discount = finite_opt("discount_total", self.discount_total)?.unwrap_or(0.0);
        let tax = finite_opt("tax_total", self.tax_total)?.unwrap_or(0.0);
        let shipping = finite_opt("shipping_total", self.shipping_total)?.unwrap_or(0.0);
        let total = finite_opt("total", self.total)?.unwrap_or(subtotal - discount + tax + shipping);
        Ok(SalesOrderTotals {
            subtotal,
            discount,
            tax,
            shipping,
            total,
        })
    }

    fn bill_to_lines(&self) -> Vec<String> {
        let customer = self.customer.as_ref();
        or_placeholder(present_lines(vec![
            first_present(&[self.bill_to_name.as_deref(), customer.map(|c| c.name.as_str())]),
            non_empty(customer.and_then(|c| c.contact_name.as_deref())),
            non_empty(customer.and_then(|c| c.email.as_deref())),
            non_empty(customer.and_then(|c| c.phone.as_deref())),
            non_empty(self.bill_to_address1.as_deref()),
            non_empty(self.bill_to_address2.as_deref()),
            combine_city_state_postal(
                self.bill_to_city.as_deref(),
                self.bill_to_state.as_deref(),
                self.bill_to_postal_code.as_deref(),
            ),
            non_empty(self.bill_to_country.as_deref()),
        ]))
    }

    fn ship_to(&self) -> AddressParts<'_> {
        AddressParts {
            name: self.ship_to_name.as_deref(),
            address1: self.ship_to_address1.as_deref(),
            address2: self.ship_to_address2.as_deref(),
            city: self.ship_to_city.as_deref(),
            state: self.ship_to_state.as_deref(),
            postal: self.ship_to_postal_code.as_deref(),
            country: self.ship_to_country.as_deref(),
            phone: None,
        }
    }

    fn lines(&self, fmt: &dyn Formatters) -> Result<Vec<PricedLine>> {
        self.items
            .iter()
            .map(|item| {
                Ok(PricedLine {
                    name: item.item_name.clone(),
                    sku: non_empty(item.sku.as_deref()),
                    quantity: finite("quantity_ordered", item.quantity_ordered)?,
                    unit_price: fmt.format_currency(Some(finite("unit_price", item.unit_price)?)),
                    total: fmt.format_currency(Some(finite("line_total", item.line_total)?)),
                })
            })
            .collect()
    }

    pub(crate) fn to_document(&self, fmt: &dyn Formatters) -> Result<Document> {
        let mut doc = Document::new("Sales Order")
            .with_document_id(self.document_id())
            .with_meta("Status", format_status(self.status.as_deref()))
            .with_meta("Order Date", fmt.format_short_date(self.order_date.as_deref()))
            .with_meta("Requested", fmt.format_short_date(self.requested_date.as_deref()))
            .with_meta("Promised", fmt.format_short_date(self.promised_date.as_deref()));

        if let Some(priority) = non_empty(self.priority.as_deref()).filter(|p| p != "normal") {
            doc = doc.with_meta("Priority", format_status(Some(&priority)));
        }

        doc.push(Section::Columns {
            left: TextBlock::new("Bill To", self.bill_to_lines()),
            right: Some(TextBlock::new("Ship To", format_address_lines(&self.ship_to()))),
        });
        doc.push(Section::table("Items", priced_columns(), self.lines(fmt)?));

        let totals = self.totals()?;
        doc.push(Section::Totals(vec![
            TotalsRow::new("Subtotal", fmt.format_currency(Some(totals.subtotal))),
            TotalsRow::new("Discount", fmt.format_currency(Some(totals.discount))),
            TotalsRow::new("Tax", fmt.format_currency(Some(totals.tax))),
            TotalsRow::new("Shipping", fmt.format_currency(Some(totals.shipping))),
            TotalsRow::new("Total", fmt.format_currency(Some(totals.total))),
        ]));

        if let Some(notes) = non_empty(self.customer_notes.as_deref()) {
            doc.push(Section::Text(TextBlock::new("Customer Notes", vec![notes])));
        }
        Ok(doc)
    }
}
