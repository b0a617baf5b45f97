//! Invoice adapter.

use super::{finite, finite_opt, first_present, present_lines, priced_columns, sum_finite, PricedLine};
use crate::document::{Document, Section, TextBlock, TotalsRow};
use crate::error::Result;
use crate::format::{combine_city_state_postal, format_status, non_empty, or_placeholder, Formatters};
use serde::{Deserialize, Serialize};

/// Billed customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceCustomer {
    /// Customer name
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
}

/// One billed line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Item name
    pub item_name: String,
    /// Item SKU
    #[serde(default)]
    pub sku: Option<String>,
    /// Quantity billed
    pub quantity: f64,
    /// Price per unit
    pub unit_price: f64,
    /// Stored line total
    pub line_total: f64,
}

/// A customer invoice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceRecord {
    /// Human-facing identifier, e.g. `INV-2025-0001`
    pub display_id: Option<String>,
    /// Legacy invoice number; used when there is no display id
    pub invoice_number: Option<String>,
    /// Workflow status (`snake_case`)
    pub status: Option<String>,
    /// Invoice date
    pub invoice_date: Option<String>,
    /// Payment due date
    pub due_date: Option<String>,
    /// When the invoice was sent
    pub sent_at: Option<String>,
    /// Where the invoice was sent
    pub sent_to_email: Option<String>,
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
    /// Stored subtotal
    pub subtotal: Option<f64>,
    /// Discount amount
    pub discount_amount: Option<f64>,
    /// Tax amount
    pub tax_amount: Option<f64>,
    /// Stored total
    pub total: Option<f64>,
    /// Payments received
    pub amount_paid: Option<f64>,
    /// Stored balance due
    pub balance_due: Option<f64>,
    /// Notes visible to the customer
    pub customer_notes: Option<String>,
    /// Terms and conditions
    pub terms_and_conditions: Option<String>,
    /// Billed customer
    pub customer: Option<InvoiceCustomer>,
    /// Billed lines
    pub items: Vec<InvoiceItem>,
}

/// Computed invoice totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    /// Stored or `Σ line_total`
    pub subtotal: f64,
    /// Stored or zero
    pub discount: f64,
    /// Stored or zero
    pub tax: f64,
    /// Stored or `subtotal − discount + tax`
    pub total: f64,
    /// Stored or zero
    pub amount_paid: f64,
    /// Stored or `total − amount_paid`
    pub balance_due: f64,
}

impl InvoiceRecord {
    pub(crate) fn document_id(&self) -> Option<String> {
        first_present(&[self.display_id.as_deref(), self.invoice_number.as_deref()])
    }

    /// Stored amounts, with fallbacks for any that are absent.
    pub fn totals(&self) -> Result<InvoiceTotals> {
        let subtotal = match finite_opt("subtotal", self.subtotal)? {
            Some(stored) => stored,
            None => sum_finite("line_total", &self.items, |i| i.line_total)?,
        };
        let discount = finite_opt("discount_amount", self.discount_amount)?.unwrap_or(0.0);
        let tax = finite_opt("tax_amount", self.tax_amount)?.unwrap_or(0.0);
        let total = finite_opt("total", self.total)?.unwrap_or(subtotal - discount + tax);
        let amount_paid = finite_opt("amount_paid", self.amount_paid)?.unwrap_or(0.0);
        let balance_due = finite_opt("balance_due", self.balance_due)?.unwrap_or(total - amount_paid);
        Ok(InvoiceTotals {
            subtotal,
            discount,
            tax,
            total,
            amount_paid,
            balance_due,
        })
    }

    fn bill_to_lines(&self) -> Vec<String> {
        let customer = self.customer.as_ref();
        or_placeholder(present_lines(vec![
            first_present(&[self.bill_to_name.as_deref(), customer.map(|c| c.name.as_str())]),
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

    fn lines(&self, fmt: &dyn Formatters) -> Result<Vec<PricedLine>> {
        self.items
            .iter()
            .map(|item| {
                Ok(PricedLine {
                    name: item.item_name.clone(),
                    sku: non_empty(item.sku.as_deref()),
                    quantity: finite("quantity", item.quantity)?,
                    unit_price: fmt.format_currency(Some(finite("unit_price", item.unit_price)?)),
                    total: fmt.format_currency(Some(finite("line_total", item.line_total)?)),
                })
            })
            .collect()
    }

    pub(crate) fn to_document(&self, fmt: &dyn Formatters) -> Result<Document> {
        let totals = self.totals()?;
        let money = |value: f64| fmt.format_currency(Some(value));

        let mut doc = Document::new("Invoice")
            .with_document_id(self.document_id())
            .with_meta("Status", format_status(self.status.as_deref()))
            .with_meta("Invoice Date", fmt.format_short_date(self.invoice_date.as_deref()))
            .with_meta("Due", fmt.format_short_date(self.due_date.as_deref()))
            .with_section(Section::Summary {
                label: "Balance Due".to_string(),
                value: money(totals.balance_due),
            })
            .with_section(Section::Text(TextBlock::new("Bill To", self.bill_to_lines())))
            .with_section(Section::table("Items", priced_columns(), self.lines(fmt)?))
            .with_section(Section::Totals(vec![
                TotalsRow::new("Subtotal", money(totals.subtotal)),
                TotalsRow::new("Discount", money(totals.discount)),
                TotalsRow::new("Tax", money(totals.tax)),
                TotalsRow::new("Total", money(totals.total)),
                TotalsRow::new("Amount Paid", money(totals.amount_paid)),
                TotalsRow::new("Balance Due", money(totals.balance_due)),
            ]));

        let sent_at = non_empty(self.sent_at.as_deref());
        let sent_to = non_empty(self.sent_to_email.as_deref());
        if sent_at.is_some() || sent_to.is_some() {
            let lines = present_lines(vec![
                sent_at.map(|at| format!("Sent at: {}", fmt.format_date(Some(&at)))),
                sent_to.map(|email| format!("Sent to: {}", email)),
            ]);
            doc.push(Section::Text(TextBlock::new("Sent Details", lines)));
        }
        if let Some(notes) = non_empty(self.customer_notes.as_deref()) {
            doc.push(Section::Text(TextBlock::new("Customer Notes", vec![notes])));
        }
        if let Some(terms) = non_empty(self.terms_and_conditions.as_deref()) {
            doc.push(Section::Text(TextBlock::new("Terms", vec![terms])));
        }
        Ok(doc)
    }
}
