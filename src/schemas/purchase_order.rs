//! Purchase order adapter.

use super::{finite, finite_opt, first_present, present_lines, priced_columns, sum_finite, PricedLine};
use crate::document::{Document, Section, TextBlock, TotalsRow};
use crate::error::Result;
use crate::format::{
    format_address_lines, format_status, non_empty, or_placeholder, AddressParts, Formatters,
};
use serde::{Deserialize, Serialize};

/// Supplier on a purchase order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vendor {
    /// Vendor name
    pub name: String,
    /// Contact person
    pub contact_name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Payment terms, e.g. `Net 30`
    pub payment_terms: Option<String>,
}

/// One ordered line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderItem {
    /// Item name
    pub item_name: String,
    /// Internal SKU
    #[serde(default)]
    pub sku: Option<String>,
    /// Vendor part number; shown instead of the SKU when present
    #[serde(default)]
    pub part_number: Option<String>,
    /// Ordered quantity
    pub ordered_quantity: f64,
    /// Price per unit
    pub unit_price: f64,
}

/// A purchase order with vendor, addresses and lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseOrderRecord {
    /// Human-facing identifier, e.g. `PO-0042`
    pub display_id: Option<String>,
    /// Legacy order number; used when there is no display id
    pub order_number: Option<String>,
    /// Workflow status (`snake_case`)
    pub status: Option<String>,
    /// Expected arrival date
    pub expected_date: Option<String>,
    /// Creation timestamp, shown as the PO date
    pub created_at: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
    /// Stored subtotal; computed from lines when absent
    pub subtotal: Option<f64>,
    /// Tax amount
    pub tax: Option<f64>,
    /// Shipping charge
    pub shipping: Option<f64>,
    /// Stored total; computed when absent
    pub total: Option<f64>,
    /// Supplier
    pub vendor: Option<Vendor>,
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
    /// Bill-to name
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
    /// Ordered lines
    pub items: Vec<PurchaseOrderItem>,
}

/// Computed purchase order totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurchaseOrderTotals {
    /// Stored or `Σ unit_price × ordered_quantity`
    pub subtotal: f64,
    /// Stored or zero
    pub tax: f64,
    /// Stored or zero
    pub shipping: f64,
    /// Stored or `subtotal + tax + shipping`
    pub total: f64,
}

impl PurchaseOrderRecord {
    pub(crate) fn document_id(&self) -> Option<String> {
        first_present(&[self.display_id.as_deref(), self.order_number.as_deref()])
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

    fn bill_to(&self) -> AddressParts<'_> {
        AddressParts {
            name: self.bill_to_name.as_deref(),
            address1: self.bill_to_address1.as_deref(),
            address2: self.bill_to_address2.as_deref(),
            city: self.bill_to_city.as_deref(),
            state: self.bill_to_state.as_deref(),
            postal: self.bill_to_postal_code.as_deref(),
            country: self.bill_to_country.as_deref(),
            phone: None,
        }
    }

    /// Totals with the same fallbacks the order service uses.
    pub fn totals(&self) -> Result<PurchaseOrderTotals> {
        let subtotal = match finite_opt("subtotal", self.subtotal)? {
            Some(stored) => stored,
            None => sum_finite("unit_price", &self.items, |i| i.unit_price * i.ordered_quantity)?,
        };
        let tax = finite_opt("tax", self.tax)?.unwrap_or(0.0);
        let shipping = finite_opt("shipping", self.shipping)?.unwrap_or(0.0);
        let total = finite_opt("total", self.total)?.unwrap_or(subtotal + tax + shipping);
        Ok(PurchaseOrderTotals {
            subtotal,
            tax,
            shipping,
            total,
        })
    }

    fn vendor_lines(&self) -> Vec<String> {
        let Some(vendor) = &self.vendor else {
            return or_placeholder(Vec::new());
        };
        or_placeholder(present_lines(vec![
            non_empty(Some(&vendor.name)),
            non_empty(vendor.contact_name.as_deref()),
            non_empty(vendor.email.as_deref()),
            non_empty(vendor.phone.as_deref()),
            non_empty(vendor.payment_terms.as_deref()).map(|terms| format!("Terms: {}", terms)),
        ]))
    }

    fn lines(&self, fmt: &dyn Formatters) -> Result<Vec<PricedLine>> {
        self.items
            .iter()
            .map(|item| {
                let unit = finite("unit_price", item.unit_price)?;
                let quantity = finite("ordered_quantity", item.ordered_quantity)?;
                Ok(PricedLine {
                    name: item.item_name.clone(),
                    sku: first_present(&[item.part_number.as_deref(), item.sku.as_deref()]),
                    quantity,
                    unit_price: fmt.format_currency(Some(unit)),
                    total: fmt.format_currency(Some(unit * quantity)),
                })
            })
            .collect()
    }

    pub(crate) fn to_document(&self, fmt: &dyn Formatters) -> Result<Document> {
        let mut doc = Document::new("Purchase Order")
            .with_document_id(self.document_id())
            .with_meta("Status", format_status(self.status.as_deref()))
            .with_meta("PO Date", fmt.format_short_date(self.created_at.as_deref()))
            .with_meta("Expected", fmt.format_short_date(self.expected_date.as_deref()))
            .with_section(Section::Columns {
                left: TextBlock::new("Vendor", self.vendor_lines()),
                right: Some(TextBlock::new("Ship To", format_address_lines(&self.ship_to()))),
            });

        let bill_to = self.bill_to();
        if !bill_to.is_empty() {
            doc.push(Section::Text(TextBlock::new("Bill To", format_address_lines(&bill_to))));
        }

        doc.push(Section::table("Items", priced_columns(), self.lines(fmt)?));

        let totals = self.totals()?;
        doc.push(Section::Totals(vec![
            TotalsRow::new("Subtotal", fmt.format_currency(Some(totals.subtotal))),
            TotalsRow::new("Tax", fmt.format_currency(Some(totals.tax))),
            TotalsRow::new("Shipping", fmt.format_currency(Some(totals.shipping))),
            TotalsRow::new("Total", fmt.format_currency(Some(totals.total))),
        ]));

        if let Some(notes) = non_empty(self.notes.as_deref()) {
            doc.push(Section::Text(TextBlock::new("Notes", vec![notes])));
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LocaleFormatter;

    fn item(name: &str, quantity: f64, unit_price: f64) -> PurchaseOrderItem {
        PurchaseOrderItem {
            item_name: name.to_string(),
            sku: None,
            part_number: None,
            ordered_quantity: quantity,
            unit_price,
        }
    }

    fn order() -> PurchaseOrderRecord {
        PurchaseOrderRecord {
            display_id: Some("PO-0042".into()),
            status: Some("partially_received".into()),
            tax: Some(5.96),
            shipping: Some(0.0),
            items: vec![item("Bolt", 2.0, 10.0), item("Bracket", 1.0, 25.5), item("Nut", 4.0, 7.25)],
            ..Default::default()
        }
    }

    #[test]
    fn test_computed_totals() {
        let totals = order().totals().unwrap();
        assert!((totals.subtotal - 74.5).abs() < 1e-9);
        assert!((totals.total - 80.46).abs() < 1e-9);
    }

    #[test]
    fn test_stored_totals_win() {
        let record = PurchaseOrderRecord {
            subtotal: Some(70.0),
            total: Some(99.0),
            ..order()
        };
        let totals = record.totals().unwrap();
        assert_eq!((totals.subtotal, totals.total), (70.0, 99.0));
    }

    #[test]
    fn test_sections() {
        let doc = order().to_document(&LocaleFormatter::en_us()).unwrap();
        assert_eq!(doc.document_id.as_deref(), Some("PO-0042"));
        assert_eq!(doc.meta[0].value, "Partially Received");
        let kinds: Vec<_> = doc.sections.iter().map(Section::kind).collect();
        assert_eq!(kinds, vec!["columns", "table", "totals"]);
        let Section::Totals(rows) = &doc.sections[2] else {
            panic!("expected totals");
        };
        assert_eq!(rows[0].value, "$74.50");
        assert_eq!(rows[3].value, "$80.46");
    }

    #[test]
    fn test_bill_to_and_notes_when_present() {
        let record = PurchaseOrderRecord {
            bill_to_state: Some("CA".into()),
            notes: Some("Deliver to dock 2".into()),
            ..order()
        };
        let doc = record.to_document(&LocaleFormatter::en_us()).unwrap();
        let kinds: Vec<_> = doc.sections.iter().map(Section::kind).collect();
        assert_eq!(kinds, vec!["columns", "text", "table", "totals", "text"]);
    }

    #[test]
    fn test_vendor_lines() {
        assert_eq!(order().vendor_lines(), vec!["-"]);
        let record = PurchaseOrderRecord {
            vendor: Some(Vendor {
                name: "Fastenal".into(),
                payment_terms: Some("Net 30".into()),
                ..Default::default()
            }),
            ..order()
        };
        assert_eq!(record.vendor_lines(), vec!["Fastenal", "Terms: Net 30"]);
    }

    #[test]
    fn test_part_number_preferred_over_sku() {
        let mut record = order();
        record.items[0].sku = Some("SKU-1".into());
        record.items[0].part_number = Some("PN-9".into());
        record.items[1].sku = Some("SKU-2".into());
        let lines = record.lines(&LocaleFormatter::en_us()).unwrap();
        assert_eq!(lines[0].sku.as_deref(), Some("PN-9"));
        assert_eq!(lines[1].sku.as_deref(), Some("SKU-2"));
        assert_eq!(lines[2].sku, None);
        assert_eq!(lines[2].total, "$29.00");
    }

    #[test]
    fn test_nan_price_is_malformed() {
        let mut record = order();
        record.items[1].unit_price = f64::NAN;
        assert!(record.to_document(&LocaleFormatter::en_us()).is_err());
    }
}
