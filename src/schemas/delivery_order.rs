//! Delivery order adapter.

use super::{finite, finite_opt, first_present, present_lines, quantity_cell};
use crate::document::{Align, Column, Document, Section, TextBlock};
use crate::error::Result;
use crate::format::{
    combine_city_state_postal, format_quantity, format_status, non_empty, or_placeholder,
    safe_text, Formatters,
};
use serde::{Deserialize, Serialize};

/// Customer of the linked sales order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryCustomer {
    /// Customer name
    pub name: String,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
}

/// The sales order a delivery fulfils.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedSalesOrder {
    /// Sales order display id; the fallback document id
    pub display_id: Option<String>,
    /// Ordering customer
    pub customers: Option<DeliveryCustomer>,
}

/// One shipped line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOrderItem {
    /// Item name
    pub item_name: String,
    /// Item SKU
    #[serde(default)]
    pub sku: Option<String>,
    /// Quantity shipped
    pub quantity_shipped: f64,
    /// Quantity confirmed delivered
    #[serde(default)]
    pub quantity_delivered: f64,
}

/// An outbound delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryOrderRecord {
    /// Human-facing identifier, e.g. `DO-0031`
    pub display_id: Option<String>,
    /// Workflow status (`snake_case`)
    pub status: Option<String>,
    /// Carrier name
    pub carrier: Option<String>,
    /// Carrier tracking number
    pub tracking_number: Option<String>,
    /// Shipping method, e.g. `ground`
    pub shipping_method: Option<String>,
    /// Scheduled ship date
    pub scheduled_date: Option<String>,
    /// Dispatch timestamp
    pub dispatched_at: Option<String>,
    /// Delivery timestamp
    pub delivered_at: Option<String>,
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
    /// Ship-to phone
    pub ship_to_phone: Option<String>,
    /// Who signed for the delivery
    pub received_by: Option<String>,
    /// Free-form delivery notes
    pub delivery_notes: Option<String>,
    /// Number of packages
    pub total_packages: f64,
    /// Total weight; omitted when zero or absent
    pub total_weight: Option<f64>,
    /// Weight unit, e.g. `kg`
    pub weight_unit: Option<String>,
    /// Linked sales order
    pub sales_order: Option<LinkedSalesOrder>,
    /// Shipped lines
    pub items: Vec<DeliveryOrderItem>,
}

impl DeliveryOrderRecord {
    pub(crate) fn document_id(&self) -> Option<String> {
        first_present(&[
            self.display_id.as_deref(),
            self.sales_order.as_ref().and_then(|so| so.display_id.as_deref()),
        ])
    }

    fn ship_to_lines(&self) -> Vec<String> {
        let customer = self.sales_order.as_ref().and_then(|so| so.customers.as_ref());
        or_placeholder(present_lines(vec![
            non_empty(customer.map(|c| c.name.as_str())),
            non_empty(customer.and_then(|c| c.email.as_deref())),
            non_empty(customer.and_then(|c| c.phone.as_deref())),
            non_empty(self.ship_to_name.as_deref()),
            non_empty(self.ship_to_address1.as_deref()),
            non_empty(self.ship_to_address2.as_deref()),
            combine_city_state_postal(
                self.ship_to_city.as_deref(),
                self.ship_to_state.as_deref(),
                self.ship_to_postal_code.as_deref(),
            ),
            non_empty(self.ship_to_country.as_deref()),
            non_empty(self.ship_to_phone.as_deref()).map(|phone| format!("Phone: {}", phone)),
        ]))
    }

    fn shipment_lines(&self, fmt: &dyn Formatters) -> Result<Vec<String>> {
        let packages = finite("total_packages", self.total_packages)?;
        let weight = match finite_opt("total_weight", self.total_weight)? {
            Some(w) if w != 0.0 => {
                let unit = non_empty(self.weight_unit.as_deref()).unwrap_or_default();
                Some(format!("Weight: {} {}", format_quantity(w), unit).trim_end().to_string())
            },
            _ => None,
        };
        Ok(present_lines(vec![
            Some(format!("Tracking: {}", safe_text(self.tracking_number.as_deref()))),
            Some(format!("Method: {}", safe_text(self.shipping_method.as_deref()))),
            Some(format!("Dispatched: {}", fmt.format_short_date(self.dispatched_at.as_deref()))),
            Some(format!("Delivered: {}", fmt.format_short_date(self.delivered_at.as_deref()))),
            Some(format!("Packages: {}", format_quantity(packages))),
            weight,
        ]))
    }

    fn note_lines(&self) -> Vec<String> {
        or_placeholder(present_lines(vec![
            non_empty(self.received_by.as_deref()).map(|name| format!("Received by: {}", name)),
            non_empty(self.delivery_notes.as_deref()),
        ]))
    }

    pub(crate) fn to_document(&self, fmt: &dyn Formatters) -> Result<Document> {
        let columns = vec![
            Column::new("Item", 4.0, |i: &DeliveryOrderItem| Ok(i.item_name.clone())).with_wrap(true),
            Column::new("SKU", 2.0, |i: &DeliveryOrderItem| Ok(i.sku.clone().unwrap_or_default())),
            Column::new("Shipped", 1.0, |i: &DeliveryOrderItem| {
                quantity_cell("quantity_shipped", i.quantity_shipped)
            })
            .with_align(Align::Center),
            Column::new("Delivered", 1.0, |i: &DeliveryOrderItem| {
                quantity_cell("quantity_delivered", i.quantity_delivered)
            })
            .with_align(Align::Center),
        ];

        Ok(Document::new("Delivery Order")
            .with_document_id(self.document_id())
            .with_meta("Status", format_status(self.status.as_deref()))
            .with_meta("Scheduled", fmt.format_short_date(self.scheduled_date.as_deref()))
            .with_meta("Carrier", safe_text(self.carrier.as_deref()))
            .with_section(Section::Columns {
                left: TextBlock::new("Ship To", self.ship_to_lines()),
                right: Some(TextBlock::new("Shipment", self.shipment_lines(fmt)?)),
            })
            .with_section(Section::table("Items", columns, self.items.clone()))
            .with_section(Section::Text(TextBlock::new("Delivery Notes", self.note_lines()))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LocaleFormatter;

    fn record() -> DeliveryOrderRecord {
        DeliveryOrderRecord {
            status: Some("in_transit".into()),
            carrier: Some("UPS".into()),
            tracking_number: Some("1Z999".into()),
            total_packages: 3.0,
            sales_order: Some(LinkedSalesOrder {
                display_id: Some("SO-0100".into()),
                customers: Some(DeliveryCustomer {
                    name: "Northwind".into(),
                    ..Default::default()
                }),
            }),
            ship_to_city: Some("Reno".into()),
            ship_to_phone: Some("555-0100".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_id_falls_back_to_sales_order() {
        assert_eq!(record().document_id().as_deref(), Some("SO-0100"));
    }

    #[test]
    fn test_ship_to_lines() {
        assert_eq!(record().ship_to_lines(), vec!["Northwind", "Reno", "Phone: 555-0100"]);
        assert_eq!(DeliveryOrderRecord::default().ship_to_lines(), vec!["-"]);
    }

    #[test]
    fn test_weight_line_only_when_non_zero() {
        let fmt = LocaleFormatter::en_us();
        let lines = record().shipment_lines(&fmt).unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Tracking: 1Z999");
        assert_eq!(lines[4], "Packages: 3");

        let weighed = DeliveryOrderRecord {
            total_weight: Some(12.5),
            weight_unit: Some("kg".into()),
            ..record()
        };
        assert_eq!(weighed.shipment_lines(&fmt).unwrap()[5], "Weight: 12.5 kg");

        let zero = DeliveryOrderRecord {
            total_weight: Some(0.0),
            ..record()
        };
        assert_eq!(zero.shipment_lines(&fmt).unwrap().len(), 5);
    }

    #[test]
    fn test_delivery_notes_always_present() {
        let doc = record().to_document(&LocaleFormatter::en_us()).unwrap();
        let Some(Section::Text(block)) = doc.sections.last() else {
            panic!("expected notes block");
        };
        assert_eq!(block.title, "Delivery Notes");
        assert_eq!(block.lines, vec!["-"]);

        let signed = DeliveryOrderRecord {
            received_by: Some("J. Doe".into()),
            delivery_notes: Some("Left at reception".into()),
            ..record()
        };
        assert_eq!(signed.note_lines(), vec!["Received by: J. Doe", "Left at reception"]);
    }
}
