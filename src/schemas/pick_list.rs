//! Pick list adapter.

use super::{first_present, quantity_cell};
use crate::document::{Align, Column, Document, Section, TextBlock};
use crate::error::Result;
use crate::format::{
    format_address_lines, format_status, non_empty, safe_text, AddressParts, Formatters,
};
use serde::{Deserialize, Serialize};

/// Pick list header fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickListHeader {
    /// Human-facing identifier, e.g. `PL-0007`
    pub display_id: Option<String>,
    /// Legacy number; used when there is no display id
    pub pick_list_number: Option<String>,
    /// Workflow status (`snake_case`)
    pub status: Option<String>,
    /// Due date
    pub due_date: Option<String>,
    /// What happens to picked stock, e.g. `decrement`
    pub item_outcome: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
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
    /// Creation timestamp
    pub created_at: Option<String>,
}

/// One line to pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickListItem {
    /// Item name
    pub item_name: String,
    /// Item SKU
    #[serde(default)]
    pub item_sku: Option<String>,
    /// Quantity requested
    pub requested_quantity: f64,
    /// Quantity picked so far
    #[serde(default)]
    pub picked_quantity: f64,
}

/// A pick list with its lines and the people involved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickListRecord {
    /// Header fields
    pub pick_list: PickListHeader,
    /// Lines to pick
    pub items: Vec<PickListItem>,
    /// Assignee display name
    pub assigned_to_name: Option<String>,
    /// Creator display name
    pub created_by_name: Option<String>,
}

impl PickListRecord {
    pub(crate) fn document_id(&self) -> Option<String> {
        first_present(&[
            self.pick_list.display_id.as_deref(),
            self.pick_list.pick_list_number.as_deref(),
        ])
    }

    fn detail_lines(&self, fmt: &dyn Formatters) -> Vec<String> {
        let header = &self.pick_list;
        vec![
            format!("Outcome: {}", format_status(header.item_outcome.as_deref())),
            format!("Assigned: {}", safe_text(self.assigned_to_name.as_deref())),
            format!("Created: {}", fmt.format_short_date(header.created_at.as_deref())),
            format!("Created by: {}", safe_text(self.created_by_name.as_deref())),
        ]
    }

    fn ship_to(&self) -> AddressParts<'_> {
        let h = &self.pick_list;
        AddressParts {
            name: h.ship_to_name.as_deref(),
            address1: h.ship_to_address1.as_deref(),
            address2: h.ship_to_address2.as_deref(),
            city: h.ship_to_city.as_deref(),
            state: h.ship_to_state.as_deref(),
            postal: h.ship_to_postal_code.as_deref(),
            country: h.ship_to_country.as_deref(),
            phone: None,
        }
    }

    pub(crate) fn to_document(&self, fmt: &dyn Formatters) -> Result<Document> {
        let header = &self.pick_list;
        let columns = vec![
            Column::new("Item", 4.0, |i: &PickListItem| Ok(i.item_name.clone())).with_wrap(true),
            Column::new("SKU", 2.0, |i: &PickListItem| Ok(i.item_sku.clone().unwrap_or_default())),
            Column::new("Requested", 1.0, |i: &PickListItem| {
                quantity_cell("requested_quantity", i.requested_quantity)
            })
            .with_align(Align::Center),
            Column::new("Picked", 1.0, |i: &PickListItem| {
                quantity_cell("picked_quantity", i.picked_quantity)
            })
            .with_align(Align::Center),
        ];

        let mut doc = Document::new("Pick List")
            .with_document_id(self.document_id())
            .with_meta("Status", format_status(header.status.as_deref()))
            .with_meta("Due", fmt.format_short_date(header.due_date.as_deref()))
            .with_meta("Assigned", safe_text(self.assigned_to_name.as_deref()))
            .with_section(Section::Columns {
                left: TextBlock::new("Pick Details", self.detail_lines(fmt)),
                right: Some(TextBlock::new("Ship To", format_address_lines(&self.ship_to()))),
            })
            .with_section(Section::table("Items", columns, self.items.clone()));

        if let Some(notes) = non_empty(header.notes.as_deref()) {
            doc.push(Section::Text(TextBlock::new("Notes", vec![notes])));
        }
        Ok(doc)
    }
}
