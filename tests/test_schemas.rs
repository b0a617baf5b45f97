//! Schema adapters fed from JSON records.

use stockdocs::document::{Document, Section};
use stockdocs::format::{DateFormat, LocaleFormatter};
use stockdocs::schemas::{build_company_branding, CompanyDetails, DocumentRecord};
use stockdocs::Error;

fn document(json: &str) -> Document {
    let record = DocumentRecord::from_json_str(json).unwrap();
    record.to_document(&LocaleFormatter::en_us(), None).unwrap()
}

fn meta(doc: &Document) -> Vec<(String, String)> {
    doc.meta.iter().map(|m| (m.label.clone(), m.value.clone())).collect()
}

fn block_lines<'a>(doc: &'a Document, title: &str) -> &'a [String] {
    for section in &doc.sections {
        match section {
            Section::Text(block) if block.title == title => return &block.lines,
            Section::Columns { left, right } => {
                if left.title == title {
                    return &left.lines;
                }
                if let Some(right) = right.as_ref().filter(|r| r.title == title) {
                    return &right.lines;
                }
            },
            _ => {},
        }
    }
    panic!("no block titled {}", title)
}

fn totals(doc: &Document) -> Vec<(String, String)> {
    doc.sections
        .iter()
        .find_map(|s| match s {
            Section::Totals(rows) => Some(
                rows.iter()
                    .map(|r| (r.label.clone(), r.value.clone()))
                    .collect(),
            ),
            _ => None,
        })
        .unwrap_or_default()
}

fn cells(doc: &Document, row: usize) -> Vec<String> {
    let data = doc
        .sections
        .iter()
        .find_map(|s| match s {
            Section::Table { data, .. } => Some(data),
            _ => None,
        })
        .unwrap();
    (0..data.columns().len())
        .map(|c| data.cell(row, c).unwrap())
        .collect()
}

mod purchase_order_tests {
    use super::*;

    const PO: &str = r#"{
        "document_type": "purchase_order",
        "display_id": null,
        "order_number": "PO-2025-017",
        "status": "submitted",
        "created_at": "2025-03-01T15:04:05Z",
        "expected_date": "2025-03-15",
        "tax": 5.96,
        "vendor": {"name": "Fastenal", "email": "orders@fastenal.test", "payment_terms": "Net 30"},
        "ship_to_name": "Main Warehouse",
        "ship_to_city": "Reno",
        "ship_to_state": "NV",
        "ship_to_postal_code": "89501",
        "items": [
            {"item_name": "Hex bolt M8", "sku": "HB-8", "ordered_quantity": 2, "unit_price": 10.0},
            {"item_name": "Angle bracket", "part_number": "AB-55", "ordered_quantity": 1, "unit_price": 25.5},
            {"item_name": "Nyloc nut", "ordered_quantity": 4, "unit_price": 7.25}
        ]
    }"#;

    #[test]
    fn test_header() {
        let doc = document(PO);
        assert_eq!(doc.title, "Purchase Order");
        assert_eq!(doc.document_id.as_deref(), Some("PO-2025-017"));
        assert_eq!(
            meta(&doc),
            vec![
                ("Status".to_string(), "Submitted".to_string()),
                ("PO Date".to_string(), "Mar 1, 2025".to_string()),
                ("Expected".to_string(), "Mar 15, 2025".to_string()),
            ]
        );
    }

    #[test]
    fn test_vendor_and_ship_to() {
        let doc = document(PO);
        assert_eq!(block_lines(&doc, "Vendor"), ["Fastenal", "orders@fastenal.test", "Terms: Net 30"]);
        assert_eq!(block_lines(&doc, "Ship To"), ["Main Warehouse", "Reno, NV 89501"]);
    }

    #[test]
    fn test_items_and_totals() {
        let doc = document(PO);
        assert_eq!(cells(&doc, 0), ["Hex bolt M8", "HB-8", "2", "$10.00", "$20.00"]);
        assert_eq!(cells(&doc, 1)[1], "AB-55");
        assert_eq!(cells(&doc, 2)[1], "");
        let values: Vec<String> = totals(&doc).into_iter().map(|(_, v)| v).collect();
        assert_eq!(values, ["$74.50", "$5.96", "$0.00", "$80.46"]);
    }
}

mod pick_list_tests {
    use super::*;

    #[test]
    fn test_pick_list_record() {
        let doc = document(
            r#"{
            "document_type": "pick_list",
            "pick_list": {
                "display_id": "PL-0007",
                "status": "partially_picked",
                "due_date": "2025-05-02",
                "item_outcome": "decrement",
                "created_at": "2025-05-01 08:00:00+00",
                "notes": "Use cart 3"
            },
            "items": [{"item_name": "Zip ties", "item_sku": "ZT-100", "requested_quantity": 5, "picked_quantity": 3}],
            "assigned_to_name": null,
            "created_by_name": "Alex"
        }"#,
        );
        assert_eq!(meta(&doc)[0].1, "Partially Picked");
        assert_eq!(meta(&doc)[2].1, "-");
        assert_eq!(
            block_lines(&doc, "Pick Details"),
            ["Outcome: Decrement", "Assigned: -", "Created: May 1, 2025", "Created by: Alex"]
        );
        assert_eq!(block_lines(&doc, "Ship To"), ["-"]);
        assert_eq!(cells(&doc, 0), ["Zip ties", "ZT-100", "5", "3"]);
        assert_eq!(block_lines(&doc, "Notes"), ["Use cart 3"]);
    }
}

mod sales_order_tests {
    use super::*;

    #[test]
    fn test_sales_order_record() {
        let doc = document(
            r#"{
            "document_type": "sales_order",
            "display_id": "SO-0100",
            "status": "confirmed",
            "priority": "high",
            "discount_total": 5,
            "tax_total": 8,
            "shipping_total": 12,
            "customer": {"name": "Northwind", "contact_name": "Ana", "phone": "555-0199"},
            "bill_to_address1": "9 Harbor Rd",
            "bill_to_city": "Tacoma",
            "bill_to_state": "WA",
            "items": [
                {"item_name": "Crate", "sku": "CR-1", "quantity_ordered": 2, "unit_price": 20, "line_total": 40},
                {"item_name": "Lid", "sku": null, "quantity_ordered": 3, "unit_price": 20, "line_total": 60}
            ],
            "customer_notes": "Call before delivery"
        }"#,
        );
        assert_eq!(meta(&doc).last().unwrap(), &("Priority".to_string(), "High".to_string()));
        assert_eq!(
            block_lines(&doc, "Bill To"),
            ["Northwind", "Ana", "555-0199", "9 Harbor Rd", "Tacoma, WA"]
        );
        assert_eq!(
            totals(&doc),
            vec![
                ("Subtotal".to_string(), "$100.00".to_string()),
                ("Discount".to_string(), "$5.00".to_string()),
                ("Tax".to_string(), "$8.00".to_string()),
                ("Shipping".to_string(), "$12.00".to_string()),
                ("Total".to_string(), "$115.00".to_string()),
            ]
        );
        assert_eq!(block_lines(&doc, "Customer Notes"), ["Call before delivery"]);
    }
}

mod delivery_order_tests {
    use super::*;

    #[test]
    fn test_delivery_order_record() {
        let doc = document(
            r#"{
            "document_type": "delivery_order",
            "display_id": null,
            "status": "delivered",
            "carrier": "UPS",
            "tracking_number": "1Z999",
            "shipping_method": "Ground",
            "delivered_at": "2025-06-10T17:45:00Z",
            "total_packages": 2,
            "total_weight": 14.5,
            "weight_unit": "kg",
            "received_by": "J. Doe",
            "sales_order": {"display_id": "SO-0100", "customers": {"name": "Northwind"}},
            "items": [{"item_name": "Crate", "sku": "CR-1", "quantity_shipped": 2, "quantity_delivered": 2}]
        }"#,
        );
        assert_eq!(doc.document_id.as_deref(), Some("SO-0100"));
        assert_eq!(meta(&doc)[2].1, "UPS");
        assert_eq!(
            block_lines(&doc, "Shipment"),
            [
                "Tracking: 1Z999",
                "Method: Ground",
                "Dispatched: -",
                "Delivered: Jun 10, 2025",
                "Packages: 2",
                "Weight: 14.5 kg"
            ]
        );
        assert_eq!(block_lines(&doc, "Delivery Notes"), ["Received by: J. Doe"]);
        assert!(totals(&doc).is_empty());
    }
}

mod invoice_tests {
    use super::*;

    #[test]
    fn test_invoice_record() {
        let doc = document(
            r#"{
            "document_type": "invoice",
            "invoice_number": "INV-2025-0001",
            "status": "sent",
            "invoice_date": "2025-01-31",
            "due_date": "2025-03-02",
            "sent_to_email": "ap@northwind.test",
            "bill_to_name": "Northwind Traders",
            "bill_to_city": null,
            "bill_to_state": "CA",
            "bill_to_postal_code": "94107",
            "subtotal": 120,
            "discount_amount": 0,
            "tax_amount": 9.6,
            "total": 129.6,
            "amount_paid": 29.6,
            "balance_due": 100,
            "terms_and_conditions": "Net 30",
            "items": [{"item_name": "Pallet wrap", "quantity": 2, "unit_price": 60, "line_total": 120}]
        }"#,
        );
        let Section::Summary { value, .. } = &doc.sections[0] else {
            panic!("expected balance callout");
        };
        assert_eq!(value, "$100.00");
        assert_eq!(block_lines(&doc, "Bill To"), ["Northwind Traders", "CA 94107"]);
        assert_eq!(totals(&doc).last().unwrap().1, "$100.00");
        assert_eq!(block_lines(&doc, "Sent Details"), ["Sent to: ap@northwind.test"]);
        assert_eq!(block_lines(&doc, "Terms"), ["Net 30"]);
    }

    #[test]
    fn test_locale_drives_formatting() {
        let record = DocumentRecord::from_json_str(
            r#"{"document_type": "invoice", "invoice_date": "2025-01-31", "subtotal": 1234.5,
                "items": []}"#,
        )
        .unwrap();
        let fmt = LocaleFormatter::de_de();
        let doc = record.to_document(&fmt, None).unwrap();
        assert_eq!(meta(&doc)[1].1, "31 Jan 2025");
        assert_eq!(totals(&doc)[0].1, "1.234,50 €");

        let iso = LocaleFormatter::en_us().with_date_format(DateFormat::Iso);
        let doc = record.to_document(&iso, None).unwrap();
        assert_eq!(meta(&doc)[1].1, "31 Jan 2025");
    }
}

mod record_tests {
    use super::*;

    #[test]
    fn test_missing_required_item_field_is_malformed() {
        let err = DocumentRecord::from_json_str(
            r#"{"document_type": "invoice", "items": [{"item_name": "x"}]}"#,
        )
        .unwrap_err();
        let Error::MalformedInput { field, reason } = err else {
            panic!("expected malformed input");
        };
        assert_eq!(field, "record");
        assert!(reason.contains("quantity"), "{reason}");
    }

    #[test]
    fn test_kind_and_id() {
        let record = DocumentRecord::from_json_str(
            r#"{"document_type": "delivery_order", "display_id": "DO 31"}"#,
        )
        .unwrap();
        assert_eq!(record.kind(), "delivery-order");
        assert_eq!(record.document_id().as_deref(), Some("DO 31"));
    }

    #[test]
    fn test_branding_is_attached() {
        let details = CompanyDetails {
            email: Some("ops@acme.test".into()),
            ..Default::default()
        };
        let branding = build_company_branding(Some("Acme"), &details);
        let record = DocumentRecord::from_json_str(r#"{"document_type": "pick_list"}"#).unwrap();
        let doc = record.to_document(&LocaleFormatter::en_us(), branding.as_ref()).unwrap();
        let attached = doc.branding.unwrap();
        assert_eq!(attached.company_name.as_deref(), Some("Acme"));
        assert_eq!(attached.contact_lines, vec!["ops@acme.test"]);
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = DocumentRecord::from_json_str(
            r#"{"document_type": "sales_order", "display_id": "SO-9", "items": []}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""document_type":"sales_order""#));
        assert_eq!(DocumentRecord::from_json_str(&json).unwrap(), record);
    }
}
