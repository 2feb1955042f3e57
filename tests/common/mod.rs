//! Shared fixtures for integration tests: a small sales schema and two orders.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use docmerge::driver::{BatchConfig, ConfigGroup, InMemoryRecordSource, TemplateRef};
use docmerge::model::{PropertyDescriptor, Record, Schema, SchemaRegistry};
use rust_decimal::Decimal;
use std::sync::Arc;

pub const STATE_TABLE: &str = "sale.order.state";

/// SaleOrder → Partner ⇄ Company, SaleOrder →* SaleOrderLine → Product.
pub fn registry() -> Arc<SchemaRegistry> {
    let registry = SchemaRegistry::builder()
        .schema(Schema::new(
            "SaleOrder",
            vec![
                PropertyDescriptor::scalar("name"),
                PropertyDescriptor::scalar("state").with_lookup(STATE_TABLE),
                PropertyDescriptor::scalar("confirmed"),
                PropertyDescriptor::scalar("date_order"),
                PropertyDescriptor::scalar("validity_date"),
                PropertyDescriptor::scalar("amount_total"),
                PropertyDescriptor::reference("partner_id", "Partner").with_display_field("name"),
                PropertyDescriptor::collection("order_line", "SaleOrderLine"),
            ],
        ))
        .schema(Schema::new(
            "Partner",
            vec![
                PropertyDescriptor::scalar("name"),
                PropertyDescriptor::scalar("email"),
                PropertyDescriptor::reference("company_id", "Company").with_display_field("name"),
            ],
        ))
        .schema(Schema::new(
            "Company",
            vec![
                PropertyDescriptor::scalar("name"),
                PropertyDescriptor::reference("partner_id", "Partner").with_display_field("name"),
            ],
        ))
        .schema(Schema::new(
            "SaleOrderLine",
            vec![
                PropertyDescriptor::reference("product_id", "Product")
                    .with_display_field("default_code"),
                PropertyDescriptor::scalar("product_uom_qty"),
                PropertyDescriptor::scalar("price_unit"),
            ],
        ))
        .schema(Schema::new(
            "Product",
            vec![
                PropertyDescriptor::scalar("default_code"),
                PropertyDescriptor::scalar("name"),
            ],
        ))
        .lookup_table(
            STATE_TABLE,
            [("draft", "Quotation"), ("sale", "Sales Order")],
        )
        .build()
        .unwrap();
    Arc::new(registry)
}

/// Order 1 is fully populated; order 2 has no partner, no lines and no validity date.
pub fn orders() -> InMemoryRecordSource {
    let company = Record::new("Company", 1).with("name", "Acme Corp");
    let alice = Record::new("Partner", 10)
        .with("name", "Alice")
        .with("email", "alice@acme.test")
        .with("company_id", company);
    let bolt = Record::new("Product", 100)
        .with("default_code", "BOLT-8")
        .with("name", "Bolt M8");
    let nut = Record::new("Product", 101)
        .with("default_code", "NUT-8")
        .with("name", "Nut M8");

    let lines = vec![
        Record::new("SaleOrderLine", 1)
            .with("product_id", bolt)
            .with("product_uom_qty", 200)
            .with("price_unit", Decimal::new(1245, 3)),
        Record::new("SaleOrderLine", 2)
            .with("product_id", nut)
            .with("product_uom_qty", 50)
            .with("price_unit", Decimal::new(355, 3)),
    ];

    InMemoryRecordSource::new()
        .with_record(
            Record::new("SaleOrder", 1)
                .with("name", "S00001")
                .with("state", "sale")
                .with("confirmed", true)
                .with(
                    "date_order",
                    NaiveDateTime::parse_from_str("2024-03-05 14:30:00", "%Y-%m-%d %H:%M:%S")
                        .unwrap(),
                )
                .with("validity_date", NaiveDate::from_ymd_opt(2024, 4, 4).unwrap())
                .with("amount_total", Decimal::new(32000, 2))
                .with("partner_id", alice)
                .with("order_line", lines),
        )
        .with_record(
            Record::new("SaleOrder", 2)
                .with("name", "S00002")
                .with("state", "draft")
                .with("confirmed", false)
                .with("amount_total", Decimal::ZERO),
        )
}

pub fn config(templates: &[&str]) -> BatchConfig {
    BatchConfig::new(vec![ConfigGroup::new(
        "SaleOrder",
        "quotations",
        templates.iter().map(|t| TemplateRef::new(*t)).collect(),
    )])
}
