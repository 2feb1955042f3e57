//! # docmerge demo
//!
//! Renders quotations for a few sale orders against an in-memory document service.
//!
//! 1.  Loads the schemas from JSON into a [`SchemaRegistry`].
//! 2.  Starts a [`MergeSystem`] around [`InMemoryDocuments`].
//! 3.  Runs a two-template batch, one template of which does not exist.
//! 4.  Prints the rendered documents and the render-service envelope of the first order.

use chrono::{NaiveDate, NaiveDateTime};
use docmerge::driver::{self, BatchConfig, InMemoryRecordSource, PairOutcome, RecordSource};
use docmerge::format::Translations;
use docmerge::framework::InMemoryDocuments;
use docmerge::lifecycle::{setup_tracing, MergeSystem};
use docmerge::merge::{self, wire::BatchUpdate};
use docmerge::model::{Record, SchemaRegistry};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, Instrument};

const SCHEMAS: &str = r#"{
  "schemas": [
    { "name": "SaleOrder", "properties": [
        { "name": "name", "kind": "scalar" },
        { "name": "state", "kind": "scalar", "lookup": "sale.order.state" },
        { "name": "confirmed", "kind": "scalar" },
        { "name": "date_order", "kind": "scalar" },
        { "name": "validity_date", "kind": "scalar" },
        { "name": "amount_total", "kind": "scalar" },
        { "name": "partner_id", "kind": "reference", "target": "Partner", "display_field": "name" },
        { "name": "order_line", "kind": "collection", "target": "SaleOrderLine" }
    ]},
    { "name": "Partner", "properties": [
        { "name": "name", "kind": "scalar" },
        { "name": "email", "kind": "scalar" },
        { "name": "company_id", "kind": "reference", "target": "Company", "display_field": "name" }
    ]},
    { "name": "Company", "properties": [
        { "name": "name", "kind": "scalar" },
        { "name": "partner_id", "kind": "reference", "target": "Partner", "display_field": "name" }
    ]},
    { "name": "SaleOrderLine", "properties": [
        { "name": "product_id", "kind": "reference", "target": "Product", "display_field": "default_code" },
        { "name": "product_uom_qty", "kind": "scalar" },
        { "name": "price_unit", "kind": "scalar" }
    ]},
    { "name": "Product", "properties": [
        { "name": "default_code", "kind": "scalar" },
        { "name": "name", "kind": "scalar" }
    ]}
  ],
  "lookups": {
    "sale.order.state": { "draft": "Quotation", "sale": "Sales Order", "cancel": "Cancelled" }
  }
}"#;

const CONFIG: &str = r#"{
  "groups": [
    { "model": "SaleOrder",
      "destination_folder": "quotations",
      "templates": [ { "id": "quote", "name": "Quotation" }, { "id": "delivery-note" } ] }
  ],
  "workers": 2
}"#;

const QUOTE: &str = "{{name}} ({{state}}, confirmed: {{confirmed}})\n\
Customer: {{partner_id}} <{{partner_id.email}}> of {{partner_id.company_id}}\n\
Ordered {{date_order}}, valid until {{validity_date}}\n\
Products: {{order_line.product_id}} x {{order_line.product_uom_qty}} @ {{order_line.price_unit}}\n\
Total: {{amount_total}}";

fn date(text: &str) -> Result<NaiveDate, String> {
    text.parse().map_err(|e| format!("bad date {text}: {e}"))
}

fn date_time(text: &str) -> Result<NaiveDateTime, String> {
    text.parse().map_err(|e| format!("bad timestamp {text}: {e}"))
}

fn sale_orders() -> Result<InMemoryRecordSource, String> {
    let company = Record::new("Company", 1).with("name", "Acme Corp");
    let alice = Record::new("Partner", 10)
        .with("name", "Alice")
        .with("email", "alice@acme.test")
        .with("company_id", company);
    let bolt = Arc::new(
        Record::new("Product", 100)
            .with("default_code", "BOLT-8")
            .with("name", "Bolt M8"),
    );
    let nut = Arc::new(
        Record::new("Product", 101)
            .with("default_code", "NUT-8")
            .with("name", "Nut M8"),
    );

    let lines = vec![
        Record::new("SaleOrderLine", 1)
            .with("product_id", bolt)
            .with("product_uom_qty", 200)
            .with("price_unit", Decimal::new(1245, 3)),
        Record::new("SaleOrderLine", 2)
            .with("product_id", nut)
            .with("product_uom_qty", 200)
            .with("price_unit", Decimal::new(355, 3)),
    ];

    Ok(InMemoryRecordSource::new()
        .with_record(
            Record::new("SaleOrder", 1)
                .with("name", "S00001")
                .with("state", "sale")
                .with("confirmed", true)
                .with("date_order", date_time("2024-03-05T14:30:00")?)
                .with("validity_date", date("2024-04-04")?)
                .with("amount_total", Decimal::new(32000, 2))
                .with("partner_id", alice)
                .with("order_line", lines),
        )
        .with_record(
            Record::new("SaleOrder", 2)
                .with("name", "S00002")
                .with("state", "draft")
                .with("confirmed", false)
                .with("date_order", date_time("2024-03-06T09:00:00.250")?)
                .with("amount_total", Decimal::ZERO),
        ))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting docmerge demo");

    let registry = Arc::new(SchemaRegistry::from_json_str(SCHEMAS).map_err(|e| e.to_string())?);
    let config = BatchConfig::from_json_str(CONFIG).map_err(|e| e.to_string())?;
    let source = Arc::new(sale_orders()?);
    let localizer = Arc::new(Translations::new().with("True", "Yes").with("False", "No"));
    let backend = InMemoryDocuments::new().with_template("quote", QUOTE);

    let system = MergeSystem::new(registry.clone(), source.clone(), backend, localizer);

    // Preview what a render service would receive for the first order
    let schema = registry.require("SaleOrder").map_err(|e| e.to_string())?;
    let flattener = system.driver().flattener(config.max_depth);
    let orders = source
        .fetch("SaleOrder", 1)
        .await
        .map_err(|e| e.to_string())?;
    if let Some(order) = orders.first() {
        let envelope = driver::render_input(&flattener, &schema, order).with_output_format("docx");
        println!("Render input:\n{}\n", envelope.to_json().map_err(|e| e.to_string())?);

        let requests = merge::build(&envelope.data);
        let body = BatchUpdate::from_requests(&requests[..2.min(requests.len())]);
        println!("Batch update (first requests):\n{}\n", body.to_json().map_err(|e| e.to_string())?);
    }

    let span = tracing::info_span!("quotations");
    let report = async {
        info!("Running merge batch");
        system.run(&config).await.map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    for pair in report.pairs() {
        match &pair.outcome {
            PairOutcome::Merged {
                document_id,
                occurrences,
            } => info!(file_name = %pair.file_name, %document_id, occurrences, "Document ready"),
            PairOutcome::Failed { error: e } => {
                error!(file_name = %pair.file_name, template_id = %pair.template_id, error = %e, "Document failed")
            }
        }
    }

    let backend = system.shutdown().await.map_err(|e| e.to_string())?;

    for pair in report.pairs() {
        if let Some(document) = backend.find(&pair.file_name, &pair.template_id) {
            println!("--- {}/{} ---\n{}\n", document.folder, document.name, document.body);
        }
    }

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Application completed successfully"
    );
    Ok(())
}
