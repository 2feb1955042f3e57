mod common;

use docmerge::driver::{PairOutcome, RecordSource};
use docmerge::flatten::FieldFlattener;
use docmerge::format::{NoTranslation, Translations};
use docmerge::framework::{InMemoryDocuments, ServiceError};
use docmerge::lifecycle::MergeSystem;
use docmerge::model::{Record, SchemaIntrospector};
use std::sync::Arc;

const QUOTE: &str = "{{name}} for {{partner_id}} ({{partner_id.company_id}}): \
{{amount_total}} due {{validity_date}} [{{state}}] confirmed={{confirmed}}";

const LINES: &str = "{{order_line.product_id}} x {{order_line.product_uom_qty}} @ {{order_line.price_unit}}";

/// Full end-to-end run: real document actor, in-memory backend, two orders.
#[tokio::test]
async fn test_full_merge_system_integration() {
    let backend = InMemoryDocuments::new()
        .with_template("quote", QUOTE)
        .with_template("lines", LINES);
    let system = MergeSystem::new(
        common::registry(),
        Arc::new(common::orders()),
        backend,
        Arc::new(Translations::new().with("True", "Yes").with("False", "No")),
    );

    let report = system
        .run(&common::config(&["quote", "lines"]))
        .await
        .expect("batch failed");

    assert_eq!(report.pairs().len(), 4);
    assert_eq!(report.succeeded(), 4);
    assert_eq!(report.failed(), 0);

    let names: Vec<&str> = report.pairs().iter().map(|p| p.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["SaleOrder#1", "SaleOrder#1", "SaleOrder#2", "SaleOrder#2"]
    );

    let backend = system.shutdown().await.expect("actor panicked");
    assert_eq!(backend.len(), 4);

    let first = backend.find("SaleOrder#1", "quote").expect("missing copy");
    assert_eq!(first.folder, "quotations");
    assert_eq!(
        first.body,
        "S00001 for Alice (Acme Corp): 320.00 due 04/04/2024 [Sales Order] confirmed=Yes"
    );

    // Absent partner and date still replace their placeholders.
    let second = backend.find("SaleOrder#2", "quote").expect("missing copy");
    assert_eq!(second.body, "S00002 for  (): 0.00 due  [Quotation] confirmed=No");

    let lines = backend.find("SaleOrder#1", "lines").expect("missing copy");
    assert_eq!(lines.body, "[BOLT-8,NUT-8] x [200,50] @ [1.24,0.36]");

    let empty_lines = backend.find("SaleOrder#2", "lines").expect("missing copy");
    assert_eq!(empty_lines.body, " x  @ ");
}

#[tokio::test]
async fn test_missing_template_only_fails_its_own_pairs() {
    let backend = InMemoryDocuments::new().with_template("quote", QUOTE);
    let system = MergeSystem::new(
        common::registry(),
        Arc::new(common::orders()),
        backend,
        Arc::new(NoTranslation),
    );

    let report = system
        .run(&common::config(&["quote", "delivery-note"]).with_workers(1))
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 2);
    for failure in report.failures() {
        assert_eq!(failure.template_id, "delivery-note");
        assert_eq!(
            failure.outcome,
            PairOutcome::Failed {
                error: ServiceError::NotFound("delivery-note".into())
            }
        );
    }

    let backend = system.shutdown().await.unwrap();
    assert_eq!(backend.len(), 2);
}

#[tokio::test]
async fn test_unknown_model_sends_nothing() {
    let system = MergeSystem::new(
        common::registry(),
        Arc::new(common::orders()),
        InMemoryDocuments::new().with_template("quote", QUOTE),
        Arc::new(NoTranslation),
    );

    let mut config = common::config(&["quote"]);
    config.groups[0].model = "Invoice".into();
    assert!(system.run(&config).await.is_err());

    let backend = system.shutdown().await.unwrap();
    assert!(backend.is_empty());
}

#[tokio::test]
async fn test_flattened_keys_of_a_full_order() {
    let registry = common::registry();
    let flattener = FieldFlattener::new(registry.clone(), Arc::new(NoTranslation));
    let schema = registry.schema("SaleOrder").unwrap();

    let order = common::orders()
        .fetch("SaleOrder", 1)
        .await
        .unwrap()
        .remove(0);
    let fields = flattener.flatten(&schema, &order);

    assert_eq!(fields.get("date_order"), Some("2024-03-05T14:30:00"));
    assert_eq!(fields.get("partner_id.email"), Some("alice@acme.test"));
    assert_eq!(fields.get("partner_id.company_id.name"), Some("Acme Corp"));
    // Company has no partner back-reference set; its sub-fields are still emitted.
    assert_eq!(fields.get("partner_id.company_id.partner_id"), Some(""));
    assert_eq!(fields.get("partner_id.company_id.partner_id.email"), Some(""));
    assert!(!fields.contains_key("order_line"));
    assert!(fields.keys().all(|k| k.split('.').count() <= 4));
}

#[test]
fn test_cyclic_records_terminate() {
    let registry = common::registry();
    let flattener = FieldFlattener::new(registry.clone(), Arc::new(NoTranslation)).with_max_depth(6);

    // Partner → Company → Partner, walked with a deeper bound than the default
    let company = Record::new("Company", 1)
        .with("name", "Acme Corp")
        .with("partner_id", Record::new("Partner", 10).with("name", "Alice"));
    let partner = Record::new("Partner", 10)
        .with("name", "Alice")
        .with("company_id", company);

    let fields = flattener.flatten(&registry.schema("Partner").unwrap(), &partner);
    assert!(fields.keys().all(|k| k.split('.').count() <= 7));
    assert_eq!(fields.get("company_id.partner_id.name"), Some("Alice"));
}
