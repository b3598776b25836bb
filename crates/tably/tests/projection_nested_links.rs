mod support;

use pretty_assertions::assert_eq;
use support::*;
use tably::{AstValue, BuildOptions, ContextResolver, ProjectionBuilder, Query};

fn builder_parts() -> (tably::StaticCatalog, ContextResolver) {
    (orders_catalog(), ContextResolver::new([b1()]))
}

// A wildcard nested query recurses in full: every related column shows
// up, not just row identity.
#[tokio::test]
async fn wildcard_nested_link_projects_all_columns() {
    let (catalog, contexts) = builder_parts();
    let builder = ProjectionBuilder::new(&catalog, &contexts, b1());

    let query = Query::all().nest("Customer", Query::all());
    let projection = builder
        .build(&orders(), None, &query, &BuildOptions::default())
        .await
        .unwrap();

    let customer = projection.ast["Customer"].as_nested().unwrap();
    assert_eq!(customer["Id"], AstValue::Include);
    assert_eq!(customer["Name"], AstValue::Include);
    assert_eq!(customer["Segment"], AstValue::Include);
}

// Omitting the nested query for the same link yields identity only.
#[tokio::test]
async fn bare_link_projects_identity_only() {
    let (catalog, contexts) = builder_parts();
    let builder = ProjectionBuilder::new(&catalog, &contexts, b1());

    let projection = builder
        .build(&orders(), None, &Query::all(), &BuildOptions::default())
        .await
        .unwrap();

    let customer = projection.ast["Customer"].as_nested().unwrap();
    assert!(customer.contains_key("Id"));
    assert!(customer.contains_key("Name"));
    assert!(!customer.contains_key("Segment"));

    // Identity dependencies still accumulate for the traversal.
    let deps = &projection.dependency_fields.nested["Customer"];
    assert!(deps.contains("Id"));
    assert!(deps.contains("Name"));
}

// An explicit nested field list masks the related model's other columns
// while still extracting the related primary key as a dependency.
#[tokio::test]
async fn explicit_nested_fields() {
    let (catalog, contexts) = builder_parts();
    let builder = ProjectionBuilder::new(&catalog, &contexts, b1());

    let query = Query::all().nest("Customer", Query::select(["Segment"]));
    let projection = builder
        .build(&orders(), None, &query, &BuildOptions::default())
        .await
        .unwrap();

    let customer = projection.ast["Customer"].as_nested().unwrap();
    assert_eq!(customer["Id"], AstValue::Exclude);
    assert_eq!(customer["Name"], AstValue::Exclude);
    assert_eq!(customer["Segment"], AstValue::Include);

    let deps = &projection.dependency_fields.nested["Customer"];
    assert!(deps.contains("Segment"));
    assert!(deps.contains("Id"));
}

// The local foreign key backs the link traversal at the outer level.
#[tokio::test]
async fn link_traversal_contributes_local_key() {
    let (catalog, contexts) = builder_parts();
    let builder = ProjectionBuilder::new(&catalog, &contexts, b1());

    let query = Query::select(["Customer"]);
    let projection = builder
        .build(&orders(), None, &query, &BuildOptions::default())
        .await
        .unwrap();

    assert!(projection.ast["Customer"].as_nested().is_some());
    assert!(projection.dependency_fields.contains("CustomerId"));
}
