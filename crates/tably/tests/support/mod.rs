#![allow(dead_code)]

use tably::schema::*;
use tably::StaticCatalog;

pub const ORDERS: ModelId = ModelId(0);
pub const CUSTOMERS: ModelId = ModelId(1);

pub fn plain(model: ModelId, index: usize, title: &str) -> Column {
    Column {
        id: model.column(index),
        title: title.to_string(),
        ty: ColumnTy::Plain(Plain::default()),
        system: false,
        primary_key: false,
        display_value: false,
    }
}

pub fn pk(model: ModelId, index: usize, title: &str) -> Column {
    Column {
        primary_key: true,
        ..plain(model, index, title)
    }
}

pub fn display(model: ModelId, index: usize, title: &str) -> Column {
    Column {
        display_value: true,
        ..plain(model, index, title)
    }
}

pub fn derived(model: ModelId, index: usize, title: &str, ty: impl Into<ColumnTy>) -> Column {
    Column {
        ty: ty.into(),
        ..plain(model, index, title)
    }
}

pub fn belongs_to(target: ModelId, child_column: ColumnId, parent_column: ColumnId) -> Link {
    Link {
        kind: RelationKind::BelongsTo,
        target,
        child_column,
        parent_column,
        owns_foreign_key: false,
        target_base: None,
        junction: None,
    }
}

pub fn has_many(target: ModelId, child_column: ColumnId, parent_column: ColumnId) -> Link {
    Link {
        kind: RelationKind::HasMany,
        ..belongs_to(target, child_column, parent_column)
    }
}

pub fn lookup(relation: ColumnId, target: ColumnId) -> Lookup {
    Lookup { relation, target }
}

/// The Orders/Customers schema:
///
/// Orders: Id [pk], CustomerId, Total, Customer [belongs-to Customers],
/// CustomerName [lookup via Customer -> Customers.Name].
/// Customers: Id [pk], Name [display], Segment.
pub fn orders() -> Model {
    Model {
        id: ORDERS,
        name: "Orders".to_string(),
        columns: vec![
            pk(ORDERS, 0, "Id"),
            plain(ORDERS, 1, "CustomerId"),
            plain(ORDERS, 2, "Total"),
            derived(
                ORDERS,
                3,
                "Customer",
                belongs_to(CUSTOMERS, ORDERS.column(1), CUSTOMERS.column(0)),
            ),
            derived(
                ORDERS,
                4,
                "CustomerName",
                lookup(ORDERS.column(3), CUSTOMERS.column(1)),
            ),
        ],
    }
}

pub fn customers() -> Model {
    Model {
        id: CUSTOMERS,
        name: "Customers".to_string(),
        columns: vec![
            pk(CUSTOMERS, 0, "Id"),
            display(CUSTOMERS, 1, "Name"),
            plain(CUSTOMERS, 2, "Segment"),
        ],
    }
}

pub fn orders_catalog() -> StaticCatalog {
    let mut catalog = StaticCatalog::new();
    catalog.add_model(orders());
    catalog.add_model(customers());
    catalog
}

/// A view over Orders hiding `CustomerId` and showing everything else.
pub fn orders_view() -> View {
    View {
        id: ViewId(0),
        model: ORDERS,
        columns: vec![
            ViewColumn {
                column: ORDERS.column(0),
                show: true,
            },
            ViewColumn {
                column: ORDERS.column(1),
                show: false,
            },
            ViewColumn {
                column: ORDERS.column(2),
                show: true,
            },
            ViewColumn {
                column: ORDERS.column(3),
                show: true,
            },
            ViewColumn {
                column: ORDERS.column(4),
                show: true,
            },
        ],
        show_system_fields: false,
        cover_image: None,
    }
}

pub fn b1() -> BaseId {
    BaseId::new("b1")
}
