use pretty_assertions::assert_eq;
use tably_core::schema::*;

const ALBUMS: ModelId = ModelId(0);
const TRACKS: ModelId = ModelId(1);

fn column(index: usize, title: &str, ty: impl Into<ColumnTy>) -> Column {
    Column {
        id: ALBUMS.column(index),
        title: title.to_string(),
        ty: ty.into(),
        system: false,
        primary_key: false,
        display_value: false,
    }
}

fn albums() -> Model {
    let mut id = column(0, "Id", ColumnTy::Plain(Plain::default()));
    id.primary_key = true;
    let mut title = column(1, "Title", ColumnTy::Plain(Plain::default()));
    title.display_value = true;

    Model {
        id: ALBUMS,
        name: "Albums".to_string(),
        columns: vec![
            id,
            title,
            column(
                2,
                "Tracks",
                Link {
                    kind: RelationKind::HasMany,
                    target: TRACKS,
                    child_column: TRACKS.column(2),
                    parent_column: ALBUMS.column(0),
                    owns_foreign_key: false,
                    target_base: None,
                    junction: None,
                },
            ),
        ],
    }
}

#[test]
fn model_accessors() {
    let model = albums();

    assert_eq!(model.column(ALBUMS.column(1)).title, "Title");
    assert_eq!(model.column_by_title("Tracks").unwrap().id, ALBUMS.column(2));
    assert!(model.column_by_title("Genre").is_none());

    let pks: Vec<_> = model.primary_key_columns().map(|c| c.title.as_str()).collect();
    assert_eq!(pks, ["Id"]);
    assert_eq!(model.display_column().unwrap().title, "Title");
}

#[test]
#[should_panic]
fn model_rejects_foreign_column_ids() {
    albums().column(TRACKS.column(0));
}

#[test]
fn link_key_column_follows_the_foreign_key() {
    let mut link = Link {
        kind: RelationKind::HasMany,
        target: TRACKS,
        child_column: TRACKS.column(2),
        parent_column: ALBUMS.column(0),
        owns_foreign_key: false,
        target_base: None,
        junction: None,
    };

    // Has-many: remote foreign key, so the local join key is the parent
    // column.
    assert!(!link.is_foreign_key_local());
    assert_eq!(link.key_column(), ALBUMS.column(0));

    link.kind = RelationKind::BelongsTo;
    assert_eq!(link.key_column(), TRACKS.column(2));

    link.kind = RelationKind::ManyToMany;
    assert!(link.is_foreign_key_local());

    link.kind = RelationKind::OneToOne;
    assert_eq!(link.key_column(), ALBUMS.column(0));
    link.owns_foreign_key = true;
    assert_eq!(link.key_column(), TRACKS.column(2));
}

#[test]
fn formula_collects_references_in_evaluation_order() {
    let expr = FormulaExpr::Binary {
        op: BinaryOp::Concat,
        lhs: Box::new(FormulaExpr::Call {
            function: "UPPER".to_string(),
            args: vec![FormulaExpr::Column(ALBUMS.column(1))],
        }),
        rhs: Box::new(FormulaExpr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(FormulaExpr::Column(ALBUMS.column(0))),
            rhs: Box::new(FormulaExpr::Literal(Literal::Number(1.0))),
        }),
    };

    let mut out = Vec::new();
    expr.referenced_columns(&mut out);
    assert_eq!(out, [ALBUMS.column(1), ALBUMS.column(0)]);
}

#[test]
fn view_mask_allows_listed_and_cover_columns() {
    let view = View {
        id: ViewId(7),
        model: ALBUMS,
        columns: vec![
            ViewColumn {
                column: ALBUMS.column(0),
                show: true,
            },
            ViewColumn {
                column: ALBUMS.column(1),
                show: false,
            },
        ],
        show_system_fields: false,
        cover_image: Some(ALBUMS.column(1)),
    };

    let model = albums();
    assert!(view.allows(model.column(ALBUMS.column(0))));
    // Hidden, but designated as the cover image.
    assert!(view.allows(model.column(ALBUMS.column(1))));
    // Not listed at all.
    assert!(!view.allows(model.column(ALBUMS.column(2))));
}
