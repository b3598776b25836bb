use async_recursion::async_recursion;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tably_core::schema::{Column, ColumnId, ColumnTy, Link};
use tably_core::{err, Catalog, Error, Result};

/// The accumulated set of physically fetchable columns needed at one
/// nesting level, plus the same structure for each traversed link.
///
/// Mutated in place during a walk; owned exclusively by one top-level
/// build invocation. Re-resolving a column into the same accumulator is a
/// no-op (the set deduplicates, nested maps are reused by title).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyFields {
    pub fields_set: IndexSet<String>,
    pub nested: IndexMap<String, DependencyFields>,
}

impl DependencyFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields_set.contains(field)
    }

    /// The nested accumulator for a traversed link, created on first use
    /// and reused afterwards.
    pub(crate) fn nested_entry(&mut self, title: &str) -> &mut DependencyFields {
        self.nested.entry(title.to_string()).or_default()
    }
}

/// Computes the minimal set of physically stored column names required to
/// evaluate a column, recursing through derived-column chains.
pub(crate) struct DependencyResolver<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> DependencyResolver<'a> {
    pub(crate) fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    /// Resolves `column` into `deps`, mutating it in place.
    ///
    /// A lookup or formula chain revisiting a column already being
    /// expanded fails with a circular-lookup error; nothing partial is
    /// kept by the caller on failure.
    pub(crate) async fn resolve(
        &self,
        column: &Column,
        deps: &mut DependencyFields,
    ) -> Result<()> {
        let mut path = Vec::new();
        self.resolve_column(column, deps, &mut path).await
    }

    #[async_recursion]
    async fn resolve_column(
        &self,
        column: &Column,
        deps: &mut DependencyFields,
        path: &mut Vec<ColumnId>,
    ) -> Result<()> {
        match &column.ty {
            ColumnTy::Plain(_) => {
                deps.fields_set.insert(column.title.clone());
            }
            ColumnTy::Link(link) => {
                self.resolve_link_key(link, deps).await?;
            }
            ColumnTy::Rollup(rollup) => {
                let relation = self.catalog.column(rollup.relation).await?;
                let Some(link) = relation.ty.as_link() else {
                    return Err(err!(
                        "rollup `{}` does not reference a link column",
                        column.title
                    ));
                };
                self.resolve_link_key(link, deps).await?;
            }
            ColumnTy::Lookup(lookup) => {
                self.guard_cycle(column, path)?;
                path.push(column.id);

                let relation = self.catalog.column(lookup.relation).await?;
                let Some(link) = relation.ty.as_link() else {
                    return Err(err!(
                        "lookup `{}` does not reference a link column",
                        column.title
                    ));
                };
                // The relation key belongs to the current level; the
                // target only becomes fetchable once the relation has
                // been traversed.
                self.resolve_link_key(link, deps).await?;

                let target = self.catalog.column(lookup.target).await?;
                let nested = deps.nested_entry(&relation.title);
                self.resolve_column(&target, nested, path).await?;

                path.pop();
            }
            ColumnTy::Formula(formula) => {
                self.guard_cycle(column, path)?;
                path.push(column.id);

                let mut referenced = Vec::new();
                formula.expr.referenced_columns(&mut referenced);
                for id in referenced {
                    let referenced_column = self.catalog.column(id).await?;
                    self.resolve_column(&referenced_column, deps, path).await?;
                }

                path.pop();
            }
        }

        Ok(())
    }

    /// The locally stored key column of a relation: has-many exposes the
    /// parent-side key, belongs-to and many-to-many the local foreign
    /// key, one-to-one whichever side owns the foreign key.
    async fn resolve_link_key(&self, link: &Link, deps: &mut DependencyFields) -> Result<()> {
        let key = self.catalog.column(link.key_column()).await?;
        deps.fields_set.insert(key.title.clone());
        Ok(())
    }

    fn guard_cycle(&self, column: &Column, path: &[ColumnId]) -> Result<()> {
        if path.contains(&column.id) {
            return Err(Error::circular_lookup(column.title.clone()));
        }
        Ok(())
    }
}
