use super::context::{ContextResolver, RelationContext};
use super::deps::{DependencyFields, DependencyResolver};
use crate::ast::{Ast, AstValue};
use crate::query::{FieldSelection, Query};

use async_recursion::async_recursion;
use std::sync::Arc;
use tably_core::schema::{BaseId, Column, ColumnTy, Model, View};
use tably_core::{Catalog, Error, Result};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Project only primary-key and display columns; used when a link is
    /// referenced without sub-fields and only row identity is needed for
    /// later traversal or matching.
    pub extract_only_primaries: bool,

    /// Keep primary-key columns in the projection even when a view's
    /// mask or an explicit field list would drop them.
    pub include_pk_by_default: bool,

    /// Include columns hidden from the view, except system columns that
    /// are neither row stamps nor part of the primary key.
    pub include_hidden: bool,

    /// Fail on requested field names absent from the model instead of
    /// silently ignoring them.
    pub strict: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            extract_only_primaries: false,
            include_pk_by_default: true,
            include_hidden: false,
            strict: false,
        }
    }
}

/// A projection tree plus the complete set of physically fetchable
/// columns the executor must read to satisfy it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub ast: Ast,
    pub dependency_fields: DependencyFields,
}

/// The top-level entry point of the engine.
///
/// Builds projection trees against a catalog, resolving column
/// dependencies and cross-base relation contexts along the way. One
/// builder serves one request; independent requests may run concurrently
/// against the same catalog.
pub struct ProjectionBuilder<'a> {
    catalog: &'a dyn Catalog,
    contexts: &'a ContextResolver,
    local: BaseId,
}

impl<'a> ProjectionBuilder<'a> {
    pub fn new(catalog: &'a dyn Catalog, contexts: &'a ContextResolver, local: BaseId) -> Self {
        Self {
            catalog,
            contexts,
            local,
        }
    }

    /// Cross-base context for a link column, as seen from this builder's
    /// base. The executor uses this to decide between a single-connection
    /// join and stitched multi-base fetches.
    pub fn relation_context(&self, column: &Column) -> Result<Arc<RelationContext>> {
        self.contexts.resolve(column, &self.local)
    }

    /// Resolves a single column's dependency fields into `deps`,
    /// recursing through derived-column chains. Idempotent: resolving the
    /// same column into the same accumulator twice changes nothing.
    pub async fn extract_dependencies(
        &self,
        column: &Column,
        deps: &mut DependencyFields,
    ) -> Result<()> {
        DependencyResolver::new(self.catalog)
            .resolve(column, deps)
            .await
    }

    /// Builds the projection tree and dependency-field set for one
    /// request. Either a complete, correct result is produced or the call
    /// fails; there is no partial-success mode.
    pub async fn build(
        &self,
        model: &Model,
        view: Option<&View>,
        query: &Query,
        opts: &BuildOptions,
    ) -> Result<Projection> {
        debug!(
            model = %model.name,
            base = %self.local,
            strict = opts.strict,
            "building projection"
        );

        let mut dependency_fields = DependencyFields::new();
        let ast = self
            .build_model(model, view, query, opts, &mut dependency_fields, &self.local)
            .await?;

        Ok(Projection {
            ast,
            dependency_fields,
        })
    }

    #[async_recursion]
    async fn build_model(
        &self,
        model: &Model,
        view: Option<&View>,
        query: &Query,
        opts: &BuildOptions,
        deps: &mut DependencyFields,
        local: &BaseId,
    ) -> Result<Ast> {
        if let Some(view) = view {
            debug_assert_eq!(view.model, model.id);
        }

        let resolver = DependencyResolver::new(self.catalog);

        if opts.extract_only_primaries {
            return self.build_primaries(model, &resolver, deps).await;
        }

        let fields = query.fields.as_list();

        if opts.strict {
            if let Some(fields) = fields {
                let invalid: Vec<String> = fields
                    .iter()
                    .filter(|field| model.column_by_title(field).is_none())
                    .cloned()
                    .collect();
                if !invalid.is_empty() {
                    return Err(Error::invalid_fields(invalid));
                }
            }
        }

        let mut ast = Ast::new();

        for column in &model.columns {
            let value = self.column_value(column, query, opts, deps, local).await?;
            let requested = self.is_requested(column, view, fields, opts);

            // Primary keys are always resolved as dependencies; row
            // identification downstream needs them even when hidden.
            if requested || column.primary_key {
                resolver.resolve(column, deps).await?;
            }

            ast.insert(
                column.title.clone(),
                if requested { value } else { AstValue::Exclude },
            );
        }

        Ok(ast)
    }

    /// Identity-only projection: primary keys plus the display column.
    async fn build_primaries(
        &self,
        model: &Model,
        resolver: &DependencyResolver<'_>,
        deps: &mut DependencyFields,
    ) -> Result<Ast> {
        let mut ast = Ast::new();

        for pk in model.primary_key_columns() {
            ast.insert(pk.title.clone(), AstValue::Include);
            resolver.resolve(pk, deps).await?;
        }

        if let Some(display) = model.display_column() {
            ast.entry(display.title.clone())
                .or_insert(AstValue::Include);
            resolver.resolve(display, deps).await?;
        }

        Ok(ast)
    }

    /// Decides what the response renders for a column, recursing into the
    /// related model for links. Runs before the visibility decision so
    /// that nested identity dependencies accumulate even for columns the
    /// response ends up hiding.
    async fn column_value(
        &self,
        column: &Column,
        query: &Query,
        opts: &BuildOptions,
        deps: &mut DependencyFields,
        local: &BaseId,
    ) -> Result<AstValue> {
        let nested_query = query.nested.get(&column.title);

        match &column.ty {
            // Rollups (including link-count columns) are scalar; a nested
            // request does not recurse through them.
            ColumnTy::Rollup(_) => Ok(AstValue::Include),
            ColumnTy::Link(link) => {
                let context = self.contexts.resolve(column, local)?;
                let related = self.catalog.model(link.target).await?;

                // A bare link reference still projects row identity so
                // the caller can traverse or match later; a nested query
                // (explicit fields or wildcard) recurses in full.
                let nested_opts = BuildOptions {
                    extract_only_primaries: nested_query.is_none(),
                    strict: opts.strict,
                    ..BuildOptions::default()
                };

                let empty = Query::default();
                let nested = nested_query.unwrap_or(&empty);
                let nested_deps = deps.nested_entry(&column.title);
                let nested_ast = self
                    .build_model(
                        &related,
                        None,
                        nested,
                        &nested_opts,
                        nested_deps,
                        &context.related,
                    )
                    .await?;

                Ok(AstValue::Nested(nested_ast))
            }
            _ => {
                // Sub-field access on a structured (non-link) column
                // projects the named sub-fields verbatim.
                if let Some(nested) = nested_query {
                    if let FieldSelection::List(sub_fields) = &nested.fields {
                        let mut nested_ast = Ast::new();
                        for field in sub_fields {
                            nested_ast.insert(field.clone(), AstValue::Include);
                        }
                        return Ok(AstValue::Nested(nested_ast));
                    }
                }
                Ok(AstValue::Include)
            }
        }
    }

    /// Whether the column appears in the final AST. Precedence: the
    /// hidden-columns override, then the view mask, then the explicit
    /// field list, then everything.
    fn is_requested(
        &self,
        column: &Column,
        view: Option<&View>,
        fields: Option<&[String]>,
        opts: &BuildOptions,
    ) -> bool {
        let in_fields = fields
            .map(|fields| fields.iter().any(|field| field == &column.title))
            .unwrap_or(false);

        if opts.include_hidden {
            return !column.system || column.is_stamp() || column.primary_key;
        }

        if let Some(view) = view {
            if opts.include_pk_by_default && column.primary_key {
                return true;
            }
            return view.allows(column)
                && (!column.system || view.show_system_fields || column.display_value)
                && (fields.is_none() || in_fields);
        }

        match fields {
            Some(_) => in_fields,
            None => true,
        }
    }
}
