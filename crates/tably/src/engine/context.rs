use indexmap::{IndexMap, IndexSet};
use std::sync::{Arc, Mutex};
use tably_core::schema::{BaseId, Column, ColumnId, Link};
use tably_core::{err, Error, Result};
use tracing::trace;

/// The bases involved in one relation, as seen from a local base.
///
/// The executor reads child rows from `child` and parent rows from
/// `parent`; when everything collapses onto the local base the relation
/// can be satisfied by a single-connection join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationContext {
    /// Base of the model owning the link column.
    pub local: BaseId,

    /// Base of the related model; defaults to `local`.
    pub related: BaseId,

    /// Base of the many-to-many junction model; defaults to `local`.
    pub junction: BaseId,

    /// Base child rows are read from.
    pub child: BaseId,

    /// Base parent rows are read from.
    pub parent: BaseId,
}

impl RelationContext {
    /// True when the relation never leaves the local base; otherwise the
    /// executor must run independent fetches and stitch them by key
    /// equality in application memory.
    pub fn is_single_connection(&self) -> bool {
        self.related == self.local && self.junction == self.local
    }
}

/// Resolves which base owns each side of a relation.
///
/// Results are memoized per link column and local base for the resolver's
/// lifetime (one request); the underlying column metadata does not change
/// mid-request, so a memoized context is immutable.
pub struct ContextResolver {
    bases: IndexSet<BaseId>,
    memo: Mutex<IndexMap<(BaseId, ColumnId), Arc<RelationContext>>>,
}

impl ContextResolver {
    /// `bases` is the set of bases the execution environment can open
    /// connections for. A relation referencing any other base is a
    /// configuration error.
    pub fn new<I>(bases: I) -> Self
    where
        I: IntoIterator<Item = BaseId>,
    {
        Self {
            bases: bases.into_iter().collect(),
            memo: Mutex::new(IndexMap::new()),
        }
    }

    pub fn resolve(&self, column: &Column, local: &BaseId) -> Result<Arc<RelationContext>> {
        let Some(link) = column.ty.as_link() else {
            return Err(err!(
                "column `{}` is not a link; no relation context to resolve",
                column.title
            ));
        };

        let key = (local.clone(), column.id);
        if let Some(context) = self.memo.lock().unwrap().get(&key) {
            return Ok(context.clone());
        }

        let context = Arc::new(self.compute(link, local)?);
        trace!(
            column = %column.title,
            local = %local,
            related = %context.related,
            "resolved relation context"
        );
        self.memo.lock().unwrap().insert(key, context.clone());
        Ok(context)
    }

    fn compute(&self, link: &Link, local: &BaseId) -> Result<RelationContext> {
        self.check_open(local)?;

        let related = link.target_base.clone().unwrap_or_else(|| local.clone());
        self.check_open(&related)?;

        let junction = match &link.junction {
            Some(junction) => junction.base.clone().unwrap_or_else(|| local.clone()),
            None => local.clone(),
        };
        self.check_open(&junction)?;

        // The physical table storing the foreign key determines which
        // rows live in the related base.
        let (child, parent) = if link.is_foreign_key_local() {
            (local.clone(), related.clone())
        } else {
            (related.clone(), local.clone())
        };

        Ok(RelationContext {
            local: local.clone(),
            related,
            junction,
            child,
            parent,
        })
    }

    fn check_open(&self, base: &BaseId) -> Result<()> {
        if !self.bases.contains(base) {
            return Err(Error::unknown_base(base));
        }
        Ok(())
    }
}
