use crate::schema::{Column, ColumnId, Model, ModelId, View, ViewId};
use crate::{Error, Result};

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;

/// Read-only access to model, view, and column definitions.
///
/// Implementations may be backed by a slow metadata store; the engine
/// awaits every access and performs no other I/O. All errors surface as
/// not-found conditions or implementation-specific failures.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn model(&self, id: ModelId) -> Result<Arc<Model>>;

    async fn view(&self, id: ViewId) -> Result<Arc<View>>;

    async fn column(&self, id: ColumnId) -> Result<Arc<Column>> {
        let model = self.model(id.model).await?;
        model
            .columns
            .get(id.index)
            .map(|column| Arc::new(column.clone()))
            .ok_or_else(|| Error::column_not_found(id))
    }
}

/// An in-memory catalog with every model and view registered up front.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    models: IndexMap<ModelId, Arc<Model>>,
    views: IndexMap<ViewId, Arc<View>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_model(&mut self, model: Model) {
        self.models.insert(model.id, Arc::new(model));
    }

    pub fn add_view(&mut self, view: View) {
        self.views.insert(view.id, Arc::new(view));
    }
}

#[async_trait]
impl Catalog for StaticCatalog {
    async fn model(&self, id: ModelId) -> Result<Arc<Model>> {
        self.models
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::model_not_found(id))
    }

    async fn view(&self, id: ViewId) -> Result<Arc<View>> {
        self.views
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::view_not_found(id))
    }
}

/// Read-through cache over another catalog.
///
/// Supports concurrent reads; population is single-flight per key, so a
/// burst of first accesses to the same model fetches it from the inner
/// catalog exactly once. A failed fetch leaves the cell empty and the
/// next access retries.
pub struct CachedCatalog<C> {
    inner: C,
    models: Mutex<IndexMap<ModelId, Arc<OnceCell<Arc<Model>>>>>,
    views: Mutex<IndexMap<ViewId, Arc<OnceCell<Arc<View>>>>>,
}

impl<C: Catalog> CachedCatalog<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            models: Mutex::new(IndexMap::new()),
            views: Mutex::new(IndexMap::new()),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn model_cell(&self, id: ModelId) -> Arc<OnceCell<Arc<Model>>> {
        let mut models = self.models.lock().unwrap();
        models.entry(id).or_default().clone()
    }

    fn view_cell(&self, id: ViewId) -> Arc<OnceCell<Arc<View>>> {
        let mut views = self.views.lock().unwrap();
        views.entry(id).or_default().clone()
    }
}

#[async_trait]
impl<C: Catalog> Catalog for CachedCatalog<C> {
    async fn model(&self, id: ModelId) -> Result<Arc<Model>> {
        let cell = self.model_cell(id);
        cell.get_or_try_init(|| self.inner.model(id))
            .await
            .cloned()
    }

    async fn view(&self, id: ViewId) -> Result<Arc<View>> {
        let cell = self.view_cell(id);
        cell.get_or_try_init(|| self.inner.view(id)).await.cloned()
    }
}
