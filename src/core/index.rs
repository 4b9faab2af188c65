use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use rand::seq::SliceRandom;
use crate::core::config::Config;
use crate::core::document::Document;
use crate::core::error::{Error, ErrorKind, Result};
use crate::fields::FieldRegistry;
use crate::query::planner::QueryPlanner;
use crate::query::types::SearchQuery;
use crate::schema::record::Record;
use crate::schema::schema::Schema;
use crate::search::executor::QueryExecutor;
use crate::search::results::SearchResults;

struct IndexState<R> {
    documents: HashMap<String, Document<R>>,
    order: Vec<String>,   // Insertion order of ids
}

/// In-memory collection of records of one type.
///
/// The schema is flattened once at construction. A single reader-writer lock
/// guards the documents: searches and lookups share it, mutations take it
/// exclusively. Documents are immutable once inserted.
pub struct Index<R: Record> {
    config: Config,
    schema: Schema,
    registry: Arc<FieldRegistry>,
    state: RwLock<IndexState<R>>,
}

impl<R: Record> Index<R> {
    /// Index with the built-in field kinds and default config
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Result<Self> {
        Self::with_registry(Arc::new(FieldRegistry::new()), config)
    }

    /// Fails with `InvalidSchema` when `R` cannot be flattened
    pub fn with_registry(registry: Arc<FieldRegistry>, config: Config) -> Result<Self> {
        let schema = Schema::of::<R>(&config)?;

        Ok(Index {
            config,
            schema,
            registry,
            state: RwLock::new(IndexState {
                documents: HashMap::new(),
                order: Vec::new(),
            }),
        })
    }

    /// Indexes `record` under `id`; an existing id is never replaced
    pub fn put(&self, id: &str, record: impl Into<Arc<R>>) -> Result<()> {
        let mut state = self.state.write();

        if state.documents.contains_key(id) {
            return Err(Error::new(ErrorKind::DuplicateId, format!("document '{id}' already exists")));
        }

        let document = Document::new(record.into(), &self.schema, &self.registry)?;
        state.documents.insert(id.to_string(), document);
        state.order.push(id.to_string());

        log::debug!("indexed document '{}' ({} total)", id, state.order.len());
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Arc<R>> {
        self.state
            .read()
            .documents
            .get(id)
            .map(|doc| doc.original().clone())
            .ok_or_else(|| not_found(id))
    }

    /// Removes `id`, returning its record
    pub fn remove(&self, id: &str) -> Result<Arc<R>> {
        let mut state = self.state.write();
        let document = state.documents.remove(id).ok_or_else(|| not_found(id))?;
        state.order.retain(|existing| existing != id);

        log::debug!("removed document '{}'", id);
        Ok(document.original().clone())
    }

    /// Uniform pick over the current ids; `None` when empty
    pub fn random(&self) -> Option<(String, Arc<R>)> {
        let state = self.state.read();
        let id = state.order.choose(&mut rand::thread_rng())?;
        let document = state.documents.get(id)?;
        Some((id.clone(), document.original().clone()))
    }

    pub fn search(&self, query: &SearchQuery) -> Result<Vec<Arc<R>>> {
        Ok(self.search_results(query)?.hits)
    }

    /// Like `search`, with the pre-paging match count and timing
    pub fn search_results(&self, query: &SearchQuery) -> Result<SearchResults<R>> {
        let plan = QueryPlanner::new(&self.schema, &self.registry, &self.config).plan(query)?;

        let state = self.state.read();
        let documents = state.order.iter().filter_map(|id| state.documents.get(id));
        QueryExecutor::new(&plan).execute(documents)
    }

    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every document
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.documents.clear();
        state.order.clear();
        log::debug!("index cleared");
    }

    /// Ids in insertion order
    pub fn ids(&self) -> Vec<String> {
        self.state.read().order.clone()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn registry(&self) -> &Arc<FieldRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn not_found(id: &str) -> Error {
    Error::new(ErrorKind::NotFound, format!("document '{id}' not found"))
}
