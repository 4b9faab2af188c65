use std::sync::Arc;
use crate::query::types::SortOrder;

/// One page of search results
#[derive(Debug, Clone)]
pub struct SearchResults<R> {
    pub hits: Vec<Arc<R>>,
    pub total_hits: usize,   // Matches before paging
    pub took_ms: u64,
}

impl<R> SearchResults<R> {
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Gathers matches in encounter order, then sorts and pages them
pub struct MatchCollector<R> {
    pub matches: Vec<(String, Arc<R>)>,   // (sort key, record)
    pub sorted: bool,
}

impl<R> MatchCollector<R> {
    pub fn new(sorted: bool) -> Self {
        MatchCollector {
            matches: Vec::new(),
            sorted,
        }
    }

    pub fn collect(&mut self, sort_key: String, record: Arc<R>) {
        self.matches.push((sort_key, record));
    }

    pub fn total(&self) -> usize {
        self.matches.len()
    }

    /// Stable sort when a sort key was requested; equal keys keep encounter order
    pub fn into_page(mut self, order: SortOrder, skip: usize, limit: usize) -> Vec<Arc<R>> {
        if self.sorted {
            match order {
                SortOrder::Asc => self.matches.sort_by(|a, b| a.0.cmp(&b.0)),
                SortOrder::Desc => self.matches.sort_by(|a, b| b.0.cmp(&a.0)),
            }
        }

        let skip = skip.min(self.matches.len());
        self.matches
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|(_, record)| record)
            .collect()
    }
}
