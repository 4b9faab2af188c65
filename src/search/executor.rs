use std::time::Instant;
use crate::core::document::{Document, DocumentField};
use crate::core::error::Result;
use crate::query::planner::{Operand, PlannedClause, SearchPlan};
use crate::schema::record::Record;
use crate::search::results::{MatchCollector, SearchResults};

/// Runs a validated plan over documents in encounter order
pub struct QueryExecutor<'p> {
    plan: &'p SearchPlan,
}

impl<'p> QueryExecutor<'p> {
    pub fn new(plan: &'p SearchPlan) -> Self {
        QueryExecutor { plan }
    }

    pub fn execute<'d, R, I>(&self, documents: I) -> Result<SearchResults<R>>
    where
        R: Record + 'd,
        I: IntoIterator<Item = &'d Document<R>>,
    {
        let start = Instant::now();
        let plan = self.plan;
        let mut collector = MatchCollector::new(plan.sort_by.is_some());
        let mut scanned = 0usize;

        for document in documents {
            scanned += 1;
            if !self.matches(document)? {
                continue;
            }

            let sort_key = match &plan.sort_by {
                Some(field) => document.get(field).map(DocumentField::sort_key).unwrap_or_default(),
                None => String::new(),
            };
            collector.collect(sort_key, document.original().clone());
        }

        let total_hits = collector.total();
        let hits = collector.into_page(plan.sort, plan.skip, plan.limit);

        log::debug!(
            "search: {} clauses, scanned {}, matched {}, returned {}",
            plan.clauses.len(),
            scanned,
            total_hits,
            hits.len()
        );

        Ok(SearchResults {
            hits,
            total_hits,
            took_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Every clause must hold
    fn matches<R: Record>(&self, document: &Document<R>) -> Result<bool> {
        let mut satisfied = 0;
        for clause in &self.plan.clauses {
            if evaluate(clause, document)? {
                satisfied += 1;
            } else {
                break;
            }
        }
        Ok(satisfied == self.plan.clauses.len())
    }
}

/// True when any stored element satisfies the clause; a missing field never does
fn evaluate<R: Record>(clause: &PlannedClause, document: &Document<R>) -> Result<bool> {
    let Some(field) = document.get(&clause.field) else {
        return Ok(false);
    };

    for item in field.items() {
        let hit = match &clause.operand {
            Operand::Match(bytes) => item.search(bytes)?,
            Operand::Partial(needle) => item.search_partial(needle)?,
            Operand::Range { .. } => {
                item.search_range(clause.operand.min_bound(), clause.operand.max_bound())?
            }
            Operand::Nothing => false,
        };
        if hit {
            return Ok(true);
        }
    }
    Ok(false)
}
