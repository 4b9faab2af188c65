use std::ops::Bound;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::fields::FieldRegistry;
use crate::query::types::{PredicateKind, QueryField, SearchQuery, SortOrder};
use crate::schema::schema::Schema;

/// Pre-encoded comparison value of one clause
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Match(Vec<u8>),
    Partial(Vec<u8>),
    Range {
        min: Option<Vec<u8>>,   // None = open
        max: Option<Vec<u8>>,
    },
    /// Field unknown to the schema; no document can satisfy the clause
    Nothing,
}

impl Operand {
    pub fn min_bound(&self) -> Bound<&[u8]> {
        match self {
            Operand::Range { min: Some(min), .. } => Bound::Included(min.as_slice()),
            _ => Bound::Unbounded,
        }
    }

    pub fn max_bound(&self) -> Bound<&[u8]> {
        match self {
            Operand::Range { max: Some(max), .. } => Bound::Included(max.as_slice()),
            _ => Bound::Unbounded,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannedClause {
    pub field: String,
    pub predicate: PredicateKind,
    pub operand: Operand,
}

/// Validated, defaulted form of a `SearchQuery`
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPlan {
    pub clauses: Vec<PlannedClause>,
    pub sort: SortOrder,
    pub sort_by: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

/// Validates queries against a schema and encodes their operands once
pub struct QueryPlanner<'a> {
    schema: &'a Schema,
    registry: &'a FieldRegistry,
    config: &'a Config,
}

impl<'a> QueryPlanner<'a> {
    pub fn new(schema: &'a Schema, registry: &'a FieldRegistry, config: &'a Config) -> Self {
        QueryPlanner { schema, registry, config }
    }

    /// Fails on the first invalid part; nothing is evaluated on error
    pub fn plan(&self, query: &SearchQuery) -> Result<SearchPlan> {
        let limit = if query.limit == 0 { self.config.default_limit } else { query.limit };
        let sort = if query.sort.is_empty() {
            self.config.default_sort
        } else {
            query.sort.parse()?
        };

        let sort_by = if query.sort_by.is_empty() {
            None
        } else if query.fields.iter().any(|f| f.field == query.sort_by) {
            Some(query.sort_by.clone())
        } else {
            return Err(Error::invalid_query(format!(
                "sort_by '{}' must name one of the queried fields",
                query.sort_by
            )));
        };

        let clauses = query
            .fields
            .iter()
            .map(|clause| self.plan_clause(clause))
            .collect::<Result<Vec<_>>>()?;

        Ok(SearchPlan {
            clauses,
            sort,
            sort_by,
            skip: query.skip,
            limit,
        })
    }

    fn plan_clause(&self, clause: &QueryField) -> Result<PlannedClause> {
        if clause.field.is_empty() {
            return Err(Error::invalid_query("clause field name is empty"));
        }
        let predicate: PredicateKind = clause.kind.parse()?;

        let Some(descriptor) = self.schema.descriptor(&clause.field) else {
            log::trace!("clause on unknown field '{}' matches nothing", clause.field);
            return Ok(PlannedClause {
                field: clause.field.clone(),
                predicate,
                operand: Operand::Nothing,
            });
        };
        if !descriptor.supported {
            return Err(Error::unsupported(format!("field '{}' is not searchable", clause.field)));
        }

        let probe = self.registry.create(descriptor.kind.name(), &descriptor.config)?;
        if !probe.supports(predicate) {
            return Err(Error::unsupported(format!(
                "{predicate} search not supported for {} field '{}'",
                descriptor.kind, clause.field
            )));
        }

        let operand = match predicate {
            PredicateKind::Match => Operand::Match(probe.to_search_bytes(&clause.value)?),
            PredicateKind::Partial => Operand::Partial(probe.to_partial_bytes(&clause.value)?),
            PredicateKind::Range => {
                let (min, max) = range_bounds(&clause.value)?;
                let encode = |bound: &FieldValue| -> Result<Option<Vec<u8>>> {
                    if bound.is_zero() {
                        Ok(None)
                    } else {
                        probe.to_search_bytes(bound).map(Some)
                    }
                };
                Operand::Range {
                    min: encode(min)?,
                    max: encode(max)?,
                }
            }
        };

        log::trace!("clause '{}' planned as {}", clause.field, predicate);

        Ok(PlannedClause {
            field: clause.field.clone(),
            predicate,
            operand,
        })
    }
}

/// `[min, max]`, `[min]` or a bare `min`
fn range_bounds(value: &FieldValue) -> Result<(&FieldValue, &FieldValue)> {
    const OPEN: &FieldValue = &FieldValue::Null;
    match value {
        FieldValue::List(items) => match items.as_slice() {
            [min, max] => Ok((min, max)),
            [min] => Ok((min, OPEN)),
            _ => Err(Error::invalid_query(format!(
                "range needs one or two bounds, got {}",
                items.len()
            ))),
        },
        min => Ok((min, OPEN)),
    }
}
