pub mod core;
pub mod analysis;
pub mod fields;
pub mod schema;
pub mod query;
pub mod search;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::index::Index;
pub use crate::core::types::{FieldValue, Number};
pub use crate::fields::{Field, FieldConfig, FieldKind, FieldRegistry};
pub use crate::query::parser::{parse_json_query, parse_query_string};
pub use crate::query::types::{PredicateKind, QueryField, SearchQuery, SortOrder};
pub use crate::schema::{FieldDescriptor, Member, Record, RecordSchema, Schema, Value};
pub use crate::search::results::SearchResults;

/*
┌──────────────────────────────────── FINDIT ARCHITECTURE ───────────────────────────────────┐
│                                                                                             │
│  ┌───────────────────────────────────────────────────────────────────────────────────┐    │
│  │                               struct Index<R: Record>                              │    │
│  │  ┌─────────────────────────────────────────────────────────────────────────────┐ │    │
│  │  │ config: Config                       // Defaults for limit, sort, depth      │ │    │
│  │  │ schema: Schema                       // Flattened once per index             │ │    │
│  │  │ registry: Arc<FieldRegistry>         // Field kinds, shareable across indexes│ │    │
│  │  │ state: RwLock<IndexState<R>>         // id → Document<R>, insertion order    │ │    │
│  │  └─────────────────────────────────────────────────────────────────────────────┘ │    │
│  └───────────────────────────────────────────────────────────────────────────────────┘    │
│                                                                                             │
│  put(id, record)                              search(&SearchQuery)                          │
│    │                                            │                                           │
│    ▼                                            ▼                                           │
│  ┌──────────────────────┐                     ┌──────────────────────┐                     │
│  │ Document::new        │                     │ QueryPlanner::plan   │ defaults, validation│
│  │ • walks Schema nodes │                     │ • probe field per    │ operands encoded    │
│  │ • registry.create()  │                     │   clause             │ once                │
│  │ • Field::process()   │                     └──────────┬───────────┘                     │
│  └──────────────────────┘                                ▼                                  │
│                                               ┌──────────────────────┐                     │
│  ┌──────────────────────┐                     │ QueryExecutor        │ AND over clauses,   │
│  │ trait Field          │◄────────────────────│ • search / partial / │ ANY over list items │
│  │ text  partial  words │                     │   range per item     │                     │
│  │ num   bool     date  │                     └──────────┬───────────┘                     │
│  │ + registered kinds   │                                ▼                                  │
│  └──────────┬───────────┘                     ┌──────────────────────┐                     │
│             │ words                           │ MatchCollector       │ stable sort,        │
│             ▼                                 │                      │ skip, limit         │
│  ┌──────────────────────┐                     └──────────────────────┘                     │
│  │ AnalyzerRegistry     │                                                                   │
│  │ simple standard ngram│                                                                   │
│  └──────────────────────┘                                                                   │
└─────────────────────────────────────────────────────────────────────────────────────────────┘
*/
