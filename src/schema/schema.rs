use std::collections::HashMap;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Serialize, Deserialize};
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::fields::{FieldConfig, FieldKind};
use crate::schema::record::{MemberKind, Record, RecordSchema};

/// Positional suffix of a concrete list-of-record name, e.g. `[3]`
static LIST_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+\]").expect("list index pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    None,
    List,
}

/// Static description of one leaf field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,            // Dotted path; `pets[].name` under record lists
    pub kind: FieldKind,
    pub collection: Collection,
    pub supported: bool,         // False for members of unsupported native types
    pub config: FieldConfig,
}

/// Walk plan for turning one record into document fields
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub member: String,
    pub name: String,
    pub shape: Shape,
}

#[derive(Debug, Clone)]
pub(crate) enum Shape {
    Leaf(usize),
    Record(Vec<Node>),
    Records(Vec<Node>),
}

/// Flattened schema of a record type, computed once per index
#[derive(Debug, Clone)]
pub struct Schema {
    descriptors: Vec<FieldDescriptor>,
    by_name: HashMap<String, usize>,
    nodes: Vec<Node>,
}

impl Schema {
    pub fn of<R: Record>(config: &Config) -> Result<Self> {
        Self::from_record_schema(&R::schema(), config)
    }

    pub fn from_record_schema(record: &RecordSchema, config: &Config) -> Result<Self> {
        if record.members().iter().all(|m| m.is_skipped()) {
            return Err(Error::invalid_schema("record exposes no fields"));
        }

        let mut builder = SchemaBuilder {
            config,
            descriptors: Vec::new(),
            by_name: HashMap::new(),
        };
        let nodes = builder.walk(record, "", 0)?;

        log::debug!("schema flattened into {} fields", builder.descriptors.len());

        Ok(Schema {
            descriptors: builder.descriptors,
            by_name: builder.by_name,
            nodes,
        })
    }

    /// Descriptors in declaration order
    pub fn descriptors(&self) -> &[FieldDescriptor] {
        &self.descriptors
    }

    /// Resolves template (`pets[].name`) and concrete (`pets[0].name`) names
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        let index = match self.by_name.get(name) {
            Some(index) => Some(*index),
            None if name.contains('[') => {
                self.by_name.get(LIST_INDEX.replace_all(name, "[]").as_ref()).copied()
            }
            None => None,
        };
        index.map(|i| &self.descriptors[i])
    }

    /// `name -> kind` of every searchable field
    pub fn field_types(&self) -> HashMap<String, FieldKind> {
        self.descriptors
            .iter()
            .filter(|d| d.supported)
            .map(|d| (d.name.clone(), d.kind.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn descriptor_at(&self, index: usize) -> &FieldDescriptor {
        &self.descriptors[index]
    }
}

struct SchemaBuilder<'c> {
    config: &'c Config,
    descriptors: Vec<FieldDescriptor>,
    by_name: HashMap<String, usize>,
}

impl SchemaBuilder<'_> {
    fn walk(&mut self, record: &RecordSchema, prefix: &str, depth: usize) -> Result<Vec<Node>> {
        if depth > self.config.max_nesting_depth {
            return Err(Error::invalid_schema(format!(
                "'{prefix}' nests deeper than {} levels",
                self.config.max_nesting_depth
            )));
        }

        let mut nodes = Vec::new();
        for member in record.members() {
            if member.is_skipped() {
                continue;
            }

            let name = member.field_name();
            validate_name(name, member.name())?;
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}.{name}")
            };

            let shape = match member.kind() {
                MemberKind::Scalar(kind) => {
                    Shape::Leaf(self.leaf(&path, kind.clone(), Collection::None, true, member.field_config())?)
                }
                MemberKind::List(kind) => {
                    Shape::Leaf(self.leaf(&path, kind.clone(), Collection::List, true, member.field_config())?)
                }
                MemberKind::Unsupported(type_name) => {
                    let kind = FieldKind::Custom(type_name.clone());
                    Shape::Leaf(self.leaf(&path, kind, Collection::None, false, member.field_config())?)
                }
                MemberKind::Nested(schema) => Shape::Record(self.walk(&schema(), &path, depth + 1)?),
                MemberKind::NestedList(schema) => {
                    Shape::Records(self.walk(&schema(), &format!("{path}[]"), depth + 1)?)
                }
            };

            nodes.push(Node {
                member: member.name().to_string(),
                name: name.to_string(),
                shape,
            });
        }

        Ok(nodes)
    }

    fn leaf(
        &mut self,
        path: &str,
        kind: FieldKind,
        collection: Collection,
        supported: bool,
        config: &FieldConfig,
    ) -> Result<usize> {
        if self.by_name.contains_key(path) {
            return Err(Error::invalid_schema(format!("duplicate field name '{path}'")));
        }

        let mut config = config.clone();
        if kind == FieldKind::Words && !config.contains_key("analyzer") {
            config.insert(
                "analyzer".to_string(),
                serde_json::Value::String(self.config.default_analyzer.clone()),
            );
        }

        log::trace!("schema field '{}' kind={} collection={:?}", path, kind, collection);

        let index = self.descriptors.len();
        self.descriptors.push(FieldDescriptor {
            name: path.to_string(),
            kind,
            collection,
            supported,
            config,
        });
        self.by_name.insert(path.to_string(), index);
        Ok(index)
    }
}

fn validate_name(name: &str, member: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_schema(format!("member '{member}' has an empty field name")));
    }
    if name.contains(['.', '[', ']']) {
        return Err(Error::invalid_schema(format!(
            "field name '{name}' may not contain '.', '[' or ']'"
        )));
    }
    Ok(())
}
