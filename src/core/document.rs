use std::collections::HashMap;
use std::sync::Arc;
use crate::core::error::{Error, Result};
use crate::core::types::FieldValue;
use crate::fields::{Field, FieldRegistry};
use crate::schema::record::{Record, Value};
use crate::schema::schema::{Collection, Node, Schema, Shape};

/// Realized values of one leaf: a single field, or one per list element
#[derive(Debug)]
pub struct DocumentField {
    collection: Collection,
    items: Vec<Box<dyn Field>>,
}

impl DocumentField {
    pub fn items(&self) -> &[Box<dyn Field>] {
        &self.items
    }

    pub fn is_list(&self) -> bool {
        self.collection == Collection::List
    }

    /// Stored value; lists come back as `FieldValue::List`
    pub fn value(&self) -> FieldValue {
        match (self.collection, self.items.first()) {
            (Collection::None, Some(field)) => field.value().clone(),
            (Collection::None, None) => FieldValue::Null,
            (Collection::List, _) => {
                FieldValue::List(self.items.iter().map(|f| f.value().clone()).collect())
            }
        }
    }

    /// String the field sorts by; list elements are joined with `,`
    pub fn sort_key(&self) -> String {
        let keys: Vec<String> = self.items.iter().map(|f| f.sort_key()).collect();
        keys.join(",")
    }
}

/// One indexed record and its flattened fields
pub struct Document<R> {
    original: Arc<R>,
    values: HashMap<String, DocumentField>,
}

impl<R: Record> Document<R> {
    /// Builds every field up front; any failure discards the whole document
    pub fn new(original: Arc<R>, schema: &Schema, registry: &FieldRegistry) -> Result<Self> {
        let mut values = HashMap::new();
        {
            let mut builder = DocumentBuilder {
                schema,
                registry,
                values: &mut values,
            };
            builder.walk(original.as_ref(), schema.nodes(), "")?;
        }

        Ok(Document { original, values })
    }

    pub fn original(&self) -> &Arc<R> {
        &self.original
    }

    pub fn get(&self, name: &str) -> Option<&DocumentField> {
        self.values.get(name)
    }

    /// Concrete field names, unordered
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<R> std::fmt::Debug for Document<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}

struct DocumentBuilder<'a> {
    schema: &'a Schema,
    registry: &'a FieldRegistry,
    values: &'a mut HashMap<String, DocumentField>,
}

impl DocumentBuilder<'_> {
    fn walk(&mut self, record: &dyn Record, nodes: &[Node], prefix: &str) -> Result<()> {
        for node in nodes {
            let name = if prefix.is_empty() {
                node.name.clone()
            } else {
                format!("{prefix}.{}", node.name)
            };

            match (&node.shape, record.member_value(&node.member)) {
                (_, Value::Missing) | (_, Value::Scalar(FieldValue::Null)) => {}
                (Shape::Leaf(index), Value::Scalar(value)) => self.leaf(name, *index, value)?,
                (Shape::Record(children), Value::Record(nested)) => {
                    self.walk(nested, children, &name)?;
                }
                (Shape::Records(children), Value::Records(nested)) => {
                    for (i, item) in nested.into_iter().enumerate() {
                        self.walk(item, children, &format!("{name}[{i}]"))?;
                    }
                }
                (_, value) => {
                    return Err(Error::invalid_schema(format!(
                        "member '{}' produced a {} value that does not fit its declaration",
                        node.member,
                        value.describe()
                    )));
                }
            }
        }
        Ok(())
    }

    fn leaf(&mut self, name: String, index: usize, value: FieldValue) -> Result<()> {
        let descriptor = self.schema.descriptor_at(index);
        if !descriptor.supported {
            return Ok(());
        }

        let items = match (descriptor.collection, value) {
            (Collection::List, FieldValue::List(elements)) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements.iter().filter(|e| !e.is_null()) {
                    let mut field = self.registry.create(descriptor.kind.name(), &descriptor.config)?;
                    field.process(element)?;
                    items.push(field);
                }
                items
            }
            (Collection::List, other) => {
                return Err(Error::type_mismatch("list", other.type_name()));
            }
            (Collection::None, value) => {
                let mut field = self.registry.create(descriptor.kind.name(), &descriptor.config)?;
                field.process(&value)?;
                vec![field]
            }
        };

        if items.is_empty() {
            return Ok(());
        }
        if self.values.contains_key(&name) {
            return Err(Error::invalid_schema(format!("field name '{name}' is produced twice")));
        }

        self.values.insert(name, DocumentField {
            collection: descriptor.collection,
            items,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use super::*;
    use crate::core::config::Config;
    use crate::core::error::ErrorKind;
    use crate::schema::record::{Member, RecordSchema};

    struct Pet {
        name: String,
    }

    impl Record for Pet {
        fn schema() -> RecordSchema {
            RecordSchema::new().member(Member::text("name"))
        }

        fn member_value(&self, member: &str) -> Value<'_> {
            match member {
                "name" => Value::scalar(self.name.as_str()),
                _ => Value::Missing,
            }
        }
    }

    struct Owner {
        name: String,
        nickname: Option<String>,
        scores: Vec<i32>,
        joined: chrono::DateTime<Utc>,
        pets: Vec<Pet>,
        best_friend: Option<Pet>,
    }

    impl Record for Owner {
        fn schema() -> RecordSchema {
            RecordSchema::new()
                .member(Member::text("name"))
                .member(Member::partial("nickname"))
                .member(Member::number("scores").list())
                .member(Member::date("joined").config("granularity", "year"))
                .member(Member::nested_list::<Pet>("pets"))
                .member(Member::nested::<Pet>("best_friend").rename("friend"))
        }

        fn member_value(&self, member: &str) -> Value<'_> {
            match member {
                "name" => Value::scalar(self.name.as_str()),
                "nickname" => Value::scalar(self.nickname.clone()),
                "scores" => Value::list(&self.scores),
                "joined" => Value::scalar(self.joined),
                "pets" => Value::records(&self.pets),
                "best_friend" => match &self.best_friend {
                    Some(pet) => Value::record(pet),
                    None => Value::Missing,
                },
                _ => Value::Missing,
            }
        }
    }

    fn owner() -> Owner {
        Owner {
            name: "Ada Lovelace".into(),
            nickname: None,
            scores: vec![3, 9],
            joined: Utc.with_ymd_and_hms(2021, 6, 5, 4, 3, 2).unwrap(),
            pets: vec![Pet { name: "Rex".into() }, Pet { name: "Tom".into() }],
            best_friend: Some(Pet { name: "Bob".into() }),
        }
    }

    fn build(record: Owner) -> Result<Document<Owner>> {
        let schema = Schema::of::<Owner>(&Config::default())?;
        Document::new(Arc::new(record), &schema, &FieldRegistry::new())
    }

    #[test]
    fn flattens_nested_and_listed_records() {
        let doc = build(owner()).unwrap();

        let mut names: Vec<&str> = doc.names().collect();
        names.sort();
        assert_eq!(names, vec!["friend.name", "joined", "name", "pets[0].name", "pets[1].name", "scores"]);

        assert_eq!(doc.get("name").unwrap().value(), FieldValue::from("ada lovelace"));
        assert_eq!(doc.get("pets[1].name").unwrap().value(), FieldValue::from("tom"));
        assert_eq!(doc.get("friend.name").unwrap().value(), FieldValue::from("bob"));
        assert_eq!(doc.original().pets.len(), 2);
    }

    #[test]
    fn lists_keep_one_field_per_element() {
        let doc = build(owner()).unwrap();
        let scores = doc.get("scores").unwrap();
        assert!(scores.is_list());
        assert_eq!(scores.items().len(), 2);
        assert_eq!(scores.sort_key(), "3,9");
    }

    #[test]
    fn dates_are_truncated_on_ingest() {
        let doc = build(owner()).unwrap();
        let joined = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(doc.get("joined").unwrap().value(), FieldValue::Date(joined));
    }

    #[test]
    fn absent_optional_members_are_skipped() {
        let mut record = owner();
        record.best_friend = None;
        record.pets.clear();
        let doc = build(record).unwrap();
        assert!(doc.get("nickname").is_none());
        assert!(doc.get("friend.name").is_none());
        assert!(doc.get("pets[0].name").is_none());
    }

    struct Mismatched;

    impl Record for Mismatched {
        fn schema() -> RecordSchema {
            RecordSchema::new().member(Member::number("age"))
        }

        fn member_value(&self, _member: &str) -> Value<'_> {
            Value::scalar("ten")
        }
    }

    #[test]
    fn type_mismatch_aborts_construction() {
        let schema = Schema::of::<Mismatched>(&Config::default()).unwrap();
        let err = Document::new(Arc::new(Mismatched), &schema, &FieldRegistry::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn unregistered_kind_aborts_construction() {
        let schema = Schema::of::<Owner>(&Config::default()).unwrap();
        let err = Document::new(Arc::new(owner()), &schema, &FieldRegistry::empty()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownFieldKind);
    }
}
