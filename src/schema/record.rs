use crate::core::types::FieldValue;
use crate::fields::{FieldConfig, FieldKind};

/// Visible name that excludes a member from the schema
pub const SKIP: &str = "-";

/// A type whose values can be indexed.
///
/// `schema` describes the members once per type; `member_value` hands out
/// the runtime value of one member, looked up by its declared name.
///
/// ```ignore
/// struct Pet { name: String, age: u32 }
///
/// impl Record for Pet {
///     fn schema() -> RecordSchema {
///         RecordSchema::new()
///             .member(Member::text("name"))
///             .member(Member::number("age"))
///     }
///
///     fn member_value(&self, member: &str) -> Value<'_> {
///         match member {
///             "name" => Value::scalar(self.name.as_str()),
///             "age" => Value::scalar(self.age),
///             _ => Value::Missing,
///         }
///     }
/// }
/// ```
pub trait Record: Send + Sync {
    fn schema() -> RecordSchema
    where
        Self: Sized;

    fn member_value(&self, member: &str) -> Value<'_>;
}

/// Runtime value of one member
pub enum Value<'a> {
    Scalar(FieldValue),
    Record(&'a dyn Record),
    Records(Vec<&'a dyn Record>),
    Missing,
}

impl<'a> Value<'a> {
    pub fn scalar(value: impl Into<FieldValue>) -> Self {
        Value::Scalar(value.into())
    }

    pub fn record<R: Record>(record: &'a R) -> Self {
        Value::Record(record)
    }

    pub fn records<R: Record>(records: &'a [R]) -> Self {
        Value::Records(records.iter().map(|r| r as &dyn Record).collect())
    }

    /// Lists of scalars, e.g. `Value::list(&self.tags)`
    pub fn list<T>(items: &[T]) -> Self
    where
        T: Clone + Into<FieldValue>,
    {
        Value::Scalar(FieldValue::List(items.iter().cloned().map(Into::into).collect()))
    }

    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Value::Scalar(_) => "scalar",
            Value::Record(_) => "record",
            Value::Records(_) => "record list",
            Value::Missing => "missing",
        }
    }
}

impl std::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Value::Scalar(value) => f.debug_tuple("Scalar").field(value).finish(),
            other => f.write_str(other.describe()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum MemberKind {
    Scalar(FieldKind),
    List(FieldKind),
    Nested(fn() -> RecordSchema),
    NestedList(fn() -> RecordSchema),
    /// Present but not searchable; carries the native type name
    Unsupported(String),
}

/// One declared member of a record
#[derive(Debug, Clone)]
pub struct Member {
    name: String,
    rename: Option<String>,
    kind: MemberKind,
    config: FieldConfig,
}

impl Member {
    pub fn new(name: &str, kind: MemberKind) -> Self {
        Member {
            name: name.to_string(),
            rename: None,
            kind,
            config: FieldConfig::new(),
        }
    }

    /// Exact, case-insensitive string
    pub fn text(name: &str) -> Self {
        Self::new(name, MemberKind::Scalar(FieldKind::Text))
    }

    /// String searched by substring
    pub fn partial(name: &str) -> Self {
        Self::new(name, MemberKind::Scalar(FieldKind::Partial))
    }

    /// Analyzed free text
    pub fn words(name: &str) -> Self {
        Self::new(name, MemberKind::Scalar(FieldKind::Words))
    }

    pub fn number(name: &str) -> Self {
        Self::new(name, MemberKind::Scalar(FieldKind::Number))
    }

    pub fn boolean(name: &str) -> Self {
        Self::new(name, MemberKind::Scalar(FieldKind::Boolean))
    }

    pub fn date(name: &str) -> Self {
        Self::new(name, MemberKind::Scalar(FieldKind::Date))
    }

    /// Scalar stored by a kind registered under `kind`
    pub fn custom(name: &str, kind: &str) -> Self {
        Self::new(name, MemberKind::Scalar(FieldKind::Custom(kind.to_string())))
    }

    pub fn nested<R: Record>(name: &str) -> Self {
        Self::new(name, MemberKind::Nested(R::schema))
    }

    pub fn nested_list<R: Record>(name: &str) -> Self {
        Self::new(name, MemberKind::NestedList(R::schema))
    }

    pub fn unsupported(name: &str, type_name: &str) -> Self {
        Self::new(name, MemberKind::Unsupported(type_name.to_string()))
    }

    /// Turns a scalar member into a list of the same kind
    pub fn list(mut self) -> Self {
        self.kind = match self.kind {
            MemberKind::Scalar(kind) => MemberKind::List(kind),
            other => other,
        };
        self
    }

    /// Overrides the visible field name; `"-"` excludes the member
    pub fn rename(mut self, name: &str) -> Self {
        self.rename = Some(name.to_string());
        self
    }

    pub fn skip(self) -> Self {
        self.rename(SKIP)
    }

    pub fn config(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.config.insert(key.to_string(), value.into());
        self
    }

    /// Declared name, as passed to `Record::member_value`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name the member is searched by
    pub fn field_name(&self) -> &str {
        self.rename.as_deref().unwrap_or(&self.name)
    }

    pub fn is_skipped(&self) -> bool {
        self.field_name() == SKIP
    }

    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    pub fn field_config(&self) -> &FieldConfig {
        &self.config
    }
}

/// Ordered member list of one record type
#[derive(Debug, Clone, Default)]
pub struct RecordSchema {
    members: Vec<Member>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}
