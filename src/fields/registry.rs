use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use crate::analysis::analyzer::AnalyzerRegistry;
use crate::core::error::{Error, Result};
use crate::fields::{Field, FieldConfig, BOOLEAN, DATE, NUMBER, PARTIAL, TEXT, WORDS};
use crate::fields::boolean::BoolField;
use crate::fields::date::DateField;
use crate::fields::number::NumField;
use crate::fields::partial::PartialField;
use crate::fields::text::TextField;
use crate::fields::words::WordsField;

/// Builds an empty field of one kind from its configuration
pub type FieldFactory = Arc<dyn Fn(&FieldConfig) -> Result<Box<dyn Field>> + Send + Sync>;

/// Registry of field kinds.
///
/// Each index holds its own registry (shared through `Arc`), so custom kinds
/// registered for one index never leak into another. The lock here is
/// independent of any index lock.
pub struct FieldRegistry {
    factories: RwLock<HashMap<String, FieldFactory>>,
    analyzers: Arc<AnalyzerRegistry>,
}

impl FieldRegistry {
    /// Registry with the built-in kinds installed
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register_defaults();
        registry
    }

    /// Registry without any kinds
    pub fn empty() -> Self {
        FieldRegistry {
            factories: RwLock::new(HashMap::new()),
            analyzers: Arc::new(AnalyzerRegistry::new()),
        }
    }

    fn register_defaults(&self) {
        self.register(TEXT, |_| Ok(Box::new(TextField::new()) as Box<dyn Field>));
        self.register(PARTIAL, |_| Ok(Box::new(PartialField::new()) as Box<dyn Field>));
        self.register(NUMBER, |_| Ok(Box::new(NumField::new()) as Box<dyn Field>));
        self.register(BOOLEAN, |_| Ok(Box::new(BoolField::new()) as Box<dyn Field>));
        self.register(DATE, |config| Ok(Box::new(DateField::new(config)?) as Box<dyn Field>));

        let analyzers = Arc::clone(&self.analyzers);
        self.register(WORDS, move |config| {
            Ok(Box::new(WordsField::new(config, &analyzers)?) as Box<dyn Field>)
        });
    }

    /// Installs or replaces the factory for `kind`
    pub fn register<F>(&self, kind: &str, factory: F)
    where
        F: Fn(&FieldConfig) -> Result<Box<dyn Field>> + Send + Sync + 'static,
    {
        log::debug!("registering field kind '{}'", kind);
        self.factories.write().insert(kind.to_string(), Arc::new(factory));
    }

    /// Removes `kind`; returns whether it was registered
    pub fn unregister(&self, kind: &str) -> bool {
        self.factories.write().remove(kind).is_some()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.read().contains_key(kind)
    }

    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<String> = self.factories.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// New, empty field of `kind`
    pub fn create(&self, kind: &str, config: &FieldConfig) -> Result<Box<dyn Field>> {
        // Factory runs outside the lock
        let factory = self.factories.read().get(kind).cloned();
        let factory = factory.ok_or_else(|| Error::unknown_field_kind(kind))?;
        factory(config)
    }

    /// Analyzers available to `words` fields
    pub fn analyzers(&self) -> &Arc<AnalyzerRegistry> {
        &self.analyzers
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::ops::Bound;
    use super::*;
    use crate::core::error::ErrorKind;
    use crate::core::types::FieldValue;
    use crate::fields::{contains, range_unsupported};
    use crate::query::types::PredicateKind;

    /// Stores upper-cased strings verbatim
    #[derive(Debug, Default)]
    struct ShoutField {
        value: FieldValue,
        bytes: Vec<u8>,
    }

    impl Field for ShoutField {
        fn kind(&self) -> &str {
            "shout"
        }

        fn value(&self) -> &FieldValue {
            &self.value
        }

        fn bytes(&self) -> &[u8] {
            &self.bytes
        }

        fn process(&mut self, value: &FieldValue) -> Result<()> {
            self.bytes = self.to_search_bytes(value)?;
            self.value = value.clone();
            Ok(())
        }

        fn to_search_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
            match value {
                FieldValue::Text(s) => Ok(s.to_uppercase().into_bytes()),
                other => Err(Error::type_mismatch("text", other.type_name())),
            }
        }

        fn search(&self, bytes: &[u8]) -> Result<bool> {
            Ok(contains(&self.bytes, bytes))
        }

        fn search_range(&self, _min: Bound<&[u8]>, _max: Bound<&[u8]>) -> Result<bool> {
            Err(range_unsupported(self.kind()))
        }

        fn supports(&self, predicate: PredicateKind) -> bool {
            predicate != PredicateKind::Range
        }
    }

    #[test]
    fn builtin_kinds_are_registered() {
        let registry = FieldRegistry::new();
        assert_eq!(registry.kinds(), vec!["bool", "date", "num", "partial", "text", "words"]);
    }

    #[test]
    fn custom_kind_register_create_unregister() {
        let registry = FieldRegistry::empty();
        registry.register("shout", |_| Ok(Box::new(ShoutField::default()) as Box<dyn Field>));

        let mut field = registry.create("shout", &FieldConfig::new()).unwrap();
        field.process(&FieldValue::from("hey there")).unwrap();
        let needle = field.to_search_bytes(&FieldValue::from("there")).unwrap();
        assert!(field.search(&needle).unwrap());

        assert!(registry.unregister("shout"));
        let err = registry.create("shout", &FieldConfig::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownFieldKind);
    }

    #[test]
    fn registries_do_not_share_kinds() {
        let a = FieldRegistry::new();
        let b = FieldRegistry::new();
        a.register("shout", |_| Ok(Box::new(ShoutField::default()) as Box<dyn Field>));
        assert!(a.contains("shout"));
        assert!(!b.contains("shout"));
    }

    #[test]
    fn invalid_config_fails_creation() {
        let registry = FieldRegistry::new();
        let mut config = FieldConfig::new();
        config.insert("granularity".into(), serde_json::json!("fortnight"));
        let err = registry.create(DATE, &config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidArgument);
    }
}
