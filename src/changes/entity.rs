/// What sort of record a model is, as far as change tracking cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// A change-log row itself.
    Change,
    /// Video encodings produced by background jobs.
    Encoding,
    /// Image crops and derivatives.
    Image,
    /// Key/value content elements.
    Element,
    /// Many-to-many join rows.
    Pivot,
    /// Any other admin-managed record.
    Record,
}

/// Why a model kind never reaches the change log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    ChangeRecord,
    Derivative,
    /// Element edits arrive as a burst of per-key saves. They should be
    /// aggregated into one entry; until then they are not logged at all.
    Element,
    Pivot,
}

impl ModelKind {
    pub fn exclusion(&self) -> Option<Exclusion> {
        match self {
            ModelKind::Change => Some(Exclusion::ChangeRecord),
            ModelKind::Encoding | ModelKind::Image => Some(Exclusion::Derivative),
            ModelKind::Element => Some(Exclusion::Element),
            ModelKind::Pivot => Some(Exclusion::Pivot),
            ModelKind::Record => None,
        }
    }
}

/// A model whose create/update/delete events may be written to the change log.
pub trait Auditable: Send + Sync {
    fn kind(&self) -> ModelKind {
        ModelKind::Record
    }

    /// Model name stored with each change, e.g. `Admin`.
    fn model_name(&self) -> &str;

    /// Primary key rendered as text.
    fn key(&self) -> String;

    fn title(&self) -> Option<String> {
        None
    }

    /// Attributes touched by the change being reported, as a JSON object.
    /// Secrets must be left out.
    fn changed_attributes(&self) -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }

    fn is_audit_excluded(&self) -> bool {
        self.kind().exclusion().is_some()
    }
}

/// Pairs a model with the attributes that changed in the current save, for
/// models that do not track dirty state themselves.
pub struct Dirty<'a, T: Auditable> {
    pub model: &'a T,
    pub changed: serde_json::Value,
}

impl<'a, T: Auditable> Dirty<'a, T> {
    pub fn new(model: &'a T, changed: serde_json::Value) -> Self {
        Self { model, changed }
    }
}

impl<T: Auditable> Auditable for Dirty<'_, T> {
    fn kind(&self) -> ModelKind {
        self.model.kind()
    }

    fn model_name(&self) -> &str {
        self.model.model_name()
    }

    fn key(&self) -> String {
        self.model.key()
    }

    fn title(&self) -> Option<String> {
        self.model.title()
    }

    fn changed_attributes(&self) -> serde_json::Value {
        self.changed.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Thing(ModelKind);

    impl Auditable for Thing {
        fn kind(&self) -> ModelKind {
            self.0
        }

        fn model_name(&self) -> &str {
            "Thing"
        }

        fn key(&self) -> String {
            "1".to_string()
        }
    }

    #[test]
    fn only_plain_records_are_tracked() {
        for kind in [
            ModelKind::Change,
            ModelKind::Encoding,
            ModelKind::Image,
            ModelKind::Element,
            ModelKind::Pivot,
        ] {
            assert!(Thing(kind).is_audit_excluded(), "{kind:?} should be excluded");
        }
        assert!(!Thing(ModelKind::Record).is_audit_excluded());
    }

    #[test]
    fn encodings_and_images_share_an_exclusion() {
        assert_eq!(ModelKind::Encoding.exclusion(), Some(Exclusion::Derivative));
        assert_eq!(ModelKind::Image.exclusion(), Some(Exclusion::Derivative));
    }

    #[test]
    fn dirty_overrides_changed_attributes_only() {
        let thing = Thing(ModelKind::Record);
        let dirty = Dirty::new(&thing, json!({ "name": "New" }));
        assert_eq!(dirty.model_name(), "Thing");
        assert_eq!(dirty.key(), "1");
        assert_eq!(dirty.changed_attributes(), json!({ "name": "New" }));
        assert_eq!(thing.changed_attributes(), json!({}));
    }
}
