//! Schema-less recipe records
//!
//! A record is whatever the form held when it was submitted: an ordered list
//! of field name/value pairs. Nothing here knows what a recipe looks like.

use std::fmt;

use serde::de::{DeserializeOwned, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered field name → text mapping
///
/// Serialized as a JSON object with members in field order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: Vec<(String, String)>,
}

/// Everything that is persisted, in append order
pub type RecordList = Vec<Record>;

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Set a field. An existing name keeps its position and takes the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Builder form of [`Record::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read the record through a typed schema chosen by the caller
    ///
    /// Fields of `T` must be strings (or `Option<String>`); extra record
    /// fields are ignored unless `T` denies them.
    pub fn view<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::to_value(self).and_then(serde_json::from_value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of field names to text values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Record, A::Error> {
        let mut record = Record {
            fields: Vec::with_capacity(access.size_hint().unwrap_or(0)),
        };
        while let Some((k, v)) = access.next_entry::<String, String>()? {
            record.insert(k, v);
        }
        Ok(record)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RecipeView {
        title_txt: String,
        rating: Option<String>,
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut r = Record::new().with("a", "1").with("b", "2");
        r.insert("a", "3");
        let fields: Vec<_> = r.iter().collect();
        assert_eq!(fields, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_serializes_in_field_order() {
        let r = Record::new().with("title", "Pasta").with("minutes", "20").with("a", "x");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"title":"Pasta","minutes":"20","a":"x"}"#);
    }

    #[test]
    fn test_deserialize_keeps_order() {
        let r: Record = serde_json::from_str(r#"{"z":"1","a":"2"}"#).unwrap();
        let names: Vec<_> = r.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["z", "a"]);
    }

    #[test]
    fn test_deserialize_rejects_non_text_values() {
        assert!(serde_json::from_str::<Record>(r#"{"minutes":20}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"["minutes"]"#).is_err());
    }

    #[test]
    fn test_from_iter() {
        let r: Record = [("title", "Soup"), ("title", "Stew")].into_iter().collect();
        assert_eq!(r.len(), 1);
        assert_eq!(r.get("title"), Some("Stew"));
    }

    #[test]
    fn test_typed_view() {
        let r = Record::new()
            .with("titleTxt", "Pasta")
            .with("organization", "Home");
        let view: RecipeView = r.view().unwrap();
        assert_eq!(view.title_txt, "Pasta");
        assert!(view.rating.is_none());

        let missing = Record::new().with("rating", "5");
        assert!(missing.view::<RecipeView>().is_err());
    }
}
