//! Keyed mapping between scalar kinds.

use std::collections::BTreeMap;

use crate::error::Result;

use super::literal::split_entries;
use super::scalar::{ScalarKind, ScalarValue};
use super::{render_boolean, unknown_selector, RenderOptions, NULL_REPLY};

/// A `Dictionary<K,V>` instance. Rendering orders entries ascending by
/// rendered-key byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryObject {
    key_kind: ScalarKind,
    value_kind: ScalarKind,
    entries: BTreeMap<ScalarValue, ScalarValue>,
}

impl DictionaryObject {
    /// Empty dictionary with the given key and value kinds.
    pub fn new(key_kind: ScalarKind, value_kind: ScalarKind) -> DictionaryObject {
        DictionaryObject {
            key_kind,
            value_kind,
            entries: BTreeMap::new(),
        }
    }

    /// Build from a `{k1:v1,…}` literal; a repeated key keeps its last value.
    pub fn from_literal(
        key_kind: ScalarKind,
        value_kind: ScalarKind,
        literal: &str,
    ) -> Result<DictionaryObject> {
        let mut entries = BTreeMap::new();
        for (key, value) in split_entries(literal)? {
            entries.insert(
                ScalarValue::parse(key_kind, &key)?,
                ScalarValue::parse(value_kind, &value)?,
            );
        }
        Ok(DictionaryObject {
            key_kind,
            value_kind,
            entries,
        })
    }

    /// Render `{k1:v1,…}` sorted by key representation.
    pub fn representation(&self, options: &RenderOptions) -> String {
        let body: Vec<String> = self
            .sorted_entries(options)
            .into_iter()
            .map(|(key, value)| format!("{key}:{value}"))
            .collect();
        format!("{{{}}}", body.join(","))
    }

    fn sorted_entries(&self, options: &RenderOptions) -> Vec<(String, String)> {
        let mut rendered: Vec<(String, String)> = self
            .entries
            .iter()
            .map(|(key, value)| (key.render(options), value.render(options)))
            .collect();
        rendered.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        rendered
    }

    /// Handle one message addressed to this dictionary.
    pub fn receive(
        &mut self,
        selector: &str,
        arguments: &[String],
        options: &RenderOptions,
    ) -> Result<String> {
        match selector {
            "getValue" => Ok(self.representation(options)),
            "size" => Ok((self.entries.len() as i64).to_string()),
            "isEmpty?" => Ok(render_boolean(self.entries.is_empty()).to_string()),
            "containsKey?:" => {
                let key = ScalarValue::parse(self.key_kind, &arguments[0])?;
                Ok(render_boolean(self.entries.contains_key(&key)).to_string())
            }
            "getValueOf:" => {
                let key = ScalarValue::parse(self.key_kind, &arguments[0])?;
                Ok(match self.entries.get(&key) {
                    Some(value) => value.render(options),
                    None => NULL_REPLY.to_string(),
                })
            }
            "getKeys" => {
                let keys: Vec<String> = self
                    .sorted_entries(options)
                    .into_iter()
                    .map(|(key, _)| key)
                    .collect();
                Ok(format!("[{}]", keys.join(",")))
            }
            "getValues" => {
                let values: Vec<String> = self
                    .sorted_entries(options)
                    .into_iter()
                    .map(|(_, value)| value)
                    .collect();
                Ok(format!("[{}]", values.join(",")))
            }
            "associate:withValue:" => {
                let key = ScalarValue::parse(self.key_kind, &arguments[0])?;
                let value = ScalarValue::parse(self.value_kind, &arguments[1])?;
                self.entries.insert(key, value);
                Ok(NULL_REPLY.to_string())
            }
            "removeKey:" => {
                let key = ScalarValue::parse(self.key_kind, &arguments[0])?;
                self.entries.remove(&key);
                Ok(NULL_REPLY.to_string())
            }
            "clear" => {
                self.entries.clear();
                Ok(NULL_REPLY.to_string())
            }
            _ => Err(unknown_selector(DICTIONARY_OPS, selector)),
        }
    }
}

const DICTIONARY_OPS: &[(&str, usize)] = &[
    ("getValue", 0),
    ("size", 0),
    ("isEmpty?", 0),
    ("containsKey?", 1),
    ("getValueOf", 1),
    ("getKeys", 0),
    ("getValues", 0),
    ("removeKey", 1),
    ("clear", 0),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn renders_sorted_by_key() {
        let dictionary = DictionaryObject::from_literal(
            ScalarKind::String,
            ScalarKind::Integer,
            r#"{"b": 2, "a": 1}"#,
        )
        .unwrap();
        assert_eq!(dictionary.representation(&options()), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn associate_upserts() {
        let options = options();
        let mut dictionary = DictionaryObject::new(ScalarKind::String, ScalarKind::Integer);
        dictionary
            .receive(
                "associate:withValue:",
                &[r#""k""#.to_string(), "1".to_string()],
                &options,
            )
            .unwrap();
        dictionary
            .receive(
                "associate:withValue:",
                &[r#""k""#.to_string(), "2".to_string()],
                &options,
            )
            .unwrap();
        assert_eq!(
            dictionary
                .receive("getValueOf:", &[r#""k""#.to_string()], &options)
                .unwrap(),
            "2"
        );
        assert_eq!(dictionary.receive("size", &[], &options).unwrap(), "1");
    }

    #[test]
    fn absent_key_lookup_is_null_and_remove_is_quiet() {
        let options = options();
        let mut dictionary = DictionaryObject::new(ScalarKind::Integer, ScalarKind::String);
        assert_eq!(
            dictionary
                .receive("getValueOf:", &["7".to_string()], &options)
                .unwrap(),
            NULL_REPLY
        );
        assert_eq!(
            dictionary
                .receive("removeKey:", &["7".to_string()], &options)
                .unwrap(),
            NULL_REPLY
        );
    }

    #[test]
    fn keys_and_values_share_one_order() {
        let options = options();
        let mut dictionary = DictionaryObject::from_literal(
            ScalarKind::Integer,
            ScalarKind::String,
            r#"{9: "nine", 10: "ten"}"#,
        )
        .unwrap();
        // "10" precedes "9" in representation byte order.
        assert_eq!(
            dictionary.receive("getKeys", &[], &options).unwrap(),
            "[10,9]"
        );
        assert_eq!(
            dictionary.receive("getValues", &[], &options).unwrap(),
            r#"["ten","nine"]"#
        );
    }
}
