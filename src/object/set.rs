//! Unordered collection of distinct scalar elements.

use std::collections::BTreeSet;

use crate::error::Result;

use super::literal::split_elements;
use super::scalar::{ScalarKind, ScalarValue};
use super::{render_boolean, sorted_render, unknown_selector, RenderOptions, NULL_REPLY};

/// A `Set<T>` instance. Elements are stored deduplicated; rendering orders
/// them ascending by rendered-representation byte order.
#[derive(Debug, Clone, PartialEq)]
pub struct SetObject {
    kind: ScalarKind,
    items: BTreeSet<ScalarValue>,
}

impl SetObject {
    /// Empty set with the given element kind.
    pub fn new(kind: ScalarKind) -> SetObject {
        SetObject {
            kind,
            items: BTreeSet::new(),
        }
    }

    /// Build from a `[e1,e2,…]` literal; duplicates collapse.
    pub fn from_literal(kind: ScalarKind, literal: &str) -> Result<SetObject> {
        let mut items = BTreeSet::new();
        for element in split_elements(literal)? {
            items.insert(ScalarValue::parse(kind, &element)?);
        }
        Ok(SetObject { kind, items })
    }

    /// Render `[e1,e2,…]` sorted by element representation.
    pub fn representation(&self, options: &RenderOptions) -> String {
        let rendered = sorted_render(self.items.iter(), options);
        format!("[{}]", rendered.join(","))
    }

    /// Handle one message addressed to this set.
    pub fn receive(
        &mut self,
        selector: &str,
        arguments: &[String],
        options: &RenderOptions,
    ) -> Result<String> {
        match selector {
            "asArray" | "getValue" => Ok(self.representation(options)),
            "size" => Ok((self.items.len() as i64).to_string()),
            "isEmpty?" => Ok(render_boolean(self.items.is_empty()).to_string()),
            "contains?:" => {
                let value = ScalarValue::parse(self.kind, &arguments[0])?;
                Ok(render_boolean(self.items.contains(&value)).to_string())
            }
            "add:" => {
                let value = ScalarValue::parse(self.kind, &arguments[0])?;
                self.items.insert(value);
                Ok(NULL_REPLY.to_string())
            }
            "remove:" => {
                let value = ScalarValue::parse(self.kind, &arguments[0])?;
                self.items.remove(&value);
                Ok(NULL_REPLY.to_string())
            }
            "clear" => {
                self.items.clear();
                Ok(NULL_REPLY.to_string())
            }
            _ => Err(unknown_selector(SET_OPS, selector)),
        }
    }
}

const SET_OPS: &[(&str, usize)] = &[
    ("asArray", 0),
    ("getValue", 0),
    ("size", 0),
    ("isEmpty?", 0),
    ("contains?", 1),
    ("add", 1),
    ("remove", 1),
    ("clear", 0),
];
