//! Ordered sequence of scalar elements.

use crate::error::Result;

use super::literal::split_elements;
use super::scalar::{ScalarKind, ScalarValue};
use super::{render_boolean, unknown_selector, RenderOptions, NULL_REPLY};

/// A `Vector<T>` instance: insertion-ordered, homogeneous elements.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorObject {
    kind: ScalarKind,
    items: Vec<ScalarValue>,
}

impl VectorObject {
    /// Empty vector with the given element kind.
    pub fn new(kind: ScalarKind) -> VectorObject {
        VectorObject {
            kind,
            items: Vec::new(),
        }
    }

    /// Build from a `[e1,e2,…]` literal.
    pub fn from_literal(kind: ScalarKind, literal: &str) -> Result<VectorObject> {
        let mut items = Vec::new();
        for element in split_elements(literal)? {
            items.push(ScalarValue::parse(kind, &element)?);
        }
        Ok(VectorObject { kind, items })
    }

    /// Render `[e1,e2,…]` in insertion order.
    pub fn representation(&self, options: &RenderOptions) -> String {
        let rendered: Vec<String> = self.items.iter().map(|v| v.render(options)).collect();
        format!("[{}]", rendered.join(","))
    }

    /// Handle one message addressed to this vector.
    pub fn receive(
        &mut self,
        selector: &str,
        arguments: &[String],
        options: &RenderOptions,
    ) -> Result<String> {
        match selector {
            "getValue" => Ok(self.representation(options)),
            "size" => Ok((self.items.len() as i64).to_string()),
            "isEmpty?" => Ok(render_boolean(self.items.is_empty()).to_string()),
            "contains?:" => {
                let needle = ScalarValue::parse(self.kind, &arguments[0])?;
                let found = self.items.iter().any(|item| item.equals(&needle, options));
                Ok(render_boolean(found).to_string())
            }
            "getAt:" => {
                let index = match ScalarValue::parse(ScalarKind::Integer, &arguments[0])? {
                    ScalarValue::Integer(index) => index,
                    _ => unreachable!(),
                };
                let item = usize::try_from(index)
                    .ok()
                    .and_then(|index| self.items.get(index));
                Ok(match item {
                    Some(item) => item.render(options),
                    None => NULL_REPLY.to_string(),
                })
            }
            "getFirst" => Ok(match self.items.first() {
                Some(item) => item.render(options),
                None => NULL_REPLY.to_string(),
            }),
            "getLast" => Ok(match self.items.last() {
                Some(item) => item.render(options),
                None => NULL_REPLY.to_string(),
            }),
            "pushBack:" => {
                let value = ScalarValue::parse(self.kind, &arguments[0])?;
                self.items.push(value);
                Ok(NULL_REPLY.to_string())
            }
            "popBack" => Ok(match self.items.pop() {
                Some(item) => item.render(options),
                None => NULL_REPLY.to_string(),
            }),
            "clear" => {
                self.items.clear();
                Ok(NULL_REPLY.to_string())
            }
            _ => Err(unknown_selector(VECTOR_OPS, selector)),
        }
    }
}

const VECTOR_OPS: &[(&str, usize)] = &[
    ("getValue", 0),
    ("size", 0),
    ("isEmpty?", 0),
    ("contains?", 1),
    ("getAt", 1),
    ("getFirst", 0),
    ("getLast", 0),
    ("pushBack", 1),
    ("popBack", 0),
    ("clear", 0),
];
