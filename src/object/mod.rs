//! Typed value objects held by the registry.
//!
//! Every registered variable is an [`Instance`]: a tagged sum over the five
//! scalar kinds and the three collection shapes. Instances share a uniform
//! protocol — constructed from a type-actor creation message, mutated and
//! inspected through [`Instance::receive`], rendered through
//! [`Instance::representation`]. Rendering state (float precision and
//! comparison tolerance) travels as an explicit [`RenderOptions`] parameter
//! rather than through any process-wide accessor.

/// Keyed mapping objects.
pub mod dictionary;
/// Collection literal splitting.
pub mod literal;
/// Scalar kinds and values.
pub mod scalar;
/// Distinct-element collection objects.
pub mod set;
/// Ordered sequence objects.
pub mod vector;

pub use dictionary::DictionaryObject;
pub use scalar::{ScalarKind, ScalarValue};
pub use set::SetObject;
pub use vector::VectorObject;

use crate::error::{Exception, Result};
use crate::message::grammar::{self, TypeActor};

/// Reply used by every void operation.
pub const NULL_REPLY: &str = "null";

/// Rendering and comparison tunables threaded through every operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Fractional digits emitted when rendering floats.
    pub float_precision: usize,
    /// Absolute tolerance used by float equality.
    pub float_comparison_tolerance: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            float_precision: 6,
            float_comparison_tolerance: 1e-6,
        }
    }
}

/// A typed value instance living in the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    /// Boolean, Character, Integer, Float or String instance.
    Scalar(ScalarValue),
    /// `Vector<T>` instance.
    Vector(VectorObject),
    /// `Set<T>` instance.
    Set(SetObject),
    /// `Dictionary<K,V>` instance.
    Dictionary(DictionaryObject),
}

impl Instance {
    /// Construct an instance from a creation message sent to a type actor.
    ///
    /// Returns the variable name (the first argument) together with the new
    /// instance. The name must be a valid variable name; the remaining
    /// arguments must fit the selector's shape for the actor's kind.
    pub fn construct(
        actor: &TypeActor,
        selector: &str,
        arguments: &[String],
    ) -> Result<(String, Instance)> {
        let name = arguments
            .first()
            .ok_or(Exception::WrongNumberOfArguments)?;
        if !grammar::is_variable(name) {
            return Err(Exception::InvalidArgument);
        }

        let instance = match selector {
            "create:" | "createIfNotExists:" => Instance::empty(actor),
            "create:withValue:" | "createIfNotExists:withValue:" => match *actor {
                TypeActor::Boolean => {
                    Instance::Scalar(ScalarValue::parse(ScalarKind::Boolean, &arguments[1])?)
                }
                TypeActor::Character => {
                    Instance::Scalar(ScalarValue::parse(ScalarKind::Character, &arguments[1])?)
                }
                TypeActor::Integer => {
                    Instance::Scalar(ScalarValue::parse(ScalarKind::Integer, &arguments[1])?)
                }
                TypeActor::Float => {
                    Instance::Scalar(ScalarValue::parse(ScalarKind::Float, &arguments[1])?)
                }
                TypeActor::String => {
                    Instance::Scalar(ScalarValue::parse(ScalarKind::String, &arguments[1])?)
                }
                _ => return Err(Exception::InvalidMessage),
            },
            "create:withElements:" | "createIfNotExists:withElements:" => match *actor {
                TypeActor::Vector(kind) => {
                    Instance::Vector(VectorObject::from_literal(kind, &arguments[1])?)
                }
                TypeActor::Set(kind) => {
                    Instance::Set(SetObject::from_literal(kind, &arguments[1])?)
                }
                TypeActor::Dictionary(key_kind, value_kind) => Instance::Dictionary(
                    DictionaryObject::from_literal(key_kind, value_kind, &arguments[1])?,
                ),
                _ => return Err(Exception::InvalidMessage),
            },
            _ => return Err(unknown_selector(CREATE_OPS, selector)),
        };

        Ok((name.clone(), instance))
    }

    fn empty(actor: &TypeActor) -> Instance {
        match *actor {
            TypeActor::Boolean => Instance::Scalar(ScalarKind::Boolean.default_value()),
            TypeActor::Character => Instance::Scalar(ScalarKind::Character.default_value()),
            TypeActor::Integer => Instance::Scalar(ScalarKind::Integer.default_value()),
            TypeActor::Float => Instance::Scalar(ScalarKind::Float.default_value()),
            TypeActor::String => Instance::Scalar(ScalarKind::String.default_value()),
            TypeActor::Vector(kind) => Instance::Vector(VectorObject::new(kind)),
            TypeActor::Set(kind) => Instance::Set(SetObject::new(kind)),
            TypeActor::Dictionary(key_kind, value_kind) => {
                Instance::Dictionary(DictionaryObject::new(key_kind, value_kind))
            }
        }
    }

    /// Forward one message to the instance's operation table.
    ///
    /// `arguments` must hold one entry per selector colon, as the message
    /// parser produces.
    pub fn receive(
        &mut self,
        selector: &str,
        arguments: &[String],
        options: &RenderOptions,
    ) -> Result<String> {
        match self {
            Instance::Scalar(value) => value.receive(selector, arguments, options),
            Instance::Vector(vector) => vector.receive(selector, arguments, options),
            Instance::Set(set) => set.receive(selector, arguments, options),
            Instance::Dictionary(dictionary) => dictionary.receive(selector, arguments, options),
        }
    }

    /// Render the instance in its literal grammar.
    pub fn representation(&self, options: &RenderOptions) -> String {
        match self {
            Instance::Scalar(value) => value.render(options),
            Instance::Vector(vector) => vector.representation(options),
            Instance::Set(set) => set.representation(options),
            Instance::Dictionary(dictionary) => dictionary.representation(options),
        }
    }
}

const CREATE_OPS: &[(&str, usize)] = &[("create", 1), ("createIfNotExists", 1)];

/// Render `true` / `false`.
pub(crate) fn render_boolean(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Render every element and sort ascending by byte order.
pub(crate) fn sorted_render<'a>(
    items: impl Iterator<Item = &'a ScalarValue>,
    options: &RenderOptions,
) -> Vec<String> {
    let mut rendered: Vec<String> = items.map(|item| item.render(options)).collect();
    rendered.sort_by(|a, b| a.as_bytes().cmp(b.as_bytes()));
    rendered
}

/// Classify a selector that missed an operation table: a known single-keyword
/// operation name used with the wrong colon count is an arity error; anything
/// else is an unknown message. The parser guarantees one argument per colon,
/// so the colon count stands in for the argument count.
pub(crate) fn unknown_selector(table: &[(&str, usize)], selector: &str) -> Exception {
    let colons = selector.matches(':').count();
    let base = selector.trim_end_matches(':');
    if !base.contains(':') {
        if let Some((_, arity)) = table.iter().find(|(name, _)| *name == base) {
            if *arity != colons {
                return Exception::WrongNumberOfArguments;
            }
        }
    }
    Exception::InvalidMessage
}
