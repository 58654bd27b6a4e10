//! Identifier classification for message actors.
//!
//! Pure byte-level classification, no I/O. Identifiers match
//! `[A-Za-z_][A-Za-z0-9_]*`; variables may carry a single `::`-separated
//! namespace prefix. The actor token reaches this module with interior
//! whitespace already removed, so `Vector<Integer>` is the only spelling a
//! generic type actor can take here.

use crate::object::scalar::ScalarKind;

/// Reserved actor naming the dispatcher itself.
pub const CONTEXT_KEYWORD: &str = "Context";

/// Reserved actor naming the client connection.
pub const CONNECTION_KEYWORD: &str = "Connection";

/// Structured form of a type actor.
///
/// Parsing is structural: the generic forms match `prefix<…>` exactly, with a
/// single top-level comma split for `Dictionary`. A malformed parameter list
/// (`Vector<Foo>`, `Dictionary<Integer>`) is simply not a type actor; the
/// dispatcher then rejects the message instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeActor {
    /// `Boolean`
    Boolean,
    /// `Character`
    Character,
    /// `Integer`
    Integer,
    /// `Float`
    Float,
    /// `String`
    String,
    /// `Vector<T>` with a scalar element kind.
    Vector(ScalarKind),
    /// `Set<T>` with a scalar element kind.
    Set(ScalarKind),
    /// `Dictionary<K,V>` with scalar key and value kinds.
    Dictionary(ScalarKind, ScalarKind),
}

impl TypeActor {
    /// Parse an actor token into a [`TypeActor`], or `None` if it is not one.
    pub fn parse(actor: &str) -> Option<TypeActor> {
        if let Some(kind) = ScalarKind::parse_name(actor) {
            return Some(match kind {
                ScalarKind::Boolean => TypeActor::Boolean,
                ScalarKind::Character => TypeActor::Character,
                ScalarKind::Integer => TypeActor::Integer,
                ScalarKind::Float => TypeActor::Float,
                ScalarKind::String => TypeActor::String,
            });
        }

        if let Some(inner) = type_parameters(actor, "Vector") {
            return Some(TypeActor::Vector(ScalarKind::parse_name(inner)?));
        }
        if let Some(inner) = type_parameters(actor, "Set") {
            return Some(TypeActor::Set(ScalarKind::parse_name(inner)?));
        }
        if let Some(inner) = type_parameters(actor, "Dictionary") {
            let (key, value) = inner.split_once(',')?;
            return Some(TypeActor::Dictionary(
                ScalarKind::parse_name(key)?,
                ScalarKind::parse_name(value)?,
            ));
        }

        None
    }
}

/// The `…` of `prefix<…>`, or `None` when `actor` has a different shape.
fn type_parameters<'a>(actor: &'a str, prefix: &str) -> Option<&'a str> {
    actor
        .strip_prefix(prefix)?
        .strip_prefix('<')?
        .strip_suffix('>')
}

/// True iff `s` is a scalar type name or a well-formed generic type actor.
pub fn is_type(s: &str) -> bool {
    TypeActor::parse(s).is_some()
}

/// True iff `s` matches `identifier("::" identifier)?` and is not reserved.
pub fn is_variable(s: &str) -> bool {
    if s == CONTEXT_KEYWORD || s == CONNECTION_KEYWORD {
        return false;
    }
    match s.split_once("::") {
        Some((namespace, name)) => is_identifier(namespace) && is_identifier(name),
        None => is_identifier(s),
    }
}

/// True iff `s` is a bare identifier.
pub fn is_namespace(s: &str) -> bool {
    is_identifier(s)
}

/// True iff `s` is the reserved `Context` actor.
pub fn is_context(s: &str) -> bool {
    s == CONTEXT_KEYWORD
}

/// True iff `s` is the reserved `Connection` actor.
pub fn is_connection(s: &str) -> bool {
    s == CONNECTION_KEYWORD
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
