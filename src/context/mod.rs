//! Registry and dispatcher.
//!
//! The [`Context`] owns every registered instance in an ordered map and
//! exposes one entry point, [`Context::execute`]: parse the line, classify
//! the actor (type, context, variable, connection), route the message, map
//! any failure to its wire code, log, reply. Nothing escapes the boundary.

/// Append-only execution log sink.
pub mod logsink;

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{Exception, Result};
use crate::message::grammar::{self, TypeActor};
use crate::message::parser::{parse_message, Message};
use crate::object::{unknown_selector, Instance, RenderOptions, ScalarKind, ScalarValue, NULL_REPLY};
use crate::session::Session;
use logsink::LogSink;

/// Construction-time configuration for a [`Context`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Logfile path; `None` logs to stdout unless quiet mode is set.
    #[serde(default)]
    pub logfile: Option<PathBuf>,

    /// Fractional digits used when rendering floats (positive).
    #[serde(default = "default_float_precision")]
    pub float_precision: usize,

    /// Absolute tolerance for float equality (non-negative).
    #[serde(default = "default_float_comparison_tolerance")]
    pub float_comparison_tolerance: f64,

    /// Suppress the stdout fallback when no logfile is configured.
    #[serde(default)]
    pub quiet: bool,
}

fn default_float_precision() -> usize {
    6
}

fn default_float_comparison_tolerance() -> f64 {
    1e-6
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            logfile: None,
            float_precision: default_float_precision(),
            float_comparison_tolerance: default_float_comparison_tolerance(),
            quiet: false,
        }
    }
}

impl ContextConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> std::result::Result<ContextConfig, SetupError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Errors raised while loading configuration or building a [`Context`].
///
/// These face the host; they are never rendered as wire replies.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The config file did not parse.
    #[error("config file error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem failure opening the config file or logfile.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// The dispatcher: ordered name→instance registry plus rendering tunables
/// and the execution log sink.
#[derive(Debug)]
pub struct Context {
    instances: BTreeMap<String, Instance>,
    options: RenderOptions,
    log: LogSink,
}

impl Context {
    /// Build a dispatcher from its configuration, opening the log sink.
    pub fn new(config: ContextConfig) -> std::result::Result<Context, SetupError> {
        if config.float_precision == 0 {
            return Err(SetupError::Config(
                "float_precision must be positive".to_string(),
            ));
        }
        if config.float_comparison_tolerance < 0.0 {
            return Err(SetupError::Config(
                "float_comparison_tolerance must be non-negative".to_string(),
            ));
        }
        let log = LogSink::open(config.logfile.as_deref(), config.quiet)?;
        Ok(Context {
            instances: BTreeMap::new(),
            options: RenderOptions {
                float_precision: config.float_precision,
                float_comparison_tolerance: config.float_comparison_tolerance,
            },
            log,
        })
    }

    /// Dispatch one input line and return the textual reply.
    ///
    /// Never fails: every error surfaces as its wire code. Exactly one log
    /// record is appended per call.
    pub fn execute(&mut self, input: &str, session: &mut dyn Session) -> String {
        let reply = match self.dispatch(input, session) {
            Ok(reply) => reply,
            Err(exception) => exception.to_string(),
        };
        self.log.record(input, &reply);
        reply
    }

    fn dispatch(&mut self, input: &str, session: &mut dyn Session) -> Result<String> {
        let message = parse_message(input)?;
        if let Some(type_actor) = TypeActor::parse(&message.actor) {
            self.execute_in_type(&type_actor, &message)
        } else if grammar::is_context(&message.actor) {
            self.execute_in_context(&message)
        } else if grammar::is_variable(&message.actor) {
            self.execute_in_variable(&message)
        } else if grammar::is_connection(&message.actor) {
            session.receive(&message.selector, &message.arguments)
        } else {
            Err(Exception::InvalidMessage)
        }
    }

    /// Creation path: construct first (validating selector, name and
    /// arguments), then resolve the name collision, then insert.
    fn execute_in_type(&mut self, actor: &TypeActor, message: &Message) -> Result<String> {
        let (name, instance) =
            Instance::construct(actor, &message.selector, &message.arguments)?;
        if self.instances.contains_key(&name) {
            if message.selector.starts_with("createIfNotExists:") {
                return Ok(NULL_REPLY.to_string());
            }
            return Err(Exception::VariableNameAlreadyUsed);
        }
        self.instances.insert(name, instance);
        Ok(NULL_REPLY.to_string())
    }

    fn execute_in_context(&mut self, message: &Message) -> Result<String> {
        let arguments = &message.arguments;
        match message.selector.as_str() {
            "listNamespaces" => Ok(self.op_list_namespaces()),
            "listVariables" => Ok(self.op_list_variables()),
            "listVariablesOfNamespace:" => self.op_list_variables_of_namespace(&arguments[0]),
            "deleteVariable:" => self.op_delete_variable(&arguments[0]),
            "deleteVariablesOfNamespace:" => self.op_delete_variables_of_namespace(&arguments[0]),
            "getFloatPrecision" => {
                Ok(ScalarValue::Integer(self.options.float_precision as i64).render(&self.options))
            }
            "setFloatPrecision:" => self.op_set_float_precision(&arguments[0]),
            "getFloatComparisonTolerance" => {
                Ok(ScalarValue::Float(self.options.float_comparison_tolerance)
                    .render(&self.options))
            }
            "setFloatComparisonTolerance:" => {
                self.op_set_float_comparison_tolerance(&arguments[0])
            }
            selector => Err(unknown_selector(CONTEXT_OPS, selector)),
        }
    }

    fn execute_in_variable(&mut self, message: &Message) -> Result<String> {
        let instance = self
            .instances
            .get_mut(&message.actor)
            .ok_or(Exception::UnexistentVariable)?;
        instance.receive(&message.selector, &message.arguments, &self.options)
    }

    fn op_list_namespaces(&self) -> String {
        let namespaces: BTreeSet<&str> = self
            .instances
            .keys()
            .filter_map(|name| name.split_once("::").map(|(namespace, _)| namespace))
            .collect();
        bracket_list(namespaces.into_iter())
    }

    fn op_list_variables(&self) -> String {
        bracket_list(self.instances.keys().map(String::as_str))
    }

    fn op_list_variables_of_namespace(&self, namespace: &str) -> Result<String> {
        if !grammar::is_namespace(namespace) {
            return Err(Exception::InvalidArgument);
        }
        let prefix = format!("{namespace}::");
        Ok(bracket_list(
            self.instances
                .keys()
                .filter(|name| name.starts_with(&prefix))
                .map(String::as_str),
        ))
    }

    fn op_delete_variable(&mut self, name: &str) -> Result<String> {
        if !grammar::is_variable(name) {
            return Err(Exception::InvalidArgument);
        }
        self.instances
            .remove(name)
            .ok_or(Exception::UnexistentVariable)?;
        Ok(NULL_REPLY.to_string())
    }

    fn op_delete_variables_of_namespace(&mut self, namespace: &str) -> Result<String> {
        if !grammar::is_namespace(namespace) {
            return Err(Exception::InvalidArgument);
        }
        let prefix = format!("{namespace}::");
        // Collect matching keys before erasing.
        let doomed: Vec<String> = self
            .instances
            .keys()
            .filter(|name| name.starts_with(&prefix))
            .cloned()
            .collect();
        for name in doomed {
            self.instances.remove(&name);
        }
        Ok(NULL_REPLY.to_string())
    }

    fn op_set_float_precision(&mut self, argument: &str) -> Result<String> {
        let precision = match ScalarValue::parse(ScalarKind::Integer, argument)? {
            ScalarValue::Integer(precision) => precision,
            _ => unreachable!(),
        };
        if precision <= 0 {
            return Err(Exception::InvalidArgument);
        }
        self.options.float_precision = precision as usize;
        Ok(NULL_REPLY.to_string())
    }

    fn op_set_float_comparison_tolerance(&mut self, argument: &str) -> Result<String> {
        let tolerance = match ScalarValue::parse(ScalarKind::Float, argument)? {
            ScalarValue::Float(tolerance) => tolerance,
            _ => unreachable!(),
        };
        if tolerance < 0.0 {
            return Err(Exception::InvalidArgument);
        }
        self.options.float_comparison_tolerance = tolerance;
        Ok(NULL_REPLY.to_string())
    }
}

const CONTEXT_OPS: &[(&str, usize)] = &[
    ("listNamespaces", 0),
    ("listVariables", 0),
    ("listVariablesOfNamespace", 1),
    ("deleteVariable", 1),
    ("deleteVariablesOfNamespace", 1),
    ("getFloatPrecision", 0),
    ("setFloatPrecision", 1),
    ("getFloatComparisonTolerance", 0),
    ("setFloatComparisonTolerance", 1),
];

fn bracket_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = items.collect();
    format!("[{}]", joined.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoSession;

    impl Session for NoSession {
        fn receive(&mut self, _selector: &str, _arguments: &[String]) -> Result<String> {
            Err(Exception::InvalidMessage)
        }
    }

    fn quiet_context() -> Context {
        Context::new(ContextConfig {
            quiet: true,
            ..ContextConfig::default()
        })
        .unwrap()
    }

    fn run(context: &mut Context, input: &str) -> String {
        context.execute(input, &mut NoSession)
    }

    #[test]
    fn creates_and_reads_back_a_variable() {
        let mut context = quiet_context();
        assert_eq!(run(&mut context, "Integer create: x, withValue: 42"), "null");
        assert_eq!(run(&mut context, "x getValue"), "42");
    }

    #[test]
    fn listings_are_sorted_and_deduplicated() {
        let mut context = quiet_context();
        run(&mut context, "Integer create: zz::b, withValue: 1");
        run(&mut context, "Integer create: aa::a, withValue: 2");
        run(&mut context, "Integer create: aa::c, withValue: 3");
        run(&mut context, "Integer create: solo, withValue: 4");
        assert_eq!(run(&mut context, "Context listNamespaces"), "[aa,zz]");
        assert_eq!(
            run(&mut context, "Context listVariables"),
            "[aa::a,aa::c,solo,zz::b]"
        );
        assert_eq!(
            run(&mut context, "Context listVariablesOfNamespace: aa"),
            "[aa::a,aa::c]"
        );
    }

    #[test]
    fn delete_round_trip_restores_the_registry() {
        let mut context = quiet_context();
        let before = run(&mut context, "Context listVariables");
        run(&mut context, "Boolean create: tmp");
        assert_eq!(run(&mut context, "Context deleteVariable: tmp"), "null");
        assert_eq!(run(&mut context, "Context listVariables"), before);
    }

    #[test]
    fn deleting_a_missing_variable_fails() {
        let mut context = quiet_context();
        assert_eq!(
            run(&mut context, "Context deleteVariable: missing"),
            "EXC_UNEXISTENT_VARIABLE"
        );
    }

    #[test]
    fn namespace_deletion_is_quiet_when_empty() {
        let mut context = quiet_context();
        assert_eq!(
            run(&mut context, "Context deleteVariablesOfNamespace: ghost"),
            "null"
        );
    }

    #[test]
    fn float_precision_is_validated_and_applied() {
        let mut context = quiet_context();
        run(&mut context, "Float create: f, withValue: 1.0");
        assert_eq!(run(&mut context, "Context getFloatPrecision"), "6");
        assert_eq!(run(&mut context, "Context setFloatPrecision: 3"), "null");
        assert_eq!(run(&mut context, "f getValue"), "1.000");
        assert_eq!(
            run(&mut context, "Context setFloatPrecision: -1"),
            "EXC_INVALID_ARGUMENT"
        );
        assert_eq!(
            run(&mut context, "Context setFloatPrecision: three"),
            "EXC_INVALID_ARGUMENT"
        );
    }

    #[test]
    fn tolerance_is_validated_and_applied() {
        let mut context = quiet_context();
        assert_eq!(
            run(&mut context, "Context getFloatComparisonTolerance"),
            "0.000001"
        );
        assert_eq!(
            run(&mut context, "Context setFloatComparisonTolerance: 0.5"),
            "null"
        );
        run(&mut context, "Float create: f, withValue: 1.0");
        assert_eq!(run(&mut context, "f isEqualTo?: 1.4"), "true");
        assert_eq!(
            run(&mut context, "Context setFloatComparisonTolerance: -0.1"),
            "EXC_INVALID_ARGUMENT"
        );
    }

    #[test]
    fn context_arity_mismatch_is_flagged() {
        let mut context = quiet_context();
        assert_eq!(
            run(&mut context, "Context setFloatPrecision"),
            "EXC_WRONG_NUMBER_OF_ARGUMENTS"
        );
        assert_eq!(
            run(&mut context, "Context listVariables: ns"),
            "EXC_WRONG_NUMBER_OF_ARGUMENTS"
        );
        assert_eq!(
            run(&mut context, "Context shutDown"),
            "EXC_INVALID_MESSAGE"
        );
    }

    #[test]
    fn malformed_type_actor_is_an_invalid_message() {
        let mut context = quiet_context();
        assert_eq!(
            run(&mut context, "Dictionary<Integer> create: d"),
            "EXC_INVALID_MESSAGE"
        );
        assert_eq!(
            run(&mut context, "Vector<Foo> create: v"),
            "EXC_INVALID_MESSAGE"
        );
    }
}
