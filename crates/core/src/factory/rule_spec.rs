//! Parsing of the `rule` mini-language embedded in documents.
//!
//! A rule spec is either a bare string naming a registered evaluator, or a
//! single-key object whose key is a logical operator and whose value is one
//! rule spec or an array of them:
//!
//! ```json
//! { "AND": ["is_admin", { "NOT": "is_trial" }] }
//! ```
//!
//! Parsing never fails loudly. Unknown names, unknown operators, malformed
//! shapes and operators with the wrong number of operands all yield `None`.

use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tracing::debug;

use crate::rule::{Rule, RuleEvaluator};

/// Logical operators recognised as object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "AND" => Some(LogicalOperator::And),
            "OR" => Some(LogicalOperator::Or),
            "NOT" => Some(LogicalOperator::Not),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        }
    }

    /// Combine parsed operands, enforcing the operator's arity:
    /// `AND`/`OR` need at least two operands, `NOT` exactly one.
    fn combine(self, mut operands: Vec<Rule>) -> Option<Rule> {
        match self {
            LogicalOperator::And if operands.len() >= 2 => Some(Rule::And(operands)),
            LogicalOperator::Or if operands.len() >= 2 => Some(Rule::Or(operands)),
            LogicalOperator::Not if operands.len() == 1 => operands.pop().map(Rule::not),
            _ => {
                debug!(
                    operator = self.key(),
                    operands = operands.len(),
                    "rule operator has the wrong number of operands, dropping"
                );
                None
            }
        }
    }
}

/// Parse a rule spec against the registered evaluators.
pub(crate) fn parse_rule(
    spec: &Value,
    evaluators: &HashMap<String, RuleEvaluator>,
) -> Option<Rule> {
    match spec {
        Value::String(name) => match evaluators.get(name) {
            Some(evaluator) => Some(Rule::Simple(Rc::clone(evaluator))),
            None => {
                debug!(rule = %name, "no evaluator registered for rule, dropping");
                None
            }
        },
        Value::Object(map) => {
            let mut entries = map.iter();
            let (key, operand) = match (entries.next(), entries.next()) {
                (Some(entry), None) => entry,
                _ => {
                    debug!(keys = map.len(), "rule object must have exactly one key");
                    return None;
                }
            };
            let operator = match LogicalOperator::from_key(key) {
                Some(op) => op,
                None => {
                    debug!(operator = %key, "unknown rule operator");
                    return None;
                }
            };
            let operands: Vec<Rule> = match operand {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|item| parse_rule(item, evaluators))
                    .collect(),
                single => parse_rule(single, evaluators).into_iter().collect(),
            };
            operator.combine(operands)
        }
        other => {
            debug!(spec = %other, "unsupported rule spec shape");
            None
        }
    }
}
