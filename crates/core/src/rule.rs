//! Visibility rules.
//!
//! A [`Rule`] is a small boolean expression tree that decides, at
//! realization time, whether a gated component is shown. Leaves are
//! host-supplied evaluators; the engine only combines their results.

use std::fmt;
use std::rc::Rc;

/// A zero-argument predicate supplied by the host.
pub type RuleEvaluator = Rc<dyn Fn() -> bool>;

/// Boolean expression over host evaluators.
#[derive(Clone)]
pub enum Rule {
    /// Leaf: the result of calling the evaluator.
    Simple(RuleEvaluator),
    /// Conjunction. An empty list is `true`.
    And(Vec<Rule>),
    /// Disjunction. An empty list is `false`.
    Or(Vec<Rule>),
    /// Negation.
    Not(Box<Rule>),
}

impl Rule {
    pub fn simple(evaluator: impl Fn() -> bool + 'static) -> Self {
        Rule::Simple(Rc::new(evaluator))
    }

    /// A leaf that always evaluates to `value`.
    pub fn constant(value: bool) -> Self {
        Rule::simple(move || value)
    }

    pub fn and(rules: impl IntoIterator<Item = Rule>) -> Self {
        Rule::And(rules.into_iter().collect())
    }

    pub fn or(rules: impl IntoIterator<Item = Rule>) -> Self {
        Rule::Or(rules.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(rule: Rule) -> Self {
        Rule::Not(Box::new(rule))
    }

    /// Evaluate the rule.
    ///
    /// `And` and `Or` evaluate every operand, in order, even once the
    /// result is decided. Evaluators with side effects observe one call
    /// per leaf per evaluation.
    pub fn evaluate(&self) -> bool {
        match self {
            Rule::Simple(evaluator) => evaluator(),
            Rule::And(rules) => rules.iter().fold(true, |acc, rule| {
                let value = rule.evaluate();
                acc && value
            }),
            Rule::Or(rules) => rules.iter().fold(false, |acc, rule| {
                let value = rule.evaluate();
                acc || value
            }),
            Rule::Not(rule) => !rule.evaluate(),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Simple(_) => f.write_str("Simple(<evaluator>)"),
            Rule::And(rules) => f.debug_tuple("And").field(rules).finish(),
            Rule::Or(rules) => f.debug_tuple("Or").field(rules).finish(),
            Rule::Not(rule) => f.debug_tuple("Not").field(rule).finish(),
        }
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
