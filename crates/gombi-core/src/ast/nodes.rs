//! AST node definitions

use serde::Deserialize;
use std::fmt;

/// A literal value
///
/// Deserializes directly from a JSON boolean or string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Str(String),
}

impl Value {
    /// Get the boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Str(_) => None,
        }
    }

    /// Get the type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Str(_) => "Str",
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// Renders `TRUE`/`FALSE`, or a quoted string with `"` escaped as `\"`
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(true) => write!(f, "TRUE"),
            Value::Bool(false) => write!(f, "FALSE"),
            Value::Str(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
        }
    }
}

/// A propositional formula with variables and equations
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Literal value
    Value(Value),

    /// Variable, looked up in the environment
    Identifier(String),

    /// `left=right`
    Equation { left: Box<Term>, right: Box<Term> },

    /// Negation
    Not(Box<Term>),

    /// Conjunction
    And { left: Box<Term>, right: Box<Term> },

    /// Disjunction
    Or { left: Box<Term>, right: Box<Term> },
}

impl Term {
    /// Create a literal term
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Create a boolean literal
    pub fn bool(b: bool) -> Self {
        Self::Value(Value::Bool(b))
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::Value(Value::Str(s.into()))
    }

    /// Create an identifier
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create an equation
    pub fn equation(left: Term, right: Term) -> Self {
        Self::Equation {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a negation
    #[allow(clippy::should_implement_trait)]
    pub fn not(arg: Term) -> Self {
        Self::Not(Box::new(arg))
    }

    /// Create a conjunction
    pub fn and(left: Term, right: Term) -> Self {
        Self::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a disjunction
    pub fn or(left: Term, right: Term) -> Self {
        Self::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Check if the term is a literal
    pub fn is_value(&self) -> bool {
        matches!(self, Term::Value(_))
    }

    /// Get the boolean, if the term is a boolean literal
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Value(value) => value.as_bool(),
            _ => None,
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Term::Value(_) | Term::Identifier(_) => 1,
            Term::Not(arg) => 1 + arg.size(),
            Term::Equation { left, right }
            | Term::And { left, right }
            | Term::Or { left, right } => 1 + left.size() + right.size(),
        }
    }

    fn fmt_equation_side(side: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `a=b=c` would not re-parse, so nested equations keep parentheses
        match side {
            Term::Equation { .. } => write!(f, "({})", side),
            _ => write!(f, "{}", side),
        }
    }
}

/// Canonical text form, accepted again by the formula grammar
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Value(value) => write!(f, "{}", value),
            Term::Identifier(name) => write!(f, "{}", name),
            Term::Equation { left, right } => {
                Term::fmt_equation_side(left, f)?;
                write!(f, "=")?;
                Term::fmt_equation_side(right, f)
            }
            Term::Not(arg) => write!(f, "(NOT {})", arg),
            Term::And { left, right } => write!(f, "({} AND {})", left, right),
            Term::Or { left, right } => write!(f, "({} OR {})", left, right),
        }
    }
}
