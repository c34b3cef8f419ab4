use crate::ParsedOperation;
use rdf_spin_model::{NamedNode, Term};
use std::fmt;

/// The command kind a template instantiates to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    Ask,
    Select,
    Construct,
    Update,
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateKind::Ask => write!(f, "ASK template"),
            TemplateKind::Select => write!(f, "SELECT template"),
            TemplateKind::Construct => write!(f, "CONSTRUCT template"),
            TemplateKind::Update => write!(f, "UPDATE template"),
        }
    }
}

/// A declared parameter of a template or function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Argument {
    /// The property carrying the argument value on an instance.
    pub predicate: NamedNode,
    pub value_type: Option<NamedNode>,
    pub optional: bool,
    pub default_value: Option<Term>,
}

impl Argument {
    pub fn new(predicate: NamedNode) -> Self {
        Self {
            predicate,
            value_type: None,
            optional: false,
            default_value: None,
        }
    }
}

/// A parameterized, reusable query or update.
///
/// Templates are immutable once parsed and are shared between all instantiations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Template {
    pub iri: NamedNode,
    pub kind: TemplateKind,
    pub body: ParsedOperation,
    /// Arguments in declaration order, inherited arguments first.
    pub arguments: Vec<Argument>,
}
