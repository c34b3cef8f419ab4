use crate::statements;
use crate::{SpinError, SpinResult};
use rdf_spin_common::TripleSource;
use rdf_spin_model::vocab::{rdfs, spin};
use rdf_spin_model::{NamedNodeRef, NamedOrBlankNodeRef, Term};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConstraintViolationLevel {
    Info,
    Warning,
    #[default]
    Error,
    Fatal,
}

impl ConstraintViolationLevel {
    /// The level denoted by one of the `spin:Info`, `spin:Warning`, `spin:Error` and
    /// `spin:Fatal` individuals.
    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        if iri == spin::INFO {
            Some(Self::Info)
        } else if iri == spin::WARNING {
            Some(Self::Warning)
        } else if iri == spin::ERROR {
            Some(Self::Error)
        } else if iri == spin::FATAL {
            Some(Self::Fatal)
        } else {
            None
        }
    }

    pub fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Self::Info => spin::INFO,
            Self::Warning => spin::WARNING,
            Self::Error => spin::ERROR,
            Self::Fatal => spin::FATAL,
        }
    }
}

impl fmt::Display for ConstraintViolationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
            Self::Fatal => write!(f, "FATAL"),
        }
    }
}

/// A `spin:ConstraintViolation` reported by a constraint.
///
/// Root, path and value are kept in their string form: the IRI, the blank node identifier
/// or the lexical form of a literal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub message: Option<String>,
    pub root: Option<String>,
    pub path: Option<String>,
    pub value: Option<String>,
    pub level: ConstraintViolationLevel,
}

fn string_value(term: &Term) -> String {
    match term {
        Term::NamedNode(iri) => iri.as_str().to_owned(),
        Term::BlankNode(node) => node.as_str().to_owned(),
        Term::Literal(literal) => literal.value().to_owned(),
    }
}

/// Decodes the constraint violation at `subject`.
pub fn parse_constraint_violation(
    subject: NamedOrBlankNodeRef<'_>,
    store: &dyn TripleSource,
) -> SpinResult<ConstraintViolation> {
    let value_of =
        |predicate: NamedNodeRef<'static>| statements::single_value(store, subject, predicate);

    let message = match value_of(rdfs::LABEL)? {
        Some(Term::Literal(label)) => Some(label.value().to_owned()),
        _ => None,
    };
    let root = match value_of(spin::VIOLATION_ROOT_PROPERTY)? {
        Some(root @ (Term::NamedNode(_) | Term::BlankNode(_))) => Some(string_value(&root)),
        _ => None,
    };
    let path = value_of(spin::VIOLATION_PATH_PROPERTY)?.map(|path| string_value(&path));
    let value = value_of(spin::VIOLATION_VALUE_PROPERTY)?.map(|value| string_value(&value));
    let level = match value_of(spin::VIOLATION_LEVEL_PROPERTY)? {
        None => ConstraintViolationLevel::default(),
        Some(level) => {
            let known = match &level {
                Term::NamedNode(iri) => ConstraintViolationLevel::from_iri(iri.as_ref()),
                Term::BlankNode(_) | Term::Literal(_) => None,
            };
            known.ok_or_else(|| {
                SpinError::malformed_at(
                    subject,
                    format!(
                        "Invalid value {level} for {}",
                        spin::VIOLATION_LEVEL_PROPERTY
                    ),
                )
            })?
        }
    };
    Ok(ConstraintViolation {
        message,
        root,
        path,
        value,
        level,
    })
}
