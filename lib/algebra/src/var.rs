use rdf_spin_model::Term;
use rustc_hash::FxHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A variable of a query. A variable with a value is a constant placed in a variable slot,
/// e.g. the IRI in the predicate position of a triple pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Var {
    name: String,
    value: Option<Term>,
}

impl Var {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Creates a constant variable. Its name is derived from the value, so the same constant
    /// always receives the same name.
    pub fn constant(value: impl Into<Term>) -> Self {
        let value = value.into();
        Self {
            name: Self::constant_name(&value),
            value: Some(value),
        }
    }

    /// Returns the generated name of the constant variable holding `value`.
    pub fn constant_name(value: &Term) -> String {
        let mut hasher = FxHasher::default();
        value.hash(&mut hasher);
        format!("_const_{:016x}", hasher.finish())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&Term> {
        self.value.as_ref()
    }

    pub fn is_constant(&self) -> bool {
        self.value.is_some()
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "?{}", self.name),
        }
    }
}
