use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

/// A shared [FunctionRegistry].
pub type FunctionRegistryRef = Arc<dyn FunctionRegistry>;

/// A shared [TupleFunctionRegistry].
pub type TupleFunctionRegistryRef = Arc<dyn TupleFunctionRegistry>;

/// Knows the scalar functions available to the query engine, keyed by IRI.
pub trait FunctionRegistry: Debug + Send + Sync {
    fn has_function(&self, iri: &str) -> bool;
}

/// Knows the tuple functions (magic properties) available to the query engine, keyed by
/// IRI.
pub trait TupleFunctionRegistry: Debug + Send + Sync {
    fn has_tuple_function(&self, iri: &str) -> bool;
}

/// A registry backed by a fixed set of IRIs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IriSetRegistry {
    iris: HashSet<String>,
}

impl IriSetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, iri: impl Into<String>) {
        self.iris.insert(iri.into());
    }
}

impl<S: Into<String>> FromIterator<S> for IriSetRegistry {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            iris: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl FunctionRegistry for IriSetRegistry {
    fn has_function(&self, iri: &str) -> bool {
        self.iris.contains(iri)
    }
}

impl TupleFunctionRegistry for IriSetRegistry {
    fn has_tuple_function(&self, iri: &str) -> bool {
        self.iris.contains(iri)
    }
}
