use rdf_spin_model::Term;
use std::slice;

/// An ordered set of `name -> value` bindings. Each name is bound at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingSet {
    bindings: Vec<(String, Term)>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value`, replacing any previous value of `name` in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Term) {
        let name = name.into();
        match self.bindings.iter_mut().find(|(n, _)| *n == name) {
            Some((_, old)) => *old = value,
            None => self.bindings.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, (String, Term)> {
        self.bindings.iter()
    }
}

impl<'a> IntoIterator for &'a BindingSet {
    type Item = &'a (String, Term);
    type IntoIter = slice::Iter<'a, (String, Term)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>> FromIterator<(N, Term)> for BindingSet {
    fn from_iter<T: IntoIterator<Item = (N, Term)>>(iter: T) -> Self {
        let mut bindings = Self::new();
        for (name, value) in iter {
            bindings.insert(name, value);
        }
        bindings
    }
}
