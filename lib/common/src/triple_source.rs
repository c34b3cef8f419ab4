use crate::error::StorageError;
use rdf_spin_model::{
    resource_ref_to_subject_ref, Graph, NamedNodeRef, NamedOrBlankNodeRef, TermRef, Triple,
    TripleRef,
};

/// The statements produced by a [TripleSource] lookup.
pub type TripleIter<'a> = Box<dyn Iterator<Item = Result<Triple, StorageError>> + 'a>;

/// Read-only, pattern-matched access to RDF statements.
///
/// The SPIN parser only ever reads from its store through this trait. Any store (in memory,
/// on disk, remote) can be plugged in. An implementation that holds cursors or locks for
/// the duration of a lookup must release them when the returned iterator is dropped.
pub trait TripleSource {
    /// Returns the statements matching the given pattern. `None` matches any term.
    fn statements<'a>(
        &'a self,
        subject: Option<NamedOrBlankNodeRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Result<TripleIter<'a>, StorageError>;
}

impl TripleSource for Graph {
    fn statements<'a>(
        &'a self,
        subject: Option<NamedOrBlankNodeRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
    ) -> Result<TripleIter<'a>, StorageError> {
        let matches = |triple: &TripleRef<'_>| {
            predicate.map_or(true, |p| triple.predicate == p)
                && object.map_or(true, |o| triple.object == o)
        };
        let triples = match (subject, object, predicate) {
            (Some(subject), _, _) => self
                .triples_for_subject(resource_ref_to_subject_ref(subject))
                .filter(matches)
                .map(TripleRef::into_owned)
                .collect::<Vec<_>>(),
            (None, Some(object), _) => self
                .triples_for_object(object)
                .filter(matches)
                .map(TripleRef::into_owned)
                .collect(),
            (None, None, Some(predicate)) => self
                .triples_for_predicate(predicate)
                .map(TripleRef::into_owned)
                .collect(),
            (None, None, None) => self.iter().map(TripleRef::into_owned).collect(),
        };
        Ok(Box::new(triples.into_iter().map(Ok)))
    }
}
