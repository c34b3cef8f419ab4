use oxrdf::{NamedOrBlankNode, NamedOrBlankNodeRef, Subject, SubjectRef, Term, TermRef};

/// Returns the resource (IRI or blank node) behind `term`. Literals are not resources.
pub fn term_to_resource(term: &Term) -> Option<NamedOrBlankNode> {
    match term {
        Term::NamedNode(node) => Some(node.clone().into()),
        Term::BlankNode(node) => Some(node.clone().into()),
        Term::Literal(_) => None,
    }
}

pub fn resource_to_term(resource: NamedOrBlankNode) -> Term {
    match resource {
        NamedOrBlankNode::NamedNode(node) => node.into(),
        NamedOrBlankNode::BlankNode(node) => node.into(),
    }
}

pub fn resource_to_subject(resource: NamedOrBlankNode) -> Subject {
    match resource {
        NamedOrBlankNode::NamedNode(node) => node.into(),
        NamedOrBlankNode::BlankNode(node) => node.into(),
    }
}

pub fn resource_ref_to_term_ref(resource: NamedOrBlankNodeRef<'_>) -> TermRef<'_> {
    match resource {
        NamedOrBlankNodeRef::NamedNode(node) => node.into(),
        NamedOrBlankNodeRef::BlankNode(node) => node.into(),
    }
}

pub fn resource_ref_to_subject_ref(resource: NamedOrBlankNodeRef<'_>) -> SubjectRef<'_> {
    match resource {
        NamedOrBlankNodeRef::NamedNode(node) => node.into(),
        NamedOrBlankNodeRef::BlankNode(node) => node.into(),
    }
}

/// Returns the resource behind a statement subject. Quoted triples are not supported.
pub fn subject_to_resource(subject: Subject) -> Option<NamedOrBlankNode> {
    match subject {
        Subject::NamedNode(node) => Some(node.into()),
        Subject::BlankNode(node) => Some(node.into()),
    }
}

/// Returns the local name of an IRI: the part after the last `#`, or else after the last `/`,
/// or else after the last `:`.
///
/// ```
/// use rdf_spin_model::local_name;
///
/// assert_eq!(local_name("http://example.com/ns#limit"), "limit");
/// assert_eq!(local_name("http://example.com/limit"), "limit");
/// assert_eq!(local_name("urn:limit"), "limit");
/// ```
pub fn local_name(iri: &str) -> &str {
    let split = iri
        .rfind('#')
        .or_else(|| iri.rfind('/'))
        .or_else(|| iri.rfind(':'));
    match split {
        Some(index) => &iri[index + 1..],
        None => iri,
    }
}
