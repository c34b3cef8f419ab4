//! Lookups of single values, types and RDF lists on a [TripleSource].

use crate::{SpinError, SpinResult};
use rdf_spin_common::TripleSource;
use rdf_spin_model::vocab::{rdf, xsd};
use rdf_spin_model::{
    subject_to_resource, term_to_resource, Literal, NamedNode, NamedNodeRef, NamedOrBlankNode,
    NamedOrBlankNodeRef, Term, TermRef,
};
use std::collections::HashSet;

/// The objects of all `subject predicate ?o` statements.
pub fn objects(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> SpinResult<Vec<Term>> {
    store
        .statements(Some(subject), Some(predicate), None)?
        .map(|triple| triple.map(|t| t.object).map_err(SpinError::from))
        .collect()
}

/// The resource subjects of all `?s predicate object` statements.
pub fn subjects(
    store: &dyn TripleSource,
    predicate: NamedNodeRef<'_>,
    object: TermRef<'_>,
) -> SpinResult<Vec<NamedOrBlankNode>> {
    let mut subjects = Vec::new();
    for triple in store.statements(None, Some(predicate), Some(object))? {
        if let Some(subject) = subject_to_resource(triple?.subject) {
            subjects.push(subject);
        }
    }
    Ok(subjects)
}

/// The object of the single `subject predicate ?o` statement. Several statements are
/// malformed.
pub fn single_value(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> SpinResult<Option<Term>> {
    let mut statements = store.statements(Some(subject), Some(predicate), None)?;
    let Some(first) = statements.next().transpose()? else {
        return Ok(None);
    };
    if statements.next().transpose()?.is_some() {
        return Err(SpinError::malformed_at(
            subject,
            format!("Multiple statements for {predicate}"),
        ));
    }
    Ok(Some(first.object))
}

/// Like [single_value], but the value must be a resource.
pub fn single_resource(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> SpinResult<Option<NamedOrBlankNode>> {
    single_value(store, subject, predicate)?
        .map(|value| {
            term_to_resource(&value).ok_or_else(|| {
                SpinError::malformed_at(subject, format!("Value of {predicate} is not a resource"))
            })
        })
        .transpose()
}

/// Like [single_value], but the value must be an IRI.
pub fn single_iri(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> SpinResult<Option<NamedNode>> {
    match single_value(store, subject, predicate)? {
        None => Ok(None),
        Some(Term::NamedNode(iri)) => Ok(Some(iri)),
        Some(_) => Err(SpinError::malformed_at(
            subject,
            format!("Value of {predicate} is not an IRI"),
        )),
    }
}

/// Like [single_value], but the value must be a literal.
pub fn single_literal(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> SpinResult<Option<Literal>> {
    match single_value(store, subject, predicate)? {
        None => Ok(None),
        Some(Term::Literal(literal)) => Ok(Some(literal)),
        Some(_) => Err(SpinError::malformed_at(
            subject,
            format!("Value of {predicate} is not a literal"),
        )),
    }
}

/// The boolean value of `subject predicate ?o`. An absent value is `false`.
pub fn boolean_value(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
    predicate: NamedNodeRef<'_>,
) -> SpinResult<bool> {
    let Some(literal) = single_literal(store, subject, predicate)? else {
        return Ok(false);
    };
    let datatype = literal.datatype();
    if datatype != xsd::BOOLEAN && datatype != xsd::STRING {
        return Err(SpinError::malformed_at(
            subject,
            format!("Value of {predicate} is not an xsd:boolean but a {datatype}"),
        ));
    }
    match literal.value() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        value => Err(SpinError::malformed_at(
            subject,
            format!("Invalid boolean value \"{value}\" for {predicate}"),
        )),
    }
}

/// The integer value of a literal of one of the XSD integer types.
pub fn integer_value(subject: NamedOrBlankNodeRef<'_>, value: &Term) -> SpinResult<i64> {
    let Term::Literal(literal) = value else {
        return Err(SpinError::malformed_at(
            subject,
            format!("Expected an integer literal, found {value}"),
        ));
    };
    if !is_integer_datatype(literal.datatype()) {
        return Err(SpinError::malformed_at(
            subject,
            format!("Expected an xsd:integer, found {literal}"),
        ));
    }
    literal.value().trim().parse().map_err(|_| {
        SpinError::malformed_at(subject, format!("Invalid integer {literal}"))
    })
}

fn is_integer_datatype(datatype: NamedNodeRef<'_>) -> bool {
    [
        xsd::INTEGER,
        xsd::NON_NEGATIVE_INTEGER,
        xsd::POSITIVE_INTEGER,
        xsd::NEGATIVE_INTEGER,
        xsd::NON_POSITIVE_INTEGER,
        xsd::LONG,
        xsd::INT,
        xsd::SHORT,
        xsd::BYTE,
        xsd::UNSIGNED_LONG,
        xsd::UNSIGNED_INT,
        xsd::UNSIGNED_SHORT,
        xsd::UNSIGNED_BYTE,
    ]
    .contains(&datatype)
}

/// The IRI types of `subject`, without duplicates, in store order.
pub fn types(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
) -> SpinResult<Vec<NamedNode>> {
    let mut types = Vec::new();
    for triple in store.statements(Some(subject), Some(rdf::TYPE), None)? {
        if let Term::NamedNode(class) = triple?.object {
            if !types.contains(&class) {
                types.push(class);
            }
        }
    }
    Ok(types)
}

pub fn has_type(
    store: &dyn TripleSource,
    subject: NamedOrBlankNodeRef<'_>,
    class: NamedNodeRef<'_>,
) -> SpinResult<bool> {
    Ok(store
        .statements(Some(subject), Some(rdf::TYPE), Some(class.into()))?
        .next()
        .transpose()?
        .is_some())
}

/// The elements of the RDF list starting at `head`.
///
/// Every list node must have exactly one `rdf:first` and one `rdf:rest`. A list that
/// revisits one of its nodes is malformed.
pub fn list(store: &dyn TripleSource, head: &Term) -> SpinResult<Vec<Term>> {
    let mut elements = Vec::new();
    let mut visited = HashSet::new();
    let mut current = head.clone();
    loop {
        let node = match &current {
            Term::NamedNode(iri) if iri.as_ref() == rdf::NIL => return Ok(elements),
            other => term_to_resource(other).ok_or_else(|| {
                SpinError::malformed(Some(other.clone()), "List node is not a resource")
            })?,
        };
        if !visited.insert(node.clone()) {
            return Err(SpinError::malformed_at(node.as_ref(), "Cyclic RDF list"));
        }
        let first = single_value(store, node.as_ref(), rdf::FIRST)?
            .ok_or_else(|| SpinError::malformed_at(node.as_ref(), "List node without rdf:first"))?;
        let rest = single_value(store, node.as_ref(), rdf::REST)?
            .ok_or_else(|| SpinError::malformed_at(node.as_ref(), "List node without rdf:rest"))?;
        elements.push(first);
        current = rest;
    }
}

/// Returns whether `value` is the head of an RDF list (including the empty list).
pub fn is_list(store: &dyn TripleSource, value: &NamedOrBlankNode) -> SpinResult<bool> {
    if *value == NamedOrBlankNode::from(rdf::NIL.into_owned()) {
        return Ok(true);
    }
    Ok(store
        .statements(Some(value.as_ref()), Some(rdf::FIRST), None)?
        .next()
        .transpose()?
        .is_some())
}
