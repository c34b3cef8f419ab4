use crate::statements;
use crate::{SpinError, SpinResult};
use rdf_spin_common::TripleSource;
use rdf_spin_model::vocab::{rdfs, spin};
use rdf_spin_model::{NamedNode, NamedOrBlankNode, NamedOrBlankNodeRef, Term};
use std::collections::HashMap;
use tracing::debug;

/// A sub-property of `spin:rule` and how rules attached through it are executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleProperty {
    pub iri: NamedNode,
    /// The rule properties to run after this one.
    pub next_rules: Vec<NamedNode>,
    /// How often the rules may be iterated. A negative count means no limit.
    pub max_iteration_count: i64,
}

impl RuleProperty {
    /// The iteration limit, if there is one.
    pub fn max_iterations(&self) -> Option<u64> {
        u64::try_from(self.max_iteration_count).ok()
    }
}

/// Decodes all rule properties declared in `store`, keyed by IRI.
pub fn parse_rule_properties(
    store: &dyn TripleSource,
) -> SpinResult<HashMap<NamedNode, RuleProperty>> {
    let mut rules = HashMap::new();
    let declared = statements::subjects(store, rdfs::SUB_PROPERTY_OF, spin::RULE_PROPERTY.into())?;
    for subject in declared {
        let NamedOrBlankNode::NamedNode(iri) = subject else {
            continue;
        };
        let resource = NamedOrBlankNodeRef::from(iri.as_ref());
        let next_rules = statements::objects(store, resource, spin::NEXT_RULE_PROPERTY_PROPERTY)?
            .into_iter()
            .filter_map(|next| match next {
                Term::NamedNode(next) => Some(next),
                Term::BlankNode(_) | Term::Literal(_) => None,
            })
            .collect();
        let max_iteration_count = max_iteration_count(resource, store)?;
        rules.insert(
            iri.clone(),
            RuleProperty {
                iri,
                next_rules,
                max_iteration_count,
            },
        );
    }
    debug!("Found {} rule properties", rules.len());
    Ok(rules)
}

fn max_iteration_count(
    rule: NamedOrBlankNodeRef<'_>,
    store: &dyn TripleSource,
) -> SpinResult<i64> {
    let predicate = spin::RULE_PROPERTY_MAX_ITERATION_COUNT_PROPERTY;
    match statements::single_value(store, rule, predicate)? {
        None => Ok(-1),
        Some(Term::Literal(count)) => count.value().trim().parse().map_err(|_| {
            SpinError::malformed_at(
                rule,
                format!("Value \"{}\" for {predicate} is not an integer", count.value()),
            )
        }),
        Some(_) => Err(SpinError::malformed_at(
            rule,
            format!("Non-literal value for {predicate}"),
        )),
    }
}

/// Whether the rules or constraints of `subject` are evaluated without binding `?this`.
pub fn is_this_unbound(
    subject: NamedOrBlankNodeRef<'_>,
    store: &dyn TripleSource,
) -> SpinResult<bool> {
    statements::boolean_value(store, subject, spin::THIS_UNBOUND_PROPERTY)
}
