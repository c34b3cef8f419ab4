use crate::test_utils::ex;
use rdf_spin::{
    is_this_unbound, parse_constraint_violation, parse_rule_properties, ConstraintViolation,
    ConstraintViolationLevel,
};
use rdf_spin_model::vocab::{rdfs, spin, xsd};
use rdf_spin_model::{BlankNode, Graph, Literal, NamedOrBlankNodeRef, Triple};
use std::error::Error;

#[test]
fn test_rule_properties() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let inferences = ex("inferences");
    let cleanup = ex("cleanup");
    for rule in [&inferences, &cleanup] {
        graph.insert(&Triple::new(rule.clone(), rdfs::SUB_PROPERTY_OF, spin::RULE_PROPERTY));
    }
    graph.insert(&Triple::new(
        inferences.clone(),
        spin::NEXT_RULE_PROPERTY_PROPERTY,
        cleanup.clone(),
    ));
    graph.insert(&Triple::new(
        inferences.clone(),
        spin::RULE_PROPERTY_MAX_ITERATION_COUNT_PROPERTY,
        Literal::new_typed_literal("5", xsd::INTEGER),
    ));
    // Sub-properties of other properties are not rule properties.
    graph.insert(&Triple::new(ex("label"), rdfs::SUB_PROPERTY_OF, rdfs::LABEL));

    let rules = parse_rule_properties(&graph)?;
    assert_eq!(rules.len(), 2);
    let first = rules.get(&inferences).ok_or("missing rule property")?;
    assert_eq!(first.iri, inferences);
    assert_eq!(first.next_rules, [cleanup.clone()]);
    assert_eq!(first.max_iteration_count, 5);
    assert_eq!(first.max_iterations(), Some(5));
    let second = rules.get(&cleanup).ok_or("missing rule property")?;
    assert!(second.next_rules.is_empty());
    assert_eq!(second.max_iterations(), None);
    Ok(())
}

#[test]
fn test_non_literal_max_iteration_count() {
    let mut graph = Graph::new();
    let rule = ex("rule");
    graph.insert(&Triple::new(rule.clone(), rdfs::SUB_PROPERTY_OF, spin::RULE_PROPERTY));
    graph.insert(&Triple::new(
        rule,
        spin::RULE_PROPERTY_MAX_ITERATION_COUNT_PROPERTY,
        ex("many"),
    ));
    assert!(parse_rule_properties(&graph).is_err());
}

#[test]
fn test_this_unbound() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let unbound = ex("unbound");
    graph.insert(&Triple::new(
        unbound.clone(),
        spin::THIS_UNBOUND_PROPERTY,
        Literal::from(true),
    ));
    assert!(is_this_unbound(unbound.as_ref().into(), &graph)?);
    assert!(!is_this_unbound(ex("bound").as_ref().into(), &graph)?);
    Ok(())
}

#[test]
fn test_constraint_violation() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let violation = BlankNode::default();
    graph.insert(&Triple::new(
        violation.clone(),
        rdfs::LABEL,
        Literal::new_simple_literal("Age must not be negative"),
    ));
    graph.insert(&Triple::new(
        violation.clone(),
        spin::VIOLATION_ROOT_PROPERTY,
        ex("alice"),
    ));
    graph.insert(&Triple::new(
        violation.clone(),
        spin::VIOLATION_PATH_PROPERTY,
        ex("age"),
    ));
    graph.insert(&Triple::new(
        violation.clone(),
        spin::VIOLATION_VALUE_PROPERTY,
        Literal::from(-3),
    ));
    graph.insert(&Triple::new(
        violation.clone(),
        spin::VIOLATION_LEVEL_PROPERTY,
        spin::WARNING,
    ));

    let subject = NamedOrBlankNodeRef::from(violation.as_ref());
    let parsed = parse_constraint_violation(subject, &graph)?;
    assert_eq!(
        parsed,
        ConstraintViolation {
            message: Some("Age must not be negative".to_owned()),
            root: Some("http://example.com/alice".to_owned()),
            path: Some("http://example.com/age".to_owned()),
            value: Some("-3".to_owned()),
            level: ConstraintViolationLevel::Warning,
        }
    );
    assert_eq!(parsed.level.to_string(), "WARNING");
    Ok(())
}

#[test]
fn test_constraint_violation_defaults() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let violation = ex("violation");
    // A literal root does not denote a resource and is dropped.
    graph.insert(&Triple::new(
        violation.clone(),
        spin::VIOLATION_ROOT_PROPERTY,
        Literal::new_simple_literal("alice"),
    ));

    let parsed = parse_constraint_violation(violation.as_ref().into(), &graph)?;
    assert_eq!(parsed.level, ConstraintViolationLevel::Error);
    assert_eq!(parsed.message, None);
    assert_eq!(parsed.root, None);
    assert_eq!(parsed, ConstraintViolation::default());
    Ok(())
}
