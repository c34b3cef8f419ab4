use crate::test_utils::{ex, iri_pattern, lenient_parser, pattern, projection, render, write_list};
use rdf_spin::statements;
use rdf_spin::{SpinError, SpinParser, SpinParserConfig};
use rdf_spin_algebra::{CompareOp, ExtensionElem, ParsedQuery, QueryForm, TupleExpr, ValueExpr};
use rdf_spin_model::vocab::{rdf, sp, spin, xsd};
use rdf_spin_model::{
    resource_to_subject, resource_to_term, BlankNode, Graph, Literal, NamedOrBlankNode, Term,
    Triple,
};
use std::error::Error;

fn is_malformed<T>(result: &Result<T, SpinError>) -> bool {
    matches!(result, Err(SpinError::Malformed { .. }))
}

fn select_all() -> ParsedQuery {
    ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "p", "o").project(projection(&["s"])),
    )
}

/// A SELECT node whose `sp:where` is the list at `head`.
fn select_with_where(graph: &mut Graph, head: Term) -> NamedOrBlankNode {
    let select = BlankNode::default();
    graph.insert(&Triple::new(select.clone(), rdf::TYPE, sp::SELECT_CLASS));
    graph.insert(&Triple::new(select.clone(), sp::WHERE_PROPERTY, head));
    NamedOrBlankNode::from(select)
}

#[test]
fn test_ambiguous_command_types() -> Result<(), Box<dyn Error>> {
    let (mut graph, root) = render(&select_all())?;
    graph.insert(&Triple::new(resource_to_subject(root.clone()), rdf::TYPE, sp::ASK_CLASS));

    let result = SpinParser::default().parse_query(root.as_ref(), &graph);
    assert!(is_malformed(&result));
    Ok(())
}

#[test]
fn test_missing_type() {
    let graph = Graph::new();
    let result = SpinParser::default().parse_query(ex("query").as_ref().into(), &graph);
    assert!(is_malformed(&result));
}

#[test]
fn test_missing_where() -> Result<(), Box<dyn Error>> {
    let (mut graph, root) = render(&select_all())?;
    let head = statements::single_value(&graph, root.as_ref(), sp::WHERE_PROPERTY)?
        .ok_or("missing sp:where")?;
    graph.remove(&Triple::new(resource_to_subject(root.clone()), sp::WHERE_PROPERTY, head));

    let result = SpinParser::default().parse_query(root.as_ref(), &graph);
    assert!(is_malformed(&result));
    Ok(())
}

#[test]
fn test_distinct_and_reduced() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Select,
        TupleExpr::Distinct(Box::new(pattern("s", "p", "o").project(projection(&["s"])))),
    );
    let (mut graph, root) = render(&query)?;
    graph.insert(&Triple::new(
        resource_to_subject(root.clone()),
        sp::REDUCED_PROPERTY,
        Literal::from(true),
    ));

    let result = SpinParser::default().parse_query(root.as_ref(), &graph);
    assert!(is_malformed(&result));
    Ok(())
}

#[test]
fn test_negative_limit() -> Result<(), Box<dyn Error>> {
    let (mut graph, root) = render(&select_all())?;
    graph.insert(&Triple::new(
        resource_to_subject(root.clone()),
        sp::LIMIT_PROPERTY,
        Literal::new_typed_literal("-1", xsd::INTEGER),
    ));

    let result = SpinParser::default().parse_query(root.as_ref(), &graph);
    assert!(is_malformed(&result));
    Ok(())
}

#[test]
fn test_cyclic_group() {
    let mut graph = Graph::new();
    let head = BlankNode::default();
    graph.insert(&Triple::new(head.clone(), rdf::FIRST, head.clone()));
    graph.insert(&Triple::new(head.clone(), rdf::REST, rdf::NIL));
    let select = select_with_where(&mut graph, head.into());

    let result = SpinParser::default().parse_query(select.as_ref(), &graph);
    assert!(is_malformed(&result));
}

#[test]
fn test_cyclic_list() -> Result<(), Box<dyn Error>> {
    let (mut graph, root) = render(&select_all())?;
    let head = statements::single_value(&graph, root.as_ref(), sp::WHERE_PROPERTY)?
        .ok_or("missing sp:where")?;
    let Term::BlankNode(head_node) = &head else {
        return Err("where list head is not a blank node".into());
    };
    graph.remove(&Triple::new(head_node.clone(), rdf::REST, rdf::NIL));
    graph.insert(&Triple::new(head_node.clone(), rdf::REST, head.clone()));

    assert!(is_malformed(&statements::list(&graph, &head)));
    let result = SpinParser::default().parse_query(root.as_ref(), &graph);
    assert!(is_malformed(&result));
    Ok(())
}

/// A SELECT of `select_all` whose triple pattern is nested in `levels` groups.
fn select_with_nested_groups(levels: usize) -> Result<(Graph, NamedOrBlankNode), Box<dyn Error>> {
    let (mut graph, root) = render(&select_all())?;
    let triple = statements::subjects(&graph, rdf::TYPE, sp::TRIPLE_PATTERN_CLASS.into())?
        .pop()
        .ok_or("missing triple pattern")?;
    let mut group = write_list(&mut graph, &[resource_to_term(triple)]);
    for _ in 1..levels {
        group = write_list(&mut graph, &[group]);
    }
    let select = select_with_where(&mut graph, group);
    let result_variables =
        statements::single_value(&graph, root.as_ref(), sp::RESULT_VARIABLES_PROPERTY)?
            .ok_or("missing sp:resultVariables")?;
    graph.insert(&Triple::new(
        resource_to_subject(select.clone()),
        sp::RESULT_VARIABLES_PROPERTY,
        result_variables,
    ));
    Ok((graph, select))
}

#[test]
fn test_excessive_nesting() -> Result<(), Box<dyn Error>> {
    let (graph, select) = select_with_nested_groups(4)?;

    let shallow = SpinParser::new(SpinParserConfig {
        max_depth: 3,
        ..SpinParserConfig::default()
    });
    assert!(is_malformed(&shallow.parse_query(select.as_ref(), &graph)));

    let parsed = SpinParser::default().parse_query(select.as_ref(), &graph)?;
    assert_eq!(parsed.tuple_expr, select_all().tuple_expr);
    Ok(())
}

#[test]
fn test_nesting_at_default_depth_limit() -> Result<(), Box<dyn Error>> {
    let parser = SpinParser::default();
    let max_depth = parser.config().max_depth;

    let (graph, select) = select_with_nested_groups(max_depth)?;
    let parsed = parser.parse_query(select.as_ref(), &graph)?;
    assert_eq!(parsed.tuple_expr, select_all().tuple_expr);

    let (graph, select) = select_with_nested_groups(max_depth + 1)?;
    assert!(is_malformed(&parser.parse_query(select.as_ref(), &graph)));
    Ok(())
}

#[test]
fn test_unknown_function() -> Result<(), Box<dyn Error>> {
    let double = ex("double");
    let query = ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "p", "o")
            .extend(vec![ExtensionElem::new(
                "d",
                ValueExpr::function_call(double.as_str(), vec![ValueExpr::var("o")]),
            )])
            .project(projection(&["d"])),
    );
    let (mut graph, root) = render(&query)?;

    assert!(is_malformed(
        &SpinParser::default().parse_query(root.as_ref(), &graph)
    ));
    assert_eq!(
        lenient_parser().parse_query(root.as_ref(), &graph)?.tuple_expr,
        query.tuple_expr
    );

    graph.insert(&Triple::new(double, rdf::TYPE, spin::FUNCTION_CLASS));
    assert_eq!(
        SpinParser::default()
            .parse_query(root.as_ref(), &graph)?
            .tuple_expr,
        query.tuple_expr
    );
    Ok(())
}

#[test]
fn test_ambiguous_expression_types() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Select,
        iri_pattern("s", "age", "a")
            .filter(ValueExpr::compare(
                CompareOp::Eq,
                ValueExpr::var("a"),
                ValueExpr::constant(Literal::from(1)),
            ))
            .project(projection(&["s"])),
    );
    let (mut graph, root) = render(&query)?;
    let comparison = statements::subjects(&graph, rdf::TYPE, sp::EQ.into())?
        .pop()
        .ok_or("missing comparison")?;
    graph.insert(&Triple::new(resource_to_subject(comparison), rdf::TYPE, sp::NE));

    let result = SpinParser::default().parse_query(root.as_ref(), &graph);
    assert!(is_malformed(&result));
    Ok(())
}

#[test]
fn test_list_fidelity() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let items = [
        Term::from(ex("a")),
        Literal::new_simple_literal("b").into(),
        BlankNode::default().into(),
    ];
    for length in [0, 1, 3] {
        let head = write_list(&mut graph, &items[..length]);
        assert_eq!(statements::list(&graph, &head)?, items[..length]);
    }

    let broken = BlankNode::default();
    graph.insert(&Triple::new(broken.clone(), rdf::FIRST, ex("a")));
    assert!(is_malformed(&statements::list(&graph, &broken.into())));
    Ok(())
}
