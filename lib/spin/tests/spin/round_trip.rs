use crate::test_utils::{ex, iri_pattern, lenient_parser, pattern, projection, render, round_trip};
use rdf_spin::statements;
use rdf_spin::{Output, SpinRenderer, SpinRendererConfig};
use rdf_spin_algebra::{
    AggregateExpr, AggregateFunction, ArbitraryLengthPath, BindingSet, BindingSetAssignment,
    CompareOp, ExtensionElem, GroupElem, OrderElem, ParsedQuery, ProjectionElem,
    ProjectionElemList, QueryForm, Service, StatementPattern, TupleExpr, ValueExpr, Var,
};
use rdf_spin_model::vocab::{rdf, sp, spin};
use rdf_spin_model::{Graph, Literal, NamedNode, NamedOrBlankNodeRef, Term, TermRef};
use std::error::Error;

fn assert_round_trip(query: &ParsedQuery) -> Result<ParsedQuery, Box<dyn Error>> {
    let parsed = round_trip(query)?;
    assert_eq!(parsed.form, query.form, "query form changed");
    assert_eq!(parsed.tuple_expr, query.tuple_expr, "algebra changed");
    Ok(parsed)
}

#[test]
fn test_select_round_trip() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "p", "o").project(projection(&["s", "p", "o"])),
    );

    let (graph, root) = render(&query)?;
    assert!(statements::has_type(&graph, root.as_ref(), sp::SELECT_CLASS)?);
    let head = statements::single_value(&graph, root.as_ref(), sp::WHERE_PROPERTY)?
        .ok_or("missing sp:where")?;
    assert_eq!(statements::list(&graph, &head)?.len(), 1);

    let parsed = assert_round_trip(&query)?;
    assert_eq!(parsed.binding_names(), ["s", "p", "o"]);
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: s, p, o
      StatementPattern (?s ?p ?o)
    ");
    Ok(())
}

#[test]
fn test_ask_round_trip() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Ask,
        iri_pattern("s", "knows", "o").slice(None, Some(1)),
    );

    let (graph, root) = render(&query)?;
    assert!(statements::has_type(&graph, root.as_ref(), sp::ASK_CLASS)?);
    let head = statements::single_value(&graph, root.as_ref(), sp::WHERE_PROPERTY)?
        .ok_or("missing sp:where")?;
    assert_eq!(statements::list(&graph, &head)?.len(), 1);

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Slice: limit=1
      StatementPattern (?s <http://example.com/knows> ?o)
    ");
    Ok(())
}

#[test]
fn test_count_round_trip() -> Result<(), Box<dyn Error>> {
    let count = AggregateExpr::count_all();
    let query = ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "p", "o")
            .group(
                Vec::new(),
                vec![GroupElem {
                    name: "n".to_owned(),
                    operator: count.clone(),
                }],
            )
            .extend(vec![ExtensionElem::new("n", count.into())])
            .project(projection(&["n"])),
    );

    let (graph, _) = render(&query)?;
    let counts = statements::subjects(&graph, rdf::TYPE, sp::COUNT_CLASS.into())?;
    assert_eq!(counts.len(), 1);

    let parsed = assert_round_trip(&query)?;
    assert_eq!(parsed.binding_names(), ["n"]);
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: n
      Extension: COUNT(*) AS n
        Group: by=[], aggregates=[COUNT(*) AS n]
          StatementPattern (?s ?p ?o)
    ");
    Ok(())
}

#[test]
fn test_group_by_having_round_trip() -> Result<(), Box<dyn Error>> {
    let count = AggregateExpr::new(AggregateFunction::Count, Some(ValueExpr::var("o")), true);
    let query = ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "p", "o")
            .group(
                vec!["s".to_owned()],
                vec![GroupElem {
                    name: "c".to_owned(),
                    operator: count.clone(),
                }],
            )
            .filter(ValueExpr::compare(
                CompareOp::Gt,
                count.clone().into(),
                ValueExpr::constant(Literal::from(1)),
            ))
            .extend(vec![ExtensionElem::new("c", count.into())])
            .project(projection(&["s", "c"])),
    );

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r#"
    Projection: s, c
      Extension: COUNT(DISTINCT ?o) AS c
        Filter: (COUNT(DISTINCT ?o) > "1"^^<http://www.w3.org/2001/XMLSchema#integer>)
          Group: by=[s], aggregates=[COUNT(DISTINCT ?o) AS c]
            StatementPattern (?s ?p ?o)
    "#);
    Ok(())
}

#[test]
fn test_group_patterns_round_trip() -> Result<(), Box<dyn Error>> {
    let where_clause = iri_pattern("s", "knows", "f")
        .left_join(iri_pattern("f", "name", "n"))
        .join(iri_pattern("s", "a", "b").union(iri_pattern("s", "c", "d")))
        .difference(iri_pattern("s", "blocked", "x"))
        .extend(vec![ExtensionElem::new(
            "label",
            ValueExpr::Str(Box::new(ValueExpr::var("n"))),
        )])
        .filter(ValueExpr::compare(
            CompareOp::Ne,
            ValueExpr::var("f"),
            ValueExpr::var("s"),
        ));
    let query = ParsedQuery::new(
        QueryForm::Select,
        where_clause.project(projection(&["s", "f", "label"])),
    );

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: s, f, label
      Filter: (?f != ?s)
        Extension: STR(?n) AS label
          Difference
            Join
              LeftJoin
                StatementPattern (?s <http://example.com/knows> ?f)
                StatementPattern (?f <http://example.com/name> ?n)
              Union
                StatementPattern (?s <http://example.com/a> ?b)
                StatementPattern (?s <http://example.com/c> ?d)
            StatementPattern (?s <http://example.com/blocked> ?x)
    ");
    Ok(())
}

#[test]
fn test_nested_filter_round_trip() -> Result<(), Box<dyn Error>> {
    let filtered = iri_pattern("s", "age", "a").filter(ValueExpr::compare(
        CompareOp::Ge,
        ValueExpr::var("a"),
        ValueExpr::constant(Literal::from(18)),
    ));
    let query = ParsedQuery::new(
        QueryForm::Select,
        filtered
            .join(iri_pattern("s", "name", "n"))
            .project(projection(&["n"])),
    );

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r#"
    Projection: n
      Join
        Filter: (?a >= "18"^^<http://www.w3.org/2001/XMLSchema#integer>)
          StatementPattern (?s <http://example.com/age> ?a)
        StatementPattern (?s <http://example.com/name> ?n)
    "#);
    Ok(())
}

#[test]
fn test_not_exists_round_trip() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Select,
        iri_pattern("s", "type", "t")
            .filter(ValueExpr::Not(Box::new(ValueExpr::Exists(Box::new(
                iri_pattern("s", "deprecated", "d"),
            )))))
            .project(projection(&["s"])),
    );

    let (graph, _) = render(&query)?;
    let not_exists = statements::subjects(&graph, rdf::TYPE, sp::NOT_EXISTS.into())?;
    assert_eq!(not_exists.len(), 1);

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: s
      Filter: !EXISTS
        StatementPattern (?s <http://example.com/type> ?t)
    ");
    Ok(())
}

#[test]
fn test_optional_condition_round_trip() -> Result<(), Box<dyn Error>> {
    let adult = ValueExpr::compare(
        CompareOp::Gt,
        ValueExpr::var("a"),
        ValueExpr::constant(Literal::from(18)),
    );
    let query = ParsedQuery::new(
        QueryForm::Select,
        iri_pattern("s", "knows", "f")
            .left_join_with(iri_pattern("f", "age", "a"), Some(adult.clone()))
            .project(projection(&["s", "a"])),
    );

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r#"
    Projection: s, a
      LeftJoin: (?a > "18"^^<http://www.w3.org/2001/XMLSchema#integer>)
        StatementPattern (?s <http://example.com/knows> ?f)
        StatementPattern (?f <http://example.com/age> ?a)
    "#);

    // A filter of the optional pattern itself stays below the left join.
    let filtered_optional = ParsedQuery::new(
        QueryForm::Select,
        iri_pattern("s", "knows", "f")
            .left_join(iri_pattern("f", "age", "a").filter(adult))
            .project(projection(&["s", "a"])),
    );
    assert_round_trip(&filtered_optional)?;
    Ok(())
}

#[test]
fn test_filter_exists_beside_named_graph_round_trip() -> Result<(), Box<dyn Error>> {
    let in_graph = |subject: &str, predicate: &str, object: &str| {
        TupleExpr::StatementPattern(
            StatementPattern::new(Var::new(subject), Var::new(predicate), Var::new(object))
                .with_context(Some(Var::new("g"))),
        )
    };
    let query = ParsedQuery::new(
        QueryForm::Select,
        in_graph("s", "p", "o")
            .filter(ValueExpr::Not(Box::new(ValueExpr::Exists(Box::new(
                pattern("s", "q", "z"),
            )))))
            .project(projection(&["s"])),
    );

    let (graph, _) = render(&query)?;
    let named_graphs = statements::subjects(&graph, rdf::TYPE, sp::NAMED_GRAPH_CLASS.into())?;
    assert_eq!(named_graphs.len(), 1);
    assert_round_trip(&query)?;

    // An EXISTS over the same graph moves into the named graph with its filter.
    let same_graph = ParsedQuery::new(
        QueryForm::Select,
        in_graph("s", "p", "o")
            .filter(ValueExpr::Exists(Box::new(in_graph("s", "q", "z"))))
            .project(projection(&["s"])),
    );
    let (graph, _) = render(&same_graph)?;
    let named_graphs = statements::subjects(&graph, rdf::TYPE, sp::NAMED_GRAPH_CLASS.into())?;
    assert_eq!(named_graphs.len(), 1);
    assert_round_trip(&same_graph)?;
    Ok(())
}

#[test]
fn test_named_graph_and_values_round_trip() -> Result<(), Box<dyn Error>> {
    let graph_var = Var::new("g");
    let in_graph = TupleExpr::StatementPattern(
        StatementPattern::new(Var::new("s"), Var::new("p"), Var::new("o"))
            .with_context(Some(graph_var)),
    );
    let values = TupleExpr::BindingSetAssignment(BindingSetAssignment {
        binding_names: vec!["s".to_owned(), "o".to_owned()],
        rows: vec![
            [("s", Term::from(ex("a")))].into_iter().collect(),
            [
                ("s", Term::from(ex("b"))),
                ("o", Literal::new_simple_literal("x").into()),
            ]
            .into_iter()
            .collect::<BindingSet>(),
        ],
    });
    let query = ParsedQuery::new(
        QueryForm::Select,
        values
            .join(in_graph)
            .join(iri_pattern("s", "label", "l"))
            .project(projection(&["s", "g", "l"])),
    );

    let (graph, _) = render(&query)?;
    let undef = graph
        .iter()
        .filter(|triple| {
            triple.predicate == rdf::FIRST && triple.object == TermRef::from(sp::UNDEF)
        })
        .count();
    assert_eq!(undef, 1);

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: s, g, l
      Join
        Join
          BindingSetAssignment: [s, o] rows=2
          StatementPattern GRAPH ?g (?s ?p ?o)
        StatementPattern (?s <http://example.com/label> ?l)
    ");
    Ok(())
}

#[test]
fn test_service_round_trip() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Select,
        TupleExpr::Service(Service {
            service: Var::constant(ex("sparql")),
            arg: Box::new(pattern("s", "p", "o")),
            silent: true,
        })
        .project(projection(&["s"])),
    );

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: s
      Service: <http://example.com/sparql> SILENT
        StatementPattern (?s ?p ?o)
    ");
    Ok(())
}

#[test]
fn test_sub_query_round_trip() -> Result<(), Box<dyn Error>> {
    let sub_query = iri_pattern("o", "score", "v")
        .order(vec![OrderElem {
            expr: ValueExpr::var("v"),
            ascending: false,
        }])
        .project(projection(&["o"]))
        .slice(None, Some(5));
    let query = ParsedQuery::new(
        QueryForm::Select,
        iri_pattern("s", "likes", "o")
            .join(sub_query)
            .project(projection(&["s", "o"])),
    );

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: s, o
      Join
        StatementPattern (?s <http://example.com/likes> ?o)
        Slice: limit=5
          Projection: o
            Order: DESC(?v)
              StatementPattern (?o <http://example.com/score> ?v)
    ");
    Ok(())
}

#[test]
fn test_property_path_round_trip() -> Result<(), Box<dyn Error>> {
    let knows = Var::constant(ex("knows"));
    let path = TupleExpr::ArbitraryLengthPath(ArbitraryLengthPath {
        subject: Var::new("s"),
        path: Box::new(TupleExpr::pattern(Var::new("s"), knows, Var::new("o"))),
        object: Var::new("o"),
        context: None,
        min_length: 1,
    });
    let query = ParsedQuery::new(QueryForm::Select, path.project(projection(&["s", "o"])));

    let (graph, _) = render(&query)?;
    let paths = statements::subjects(&graph, rdf::TYPE, sp::MOD_PATH_CLASS.into())?;
    assert_eq!(paths.len(), 1);

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: s, o
      ArbitraryLengthPath (?s ?o min=1)
        StatementPattern (?s <http://example.com/knows> ?o)
    ");
    Ok(())
}

#[test]
fn test_solution_modifiers_round_trip() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Select,
        TupleExpr::Distinct(Box::new(
            pattern("s", "p", "o")
                .order(vec![OrderElem {
                    expr: ValueExpr::var("s"),
                    ascending: true,
                }])
                .project(projection(&["s"])),
        ))
        .slice(Some(5), Some(10)),
    );

    let parsed = assert_round_trip(&query)?;
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Slice: offset=5 limit=10
      Distinct
        Projection: s
          Order: ASC(?s)
            StatementPattern (?s ?p ?o)
    ");
    Ok(())
}

#[test]
fn test_construct_round_trip() -> Result<(), Box<dyn Error>> {
    let friend = ex("friend");
    let constant = Var::constant_name(&friend.clone().into());
    let query = ParsedQuery::new(
        QueryForm::Construct,
        TupleExpr::Reduced(Box::new(
            iri_pattern("s", "knows", "o")
                .extend(vec![ExtensionElem::new(
                    constant.clone(),
                    ValueExpr::constant(friend),
                )])
                .project(ProjectionElemList::new(vec![
                    ProjectionElem::new("s", "subject"),
                    ProjectionElem::new(constant, "predicate"),
                    ProjectionElem::new("o", "object"),
                ])),
        )),
    );

    let (graph, root) = render(&query)?;
    assert!(statements::has_type(&graph, root.as_ref(), sp::CONSTRUCT_CLASS)?);

    let parsed = assert_round_trip(&query)?;
    assert_eq!(parsed.binding_names(), ["subject", "predicate", "object"]);
    Ok(())
}

#[test]
fn test_describe_round_trip() -> Result<(), Box<dyn Error>> {
    let alice = ex("alice");
    let constant = Var::constant_name(&alice.clone().into());
    let query = ParsedQuery::new(
        QueryForm::Describe,
        TupleExpr::Describe(Box::new(
            iri_pattern("s", "knows", "o")
                .extend(vec![ExtensionElem::new(
                    constant.clone(),
                    ValueExpr::constant(alice),
                )])
                .project(ProjectionElemList::new(vec![
                    ProjectionElem::same(constant),
                    ProjectionElem::same("s"),
                ])),
        )),
    );

    assert_round_trip(&query)?;
    Ok(())
}

#[test]
fn test_function_calls_round_trip() -> Result<(), Box<dyn Error>> {
    let concat = ValueExpr::function_call(
        "http://www.w3.org/2005/xpath-functions#concat",
        vec![ValueExpr::var("a"), ValueExpr::var("b")],
    );
    let custom = ValueExpr::function_call(ex("double").as_str(), vec![ValueExpr::var("a")]);
    let query = ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "a", "b")
            .extend(vec![
                ExtensionElem::new("joined", concat),
                ExtensionElem::new("doubled", custom),
            ])
            .project(projection(&["joined", "doubled"])),
    );

    let (graph, root) = render(&query)?;
    let concat_class = NamedNode::new_unchecked(format!("{}concat", sp::NAMESPACE));
    let concat_calls = statements::subjects(&graph, rdf::TYPE, concat_class.as_ref().into())?;
    assert_eq!(concat_calls.len(), 1);

    let parsed = lenient_parser().parse_select_query(root.as_ref(), &graph)?;
    assert_eq!(parsed.tuple_expr, query.tuple_expr);
    insta::assert_snapshot!(parsed.tuple_expr, @r"
    Projection: joined, doubled
      Extension: http://www.w3.org/2005/xpath-functions#concat(?a, ?b) AS joined, http://example.com/double(?a) AS doubled
        StatementPattern (?s ?a ?b)
    ");
    Ok(())
}

#[test]
fn test_well_known_variable_renders_as_iri() -> Result<(), Box<dyn Error>> {
    let query = ParsedQuery::new(
        QueryForm::Ask,
        iri_pattern("this", "age", "a").slice(None, Some(1)),
    );

    let (graph, _) = render(&query)?;
    let this = NamedOrBlankNodeRef::from(spin::THIS_CONTEXT_INSTANCE);
    assert_eq!(
        statements::objects(&graph, this, sp::VAR_NAME_PROPERTY)?,
        Vec::<Term>::new()
    );
    let subjects = statements::subjects(
        &graph,
        sp::SUBJECT_PROPERTY,
        spin::THIS_CONTEXT_INSTANCE.into(),
    )?;
    assert_eq!(subjects.len(), 1);

    assert_round_trip(&query)?;
    Ok(())
}

#[test]
fn test_text_only_output() -> Result<(), Box<dyn Error>> {
    let mut query = ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "p", "o").project(projection(&["s"])),
    );
    query.source_text = Some("SELECT ?s WHERE { ?s ?p ?o }".to_owned());
    let renderer = SpinRenderer::new(SpinRendererConfig {
        output: Output::TextOnly,
    });

    let mut graph = Graph::new();
    let root = renderer.render(&query, &mut graph)?;
    let text = statements::single_literal(&graph, root.as_ref(), sp::TEXT_PROPERTY)?
        .ok_or("missing sp:text")?;
    assert_eq!(text.value(), "SELECT ?s WHERE { ?s ?p ?o }");
    assert_eq!(
        statements::single_value(&graph, root.as_ref(), sp::WHERE_PROPERTY)?,
        None
    );
    Ok(())
}
