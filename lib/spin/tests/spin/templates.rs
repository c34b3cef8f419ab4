use crate::test_utils::{ex, iri_pattern, projection};
use rdf_spin::{CommandKind, SpinError, SpinParser, SpinRenderer};
use rdf_spin_algebra::{ParsedQuery, QueryForm, TemplateKind};
use rdf_spin_model::vocab::{rdf, rdfs, spin, spl, xsd};
use rdf_spin_model::{resource_to_term, BlankNode, Graph, Literal, NamedNode, Term, Triple};
use std::error::Error;

/// Declares `spl:Argument` `predicate` on `module`.
fn declare_argument(
    graph: &mut Graph,
    module: &NamedNode,
    predicate: &NamedNode,
    optional: bool,
    default_value: Option<Term>,
) {
    let argument = BlankNode::default();
    graph.insert(&Triple::new(module.clone(), spin::CONSTRAINT_PROPERTY, argument.clone()));
    graph.insert(&Triple::new(argument.clone(), rdf::TYPE, spl::ARGUMENT_TEMPLATE));
    graph.insert(&Triple::new(argument.clone(), spl::PREDICATE_PROPERTY, predicate.clone()));
    graph.insert(&Triple::new(argument.clone(), spl::VALUE_TYPE_PROPERTY, xsd::INTEGER));
    if optional {
        graph.insert(&Triple::new(
            argument.clone(),
            spl::OPTIONAL_PROPERTY,
            Literal::from(true),
        ));
    }
    if let Some(default_value) = default_value {
        graph.insert(&Triple::new(argument, spl::DEFAULT_VALUE_PROPERTY, default_value));
    }
}

/// Declares the SELECT template `template` whose body lists the people `?this` knows.
fn declare_select_template(
    graph: &mut Graph,
    template: &NamedNode,
) -> Result<ParsedQuery, Box<dyn Error>> {
    let body = ParsedQuery::new(
        QueryForm::Select,
        iri_pattern("this", "knows", "friend").project(projection(&["friend"])),
    );
    let root = SpinRenderer::default().render(&body, graph)?;
    graph.insert(&Triple::new(template.clone(), rdf::TYPE, spin::SELECT_TEMPLATE_CLASS));
    graph.insert(&Triple::new(
        template.clone(),
        spin::BODY_PROPERTY,
        resource_to_term(root),
    ));
    Ok(body)
}

#[test]
fn test_instantiate_template_with_default_argument() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let template = ex("Limited");
    let body = declare_select_template(&mut graph, &template)?;
    declare_argument(
        &mut graph,
        &template,
        &ex("limit"),
        true,
        Some(Literal::from(10).into()),
    );
    let instance = ex("instance");
    graph.insert(&Triple::new(instance.clone(), rdf::TYPE, template.clone()));

    let parser = SpinParser::default();
    let query = parser.parse_select_query(instance.as_ref().into(), &graph)?;
    assert_eq!(query.tuple_expr, body.tuple_expr);
    let binding = query.template.ok_or("missing template binding")?;
    assert_eq!(binding.template.iri, template);
    assert_eq!(binding.template.kind, TemplateKind::Select);
    assert_eq!(
        binding.arguments.get("limit"),
        Some(&Literal::from(10).into())
    );
    assert_eq!(parser.templates().len(), 1);
    Ok(())
}

#[test]
fn test_instance_values_override_defaults() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let template = ex("Limited");
    declare_select_template(&mut graph, &template)?;
    declare_argument(
        &mut graph,
        &template,
        &ex("limit"),
        true,
        Some(Literal::from(10).into()),
    );
    let first = ex("first");
    let second = ex("second");
    graph.insert(&Triple::new(first.clone(), rdf::TYPE, template.clone()));
    graph.insert(&Triple::new(second.clone(), rdf::TYPE, template.clone()));
    graph.insert(&Triple::new(second.clone(), ex("limit"), Literal::from(3)));

    let parser = SpinParser::default();
    let first = parser.parse_select_query(first.as_ref().into(), &graph)?;
    let second = parser.parse_select_query(second.as_ref().into(), &graph)?;
    let first = first.template.ok_or("missing template binding")?;
    let second = second.template.ok_or("missing template binding")?;
    assert!(std::sync::Arc::ptr_eq(&first.template, &second.template));
    assert_eq!(first.arguments.get("limit"), Some(&Literal::from(10).into()));
    assert_eq!(second.arguments.get("limit"), Some(&Literal::from(3).into()));
    Ok(())
}

#[test]
fn test_missing_required_argument() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let template = ex("Required");
    declare_select_template(&mut graph, &template)?;
    declare_argument(&mut graph, &template, &ex("class"), false, None);
    let instance = ex("instance");
    graph.insert(&Triple::new(instance.clone(), rdf::TYPE, template));

    let result = SpinParser::default().parse_select_query(instance.as_ref().into(), &graph);
    assert!(matches!(result, Err(SpinError::Malformed { .. })));
    Ok(())
}

#[test]
fn test_template_of_wrong_kind() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let template = ex("Friends");
    declare_select_template(&mut graph, &template)?;
    let instance = ex("instance");
    graph.insert(&Triple::new(instance.clone(), rdf::TYPE, template.clone()));

    let parser = SpinParser::default();
    let result = parser.parse_ask_query(instance.as_ref().into(), &graph);
    assert!(matches!(result, Err(SpinError::Malformed { .. })));

    let operation = parser.parse(instance.as_ref().into(), CommandKind::Query, &graph)?;
    assert_eq!(
        operation.template().map(|binding| binding.template.iri.clone()),
        Some(template)
    );
    Ok(())
}

#[test]
fn test_get_or_parse_template_caches() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let template = ex("Friends");
    declare_select_template(&mut graph, &template)?;

    let parser = SpinParser::default();
    let first = parser.get_or_parse_template(template.as_ref(), CommandKind::Select, &graph)?;
    let second = parser.get_or_parse_template(template.as_ref(), CommandKind::Query, &graph)?;
    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(parser
        .get_or_parse_template(template.as_ref(), CommandKind::Update, &graph)
        .is_err());
    assert_eq!(parser.templates().len(), 1);
    Ok(())
}

#[test]
fn test_parse_arguments_inherits_from_abstract_classes() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let root = ex("Root");
    let base = ex("Base");
    let template = ex("Limited");
    for class in [&root, &base] {
        graph.insert(&Triple::new(class.clone(), spin::ABSTRACT_PROPERTY, Literal::from(true)));
    }
    graph.insert(&Triple::new(base.clone(), rdfs::SUB_CLASS_OF, root.clone()));
    graph.insert(&Triple::new(template.clone(), rdfs::SUB_CLASS_OF, base.clone()));
    declare_argument(&mut graph, &root, &ex("limit"), false, None);
    declare_argument(&mut graph, &base, &ex("class"), false, None);
    declare_argument(
        &mut graph,
        &template,
        &ex("limit"),
        true,
        Some(Literal::from(10).into()),
    );

    let arguments = SpinParser::default().parse_arguments(template.as_ref().into(), &graph)?;
    let predicates = arguments
        .iter()
        .map(|argument| argument.predicate.clone())
        .collect::<Vec<_>>();
    assert_eq!(predicates, [ex("limit"), ex("class")]);
    assert!(arguments[0].optional);
    assert_eq!(arguments[0].default_value, Some(Literal::from(10).into()));
    assert_eq!(arguments[0].value_type, Some(xsd::INTEGER.into_owned()));
    assert!(!arguments[1].optional);
    Ok(())
}
