use crate::test_utils::{ex, iri_pattern, pattern, projection, render};
use rdf_spin::{
    Input, IriSetRegistry, QueryTextParser, SpinError, SpinParser, SpinParserConfig, SpinResult,
};
use rdf_spin_algebra::{ParsedOperation, ParsedQuery, QueryForm};
use rdf_spin_model::vocab::{rdf, sp, spin};
use rdf_spin_model::{BlankNode, Graph, Literal, NamedNodeRef, NamedOrBlankNode, Triple};
use std::error::Error;
use std::sync::Arc;

const TEXT: &str = "SELECT ?s WHERE { ?s <http://example.com/knows> ?o }";

/// Understands exactly one query text.
#[derive(Debug)]
struct FixedTextParser {
    text: &'static str,
    query: ParsedQuery,
}

impl QueryTextParser for FixedTextParser {
    fn parse(&self, text: &str, _command_type: NamedNodeRef<'_>) -> SpinResult<ParsedOperation> {
        if text == self.text {
            Ok(self.query.clone().into())
        } else {
            Err(SpinError::unsupported(format!("Cannot parse {text}")))
        }
    }
}

fn structure_query() -> ParsedQuery {
    ParsedQuery::new(
        QueryForm::Select,
        pattern("s", "p", "o").project(projection(&["s"])),
    )
}

fn text_query() -> ParsedQuery {
    ParsedQuery::new(
        QueryForm::Select,
        iri_pattern("s", "knows", "o").project(projection(&["s"])),
    )
}

fn parser(input: Input, understood: &'static str) -> SpinParser {
    SpinParser::new(SpinParserConfig {
        input,
        ..SpinParserConfig::default()
    })
    .with_text_parser(Arc::new(FixedTextParser {
        text: understood,
        query: text_query(),
    }))
}

/// Renders the structure query carrying `TEXT` as its text.
fn render_with_text() -> Result<(Graph, NamedOrBlankNode), Box<dyn Error>> {
    let mut query = structure_query();
    query.source_text = Some(TEXT.to_owned());
    render(&query)
}

#[test]
fn test_text_first_prefers_text() -> Result<(), Box<dyn Error>> {
    let (graph, root) = render_with_text()?;

    let parsed = parser(Input::TextFirst, TEXT).parse_query(root.as_ref(), &graph)?;
    assert_eq!(parsed.tuple_expr, text_query().tuple_expr);
    assert_eq!(parsed.source_text.as_deref(), Some(TEXT));
    Ok(())
}

#[test]
fn test_text_first_falls_back_to_structure() -> Result<(), Box<dyn Error>> {
    let (graph, root) = render_with_text()?;

    let parsed = parser(Input::TextFirst, "ASK {}").parse_query(root.as_ref(), &graph)?;
    assert_eq!(parsed.tuple_expr, structure_query().tuple_expr);
    assert_eq!(parsed.source_text.as_deref(), Some(TEXT));
    Ok(())
}

#[test]
fn test_text_only_does_not_fall_back() -> Result<(), Box<dyn Error>> {
    let (graph, root) = render_with_text()?;

    let result = parser(Input::TextOnly, "ASK {}").parse_query(root.as_ref(), &graph);
    assert!(matches!(result, Err(SpinError::Unsupported(_))));
    Ok(())
}

#[test]
fn test_rdf_first_prefers_structure() -> Result<(), Box<dyn Error>> {
    let (graph, root) = render_with_text()?;

    let parsed = parser(Input::RdfFirst, TEXT).parse_query(root.as_ref(), &graph)?;
    assert_eq!(parsed.tuple_expr, structure_query().tuple_expr);
    Ok(())
}

#[test]
fn test_text_without_structure() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let select = BlankNode::default();
    graph.insert(&Triple::new(select.clone(), rdf::TYPE, sp::SELECT_CLASS));
    graph.insert(&Triple::new(
        select.clone(),
        sp::TEXT_PROPERTY,
        Literal::new_simple_literal(TEXT),
    ));
    let select = NamedOrBlankNode::from(select);

    let rdf_only = parser(Input::RdfOnly, TEXT).parse_query(select.as_ref(), &graph);
    assert!(matches!(rdf_only, Err(SpinError::Malformed { .. })));
    let no_text_parser = SpinParser::default().parse_query(select.as_ref(), &graph);
    assert!(matches!(no_text_parser, Err(SpinError::Malformed { .. })));

    let parsed = parser(Input::RdfFirst, TEXT).parse_query(select.as_ref(), &graph)?;
    assert_eq!(parsed.tuple_expr, text_query().tuple_expr);
    Ok(())
}

#[test]
fn test_parse_update() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let clear = ex("clear");
    graph.insert(&Triple::new(clear.clone(), rdf::TYPE, sp::CLEAR_CLASS));
    graph.insert(&Triple::new(
        clear.clone(),
        sp::TEXT_PROPERTY,
        Literal::new_simple_literal("CLEAR DEFAULT"),
    ));

    let parser = SpinParser::default();
    let update = parser.parse_update(clear.as_ref().into(), &graph)?;
    assert_eq!(update.update_type, sp::CLEAR_CLASS.into_owned());
    assert_eq!(update.source_text.as_deref(), Some("CLEAR DEFAULT"));

    let result = parser.parse_query(clear.as_ref().into(), &graph);
    assert!(matches!(result, Err(SpinError::Malformed { .. })));
    Ok(())
}

#[test]
fn test_is_magic_property() -> Result<(), Box<dyn Error>> {
    let mut graph = Graph::new();
    let declared = ex("declared");
    let registered = ex("registered");
    graph.insert(&Triple::new(
        declared.clone(),
        rdf::TYPE,
        spin::MAGIC_PROPERTY_CLASS,
    ));

    let registry = [registered.as_str()].into_iter().collect::<IriSetRegistry>();
    let parser = SpinParser::default().with_tuple_function_registry(Arc::new(registry));
    assert!(parser.is_magic_property(declared.as_ref(), &graph)?);
    assert!(parser.is_magic_property(registered.as_ref(), &graph)?);
    assert!(!parser.is_magic_property(ex("plain").as_ref(), &graph)?);
    Ok(())
}
