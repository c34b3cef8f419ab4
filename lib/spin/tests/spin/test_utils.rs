use rdf_spin::{SpinParser, SpinParserConfig, SpinRenderer};
use rdf_spin_algebra::{ParsedQuery, ProjectionElem, ProjectionElemList, TupleExpr, Var};
use rdf_spin_model::vocab::rdf;
use rdf_spin_model::{BlankNode, Graph, NamedNode, NamedOrBlankNode, Term, Triple};
use std::error::Error;

pub fn ex(name: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://example.com/{name}"))
}

pub fn pattern(subject: &str, predicate: &str, object: &str) -> TupleExpr {
    TupleExpr::pattern(Var::new(subject), Var::new(predicate), Var::new(object))
}

/// A pattern with the constant `ex:{predicate}` in predicate position.
pub fn iri_pattern(subject: &str, predicate: &str, object: &str) -> TupleExpr {
    TupleExpr::pattern(
        Var::new(subject),
        Var::constant(ex(predicate)),
        Var::new(object),
    )
}

pub fn projection(names: &[&str]) -> ProjectionElemList {
    ProjectionElemList::new(names.iter().map(|name| ProjectionElem::same(*name)).collect())
}

pub fn render(query: &ParsedQuery) -> Result<(Graph, NamedOrBlankNode), Box<dyn Error>> {
    let mut graph = Graph::new();
    let root = SpinRenderer::default().render(query, &mut graph)?;
    Ok((graph, root))
}

/// Renders `query` and parses the result back.
pub fn round_trip(query: &ParsedQuery) -> Result<ParsedQuery, Box<dyn Error>> {
    let (graph, root) = render(query)?;
    Ok(SpinParser::default().parse_query(root.as_ref(), &graph)?)
}

/// A parser that keeps calls of unknown functions.
pub fn lenient_parser() -> SpinParser {
    SpinParser::new(SpinParserConfig {
        strict_function_checking: false,
        ..SpinParserConfig::default()
    })
}

pub fn write_list(graph: &mut Graph, items: &[Term]) -> Term {
    let mut head: Term = rdf::NIL.into_owned().into();
    for item in items.iter().rev() {
        let node = BlankNode::default();
        graph.insert(&Triple::new(node.clone(), rdf::FIRST, item.clone()));
        graph.insert(&Triple::new(node.clone(), rdf::REST, head));
        head = node.into();
    }
    head
}
