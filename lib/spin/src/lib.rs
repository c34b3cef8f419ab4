//! Encoding of SPARQL queries, templates and rules as SPIN RDF graphs.
//!
//! The [SpinParser] decodes a command, template instance or template stored in a
//! [TripleSource](rdf_spin_common::TripleSource) into query algebra, and the [SpinRenderer]
//! writes query algebra back as SPIN statements to an [RdfSink](rdf_spin_common::RdfSink).
//!
//! ```
//! use rdf_spin::{SpinParser, SpinRenderer};
//! use rdf_spin_algebra::{
//!     ParsedQuery, ProjectionElem, ProjectionElemList, QueryForm, TupleExpr, Var,
//! };
//! use rdf_spin_model::Graph;
//!
//! let query = ParsedQuery::new(
//!     QueryForm::Select,
//!     TupleExpr::pattern(Var::new("s"), Var::new("p"), Var::new("o")).project(
//!         ProjectionElemList::new(vec![ProjectionElem::same("s"), ProjectionElem::same("o")]),
//!     ),
//! );
//!
//! let mut graph = Graph::new();
//! let root = SpinRenderer::default().render(&query, &mut graph)?;
//! let parsed = SpinParser::default().parse_select_query(root.as_ref(), &graph)?;
//! assert_eq!(parsed.binding_names(), ["s", "o"]);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod config;
mod constraint;
mod error;
mod operators;
mod parser;
mod registry;
mod renderer;
mod rule;
pub mod statements;
mod template;
mod text;
mod well_known;

pub use config::{Input, Output, SpinParserConfig, SpinRendererConfig};
pub use constraint::{parse_constraint_violation, ConstraintViolation, ConstraintViolationLevel};
pub use error::{SpinError, SpinResult};
pub use parser::{CommandKind, SpinParser};
pub use registry::{
    FunctionRegistry, FunctionRegistryRef, IriSetRegistry, TupleFunctionRegistry,
    TupleFunctionRegistryRef,
};
pub use renderer::SpinRenderer;
pub use rule::{is_this_unbound, parse_rule_properties, RuleProperty};
pub use template::{bind_arguments, TemplateCache};
pub use text::{QueryTextParser, QueryTextParserRef};
pub use well_known::{WellKnownTable, WellKnownTableRef};
