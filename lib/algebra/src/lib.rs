//! The operator-level representation of SPARQL queries exchanged with SPIN graphs.
//!
//! Trees are plain owned values built bottom-up. Nodes never refer to their parents.

mod binding;
mod query;
mod template;
mod tuple_expr;
mod value_expr;
mod var;

pub use binding::BindingSet;
pub use query::{ParsedOperation, ParsedQuery, ParsedUpdate, QueryForm, TemplateBinding};
pub use template::{Argument, Template, TemplateKind};
pub use tuple_expr::{
    ArbitraryLengthPath, BindingSetAssignment, ExtensionElem, GroupElem, OrderElem,
    ProjectionElem, ProjectionElemList, Service, StatementPattern, TupleExpr,
};
pub use value_expr::{AggregateExpr, AggregateFunction, CompareOp, MathOp, ValueExpr};
pub use var::Var;
