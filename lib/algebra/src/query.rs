use crate::{BindingSet, Template, TupleExpr};
use rdf_spin_model::NamedNode;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryForm {
    Ask,
    Select,
    Construct,
    Describe,
}

impl fmt::Display for QueryForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryForm::Ask => write!(f, "ASK"),
            QueryForm::Select => write!(f, "SELECT"),
            QueryForm::Construct => write!(f, "CONSTRUCT"),
            QueryForm::Describe => write!(f, "DESCRIBE"),
        }
    }
}

/// The template a query or update was instantiated from, with its bound arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateBinding {
    pub template: Arc<Template>,
    pub arguments: BindingSet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedQuery {
    pub form: QueryForm,
    pub tuple_expr: TupleExpr,
    /// The SPARQL text the query was given in, if any.
    pub source_text: Option<String>,
    pub template: Option<TemplateBinding>,
}

impl ParsedQuery {
    pub fn new(form: QueryForm, tuple_expr: TupleExpr) -> Self {
        Self {
            form,
            tuple_expr,
            source_text: None,
            template: None,
        }
    }

    /// The output names of a `SELECT` (or the template variables of a `CONSTRUCT`).
    pub fn binding_names(&self) -> Vec<String> {
        self.tuple_expr.binding_names()
    }
}

/// An update request.
///
/// Updates are recognized and carried through, but their structure is not decoded: only the
/// update type and the text form are kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedUpdate {
    pub update_type: NamedNode,
    pub source_text: Option<String>,
    pub template: Option<TemplateBinding>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedOperation {
    Query(ParsedQuery),
    Update(ParsedUpdate),
}

impl ParsedOperation {
    pub fn source_text(&self) -> Option<&str> {
        match self {
            ParsedOperation::Query(query) => query.source_text.as_deref(),
            ParsedOperation::Update(update) => update.source_text.as_deref(),
        }
    }

    pub fn template(&self) -> Option<&TemplateBinding> {
        match self {
            ParsedOperation::Query(query) => query.template.as_ref(),
            ParsedOperation::Update(update) => update.template.as_ref(),
        }
    }

    #[must_use]
    pub fn with_template(self, template: TemplateBinding) -> Self {
        match self {
            ParsedOperation::Query(query) => ParsedOperation::Query(ParsedQuery {
                template: Some(template),
                ..query
            }),
            ParsedOperation::Update(update) => ParsedOperation::Update(ParsedUpdate {
                template: Some(template),
                ..update
            }),
        }
    }
}

impl From<ParsedQuery> for ParsedOperation {
    fn from(query: ParsedQuery) -> Self {
        ParsedOperation::Query(query)
    }
}

impl From<ParsedUpdate> for ParsedOperation {
    fn from(update: ParsedUpdate) -> Self {
        ParsedOperation::Update(update)
    }
}
