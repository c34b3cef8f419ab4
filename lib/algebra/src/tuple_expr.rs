use crate::{AggregateExpr, BindingSet, ValueExpr, Var};
use itertools::Itertools;
use std::fmt;

/// A triple pattern, optionally restricted to the named graph bound to `context`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatementPattern {
    pub subject: Var,
    pub predicate: Var,
    pub object: Var,
    pub context: Option<Var>,
}

impl StatementPattern {
    pub fn new(subject: Var, predicate: Var, object: Var) -> Self {
        Self {
            subject,
            predicate,
            object,
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: Option<Var>) -> Self {
        self.context = context;
        self
    }
}

/// Binds the result of `expr` to the variable `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionElem {
    pub name: String,
    pub expr: ValueExpr,
}

impl ExtensionElem {
    pub fn new(name: impl Into<String>, expr: ValueExpr) -> Self {
        Self {
            name: name.into(),
            expr,
        }
    }
}

/// Projects the binding `source` to the output name `target`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectionElem {
    pub source: String,
    pub target: String,
}

impl ProjectionElem {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// A projection element that keeps the name of its binding.
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            target: name,
        }
    }
}

impl fmt::Display for ProjectionElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source == self.target {
            write!(f, "{}", self.target)
        } else {
            write!(f, "{} AS {}", self.source, self.target)
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectionElemList {
    pub elements: Vec<ProjectionElem>,
}

impl ProjectionElemList {
    pub fn new(elements: Vec<ProjectionElem>) -> Self {
        Self { elements }
    }

    pub fn target_names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.target.as_str())
    }

    /// Returns the source binding projected to `target`.
    pub fn source_of(&self, target: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|e| e.target == target)
            .map(|e| e.source.as_str())
    }
}

impl fmt::Display for ProjectionElemList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elements.iter().join(", "))
    }
}

/// Binds an aggregate to `name` within a [TupleExpr::Group].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupElem {
    pub name: String,
    pub operator: AggregateExpr,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderElem {
    pub expr: ValueExpr,
    pub ascending: bool,
}

impl fmt::Display for OrderElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.ascending { "ASC" } else { "DESC" };
        write!(f, "{direction}({})", self.expr)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Service {
    pub service: Var,
    pub arg: Box<TupleExpr>,
    pub silent: bool,
}

/// Inline data (`VALUES`). A row may leave any of the binding names unbound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingSetAssignment {
    pub binding_names: Vec<String>,
    pub rows: Vec<BindingSet>,
}

/// `subject path{min,} object` where `path` is a pattern between `subject` and `object`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArbitraryLengthPath {
    pub subject: Var,
    pub path: Box<TupleExpr>,
    pub object: Var,
    pub context: Option<Var>,
    pub min_length: u64,
}

/// A tuple-producing operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TupleExpr {
    /// The empty group pattern: one solution with no bindings.
    SingletonSet,
    StatementPattern(StatementPattern),
    Join {
        left: Box<TupleExpr>,
        right: Box<TupleExpr>,
    },
    LeftJoin {
        left: Box<TupleExpr>,
        right: Box<TupleExpr>,
        condition: Option<ValueExpr>,
    },
    Union {
        left: Box<TupleExpr>,
        right: Box<TupleExpr>,
    },
    Difference {
        left: Box<TupleExpr>,
        right: Box<TupleExpr>,
    },
    Filter {
        arg: Box<TupleExpr>,
        condition: ValueExpr,
    },
    Extension {
        arg: Box<TupleExpr>,
        elements: Vec<ExtensionElem>,
    },
    Projection {
        arg: Box<TupleExpr>,
        elements: ProjectionElemList,
    },
    MultiProjection {
        arg: Box<TupleExpr>,
        projections: Vec<ProjectionElemList>,
    },
    Group {
        arg: Box<TupleExpr>,
        group_by: Vec<String>,
        elements: Vec<GroupElem>,
    },
    Order {
        arg: Box<TupleExpr>,
        elements: Vec<OrderElem>,
    },
    Slice {
        arg: Box<TupleExpr>,
        offset: Option<u64>,
        limit: Option<u64>,
    },
    Distinct(Box<TupleExpr>),
    Reduced(Box<TupleExpr>),
    Describe(Box<TupleExpr>),
    Service(Service),
    BindingSetAssignment(BindingSetAssignment),
    ArbitraryLengthPath(ArbitraryLengthPath),
}

impl TupleExpr {
    pub fn pattern(subject: Var, predicate: Var, object: Var) -> Self {
        Self::StatementPattern(StatementPattern::new(subject, predicate, object))
    }

    /// Joins `right` to this expression. Joining to the empty group yields `right`.
    #[must_use]
    pub fn join(self, right: TupleExpr) -> Self {
        match self {
            TupleExpr::SingletonSet => right,
            left => TupleExpr::Join {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    #[must_use]
    pub fn left_join(self, right: TupleExpr) -> Self {
        self.left_join_with(right, None)
    }

    /// A left join keeping the rows of `right` for which `condition` holds.
    #[must_use]
    pub fn left_join_with(self, right: TupleExpr, condition: Option<ValueExpr>) -> Self {
        TupleExpr::LeftJoin {
            left: Box::new(self),
            right: Box::new(right),
            condition,
        }
    }

    #[must_use]
    pub fn union(self, right: TupleExpr) -> Self {
        TupleExpr::Union {
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn difference(self, right: TupleExpr) -> Self {
        TupleExpr::Difference {
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    #[must_use]
    pub fn filter(self, condition: ValueExpr) -> Self {
        TupleExpr::Filter {
            arg: Box::new(self),
            condition,
        }
    }

    #[must_use]
    pub fn extend(self, elements: Vec<ExtensionElem>) -> Self {
        TupleExpr::Extension {
            arg: Box::new(self),
            elements,
        }
    }

    #[must_use]
    pub fn project(self, elements: ProjectionElemList) -> Self {
        TupleExpr::Projection {
            arg: Box::new(self),
            elements,
        }
    }

    #[must_use]
    pub fn group(self, group_by: Vec<String>, elements: Vec<GroupElem>) -> Self {
        TupleExpr::Group {
            arg: Box::new(self),
            group_by,
            elements,
        }
    }

    #[must_use]
    pub fn order(self, elements: Vec<OrderElem>) -> Self {
        TupleExpr::Order {
            arg: Box::new(self),
            elements,
        }
    }

    #[must_use]
    pub fn slice(self, offset: Option<u64>, limit: Option<u64>) -> Self {
        TupleExpr::Slice {
            arg: Box::new(self),
            offset,
            limit,
        }
    }

    /// Returns the output names of the outermost projection, looking through solution
    /// modifiers.
    pub fn binding_names(&self) -> Vec<String> {
        match self {
            TupleExpr::Slice { arg, .. }
            | TupleExpr::Distinct(arg)
            | TupleExpr::Reduced(arg)
            | TupleExpr::Describe(arg)
            | TupleExpr::Order { arg, .. } => arg.binding_names(),
            TupleExpr::Projection { elements, .. } => {
                elements.target_names().map(str::to_owned).collect()
            }
            TupleExpr::MultiProjection { projections, .. } => projections
                .iter()
                .flat_map(ProjectionElemList::target_names)
                .unique()
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The direct sub-trees of this node, left to right.
    pub fn children(&self) -> Vec<&TupleExpr> {
        match self {
            TupleExpr::SingletonSet
            | TupleExpr::StatementPattern(_)
            | TupleExpr::BindingSetAssignment(_) => Vec::new(),
            TupleExpr::Join { left, right }
            | TupleExpr::LeftJoin { left, right, .. }
            | TupleExpr::Union { left, right }
            | TupleExpr::Difference { left, right } => vec![&**left, &**right],
            TupleExpr::Filter { arg, .. }
            | TupleExpr::Extension { arg, .. }
            | TupleExpr::Projection { arg, .. }
            | TupleExpr::MultiProjection { arg, .. }
            | TupleExpr::Group { arg, .. }
            | TupleExpr::Order { arg, .. }
            | TupleExpr::Slice { arg, .. }
            | TupleExpr::Distinct(arg)
            | TupleExpr::Reduced(arg)
            | TupleExpr::Describe(arg)
            | TupleExpr::Service(Service { arg, .. }) => vec![&**arg],
            TupleExpr::ArbitraryLengthPath(path) => vec![&*path.path],
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TupleExpr::SingletonSet => write!(f, "SingletonSet"),
            TupleExpr::StatementPattern(pattern) => {
                write!(f, "StatementPattern ")?;
                if let Some(context) = &pattern.context {
                    write!(f, "GRAPH {context} ")?;
                }
                write!(
                    f,
                    "({} {} {})",
                    pattern.subject, pattern.predicate, pattern.object
                )
            }
            TupleExpr::Join { .. } => write!(f, "Join"),
            TupleExpr::LeftJoin {
                condition: None, ..
            } => write!(f, "LeftJoin"),
            TupleExpr::LeftJoin {
                condition: Some(condition),
                ..
            } => write!(f, "LeftJoin: {condition}"),
            TupleExpr::Union { .. } => write!(f, "Union"),
            TupleExpr::Difference { .. } => write!(f, "Difference"),
            TupleExpr::Filter { condition, .. } => write!(f, "Filter: {condition}"),
            TupleExpr::Extension { elements, .. } => write!(
                f,
                "Extension: {}",
                elements
                    .iter()
                    .map(|e| format!("{} AS {}", e.expr, e.name))
                    .join(", ")
            ),
            TupleExpr::Projection { elements, .. } => write!(f, "Projection: {elements}"),
            TupleExpr::MultiProjection { projections, .. } => write!(
                f,
                "MultiProjection: {}",
                projections.iter().map(|p| format!("[{p}]")).join(", ")
            ),
            TupleExpr::Group {
                group_by, elements, ..
            } => write!(
                f,
                "Group: by=[{}], aggregates=[{}]",
                group_by.iter().join(", "),
                elements
                    .iter()
                    .map(|e| format!("{} AS {}", e.operator, e.name))
                    .join(", ")
            ),
            TupleExpr::Order { elements, .. } => {
                write!(f, "Order: {}", elements.iter().join(", "))
            }
            TupleExpr::Slice { offset, limit, .. } => {
                write!(f, "Slice:")?;
                if let Some(offset) = offset {
                    write!(f, " offset={offset}")?;
                }
                if let Some(limit) = limit {
                    write!(f, " limit={limit}")?;
                }
                Ok(())
            }
            TupleExpr::Distinct(_) => write!(f, "Distinct"),
            TupleExpr::Reduced(_) => write!(f, "Reduced"),
            TupleExpr::Describe(_) => write!(f, "Describe"),
            TupleExpr::Service(service) => {
                write!(f, "Service: {}", service.service)?;
                if service.silent {
                    write!(f, " SILENT")?;
                }
                Ok(())
            }
            TupleExpr::BindingSetAssignment(values) => write!(
                f,
                "BindingSetAssignment: [{}] rows={}",
                values.binding_names.iter().join(", "),
                values.rows.len()
            ),
            TupleExpr::ArbitraryLengthPath(path) => {
                write!(f, "ArbitraryLengthPath ")?;
                if let Some(context) = &path.context {
                    write!(f, "GRAPH {context} ")?;
                }
                write!(
                    f,
                    "({} {} min={})",
                    path.subject, path.object, path.min_length
                )
            }
        }
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}", "", indent = depth * 2)?;
        self.fmt_node(f)?;
        for child in self.children() {
            writeln!(f)?;
            child.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for TupleExpr {
    /// Writes the tree with one node per line, children indented below their parent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}
