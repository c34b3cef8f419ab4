use crate::{TupleExpr, Var};
use itertools::Itertools;
use rdf_spin_model::Term;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Ge,
    Gt,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
            CompareOp::Gt => ">",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MathOp {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl MathOp {
    pub fn symbol(self) -> &'static str {
        match self {
            MathOp::Plus => "+",
            MathOp::Minus => "-",
            MathOp::Multiply => "*",
            MathOp::Divide => "/",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Max,
    Min,
    Sum,
    Avg,
    GroupConcat,
    Sample,
}

impl AggregateFunction {
    pub fn name(self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Avg => "AVG",
            AggregateFunction::GroupConcat => "GROUP_CONCAT",
            AggregateFunction::Sample => "SAMPLE",
        }
    }
}

/// An aggregate such as `COUNT(DISTINCT ?x)`. An absent argument stands for `*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateExpr {
    pub function: AggregateFunction,
    pub distinct: bool,
    pub arg: Option<Box<ValueExpr>>,
}

impl AggregateExpr {
    pub fn new(function: AggregateFunction, arg: Option<ValueExpr>, distinct: bool) -> Self {
        Self {
            function,
            distinct,
            arg: arg.map(Box::new),
        }
    }

    /// `COUNT(*)`
    pub fn count_all() -> Self {
        Self::new(AggregateFunction::Count, None, false)
    }
}

/// A scalar expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueExpr {
    Var(Var),
    Constant(Term),
    Compare {
        op: CompareOp,
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },
    Math {
        op: MathOp,
        left: Box<ValueExpr>,
        right: Box<ValueExpr>,
    },
    And(Box<ValueExpr>, Box<ValueExpr>),
    Or(Box<ValueExpr>, Box<ValueExpr>),
    Not(Box<ValueExpr>),
    Exists(Box<TupleExpr>),
    Bound(Var),
    If {
        condition: Box<ValueExpr>,
        then: Box<ValueExpr>,
        otherwise: Box<ValueExpr>,
    },
    Coalesce(Vec<ValueExpr>),
    IsUri(Box<ValueExpr>),
    IsBNode(Box<ValueExpr>),
    IsLiteral(Box<ValueExpr>),
    IsNumeric(Box<ValueExpr>),
    Str(Box<ValueExpr>),
    Lang(Box<ValueExpr>),
    Datatype(Box<ValueExpr>),
    Iri(Box<ValueExpr>),
    BNode(Option<Box<ValueExpr>>),
    Regex {
        arg: Box<ValueExpr>,
        pattern: Box<ValueExpr>,
        flags: Option<Box<ValueExpr>>,
    },
    LocalName(Box<ValueExpr>),
    /// A call of a function identified by its name (a builtin name or an IRI).
    FunctionCall {
        name: String,
        args: Vec<ValueExpr>,
    },
    Aggregate(AggregateExpr),
}

impl ValueExpr {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(Var::new(name))
    }

    pub fn constant(value: impl Into<Term>) -> Self {
        Self::Constant(value.into())
    }

    pub fn compare(op: CompareOp, left: ValueExpr, right: ValueExpr) -> Self {
        Self::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn math(op: MathOp, left: ValueExpr, right: ValueExpr) -> Self {
        Self::Math {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn function_call(name: impl Into<String>, args: Vec<ValueExpr>) -> Self {
        Self::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// The operands of this expression. The pattern of `EXISTS` is not an operand.
    pub fn children(&self) -> Vec<&ValueExpr> {
        match self {
            ValueExpr::Var(_)
            | ValueExpr::Constant(_)
            | ValueExpr::Bound(_)
            | ValueExpr::Exists(_)
            | ValueExpr::BNode(None) => Vec::new(),
            ValueExpr::Compare { left, right, .. }
            | ValueExpr::Math { left, right, .. }
            | ValueExpr::And(left, right)
            | ValueExpr::Or(left, right) => vec![&**left, &**right],
            ValueExpr::Not(inner)
            | ValueExpr::IsUri(inner)
            | ValueExpr::IsBNode(inner)
            | ValueExpr::IsLiteral(inner)
            | ValueExpr::IsNumeric(inner)
            | ValueExpr::Str(inner)
            | ValueExpr::Lang(inner)
            | ValueExpr::Datatype(inner)
            | ValueExpr::Iri(inner)
            | ValueExpr::BNode(Some(inner))
            | ValueExpr::LocalName(inner) => vec![&**inner],
            ValueExpr::If {
                condition,
                then,
                otherwise,
            } => vec![&**condition, &**then, &**otherwise],
            ValueExpr::Regex {
                arg,
                pattern,
                flags,
            } => {
                let mut children = vec![&**arg, &**pattern];
                children.extend(flags.as_deref());
                children
            }
            ValueExpr::Coalesce(args) | ValueExpr::FunctionCall { args, .. } => {
                args.iter().collect()
            }
            ValueExpr::Aggregate(aggregate) => aggregate.arg.as_deref().into_iter().collect(),
        }
    }

    /// Calls `f` for every aggregate in this expression, outermost first. Aggregates nested in
    /// `EXISTS` patterns belong to another scope and are skipped.
    pub fn for_each_aggregate(&self, f: &mut impl FnMut(&AggregateExpr)) {
        if let ValueExpr::Aggregate(aggregate) = self {
            f(aggregate);
        }
        for child in self.children() {
            child.for_each_aggregate(f);
        }
    }

    /// The patterns of the `EXISTS` tests in this expression, excluding tests nested in
    /// those patterns.
    pub fn exists_patterns(&self) -> Vec<&TupleExpr> {
        let mut patterns = Vec::new();
        self.collect_exists_patterns(&mut patterns);
        patterns
    }

    fn collect_exists_patterns<'e>(&'e self, patterns: &mut Vec<&'e TupleExpr>) {
        if let ValueExpr::Exists(pattern) = self {
            patterns.push(pattern);
        }
        for child in self.children() {
            child.collect_exists_patterns(patterns);
        }
    }
}

impl From<Var> for ValueExpr {
    fn from(var: Var) -> Self {
        ValueExpr::Var(var)
    }
}

impl From<AggregateExpr> for ValueExpr {
    fn from(aggregate: AggregateExpr) -> Self {
        ValueExpr::Aggregate(aggregate)
    }
}

impl fmt::Display for AggregateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let distinct = if self.distinct { "DISTINCT " } else { "" };
        match &self.arg {
            Some(arg) => write!(f, "{}({distinct}{arg})", self.function.name()),
            None => write!(f, "{}({distinct}*)", self.function.name()),
        }
    }
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Var(var) => write!(f, "{var}"),
            ValueExpr::Constant(value) => write!(f, "{value}"),
            ValueExpr::Compare { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            ValueExpr::Math { op, left, right } => write!(f, "({left} {} {right})", op.symbol()),
            ValueExpr::And(left, right) => write!(f, "({left} && {right})"),
            ValueExpr::Or(left, right) => write!(f, "({left} || {right})"),
            ValueExpr::Not(inner) => write!(f, "!{inner}"),
            ValueExpr::Exists(_) => write!(f, "EXISTS"),
            ValueExpr::Bound(var) => write!(f, "BOUND({var})"),
            ValueExpr::If {
                condition,
                then,
                otherwise,
            } => write!(f, "IF({condition}, {then}, {otherwise})"),
            ValueExpr::Coalesce(args) => write!(f, "COALESCE({})", args.iter().join(", ")),
            ValueExpr::IsUri(inner) => write!(f, "isIRI({inner})"),
            ValueExpr::IsBNode(inner) => write!(f, "isBlank({inner})"),
            ValueExpr::IsLiteral(inner) => write!(f, "isLiteral({inner})"),
            ValueExpr::IsNumeric(inner) => write!(f, "isNumeric({inner})"),
            ValueExpr::Str(inner) => write!(f, "STR({inner})"),
            ValueExpr::Lang(inner) => write!(f, "LANG({inner})"),
            ValueExpr::Datatype(inner) => write!(f, "DATATYPE({inner})"),
            ValueExpr::Iri(inner) => write!(f, "IRI({inner})"),
            ValueExpr::BNode(None) => write!(f, "BNODE()"),
            ValueExpr::BNode(Some(inner)) => write!(f, "BNODE({inner})"),
            ValueExpr::Regex {
                arg,
                pattern,
                flags: None,
            } => write!(f, "REGEX({arg}, {pattern})"),
            ValueExpr::Regex {
                arg,
                pattern,
                flags: Some(flags),
            } => write!(f, "REGEX({arg}, {pattern}, {flags})"),
            ValueExpr::LocalName(inner) => write!(f, "LOCALNAME({inner})"),
            ValueExpr::FunctionCall { name, args } => {
                write!(f, "{name}({})", args.iter().join(", "))
            }
            ValueExpr::Aggregate(aggregate) => write!(f, "{aggregate}"),
        }
    }
}
