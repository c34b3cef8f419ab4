//! The `sp:` classes of the operators with a dedicated algebra node.

use rdf_spin_algebra::{AggregateFunction, CompareOp, MathOp};
use rdf_spin_model::vocab::sp;
use rdf_spin_model::NamedNodeRef;

/// The properties of a CONSTRUCT template triple and the projection targets they map to.
pub const CONSTRUCT_TARGETS: [(&str, NamedNodeRef<'static>); 3] = [
    ("subject", sp::SUBJECT_PROPERTY),
    ("predicate", sp::PREDICATE_PROPERTY),
    ("object", sp::OBJECT_PROPERTY),
];

const COMPARE_OPERATORS: [(CompareOp, NamedNodeRef<'static>); 6] = [
    (CompareOp::Eq, sp::EQ),
    (CompareOp::Ne, sp::NE),
    (CompareOp::Lt, sp::LT),
    (CompareOp::Le, sp::LE),
    (CompareOp::Ge, sp::GE),
    (CompareOp::Gt, sp::GT),
];

const MATH_OPERATORS: [(MathOp, NamedNodeRef<'static>); 4] = [
    (MathOp::Plus, sp::ADD),
    (MathOp::Minus, sp::SUB),
    (MathOp::Multiply, sp::MUL),
    (MathOp::Divide, sp::DIVIDE),
];

const AGGREGATES: [(AggregateFunction, NamedNodeRef<'static>); 7] = [
    (AggregateFunction::Count, sp::COUNT_CLASS),
    (AggregateFunction::Max, sp::MAX_CLASS),
    (AggregateFunction::Min, sp::MIN_CLASS),
    (AggregateFunction::Sum, sp::SUM_CLASS),
    (AggregateFunction::Avg, sp::AVG_CLASS),
    (AggregateFunction::GroupConcat, sp::GROUP_CONCAT_CLASS),
    (AggregateFunction::Sample, sp::SAMPLE_CLASS),
];

fn find<T: Copy>(table: &[(T, NamedNodeRef<'static>)], iri: NamedNodeRef<'_>) -> Option<T> {
    table
        .iter()
        .find(|(_, class)| *class == iri)
        .map(|(op, _)| *op)
}

pub fn compare_op(iri: NamedNodeRef<'_>) -> Option<CompareOp> {
    find(&COMPARE_OPERATORS, iri)
}

pub fn compare_class(op: CompareOp) -> NamedNodeRef<'static> {
    match op {
        CompareOp::Eq => sp::EQ,
        CompareOp::Ne => sp::NE,
        CompareOp::Lt => sp::LT,
        CompareOp::Le => sp::LE,
        CompareOp::Ge => sp::GE,
        CompareOp::Gt => sp::GT,
    }
}

pub fn math_op(iri: NamedNodeRef<'_>) -> Option<MathOp> {
    find(&MATH_OPERATORS, iri)
}

pub fn math_class(op: MathOp) -> NamedNodeRef<'static> {
    match op {
        MathOp::Plus => sp::ADD,
        MathOp::Minus => sp::SUB,
        MathOp::Multiply => sp::MUL,
        MathOp::Divide => sp::DIVIDE,
    }
}

pub fn aggregate_function(iri: NamedNodeRef<'_>) -> Option<AggregateFunction> {
    find(&AGGREGATES, iri)
}

pub fn aggregate_class(function: AggregateFunction) -> NamedNodeRef<'static> {
    match function {
        AggregateFunction::Count => sp::COUNT_CLASS,
        AggregateFunction::Max => sp::MAX_CLASS,
        AggregateFunction::Min => sp::MIN_CLASS,
        AggregateFunction::Sum => sp::SUM_CLASS,
        AggregateFunction::Avg => sp::AVG_CLASS,
        AggregateFunction::GroupConcat => sp::GROUP_CONCAT_CLASS,
        AggregateFunction::Sample => sp::SAMPLE_CLASS,
    }
}
