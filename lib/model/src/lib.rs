mod resource;
pub mod vocab;

pub use resource::*;

// Re-export some oxrdf types.
pub use oxrdf::{
    BlankNode, BlankNodeIdParseError, BlankNodeRef, Graph, IriParseError, Literal, LiteralRef,
    NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, Subject, SubjectRef, Term,
    TermRef, Triple, TripleRef,
};
