pub mod error;
mod sink;
mod triple_source;

pub use sink::RdfSink;
pub use triple_source::{TripleIter, TripleSource};
