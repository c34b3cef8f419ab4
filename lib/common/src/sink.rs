use crate::error::StorageError;
use rdf_spin_model::{Graph, Triple};

/// A push-style consumer of RDF statements.
///
/// Producers call [RdfSink::start] once, then [RdfSink::handle] for each statement and
/// finally [RdfSink::end]. If the producer fails half-way, `end` is not called and the
/// statements received so far must be discarded.
pub trait RdfSink {
    fn start(&mut self) -> Result<(), StorageError> {
        Ok(())
    }

    fn handle(&mut self, triple: Triple) -> Result<(), StorageError>;

    fn end(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

impl RdfSink for Graph {
    fn handle(&mut self, triple: Triple) -> Result<(), StorageError> {
        self.insert(&triple);
        Ok(())
    }
}

impl RdfSink for Vec<Triple> {
    fn handle(&mut self, triple: Triple) -> Result<(), StorageError> {
        self.push(triple);
        Ok(())
    }
}
