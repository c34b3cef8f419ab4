use crate::SpinResult;
use rdf_spin_algebra::ParsedOperation;
use rdf_spin_model::NamedNodeRef;
use std::fmt::Debug;
use std::sync::Arc;

/// A shared [QueryTextParser].
pub type QueryTextParserRef = Arc<dyn QueryTextParser>;

/// Decodes the SPARQL text of a command (its `sp:text` value).
///
/// The SPIN codec never reads SPARQL syntax itself. Without a text parser, commands are
/// only decoded from their RDF structure.
pub trait QueryTextParser: Debug + Send + Sync {
    /// Parses `text`, the text of a command typed `command_type` (e.g. `sp:Select`).
    fn parse(&self, text: &str, command_type: NamedNodeRef<'_>) -> SpinResult<ParsedOperation>;
}
