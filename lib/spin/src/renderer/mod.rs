mod context;

use crate::well_known::{WellKnownTable, WellKnownTableRef};
use crate::{SpinResult, SpinRendererConfig};
use context::RenderContext;
use rdf_spin_algebra::ParsedQuery;
use rdf_spin_common::RdfSink;
use rdf_spin_model::NamedOrBlankNode;
use std::sync::Arc;
use tracing::debug;

/// Encodes query algebra as SPIN RDF statements.
///
/// The encoding mirrors [SpinParser](crate::SpinParser): parsing the statements emitted for
/// a query yields an equivalent query.
#[derive(Debug, Clone)]
pub struct SpinRenderer {
    config: SpinRendererConfig,
    well_known_vars: WellKnownTableRef,
    well_known_functions: WellKnownTableRef,
}

impl Default for SpinRenderer {
    fn default() -> Self {
        Self::new(SpinRendererConfig::default())
    }
}

impl SpinRenderer {
    pub fn new(config: SpinRendererConfig) -> Self {
        Self {
            config,
            well_known_vars: Arc::new(WellKnownTable::variables()),
            well_known_functions: Arc::new(WellKnownTable::functions()),
        }
    }

    #[must_use]
    pub fn with_well_known_tables(
        mut self,
        vars: WellKnownTableRef,
        functions: WellKnownTableRef,
    ) -> Self {
        self.well_known_vars = vars;
        self.well_known_functions = functions;
        self
    }

    pub fn config(&self) -> &SpinRendererConfig {
        &self.config
    }

    /// Writes `query` to `sink` and returns the resource of the emitted command.
    ///
    /// On error the statements already passed to `sink` are incomplete and `end` is not
    /// called.
    pub fn render(
        &self,
        query: &ParsedQuery,
        sink: &mut dyn RdfSink,
    ) -> SpinResult<NamedOrBlankNode> {
        debug!("Rendering {} query", query.form);
        sink.start()?;
        let root = RenderContext::new(
            self.config.output,
            &self.well_known_vars,
            &self.well_known_functions,
            sink,
        )
        .render(query)?;
        sink.end()?;
        Ok(root)
    }
}
