/// Where the parser reads a command from: the `sp:text` form or the structural RDF form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Input {
    /// Decode the text, falling back to the RDF structure.
    #[default]
    TextFirst,
    TextOnly,
    /// Decode the RDF structure, falling back to the text.
    RdfFirst,
    RdfOnly,
}

impl Input {
    pub fn text_first(self) -> bool {
        matches!(self, Input::TextFirst | Input::TextOnly)
    }

    pub fn can_fall_back(self) -> bool {
        matches!(self, Input::TextFirst | Input::RdfFirst)
    }
}

/// Which forms of a query the renderer emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Output {
    #[default]
    TextAndRdf,
    TextOnly,
    RdfOnly,
}

impl Output {
    pub fn emits_text(self) -> bool {
        matches!(self, Output::TextAndRdf | Output::TextOnly)
    }

    pub fn emits_rdf(self) -> bool {
        matches!(self, Output::TextAndRdf | Output::RdfOnly)
    }
}

/// Configuration of a [SpinParser](crate::SpinParser).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpinParserConfig {
    /// The decoding strategy for commands.
    pub input: Input,
    /// Reject calls of functions that are neither well-known, registered nor declared as
    /// `spin:Function`. If disabled, such calls keep their IRI as the function name.
    pub strict_function_checking: bool,
    /// The maximum number of templates kept in the template cache.
    pub template_cache_capacity: usize,
    /// The maximum nesting of groups, expressions and template bodies.
    pub max_depth: usize,
}

impl Default for SpinParserConfig {
    fn default() -> Self {
        Self {
            input: Input::default(),
            strict_function_checking: true,
            template_cache_capacity: 100,
            max_depth: 64,
        }
    }
}

/// Configuration of a [SpinRenderer](crate::SpinRenderer).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpinRendererConfig {
    pub output: Output,
}
