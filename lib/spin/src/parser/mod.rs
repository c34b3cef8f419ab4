mod decoder;

use crate::registry::{FunctionRegistryRef, IriSetRegistry, TupleFunctionRegistryRef};
use crate::statements;
use crate::template::{bind_arguments, template_kind, TemplateCache};
use crate::text::QueryTextParserRef;
use crate::well_known::{WellKnownTable, WellKnownTableRef};
use crate::{SpinError, SpinParserConfig, SpinResult};
use decoder::QueryDecoder;
use itertools::Itertools;
use rdf_spin_algebra::{
    Argument, ParsedOperation, ParsedQuery, ParsedUpdate, QueryForm, Template, TemplateBinding,
    TemplateKind,
};
use rdf_spin_common::TripleSource;
use rdf_spin_model::vocab::{rdf, rdfs, sp, spin, spl};
use rdf_spin_model::{
    term_to_resource, NamedNode, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef,
};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// The kind of command a caller expects to find at a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Any query or update.
    Command,
    /// Any query.
    Query,
    Ask,
    Select,
    Construct,
    Describe,
    Update,
}

impl CommandKind {
    fn query_form(self) -> Option<QueryForm> {
        match self {
            CommandKind::Ask => Some(QueryForm::Ask),
            CommandKind::Select => Some(QueryForm::Select),
            CommandKind::Construct => Some(QueryForm::Construct),
            CommandKind::Describe => Some(QueryForm::Describe),
            CommandKind::Command | CommandKind::Query | CommandKind::Update => None,
        }
    }

    fn accepts(self, operation: &ParsedOperation) -> bool {
        match (self, operation) {
            (CommandKind::Command, _)
            | (CommandKind::Query, ParsedOperation::Query(_))
            | (CommandKind::Update, ParsedOperation::Update(_)) => true,
            (kind, ParsedOperation::Query(query)) => kind.query_form() == Some(query.form),
            (_, ParsedOperation::Update(_)) => false,
        }
    }

    /// Whether instances of a template of kind `kind` can stand where `self` is expected.
    fn accepts_template(self, kind: TemplateKind) -> bool {
        match self {
            CommandKind::Command => true,
            CommandKind::Query => kind != TemplateKind::Update,
            CommandKind::Ask => kind == TemplateKind::Ask,
            CommandKind::Select => kind == TemplateKind::Select,
            CommandKind::Construct => kind == TemplateKind::Construct,
            CommandKind::Update => kind == TemplateKind::Update,
            CommandKind::Describe => false,
        }
    }
}

impl From<TemplateKind> for CommandKind {
    fn from(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Ask => CommandKind::Ask,
            TemplateKind::Select => CommandKind::Select,
            TemplateKind::Construct => CommandKind::Construct,
            TemplateKind::Update => CommandKind::Update,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Command => write!(f, "command"),
            CommandKind::Query => write!(f, "query"),
            CommandKind::Ask => write!(f, "ASK query"),
            CommandKind::Select => write!(f, "SELECT query"),
            CommandKind::Construct => write!(f, "CONSTRUCT query"),
            CommandKind::Describe => write!(f, "DESCRIBE query"),
            CommandKind::Update => write!(f, "update"),
        }
    }
}

const UPDATE_TYPES: [NamedNodeRef<'static>; 7] = [
    sp::MODIFY_CLASS,
    sp::INSERT_DATA_CLASS,
    sp::DELETE_DATA_CLASS,
    sp::LOAD_CLASS,
    sp::CLEAR_CLASS,
    sp::CREATE_CLASS,
    sp::DROP_CLASS,
];

const TEMPLATE_CLASSES: [NamedNodeRef<'static>; 5] = [
    spin::TEMPLATE_CLASS,
    spin::ASK_TEMPLATE_CLASS,
    spin::SELECT_TEMPLATE_CLASS,
    spin::CONSTRUCT_TEMPLATE_CLASS,
    spin::UPDATE_TEMPLATE_CLASS,
];

/// Types of a template instance that never name its template.
const NON_TEMPLATE_TYPES: [NamedNodeRef<'static>; 10] = [
    rdfs::RESOURCE,
    rdfs::CLASS,
    rdf::PROPERTY,
    spin::TEMPLATES_CLASS,
    spin::ASK_TEMPLATES_CLASS,
    spin::SELECT_TEMPLATES_CLASS,
    spin::CONSTRUCT_TEMPLATES_CLASS,
    spin::UPDATE_TEMPLATES_CLASS,
    spin::MODULES_CLASS,
    spin::RULE_CLASS,
];

fn contains(classes: &[NamedNodeRef<'static>], class: NamedNodeRef<'_>) -> bool {
    classes.iter().any(|candidate| *candidate == class)
}

fn query_form(command_type: NamedNodeRef<'_>) -> Option<QueryForm> {
    if command_type == sp::SELECT_CLASS {
        Some(QueryForm::Select)
    } else if command_type == sp::CONSTRUCT_CLASS {
        Some(QueryForm::Construct)
    } else if command_type == sp::ASK_CLASS {
        Some(QueryForm::Ask)
    } else if command_type == sp::DESCRIBE_CLASS {
        Some(QueryForm::Describe)
    } else {
        None
    }
}

fn is_command_type(class: NamedNodeRef<'_>) -> bool {
    query_form(class).is_some() || contains(&UPDATE_TYPES, class)
}

fn record_source_text(operation: &mut ParsedOperation, text: Option<String>) {
    let slot = match operation {
        ParsedOperation::Query(query) => &mut query.source_text,
        ParsedOperation::Update(update) => &mut update.source_text,
    };
    if text.is_some() {
        *slot = text;
    }
}

/// Decodes SPIN RDF graphs into query algebra.
///
/// A parser holds the template cache, so parsers should be reused across calls. Parsing
/// never mutates the [TripleSource] it reads from.
#[derive(Debug)]
pub struct SpinParser {
    config: SpinParserConfig,
    well_known_vars: WellKnownTableRef,
    well_known_functions: WellKnownTableRef,
    function_registry: FunctionRegistryRef,
    tuple_function_registry: TupleFunctionRegistryRef,
    text_parser: Option<QueryTextParserRef>,
    templates: TemplateCache,
}

impl Default for SpinParser {
    fn default() -> Self {
        Self::new(SpinParserConfig::default())
    }
}

impl SpinParser {
    pub fn new(config: SpinParserConfig) -> Self {
        let registry = Arc::new(IriSetRegistry::new());
        let function_registry: FunctionRegistryRef = Arc::<IriSetRegistry>::clone(&registry);
        Self {
            templates: TemplateCache::new(config.template_cache_capacity),
            config,
            well_known_vars: Arc::new(WellKnownTable::variables()),
            well_known_functions: Arc::new(WellKnownTable::functions()),
            function_registry,
            tuple_function_registry: registry,
            text_parser: None,
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

    #[must_use]
    pub fn with_function_registry(mut self, registry: FunctionRegistryRef) -> Self {
        self.function_registry = registry;
        self
    }

    #[must_use]
    pub fn with_tuple_function_registry(mut self, registry: TupleFunctionRegistryRef) -> Self {
        self.tuple_function_registry = registry;
        self
    }

    /// Decodes `sp:text` values with `text_parser`.
    #[must_use]
    pub fn with_text_parser(mut self, text_parser: QueryTextParserRef) -> Self {
        self.text_parser = Some(text_parser);
        self
    }

    pub fn config(&self) -> &SpinParserConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    /// Decodes the command or template instance at `resource`.
    ///
    /// The result must be of the `expected` kind.
    pub fn parse(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        expected: CommandKind,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedOperation> {
        debug!("Parsing {expected} {resource}");
        self.parse_operation(resource, expected, store, 0)
    }

    pub fn parse_query(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedQuery> {
        self.parse_query_of_kind(resource, CommandKind::Query, store)
    }

    pub fn parse_ask_query(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedQuery> {
        self.parse_query_of_kind(resource, CommandKind::Ask, store)
    }

    pub fn parse_select_query(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedQuery> {
        self.parse_query_of_kind(resource, CommandKind::Select, store)
    }

    pub fn parse_construct_query(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedQuery> {
        self.parse_query_of_kind(resource, CommandKind::Construct, store)
    }

    pub fn parse_describe_query(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedQuery> {
        self.parse_query_of_kind(resource, CommandKind::Describe, store)
    }

    pub fn parse_update(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedUpdate> {
        match self.parse(resource, CommandKind::Update, store)? {
            ParsedOperation::Update(update) => Ok(update),
            ParsedOperation::Query(_) => Err(SpinError::malformed_at(
                resource,
                "Expected an update but found a query",
            )),
        }
    }

    /// Returns the template `iri`, parsing and caching it on first use.
    ///
    /// Fails if instances of the template cannot stand where a command of kind `expected`
    /// is required.
    pub fn get_or_parse_template(
        &self,
        iri: NamedNodeRef<'_>,
        expected: CommandKind,
        store: &dyn TripleSource,
    ) -> SpinResult<Arc<Template>> {
        self.template(iri, &[], expected, store, 0)
    }

    /// The argument declarations of a template or function, inherited ones first.
    pub fn parse_arguments(
        &self,
        module: NamedOrBlankNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<Vec<Argument>> {
        self.collect_arguments(module, &[], store)
    }

    /// Whether `iri` is a magic property: a registered tuple function or a resource typed
    /// `spin:MagicProperty`.
    pub fn is_magic_property(
        &self,
        iri: NamedNodeRef<'_>,
        store: &dyn TripleSource,
    ) -> SpinResult<bool> {
        if self.tuple_function_registry.has_tuple_function(iri.as_str()) {
            return Ok(true);
        }
        statements::has_type(store, iri.into(), spin::MAGIC_PROPERTY_CLASS)
    }

    fn parse_query_of_kind(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        expected: CommandKind,
        store: &dyn TripleSource,
    ) -> SpinResult<ParsedQuery> {
        match self.parse(resource, expected, store)? {
            ParsedOperation::Query(query) => Ok(query),
            ParsedOperation::Update(_) => Err(SpinError::malformed_at(
                resource,
                format!("Expected a {expected} but found an update"),
            )),
        }
    }

    fn parse_operation(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        expected: CommandKind,
        store: &dyn TripleSource,
        depth: usize,
    ) -> SpinResult<ParsedOperation> {
        if depth > self.config.max_depth {
            return Err(SpinError::malformed_at(
                resource,
                format!("Templates nested deeper than {} levels", self.config.max_depth),
            ));
        }
        let types = statements::types(store, resource)?;
        let command_types = types
            .iter()
            .filter(|class| is_command_type(class.as_ref()))
            .collect::<Vec<_>>();
        let is_template_instance = types
            .iter()
            .any(|class| class.as_ref() == spin::TEMPLATES_CLASS);

        let operation = match command_types.as_slice() {
            [] => self.instantiate_template(
                resource,
                &types,
                is_template_instance,
                expected,
                store,
                depth,
            )?,
            _ if is_template_instance => {
                return Err(SpinError::malformed_at(
                    resource,
                    "Conflicting RDF types: both a command and a template instance",
                ))
            }
            [command_type] => self.parse_command(resource, command_type.as_ref(), store, depth)?,
            _ => {
                return Err(SpinError::malformed_at(
                    resource,
                    format!(
                        "Incompatible RDF types for command: {}",
                        command_types.iter().join(", ")
                    ),
                ))
            }
        };

        if !expected.accepts(&operation) {
            return Err(SpinError::malformed_at(
                resource,
                format!("Expected a {expected}"),
            ));
        }
        Ok(operation)
    }

    fn parse_command(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        command_type: NamedNodeRef<'_>,
        store: &dyn TripleSource,
        depth: usize,
    ) -> SpinResult<ParsedOperation> {
        let text = statements::single_literal(store, resource, sp::TEXT_PROPERTY)?
            .map(|text| text.value().to_owned());
        let input = self.config.input;
        let fallback = input.can_fall_back();

        let operation = if input.text_first() {
            match self.parse_text(resource, text.as_deref(), command_type, fallback)? {
                Some(operation) => Some(operation),
                None if fallback => {
                    debug!("Falling back to the RDF structure of {resource}");
                    self.parse_structure(resource, command_type, store, depth)?
                }
                None => None,
            }
        } else {
            match self.parse_structure(resource, command_type, store, depth)? {
                Some(operation) => Some(operation),
                None if fallback => {
                    debug!("Falling back to the text of {resource}");
                    self.parse_text(resource, text.as_deref(), command_type, false)?
                }
                None => None,
            }
        };

        let mut operation = operation.ok_or_else(|| {
            SpinError::malformed_at(
                resource,
                "Command has neither a decodable sp:text nor an RDF structure",
            )
        })?;
        record_source_text(&mut operation, text);
        Ok(operation)
    }

    fn parse_text(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        text: Option<&str>,
        command_type: NamedNodeRef<'_>,
        can_fall_back: bool,
    ) -> SpinResult<Option<ParsedOperation>> {
        let (Some(text), Some(parser)) = (text, &self.text_parser) else {
            return Ok(None);
        };
        match parser.parse(text, command_type) {
            Ok(operation) => Ok(Some(operation)),
            Err(error) if can_fall_back => {
                debug!("Cannot decode the text of {resource}: {error}");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Decodes the RDF structure of a command. Returns `None` if the command carries no
    /// structure besides its type and text.
    fn parse_structure(
        &self,
        resource: NamedOrBlankNodeRef<'_>,
        command_type: NamedNodeRef<'_>,
        store: &dyn TripleSource,
        depth: usize,
    ) -> SpinResult<Option<ParsedOperation>> {
        let Some(form) = query_form(command_type) else {
            return Ok(Some(
                ParsedUpdate {
                    update_type: command_type.into_owned(),
                    source_text: None,
                    template: None,
                }
                .into(),
            ));
        };
        let structure = [
            sp::WHERE_PROPERTY,
            sp::RESULT_VARIABLES_PROPERTY,
            sp::RESULT_NODES_PROPERTY,
            sp::TEMPLATES_PROPERTY,
        ];
        let mut has_structure = false;
        for predicate in structure {
            if statements::single_value(store, resource, predicate)?.is_some() {
                has_structure = true;
                break;
            }
        }
        if !has_structure {
            return Ok(None);
        }
        let tuple_expr = QueryDecoder::new(self, store, depth).query(resource, form)?;
        Ok(Some(ParsedQuery::new(form, tuple_expr).into()))
    }

    fn instantiate_template(
        &self,
        instance: NamedOrBlankNodeRef<'_>,
        types: &[NamedNode],
        is_template_instance: bool,
        expected: CommandKind,
        store: &dyn TripleSource,
        depth: usize,
    ) -> SpinResult<ParsedOperation> {
        let mut concrete = Vec::new();
        let mut abstract_types = Vec::new();
        for class in types.iter().filter(|c| !contains(&NON_TEMPLATE_TYPES, c.as_ref())) {
            let declaration = NamedOrBlankNodeRef::from(class.as_ref());
            if statements::boolean_value(store, declaration, spin::ABSTRACT_PROPERTY)? {
                abstract_types.push(class.clone());
            } else if is_template_instance || is_template_declaration(class.as_ref(), store)? {
                concrete.push(class.clone());
            }
        }

        let iri = match concrete.as_slice() {
            [iri] => iri,
            [] => return Err(SpinError::malformed_at(instance, "Missing RDF type")),
            _ => {
                return Err(SpinError::malformed_at(
                    instance,
                    format!("Ambiguous template types: {}", concrete.iter().join(", ")),
                ))
            }
        };
        debug!("Instantiating template {iri} at {instance}");
        let template = self.template(iri.as_ref(), &abstract_types, expected, store, depth)?;
        let arguments = bind_arguments(&template, instance, store)?;
        Ok(template
            .body
            .clone()
            .with_template(TemplateBinding {
                template,
                arguments,
            }))
    }

    fn template(
        &self,
        iri: NamedNodeRef<'_>,
        abstract_types: &[NamedNode],
        expected: CommandKind,
        store: &dyn TripleSource,
        depth: usize,
    ) -> SpinResult<Arc<Template>> {
        let template = self.templates.get_or_try_insert_with(iri, || {
            self.parse_template(iri, abstract_types, store, depth)
        })?;
        if !expected.accepts_template(template.kind) {
            return Err(SpinError::malformed_at(
                iri.into(),
                format!(
                    "An instance of a {} cannot be used as a {expected}",
                    template.kind
                ),
            ));
        }
        Ok(template)
    }

    fn parse_template(
        &self,
        iri: NamedNodeRef<'_>,
        abstract_types: &[NamedNode],
        store: &dyn TripleSource,
        depth: usize,
    ) -> SpinResult<Template> {
        let subject = NamedOrBlankNodeRef::from(iri);
        let kinds = statements::types(store, subject)?
            .iter()
            .filter_map(|class| template_kind(class.as_ref()))
            .collect::<Vec<_>>();
        let kind = match kinds.as_slice() {
            [kind] => *kind,
            [] => {
                return Err(SpinError::malformed_at(
                    subject,
                    "Template has no template type",
                ))
            }
            _ => {
                return Err(SpinError::malformed_at(
                    subject,
                    "Template has several template types",
                ))
            }
        };
        let body = statements::single_resource(store, subject, spin::BODY_PROPERTY)?
            .ok_or_else(|| SpinError::malformed_at(subject, "Template has no spin:body"))?;
        let body = self.parse_operation(body.as_ref(), kind.into(), store, depth + 1)?;
        let arguments = self.collect_arguments(subject, abstract_types, store)?;
        debug!("Parsed {kind} {iri} with {} arguments", arguments.len());
        Ok(Template {
            iri: iri.into_owned(),
            kind,
            body,
            arguments,
        })
    }

    /// Arguments of the abstract types first, then the abstract `rdfs:subClassOf`
    /// ancestors (root-most first), then the module's own. A later declaration of a
    /// predicate replaces the earlier one in place.
    fn collect_arguments(
        &self,
        module: NamedOrBlankNodeRef<'_>,
        abstract_types: &[NamedNode],
        store: &dyn TripleSource,
    ) -> SpinResult<Vec<Argument>> {
        let mut sources = abstract_types
            .iter()
            .cloned()
            .map(NamedOrBlankNode::from)
            .collect::<Vec<_>>();
        for ancestor in abstract_ancestors(module, store)? {
            if !sources.contains(&ancestor) {
                sources.push(ancestor);
            }
        }
        sources.push(module.into_owned());

        let mut arguments: Vec<Argument> = Vec::new();
        for source in &sources {
            for argument in declared_arguments(source.as_ref(), store)? {
                match arguments
                    .iter_mut()
                    .find(|existing| existing.predicate == argument.predicate)
                {
                    Some(existing) => *existing = argument,
                    None => arguments.push(argument),
                }
            }
        }
        Ok(arguments)
    }
}

fn is_template_declaration(
    class: NamedNodeRef<'_>,
    store: &dyn TripleSource,
) -> SpinResult<bool> {
    Ok(statements::types(store, class.into())?
        .iter()
        .any(|meta| contains(&TEMPLATE_CLASSES, meta.as_ref())))
}

fn abstract_ancestors(
    module: NamedOrBlankNodeRef<'_>,
    store: &dyn TripleSource,
) -> SpinResult<Vec<NamedOrBlankNode>> {
    let mut ancestors = Vec::new();
    let mut visited = HashSet::from([module.into_owned()]);
    let mut pending = vec![module.into_owned()];
    while let Some(class) = pending.pop() {
        for parent in statements::objects(store, class.as_ref(), rdfs::SUB_CLASS_OF)? {
            let Some(parent) = term_to_resource(&parent) else {
                continue;
            };
            if !visited.insert(parent.clone()) {
                continue;
            }
            if statements::boolean_value(store, parent.as_ref(), spin::ABSTRACT_PROPERTY)? {
                ancestors.push(parent.clone());
            }
            pending.push(parent);
        }
    }
    ancestors.reverse();
    Ok(ancestors)
}

fn declared_arguments(
    module: NamedOrBlankNodeRef<'_>,
    store: &dyn TripleSource,
) -> SpinResult<Vec<Argument>> {
    let mut arguments = Vec::new();
    for constraint in statements::objects(store, module, spin::CONSTRAINT_PROPERTY)? {
        let Some(constraint) = term_to_resource(&constraint) else {
            continue;
        };
        let constraint = constraint.as_ref();
        if !statements::has_type(store, constraint, spl::ARGUMENT_TEMPLATE)? {
            continue;
        }
        let predicate = statements::single_iri(store, constraint, spl::PREDICATE_PROPERTY)?
            .ok_or_else(|| SpinError::malformed_at(constraint, "Argument without spl:predicate"))?;
        arguments.push(Argument {
            predicate,
            value_type: statements::single_iri(store, constraint, spl::VALUE_TYPE_PROPERTY)?,
            optional: statements::boolean_value(store, constraint, spl::OPTIONAL_PROPERTY)?,
            default_value: statements::single_value(
                store,
                constraint,
                spl::DEFAULT_VALUE_PROPERTY,
            )?,
        });
    }
    Ok(arguments)
}
