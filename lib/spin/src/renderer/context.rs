use crate::operators::{aggregate_class, compare_class, math_class, CONSTRUCT_TARGETS};
use crate::well_known::WellKnownTable;
use crate::{Output, SpinError, SpinResult};
use rdf_spin_algebra::{
    AggregateExpr, ArbitraryLengthPath, BindingSetAssignment, ExtensionElem, OrderElem,
    ParsedQuery, ProjectionElemList, QueryForm, Service, StatementPattern, TupleExpr, ValueExpr,
    Var,
};
use rdf_spin_common::RdfSink;
use rdf_spin_model::vocab::{afn, rdf, sp, xsd};
use rdf_spin_model::{
    resource_to_subject, resource_to_term, BlankNode, Literal, NamedNode, NamedNodeRef,
    NamedOrBlankNode, Term, Triple,
};
use std::collections::HashMap;
use std::{mem, slice};
use tracing::trace;

fn integer(value: i128) -> Term {
    Literal::new_typed_literal(value.to_string(), xsd::INTEGER).into()
}

fn boolean_true() -> Term {
    Literal::from(true).into()
}

fn command_class(form: QueryForm) -> NamedNodeRef<'static> {
    match form {
        QueryForm::Ask => sp::ASK_CLASS,
        QueryForm::Select => sp::SELECT_CLASS,
        QueryForm::Construct => sp::CONSTRUCT_CLASS,
        QueryForm::Describe => sp::DESCRIBE_CLASS,
    }
}

/// Whether `expr` is a sub-select when it appears as a group element.
fn is_sub_query(expr: &TupleExpr) -> bool {
    matches!(
        expr,
        TupleExpr::Projection { .. }
            | TupleExpr::Slice { .. }
            | TupleExpr::Distinct(_)
            | TupleExpr::Reduced(_)
            | TupleExpr::Order { .. }
            | TupleExpr::Group { .. }
    )
}

/// The graph shared by all patterns below `expr`, if they all are in the same named graph.
fn uniform_context(expr: &TupleExpr) -> Option<&Var> {
    let mut contexts = Vec::new();
    collect_contexts(expr, &mut contexts);
    let (first, rest) = contexts.split_first()?;
    let first = (*first)?;
    rest.iter()
        .all(|context| *context == Some(first))
        .then_some(first)
}

fn collect_contexts<'e>(expr: &'e TupleExpr, contexts: &mut Vec<Option<&'e Var>>) {
    match expr {
        TupleExpr::StatementPattern(pattern) => contexts.push(pattern.context.as_ref()),
        TupleExpr::ArbitraryLengthPath(path) => contexts.push(path.context.as_ref()),
        other => {
            for condition in conditions(other) {
                for pattern in condition.exists_patterns() {
                    collect_contexts(pattern, contexts);
                }
            }
            for child in other.children() {
                collect_contexts(child, contexts);
            }
        }
    }
}

/// The expressions of `expr` that are written into the same group as its patterns.
fn conditions(expr: &TupleExpr) -> Vec<&ValueExpr> {
    match expr {
        TupleExpr::Filter { condition, .. }
        | TupleExpr::LeftJoin {
            condition: Some(condition),
            ..
        } => vec![condition],
        TupleExpr::Extension { elements, .. } => {
            elements.iter().map(|element| &element.expr).collect()
        }
        _ => Vec::new(),
    }
}

/// The constants bound by the extension directly below a CONSTRUCT or DESCRIBE projection.
fn constants(arg: &TupleExpr) -> SpinResult<(&TupleExpr, HashMap<&str, &Term>)> {
    let TupleExpr::Extension { arg, elements } = arg else {
        return Ok((arg, HashMap::new()));
    };
    let mut constants = HashMap::new();
    for element in elements {
        let ValueExpr::Constant(value) = &element.expr else {
            return Err(SpinError::unsupported(format!(
                "Computed template value {} AS {}",
                element.expr, element.name
            )));
        };
        constants.insert(element.name.as_str(), value);
    }
    Ok((arg, constants))
}

/// The state of one rendering: the sink, the nodes chosen for variables and the named
/// graph of the patterns being written.
///
/// Every routine builds the nodes of its sub-tree and returns the term to link them from,
/// leaving the statements of enclosing structures to the caller.
pub(super) struct RenderContext<'a> {
    output: Output,
    well_known_vars: &'a WellKnownTable,
    well_known_functions: &'a WellKnownTable,
    sink: &'a mut dyn RdfSink,
    var_nodes: HashMap<String, Term>,
    /// Blank nodes of variables whose `sp:varName` is still to be written, in first use order.
    pending_names: Vec<(BlankNode, String)>,
    graph: Option<Var>,
}

impl<'a> RenderContext<'a> {
    pub(super) fn new(
        output: Output,
        well_known_vars: &'a WellKnownTable,
        well_known_functions: &'a WellKnownTable,
        sink: &'a mut dyn RdfSink,
    ) -> Self {
        Self {
            output,
            well_known_vars,
            well_known_functions,
            sink,
            var_nodes: HashMap::new(),
            pending_names: Vec::new(),
            graph: None,
        }
    }

    pub(super) fn render(mut self, query: &ParsedQuery) -> SpinResult<NamedOrBlankNode> {
        let root = self.typed_node(command_class(query.form))?;
        if self.output.emits_text() {
            if let Some(text) = &query.source_text {
                self.emit(&root, sp::TEXT_PROPERTY, Literal::new_simple_literal(text))?;
            }
        }
        if self.output.emits_rdf() {
            let expr = &query.tuple_expr;
            match query.form {
                QueryForm::Ask => self.ask(&root, expr)?,
                QueryForm::Select => self.select(&root, expr)?,
                QueryForm::Construct => self.construct(&root, expr)?,
                QueryForm::Describe => self.describe(&root, expr)?,
            }
        }
        for (node, name) in mem::take(&mut self.pending_names) {
            self.emit(
                &NamedOrBlankNode::from(node),
                sp::VAR_NAME_PROPERTY,
                Literal::new_simple_literal(name),
            )?;
        }
        Ok(root)
    }

    fn ask(&mut self, root: &NamedOrBlankNode, expr: &TupleExpr) -> SpinResult<()> {
        let TupleExpr::Slice {
            arg,
            offset: None,
            limit: Some(1),
        } = expr
        else {
            return Err(SpinError::unsupported(
                "ASK query without the single solution slice",
            ));
        };
        let elements = self.group(arg)?;
        self.emit(root, sp::WHERE_PROPERTY, elements)
    }

    /// Writes a SELECT by peeling the solution modifiers from the top of `expr` in the order
    /// they are nested: slice, distinct or reduced, projection, order, projected
    /// expressions, having and group.
    fn select(&mut self, root: &NamedOrBlankNode, expr: &TupleExpr) -> SpinResult<()> {
        let mut current = expr;
        if let TupleExpr::Slice { arg, offset, limit } = current {
            if let Some(limit) = limit {
                self.emit(root, sp::LIMIT_PROPERTY, integer(i128::from(*limit)))?;
            }
            if let Some(offset) = offset {
                self.emit(root, sp::OFFSET_PROPERTY, integer(i128::from(*offset)))?;
            }
            current = &**arg;
        }
        match current {
            TupleExpr::Distinct(arg) => {
                self.emit(root, sp::DISTINCT_PROPERTY, boolean_true())?;
                current = &**arg;
            }
            TupleExpr::Reduced(arg) => {
                self.emit(root, sp::REDUCED_PROPERTY, boolean_true())?;
                current = &**arg;
            }
            _ => {}
        }
        let mut projection = None;
        if let TupleExpr::Projection { arg, elements } = current {
            projection = Some(elements);
            current = &**arg;
        }
        let mut order = None;
        if let TupleExpr::Order { arg, elements } = current {
            order = Some(elements);
            current = &**arg;
        }
        let mut extensions: &[ExtensionElem] = &[];
        if let (Some(projection), TupleExpr::Extension { arg, elements }) = (projection, current) {
            if elements
                .iter()
                .all(|element| projection.source_of(&element.name).is_some())
            {
                extensions = elements.as_slice();
                current = &**arg;
            }
        }
        let mut having = Vec::new();
        let mut group = None;
        let mut probe = current;
        while let TupleExpr::Filter { arg, condition } = probe {
            having.push(condition);
            probe = &**arg;
        }
        if let TupleExpr::Group {
            arg,
            group_by,
            elements,
        } = probe
        {
            if let Some(element) = elements
                .iter()
                .find(|element| !extensions.iter().any(|e| e.name == element.name))
            {
                return Err(SpinError::unsupported(format!(
                    "Aggregate {} AS {} that is not projected",
                    element.operator, element.name
                )));
            }
            having.reverse();
            group = Some(group_by);
            current = &**arg;
        } else {
            having.clear();
        }

        if let Some(projection) = projection {
            self.result_variables(root, projection, extensions)?;
        }
        let elements = self.group(current)?;
        self.emit(root, sp::WHERE_PROPERTY, elements)?;
        if let Some(group_by) = group {
            if !group_by.is_empty() {
                let mut entries = Vec::with_capacity(group_by.len());
                for name in group_by {
                    entries.push(self.var_node(name)?);
                }
                let list = self.write_list(entries)?;
                self.emit(root, sp::GROUP_BY_PROPERTY, list)?;
            }
        }
        if !having.is_empty() {
            let mut entries = Vec::with_capacity(having.len());
            for condition in having {
                entries.push(self.expression(condition)?);
            }
            let list = self.write_list(entries)?;
            self.emit(root, sp::HAVING_PROPERTY, list)?;
        }
        if let Some(order) = order {
            let mut entries = Vec::with_capacity(order.len());
            for element in order {
                entries.push(self.order_elem(element)?);
            }
            let list = self.write_list(entries)?;
            self.emit(root, sp::ORDER_BY_PROPERTY, list)?;
        }
        Ok(())
    }

    fn result_variables(
        &mut self,
        root: &NamedOrBlankNode,
        projection: &ProjectionElemList,
        extensions: &[ExtensionElem],
    ) -> SpinResult<()> {
        let mut entries = Vec::with_capacity(projection.elements.len());
        for element in &projection.elements {
            if element.source != element.target {
                return Err(SpinError::unsupported(format!(
                    "Renaming projection {element}"
                )));
            }
            let node = self.var_node(&element.target)?;
            if let Some(extension) = extensions.iter().find(|e| e.name == element.source) {
                let expr = self.expression(&extension.expr)?;
                self.emit_on(&node, sp::EXPRESSION_PROPERTY, expr)?;
            }
            entries.push(node);
        }
        let list = self.write_list(entries)?;
        self.emit(root, sp::RESULT_VARIABLES_PROPERTY, list)
    }

    fn order_elem(&mut self, element: &OrderElem) -> SpinResult<Term> {
        let expr = self.expression(&element.expr)?;
        if element.ascending {
            return Ok(expr);
        }
        let node = self.typed_node(sp::DESC_CLASS)?;
        self.emit(&node, sp::EXPRESSION_PROPERTY, expr)?;
        Ok(resource_to_term(node))
    }

    fn construct(&mut self, root: &NamedOrBlankNode, expr: &TupleExpr) -> SpinResult<()> {
        let TupleExpr::Reduced(inner) = expr else {
            return Err(SpinError::unsupported("CONSTRUCT query without Reduced"));
        };
        let (arg, projections) = match &**inner {
            TupleExpr::Projection { arg, elements } => (arg, slice::from_ref(elements)),
            TupleExpr::MultiProjection { arg, projections } => (arg, projections.as_slice()),
            _ => {
                return Err(SpinError::unsupported(
                    "CONSTRUCT query without a template projection",
                ))
            }
        };
        let (arg, constants) = constants(arg)?;

        let mut triples = Vec::with_capacity(projections.len());
        for projection in projections {
            let triple = NamedOrBlankNode::from(BlankNode::default());
            for (target, predicate) in CONSTRUCT_TARGETS {
                let source = projection.source_of(target).ok_or_else(|| {
                    SpinError::unsupported(format!("CONSTRUCT template without {target}"))
                })?;
                let value = match constants.get(source) {
                    Some(value) => (*value).clone(),
                    None => self.var_node(source)?,
                };
                self.emit(&triple, predicate, value)?;
            }
            triples.push(resource_to_term(triple));
        }
        let list = self.write_list(triples)?;
        self.emit(root, sp::TEMPLATES_PROPERTY, list)?;
        let elements = self.group(arg)?;
        self.emit(root, sp::WHERE_PROPERTY, elements)
    }

    fn describe(&mut self, root: &NamedOrBlankNode, expr: &TupleExpr) -> SpinResult<()> {
        let TupleExpr::Describe(inner) = expr else {
            return Err(SpinError::unsupported("DESCRIBE query without Describe"));
        };
        let TupleExpr::Projection { arg, elements } = &**inner else {
            return Err(SpinError::unsupported("DESCRIBE query without a projection"));
        };
        let (arg, constants) = constants(arg)?;
        let mut nodes = Vec::with_capacity(elements.elements.len());
        for element in &elements.elements {
            nodes.push(match constants.get(element.source.as_str()) {
                Some(value) => (*value).clone(),
                None => self.var_node(&element.source)?,
            });
        }
        let list = self.write_list(nodes)?;
        self.emit(root, sp::RESULT_NODES_PROPERTY, list)?;
        if *arg != TupleExpr::SingletonSet {
            let elements = self.group(arg)?;
            self.emit(root, sp::WHERE_PROPERTY, elements)?;
        }
        Ok(())
    }

    /// Writes `expr` as a group graph pattern and returns the head of its element list.
    fn group(&mut self, expr: &TupleExpr) -> SpinResult<Term> {
        let entries = self.group_elements(expr)?;
        self.write_list(entries)
    }

    /// The elements of the group graph pattern that decodes to `expr`.
    fn group_elements(&mut self, expr: &TupleExpr) -> SpinResult<Vec<Term>> {
        if let Some(context) = uniform_context(expr) {
            if self.graph.as_ref() != Some(context) {
                return Ok(vec![self.named_graph(context, expr)?]);
            }
        }
        match expr {
            TupleExpr::SingletonSet => Ok(Vec::new()),
            TupleExpr::Filter { arg, condition } => {
                let mut entries = self.group_elements(arg)?;
                let filter = self.typed_node(sp::FILTER_CLASS)?;
                let condition = self.expression(condition)?;
                self.emit(&filter, sp::EXPRESSION_PROPERTY, condition)?;
                entries.push(resource_to_term(filter));
                Ok(entries)
            }
            TupleExpr::Extension { arg, elements } => {
                let mut entries = match &**arg {
                    TupleExpr::Filter { .. } => vec![self.group(arg)?],
                    _ => self.group_elements(arg)?,
                };
                for element in elements {
                    entries.push(self.bind(element)?);
                }
                Ok(entries)
            }
            TupleExpr::Join { left, right } => {
                let mut entries = self.preceding_elements(left)?;
                entries.push(self.element(right)?);
                Ok(entries)
            }
            TupleExpr::LeftJoin {
                left,
                right,
                condition,
            } => {
                let mut entries = self.preceding_elements(left)?;
                let optional = self.typed_node(sp::OPTIONAL_CLASS)?;
                // Trailing filters of an optional group are read back as its condition.
                let mut elements = match (&**right, condition) {
                    (TupleExpr::Filter { .. }, None) => vec![self.group(right)?],
                    _ => self.group_elements(right)?,
                };
                if let Some(condition) = condition {
                    let filter = self.typed_node(sp::FILTER_CLASS)?;
                    let condition = self.expression(condition)?;
                    self.emit(&filter, sp::EXPRESSION_PROPERTY, condition)?;
                    elements.push(resource_to_term(filter));
                }
                let elements = self.write_list(elements)?;
                self.emit(&optional, sp::ELEMENTS_PROPERTY, elements)?;
                entries.push(resource_to_term(optional));
                Ok(entries)
            }
            TupleExpr::Difference { left, right } => {
                let mut entries = self.preceding_elements(left)?;
                let minus = self.typed_node(sp::MINUS_CLASS)?;
                let elements = self.group(right)?;
                self.emit(&minus, sp::ELEMENTS_PROPERTY, elements)?;
                entries.push(resource_to_term(minus));
                Ok(entries)
            }
            other => Ok(vec![self.element(other)?]),
        }
    }

    /// The elements of the left operand of a join. Filters and binds are only applied at
    /// the end of a group, so such an operand becomes a nested group.
    fn preceding_elements(&mut self, left: &TupleExpr) -> SpinResult<Vec<Term>> {
        match left {
            TupleExpr::Filter { .. } | TupleExpr::Extension { .. } => Ok(vec![self.group(left)?]),
            _ => self.group_elements(left),
        }
    }

    /// Writes `expr` as a single group element.
    fn element(&mut self, expr: &TupleExpr) -> SpinResult<Term> {
        if let Some(context) = uniform_context(expr) {
            if self.graph.as_ref() != Some(context) {
                return self.named_graph(context, expr);
            }
        }
        match expr {
            TupleExpr::StatementPattern(pattern) => self.triple_pattern(pattern),
            TupleExpr::ArbitraryLengthPath(path) => self.triple_path(path),
            TupleExpr::Union { left, right } => {
                let union = self.typed_node(sp::UNION_CLASS)?;
                let branches = vec![self.group(left)?, self.group(right)?];
                let branches = self.write_list(branches)?;
                self.emit(&union, sp::ELEMENTS_PROPERTY, branches)?;
                Ok(resource_to_term(union))
            }
            TupleExpr::BindingSetAssignment(values) => self.values(values),
            TupleExpr::Service(service) => self.service(service),
            expr if is_sub_query(expr) => {
                let sub_query = self.typed_node(sp::SUB_QUERY_CLASS)?;
                let query = self.typed_node(sp::SELECT_CLASS)?;
                self.select(&query, expr)?;
                self.emit(&sub_query, sp::QUERY_PROPERTY, resource_to_term(query))?;
                Ok(resource_to_term(sub_query))
            }
            TupleExpr::MultiProjection { .. } | TupleExpr::Describe(_) => Err(
                SpinError::unsupported("CONSTRUCT or DESCRIBE nested in a graph pattern"),
            ),
            other => self.group(other),
        }
    }

    fn named_graph(&mut self, context: &Var, expr: &TupleExpr) -> SpinResult<Term> {
        let named_graph = self.typed_node(sp::NAMED_GRAPH_CLASS)?;
        let graph = self.var_term(context)?;
        self.emit(&named_graph, sp::GRAPH_NAME_NODE_PROPERTY, graph)?;
        let outer = mem::replace(&mut self.graph, Some(context.clone()));
        let elements = self.group(expr);
        self.graph = outer;
        self.emit(&named_graph, sp::ELEMENTS_PROPERTY, elements?)?;
        Ok(resource_to_term(named_graph))
    }

    fn check_context(&self, context: Option<&Var>) -> SpinResult<()> {
        if context == self.graph.as_ref() {
            return Ok(());
        }
        Err(SpinError::unsupported(
            "Pattern of the default graph nested in a named graph",
        ))
    }

    fn triple_pattern(&mut self, pattern: &StatementPattern) -> SpinResult<Term> {
        self.check_context(pattern.context.as_ref())?;
        let triple = self.typed_node(sp::TRIPLE_PATTERN_CLASS)?;
        let subject = self.var_term(&pattern.subject)?;
        self.emit(&triple, sp::SUBJECT_PROPERTY, subject)?;
        let predicate = self.var_term(&pattern.predicate)?;
        self.emit(&triple, sp::PREDICATE_PROPERTY, predicate)?;
        let object = self.var_term(&pattern.object)?;
        self.emit(&triple, sp::OBJECT_PROPERTY, object)?;
        Ok(resource_to_term(triple))
    }

    fn triple_path(&mut self, path: &ArbitraryLengthPath) -> SpinResult<Term> {
        self.check_context(path.context.as_ref())?;
        let TupleExpr::StatementPattern(step) = &*path.path else {
            return Err(SpinError::unsupported(
                "Arbitrary length path over a complex path",
            ));
        };
        let triple = self.typed_node(sp::TRIPLE_PATH_CLASS)?;
        let subject = self.var_term(&path.subject)?;
        self.emit(&triple, sp::SUBJECT_PROPERTY, subject)?;
        let mod_path = self.typed_node(sp::MOD_PATH_CLASS)?;
        let sub_path = self.var_term(&step.predicate)?;
        self.emit(&mod_path, sp::SUB_PATH_PROPERTY, sub_path)?;
        self.emit(
            &mod_path,
            sp::MOD_MIN_PROPERTY,
            integer(i128::from(path.min_length)),
        )?;
        self.emit(&mod_path, sp::MOD_MAX_PROPERTY, integer(-2))?;
        self.emit(&triple, sp::PATH_PROPERTY, resource_to_term(mod_path))?;
        let object = self.var_term(&path.object)?;
        self.emit(&triple, sp::OBJECT_PROPERTY, object)?;
        Ok(resource_to_term(triple))
    }

    fn values(&mut self, values: &BindingSetAssignment) -> SpinResult<Term> {
        let node = self.typed_node(sp::VALUES_CLASS)?;
        let names = values
            .binding_names
            .iter()
            .map(|name| Literal::new_simple_literal(name).into())
            .collect();
        let names = self.write_list(names)?;
        self.emit(&node, sp::VAR_NAMES_PROPERTY, names)?;

        let mut rows = Vec::with_capacity(values.rows.len());
        for row in &values.rows {
            let cells = values
                .binding_names
                .iter()
                .map(|name| {
                    row.get(name)
                        .cloned()
                        .unwrap_or_else(|| sp::UNDEF.into_owned().into())
                })
                .collect();
            rows.push(self.write_list(cells)?);
        }
        let rows = self.write_list(rows)?;
        self.emit(&node, sp::BINDINGS_PROPERTY, rows)?;
        Ok(resource_to_term(node))
    }

    fn service(&mut self, service: &Service) -> SpinResult<Term> {
        let node = self.typed_node(sp::SERVICE_CLASS)?;
        let uri = self.var_term(&service.service)?;
        self.emit(&node, sp::SERVICE_URI_PROPERTY, uri)?;
        if service.silent {
            self.emit(&node, sp::SILENT_PROPERTY, boolean_true())?;
        }
        let elements = self.group(&service.arg)?;
        self.emit(&node, sp::ELEMENTS_PROPERTY, elements)?;
        Ok(resource_to_term(node))
    }

    fn bind(&mut self, element: &ExtensionElem) -> SpinResult<Term> {
        let bind = self.typed_node(sp::BIND_CLASS)?;
        let variable = self.var_node(&element.name)?;
        self.emit(&bind, sp::VARIABLE_PROPERTY, variable)?;
        let expr = self.expression(&element.expr)?;
        self.emit(&bind, sp::EXPRESSION_PROPERTY, expr)?;
        Ok(resource_to_term(bind))
    }

    fn expression(&mut self, expr: &ValueExpr) -> SpinResult<Term> {
        match expr {
            ValueExpr::Var(var) => self.var_term(var),
            ValueExpr::Constant(value) => Ok(value.clone()),
            ValueExpr::Compare { op, left, right } => {
                self.operator(compare_class(*op), &[&**left, &**right])
            }
            ValueExpr::Math { op, left, right } => {
                self.operator(math_class(*op), &[&**left, &**right])
            }
            ValueExpr::And(left, right) => self.operator(sp::AND, &[&**left, &**right]),
            ValueExpr::Or(left, right) => self.operator(sp::OR, &[&**left, &**right]),
            ValueExpr::Not(inner) => match &**inner {
                ValueExpr::Exists(pattern) => self.exists(sp::NOT_EXISTS, pattern),
                _ => self.operator(sp::NOT, &[&**inner]),
            },
            ValueExpr::Exists(pattern) => self.exists(sp::EXISTS, pattern),
            ValueExpr::Bound(var) => self.operator(sp::BOUND, &[&ValueExpr::Var(var.clone())]),
            ValueExpr::If {
                condition,
                then,
                otherwise,
            } => self.operator(sp::IF, &[&**condition, &**then, &**otherwise]),
            ValueExpr::Coalesce(args) => {
                self.operator(sp::COALESCE, &args.iter().collect::<Vec<_>>())
            }
            ValueExpr::IsUri(inner) => self.operator(sp::IS_IRI, &[&**inner]),
            ValueExpr::IsBNode(inner) => self.operator(sp::IS_BLANK, &[&**inner]),
            ValueExpr::IsLiteral(inner) => self.operator(sp::IS_LITERAL, &[&**inner]),
            ValueExpr::IsNumeric(inner) => self.operator(sp::IS_NUMERIC, &[&**inner]),
            ValueExpr::Str(inner) => self.operator(sp::STR, &[&**inner]),
            ValueExpr::Lang(inner) => self.operator(sp::LANG, &[&**inner]),
            ValueExpr::Datatype(inner) => self.operator(sp::DATATYPE, &[&**inner]),
            ValueExpr::Iri(inner) => self.operator(sp::IRI, &[&**inner]),
            ValueExpr::BNode(None) => self.operator(sp::BNODE, &[]),
            ValueExpr::BNode(Some(inner)) => self.operator(sp::BNODE, &[&**inner]),
            ValueExpr::Regex {
                arg,
                pattern,
                flags: None,
            } => self.operator(sp::REGEX, &[&**arg, &**pattern]),
            ValueExpr::Regex {
                arg,
                pattern,
                flags: Some(flags),
            } => self.operator(sp::REGEX, &[&**arg, &**pattern, &**flags]),
            ValueExpr::LocalName(inner) => self.operator(afn::LOCALNAME, &[&**inner]),
            ValueExpr::FunctionCall { name, args } => {
                let function = match self.well_known_functions.iri_of(name) {
                    Some(iri) => iri.into_owned(),
                    None => NamedNode::new(name.as_str()).map_err(|error| {
                        SpinError::unsupported(format!(
                            "Function {name} is neither well-known nor an IRI: {error}"
                        ))
                    })?,
                };
                self.operator(function.as_ref(), &args.iter().collect::<Vec<_>>())
            }
            ValueExpr::Aggregate(aggregate) => self.aggregate(aggregate),
        }
    }

    /// Writes an operator node of type `class` with its operands as `sp:arg1`, `sp:arg2`, …
    fn operator(&mut self, class: NamedNodeRef<'_>, args: &[&ValueExpr]) -> SpinResult<Term> {
        let node = self.typed_node(class)?;
        for (index, arg) in args.iter().enumerate() {
            let value = self.expression(arg)?;
            self.emit(&node, sp::arg(index + 1).as_ref(), value)?;
        }
        Ok(resource_to_term(node))
    }

    fn exists(&mut self, class: NamedNodeRef<'_>, pattern: &TupleExpr) -> SpinResult<Term> {
        let node = self.typed_node(class)?;
        let elements = self.group(pattern)?;
        self.emit(&node, sp::ELEMENTS_PROPERTY, elements)?;
        Ok(resource_to_term(node))
    }

    fn aggregate(&mut self, aggregate: &AggregateExpr) -> SpinResult<Term> {
        let node = self.typed_node(aggregate_class(aggregate.function))?;
        if aggregate.distinct {
            self.emit(&node, sp::DISTINCT_PROPERTY, boolean_true())?;
        }
        if let Some(arg) = &aggregate.arg {
            let value = self.expression(arg)?;
            self.emit(&node, sp::EXPRESSION_PROPERTY, value)?;
        }
        Ok(resource_to_term(node))
    }

    /// The term of a variable slot: the constant it holds or the node of the variable.
    fn var_term(&mut self, var: &Var) -> SpinResult<Term> {
        match var.value() {
            Some(value) => Ok(value.clone()),
            None => self.var_node(var.name()),
        }
    }

    /// The node of the variable `name`: its well-known IRI, or a blank node that is the
    /// same for every use of `name` in this rendering.
    fn var_node(&mut self, name: &str) -> SpinResult<Term> {
        if let Some(node) = self.var_nodes.get(name) {
            return Ok(node.clone());
        }
        let node: Term = match self.well_known_vars.iri_of(name) {
            Some(iri) => iri.into_owned().into(),
            None => {
                let node = BlankNode::default();
                self.pending_names.push((node.clone(), name.to_owned()));
                node.into()
            }
        };
        trace!("Variable ?{name} is rendered as {node}");
        self.var_nodes.insert(name.to_owned(), node.clone());
        Ok(node)
    }

    /// Writes the RDF list of `entries` and returns its head.
    fn write_list(&mut self, entries: Vec<Term>) -> SpinResult<Term> {
        let mut rest: Term = rdf::NIL.into_owned().into();
        for entry in entries.into_iter().rev() {
            let node = NamedOrBlankNode::from(BlankNode::default());
            self.emit(&node, rdf::FIRST, entry)?;
            self.emit(&node, rdf::REST, rest)?;
            rest = resource_to_term(node);
        }
        Ok(rest)
    }

    fn typed_node(&mut self, class: NamedNodeRef<'_>) -> SpinResult<NamedOrBlankNode> {
        let node = NamedOrBlankNode::from(BlankNode::default());
        self.emit(&node, rdf::TYPE, class.into_owned())?;
        Ok(node)
    }

    /// Emits a statement about a node given as a term. Literals cannot be subjects.
    fn emit_on(
        &mut self,
        subject: &Term,
        predicate: NamedNodeRef<'_>,
        object: Term,
    ) -> SpinResult<()> {
        let subject = match subject {
            Term::NamedNode(node) => NamedOrBlankNode::from(node.clone()),
            Term::BlankNode(node) => NamedOrBlankNode::from(node.clone()),
            Term::Literal(_) => {
                return Err(SpinError::unsupported(format!(
                    "Literal {subject} as the subject of {predicate}"
                )))
            }
        };
        self.emit(&subject, predicate, object)
    }

    fn emit(
        &mut self,
        subject: &NamedOrBlankNode,
        predicate: NamedNodeRef<'_>,
        object: impl Into<Term>,
    ) -> SpinResult<()> {
        self.sink.handle(Triple::new(
            resource_to_subject(subject.clone()),
            predicate,
            object,
        ))?;
        Ok(())
    }
}
