use super::SpinParser;
use crate::operators::{aggregate_function, compare_op, math_op, CONSTRUCT_TARGETS};
use crate::statements;
use crate::{SpinError, SpinResult};
use itertools::Itertools;
use rdf_spin_algebra::{
    AggregateExpr, AggregateFunction, ArbitraryLengthPath, BindingSet, BindingSetAssignment,
    ExtensionElem, GroupElem, OrderElem, ProjectionElem, ProjectionElemList, QueryForm, Service,
    StatementPattern, TupleExpr, ValueExpr, Var,
};
use rdf_spin_common::TripleSource;
use rdf_spin_model::vocab::{afn, rdf, rdfs, sp, spin};
use rdf_spin_model::{
    local_name, resource_to_term, term_to_resource, NamedNode, NamedNodeRef, NamedOrBlankNode,
    NamedOrBlankNodeRef, Term,
};
use std::collections::{HashMap, HashSet};
use std::mem;
use tracing::trace;

/// Types that say nothing about the operator of an expression node.
const IGNORED_EXPRESSION_TYPES: [NamedNodeRef<'static>; 3] =
    [rdf::PROPERTY, rdfs::RESOURCE, rdfs::CLASS];

fn has(types: &[NamedNode], class: NamedNodeRef<'_>) -> bool {
    types.iter().any(|candidate| candidate.as_ref() == class)
}

fn is_undef(value: &Term) -> bool {
    matches!(value, Term::NamedNode(iri) if iri.as_ref() == sp::UNDEF)
}

/// Decodes the RDF structure of one query.
///
/// Variable names are resolved once per decoder, so all nodes denoting the same variable
/// within the query (including its sub-queries) decode to the same name.
pub(super) struct QueryDecoder<'a> {
    parser: &'a SpinParser,
    store: &'a dyn TripleSource,
    depth: usize,
    /// The groups and expressions currently being decoded.
    open: HashSet<Term>,
    var_names: HashMap<NamedOrBlankNode, String>,
    /// The named graph of the patterns being decoded.
    graph: Option<Var>,
}

impl<'a> QueryDecoder<'a> {
    pub(super) fn new(parser: &'a SpinParser, store: &'a dyn TripleSource, depth: usize) -> Self {
        Self {
            parser,
            store,
            depth,
            open: HashSet::new(),
            var_names: HashMap::new(),
            graph: None,
        }
    }

    pub(super) fn query(
        &mut self,
        query: NamedOrBlankNodeRef<'_>,
        form: QueryForm,
    ) -> SpinResult<TupleExpr> {
        trace!("Decoding the RDF structure of {form} query {query}");
        match form {
            QueryForm::Ask => Ok(self.where_clause(query)?.slice(None, Some(1))),
            QueryForm::Select => self.select(query),
            QueryForm::Construct => self.construct(query),
            QueryForm::Describe => self.describe(query),
        }
    }

    fn select(&mut self, select: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let mut projection = None;
        let mut extensions = Vec::new();
        let mut aggregates = Vec::new();
        if let Some(head) = self.value(select, sp::RESULT_VARIABLES_PROPERTY)? {
            let mut elements = Vec::new();
            for item in self.list(&head)? {
                let (name, expr) = self.projection_var(&item)?;
                if let Some(expr) = expr {
                    expr.for_each_aggregate(&mut |aggregate| {
                        aggregates.push(GroupElem {
                            name: name.clone(),
                            operator: aggregate.clone(),
                        });
                    });
                    extensions.push(ExtensionElem::new(name.clone(), expr));
                }
                elements.push(ProjectionElem::same(name));
            }
            projection = Some(ProjectionElemList::new(elements));
        }

        let mut expr = self.where_clause(select)?;

        let group_by = match self.value(select, sp::GROUP_BY_PROPERTY)? {
            Some(head) => self.group_by(&head)?,
            None => Vec::new(),
        };
        let mut having = Vec::new();
        if let Some(head) = self.value(select, sp::HAVING_PROPERTY)? {
            for condition in self.list(&head)? {
                having.push(self.expression(&condition)?);
            }
        }
        if !group_by.is_empty() || !aggregates.is_empty() || !having.is_empty() {
            expr = expr.group(group_by, aggregates);
        }
        for condition in having {
            expr = expr.filter(condition);
        }
        if !extensions.is_empty() {
            expr = expr.extend(extensions);
        }

        if let Some(head) = self.value(select, sp::ORDER_BY_PROPERTY)? {
            let mut elements = Vec::new();
            for item in self.list(&head)? {
                elements.push(self.order_elem(&item)?);
            }
            if !elements.is_empty() {
                expr = expr.order(elements);
            }
        }
        if let Some(projection) = projection {
            expr = expr.project(projection);
        }

        let distinct = statements::boolean_value(self.store, select, sp::DISTINCT_PROPERTY)?;
        let reduced = statements::boolean_value(self.store, select, sp::REDUCED_PROPERTY)?;
        expr = match (distinct, reduced) {
            (true, true) => {
                return Err(SpinError::malformed_at(
                    select,
                    "Query is both DISTINCT and REDUCED",
                ))
            }
            (true, false) => TupleExpr::Distinct(Box::new(expr)),
            (false, true) => TupleExpr::Reduced(Box::new(expr)),
            (false, false) => expr,
        };

        let offset = self.non_negative_integer(select, sp::OFFSET_PROPERTY)?;
        let limit = self.non_negative_integer(select, sp::LIMIT_PROPERTY)?;
        if offset.is_some() || limit.is_some() {
            expr = expr.slice(offset, limit);
        }
        Ok(expr)
    }

    /// Returns the name of a result variable and the expression it is bound to.
    fn projection_var(&mut self, item: &Term) -> SpinResult<(String, Option<ValueExpr>)> {
        let var = self.resource(item, "Result variable is not a resource")?;
        let name = self.var_name(var.as_ref())?.ok_or_else(|| {
            SpinError::malformed_at(var.as_ref(), "Result variable has no variable name")
        })?;
        let expr = match self.value(var.as_ref(), sp::EXPRESSION_PROPERTY)? {
            Some(value) => Some(self.expression(&value)?),
            None => None,
        };
        Ok((name, expr))
    }

    fn group_by(&mut self, head: &Term) -> SpinResult<Vec<String>> {
        let mut names = Vec::new();
        for item in self.list(head)? {
            let name = match term_to_resource(&item) {
                Some(resource) => self.var_name(resource.as_ref())?,
                None => None,
            };
            names.push(name.ok_or_else(|| {
                SpinError::unsupported(format!("GROUP BY on {item}, only variables are supported"))
            })?);
        }
        Ok(names)
    }

    fn order_elem(&mut self, item: &Term) -> SpinResult<OrderElem> {
        if let Some(entry) = term_to_resource(item) {
            for (class, ascending) in [(sp::ASC_CLASS, true), (sp::DESC_CLASS, false)] {
                if statements::has_type(self.store, entry.as_ref(), class)? {
                    let value = self.required_value(entry.as_ref(), sp::EXPRESSION_PROPERTY)?;
                    return Ok(OrderElem {
                        expr: self.expression(&value)?,
                        ascending,
                    });
                }
            }
        }
        Ok(OrderElem {
            expr: self.expression(item)?,
            ascending: true,
        })
    }

    fn construct(&mut self, construct: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let head = self.required_value(construct, sp::TEMPLATES_PROPERTY)?;
        let mut projections = Vec::new();
        let mut constants = Vec::new();
        for triple in self.list(&head)? {
            let triple = self.resource(&triple, "Template triple is not a resource")?;
            let mut elements = Vec::with_capacity(CONSTRUCT_TARGETS.len());
            for (target, predicate) in CONSTRUCT_TARGETS {
                let value = self.required_value(triple.as_ref(), predicate)?;
                let source = self.projection_source(&value, &mut constants)?;
                elements.push(ProjectionElem::new(source, target));
            }
            projections.push(ProjectionElemList::new(elements));
        }

        let mut expr = self.where_clause(construct)?;
        if !constants.is_empty() {
            expr = expr.extend(constants);
        }
        let expr = match <[ProjectionElemList; 1]>::try_from(projections) {
            Ok([projection]) => expr.project(projection),
            Err(projections) => TupleExpr::MultiProjection {
                arg: Box::new(expr),
                projections,
            },
        };
        Ok(TupleExpr::Reduced(Box::new(expr)))
    }

    fn describe(&mut self, describe: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let mut elements = Vec::new();
        let mut constants = Vec::new();
        if let Some(head) = self.value(describe, sp::RESULT_NODES_PROPERTY)? {
            for item in self.list(&head)? {
                let source = self.projection_source(&item, &mut constants)?;
                elements.push(ProjectionElem::same(source));
            }
        }
        let mut expr = match self.value(describe, sp::WHERE_PROPERTY)? {
            Some(head) => self.group(&head)?,
            None => TupleExpr::SingletonSet,
        };
        if !constants.is_empty() {
            expr = expr.extend(constants);
        }
        Ok(TupleExpr::Describe(Box::new(
            expr.project(ProjectionElemList::new(elements)),
        )))
    }

    /// The name projected for `value`: its variable name, or the name of a constant bound
    /// by one of `constants`.
    fn projection_source(
        &mut self,
        value: &Term,
        constants: &mut Vec<ExtensionElem>,
    ) -> SpinResult<String> {
        if let Some(resource) = term_to_resource(value) {
            if let Some(name) = self.var_name(resource.as_ref())? {
                return Ok(name);
            }
        }
        let name = Var::constant_name(value);
        if !constants.iter().any(|constant| constant.name == name) {
            constants.push(ExtensionElem::new(
                name.clone(),
                ValueExpr::Constant(value.clone()),
            ));
        }
        Ok(name)
    }

    fn where_clause(&mut self, query: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let head = self.required_value(query, sp::WHERE_PROPERTY)?;
        self.group(&head)
    }

    /// Decodes the group graph pattern whose elements are the list at `head`.
    fn group(&mut self, head: &Term) -> SpinResult<TupleExpr> {
        self.nested(head, |this| this.group_elements(head))
    }

    fn group_elements(&mut self, head: &Term) -> SpinResult<TupleExpr> {
        let (expr, conditions) = self.unfiltered_group_elements(head)?;
        Ok(conditions.into_iter().fold(expr, TupleExpr::filter))
    }

    /// Decodes the group at `head` without its filters and returns the filter conditions
    /// in list order.
    fn unfiltered_group_elements(
        &mut self,
        head: &Term,
    ) -> SpinResult<(TupleExpr, Vec<ValueExpr>)> {
        let mut filters = Vec::new();
        let mut binds = Vec::new();
        let mut patterns = Vec::new();
        for item in self.list(head)? {
            let element = self.resource(&item, "Graph pattern element is not a resource")?;
            let types = statements::types(self.store, element.as_ref())?;
            if has(&types, sp::FILTER_CLASS) {
                filters.push(element);
            } else if has(&types, sp::BIND_CLASS) {
                binds.push(element);
            } else {
                patterns.push((element, types));
            }
        }

        let mut expr = TupleExpr::SingletonSet;
        for (element, types) in patterns {
            expr = self.pattern_element(expr, element.as_ref(), &types)?;
        }
        for bind in binds {
            let bind = bind.as_ref();
            let variable = self.required_resource(bind, sp::VARIABLE_PROPERTY)?;
            let name = self
                .var_name(variable.as_ref())?
                .ok_or_else(|| SpinError::malformed_at(bind, "BIND target is not a variable"))?;
            let value = self.required_value(bind, sp::EXPRESSION_PROPERTY)?;
            let value = self.expression(&value)?;
            expr = expr.extend(vec![ExtensionElem::new(name, value)]);
        }
        let mut conditions = Vec::with_capacity(filters.len());
        for filter in filters {
            let condition = self.required_value(filter.as_ref(), sp::EXPRESSION_PROPERTY)?;
            conditions.push(self.expression(&condition)?);
        }
        Ok((expr, conditions))
    }

    /// Adds the pattern `element` to `current`, the patterns preceding it in its group.
    fn pattern_element(
        &mut self,
        current: TupleExpr,
        element: NamedOrBlankNodeRef<'_>,
        types: &[NamedNode],
    ) -> SpinResult<TupleExpr> {
        let owned = element.into_owned();
        if statements::is_list(self.store, &owned)? {
            let nested = self.group(&resource_to_term(owned))?;
            return Ok(current.join(nested));
        }
        if self.value(element, sp::PREDICATE_PROPERTY)?.is_some() {
            let pattern = self.triple_pattern(element)?;
            return Ok(current.join(pattern));
        }
        let pattern = if has(types, sp::TRIPLE_PATH_CLASS) {
            self.triple_path(element)?
        } else if has(types, sp::UNION_CLASS) {
            self.union(element)?
        } else if has(types, sp::OPTIONAL_CLASS) {
            return self.optional(current, element);
        } else if has(types, sp::MINUS_CLASS) {
            let minus = self.elements(element)?;
            return Ok(current.difference(minus));
        } else if has(types, sp::NAMED_GRAPH_CLASS) {
            self.named_graph(element)?
        } else if has(types, sp::SUB_QUERY_CLASS) {
            let query = self.required_resource(element, sp::QUERY_PROPERTY)?;
            let key = resource_to_term(query.clone());
            self.nested(&key, |this| this.select(query.as_ref()))?
        } else if has(types, sp::VALUES_CLASS) {
            self.values(element)?
        } else if has(types, sp::SERVICE_CLASS) {
            self.service(element)?
        } else {
            return Err(SpinError::unsupported(format!(
                "Graph pattern element {element} of types [{}]",
                types.iter().join(", ")
            )));
        };
        Ok(current.join(pattern))
    }

    /// Left joins `current` with the group of the `sp:Optional` element `optional`. The last
    /// filter of that group becomes the condition of the left join.
    fn optional(
        &mut self,
        current: TupleExpr,
        optional: NamedOrBlankNodeRef<'_>,
    ) -> SpinResult<TupleExpr> {
        let head = self.required_value(optional, sp::ELEMENTS_PROPERTY)?;
        let (right, mut conditions) =
            self.nested(&head, |this| this.unfiltered_group_elements(&head))?;
        let condition = conditions.pop();
        let right = conditions.into_iter().fold(right, TupleExpr::filter);
        Ok(current.left_join_with(right, condition))
    }

    /// The group in the `sp:elements` of `element`.
    fn elements(&mut self, element: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let head = self.required_value(element, sp::ELEMENTS_PROPERTY)?;
        self.group(&head)
    }

    fn triple_pattern(&mut self, triple: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let subject = self.required_value(triple, sp::SUBJECT_PROPERTY)?;
        let predicate = self.required_value(triple, sp::PREDICATE_PROPERTY)?;
        let object = self.required_value(triple, sp::OBJECT_PROPERTY)?;
        Ok(TupleExpr::StatementPattern(
            StatementPattern::new(
                self.pattern_var(&subject)?,
                self.pattern_var(&predicate)?,
                self.pattern_var(&object)?,
            )
            .with_context(self.graph.clone()),
        ))
    }

    fn triple_path(&mut self, triple: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let subject = self.required_value(triple, sp::SUBJECT_PROPERTY)?;
        let subject = self.pattern_var(&subject)?;
        let object = self.required_value(triple, sp::OBJECT_PROPERTY)?;
        let object = self.pattern_var(&object)?;
        let path = self.required_resource(triple, sp::PATH_PROPERTY)?;
        let path = path.as_ref();
        if !statements::has_type(self.store, path, sp::MOD_PATH_CLASS)? {
            return Err(SpinError::unsupported(format!(
                "Property path {path}, only sp:ModPath is supported"
            )));
        }
        let max = self.required_value(path, sp::MOD_MAX_PROPERTY)?;
        let max = statements::integer_value(path, &max)?;
        if max != -2 {
            return Err(SpinError::unsupported(format!(
                "Property path with sp:modMax {max}, only arbitrary length paths are supported"
            )));
        }
        let min = self.required_value(path, sp::MOD_MIN_PROPERTY)?;
        let min_length = u64::try_from(statements::integer_value(path, &min)?)
            .map_err(|_| SpinError::malformed_at(path, "Negative sp:modMin"))?;
        let sub_path = self.required_value(path, sp::SUB_PATH_PROPERTY)?;
        let predicate = self.pattern_var(&sub_path)?;
        if matches!(predicate.value(), Some(Term::BlankNode(_))) {
            return Err(SpinError::unsupported(format!(
                "Nested property path {sub_path}"
            )));
        }

        let context = self.graph.clone();
        let step = StatementPattern::new(subject.clone(), predicate, object.clone())
            .with_context(context.clone());
        Ok(TupleExpr::ArbitraryLengthPath(ArbitraryLengthPath {
            subject,
            path: Box::new(TupleExpr::StatementPattern(step)),
            object,
            context,
            min_length,
        }))
    }

    fn union(&mut self, element: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let head = self.required_value(element, sp::ELEMENTS_PROPERTY)?;
        let mut union: Option<TupleExpr> = None;
        for group in self.list(&head)? {
            let branch = self.group(&group)?;
            union = Some(match union {
                Some(left) => left.union(branch),
                None => branch,
            });
        }
        union.ok_or_else(|| SpinError::malformed_at(element, "UNION without elements"))
    }

    fn named_graph(&mut self, element: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let graph = self.required_value(element, sp::GRAPH_NAME_NODE_PROPERTY)?;
        let graph = self.pattern_var(&graph)?;
        let head = self.required_value(element, sp::ELEMENTS_PROPERTY)?;
        let outer = mem::replace(&mut self.graph, Some(graph));
        let result = self.group(&head);
        self.graph = outer;
        result
    }

    fn values(&mut self, element: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let head = self.required_value(element, sp::VAR_NAMES_PROPERTY)?;
        let mut binding_names = Vec::new();
        for name in self.list(&head)? {
            match name {
                Term::Literal(name) => binding_names.push(name.value().to_owned()),
                other => {
                    return Err(SpinError::malformed(
                        Some(other),
                        "VALUES variable name is not a literal",
                    ))
                }
            }
        }

        let head = self.required_value(element, sp::BINDINGS_PROPERTY)?;
        let mut rows = Vec::new();
        for row in self.list(&head)? {
            let values = self.list(&row)?;
            if values.len() != binding_names.len() {
                return Err(SpinError::malformed_at(
                    element,
                    format!(
                        "VALUES row with {} values for {} variables",
                        values.len(),
                        binding_names.len()
                    ),
                ));
            }
            rows.push(
                binding_names
                    .iter()
                    .zip(values)
                    .filter(|(_, value)| !is_undef(value))
                    .map(|(name, value)| (name.clone(), value))
                    .collect::<BindingSet>(),
            );
        }
        Ok(TupleExpr::BindingSetAssignment(BindingSetAssignment {
            binding_names,
            rows,
        }))
    }

    fn service(&mut self, element: NamedOrBlankNodeRef<'_>) -> SpinResult<TupleExpr> {
        let service = self.required_value(element, sp::SERVICE_URI_PROPERTY)?;
        let service = self.pattern_var(&service)?;
        let arg = self.elements(element)?;
        let silent = statements::boolean_value(self.store, element, sp::SILENT_PROPERTY)?;
        Ok(TupleExpr::Service(Service {
            service,
            arg: Box::new(arg),
            silent,
        }))
    }

    /// The variable in a pattern position: a named variable or a constant.
    fn pattern_var(&mut self, value: &Term) -> SpinResult<Var> {
        if let Some(resource) = term_to_resource(value) {
            if let Some(name) = self.var_name(resource.as_ref())? {
                return Ok(Var::new(name));
            }
        }
        Ok(Var::constant(value.clone()))
    }

    /// Resolves the variable name of `resource`: memoized names first, then the
    /// well-known variables, then `sp:varName`.
    fn var_name(&mut self, resource: NamedOrBlankNodeRef<'_>) -> SpinResult<Option<String>> {
        let owned = resource.into_owned();
        if let Some(name) = self.var_names.get(&owned) {
            return Ok(Some(name.clone()));
        }
        let well_known = match resource {
            NamedOrBlankNodeRef::NamedNode(iri) => self
                .parser
                .well_known_vars
                .name_of(iri.as_str())
                .map(str::to_owned),
            NamedOrBlankNodeRef::BlankNode(_) => None,
        };
        let name = match well_known {
            Some(name) => Some(name),
            None => statements::single_literal(self.store, resource, sp::VAR_NAME_PROPERTY)?
                .map(|name| name.value().to_owned()),
        };
        if let Some(name) = &name {
            self.var_names.insert(owned, name.clone());
        }
        Ok(name)
    }

    fn expression(&mut self, value: &Term) -> SpinResult<ValueExpr> {
        let node = match value {
            Term::BlankNode(node) => NamedOrBlankNode::from(node.clone()),
            Term::NamedNode(iri) => {
                return Ok(match self.var_name(iri.as_ref().into())? {
                    Some(name) => ValueExpr::var(name),
                    None => ValueExpr::Constant(value.clone()),
                });
            }
            Term::Literal(_) => return Ok(ValueExpr::Constant(value.clone())),
        };
        if let Some(name) = self.var_name(node.as_ref())? {
            return Ok(ValueExpr::var(name));
        }
        self.nested(value, |this| this.operator_expression(node.as_ref()))
    }

    fn operator_expression(&mut self, node: NamedOrBlankNodeRef<'_>) -> SpinResult<ValueExpr> {
        let mut types = statements::types(self.store, node)?
            .into_iter()
            .filter(|class| {
                !IGNORED_EXPRESSION_TYPES
                    .iter()
                    .any(|ignored| *ignored == class.as_ref())
            })
            .collect::<Vec<_>>();
        if types.is_empty() {
            return Ok(ValueExpr::Constant(resource_to_term(node.into_owned())));
        }
        if types.len() > 1 {
            self.disambiguate(&mut types)?;
        }
        match types.as_slice() {
            [function] => self.call(node, function.as_ref()),
            [] => Err(SpinError::malformed_at(node, "Missing RDF type for expression")),
            _ => Err(SpinError::malformed_at(
                node,
                format!(
                    "Ambiguous RDF types for expression: {}",
                    types.iter().join(", ")
                ),
            )),
        }
    }

    /// Drops the marker and abstract classes from the types of an expression node.
    fn disambiguate(&self, types: &mut Vec<NamedNode>) -> SpinResult<()> {
        if has(types, spin::FUNCTIONS_CLASS) {
            types.retain(|class| {
                class.as_ref() != spin::FUNCTIONS_CLASS && class.as_ref() != spin::MODULES_CLASS
            });
            if types.len() > 1 {
                let mut concrete = Vec::new();
                for class in mem::take(types) {
                    if !statements::boolean_value(
                        self.store,
                        class.as_ref().into(),
                        spin::ABSTRACT_PROPERTY,
                    )? {
                        concrete.push(class);
                    }
                }
                *types = concrete;
            }
        } else if has(types, sp::AGGREGATION_CLASS) {
            types.retain(|class| {
                class.as_ref() != sp::AGGREGATION_CLASS && class.as_ref() != sp::SYSTEM_CLASS
            });
        }
        Ok(())
    }

    fn call(
        &mut self,
        node: NamedOrBlankNodeRef<'_>,
        function: NamedNodeRef<'_>,
    ) -> SpinResult<ValueExpr> {
        if let Some(aggregate) = aggregate_function(function) {
            return self.aggregate(node, aggregate);
        }
        if function == sp::EXISTS || function == sp::NOT_EXISTS {
            let exists = ValueExpr::Exists(Box::new(self.elements(node)?));
            return Ok(if function == sp::EXISTS {
                exists
            } else {
                ValueExpr::Not(Box::new(exists))
            });
        }

        let args = self.arguments(node)?;
        if let Some(op) = compare_op(function) {
            let [left, right] = self.fixed_args(node, function, &args)?;
            return Ok(ValueExpr::compare(op, left, right));
        }
        if let Some(op) = math_op(function) {
            let [left, right] = self.fixed_args(node, function, &args)?;
            return Ok(ValueExpr::math(op, left, right));
        }
        let expr = if function == sp::AND {
            let [left, right] = self.fixed_args(node, function, &args)?;
            ValueExpr::And(Box::new(left), Box::new(right))
        } else if function == sp::OR {
            let [left, right] = self.fixed_args(node, function, &args)?;
            ValueExpr::Or(Box::new(left), Box::new(right))
        } else if function == sp::NOT {
            ValueExpr::Not(self.unary(node, function, &args)?)
        } else if function == sp::BOUND {
            match self.fixed_args(node, function, &args)? {
                [ValueExpr::Var(var)] => ValueExpr::Bound(var),
                _ => {
                    return Err(SpinError::malformed_at(
                        node,
                        "Argument of sp:bound is not a variable",
                    ))
                }
            }
        } else if function == sp::IF {
            let [condition, then, otherwise] = self.fixed_args(node, function, &args)?;
            ValueExpr::If {
                condition: Box::new(condition),
                then: Box::new(then),
                otherwise: Box::new(otherwise),
            }
        } else if function == sp::COALESCE {
            ValueExpr::Coalesce(self.decode_args(&args)?)
        } else if function == sp::IS_IRI || function == sp::IS_URI {
            ValueExpr::IsUri(self.unary(node, function, &args)?)
        } else if function == sp::IS_BLANK {
            ValueExpr::IsBNode(self.unary(node, function, &args)?)
        } else if function == sp::IS_LITERAL {
            ValueExpr::IsLiteral(self.unary(node, function, &args)?)
        } else if function == sp::IS_NUMERIC {
            ValueExpr::IsNumeric(self.unary(node, function, &args)?)
        } else if function == sp::STR {
            ValueExpr::Str(self.unary(node, function, &args)?)
        } else if function == sp::LANG {
            ValueExpr::Lang(self.unary(node, function, &args)?)
        } else if function == sp::DATATYPE {
            ValueExpr::Datatype(self.unary(node, function, &args)?)
        } else if function == sp::IRI || function == sp::URI {
            ValueExpr::Iri(self.unary(node, function, &args)?)
        } else if function == sp::BNODE {
            if args.is_empty() {
                ValueExpr::BNode(None)
            } else {
                ValueExpr::BNode(Some(self.unary(node, function, &args)?))
            }
        } else if function == sp::REGEX {
            if args.len() == 3 {
                let [arg, pattern, flags] = self.fixed_args(node, function, &args)?;
                ValueExpr::Regex {
                    arg: Box::new(arg),
                    pattern: Box::new(pattern),
                    flags: Some(Box::new(flags)),
                }
            } else {
                let [arg, pattern] = self.fixed_args(node, function, &args)?;
                ValueExpr::Regex {
                    arg: Box::new(arg),
                    pattern: Box::new(pattern),
                    flags: None,
                }
            }
        } else if function == afn::LOCALNAME {
            ValueExpr::LocalName(self.unary(node, function, &args)?)
        } else {
            ValueExpr::FunctionCall {
                name: self.function_name(node, function)?,
                args: self.decode_args(&args)?,
            }
        };
        Ok(expr)
    }

    fn aggregate(
        &mut self,
        node: NamedOrBlankNodeRef<'_>,
        function: AggregateFunction,
    ) -> SpinResult<ValueExpr> {
        let distinct = statements::boolean_value(self.store, node, sp::DISTINCT_PROPERTY)?;
        let arg = match self.value(node, sp::EXPRESSION_PROPERTY)? {
            Some(value) => Some(self.expression(&value)?),
            None if function == AggregateFunction::Count => None,
            None => {
                return Err(SpinError::malformed_at(
                    node,
                    format!("{} without sp:expression", function.name()),
                ))
            }
        };
        Ok(AggregateExpr::new(function, arg, distinct).into())
    }

    /// The name of a called function. Unknown functions are malformed with strict function
    /// checking and keep their IRI otherwise.
    fn function_name(
        &self,
        node: NamedOrBlankNodeRef<'_>,
        function: NamedNodeRef<'_>,
    ) -> SpinResult<String> {
        if let Some(name) = self.parser.well_known_functions.name_of(function.as_str()) {
            return Ok(name.to_owned());
        }
        if self.parser.function_registry.has_function(function.as_str())
            || statements::has_type(self.store, function.into(), spin::FUNCTION_CLASS)?
            || !self.parser.config.strict_function_checking
        {
            return Ok(function.as_str().to_owned());
        }
        Err(SpinError::malformed_at(
            node,
            format!("Unknown function {function}"),
        ))
    }

    /// The argument values of an operator node: `sp:argN` in index order, then the other
    /// properties by local name.
    fn arguments(&self, node: NamedOrBlankNodeRef<'_>) -> SpinResult<Vec<Term>> {
        let mut positional = Vec::new();
        let mut named = Vec::new();
        let mut seen = HashSet::new();
        for triple in self.store.statements(Some(node), None, None)? {
            let triple = triple?;
            let predicate = triple.predicate.as_ref();
            if predicate == rdf::TYPE
                || predicate == sp::ARG_PROPERTY
                || predicate == sp::ELEMENTS_PROPERTY
            {
                continue;
            }
            if !seen.insert(triple.predicate.clone()) {
                return Err(SpinError::malformed_at(
                    node,
                    format!("Several values for argument {}", triple.predicate),
                ));
            }
            match sp::arg_index(predicate.as_str()) {
                Some(index) => positional.push((index, triple.object)),
                None => named.push((local_name(predicate.as_str()).to_owned(), triple.object)),
            }
        }
        positional.sort_by_key(|(index, _)| *index);
        named.sort_by(|(left, _), (right, _)| left.cmp(right));
        Ok(positional
            .into_iter()
            .map(|(_, value)| value)
            .chain(named.into_iter().map(|(_, value)| value))
            .collect())
    }

    fn decode_args(&mut self, args: &[Term]) -> SpinResult<Vec<ValueExpr>> {
        args.iter().map(|arg| self.expression(arg)).collect()
    }

    fn fixed_args<const N: usize>(
        &mut self,
        node: NamedOrBlankNodeRef<'_>,
        function: NamedNodeRef<'_>,
        args: &[Term],
    ) -> SpinResult<[ValueExpr; N]> {
        let arity_error = || {
            SpinError::malformed_at(
                node,
                format!("{function} takes {N} arguments, found {}", args.len()),
            )
        };
        if args.len() != N {
            return Err(arity_error());
        }
        <[ValueExpr; N]>::try_from(self.decode_args(args)?).map_err(|_| arity_error())
    }

    fn unary(
        &mut self,
        node: NamedOrBlankNodeRef<'_>,
        function: NamedNodeRef<'_>,
        args: &[Term],
    ) -> SpinResult<Box<ValueExpr>> {
        let [arg] = self.fixed_args(node, function, args)?;
        Ok(Box::new(arg))
    }

    /// Runs `decode` one nesting level deeper, failing on excessive depth or on a node
    /// that is already being decoded.
    fn nested<T>(
        &mut self,
        node: &Term,
        decode: impl FnOnce(&mut Self) -> SpinResult<T>,
    ) -> SpinResult<T> {
        let max_depth = self.parser.config.max_depth;
        if self.depth >= max_depth {
            return Err(SpinError::malformed(
                Some(node.clone()),
                format!("Nesting deeper than {max_depth} levels"),
            ));
        }
        if !self.open.insert(node.clone()) {
            return Err(SpinError::malformed(
                Some(node.clone()),
                "Cyclic nesting of groups or expressions",
            ));
        }
        self.depth += 1;
        let result = decode(self);
        self.depth -= 1;
        self.open.remove(node);
        result
    }

    fn non_negative_integer(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> SpinResult<Option<u64>> {
        let Some(value) = self.value(subject, predicate)? else {
            return Ok(None);
        };
        let value = statements::integer_value(subject, &value)?;
        u64::try_from(value).map(Some).map_err(|_| {
            SpinError::malformed_at(subject, format!("Negative value {value} for {predicate}"))
        })
    }

    fn value(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> SpinResult<Option<Term>> {
        statements::single_value(self.store, subject, predicate)
    }

    fn required_value(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> SpinResult<Term> {
        self.value(subject, predicate)?
            .ok_or_else(|| SpinError::malformed_at(subject, format!("Missing {predicate}")))
    }

    fn required_resource(
        &self,
        subject: NamedOrBlankNodeRef<'_>,
        predicate: NamedNodeRef<'_>,
    ) -> SpinResult<NamedOrBlankNode> {
        statements::single_resource(self.store, subject, predicate)?
            .ok_or_else(|| SpinError::malformed_at(subject, format!("Missing {predicate}")))
    }

    fn resource(&self, value: &Term, message: &str) -> SpinResult<NamedOrBlankNode> {
        term_to_resource(value).ok_or_else(|| SpinError::malformed(Some(value.clone()), message))
    }

    fn list(&self, head: &Term) -> SpinResult<Vec<Term>> {
        statements::list(self.store, head)
    }
}
