use crate::statements;
use crate::{SpinError, SpinResult};
use dashmap::DashMap;
use rdf_spin_algebra::{BindingSet, Template, TemplateKind};
use rdf_spin_common::TripleSource;
use rdf_spin_model::vocab::spin;
use rdf_spin_model::{local_name, NamedNode, NamedNodeRef, NamedOrBlankNodeRef};
use std::sync::Arc;
use tracing::{debug, trace};

/// Parsed templates, keyed by IRI.
///
/// Lookups and insertions may happen concurrently. Two callers missing the same IRI may
/// both parse the template; the first insertion wins and the map only ever holds fully
/// parsed templates. Once `capacity` templates are cached, new templates are handed out
/// without being cached.
#[derive(Debug)]
pub struct TemplateCache {
    templates: DashMap<NamedNode, Arc<Template>>,
    capacity: usize,
}

impl TemplateCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            templates: DashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, iri: NamedNodeRef<'_>) -> Option<Arc<Template>> {
        self.templates
            .get(&iri.into_owned())
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Returns the cached template `iri` or parses and caches it with `parse`.
    ///
    /// No lock is held while `parse` runs, so it may itself look up other templates.
    pub fn get_or_try_insert_with(
        &self,
        iri: NamedNodeRef<'_>,
        parse: impl FnOnce() -> SpinResult<Template>,
    ) -> SpinResult<Arc<Template>> {
        if let Some(template) = self.get(iri) {
            trace!("Template cache hit for {iri}");
            return Ok(template);
        }
        debug!("Template cache miss for {iri}");
        let template = Arc::new(parse()?);
        if self.templates.len() >= self.capacity {
            debug!(
                "Template cache is full ({} entries), not caching {iri}",
                self.capacity
            );
            return Ok(template);
        }
        let entry = self.templates.entry(iri.into_owned()).or_insert(template);
        Ok(Arc::clone(entry.value()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn clear(&self) {
        self.templates.clear();
    }
}

/// The template kind declared by the template class `class`.
pub(crate) fn template_kind(class: NamedNodeRef<'_>) -> Option<TemplateKind> {
    if class == spin::ASK_TEMPLATE_CLASS {
        Some(TemplateKind::Ask)
    } else if class == spin::SELECT_TEMPLATE_CLASS {
        Some(TemplateKind::Select)
    } else if class == spin::CONSTRUCT_TEMPLATE_CLASS {
        Some(TemplateKind::Construct)
    } else if class == spin::UPDATE_TEMPLATE_CLASS {
        Some(TemplateKind::Update)
    } else {
        None
    }
}

/// Binds the arguments of `template` to their values on `instance`.
///
/// Each argument is bound under the local name of its predicate. A missing optional
/// argument falls back to its default value and stays unbound without one. A missing
/// required argument is malformed.
pub fn bind_arguments(
    template: &Template,
    instance: NamedOrBlankNodeRef<'_>,
    store: &dyn TripleSource,
) -> SpinResult<BindingSet> {
    let mut bindings = BindingSet::new();
    for argument in &template.arguments {
        let name = local_name(argument.predicate.as_str());
        match statements::single_value(store, instance, argument.predicate.as_ref())? {
            Some(value) => bindings.insert(name, value),
            None if !argument.optional => {
                return Err(SpinError::malformed_at(
                    instance,
                    format!(
                        "Missing value for required argument {} of template {}",
                        argument.predicate, template.iri
                    ),
                ));
            }
            None => {
                if let Some(default) = &argument.default_value {
                    bindings.insert(name, default.clone());
                }
            }
        }
    }
    Ok(bindings)
}
