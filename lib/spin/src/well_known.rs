use rdf_spin_model::vocab::{fn_, sp, spin};
use rdf_spin_model::{NamedNode, NamedNodeRef};
use std::collections::HashMap;
use std::sync::Arc;

/// A shared [WellKnownTable].
pub type WellKnownTableRef = Arc<WellKnownTable>;

/// A bidirectional mapping between SPARQL-level names and their canonical SPIN IRIs.
///
/// The mapping is a bijection: every name has exactly one IRI and vice versa. Tables are
/// built once and shared between parsers and renderers.
#[derive(Debug, Clone, Default)]
pub struct WellKnownTable {
    by_name: HashMap<String, NamedNode>,
    by_iri: HashMap<String, String>,
}

impl WellKnownTable {
    /// Builds a table from `(name, iri)` pairs. An entry reusing a name or an IRI that is
    /// already mapped is ignored.
    pub fn new<N: Into<String>>(entries: impl IntoIterator<Item = (N, NamedNode)>) -> Self {
        let mut table = Self::default();
        for (name, iri) in entries {
            let name = name.into();
            if table.by_name.contains_key(&name) || table.by_iri.contains_key(iri.as_str()) {
                continue;
            }
            table.by_iri.insert(iri.as_str().to_owned(), name.clone());
            table.by_name.insert(name, iri);
        }
        table
    }

    /// The variables with a fixed IRI: `this` and `arg1` to `arg5`.
    pub fn variables() -> Self {
        Self::new([
            ("this", spin::THIS_CONTEXT_INSTANCE.into_owned()),
            ("arg1", spin::ARG1_INSTANCE.into_owned()),
            ("arg2", spin::ARG2_INSTANCE.into_owned()),
            ("arg3", spin::ARG3_INSTANCE.into_owned()),
            ("arg4", spin::ARG4_INSTANCE.into_owned()),
            ("arg5", spin::ARG5_INSTANCE.into_owned()),
        ])
    }

    /// The SPARQL builtin functions and their `sp:` IRIs.
    pub fn functions() -> Self {
        Self::new(BUILTIN_FUNCTIONS.iter().map(|(name, local)| {
            (
                builtin_function_name(name),
                NamedNode::new_unchecked(format!("{}{local}", sp::NAMESPACE)),
            )
        }))
    }

    pub fn iri_of(&self, name: &str) -> Option<NamedNodeRef<'_>> {
        self.by_name.get(name).map(NamedNode::as_ref)
    }

    pub fn name_of(&self, iri: &str) -> Option<&str> {
        self.by_iri.get(iri).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NamedNodeRef<'_>)> {
        self.by_name
            .iter()
            .map(|(name, iri)| (name.as_str(), iri.as_ref()))
    }
}

// XPath functions are named by their full IRI, the SPARQL-only ones by their keyword.
const BUILTIN_FUNCTIONS: [(&str, &str); 37] = [
    ("concat", "concat"),
    ("substring", "substr"),
    ("string-length", "strlen"),
    ("upper-case", "ucase"),
    ("lower-case", "lcase"),
    ("starts-with", "strstarts"),
    ("ends-with", "strends"),
    ("contains", "contains"),
    ("substring-before", "strbefore"),
    ("substring-after", "strafter"),
    ("encode-for-uri", "encode_for_uri"),
    ("replace", "replace"),
    ("numeric-abs", "abs"),
    ("numeric-round", "round"),
    ("numeric-ceil", "ceil"),
    ("numeric-floor", "floor"),
    ("year-from-dateTime", "year"),
    ("month-from-dateTime", "month"),
    ("day-from-dateTime", "day"),
    ("hours-from-dateTime", "hours"),
    ("minutes-from-dateTime", "minutes"),
    ("seconds-from-dateTime", "seconds"),
    ("timezone-from-dateTime", "timezone"),
    ("TZ", "tz"),
    ("NOW", "now"),
    ("RAND", "rand"),
    ("UUID", "uuid"),
    ("STRUUID", "struuid"),
    ("MD5", "md5"),
    ("SHA1", "sha1"),
    ("SHA256", "sha256"),
    ("SHA384", "sha384"),
    ("SHA512", "sha512"),
    ("STRDT", "strdt"),
    ("STRLANG", "strlang"),
    ("LANGMATCHES", "langMatches"),
    ("SAMETERM", "sameTerm"),
];

fn builtin_function_name(name: &str) -> String {
    if name.chars().next().is_some_and(char::is_lowercase) {
        format!("{}{name}", fn_::NAMESPACE)
    } else {
        name.to_owned()
    }
}
