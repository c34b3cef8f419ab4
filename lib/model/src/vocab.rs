//! Vocabularies used by the SPIN encoding of SPARQL.

pub use oxrdf::vocab::{rdf, rdfs, xsd};

/// [SP](http://spinrdf.org/sp) vocabulary: SPARQL commands, elements and operators.
pub mod sp {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://spinrdf.org/sp#";

    pub const SELECT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Select");
    pub const CONSTRUCT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Construct");
    pub const ASK_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Ask");
    pub const DESCRIBE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Describe");
    pub const MODIFY_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Modify");
    pub const INSERT_DATA_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#InsertData");
    pub const DELETE_DATA_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#DeleteData");
    pub const LOAD_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Load");
    pub const CLEAR_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Clear");
    pub const CREATE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Create");
    pub const DROP_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Drop");
    pub const QUERY_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Query");
    pub const UPDATE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Update");
    pub const COMMAND_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Command");
    pub const SYSTEM_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#SystemClass");
    pub const AGGREGATION_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Aggregation");
    pub const FILTER_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Filter");
    pub const BIND_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Bind");
    pub const OPTIONAL_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Optional");
    pub const UNION_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Union");
    pub const MINUS_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Minus");
    pub const NAMED_GRAPH_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#NamedGraph");
    pub const SUB_QUERY_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#SubQuery");
    pub const VALUES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Values");
    pub const TRIPLE_PATH_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#TriplePath");
    pub const TRIPLE_PATTERN_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#TriplePattern");
    pub const SERVICE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Service");
    pub const MOD_PATH_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#ModPath");
    pub const ASC_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Asc");
    pub const DESC_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Desc");
    pub const COUNT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Count");
    pub const MAX_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Max");
    pub const MIN_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Min");
    pub const SUM_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Sum");
    pub const AVG_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Avg");
    pub const GROUP_CONCAT_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#GroupConcat");
    pub const SAMPLE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#Sample");
    pub const TEXT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#text");
    pub const WHERE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#where");
    pub const RESULT_VARIABLES_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#resultVariables");
    pub const RESULT_NODES_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#resultNodes");
    pub const TEMPLATES_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#templates");
    pub const GROUP_BY_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#groupBy");
    pub const HAVING_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#having");
    pub const ORDER_BY_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#orderBy");
    pub const DISTINCT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#distinct");
    pub const REDUCED_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#reduced");
    pub const LIMIT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#limit");
    pub const OFFSET_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#offset");
    pub const EXPRESSION_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#expression");
    pub const VAR_NAME_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#varName");
    pub const VARIABLE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#variable");
    pub const ELEMENTS_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#elements");
    pub const SUBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#subject");
    pub const PREDICATE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#predicate");
    pub const OBJECT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#object");
    pub const PATH_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#path");
    pub const SUB_PATH_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#subPath");
    pub const MOD_MIN_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#modMin");
    pub const MOD_MAX_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#modMax");
    pub const GRAPH_NAME_NODE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#graphNameNode");
    pub const QUERY_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#query");
    pub const SERVICE_URI_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#serviceURI");
    pub const SILENT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#silent");
    pub const VAR_NAMES_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#varNames");
    pub const BINDINGS_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#bindings");
    pub const ARG_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#arg");
    pub const ARG1_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#arg1");
    pub const ARG2_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#arg2");
    pub const ARG3_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#arg3");
    pub const ARG4_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#arg4");
    pub const ARG5_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#arg5");
    pub const UNDEF: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#undef");
    pub const ADD: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#add");
    pub const SUB: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#sub");
    pub const MUL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#mul");
    pub const DIVIDE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#divide");
    pub const EQ: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#eq");
    pub const NE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#ne");
    pub const LT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#lt");
    pub const LE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#le");
    pub const GE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#ge");
    pub const GT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#gt");
    pub const AND: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#and");
    pub const OR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#or");
    pub const NOT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#not");
    pub const EXISTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#exists");
    pub const NOT_EXISTS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#notExists");
    pub const BOUND: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#bound");
    pub const IF: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#if");
    pub const COALESCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#coalesce");
    pub const IS_IRI: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#isIRI");
    pub const IS_URI: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#isURI");
    pub const IS_BLANK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#isBlank");
    pub const IS_LITERAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#isLiteral");
    pub const IS_NUMERIC: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#isNumeric");
    pub const STR: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#str");
    pub const LANG: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#lang");
    pub const DATATYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/sp#datatype");
    pub const IRI: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#iri");
    pub const URI: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#uri");
    pub const BNODE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#bnode");
    pub const REGEX: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/sp#regex");

    /// Returns the positional argument property `sp:arg{index}`.
    pub fn arg(index: usize) -> oxrdf::NamedNode {
        oxrdf::NamedNode::new_unchecked(format!("{NAMESPACE}arg{index}"))
    }

    /// Returns `n` if `iri` is a positional argument property `sp:arg{n}`.
    pub fn arg_index(iri: &str) -> Option<usize> {
        let index = iri.strip_prefix(NAMESPACE)?.strip_prefix("arg")?;
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        index.parse().ok()
    }
}

/// [SPIN](http://spinrdf.org/spin) vocabulary: templates, functions, rules and constraints.
pub mod spin {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://spinrdf.org/spin#";

    pub const TEMPLATES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Templates");
    pub const TEMPLATE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Template");
    pub const ASK_TEMPLATE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#AskTemplate");
    pub const SELECT_TEMPLATE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#SelectTemplate");
    pub const CONSTRUCT_TEMPLATE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#ConstructTemplate");
    pub const UPDATE_TEMPLATE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#UpdateTemplate");
    pub const ASK_TEMPLATES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#AskTemplates");
    pub const SELECT_TEMPLATES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#SelectTemplates");
    pub const CONSTRUCT_TEMPLATES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#ConstructTemplates");
    pub const UPDATE_TEMPLATES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#UpdateTemplates");
    pub const MODULES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Modules");
    pub const MODULE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Module");
    pub const FUNCTIONS_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Functions");
    pub const FUNCTION_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Function");
    pub const MAGIC_PROPERTY_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#MagicProperty");
    pub const MAGIC_PROPERTIES_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#MagicProperties");
    pub const RULE_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Rule");
    pub const CONSTRAINT_VIOLATION_CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#ConstraintViolation");
    pub const BODY_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#body");
    pub const CONSTRAINT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#constraint");
    pub const ABSTRACT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#abstract");
    pub const RULE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#rule");
    pub const NEXT_RULE_PROPERTY_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#nextRuleProperty");
    pub const RULE_PROPERTY_MAX_ITERATION_COUNT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#rulePropertyMaxIterationCount");
    pub const THIS_UNBOUND_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#thisUnbound");
    pub const VIOLATION_ROOT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#violationRoot");
    pub const VIOLATION_PATH_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#violationPath");
    pub const VIOLATION_VALUE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#violationValue");
    pub const VIOLATION_LEVEL_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#violationLevel");
    pub const INFO: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Info");
    pub const WARNING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Warning");
    pub const ERROR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Error");
    pub const FATAL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#Fatal");
    pub const THIS_CONTEXT_INSTANCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#_this");
    pub const ARG1_INSTANCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#_arg1");
    pub const ARG2_INSTANCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#_arg2");
    pub const ARG3_INSTANCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#_arg3");
    pub const ARG4_INSTANCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#_arg4");
    pub const ARG5_INSTANCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spin#_arg5");
}

/// [SPL](http://spinrdf.org/spl) vocabulary: argument declarations.
pub mod spl {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://spinrdf.org/spl#";

    pub const ARGUMENT_TEMPLATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spl#Argument");
    pub const PREDICATE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spl#predicate");
    pub const VALUE_TYPE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spl#valueType");
    pub const OPTIONAL_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spl#optional");
    pub const DEFAULT_VALUE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://spinrdf.org/spl#defaultValue");
}

/// ARQ function library.
pub mod afn {
    use oxrdf::NamedNodeRef;

    pub const NAMESPACE: &str = "http://jena.hpl.hp.com/ARQ/function#";

    pub const LOCALNAME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://jena.hpl.hp.com/ARQ/function#localname");
}

/// XPath functions.
pub mod fn_ {
    pub const NAMESPACE: &str = "http://www.w3.org/2005/xpath-functions#";
}
