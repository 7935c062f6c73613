use serde::Serialize;

/// Canonical tag for a schema primitive
///
/// Both the generated TypeScript output and the API documentation render from this
/// one enumeration, so the two mappings can never drift apart. Names that are not
/// schema primitives (enums, composite types) are kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeTag {
    String,
    Int,
    Float,
    Boolean,
    DateTime,
    Decimal,
    BigInt,
    Json,
    Bytes,
    Custom(String),
}

impl TypeTag {
    /// Parse a raw schema type name (markers already stripped)
    pub fn parse(raw: &str) -> Self {
        match raw {
            "String" => TypeTag::String,
            "Int" => TypeTag::Int,
            "Float" => TypeTag::Float,
            "Boolean" => TypeTag::Boolean,
            "DateTime" => TypeTag::DateTime,
            "Decimal" => TypeTag::Decimal,
            "BigInt" => TypeTag::BigInt,
            "Json" => TypeTag::Json,
            "Bytes" => TypeTag::Bytes,
            other => TypeTag::Custom(other.to_string()),
        }
    }

    /// TypeScript type used in generated models
    pub fn output_type(&self) -> &str {
        match self {
            TypeTag::String => "string",
            TypeTag::Int | TypeTag::Float | TypeTag::Decimal => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::DateTime => "Date",
            TypeTag::BigInt => "bigint",
            TypeTag::Json => "any",
            TypeTag::Bytes => "Buffer",
            TypeTag::Custom(name) => name,
        }
    }

    /// Swagger primitive used in generated API documentation
    ///
    /// Only the core primitives have a documented form; everything else is
    /// described as a string.
    pub fn doc_type(&self) -> &'static str {
        match self {
            TypeTag::Int => "integer",
            TypeTag::Float => "number",
            TypeTag::Boolean => "boolean",
            _ => "string",
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, TypeTag::String)
    }
}

/// Map a raw schema type to the generated TypeScript type
///
/// Unknown names pass through unchanged.
///
/// ```
/// use crudgen::schema::to_output_type;
///
/// assert_eq!(to_output_type("Int", false), "number");
/// assert_eq!(to_output_type("Role", true), "Role[]");
/// ```
pub fn to_output_type(raw_type: &str, is_array: bool) -> String {
    let tag = TypeTag::parse(raw_type);
    if is_array {
        format!("{}[]", tag.output_type())
    } else {
        tag.output_type().to_string()
    }
}

/// Map a raw schema type to the API documentation type
///
/// Unknown names fall back to `string`.
pub fn to_doc_type(raw_type: &str, is_array: bool) -> String {
    let tag = TypeTag::parse(raw_type);
    if is_array {
        format!("array[{}]", tag.doc_type())
    } else {
        tag.doc_type().to_string()
    }
}
