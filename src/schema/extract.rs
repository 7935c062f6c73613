use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::types::TypeTag;
use crate::error::{GenerateError, Warning};

/// Fields managed by the persistence layer, never user-editable
pub const SYSTEM_FIELDS: [&str; 4] = ["id", "createdAt", "updatedAt", "deletedAt"];

/// System fields that are always treated as optional in generated models
const IMPLICITLY_OPTIONAL: [&str; 2] = ["id", "deletedAt"];

/// Comment text that ends the scalar part of a model block
const RELATION_MARKER: &str = "relation starts";

static MODEL_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bmodel\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{").expect("valid model header pattern")
});

/// One scalar field of a model block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Field name as written in the schema
    pub name: String,
    /// Type name with `?` and `[]` markers stripped
    pub raw_type: String,
    /// Canonical type tag parsed from `raw_type`
    pub type_tag: TypeTag,
    pub is_optional: bool,
    pub is_array: bool,
    pub is_unique: bool,
}

impl FieldDescriptor {
    /// Parse one trimmed field line
    ///
    /// Returns `None` when the line lacks a name or a type token.
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let name = tokens.next()?;
        let type_token = tokens.next()?;

        let is_array = type_token.ends_with("[]") || type_token.ends_with("[]?");
        let raw_type: String = type_token
            .chars()
            .filter(|c| !matches!(c, '?' | '[' | ']'))
            .collect();
        let is_optional = type_token.ends_with('?') || IMPLICITLY_OPTIONAL.contains(&name);
        let is_unique = tokens.any(|attr| attr == "@unique");

        Some(FieldDescriptor {
            name: name.to_string(),
            type_tag: TypeTag::parse(&raw_type),
            raw_type,
            is_optional,
            is_array,
            is_unique,
        })
    }

    /// Whether this is one of the [`SYSTEM_FIELDS`]
    pub fn is_system(&self) -> bool {
        SYSTEM_FIELDS.contains(&self.name.as_str())
    }

    /// TypeScript type including the array suffix
    pub fn output_type(&self) -> String {
        if self.is_array {
            format!("{}[]", self.type_tag.output_type())
        } else {
            self.type_tag.output_type().to_string()
        }
    }

    /// Documentation type including the array wrapper
    pub fn doc_type(&self) -> String {
        if self.is_array {
            format!("array[{}]", self.type_tag.doc_type())
        } else {
            self.type_tag.doc_type().to_string()
        }
    }
}

/// An entity and its scalar fields in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDefinition {
    pub entity_name: String,
    /// Every scalar field before the relation marker, system fields included
    pub fields: Vec<FieldDescriptor>,
}

impl ModelDefinition {
    /// Non-system fields, the set that drives validation, docs and test data
    pub fn generated_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| !f.is_system())
    }
}

/// Locate `model <entity_name> { ... }` and decompose it into field descriptors
///
/// Matching is exact and case-sensitive; the first matching block wins. Parsing
/// stops at a comment containing "relation starts". Lines that cannot be parsed are
/// returned as warnings carrying their line number in `schema_text`.
pub fn extract(
    schema_text: &str,
    entity_name: &str,
) -> Result<(ModelDefinition, Vec<Warning>), GenerateError> {
    let (offset, body) = find_model_body(schema_text, entity_name).ok_or_else(|| {
        GenerateError::EntityNotFound {
            entity: entity_name.to_string(),
        }
    })?;
    // the body starts on the header's line
    let first_line = schema_text[..offset].matches('\n').count() + 1;

    let mut fields = Vec::new();
    let mut warnings = Vec::new();

    'lines: for (idx, physical) in body.split('\n').enumerate() {
        let line_no = first_line + idx;
        for segment in physical.split(';') {
            let line = segment.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with("//") {
                if line.to_lowercase().contains(RELATION_MARKER) {
                    break 'lines;
                }
                continue;
            }
            if line.starts_with("@@") {
                warnings.push(Warning::BlockAttributeSkipped {
                    line: line_no,
                    text: line.to_string(),
                });
                continue;
            }
            match FieldDescriptor::parse_line(line) {
                Some(field) => fields.push(field),
                None => {
                    tracing::warn!(entity = entity_name, line = line_no, text = line, "skipping malformed field line");
                    warnings.push(Warning::MalformedFieldLine {
                        line: line_no,
                        text: line.to_string(),
                    });
                }
            }
        }
    }

    tracing::debug!(entity = entity_name, fields = fields.len(), "extracted model");
    Ok((
        ModelDefinition {
            entity_name: entity_name.to_string(),
            fields,
        },
        warnings,
    ))
}

/// Byte offset and text of the block body between the braces
fn find_model_body<'a>(schema_text: &'a str, entity_name: &str) -> Option<(usize, &'a str)> {
    MODEL_HEADER
        .captures_iter(schema_text)
        .find(|caps| &caps[1] == entity_name)
        .and_then(|caps| {
            let start = caps.get(0)?.end();
            let rest = &schema_text[start..];
            let end = rest.find('}')?;
            Some((start, &rest[..end]))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &str = r#"
generator client {
  provider = "prisma-client-js"
}

model UserRole {
  id     Int @id @default(autoincrement())
  label  String
}

model User {
  id         Int       @id @default(autoincrement())
  email      String    @unique
  nickname   String?
  age        Int
  tags       String[]
  score      Float?
  active     Boolean   @default(true)
  status     UserStatus
  createdAt  DateTime  @default(now())
  updatedAt  DateTime  @updatedAt
  deletedAt  DateTime?

  @@index([email])
  // Relation starts here
  roleId     Int
  role       UserRole  @relation(fields: [roleId], references: [id])
}
"#;

    fn field<'a>(model: &'a ModelDefinition, name: &str) -> &'a FieldDescriptor {
        model.fields.iter().find(|f| f.name == name).unwrap()
    }

    #[test]
    fn test_extract_fields_in_source_order() {
        let (model, _) = extract(SCHEMA, "User").unwrap();
        let names: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "id", "email", "nickname", "age", "tags", "score", "active", "status",
                "createdAt", "updatedAt", "deletedAt"
            ]
        );
    }

    #[test]
    fn test_relation_marker_truncates_block() {
        let (model, _) = extract(SCHEMA, "User").unwrap();
        assert!(model.fields.iter().all(|f| f.name != "roleId" && f.name != "role"));
    }

    #[test]
    fn test_markers_and_attributes() {
        let (model, _) = extract(SCHEMA, "User").unwrap();
        let email = field(&model, "email");
        assert!(email.is_unique);
        assert!(!email.is_optional);
        assert_eq!(email.raw_type, "String");

        let nickname = field(&model, "nickname");
        assert!(nickname.is_optional);
        assert_eq!(nickname.raw_type, "String");

        let tags = field(&model, "tags");
        assert!(tags.is_array);
        assert_eq!(tags.raw_type, "String");
        assert_eq!(tags.output_type(), "string[]");
        assert_eq!(tags.doc_type(), "array[string]");

        let status = field(&model, "status");
        assert_eq!(status.type_tag, TypeTag::Custom("UserStatus".into()));
    }

    #[test]
    fn test_system_fields_are_optional_and_filtered() {
        let (model, _) = extract(SCHEMA, "User").unwrap();
        assert!(field(&model, "id").is_optional);
        assert!(field(&model, "deletedAt").is_optional);
        assert!(!field(&model, "createdAt").is_optional);
        assert_eq!(model.generated_fields().count(), 7);
    }

    #[test]
    fn test_block_attribute_reported_not_parsed() {
        let (model, warnings) = extract(SCHEMA, "User").unwrap();
        assert!(model.fields.iter().all(|f| !f.name.starts_with("@@")));
        assert!(warnings
            .iter()
            .any(|w| matches!(w, Warning::BlockAttributeSkipped { text, .. } if text == "@@index([email])")));
    }

    #[test]
    fn test_exact_name_match() {
        let (model, _) = extract(SCHEMA, "UserRole").unwrap();
        assert_eq!(model.entity_name, "UserRole");
        assert_eq!(model.fields.len(), 2);

        let err = extract(SCHEMA, "user").unwrap_err();
        assert!(matches!(err, GenerateError::EntityNotFound { entity } if entity == "user"));
    }

    #[test]
    fn test_malformed_line_is_skipped_with_warning() {
        let schema = "model Note {\n  id Int @id\n  orphan\n  body String\n}";
        let (model, warnings) = extract(schema, "Note").unwrap();
        assert_eq!(model.fields.len(), 2);
        assert_eq!(
            warnings,
            vec![Warning::MalformedFieldLine {
                line: 3,
                text: "orphan".into()
            }]
        );
    }

    #[test]
    fn test_warning_lines_are_schema_lines() {
        let schema = "// header\n\nmodel Note {\n  id Int @id\n  orphan\n  @@map(\"notes\")\n}";
        let (_, warnings) = extract(schema, "Note").unwrap();
        assert_eq!(
            warnings,
            vec![
                Warning::MalformedFieldLine {
                    line: 5,
                    text: "orphan".into()
                },
                Warning::BlockAttributeSkipped {
                    line: 6,
                    text: "@@map(\"notes\")".into()
                },
            ]
        );

        let (_, warnings) = extract("\nmodel Tag { id Int @id; loose; name String }", "Tag").unwrap();
        assert_eq!(
            warnings,
            vec![Warning::MalformedFieldLine {
                line: 2,
                text: "loose".into()
            }]
        );
    }

    #[test]
    fn test_single_line_block_with_semicolons() {
        let schema = "model Widget { id Int @id; name String @unique; qty Int; deletedAt DateTime? }";
        let (model, warnings) = extract(schema, "Widget").unwrap();
        assert!(warnings.is_empty());
        let generated: Vec<_> = model.generated_fields().collect();
        assert_eq!(generated.len(), 2);
        assert_eq!(generated[0].name, "name");
        assert!(generated[0].is_unique && !generated[0].is_optional);
        assert_eq!(generated[1].name, "qty");
        assert_eq!(generated[1].type_tag, TypeTag::Int);
    }
}
