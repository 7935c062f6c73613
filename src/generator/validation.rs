use serde::Serialize;

use super::naming::EntityNames;
use crate::schema::{FieldDescriptor, TypeTag};

/// Maximum accepted length for string columns
pub const MAX_STRING_LENGTH: usize = 190;

/// Separator between rules inside the generated validator array
pub const RULE_SEPARATOR: &str = ",\n        ";

/// express-validator chains for the create and update endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRuleSet {
    pub create_rules: Vec<String>,
    pub update_rules: Vec<String>,
}

impl ValidationRuleSet {
    pub fn create_block(&self) -> String {
        self.create_rules.join(RULE_SEPARATOR)
    }

    pub fn update_block(&self) -> String {
        self.update_rules.join(RULE_SEPARATOR)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Operation {
    Create,
    Update,
}

/// Build one create rule and one update rule per non-system field
///
/// Each chain is `body('<field>')` followed by, in order: presence, type check,
/// length check, uniqueness lookup. Absent fragments are dropped.
pub fn synthesize_rules<'a>(
    names: &EntityNames,
    fields: impl IntoIterator<Item = &'a FieldDescriptor>,
) -> ValidationRuleSet {
    let mut create_rules = Vec::new();
    let mut update_rules = Vec::new();
    for field in fields.into_iter().filter(|f| !f.is_system()) {
        create_rules.push(field_rule(names, field, Operation::Create));
        update_rules.push(field_rule(names, field, Operation::Update));
    }
    ValidationRuleSet {
        create_rules,
        update_rules,
    }
}

fn field_rule(names: &EntityNames, field: &FieldDescriptor, op: Operation) -> String {
    let key = format!("{}_{}", names.upper, field.name.to_uppercase());
    let fragments = [
        format!("body('{}')", field.name),
        presence_check(field, op, &key),
        type_check(field).unwrap_or_default().to_string(),
        length_check(field, &key).unwrap_or_default(),
        unique_check(names, field, op, &key).unwrap_or_default(),
    ];
    fragments
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn presence_check(field: &FieldDescriptor, op: Operation, key: &str) -> String {
    if op == Operation::Create && !field.is_optional {
        format!(".notEmpty().withMessage(i18n.__('validator.{key}_IS_REQUIRED'))")
    } else {
        ".optional()".to_string()
    }
}

fn type_check(field: &FieldDescriptor) -> Option<&'static str> {
    if field.is_array {
        return None;
    }
    match field.type_tag {
        TypeTag::String => Some(".isString().withMessage(i18n.__('validator.MUST_BE_A_STRING'))"),
        TypeTag::Int => {
            Some(".toInt().isInt().withMessage(i18n.__('validator.MUST_BE_A_VALID_INTEGER'))")
        }
        TypeTag::Float => Some(".isFloat().withMessage(i18n.__('validator.MUST_BE_A_VALID_FLOAT'))"),
        TypeTag::Boolean => Some(".isBoolean().withMessage(i18n.__('validator.MUST_BE_A_BOOLEAN'))"),
        _ => None,
    }
}

fn length_check(field: &FieldDescriptor, key: &str) -> Option<String> {
    if field.is_array || !field.type_tag.is_string() {
        return None;
    }
    let limit = MAX_STRING_LENGTH + 1;
    Some(format!(
        ".isLength({{ max: {MAX_STRING_LENGTH} }}).withMessage(i18n.__('validator.{key}_MUST_BE_LESS_THAN_{limit}_CHARACTERS'))"
    ))
}

fn unique_check(
    names: &EntityNames,
    field: &FieldDescriptor,
    op: Operation,
    key: &str,
) -> Option<String> {
    if !field.is_unique {
        return None;
    }
    let f = &field.name;
    let record = &names.lower_camel;
    let rule = match op {
        Operation::Create => format!(
            ".custom(async ({f}) => {{
            const {record} = await prisma.{record}.findUnique({{
                where: {{ {f} }},
            }});
            if ({record}) {{
                throw new Error(i18n.__('validator.{key}_MUST_BE_UNIQUE'));
            }}
            return true;
        }})"
        ),
        Operation::Update => format!(
            ".custom(async ({f}, {{ req }}) => {{
            const {{ id }}: any = req.params;
            const {record} = await prisma.{record}.findUnique({{
                where: {{ {f} }},
            }});
            if ({record} && {record}.id !== Number(id)) {{
                throw new Error(i18n.__('validator.{key}_MUST_BE_UNIQUE'));
            }}
            return true;
        }})"
        ),
    };
    Some(rule)
}
