use serde::Serialize;

use crate::schema::{FieldDescriptor, TypeTag};

/// Separator between object entries inside generated test payloads
pub const DATA_SEPARATOR: &str = ",\n                ";

/// Optional fields admitted into the minimal create payload
const OPTIONAL_CREATE_CAP: usize = 2;

/// Fields admitted into the invalid payload
const INVALID_CAP: usize = 2;

/// Literal payload fragments substituted into the generated test files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestDataSet {
    pub create_data: String,
    pub create_expectation: String,
    pub update_data: String,
    pub update_expectation: String,
    pub partial_update_data: String,
    pub invalid_data: String,
    pub filter_param: String,
}

/// Literal values for one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleValues {
    pub create: String,
    pub update: String,
    pub invalid: String,
    /// Constructor name for `expect.any(...)`
    pub matcher: &'static str,
}

impl SampleValues {
    /// Fixed dispatch table keyed by primitive type
    ///
    /// Arrays and unrecognized types use the generic fallback.
    pub fn for_field(field: &FieldDescriptor) -> Self {
        let name = &field.name;
        let tag = if field.is_array {
            None
        } else {
            Some(&field.type_tag)
        };
        let (create, update, invalid) = match tag {
            Some(TypeTag::String) => (
                format!("`Test {name} ${{Date.now()}}`"),
                format!("`Updated {name} ${{Date.now()}}`"),
                "12345".to_string(),
            ),
            Some(TypeTag::Int) => ("1".into(), "2".into(), "'not a number'".into()),
            Some(TypeTag::Float) => ("10.5".into(), "20.5".into(), "'not a float'".into()),
            Some(TypeTag::Boolean) => ("true".into(), "false".into(), "'not a boolean'".into()),
            Some(TypeTag::DateTime) => (
                "new Date().toISOString()".into(),
                "new Date().toISOString()".into(),
                "'invalid date'".into(),
            ),
            _ => ("'test value'".into(), "'updated value'".into(), "123".into()),
        };
        let matcher = match tag {
            Some(TypeTag::Int | TypeTag::Float) => "Number",
            Some(TypeTag::Boolean) => "Boolean",
            _ => "String",
        };
        SampleValues {
            create,
            update,
            invalid,
            matcher,
        }
    }
}

/// Derive representative payloads from the non-system fields
pub fn synthesize_test_data<'a>(
    fields: impl IntoIterator<Item = &'a FieldDescriptor>,
) -> TestDataSet {
    let mut create = Vec::new();
    let mut create_expect = Vec::new();
    let mut update = Vec::new();
    let mut update_expect = Vec::new();
    let mut partial = Vec::new();
    let mut invalid = Vec::new();
    let mut filter_param: Option<String> = None;
    let mut optional_in_create = 0;

    for field in fields.into_iter().filter(|f| !f.is_system()) {
        let name = &field.name;
        let values = SampleValues::for_field(field);
        let expectation = format!("{name}: expect.any({})", values.matcher);

        if filter_param.is_none() && field.type_tag.is_string() && !field.is_array {
            filter_param = Some(format!("{name}=test"));
        }

        let admit = if field.is_optional {
            optional_in_create < OPTIONAL_CREATE_CAP
        } else {
            true
        };
        if admit {
            if field.is_optional {
                optional_in_create += 1;
            }
            create.push(format!("{name}: {}", values.create));
            create_expect.push(expectation.clone());
        }

        update.push(format!("{name}: {}", values.update));
        update_expect.push(expectation);

        if partial.is_empty() {
            partial.push(format!("{name}: {}", values.update));
        }
        if invalid.len() < INVALID_CAP {
            invalid.push(format!("{name}: {}", values.invalid));
        }
    }

    TestDataSet {
        create_data: create.join(DATA_SEPARATOR),
        create_expectation: create_expect.join(DATA_SEPARATOR),
        update_data: update.join(DATA_SEPARATOR),
        update_expectation: update_expect.join(DATA_SEPARATOR),
        partial_update_data: partial.join(DATA_SEPARATOR),
        invalid_data: invalid.join(DATA_SEPARATOR),
        filter_param: filter_param.unwrap_or_else(|| "id=1".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::extract;

    fn fields(schema: &str, entity: &str) -> Vec<FieldDescriptor> {
        extract(schema, entity).unwrap().0.fields
    }

    #[test]
    fn test_float_literals() {
        let f = fields("model P {\n price Float\n}", "P");
        let values = SampleValues::for_field(&f[0]);
        assert_eq!(values.create, "10.5");
        assert_eq!(values.update, "20.5");
        assert_eq!(values.invalid, "'not a float'");
        assert_eq!(values.matcher, "Number");
    }

    #[test]
    fn test_first_string_field_sets_filter() {
        let f = fields("model P {\n id Int @id\n qty Int\n title String\n slug String\n}", "P");
        let data = synthesize_test_data(&f);
        assert_eq!(data.filter_param, "title=test");
    }

    #[test]
    fn test_filter_defaults_to_id() {
        let f = fields("model P {\n id Int @id\n qty Int\n ok Boolean\n}", "P");
        assert_eq!(synthesize_test_data(&f).filter_param, "id=1");
    }

    #[test]
    fn test_payload_caps() {
        let schema = "model P {\n id Int @id\n a String\n b Int?\n c Float?\n d Boolean?\n e DateTime\n createdAt DateTime\n}";
        let data = synthesize_test_data(&fields(schema, "P"));

        let create: Vec<_> = data.create_data.split(DATA_SEPARATOR).collect();
        assert_eq!(create.len(), 4);
        assert!(create[0].starts_with("a: `Test a"));
        assert_eq!(create[1], "b: 1");
        assert_eq!(create[2], "c: 10.5");
        assert_eq!(create[3], "e: new Date().toISOString()");

        assert_eq!(data.update_data.split(DATA_SEPARATOR).count(), 5);
        assert!(!data.update_data.contains("createdAt"));
        assert_eq!(data.partial_update_data, "a: `Updated a ${Date.now()}`");
        assert_eq!(data.invalid_data, format!("a: 12345{DATA_SEPARATOR}b: 'not a number'"));
        assert_eq!(
            data.create_expectation.split(DATA_SEPARATOR).nth(1),
            Some("b: expect.any(Number)")
        );
    }

    #[test]
    fn test_unknown_type_fallback() {
        let f = fields("model P {\n status Status\n}", "P");
        let values = SampleValues::for_field(&f[0]);
        assert_eq!(values.create, "'test value'");
        assert_eq!(values.update, "'updated value'");
        assert_eq!(values.invalid, "123");
        assert_eq!(values.matcher, "String");
    }
}
