use serde_json::{json, Map, Value};

use crate::schema::ModelDefinition;

/// Swagger definition object for the entity
///
/// Properties follow schema order; optional fields are left out of `required`.
pub fn doc_definition(model: &ModelDefinition) -> Value {
    let mut required = Vec::new();
    let mut properties = Map::new();
    for field in model.generated_fields() {
        properties.insert(field.name.clone(), json!({ "type": field.doc_type() }));
        if !field.is_optional {
            required.push(Value::String(field.name.clone()));
        }
    }
    let mut root = Map::new();
    root.insert(
        model.entity_name.clone(),
        json!({
            "type": "object",
            "required": required,
            "properties": properties,
        }),
    );
    Value::Object(root)
}

/// Two-space indented JSON for the `${swaggerDef}` placeholder
pub fn doc_definition_json(model: &ModelDefinition) -> String {
    serde_json::to_string_pretty(&doc_definition(model)).unwrap_or_else(|_| "{}".to_string())
}
