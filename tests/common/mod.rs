use serde_json::json;
use swagger_validation::*;

#[allow(dead_code)]
pub fn pet_store_models() -> Models {
    serde_json::from_value(json!({
        "Pet": {
            "type": "object",
            "required": ["id", "name"],
            "properties": {
                "id": {"type": "integer", "format": "int64"},
                "name": {"type": "string"},
                "status": {"type": "string", "enum": ["available", "pending", "sold"]},
                "tags": {"type": "array", "items": {"$ref": "Tag"}},
                "birthday": {"type": "string", "format": "date"}
            }
        },
        "Tag": {
            "type": "object",
            "properties": {
                "id": {"type": "integer"},
                "label": {"type": "string"}
            }
        },
        "Wrapper": {
            "type": "object",
            "properties": {
                "obj": {
                    "type": "object",
                    "properties": {
                        "array": {"type": "array", "items": {"type": "boolean"}}
                    }
                }
            }
        }
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn find_pets_schema() -> RequestSchema {
    serde_json::from_value(json!({
        "parameters": [
            {"name": "limit", "paramType": "query", "type": "integer", "minimum": "0", "maximum": 10},
            {"name": "status", "in": "query", "type": "string", "enum": ["available", "sold"]},
            {"name": "petId", "paramType": "path", "type": "integer", "required": true},
            {"name": "x-verbose", "paramType": "header", "type": "boolean"}
        ]
    }))
    .unwrap()
}

#[allow(dead_code)]
pub fn messages(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(|error| error.message.clone()).collect()
}
