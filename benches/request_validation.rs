use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use swagger_validation::*;

fn create_models() -> Models {
    let mut properties = serde_json::Map::new();
    for i in 0..50 {
        let property = match i % 4 {
            0 => json!({"type": "integer", "minimum": 0}),
            1 => json!({"type": "string", "maxLength": 64}),
            2 => json!({"type": "boolean"}),
            _ => json!({"type": "array", "items": {"$ref": "Tag"}}),
        };
        properties.insert(format!("field{i}"), property);
    }

    serde_json::from_value(json!({
        "Record": {"type": "object", "properties": properties},
        "Tag": {
            "type": "object",
            "required": ["id"],
            "properties": {"id": {"type": "integer"}, "label": {"type": "string"}}
        }
    }))
    .unwrap()
}

fn create_body() -> Value {
    let mut body = serde_json::Map::new();
    for i in 0..50 {
        let value = match i % 4 {
            0 => json!(i.to_string()),
            1 => json!(format!("value {i}")),
            2 => json!("true"),
            _ => json!([{"id": "1", "label": "a"}, {"id": 2}]),
        };
        body.insert(format!("field{i}"), value);
    }
    Value::from(serde_json::Value::Object(body))
}

fn create_request_schema() -> RequestSchema {
    RequestSchema::new(vec![
        Schema::new("integer").with_name("limit").with_param_type("query"),
        Schema::new("string")
            .with_name("since")
            .with_param_type("query")
            .with_format("date-time"),
        Schema::reference("Record").with_name("record").with_param_type("body"),
    ])
}

fn bench_validate_request(c: &mut Criterion) {
    let models = create_models();
    let schema = create_request_schema();
    let request = Request::new()
        .with_query("limit", "25")
        .with_query("since", "2024-01-01T00:00:00Z")
        .with_body(create_body());

    c.bench_function("validate_request", |b| {
        b.iter(|| {
            let mut request = request.clone();
            black_box(validate_request(&schema, &mut request, &models, None)).unwrap()
        })
    });
}

fn bench_validate_against_schema(c: &mut Criterion) {
    let models = create_models();
    let schema = Schema::reference("Record");
    let body = create_body();

    c.bench_function("validate_against_schema", |b| {
        b.iter(|| {
            let mut value = body.clone();
            black_box(validate_against_schema(&schema, &mut value, &models, None)).unwrap()
        })
    });
}

fn bench_improved_messages(c: &mut Criterion) {
    let models = create_models();
    let schema = Schema::reference("Record");
    let options = SettingsOverrides::new().improved_error_messages(true);
    let mut body = create_body();
    if let Some(map) = body.as_object_mut() {
        for value in map.values_mut() {
            *value = Value::from("not valid");
        }
    }

    c.bench_function("validate_with_errors_improved_messages", |b| {
        b.iter(|| {
            let mut value = body.clone();
            black_box(validate_against_schema(&schema, &mut value, &models, Some(&options))).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_validate_request,
    bench_validate_against_schema,
    bench_improved_messages
);
criterion_main!(benches);
