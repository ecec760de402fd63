use mcp_tw_parking::schema::{
    compile, validate_compiled, validate_json, validate_value, SchemaValidationError,
};
use mcp_tw_parking::tools;
use serde_json::json;

#[test]
fn json_schema_harness_validates_instance() {
    let schema = r#"{
      "$schema": "https://json-schema.org/draft/2020-12/schema",
      "type": "object",
      "required": ["error"],
      "additionalProperties": false,
      "properties": {
        "error": {
          "type": "object",
          "required": ["code", "message"],
          "additionalProperties": false,
          "properties": {
            "code": { "type": "string" },
            "message": { "type": "string", "minLength": 1 }
          }
        }
      }
    }"#;

    let instance = r#"{
      "error": {
        "code": "invalid_arguments",
        "message": "Tool arguments are invalid"
      }
    }"#;

    validate_json(schema, instance).expect("schema validation failed");
}

#[test]
fn advertised_input_schemas_accept_valid_arguments() {
    let cases = [
        (tools::BY_AREA, json!({ "area": "信義區" })),
        (tools::SEARCH, json!({ "keyword": "仁愛" })),
        (tools::STATUS, json!({ "id": "001" })),
        (tools::AREA_AVAILABILITY, json!({ "area": "大安" })),
        (tools::ALL_AVAILABILITY, json!({})),
    ];

    for (name, args) in cases {
        let schema = tools::input_schema(name).unwrap();
        validate_value(&schema, &args).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn advertised_input_schemas_reject_missing_fields() {
    let schema = tools::input_schema(tools::AREA_AVAILABILITY).unwrap();
    let err = validate_value(&schema, &json!({ "keyword": "大安" })).unwrap_err();
    assert!(matches!(err, SchemaValidationError::ValidationFailed(_)));
}

#[test]
fn malformed_schema_text_is_a_parse_error() {
    let err = validate_json("{not json", "{}").unwrap_err();
    assert!(matches!(err, SchemaValidationError::SchemaParse(_)));
}

#[test]
fn unknown_tool_has_no_schema() {
    assert!(tools::input_schema("parking.reserve").is_none());
}

#[test]
fn validation_failure_reports_first_violation() {
    let schema = tools::input_schema(tools::STATUS).unwrap();
    let err = validate_value(&schema, &json!({})).unwrap_err();
    match err {
        SchemaValidationError::ValidationFailed(detail) => assert!(detail.contains("id"), "{detail}"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn compiled_schema_is_reusable() {
    let validator = compile(&tools::input_schema(tools::SEARCH).unwrap()).unwrap();

    validate_compiled(&validator, &json!({ "keyword": "仁愛" })).unwrap();
    assert!(validate_compiled(&validator, &json!({ "keyword": "" })).is_err());
    validate_compiled(&validator, &json!({ "keyword": "松壽" })).unwrap();
}

#[test]
fn every_advertised_tool_has_a_compiled_validator() {
    let list = tools::tool_list();
    let advertised = list["tools"].as_array().unwrap();
    assert_eq!(advertised.len(), 5);

    for tool in advertised {
        let name = tool["name"].as_str().unwrap();
        assert!(tools::argument_validator(name).is_some(), "{name} has no validator");
        assert_eq!(tools::input_schema(name).unwrap(), tool["inputSchema"]);
    }
    assert!(tools::argument_validator("parking.reserve").is_none());
}
