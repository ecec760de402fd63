//! Tool catalogue advertised by `tools/list`.

use std::collections::HashMap;
use std::sync::OnceLock;

use jsonschema::Validator;
use serde_json::{json, Value};
use tracing::error;

use crate::schema;

pub const BY_AREA: &str = "parking.by_area";
pub const SEARCH: &str = "parking.search";
pub const STATUS: &str = "parking.status";
pub const AREA_AVAILABILITY: &str = "parking.area_availability";
pub const ALL_AVAILABILITY: &str = "parking.all_availability";

struct ToolSpec {
    name: &'static str,
    description: &'static str,
    /// The single required, non-empty string argument, with its description.
    argument: Option<(&'static str, &'static str)>,
}

const TOOLS: &[ToolSpec] = &[
    ToolSpec {
        name: BY_AREA,
        description: "List Taipei public parking lots whose district contains the given area",
        argument: Some(("area", "District name or fragment, e.g. 信義區 or 信義")),
    },
    ToolSpec {
        name: SEARCH,
        description: "Search Taipei public parking lots by name or address keyword",
        argument: Some(("keyword", "Keyword matched against lot name and address")),
    },
    ToolSpec {
        name: STATUS,
        description: "Full details and real-time free spaces for one parking lot",
        argument: Some(("id", "Parking lot id")),
    },
    ToolSpec {
        name: AREA_AVAILABILITY,
        description: "Real-time free car spaces for every parking lot in an area",
        argument: Some(("area", "District name or fragment, e.g. 大安")),
    },
    ToolSpec {
        name: ALL_AVAILABILITY,
        description: "Real-time free car spaces for every Taipei public parking lot",
        argument: None,
    },
];

fn schema_for(spec: &ToolSpec) -> Value {
    match spec.argument {
        Some((field, description)) => json!({
            "type": "object",
            "required": [field],
            "properties": {
                field: {
                    "type": "string",
                    "minLength": 1,
                    "description": description
                }
            }
        }),
        None => json!({ "type": "object", "properties": {} }),
    }
}

/// Input schema for `name`, or `None` if the tool is unknown.
pub fn input_schema(name: &str) -> Option<Value> {
    TOOLS.iter().find(|t| t.name == name).map(schema_for)
}

/// Compiled input schema for `name`. Schemas are compiled on first use.
pub fn argument_validator(name: &str) -> Option<&'static Validator> {
    static VALIDATORS: OnceLock<HashMap<&'static str, Validator>> = OnceLock::new();

    VALIDATORS
        .get_or_init(|| {
            TOOLS
                .iter()
                .filter_map(|spec| match schema::compile(&schema_for(spec)) {
                    Ok(validator) => Some((spec.name, validator)),
                    Err(e) => {
                        error!(tool = spec.name, error = %e, "input schema does not compile");
                        None
                    }
                })
                .collect()
        })
        .get(name)
}

/// The `tools/list` result.
pub fn tool_list() -> Value {
    let tools: Vec<Value> = TOOLS
        .iter()
        .map(|spec| {
            json!({
                "name": spec.name,
                "description": spec.description,
                "inputSchema": schema_for(spec)
            })
        })
        .collect();

    json!({ "tools": tools })
}
