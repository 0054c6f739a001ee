use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::model::TypeModule;

/// Emit the JSON Schema for type-tree input documents.
pub fn type_module_json_schema() -> RootSchema {
    schema_for!(TypeModule)
}
