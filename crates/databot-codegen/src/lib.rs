//! Skeleton builder emission from interface type trees.

pub mod emit;
pub mod errors;
pub mod model;
pub mod schema;

pub use emit::{generate, generate_from_json};
pub use errors::{CodegenError, Result};
pub use model::{
    CodegenOptions, GeneratorResult, InterfaceDecl, LiteralValue, Member, TypeModule, TypeNode,
};
pub use schema::type_module_json_schema;
