use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A parsed source file: the interface declarations it contains.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct TypeModule {
    #[serde(default)]
    pub declarations: Vec<InterfaceDecl>,
}

impl TypeModule {
    /// First declaration named `name`.
    pub fn find(&self, name: &str) -> Option<&InterfaceDecl> {
        self.declarations.iter().find(|decl| decl.name == name)
    }
}

/// Named record type with ordered members.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

/// One property of an interface. `ty` is absent when the source carried no
/// type annotation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Member {
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeNode>,
}

/// Type tree node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeNode {
    String,
    Number,
    Boolean,
    /// A single literal type such as `'RED'` or `5`.
    Literal { value: LiteralValue },
    Union { members: Vec<TypeNode> },
    Array { element: Box<TypeNode> },
    /// Reference to another named type.
    Reference { name: String },
    /// Inline object type.
    Object { members: Vec<Member> },
}

/// Literal carried by a literal type node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LiteralValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// Options controlling emitted source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CodegenOptions {
    /// Indent with tabs instead of two spaces.
    pub tabs: bool,
}

/// Emitted source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorResult {
    pub code: String,
}
