use tracing::debug;

use crate::errors::{CodegenError, Result};
use crate::model::{CodegenOptions, GeneratorResult, LiteralValue, Member, TypeModule, TypeNode};

/// Emit a skeleton `Builder::new(...)` expression for the interface named
/// `interface_name`.
pub fn generate(
    module: &TypeModule,
    interface_name: &str,
    options: &CodegenOptions,
) -> Result<GeneratorResult> {
    let decl = module
        .find(interface_name)
        .ok_or_else(|| CodegenError::InterfaceNotFound(interface_name.to_string()))?;

    let indent = if options.tabs { "\t" } else { "  " };
    let mut lines = Vec::with_capacity(decl.members.len() + 3);
    lines.push(format!(
        "let {}_builder = Builder::new(",
        snake_case(&decl.name)
    ));
    lines.push(format!("{indent}BuildConfiguration::new()"));
    for member in &decl.members {
        lines.push(format!("{indent}{indent}{}", member_line(member)));
    }
    lines.push(")?;".to_string());

    debug!(
        interface = %decl.name,
        members = decl.members.len(),
        "skeleton builder emitted"
    );
    Ok(GeneratorResult {
        code: lines.join("\n"),
    })
}

/// Parse a JSON type tree and emit a skeleton builder for `interface_name`.
pub fn generate_from_json(
    raw: &str,
    interface_name: &str,
    options: &CodegenOptions,
) -> Result<GeneratorResult> {
    let module: TypeModule = serde_json::from_str(raw)?;
    generate(&module, interface_name, options)
}

fn member_line(member: &Member) -> String {
    match member.ty.as_ref().and_then(field_expression) {
        Some(expr) => format!(".field({:?}, {expr})", member.name),
        None => format!("// {}: can not generate field", member.name),
    }
}

fn field_expression(node: &TypeNode) -> Option<String> {
    match node {
        TypeNode::String => Some("\"\"".to_string()),
        TypeNode::Number => Some("sequence()".to_string()),
        TypeNode::Boolean => Some("boolean()".to_string()),
        TypeNode::Array { .. } => Some("per_build(|| Value::List(Vec::new()))".to_string()),
        TypeNode::Union { members } => {
            let options = members
                .iter()
                .map(|member| match member {
                    TypeNode::Literal { value } => Some(literal_expression(value)),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            if options.is_empty() {
                return None;
            }
            Some(format!("one_of([{}])", options.join(", ")))
        }
        TypeNode::Literal { .. } | TypeNode::Reference { .. } | TypeNode::Object { .. } => None,
    }
}

fn literal_expression(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Bool(flag) => format!("Value::from({flag})"),
        LiteralValue::String(text) => format!("Value::from({text:?})"),
        LiteralValue::Number(number) if number.is_f64() => format!("Value::from({number}_f64)"),
        LiteralValue::Number(number) => format!("Value::from({number})"),
    }
}

/// `UserProfile` -> `user_profile`.
pub(crate) fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
            out.push(ch);
        }
    }
    out
}
