use databot_codegen::{
    CodegenError, CodegenOptions, InterfaceDecl, LiteralValue, Member, TypeModule, TypeNode,
    generate, generate_from_json, type_module_json_schema,
};
use rstest::rstest;

fn member(name: &str, ty: Option<TypeNode>) -> Member {
    Member {
        name: name.to_string(),
        ty,
    }
}

fn module_with(name: &str, members: Vec<Member>) -> TypeModule {
    TypeModule {
        declarations: vec![InterfaceDecl {
            name: name.to_string(),
            members,
        }],
    }
}

fn text(value: &str) -> TypeNode {
    TypeNode::Literal {
        value: LiteralValue::String(value.to_string()),
    }
}

fn member_line(ty: Option<TypeNode>) -> String {
    let module = module_with("Probe", vec![member("field", ty)]);
    let code = generate(&module, "Probe", &CodegenOptions::default())
        .expect("generate")
        .code;
    code.lines().nth(2).expect("member line").trim().to_string()
}

#[rstest]
#[case::string(Some(TypeNode::String), r#".field("field", "")"#)]
#[case::number(Some(TypeNode::Number), r#".field("field", sequence())"#)]
#[case::boolean(Some(TypeNode::Boolean), r#".field("field", boolean())"#)]
#[case::array(
    Some(TypeNode::Array { element: Box::new(TypeNode::String) }),
    r#".field("field", per_build(|| Value::List(Vec::new())))"#
)]
#[case::reference(
    Some(TypeNode::Reference { name: "Address".to_string() }),
    "// field: can not generate field"
)]
#[case::object(
    Some(TypeNode::Object { members: Vec::new() }),
    "// field: can not generate field"
)]
#[case::lone_literal(Some(text("RED")), "// field: can not generate field")]
#[case::untyped(None, "// field: can not generate field")]
fn members_map_to_field_expressions(#[case] ty: Option<TypeNode>, #[case] expected: &str) {
    assert_eq!(member_line(ty), expected);
}

#[test]
fn literal_unions_become_one_of() {
    let union = TypeNode::Union {
        members: vec![
            text("RED"),
            TypeNode::Literal {
                value: LiteralValue::Number(serde_json::Number::from(5_i64)),
            },
            TypeNode::Literal {
                value: LiteralValue::Bool(false),
            },
        ],
    };
    assert_eq!(
        member_line(Some(union)),
        r#".field("field", one_of([Value::from("RED"), Value::from(5), Value::from(false)]))"#
    );
}

#[test]
fn unions_with_non_literal_members_are_skipped() {
    let union = TypeNode::Union {
        members: vec![text("RED"), TypeNode::String],
    };
    assert_eq!(member_line(Some(union)), "// field: can not generate field");
}

#[test]
fn emits_full_skeleton_with_spaces() {
    let module = module_with(
        "UserProfile",
        vec![
            member("name", Some(TypeNode::String)),
            member("id", Some(TypeNode::Number)),
            member("avatar", Some(TypeNode::Reference { name: "Image".to_string() })),
        ],
    );

    let result = generate(&module, "UserProfile", &CodegenOptions::default()).expect("generate");
    let expected = [
        "let user_profile_builder = Builder::new(",
        "  BuildConfiguration::new()",
        "    .field(\"name\", \"\")",
        "    .field(\"id\", sequence())",
        "    // avatar: can not generate field",
        ")?;",
    ]
    .join("\n");
    assert_eq!(result.code, expected);
}

#[test]
fn tabs_option_indents_with_tabs() {
    let module = module_with("User", vec![member("admin", Some(TypeNode::Boolean))]);

    let result = generate(&module, "User", &CodegenOptions { tabs: true }).expect("generate");
    let expected = [
        "let user_builder = Builder::new(",
        "\tBuildConfiguration::new()",
        "\t\t.field(\"admin\", boolean())",
        ")?;",
    ]
    .join("\n");
    assert_eq!(result.code, expected);
}

#[test]
fn missing_interface_is_an_error() {
    let module = module_with("User", Vec::new());
    let err = generate(&module, "Account", &CodegenOptions::default()).expect_err("not found");
    assert!(matches!(err, CodegenError::InterfaceNotFound(name) if name == "Account"));
}

#[test]
fn json_type_trees_are_accepted() {
    let raw = r#"{
      "declarations": [
        {"name": "Other", "members": []},
        {"name": "User", "members": [
          {"name": "colour", "type": {"kind": "union", "members": [
            {"kind": "literal", "value": "RED"},
            {"kind": "literal", "value": "GREEN"}
          ]}},
          {"name": "tags", "type": {"kind": "array", "element": {"kind": "string"}}},
          {"name": "ratio", "type": {"kind": "union", "members": [
            {"kind": "literal", "value": 0.5}
          ]}}
        ]}
      ]
    }"#;

    let result = generate_from_json(raw, "User", &CodegenOptions::default()).expect("generate");
    let lines: Vec<&str> = result.code.lines().collect();
    assert_eq!(lines[0], "let user_builder = Builder::new(");
    assert_eq!(
        lines[2].trim(),
        r#".field("colour", one_of([Value::from("RED"), Value::from("GREEN")]))"#
    );
    assert_eq!(
        lines[3].trim(),
        r#".field("tags", per_build(|| Value::List(Vec::new())))"#
    );
    assert_eq!(
        lines[4].trim(),
        r#".field("ratio", one_of([Value::from(0.5_f64)]))"#
    );
}

#[test]
fn malformed_json_is_reported() {
    let err = generate_from_json("{\"declarations\": 3}", "User", &CodegenOptions::default())
        .expect_err("invalid");
    assert!(matches!(err, CodegenError::Json(_)));
}

#[test]
fn schema_describes_type_modules() {
    let schema = type_module_json_schema();
    let json = serde_json::to_value(&schema).expect("serialize schema");
    assert_eq!(json["title"], "TypeModule");
    assert!(json["definitions"]["TypeNode"].is_object());
}
