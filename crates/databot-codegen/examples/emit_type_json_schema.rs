use databot_codegen::type_module_json_schema;

fn main() {
    let schema = type_module_json_schema();
    let json = serde_json::to_string_pretty(&schema).expect("serialize schema");
    println!("{json}");
}
