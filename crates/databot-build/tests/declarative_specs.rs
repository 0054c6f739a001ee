use databot_build::{
    BuildConfiguration, BuildOptions, BuildTimeConfig, Builder, FixedRandom, SpecError, Value,
};

const USER_CONFIG: &str = r#"{
  "name": "user",
  "fields": {
    "id": {"$generator": "sequence"},
    "email": {"$generator": "sequence", "template": "user{n}@test.com"},
    "role": {"$generator": "oneOf", "options": ["viewer", "editor"]},
    "active": {"$generator": "bool"},
    "tags": {"$generator": "perBuild", "value": []},
    "created_at": {"$date": "2020-01-01T00:00:00Z"},
    "manager": null,
    "address": {"city": "paris", "zip": {"$generator": "sequence", "template": "750{n}"}}
  },
  "traits": {
    "admin": {"overrides": {"role": "admin", "permissions": ["all"]}}
  }
}"#;

#[test]
fn json_configurations_build_like_code_configurations() {
    let config = BuildConfiguration::from_json_str(USER_CONFIG).expect("parse configuration");
    assert_eq!(config.name(), Some("user"));

    let builder = Builder::new(config)
        .expect("valid configuration")
        .with_random(FixedRandom::new(0.0));

    let value = builder.build().expect("build");
    assert_eq!(
        value.to_json(),
        serde_json::json!({
            "id": 1,
            "email": "user2@test.com",
            "role": "viewer",
            "active": true,
            "tags": [],
            "created_at": "2020-01-01T00:00:00.000Z",
            "manager": null,
            "address": {"city": "paris", "zip": "7503"}
        })
    );
}

#[test]
fn json_traits_apply_and_add_fields() {
    let config = BuildConfiguration::from_json_str(USER_CONFIG).expect("parse configuration");
    let builder = Builder::with_options(config, BuildOptions::seeded(3)).expect("valid");

    let value = builder
        .build_with(&BuildTimeConfig::new().with_traits("admin"))
        .expect("build");
    assert_eq!(value["role"], Value::from("admin"));
    assert_eq!(value["permissions"], Value::from(vec!["all"]));
}

#[test]
fn json_fake_generators_use_the_catalog() {
    let config = BuildConfiguration::from_json_str(
        r#"{"fields": {"name": {"$generator": "fake", "faker": "name.first_name", "locale": "pt_BR"}}}"#,
    )
    .expect("parse configuration");
    let builder = Builder::with_options(config, BuildOptions::seeded(11)).expect("valid");

    let value = builder.build().expect("build");
    assert!(!value["name"].as_str().expect("text").is_empty());
}

#[test]
fn json_rejects_empty_one_of() {
    let err = BuildConfiguration::from_json_str(
        r#"{"fields": {"role": {"$generator": "oneOf", "options": []}}}"#,
    )
    .expect_err("empty options");
    assert!(matches!(err, SpecError::InvalidSpecification(_)));
}

#[test]
fn json_rejects_unknown_generators() {
    let err = BuildConfiguration::from_json_str(
        r#"{"fields": {"id": {"$generator": "uuid"}}}"#,
    )
    .expect_err("unsupported generator");
    assert!(matches!(err, SpecError::UnsupportedGeneratorKind(kind) if kind == "uuid"));
}

#[test]
fn json_rejects_unknown_document_keys() {
    let err = BuildConfiguration::from_json_str(r#"{"fields": {}, "postBuild": "upper"}"#)
        .expect_err("unknown key");
    assert!(matches!(err, SpecError::Json(_)));
}
