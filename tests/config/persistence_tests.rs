// Gateway config persistence tests

use serde_json::{Map, Value, json};
use std::fs;
use tempfile::tempdir;
use toolgate_core::config::config_file_name;
use toolgate_core::{ClientInfo, ConfigError, GatewayConfig, Region, ResourceNames};

fn sample_config(suffix: &str) -> GatewayConfig {
    GatewayConfig {
        gateway_url: "https://gw-1234.gateway.bedrock-agentcore.eu-west-1.amazonaws.com/mcp"
            .to_string(),
        gateway_id: "gw-1234".to_string(),
        region: Region::EuWest1,
        client_info: ClientInfo {
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            token_endpoint: "https://agentcore-1a2b3c4d.auth.eu-west-1.amazoncognito.com/oauth2/token"
                .to_string(),
            scope: format!("TestGateway-{suffix}/invoke"),
            user_pool_id: Some("eu-west-1_pool".to_string()),
            domain_prefix: Some("agentcore-1a2b3c4d".to_string()),
            extra: Map::new(),
        },
        names: ResourceNames::for_suffix(suffix),
        suffix: suffix.to_string(),
    }
}

#[test]
fn saved_config_loads_back_unchanged() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(config_file_name("0815"));
    let config = sample_config("0815");

    config.save_new(&path).expect("save");
    let loaded = GatewayConfig::load(&path).expect("load");
    assert_eq!(loaded, config);

    let text = fs::read_to_string(&path).expect("read");
    assert!(
        text.starts_with("{\n  \"gateway_url\""),
        "expected 2-space indented JSON, got: {text}"
    );
    assert!(text.contains("\n  \"names\": {\n    \"authorizer\""));

    let raw: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(raw["region"], "eu-west-1");
    assert_eq!(raw["names"]["gateway"], "AgentCoreGateway-0815");
    assert_eq!(raw["suffix"], "0815");
}

#[test]
fn existing_file_is_never_overwritten() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join(config_file_name("0815"));
    fs::write(&path, "keep me").expect("seed");

    let err = sample_config("0815").save_new(&path).expect_err("refuse");
    assert!(matches!(err, ConfigError::AlreadyExists { .. }));
    assert_eq!(fs::read_to_string(&path).expect("read"), "keep me");
}

#[test]
fn unknown_client_info_fields_survive_a_round_trip() {
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("gateway_config.json");
    let mut raw = serde_json::to_value(sample_config("0001")).expect("encode");
    raw["client_info"]["issuer"] = json!("custom-idp");
    fs::write(&source, raw.to_string()).expect("write");

    let loaded = GatewayConfig::load(&source).expect("load");
    assert_eq!(loaded.client_info.extra.get("issuer"), Some(&json!("custom-idp")));

    let copy = dir.path().join(config_file_name("0001"));
    loaded.save_new(&copy).expect("save copy");
    let reread: Value = serde_json::from_str(&fs::read_to_string(&copy).expect("read")).expect("json");
    assert_eq!(reread["client_info"]["issuer"], "custom-idp");
}

#[test]
fn malformed_and_missing_files_are_reported() {
    let dir = tempdir().expect("tempdir");
    let missing = GatewayConfig::load(&dir.path().join("gateway_config_0000.json"));
    assert!(matches!(missing, Err(ConfigError::NotFound { .. })));

    let broken = dir.path().join("gateway_config_0001.json");
    fs::write(&broken, "{ not json").expect("write");
    assert!(matches!(
        GatewayConfig::load(&broken),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn invalid_suffix_fails_validation() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("gateway_config_12.json");
    let mut config = sample_config("0815");
    config.suffix = "12".to_string();

    assert!(matches!(
        config.save_new(&path),
        Err(ConfigError::InvalidSuffix { .. })
    ));
    assert!(!path.exists());
}
