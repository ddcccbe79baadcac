use super::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_empty_toml_produces_defaults() {
    let cfg: AppConfig = toml::from_str("").expect("Should parse empty TOML");
    assert_eq!(cfg, AppConfig::default());
}

#[test]
fn test_defaults() {
    let cfg = AppConfig::default();
    assert_eq!(cfg.server.addr, DEFAULT_ADDR);
    assert_eq!(cfg.auth.cookie_name, "one_list_auth");
    assert_eq!(cfg.auth.login_path, "/login");
    assert_eq!(cfg.auth.login_delay_secs, 6);
    assert!(!cfg.auth.secure_cookie);
    assert!(cfg.auth.password.is_empty());
    assert_eq!(cfg.storage.db_path, None);
}

#[test]
fn test_partial_auth_table_keeps_other_defaults() {
    let cfg: AppConfig =
        toml::from_str("[auth]\npassword = \"hunter2\"\n").expect("Should parse [auth]");
    assert_eq!(cfg.auth.password, "hunter2");
    assert_eq!(cfg.auth.login_path, "/login");
    assert_eq!(cfg.server, ServerConfig::default());
}

#[test]
fn test_full_config() {
    let toml_str = r#"
[server]
addr = "0.0.0.0:9000"

[auth]
cookie_name = "me"
password = "pw"
login_path = "/hierinloggen"
secure_cookie = true
login_delay_secs = 0

[storage]
db_path = "/var/lib/one-list/items.db"
"#;
    let cfg: AppConfig = toml::from_str(toml_str).expect("Should parse full config");
    assert_eq!(cfg.server.addr, "0.0.0.0:9000");
    assert_eq!(cfg.auth.cookie_name, "me");
    assert!(cfg.auth.secure_cookie);
    assert_eq!(cfg.auth.login_delay_secs, 0);
    assert_eq!(
        cfg.storage.resolved_db_path(),
        PathBuf::from("/var/lib/one-list/items.db")
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    let result: Result<AppConfig, _> = toml::from_str("[auth]\nusername = \"a\"\n");
    assert!(result.is_err(), "Unknown fields should be rejected");
}

#[test]
fn test_unknown_table_is_rejected() {
    let result: Result<AppConfig, _> = toml::from_str("[metrics]\nenabled = true\n");
    assert!(result.is_err());
}

#[test]
fn test_validate_requires_password() {
    let cfg = AppConfig::default();
    assert!(matches!(cfg.validate(), Err(ConfigError::MissingPassword)));
}

#[test]
fn test_validate_rejects_relative_login_path() {
    let mut cfg = AppConfig::default();
    cfg.auth.password = "pw".to_string();
    cfg.auth.login_path = "login".to_string();
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidLoginPath(_))));
    cfg.auth.login_path = "/login".to_string();
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_validate_rejects_login_path_shadowing_route() {
    let mut cfg = AppConfig::default();
    cfg.auth.password = "pw".to_string();
    for path in ["/", "/view", "/health"] {
        cfg.auth.login_path = path.to_string();
        assert!(
            matches!(cfg.validate(), Err(ConfigError::InvalidLoginPath(_))),
            "{path} should be rejected"
        );
    }
}

#[test]
fn test_validate_rejects_login_path_the_router_cannot_serve() {
    let mut cfg = AppConfig::default();
    cfg.auth.password = "pw".to_string();
    for path in [
        "/login/{",
        "/login/{id}",
        "/{*rest}",
        "/files/*",
        "/:login",
        "//login",
        "/login//in",
        "/login/",
        "/log in",
        "/login?x=1",
    ] {
        cfg.auth.login_path = path.to_string();
        assert!(
            matches!(cfg.validate(), Err(ConfigError::InvalidLoginPath(_))),
            "{path} should be rejected"
        );
    }
}

#[test]
fn test_validate_accepts_nested_plain_login_path() {
    let mut cfg = AppConfig::default();
    cfg.auth.password = "pw".to_string();
    for path in ["/hierinloggen", "/auth/sign-in", "/v1.0/log_in~"] {
        cfg.auth.login_path = path.to_string();
        assert!(cfg.validate().is_ok(), "{path} should be accepted");
    }
}

#[test]
fn test_resolved_db_path_defaults_to_home() {
    let cfg = StorageConfig::default();
    assert!(cfg.resolved_db_path().ends_with(".one-list/main.db"));
}

#[test]
fn test_load_config_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[server]\naddr = \"127.0.0.1:1234\"\n").unwrap();

    let cfg = load_config(Some(&path)).expect("Should load");
    assert_eq!(cfg.server.addr, "127.0.0.1:1234");
}

#[test]
fn test_load_config_explicit_missing_file_errors() {
    let dir = tempdir().unwrap();
    let result = load_config(Some(&dir.path().join("nope.toml")));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_load_config_invalid_toml_errors() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "this is not toml =").unwrap();
    assert!(matches!(load_config_from(&path), Err(ConfigError::Toml(_))));
}

#[test]
fn test_config_path_location() {
    if let Some(path) = config_path() {
        assert!(path.ends_with(".one-list/config.toml"));
    }
}
