use std::collections::HashMap;

use super::*;

fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    Config::from_lookup(|key| map.get(key).cloned())
}

#[test]
fn defaults_when_nothing_set() {
    let config = load(&[]).unwrap();
    assert_eq!(config.database_url, "sqlite://app.db?mode=rwc");
    assert_eq!(config.port, 7389);
    assert_eq!(config.jwt_secret, "your-secret-key");
    assert_eq!(config.jwt_expiration_hours, 24);
    assert_eq!(config.admin.username, "admin");
    assert_eq!(config.admin.password, "admin");
    assert!(config.static_dir.is_none());
    assert_eq!(config.db_max_connections, 5);
}

#[test]
fn explicit_values_override_defaults() {
    let config = load(&[
        ("DATABASE_URL", "sqlite://other.db"),
        ("PORT", "8080"),
        ("JWT_SECRET", "s3cret"),
        ("JWT_EXPIRATION_HOURS", "2"),
        ("ADMIN_USERNAME", "root"),
        ("ADMIN_PASSWORD", "hunter2"),
        ("STATIC_DIR", "/srv/static"),
        ("DB_MAX_CONNECTIONS", "9"),
    ])
    .unwrap();
    assert_eq!(config.database_url, "sqlite://other.db");
    assert_eq!(config.port, 8080);
    assert_eq!(config.jwt_secret, "s3cret");
    assert_eq!(config.jwt_expiration_hours, 2);
    assert!(config.admin.matches("root", "hunter2"));
    assert_eq!(config.static_dir, Some(PathBuf::from("/srv/static")));
    assert_eq!(config.db_max_connections, 9);
}

#[test]
fn empty_values_fall_back_to_defaults() {
    let config = load(&[("PORT", " "), ("JWT_SECRET", ""), ("STATIC_DIR", "")]).unwrap();
    assert_eq!(config.port, 7389);
    assert_eq!(config.jwt_secret, "your-secret-key");
    assert!(config.static_dir.is_none());
}

#[test]
fn invalid_port_is_an_error() {
    let err = load(&[("PORT", "eighty")]).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { key: "PORT", value: "eighty".to_owned() });
}

#[test]
fn invalid_expiration_is_an_error() {
    assert!(load(&[("JWT_EXPIRATION_HOURS", "1.5")]).is_err());
}

#[test]
fn expiration_must_be_positive_and_bounded() {
    for raw in ["0", "-5", "10000000000", "9223372036854775807"] {
        let err = load(&[("JWT_EXPIRATION_HOURS", raw)]).unwrap_err();
        assert_eq!(err, ConfigError::Invalid { key: "JWT_EXPIRATION_HOURS", value: raw.to_owned() });
    }
    let config = load(&[("JWT_EXPIRATION_HOURS", "87840")]).unwrap();
    assert_eq!(config.jwt_ttl(), TimeDelta::hours(87_840));
}

#[test]
fn credentials_require_both_fields() {
    let admin = AdminCredentials { username: "admin".to_owned(), password: "pw".to_owned() };
    assert!(admin.matches("admin", "pw"));
    assert!(!admin.matches("admin", "PW"));
    assert!(!admin.matches("Admin", "pw"));
}
