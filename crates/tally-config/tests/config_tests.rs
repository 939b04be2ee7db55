use tally_config::{Config, ConfigError, ConfigManager, SessionStore};
use tally_domain::{Credential, Session};
use tempfile::tempdir;

#[test]
fn default_config_points_at_local_backend() {
    let cfg = Config::default();

    assert_eq!(cfg.api_base_url, "http://localhost:8080/api");
    assert_eq!(cfg.currency_symbol, "₹");
    assert!(!cfg.log_filter.is_empty());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().join("tally")).expect("manager");

    let mut cfg = Config::default();
    cfg.set("api_base_url", "https://budget.example.com/api/").expect("set url");
    cfg.set("currency_symbol", "€").expect("set symbol");

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.api_base_url, "https://budget.example.com/api");
    assert_eq!(loaded.currency_symbol, "€");
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn corrupt_config_is_a_serde_error() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(manager.config_path(), "{ not json").expect("write garbage");

    assert!(matches!(manager.load(), Err(ConfigError::Serde(_))));
}

#[test]
fn session_store_round_trip_and_clear() {
    let dir = tempdir().expect("tempdir");
    let store = SessionStore::new(dir.path().join("session.json"));
    assert!(store.load().expect("load empty").is_none());

    let session = Session {
        credential: Credential::new("jwt-abc"),
        user_name: "Asha".into(),
        user_email: "asha@example.com".into(),
    };
    store.save(&session).expect("save session");
    assert_eq!(store.load().expect("load session"), Some(session));

    store.clear().expect("clear");
    store.clear().expect("clear twice");
    assert!(store.load().expect("load cleared").is_none());
}
