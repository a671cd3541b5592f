use campus::config::{ConfigError, ConfigLoader};
use std::{
    env, fs,
    sync::{Mutex, MutexGuard, OnceLock},
};
use tempfile::TempDir;

const KEYS: &[&str] = &[
    "CAMPUS_PROFILE",
    "CAMPUS_LOG_LEVEL",
    "CAMPUS_LOG_FORMAT",
    "CAMPUS_DATABASE_URL",
    "CAMPUS_DB_MAX_CONNECTIONS",
    "CAMPUS_DB_ACQUIRE_TIMEOUT_MS",
    "CAMPUS_DB_CONNECT_RETRIES",
    "CAMPUS_DB_SQLX_LOGGING",
];

fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

fn env_guard() -> MutexGuard<'static, ()> {
    env_lock()
        .lock()
        .unwrap_or_else(|poison| poison.into_inner())
}

fn clear_env() {
    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }
}

fn write_env_file(dir: &TempDir, name: &str, contents: &str) {
    let path = dir.path().join(name);
    fs::write(path, contents).unwrap();
}

#[test]
fn loads_defaults_when_no_env_present() {
    let _guard = env_guard();
    clear_env();
    let dir = TempDir::new().unwrap();

    let cfg = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .expect("config loads with defaults");

    assert_eq!(cfg.profile, "local");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.log_format, "json");
    assert_eq!(cfg.database_url, "sqlite://campus.db?mode=rwc");
    assert_eq!(cfg.db_max_connections, 10);
    assert_eq!(cfg.db_acquire_timeout_ms, 5000);
    assert_eq!(cfg.db_connect_retries, 5);
    assert!(!cfg.db_sqlx_logging);
    assert!(cfg.is_sqlite());
}

#[test]
fn layered_env_files_apply_in_order() {
    let _guard = env_guard();
    clear_env();
    let dir = TempDir::new().unwrap();

    write_env_file(
        &dir,
        ".env",
        "CAMPUS_PROFILE=staging\nCAMPUS_LOG_LEVEL=warn\nCAMPUS_DB_MAX_CONNECTIONS=3\n",
    );
    write_env_file(
        &dir,
        ".env.staging",
        "CAMPUS_DATABASE_URL=postgres://campus:pw@db:5432/campus\nCAMPUS_LOG_LEVEL=debug\n",
    );
    write_env_file(&dir, ".env.staging.local", "CAMPUS_DB_MAX_CONNECTIONS=7\n");
    // Keys without the prefix are ignored.
    write_env_file(&dir, ".env.local", "CAMPUS_LOG_LEVEL=info\nLOG_LEVEL=trace\n");

    let cfg = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .expect("layered config loads");

    assert_eq!(cfg.profile, "staging");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.database_url, "postgres://campus:pw@db:5432/campus");
    assert_eq!(cfg.db_max_connections, 7);
    assert!(!cfg.is_sqlite());
}

#[test]
fn process_env_overrides_files() {
    let _guard = env_guard();
    clear_env();
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "CAMPUS_LOG_FORMAT=json\nCAMPUS_DB_SQLX_LOGGING=false\n");

    unsafe {
        env::set_var("CAMPUS_LOG_FORMAT", "pretty");
        env::set_var("CAMPUS_DB_SQLX_LOGGING", "true");
    }

    let cfg = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .expect("config loads");
    clear_env();

    assert_eq!(cfg.log_format, "pretty");
    assert!(cfg.db_sqlx_logging);
}

#[test]
fn rejects_unparseable_numbers() {
    let _guard = env_guard();
    clear_env();
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "CAMPUS_DB_CONNECT_RETRIES=lots\n");

    let err = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .load()
        .expect_err("invalid number is rejected");

    match err {
        ConfigError::InvalidValue { key, value } => {
            assert_eq!(key, "CAMPUS_DB_CONNECT_RETRIES");
            assert_eq!(value, "lots");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn rejects_unsupported_database_scheme() {
    let _guard = env_guard();
    clear_env();
    let dir = TempDir::new().unwrap();

    unsafe {
        env::set_var("CAMPUS_DATABASE_URL", "mysql://root@localhost/campus");
    }
    let result = ConfigLoader::with_base_dir(dir.path().to_path_buf()).load();
    clear_env();

    assert!(matches!(
        result,
        Err(ConfigError::UnsupportedDatabaseScheme { scheme }) if scheme == "mysql"
    ));
}

#[test]
fn rejects_unknown_log_format() {
    let _guard = env_guard();
    clear_env();
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "CAMPUS_LOG_FORMAT=xml\n");

    let result = ConfigLoader::with_base_dir(dir.path().to_path_buf()).load();

    assert!(matches!(result, Err(ConfigError::InvalidLogFormat { .. })));
}

#[test]
fn explicit_database_url_replaces_invalid_env_value() {
    let _guard = env_guard();
    clear_env();
    let dir = TempDir::new().unwrap();
    write_env_file(&dir, ".env", "CAMPUS_DATABASE_URL=not a url\n");
    unsafe {
        env::set_var("CAMPUS_DATABASE_URL", "mysql://root@localhost/campus");
    }

    let result = ConfigLoader::with_base_dir(dir.path().to_path_buf())
        .with_database_url(Some("sqlite::memory:".to_string()))
        .load();
    let without_override = ConfigLoader::with_base_dir(dir.path().to_path_buf()).load();
    clear_env();

    let cfg = result.expect("explicit URL wins over the environment");
    assert_eq!(cfg.database_url, "sqlite::memory:");
    assert!(matches!(
        without_override,
        Err(ConfigError::UnsupportedDatabaseScheme { .. })
    ));
}
