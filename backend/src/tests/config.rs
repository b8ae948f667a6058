use serial_test::serial;

use crate::config::Config;

fn clear_env() {
    // SAFETY: every test touching the environment runs under #[serial].
    unsafe {
        std::env::remove_var("SERVER_ADDR");
        std::env::remove_var("SEED_MOCK_DATA");
        std::env::remove_var("CORS_ALLOW_ORIGIN");
    }
}

#[test]
#[serial]
fn test_defaults_without_env() {
    clear_env();
    let config = Config::from_env().unwrap();
    assert_eq!(config.server_addr, "0.0.0.0:8080");
    assert!(config.seed_mock_data);
    assert!(config.cors_allow_origin.is_none());
}

#[test]
#[serial]
fn test_reads_env_overrides() {
    clear_env();
    // SAFETY: see clear_env.
    unsafe {
        std::env::set_var("SERVER_ADDR", "127.0.0.1:3001");
        std::env::set_var("SEED_MOCK_DATA", "false");
        std::env::set_var("CORS_ALLOW_ORIGIN", "http://localhost:8081");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.server_addr, "127.0.0.1:3001");
    assert!(!config.seed_mock_data);
    assert_eq!(config.cors_allow_origin.as_deref(), Some("http://localhost:8081"));
    clear_env();
}

#[test]
#[serial]
fn test_rejects_bad_seed_flag() {
    clear_env();
    // SAFETY: see clear_env.
    unsafe {
        std::env::set_var("SEED_MOCK_DATA", "maybe");
    }
    assert!(Config::from_env().is_err());
    clear_env();
}
