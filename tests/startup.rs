use std::process::Command;

#[test]
fn invalid_config_is_logged_and_exits_with_status_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_todo_api"))
        .env("APP_DATABASE__URL", "sqlite::memory:")
        .env("APP_DATABASE__MAX_CONNECTIONS", "0")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start");

    assert_eq!(output.status.code(), Some(1));

    let logged = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(logged.contains("failed to load config"), "output: {logged}");
    assert!(
        logged.contains("database.max_connections must be > 0"),
        "output: {logged}"
    );
    assert!(!logged.contains("panicked"), "output: {logged}");
}
