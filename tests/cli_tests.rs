#[cfg(test)]
mod cli_tests {
    use assert_cmd::Command;
    use std::fs;
    use tempfile::TempDir;

    fn databaselib() -> Command {
        Command::cargo_bin("databaselib").unwrap()
    }

    fn sqlite_config(dir: &TempDir) -> String {
        let config_path = dir.path().join("sqlite.conf");
        fs::write(
            &config_path,
            format!("path={}\n", dir.path().join("cli.db").display()),
        )
        .unwrap();
        config_path.display().to_string()
    }

    #[test]
    fn test_insert_and_select() {
        let dir = TempDir::new().unwrap();
        let config = sqlite_config(&dir);
        let config = config.as_str();

        databaselib()
            .args(["sqlite", config, "CREATE TABLE t (id INTEGER, value TEXT)"])
            .assert()
            .success()
            .stdout("");
        databaselib()
            .args(["sqlite", config, "INSERT INTO t VALUES (?, ?)", "1", "foobar"])
            .assert()
            .success();
        databaselib()
            .args(["sqlite", config, "INSERT INTO t VALUES (?, ?)", "2", "NULL"])
            .assert()
            .success();

        databaselib()
            .args(["sqlite", config, "SELECT id, value FROM t ORDER BY id"])
            .assert()
            .success()
            .stdout("{\"id\":\"1\",\"value\":\"foobar\"}\n{\"id\":\"2\",\"value\":null}\n");
    }

    #[test]
    fn test_missing_config_entry() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("empty.conf");
        fs::write(&config_path, "# nothing here\n").unwrap();

        let config = config_path.display().to_string();
        let assert = databaselib()
            .args(["sqlite", config.as_str(), "SELECT 1"])
            .assert()
            .failure()
            .code(1);
        let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
        assert!(stderr.contains("Missing entry 'path'"), "stderr was {}", stderr);
    }

    #[test]
    fn test_unknown_backend() {
        let dir = TempDir::new().unwrap();
        let config = sqlite_config(&dir);
        let config = config.as_str();
        databaselib()
            .args(["oracle", config, "SELECT 1"])
            .assert()
            .failure()
            .code(1);
    }

    #[test]
    fn test_usage() {
        databaselib().arg("sqlite").assert().failure().code(2);
    }
}
