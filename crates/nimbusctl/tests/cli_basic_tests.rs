use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a test command
fn nimbusctl() -> Command {
    Command::cargo_bin("nimbusctl").unwrap()
}

/// Helper bound to an isolated (empty) config file so tests never touch the
/// host configuration.
fn nimbusctl_isolated(dir: &tempfile::TempDir) -> Command {
    let mut cmd = nimbusctl();
    cmd.arg("--config-file")
        .arg(dir.path().join("config.toml"))
        .env_remove("NIMBUSCTL_PROFILE")
        .env_remove("NIMBUSCTL_CONFIG_FILE");
    cmd
}

#[test]
fn test_help_flag() {
    nimbusctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nimbus management CLI"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_help_short_flag() {
    nimbusctl()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_flag() {
    nimbusctl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nimbusctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    nimbusctl()
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_subcommand() {
    nimbusctl()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_profile_help() {
    nimbusctl()
        .arg("profile")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile management"));
}

#[test]
fn test_compute_help() {
    nimbusctl()
        .arg("compute")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Compute resource operations"));
}

#[test]
fn test_network_help() {
    nimbusctl()
        .arg("network")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Network resource operations"));
}

#[test]
fn test_batch_help() {
    nimbusctl()
        .arg("batch")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batch resource operations"));
}

#[test]
fn test_service_prefix_inferred_for_bare_task() {
    // `task` exists only under `batch`, so the prefix is injected.
    nimbusctl()
        .arg("task")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Task operations"));
}

#[test]
fn test_service_prefix_inferred_for_bare_extension_image() {
    nimbusctl()
        .arg("extension-image")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extension image"));
}

#[test]
fn test_invalid_output_format() {
    nimbusctl()
        .arg("profile")
        .arg("list")
        .arg("-o")
        .arg("invalid")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_mandatory_parameter_is_a_usage_error() {
    // Mandatory parameters are enforced before any dispatch.
    nimbusctl()
        .args(["batch", "task", "get", "--account", "acct"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_task_delete_requires_name_or_stdin() {
    nimbusctl()
        .args(["batch", "task", "delete", "--account", "a", "--workitem", "w", "--job", "j"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_pool_address_modes_are_mutually_exclusive() {
    nimbusctl()
        .args([
            "network",
            "backend-pool",
            "set",
            "--name",
            "pool1",
            "--ip",
            "10.0.0.1",
            "--fqdn",
            "app.example.com",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_profile_list_empty_config_outputs_empty_array() {
    let dir = tempfile::TempDir::new().unwrap();
    nimbusctl_isolated(&dir)
        .args(["profile", "list", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"));
}

#[test]
fn test_profile_set_show_and_remove_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();

    nimbusctl_isolated(&dir)
        .args([
            "profile",
            "set",
            "prod",
            "--token",
            "secret-token",
            "--subscription",
            "sub-1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'prod' saved"));

    // Token never shows up in the listing or in show output.
    nimbusctl_isolated(&dir)
        .args(["profile", "show", "prod", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("secret-token").not())
        .stdout(predicate::str::contains("sub-1"));

    nimbusctl_isolated(&dir)
        .args(["profile", "remove", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'prod' removed"));

    nimbusctl_isolated(&dir)
        .args(["profile", "show", "prod"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_empty_mandatory_parameter_fails_before_dispatch() {
    let dir = tempfile::TempDir::new().unwrap();

    nimbusctl_isolated(&dir)
        .args(["profile", "set", "test", "--token", "tok", "--subscription", "sub-1"])
        .assert()
        .success();

    // An empty value passes clap's presence check but is rejected before any
    // request is attempted.
    nimbusctl_isolated(&dir)
        .args([
            "batch", "task", "get", "--account", "", "--workitem", "w", "--job", "j", "--name",
            "t",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("account must not be empty"));
}

#[test]
fn test_command_without_profile_fails_before_dispatch() {
    let dir = tempfile::TempDir::new().unwrap();
    nimbusctl_isolated(&dir)
        .args([
            "batch", "task", "get", "--account", "a", "--workitem", "w", "--job", "j", "--name",
            "t",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No profile configured"));
}
