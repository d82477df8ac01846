//! Scenario tests: drive the real binary against replayed HTTP recordings.
//!
//! Each scenario mounts the exchanges of a cassette from `tests/recordings/`
//! onto a mock server, points an isolated profile at it, and runs the
//! production command. A scenario run is therefore the production code path
//! plus the injected playback interceptor; nothing in the binary changes.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use nimbus_mgmt::recording::Cassette;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_cassette(name: &str) -> Cassette {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/recordings")
        .join(name);
    Cassette::load(&fixture)
        .unwrap_or_else(|e| panic!("failed to load cassette {name}: {e}"))
}

/// Mount every exchange of a cassette onto the mock server.
///
/// Matching is on method, path, and query; request bodies are verified by the
/// individual tests through `received_requests`.
async fn mount_cassette(server: &MockServer, cassette: &Cassette) {
    for exchange in &cassette.exchanges {
        let mut mock = Mock::given(method(exchange.request.method.as_str()))
            .and(path(exchange.request.path.as_str()));
        for (key, value) in &exchange.request.query {
            mock = mock.and(query_param(key.as_str(), value.as_str()));
        }

        let mut response = ResponseTemplate::new(exchange.response.status)
            .set_body_json(&exchange.response.body);
        if let Some(ref request_id) = exchange.response.request_id {
            response = response.insert_header("x-nimbus-request-id", request_id.as_str());
        }
        mock.respond_with(response).mount(server).await;
    }
}

/// Write a config file with a single profile pointing at the mock server.
fn write_profile(dir: &TempDir, api_url: &str) -> PathBuf {
    let config_path = dir.path().join("config.toml");
    let content = format!(
        r#"default_profile = "scenario"

[profiles.scenario]
api_url = "{api_url}"
token = "scenario-token"
subscription = "sub-0000"
"#
    );
    fs::write(&config_path, content).unwrap();
    config_path
}

/// Binary bound to the isolated profile; env overrides are disabled by the
/// explicit --config-file.
fn nimbusctl(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("nimbusctl").unwrap();
    cmd.arg("--config-file")
        .arg(config_path)
        .env_remove("NIMBUSCTL_PROFILE")
        .env_remove("NIMBUSCTL_CONFIG_FILE");
    cmd
}

fn stdout_of(assert: assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

// ---------------------------------------------------------------------------
// compute extension-image
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn extension_image_get_projects_the_recorded_response() {
    let server = MockServer::start().await;
    mount_cassette(&server, &load_cassette("extension_image_get.json")).await;
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, &server.uri());

    // "West US" exercises location canonicalization on the way to the
    // recorded westus path.
    let assert = nimbusctl(&config)
        .args([
            "compute",
            "extension-image",
            "get",
            "--location",
            "West US",
            "--publisher",
            "Nimbus.Diagnostics",
            "--type",
            "TraceCollector",
            "--version",
            "2.1",
            "-o",
            "json",
        ])
        .assert()
        .success();

    let output: Value = serde_json::from_str(&stdout_of(assert)).unwrap();
    assert_eq!(output["requestId"], "cas-ext-001");
    assert_eq!(output["statusCode"], 200);
    assert_eq!(output["name"], "2.1");
    assert_eq!(output["location"], "westus");
    assert_eq!(output["operatingSystem"], "Linux");
    assert_eq!(output["computeRole"], "IaaS");
    assert_eq!(output["scaleSetEnabled"], true);
    assert_eq!(output["publisher"], "Nimbus.Diagnostics");
    assert_eq!(output["type"], "TraceCollector");
    assert_eq!(output["version"], "2.1");
}

#[tokio::test(flavor = "multi_thread")]
async fn deprecated_detail_warns_then_matches_get_output() {
    let server = MockServer::start().await;
    mount_cassette(&server, &load_cassette("extension_image_get.json")).await;
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, &server.uri());

    let selector = [
        "--location",
        "westus",
        "--publisher",
        "Nimbus.Diagnostics",
        "--type",
        "TraceCollector",
        "--version",
        "2.1",
        "-o",
        "json",
    ];

    let get_stdout = stdout_of(
        nimbusctl(&config)
            .args(["compute", "extension-image", "get"])
            .args(selector)
            .assert()
            .success(),
    );

    let detail = nimbusctl(&config)
        .args(["compute", "extension-image", "detail"])
        .args(selector)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains("deprecated"));

    // The warning is the only difference; stdout is identical to `get`.
    assert_eq!(stdout_of(detail), get_stdout);
}

// ---------------------------------------------------------------------------
// batch task
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn task_create_sends_the_spec_and_projects_the_created_task() {
    let server = MockServer::start().await;
    mount_cassette(&server, &load_cassette("task_create.json")).await;
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, &server.uri());

    let assert = nimbusctl(&config)
        .args([
            "batch",
            "task",
            "create",
            "--account",
            "acct",
            "--workitem",
            "wi",
            "--job",
            "job-1",
            "--name",
            "task1",
            "--command-line",
            "cmd /c echo hello",
            "--env",
            "MODE=fast",
            "-o",
            "json",
        ])
        .assert()
        .success();

    let output: Value = serde_json::from_str(&stdout_of(assert)).unwrap();
    assert_eq!(output["account"], "acct");
    assert_eq!(output["workitem"], "wi");
    assert_eq!(output["job"], "job-1");
    assert_eq!(output["name"], "task1");
    assert_eq!(output["state"], "active");
    assert_eq!(output["environment"][0]["name"], "MODE");
    assert_eq!(output["environment"][0]["value"], "fast");

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .expect("creation request");
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    assert_eq!(body["name"], "task1");
    assert_eq!(body["commandLine"], "cmd /c echo hello");
    assert_eq!(body["environmentSettings"][0]["name"], "MODE");
    assert_eq!(body["environmentSettings"][0]["value"], "fast");
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_conflict_surfaces_the_service_error_unchanged() {
    let server = MockServer::start().await;
    mount_cassette(&server, &load_cassette("task_create_conflict.json")).await;
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, &server.uri());

    nimbusctl(&config)
        .args([
            "batch",
            "task",
            "create",
            "--account",
            "acct",
            "--workitem",
            "wi",
            "--job",
            "job-1",
            "--name",
            "task1",
            "--command-line",
            "cmd /c echo hello",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("409"))
        .stderr(predicate::str::contains("The specified task already exists."));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_by_name_and_by_stdin_issue_the_same_request() {
    let server = MockServer::start().await;
    mount_cassette(&server, &load_cassette("task_delete.json")).await;
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, &server.uri());

    nimbusctl(&config)
        .args([
            "batch", "task", "delete", "--account", "acct", "--workitem", "wi", "--job", "job-1",
            "--name", "task1", "--force",
        ])
        .assert()
        .success();

    // Pipeline form: the target comes from the piped task object.
    let piped = serde_json::json!({
        "account": "acct",
        "workitem": "wi",
        "job": "job-1",
        "name": "task1",
        "state": "active"
    });
    nimbusctl(&config)
        .args(["batch", "task", "delete", "--stdin", "--force"])
        .write_stdin(piped.to_string())
        .assert()
        .success();

    let requests = server.received_requests().await.unwrap();
    let deletes: Vec<_> = requests
        .iter()
        .filter(|r| r.method.as_str() == "DELETE")
        .collect();
    assert_eq!(deletes.len(), 2);
    assert_eq!(deletes[0].url.path(), deletes[1].url.path());
    assert_eq!(deletes[0].url.query(), deletes[1].url.query());
    assert_eq!(
        deletes[0].url.path(),
        "/batch/accounts/acct/workitems/wi/jobs/job-1/tasks/task1"
    );
}

// ---------------------------------------------------------------------------
// network app-gateway pipeline
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread")]
async fn gateway_pool_set_pipeline_commits_the_new_address_list() {
    let server = MockServer::start().await;
    mount_cassette(&server, &load_cassette("gateway_backend_pool_set.json")).await;
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, &server.uri());

    // Stage 1: fetch the gateway.
    let fetched = stdout_of(
        nimbusctl(&config)
            .args([
                "network",
                "app-gateway",
                "get",
                "--resource-group",
                "rg1",
                "--name",
                "gw1",
                "-o",
                "json",
            ])
            .assert()
            .success(),
    );
    let gateway: Value = serde_json::from_str(&fetched).unwrap();
    assert_eq!(
        gateway["backendAddressPools"][0]["addresses"][0]["ipAddress"],
        "10.0.0.1"
    );

    // Stage 2: replace the pool locally; no service call happens here.
    let before_edit = server.received_requests().await.unwrap().len();
    let edited = stdout_of(
        nimbusctl(&config)
            .args([
                "network",
                "backend-pool",
                "set",
                "--name",
                "pool1",
                "--ip",
                "10.0.0.9",
                "-o",
                "json",
            ])
            .write_stdin(fetched)
            .assert()
            .success(),
    );
    assert_eq!(
        server.received_requests().await.unwrap().len(),
        before_edit
    );
    let edited_gateway: Value = serde_json::from_str(&edited).unwrap();
    let pools = edited_gateway["backendAddressPools"].as_array().unwrap();
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0]["name"], "pool1");
    assert_eq!(pools[0]["addresses"][0]["ipAddress"], "10.0.0.9");

    // Stage 3: commit, and verify the PUT carried the rebuilt pool.
    let committed = stdout_of(
        nimbusctl(&config)
            .args([
                "network",
                "app-gateway",
                "update",
                "--resource-group",
                "rg1",
                "-o",
                "json",
            ])
            .write_stdin(edited)
            .assert()
            .success(),
    );
    let committed_gateway: Value = serde_json::from_str(&committed).unwrap();
    assert_eq!(committed_gateway["provisioningState"], "Updating");
    assert_eq!(
        committed_gateway["backendAddressPools"][0]["addresses"][0]["ipAddress"],
        "10.0.0.9"
    );

    let requests = server.received_requests().await.unwrap();
    let put = requests
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("commit request");
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body["name"], "gw1");
    assert_eq!(body["backendAddressPools"][0]["name"], "pool1");
    assert_eq!(
        body["backendAddressPools"][0]["backendAddresses"][0]["ipAddress"],
        "10.0.0.9"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn gateway_pool_set_with_unknown_name_fails_without_a_service_call() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let config = write_profile(&dir, &server.uri());

    let gateway = serde_json::json!({
        "name": "gw1",
        "location": "westus",
        "backendAddressPools": [
            {"name": "pool1", "addresses": [{"ipAddress": "10.0.0.1"}], "ipConfigurationIds": []}
        ],
        "backendHttpSettings": []
    });

    nimbusctl(&config)
        .args([
            "network",
            "backend-pool",
            "set",
            "--name",
            "missing",
            "--ip",
            "10.0.0.9",
        ])
        .write_stdin(gateway.to_string())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "backend address pool with the specified name does not exist",
        ))
        // The gateway is not emitted on failure: the pipeline stops here.
        .stdout(predicate::str::is_empty());

    assert!(server.received_requests().await.unwrap().is_empty());
}
