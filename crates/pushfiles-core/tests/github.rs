//! End-to-end tests for `github:multi-file-push` against a mocked GitHub
//! REST API.
use pushfiles_core::{
    PushFilesError,
    action::{
        ActionContext, TemplateAction, multi_file_push::GithubMultiFilePush,
    },
    config::{Config, GithubIntegration, IntegrationsConfig},
};
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const REPO: &str = "/repos/my-org/my-repo/git";

fn action_for(server: &MockServer) -> GithubMultiFilePush {
    let mut integration = GithubIntegration::new("github.com", "test-token");
    integration.api_base_url = Some(server.uri());

    GithubMultiFilePush::new(Config {
        integrations: IntegrationsConfig {
            github: vec![integration],
        },
    })
}

fn workspace() -> TempDir {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let dist = tmp.path().join("dist");
    fs::create_dir_all(dist.join("css")).unwrap();
    fs::write(dist.join("index.html"), "hello").unwrap();
    fs::write(dist.join("css").join("site.css"), "world").unwrap();
    tmp
}

fn input(target_path: &str) -> Value {
    json!({
        "repoUrl": "github.com?owner=my-org&repo=my-repo",
        "branch": "main",
        "sourcePath": "dist",
        "targetPath": target_path,
        "commitMessage": "Deploy assets",
    })
}

async fn mount_branch(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/ref/heads/main")))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/main",
            "object": { "sha": "tip-sha", "type": "commit" },
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("{REPO}/commits/tip-sha")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sha": "tip-sha",
            "tree": { "sha": "base-tree-sha" },
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_blob(server: &MockServer, encoded: &str, sha: &str) {
    Mock::given(method("POST"))
        .and(path(format!("{REPO}/blobs")))
        .and(body_partial_json(json!({
            "content": encoded,
            "encoding": "base64",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": sha,
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_write_path(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("{REPO}/trees")))
        .and(body_partial_json(json!({ "base_tree": "base-tree-sha" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "new-tree-sha",
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/commits")))
        .and(body_partial_json(json!({
            "message": "Deploy assets",
            "tree": "new-tree-sha",
            "parents": ["tip-sha"],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "new-commit-sha",
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{REPO}/refs/heads/main")))
        .and(body_partial_json(json!({
            "sha": "new-commit-sha",
            "force": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/main",
            "object": { "sha": "new-commit-sha", "type": "commit" },
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn tree_body(requests: &[Request]) -> Value {
    requests
        .iter()
        .find(|r| r.url.path() == format!("{REPO}/trees"))
        .expect("tree request was not sent")
        .body_json()
        .unwrap()
}

#[test_log::test(tokio::test)]
async fn pushes_workspace_folder_as_one_commit() {
    let server = MockServer::start().await;
    mount_branch(&server).await;
    mount_blob(&server, "aGVsbG8=", "blob-hello").await;
    mount_blob(&server, "d29ybGQ=", "blob-world").await;
    mount_write_path(&server).await;

    let tmp = workspace();
    action_for(&server)
        .handler(ActionContext::new(tmp.path(), input("site/")))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(
        tree_body(&requests)["tree"],
        json!([
            {
                "path": "site/css/site.css",
                "mode": "100644",
                "type": "blob",
                "sha": "blob-world",
            },
            {
                "path": "site/index.html",
                "mode": "100644",
                "type": "blob",
                "sha": "blob-hello",
            },
        ])
    );
}

#[test_log::test(tokio::test)]
async fn empty_target_writes_paths_relative_to_repo_root() {
    let server = MockServer::start().await;
    mount_branch(&server).await;
    mount_blob(&server, "aGVsbG8=", "blob-hello").await;
    mount_blob(&server, "d29ybGQ=", "blob-world").await;
    mount_write_path(&server).await;

    let tmp = workspace();
    action_for(&server)
        .handler(ActionContext::new(tmp.path(), input("")))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let paths = tree_body(&requests)["tree"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["path"].as_str().unwrap().to_string())
        .collect::<Vec<_>>();

    assert_eq!(paths, vec!["css/site.css", "index.html"]);
}

#[test_log::test(tokio::test)]
async fn missing_branch_is_reported_without_writes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{REPO}/ref/heads/main")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let tmp = workspace();
    let result = action_for(&server)
        .handler(ActionContext::new(tmp.path(), input(".")))
        .await;

    match result {
        Err(PushFilesError::BranchNotFound {
            owner,
            repo,
            branch,
        }) => {
            assert_eq!(owner, "my-org");
            assert_eq!(repo, "my-repo");
            assert_eq!(branch, "main");
        }
        other => panic!("expected BranchNotFound, got {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn invalid_locator_sends_no_requests() {
    let server = MockServer::start().await;

    let tmp = workspace();
    let result = action_for(&server)
        .handler(ActionContext::new(
            tmp.path(),
            json!({
                "repoUrl": "github.com?owner=my-org",
                "branch": "main",
                "sourcePath": "dist",
            }),
        ))
        .await;

    assert!(matches!(result, Err(PushFilesError::InvalidInput(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn rejected_ref_update_fails_the_action() {
    let server = MockServer::start().await;
    mount_branch(&server).await;
    mount_blob(&server, "aGVsbG8=", "blob-hello").await;
    mount_blob(&server, "d29ybGQ=", "blob-world").await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/trees")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "new-tree-sha",
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("{REPO}/commits")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "sha": "new-commit-sha",
        })))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(format!("{REPO}/refs/heads/main")))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Update is not a fast forward",
            "documentation_url": "https://docs.github.com/rest",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = workspace();
    let result = action_for(&server)
        .handler(ActionContext::new(tmp.path(), input(".")))
        .await;

    assert!(matches!(result, Err(PushFilesError::ForgeError(_))));
}

async fn mount_ref_error(server: &MockServer, status: u16, message: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{REPO}/ref/heads/main")))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "message": message,
            "documentation_url": "https://docs.github.com/rest",
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[test_log::test(tokio::test)]
async fn bad_credentials_are_an_authentication_error() {
    let server = MockServer::start().await;
    mount_ref_error(&server, 401, "Bad credentials").await;

    let tmp = workspace();
    let result = action_for(&server)
        .handler(ActionContext::new(tmp.path(), input(".")))
        .await;

    assert!(matches!(
        result,
        Err(PushFilesError::AuthenticationError(msg)) if msg == "Bad credentials"
    ));
}

#[test_log::test(tokio::test)]
async fn exhausted_rate_limit_is_reported() {
    let server = MockServer::start().await;
    mount_ref_error(&server, 403, "API rate limit exceeded for user ID 1.")
        .await;

    let tmp = workspace();
    let result = action_for(&server)
        .handler(ActionContext::new(tmp.path(), input(".")))
        .await;

    assert!(matches!(result, Err(PushFilesError::RateLimitExceeded)));
}

#[test_log::test(tokio::test)]
async fn branch_names_are_percent_encoded_per_segment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("{REPO}/ref/heads/release/v1%23hot%3Ffix")))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = workspace();
    let result = action_for(&server)
        .handler(ActionContext::new(
            tmp.path(),
            json!({
                "repoUrl": "github.com?owner=my-org&repo=my-repo",
                "branch": "release/v1#hot?fix",
                "sourcePath": "dist",
            }),
        ))
        .await;

    assert!(matches!(
        result,
        Err(PushFilesError::BranchNotFound { branch, .. })
            if branch == "release/v1#hot?fix"
    ));
}
