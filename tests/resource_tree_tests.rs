//! Integration tests for the resource builder.
//!
//! These tests drive the full resource tree against a recording dispatcher
//! and verify path composition, state resets, id preconditions and the
//! operation sets of the restricted resources.

use std::sync::{Arc, Mutex};

use assembla_api::clients::{HttpMethod, RequestError};
use assembla_api::rest::{
    ApiRequest, Dispatcher, Payload, ResourceOperation, ResourceTree, ResponseFuture, UsageError,
};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Records every request and answers with a fixed body, or fails.
#[derive(Debug, Default)]
struct RecordingDispatcher {
    requests: Mutex<Vec<ApiRequest>>,
    fail: bool,
}

impl RecordingDispatcher {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> ApiRequest {
        self.requests().pop().expect("no request was dispatched")
    }
}

#[async_trait]
impl Dispatcher for RecordingDispatcher {
    async fn dispatch(&self, request: ApiRequest) -> Result<Value, RequestError> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);
        if self.fail {
            return Err(RequestError::Response {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(json!({ "path": path }))
    }
}

fn setup() -> (Arc<RecordingDispatcher>, ResourceTree) {
    let recorder = Arc::new(RecordingDispatcher::default());
    let tree = ResourceTree::new(recorder.clone());
    (recorder, tree)
}

fn usage_error(result: Result<ResponseFuture, UsageError>) -> UsageError {
    match result {
        Err(error) => error,
        Ok(_) => panic!("expected a usage error"),
    }
}

// ============================================================================
// Path Composition Tests
// ============================================================================

#[tokio::test]
async fn test_votes_path_through_every_level() {
    let (recorder, tree) = setup();

    let body = tree
        .spaces()
        .find("s1")
        .unwrap()
        .child("spaceTools")
        .unwrap()
        .find("t1")
        .unwrap()
        .child("mergeRequests")
        .unwrap()
        .find("m1")
        .unwrap()
        .child("versions")
        .unwrap()
        .find("v1")
        .unwrap()
        .child("votes")
        .unwrap()
        .read()
        .unwrap()
        .await
        .unwrap();

    let expected = "spaces/s1/space_tools/t1/merge_requests/m1/versions/v1/votes";
    assert_eq!(body, json!({ "path": expected }));

    let request = recorder.last();
    assert_eq!(request.path, expected);
    assert_eq!(request.method, HttpMethod::Get);
    assert!(request.payload.is_empty());
}

#[test]
fn test_leaf_id_is_appended() {
    let (_, tree) = setup();
    let tools = tree.spaces().child("space_tools").unwrap();

    tree.spaces().find("s1").unwrap();
    tools.find("t1").unwrap();

    assert_eq!(tools.path().unwrap(), "spaces/s1/space_tools/t1");
    assert_eq!(tree.spaces().path().unwrap(), "spaces/s1");
    assert_eq!(tree.users().path().unwrap(), "users");
}

#[test]
fn test_missing_parent_id_names_the_nearest_gap() {
    let (recorder, tree) = setup();
    let tools = tree.spaces().child("space_tools").unwrap();
    let merge_requests = tools.child("merge_requests").unwrap();
    let versions = merge_requests.child("versions").unwrap();

    tree.spaces().find("s1").unwrap();
    merge_requests.find("m1").unwrap();

    let error = versions.path().unwrap_err();
    assert_eq!(
        error,
        UsageError::MissingParentId {
            parent: "space_tools".to_string(),
            node: "merge_requests".to_string(),
            origin: "versions".to_string(),
        }
    );
    assert_eq!(
        error.to_string(),
        "path composition error: parent space_tools must have an ID at merge_requests.path() (called on versions)"
    );

    assert!(matches!(
        usage_error(versions.read()),
        UsageError::MissingParentId { .. }
    ));
    assert!(recorder.requests().is_empty());
}

#[test]
fn test_direct_parent_without_id() {
    let (_, tree) = setup();
    let error = tree.spaces().child("spaceTools").unwrap().path().unwrap_err();
    assert_eq!(
        error.to_string(),
        "path composition error: parent spaces must have an ID at space_tools.path()"
    );
}

// ============================================================================
// Aliasing Tests
// ============================================================================

#[test]
fn test_alias_shares_state() {
    let (_, tree) = setup();
    tree.spaces().find("s1").unwrap();

    let snake = tree.spaces().child("space_tools").unwrap();
    let camel = tree.spaces().child("spaceTools").unwrap();

    camel.find("t1").unwrap();
    assert_eq!(snake.id().as_deref(), Some("t1"));
    assert_eq!(snake.path().unwrap(), "spaces/s1/space_tools/t1");
}

#[test]
fn test_root_resources_by_name() {
    let (_, tree) = setup();
    assert_eq!(tree.resource("spaces").unwrap().name(), "spaces");
    assert_eq!(tree.resource("users").unwrap().name(), "users");
    assert_eq!(
        tree.resource("tickets").unwrap_err().to_string(),
        "Unknown resource 'tickets' under 'api'"
    );
}

// ============================================================================
// State Reset Tests
// ============================================================================

#[tokio::test]
async fn test_terminal_call_resets_node_and_ancestors() {
    let (recorder, tree) = setup();
    let tools = tree.spaces().child("space_tools").unwrap();

    tree.spaces().find("s1").unwrap().params(json!({"x": 1})).unwrap();
    tools.find("t1").unwrap().params(json!({"y": 2})).unwrap();
    tools.read().unwrap().await.unwrap();

    assert_eq!(tree.spaces().id(), None);
    assert!(tree.spaces().pending_params().is_empty());
    assert_eq!(tools.id(), None);
    assert!(tools.pending_params().is_empty());

    tree.spaces().read().unwrap().await.unwrap();
    assert_eq!(recorder.last().path, "spaces");
}

#[test]
fn test_reset_happens_before_the_future_is_polled() {
    let (recorder, tree) = setup();

    tree.spaces().find("s1").unwrap();
    let pending = tree.spaces().child("space_tools").unwrap().read().unwrap();

    assert_eq!(tree.spaces().id(), None);
    assert!(recorder.requests().is_empty());
    drop(pending);
}

#[tokio::test]
async fn test_failed_request_still_resets_state() {
    let recorder = Arc::new(RecordingDispatcher::failing());
    let tree = ResourceTree::new(recorder.clone());

    let error = tree
        .spaces()
        .find("s1")
        .unwrap()
        .update(json!({"name": "x"}))
        .unwrap()
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(500));
    assert_eq!(tree.spaces().id(), None);
    assert_eq!(recorder.requests().len(), 1);
}

#[test]
fn test_usage_error_keeps_state() {
    let (_, tree) = setup();
    tree.users().find("u1").unwrap().params(json!({"a": 1})).unwrap();

    assert_eq!(
        usage_error(tree.users().create(json!({}))),
        UsageError::IdPresent
    );
    assert_eq!(tree.users().id().as_deref(), Some("u1"));
    assert_eq!(tree.users().pending_params(), Payload::try_from(json!({"a": 1})).unwrap());
}

#[test]
fn test_manual_reset() {
    let (_, tree) = setup();
    let tools = tree.spaces().child("space_tools").unwrap();
    tree.spaces().find("s1").unwrap();
    tools.find("t1").unwrap();

    tools.reset();
    assert_eq!(tools.id(), None);
    assert_eq!(tree.spaces().id(), None);

    tree.spaces().find("s1").unwrap();
    tools.find("t1").unwrap();
    tree.reset();
    assert_eq!(tools.id(), None);
    assert_eq!(tree.spaces().id(), None);
}

// ============================================================================
// Terminal Operation Tests
// ============================================================================

#[tokio::test]
async fn test_create_posts_params_merged_with_data() {
    let (recorder, tree) = setup();

    tree.spaces()
        .params(json!({"a": 1, "b": 2}))
        .unwrap()
        .create(json!({"b": 3, "c": 4}))
        .unwrap()
        .await
        .unwrap();

    let request = recorder.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.path, "spaces");
    assert_eq!(Value::from(request.payload), json!({"a": 1, "b": 3, "c": 4}));
}

#[tokio::test]
async fn test_update_puts_to_the_found_member() {
    let (recorder, tree) = setup();

    tree.users()
        .find("u1")
        .unwrap()
        .update(json!({"name": "Ann"}))
        .unwrap()
        .await
        .unwrap();

    let request = recorder.last();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.path, "users/u1");
    assert_eq!(Value::from(request.payload), json!({"name": "Ann"}));
}

#[tokio::test]
async fn test_delete_sends_pending_params() {
    let (recorder, tree) = setup();

    tree.users()
        .find("u1")
        .unwrap()
        .params(json!({"force": true}))
        .unwrap()
        .delete()
        .unwrap()
        .await
        .unwrap();

    let request = recorder.last();
    assert_eq!(request.method, HttpMethod::Delete);
    assert_eq!(request.path, "users/u1");
    assert_eq!(Value::from(request.payload), json!({"force": true}));
}

#[test]
fn test_id_preconditions() {
    let (recorder, tree) = setup();

    assert_eq!(
        usage_error(tree.users().find("u1").unwrap().create(json!({}))).to_string(),
        "Could not call API - `create` should be triggered without ID"
    );
    tree.users().reset();

    assert_eq!(
        usage_error(tree.users().update(json!({}))).to_string(),
        "Could not call API - `find` should be triggered before `update`"
    );
    assert_eq!(
        usage_error(tree.users().delete()).to_string(),
        "Could not call API - `find` should be triggered before `delete`"
    );
    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn test_default_read_equals_all_read() {
    let (recorder, tree) = setup();

    tree.users()
        .params(json!({"page": 2}))
        .unwrap()
        .read()
        .unwrap()
        .await
        .unwrap();
    let implicit = recorder.last();

    tree.users()
        .find("u1")
        .unwrap()
        .all()
        .unwrap()
        .params(json!({"page": 2}))
        .unwrap()
        .read()
        .unwrap()
        .await
        .unwrap();
    let explicit = recorder.last();

    assert_eq!(implicit, explicit);
    assert_eq!(implicit.path, "users");
}

#[test]
fn test_params_are_replaced_not_merged() {
    let (_, tree) = setup();
    tree.users()
        .params(json!({"a": 1, "b": 2}))
        .unwrap()
        .params(json!({"b": 3}))
        .unwrap();
    assert_eq!(tree.users().pending_params(), Payload::try_from(json!({"b": 3})).unwrap());
}

#[test]
fn test_non_object_data_is_rejected_before_dispatch() {
    let (recorder, tree) = setup();

    assert_eq!(
        usage_error(tree.users().create(json!(["name", "Ann"]))),
        UsageError::InvalidParams {
            node: "users".to_string()
        }
    );

    tree.users().find("u1").unwrap();
    assert!(matches!(
        usage_error(tree.users().update(json!("Ann"))),
        UsageError::InvalidParams { .. }
    ));
    assert_eq!(tree.users().id().as_deref(), Some("u1"));

    assert!(recorder.requests().is_empty());
}

#[test]
fn test_non_object_params_keep_pending_params() {
    let (recorder, tree) = setup();
    tree.users().params(json!({"page": 2})).unwrap();

    let error = tree.users().params(json!(42)).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Could not call API - parameters of 'users' must be a JSON object"
    );
    assert_eq!(
        tree.users().pending_params(),
        Payload::try_from(json!({"page": 2})).unwrap()
    );

    let spaces = tree.spaces();
    spaces.find("s1").unwrap();
    assert!(matches!(
        usage_error(spaces.search(json!(["docs"]))),
        UsageError::InvalidParams { .. }
    ));
    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn test_null_data_sends_pending_params_only() {
    let (recorder, tree) = setup();

    tree.users()
        .params(json!({"a": 1}))
        .unwrap()
        .create(Value::Null)
        .unwrap()
        .await
        .unwrap();

    let request = recorder.last();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.payload, Payload::try_from(json!({"a": 1})).unwrap());
}

// ============================================================================
// Restricted Resource Tests
// ============================================================================

#[tokio::test]
async fn test_commit_path_under_repos() {
    let (recorder, tree) = setup();
    let repos = tree.spaces().child("repos").unwrap();

    tree.spaces().find("id").unwrap();
    repos.find("r1").unwrap();
    repos
        .child("commit")
        .unwrap()
        .find("c1")
        .unwrap()
        .read()
        .unwrap()
        .await
        .unwrap();

    assert_eq!(recorder.last().path, "spaces/id/repos/r1/commit/c1");
}

#[test]
fn test_commit_read_requires_find() {
    let (recorder, tree) = setup();
    let repos = tree.spaces().child("repos").unwrap();

    tree.spaces().find("id").unwrap();
    repos.find("r1").unwrap();
    let error = usage_error(repos.child("commit").unwrap().read());

    assert_eq!(
        error.to_string(),
        "Could not call API - `find` should be triggered before `commit.read()`"
    );
    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn test_commits_listing() {
    let (recorder, tree) = setup();
    let repos = tree.spaces().child("repos").unwrap();

    tree.spaces().find("id").unwrap();
    repos.find("r1").unwrap();
    repos
        .child("commits")
        .unwrap()
        .all()
        .unwrap()
        .read()
        .unwrap()
        .await
        .unwrap();

    assert_eq!(recorder.last().path, "spaces/id/repos/r1/commits");
}

#[test]
fn test_restricted_operations_are_rejected_without_dispatch() {
    let (recorder, tree) = setup();
    let repos = tree.spaces().child("repos").unwrap();
    let commit = repos.child("commit").unwrap();
    let commits = repos.child("commits").unwrap();
    let search = tree.spaces().child("search").unwrap();

    tree.spaces().find("id").unwrap();
    repos.find("r1").unwrap();

    let not_allowed = |node: &str, operation| UsageError::NotAllowed {
        node: node.to_string(),
        operation,
    };

    assert_eq!(usage_error(repos.read()), not_allowed("repos", ResourceOperation::Read));
    assert_eq!(repos.all().unwrap_err(), not_allowed("repos", ResourceOperation::All));
    assert_eq!(
        usage_error(repos.create(json!({}))),
        not_allowed("repos", ResourceOperation::Create)
    );
    assert_eq!(commit.all().unwrap_err(), not_allowed("commit", ResourceOperation::All));
    assert_eq!(
        usage_error(commit.find("c1").unwrap().update(json!({}))),
        not_allowed("commit", ResourceOperation::Update)
    );
    assert_eq!(commits.find("c1").unwrap_err(), not_allowed("commits", ResourceOperation::Find));
    assert_eq!(
        usage_error(commits.delete()),
        not_allowed("commits", ResourceOperation::Delete)
    );
    assert_eq!(search.find("x").unwrap_err(), not_allowed("search", ResourceOperation::Find));
    assert_eq!(search.all().unwrap_err(), not_allowed("search", ResourceOperation::All));

    assert_eq!(
        not_allowed("repos", ResourceOperation::Read).to_string(),
        "Could not call API - 'repos.read' is not allowed"
    );
    assert!(recorder.requests().is_empty());
}

#[tokio::test]
async fn test_search_reads_with_params_and_resets_spaces() {
    let (recorder, tree) = setup();
    let tools = tree.spaces().child("space_tools").unwrap();

    tree.spaces().find("s1").unwrap();
    tools.find("t1").unwrap();

    tree.spaces()
        .search(json!({"q": "docs"}))
        .unwrap()
        .await
        .unwrap();

    let request = recorder.last();
    assert_eq!(request.path, "spaces/s1/search");
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(Value::from(request.payload), json!({"q": "docs"}));

    assert_eq!(tree.spaces().id(), None);
    assert_eq!(tools.id(), None);
}
