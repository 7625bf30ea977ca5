//! Read-only servers must not expose or run mutating tools

use github_mcp::mcp::{build_registry, McpServer, ToolCall};
use github_mcp::test_utils::{test_context, MockGitHubApi};
use serde_json::json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

fn read_only_server(api: Arc<MockGitHubApi>) -> McpServer {
    McpServer::from_parts(build_registry(true).unwrap(), test_context(api))
}

#[test]
fn test_listing_excludes_mutating_tools() {
    let server = read_only_server(Arc::new(MockGitHubApi::new()));
    let names = server.tool_registry().list_tool_names();

    assert!(names.contains(&"get_project_v2"));
    assert!(names.contains(&"diagnose_github_mcp"));
    assert!(names.contains(&"list_code_scanning_alerts"));
    for mutating in [
        "create_issue",
        "merge_pull_request",
        "create_pull_request_review",
        "push_files",
        "create_branch",
        "create_project_v2",
        "delete_project_v2_item",
    ] {
        assert!(!names.contains(&mutating), "{mutating} should be hidden");
    }
}

#[tokio::test]
async fn test_mutating_tool_is_indistinguishable_from_unknown() {
    let api = Arc::new(MockGitHubApi::new());
    let server = read_only_server(api.clone());
    let arguments = json!({ "owner": "acme", "title": "Launch" })
        .as_object()
        .cloned()
        .unwrap();

    let hidden = server
        .call(
            ToolCall::new("create_project_v2", arguments.clone()),
            CancellationToken::new(),
        )
        .await
        .unwrap_err();
    let missing = server
        .call(ToolCall::new("launch_rockets", arguments), CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(hidden.message, "Unknown tool: create_project_v2");
    assert_eq!(missing.message, "Unknown tool: launch_rockets");
    assert!(api.graphql_requests().is_empty());
    assert!(api.rest_requests().is_empty());
}
