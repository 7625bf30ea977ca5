//! MCP tools organized by GitHub resource
//!
//! Each tool lives in its own submodule next to a `description.md` holding the
//! text published through `tools/list`.

pub mod code_scanning;
pub mod diagnostics;
pub mod issues;
pub mod projects;
pub mod pull_requests;
pub mod repositories;
pub mod search;
pub mod users;

use super::tool_registry::{ToolRegistry, ToolRegistryBuilder};
use crate::Result;

/// Register the full catalogue; mutating tools are skipped by a read-only builder
pub fn register_all_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    users::register_user_tools(registry)?;
    issues::register_issue_tools(registry)?;
    pull_requests::register_pull_request_tools(registry)?;
    repositories::register_repository_tools(registry)?;
    search::register_search_tools(registry)?;
    code_scanning::register_code_scanning_tools(registry)?;
    projects::register_project_tools(registry)?;
    diagnostics::register_diagnostics_tools(registry)?;
    Ok(())
}

/// Build and seal the registry for a server
pub fn build_registry(read_only: bool) -> Result<ToolRegistry> {
    let mut builder = ToolRegistry::builder(read_only);
    register_all_tools(&mut builder)?;
    Ok(builder.seal())
}

#[cfg(test)]
mod tests {
    use super::*;

    const READ_TOOLS: &[&str] = &[
        "get_me",
        "get_issue",
        "list_issues",
        "search_issues",
        "get_issue_comments",
        "get_pull_request",
        "list_pull_requests",
        "get_pull_request_files",
        "get_pull_request_status",
        "get_pull_request_comments",
        "get_pull_request_reviews",
        "search_repositories",
        "get_file_contents",
        "list_commits",
        "search_code",
        "search_users",
        "get_code_scanning_alert",
        "list_code_scanning_alerts",
        "get_project_v2",
        "list_project_v2_fields",
        "list_project_v2_items",
        "diagnose_github_mcp",
    ];

    const MUTATING_TOOLS: &[&str] = &[
        "create_issue",
        "add_issue_comment",
        "update_issue",
        "create_pull_request",
        "update_pull_request",
        "merge_pull_request",
        "update_pull_request_branch",
        "create_pull_request_review",
        "create_or_update_file",
        "create_repository",
        "fork_repository",
        "create_branch",
        "push_files",
        "create_project_v2",
        "update_project_v2",
        "add_project_v2_item",
        "add_project_v2_draft_issue",
        "update_project_v2_item",
        "delete_project_v2_item",
    ];

    #[test]
    fn test_full_catalogue() {
        let registry = build_registry(false).unwrap();
        assert_eq!(registry.len(), READ_TOOLS.len() + MUTATING_TOOLS.len());
        for name in READ_TOOLS.iter().chain(MUTATING_TOOLS) {
            let descriptor = registry.descriptor(name).unwrap();
            assert_eq!(descriptor.mutating, MUTATING_TOOLS.contains(name), "{name}");
            assert!(!descriptor.description.trim().is_empty(), "{name}");
        }
    }

    #[test]
    fn test_read_only_catalogue() {
        let registry = build_registry(true).unwrap();
        let mut names = registry.list_tool_names();
        names.sort_unstable();
        let mut expected = READ_TOOLS.to_vec();
        expected.sort_unstable();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_every_schema_is_an_object() {
        let registry = build_registry(false).unwrap();
        for tool in registry.list_tools() {
            assert_eq!(
                tool.input_schema.get("type").and_then(|t| t.as_str()),
                Some("object"),
                "{}",
                tool.name
            );
        }
    }
}
