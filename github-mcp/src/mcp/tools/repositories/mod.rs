//! Repository tools for MCP operations

pub mod branch;
pub mod commits;
pub mod contents;
pub mod create;
pub mod fork;
pub mod push;
pub mod search;
pub mod write_file;

use crate::client::RestRequest;
use crate::mcp::shared_utils::{path_segments, RepoRef};
use crate::mcp::tool_registry::{ToolContext, ToolRegistryBuilder};
use crate::{GitHubMcpError, Result};
use serde_json::Value;

/// Register all repository tools with the registry
pub fn register_repository_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(search::SearchRepositoriesTool::new())?;
    registry.register(contents::GetFileContentsTool::new())?;
    registry.register(commits::ListCommitsTool::new())?;
    registry.register(write_file::CreateOrUpdateFileTool::new())?;
    registry.register(create::CreateRepositoryTool::new())?;
    registry.register(fork::ForkRepositoryTool::new())?;
    registry.register(branch::CreateBranchTool::new())?;
    registry.register(push::PushFilesTool::new())?;
    Ok(())
}

/// `git/ref/heads/{branch}` or `git/refs/heads/{branch}`, one segment per component
fn branch_ref_segments<'a>(
    repo: &'a RepoRef,
    refs: &'a str,
    branch: &'a str,
) -> Result<Vec<&'a str>> {
    let mut rest = vec!["git", refs, "heads"];
    rest.extend(path_segments("branch", branch)?);
    Ok(repo.segments(&rest))
}

/// SHA of the commit `branch` points at
async fn branch_head(context: &ToolContext, repo: &RepoRef, branch: &str) -> Result<String> {
    let response = context
        .rest(RestRequest::get(branch_ref_segments(repo, "ref", branch)?))
        .await?;
    string_at(&response.body, "/object/sha", || format!("branch {branch} has no head commit"))
}

/// String at a JSON pointer, or an upstream error naming what was missing
fn string_at(body: &Value, pointer: &str, missing: impl FnOnce() -> String) -> Result<String> {
    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| GitHubMcpError::upstream(missing()))
}
