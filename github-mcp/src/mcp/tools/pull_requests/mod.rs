//! Pull request tools for MCP operations

pub mod comments;
pub mod create;
pub mod create_review;
pub mod files;
pub mod get;
pub mod list;
pub mod merge;
pub mod reviews;
pub mod status;
pub mod update;
pub mod update_branch;

use crate::mcp::params::ParameterSpec;
use crate::mcp::tool_registry::ToolRegistryBuilder;
use crate::Result;

/// Register all pull request tools with the registry
pub fn register_pull_request_tools(registry: &mut ToolRegistryBuilder) -> Result<()> {
    registry.register(get::GetPullRequestTool::new())?;
    registry.register(list::ListPullRequestsTool::new())?;
    registry.register(files::GetPullRequestFilesTool::new())?;
    registry.register(status::GetPullRequestStatusTool::new())?;
    registry.register(comments::GetPullRequestCommentsTool::new())?;
    registry.register(reviews::GetPullRequestReviewsTool::new())?;
    registry.register(merge::MergePullRequestTool::new())?;
    registry.register(update_branch::UpdatePullRequestBranchTool::new())?;
    registry.register(create_review::CreatePullRequestReviewTool::new())?;
    registry.register(create::CreatePullRequestTool::new())?;
    registry.register(update::UpdatePullRequestTool::new())?;
    Ok(())
}

fn pull_number_spec() -> ParameterSpec {
    ParameterSpec::integer("pullNumber", "Pull request number")
        .required()
        .with_minimum(1)
}
