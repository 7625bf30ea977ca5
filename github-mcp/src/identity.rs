//! Account identity resolution
//!
//! Mutations that create resources under an account need the account's node
//! id, and the login alone does not say whether it names a user or an
//! organization. [`IdentityResolver`] runs an ordered list of
//! [`ResolverStrategy`] values, cheapest first:
//!
//! 1. the caller's own login, answered from the session without a call,
//! 2. a `user(login:)` lookup,
//! 3. an `organization(login:)` lookup.
//!
//! The first strategy producing an identifier wins. A lookup that fails counts
//! as "no identifier"; only cancellation aborts the sequence.

use crate::client::{GitHubApi, GraphQlRequest};
use crate::rate_limit::RateLimitGuard;
use crate::{GitHubMcpError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tokio_util::sync::CancellationToken;

const VIEWER_QUERY: &str = "query { viewer { id login } }";
const USER_QUERY: &str = "query($login: String!) { user(login: $login) { id login } }";
const ORGANIZATION_QUERY: &str =
    "query($login: String!) { organization(login: $login) { id login } }";

/// Whether an account belongs to a person or a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// A user account
    Individual,
    /// An organization account
    Group,
}

/// A login resolved to its durable node id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentity {
    /// Account kind
    pub kind: AccountKind,
    /// GraphQL node id
    pub node_id: String,
    /// Login as supplied by the caller
    pub login: String,
}

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Caller's login
    pub login: String,
    /// Caller's GraphQL node id
    #[serde(rename = "id")]
    pub node_id: String,
}

/// GraphQL lookups used by identity resolution
#[derive(Clone)]
pub struct AccountLookup {
    api: Arc<dyn GitHubApi>,
    guard: RateLimitGuard,
}

impl AccountLookup {
    /// Create a lookup over the given API
    pub fn new(api: Arc<dyn GitHubApi>, guard: RateLimitGuard) -> Self {
        Self { api, guard }
    }

    async fn query(&self, query: &str, variables: Value, cancel: &CancellationToken) -> Result<Value> {
        let request = GraphQlRequest::new(query, variables);
        let response = self
            .guard
            .execute(cancel, || self.api.graphql(request.clone()))
            .await?;
        Ok(response.into_body())
    }

    /// Fetch the authenticated caller
    pub async fn viewer(&self, cancel: &CancellationToken) -> Result<Viewer> {
        let data = self.query(VIEWER_QUERY, json!({}), cancel).await?;
        let viewer = data
            .get("viewer")
            .filter(|v| !v.is_null())
            .cloned()
            .ok_or_else(|| GitHubMcpError::upstream("viewer query returned no data"))?;
        Ok(serde_json::from_value(viewer)?)
    }

    async fn node_id(
        &self,
        query: &str,
        field: &str,
        login: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        let data = self.query(query, json!({ "login": login }), cancel).await?;
        Ok(data
            .get(field)
            .and_then(|account| account.get("id"))
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string))
    }

    /// Node id of the user with this login, if any
    pub async fn user_id(&self, login: &str, cancel: &CancellationToken) -> Result<Option<String>> {
        self.node_id(USER_QUERY, "user", login, cancel).await
    }

    /// Node id of the organization with this login, if any
    pub async fn organization_id(
        &self,
        login: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>> {
        self.node_id(ORGANIZATION_QUERY, "organization", login, cancel)
            .await
    }
}

/// Per-session state: the caller's identity, fetched at most once
#[derive(Debug, Default)]
pub struct Session {
    viewer: OnceCell<Viewer>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session whose caller is already known
    pub fn with_viewer(viewer: Viewer) -> Self {
        Self {
            viewer: OnceCell::new_with(Some(viewer)),
        }
    }

    /// The caller's identity, fetched on first use
    ///
    /// A failed fetch is not cached; the next call tries again.
    pub async fn viewer(&self, lookup: &AccountLookup, cancel: &CancellationToken) -> Result<Viewer> {
        self.viewer
            .get_or_try_init(|| async {
                let viewer = lookup.viewer(cancel).await?;
                tracing::info!("Authenticated as {}", viewer.login);
                Ok::<_, GitHubMcpError>(viewer)
            })
            .await
            .cloned()
    }
}

/// Input to a resolution attempt
#[derive(Debug, Clone, Copy)]
pub struct ResolveRequest<'a> {
    /// Login to resolve
    pub login: &'a str,
    /// The authenticated caller
    pub viewer: &'a Viewer,
    /// Per-call cancellation signal
    pub cancel: &'a CancellationToken,
}

/// One way of turning a login into an identity
#[async_trait]
pub trait ResolverStrategy: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Resolve the login, or `Ok(None)` when this strategy does not apply
    async fn try_resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<AccountIdentity>>;
}

/// Matches the caller's own login without any call
pub struct ViewerStrategy;

#[async_trait]
impl ResolverStrategy for ViewerStrategy {
    fn name(&self) -> &'static str {
        "viewer"
    }

    async fn try_resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<AccountIdentity>> {
        // logins are case-insensitive on GitHub
        if request.login.eq_ignore_ascii_case(&request.viewer.login) {
            Ok(Some(AccountIdentity {
                kind: AccountKind::Individual,
                node_id: request.viewer.node_id.clone(),
                login: request.login.to_string(),
            }))
        } else {
            Ok(None)
        }
    }
}

/// Looks the login up as a user
pub struct UserLookupStrategy {
    lookup: AccountLookup,
}

impl UserLookupStrategy {
    /// Create the strategy
    pub fn new(lookup: AccountLookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl ResolverStrategy for UserLookupStrategy {
    fn name(&self) -> &'static str {
        "user"
    }

    async fn try_resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<AccountIdentity>> {
        let id = self.lookup.user_id(request.login, request.cancel).await?;
        Ok(id.map(|node_id| AccountIdentity {
            kind: AccountKind::Individual,
            node_id,
            login: request.login.to_string(),
        }))
    }
}

/// Looks the login up as an organization
pub struct OrganizationLookupStrategy {
    lookup: AccountLookup,
}

impl OrganizationLookupStrategy {
    /// Create the strategy
    pub fn new(lookup: AccountLookup) -> Self {
        Self { lookup }
    }
}

#[async_trait]
impl ResolverStrategy for OrganizationLookupStrategy {
    fn name(&self) -> &'static str {
        "organization"
    }

    async fn try_resolve(&self, request: &ResolveRequest<'_>) -> Result<Option<AccountIdentity>> {
        let id = self
            .lookup
            .organization_id(request.login, request.cancel)
            .await?;
        Ok(id.map(|node_id| AccountIdentity {
            kind: AccountKind::Group,
            node_id,
            login: request.login.to_string(),
        }))
    }
}

/// Ordered list of strategies; the first hit wins
pub struct IdentityResolver {
    strategies: Vec<Box<dyn ResolverStrategy>>,
}

impl IdentityResolver {
    /// Create a resolver from explicit strategies
    pub fn new(strategies: Vec<Box<dyn ResolverStrategy>>) -> Self {
        Self { strategies }
    }

    /// Viewer, then user, then organization
    pub fn standard(lookup: AccountLookup) -> Self {
        Self::new(vec![
            Box::new(ViewerStrategy),
            Box::new(UserLookupStrategy::new(lookup.clone())),
            Box::new(OrganizationLookupStrategy::new(lookup)),
        ])
    }

    /// Resolve `login` to an identity or fail with [`GitHubMcpError::NotFound`]
    pub async fn resolve(
        &self,
        login: &str,
        viewer: &Viewer,
        cancel: &CancellationToken,
    ) -> Result<AccountIdentity> {
        let request = ResolveRequest {
            login,
            viewer,
            cancel,
        };

        for strategy in &self.strategies {
            match strategy.try_resolve(&request).await {
                Ok(Some(identity)) => {
                    tracing::debug!(
                        "Resolved '{}' as {:?} via {} strategy",
                        login,
                        identity.kind,
                        strategy.name()
                    );
                    return Ok(identity);
                }
                Ok(None) => {}
                Err(GitHubMcpError::Cancelled) => return Err(GitHubMcpError::Cancelled),
                Err(e) => {
                    tracing::debug!("{} lookup for '{}' failed: {}", strategy.name(), login, e);
                }
            }
        }

        Err(GitHubMcpError::NotFound(format!(
            "could not find user or organization with login: {login}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockGitHubApi;

    fn viewer() -> Viewer {
        Viewer {
            login: "octocat".into(),
            node_id: "U_octocat".into(),
        }
    }

    fn resolver(api: &Arc<MockGitHubApi>) -> IdentityResolver {
        IdentityResolver::standard(AccountLookup::new(api.clone(), RateLimitGuard::default()))
    }

    #[tokio::test]
    async fn test_own_login_needs_no_lookup() {
        let api = Arc::new(MockGitHubApi::new());
        let identity = resolver(&api)
            .resolve("OctoCat", &viewer(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(identity.kind, AccountKind::Individual);
        assert_eq!(identity.node_id, "U_octocat");
        assert_eq!(identity.login, "OctoCat");
        assert!(api.graphql_requests().is_empty());
    }

    #[tokio::test]
    async fn test_user_lookup_wins_before_organization() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Ok(json!({ "user": { "id": "U_hubot", "login": "hubot" } })));

        let identity = resolver(&api)
            .resolve("hubot", &viewer(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(identity.kind, AccountKind::Individual);
        assert_eq!(identity.node_id, "U_hubot");
        assert_eq!(api.graphql_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_group_login_takes_two_lookups_in_order() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Err(GitHubMcpError::NotFound(
            "Could not resolve to a User with the login of 'acme'.".into(),
        )));
        api.push_graphql(Ok(json!({ "organization": { "id": "O_acme", "login": "acme" } })));

        let identity = resolver(&api)
            .resolve("acme", &viewer(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(identity.kind, AccountKind::Group);
        assert_eq!(identity.node_id, "O_acme");

        let requests = api.graphql_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].operation(), "user");
        assert_eq!(requests[1].operation(), "organization");
        assert_eq!(requests[1].variables["login"], "acme");
    }

    #[tokio::test]
    async fn test_unknown_login_is_not_found() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Ok(json!({ "user": null })));
        api.push_graphql(Err(GitHubMcpError::Transport("connection reset".into())));

        let err = resolver(&api)
            .resolve("ghost", &viewer(), &CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            GitHubMcpError::NotFound(message) => assert!(message.contains("ghost")),
            other => panic!("expected NotFound, got {other:?}"),
        }
        assert_eq!(api.graphql_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_cancellation_aborts_resolution() {
        let api = Arc::new(MockGitHubApi::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = resolver(&api)
            .resolve("acme", &viewer(), &cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, GitHubMcpError::Cancelled));
        assert!(api.graphql_requests().is_empty());
    }

    #[tokio::test]
    async fn test_session_fetches_viewer_once() {
        let api = Arc::new(MockGitHubApi::new());
        api.push_graphql(Ok(json!({ "viewer": { "id": "U_octocat", "login": "octocat" } })));
        let lookup = AccountLookup::new(api.clone(), RateLimitGuard::default());
        let session = Session::new();
        let cancel = CancellationToken::new();

        assert_eq!(session.viewer(&lookup, &cancel).await.unwrap(), viewer());
        assert_eq!(session.viewer(&lookup, &cancel).await.unwrap(), viewer());
        assert_eq!(api.graphql_requests().len(), 1);
    }
}
