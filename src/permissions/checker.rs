//! Permission checker with caching.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheConfig, TypedCache};
use crate::database::{Role, UserStore};
use crate::error::AppError;

/// Something an admin request may want to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, edit and delete verses, events and bible studies.
    ManageContent,
    /// Create, edit and delete users.
    ManageUsers,
}

impl Capability {
    fn describe(self) -> &'static str {
        match self {
            Capability::ManageContent => "manage content",
            Capability::ManageUsers => "manage users",
        }
    }

    /// Whether `role` holds this capability.
    pub fn granted_to(self, role: Role) -> bool {
        match self {
            Capability::ManageContent => matches!(role, Role::Admin | Role::Editor),
            Capability::ManageUsers => role == Role::Admin,
        }
    }
}

/// Permission checker with caching support.
///
/// Owner tokens (from ADMIN_TOKENS env) automatically hold every capability.
#[derive(Clone)]
pub struct Permissions {
    users: Arc<dyn UserStore>,
    /// token -> role (`None` for unknown tokens)
    cache: TypedCache<String, Option<Role>>,
    owner_tokens: Arc<[String]>,
}

impl Permissions {
    /// Create a new permission checker with owner tokens.
    pub fn with_owners(users: Arc<dyn UserStore>, owner_tokens: Vec<String>) -> Self {
        Self {
            users,
            cache: TypedCache::new("admin_roles", CacheConfig::role_lookups()),
            owner_tokens: owner_tokens.into(),
        }
    }

    /// Check if a token is an owner token.
    #[inline]
    pub fn is_owner_token(&self, token: &str) -> bool {
        self.owner_tokens.iter().any(|t| t == token)
    }

    /// Resolve the role behind a token.
    ///
    /// Returns `None` for unknown tokens. Owner tokens resolve to `Admin`.
    pub async fn get_role(&self, token: &str) -> anyhow::Result<Option<Role>> {
        if self.is_owner_token(token) {
            debug!("Owner token presented, granting all capabilities");
            return Ok(Some(Role::Admin));
        }

        let cache_key = token.to_string();

        // Check cache first
        if let Some(cached) = self.cache.get(&cache_key) {
            debug!("Role cache hit");
            return Ok(cached);
        }

        debug!("Role cache miss");

        let role = self.users.find_by_token(token).await?.map(|u| u.role);

        // Cache the result (including None for unknown tokens)
        self.cache.insert(cache_key, role);

        Ok(role)
    }

    /// Gate a request on a capability.
    ///
    /// Missing or unknown tokens are `Unauthorized`; known tokens lacking the
    /// capability are `Forbidden`.
    pub async fn require(&self, token: Option<&str>, capability: Capability) -> Result<(), AppError> {
        let token = token.ok_or(AppError::Unauthorized)?;

        match self.get_role(token).await? {
            None => Err(AppError::Unauthorized),
            Some(role) if capability.granted_to(role) => Ok(()),
            Some(role) => {
                debug!("Role {:?} lacks capability {:?}", role, capability);
                Err(AppError::Forbidden(capability.describe()))
            }
        }
    }

    /// Invalidate the cached role for a token.
    ///
    /// Call this when a user's role or token changes.
    pub fn invalidate(&self, token: &str) {
        self.cache.invalidate(&token.to_string());
        debug!("Invalidated role cache entry");
    }
}
