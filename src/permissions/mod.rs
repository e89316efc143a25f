//! Permission system for the admin API.
//!
//! Admin requests carry a bearer token. The token resolves to a role either
//! through the configured owner tokens or through the `users` collection,
//! and the role decides which capabilities the request holds.
//!
//! ## Features
//!
//! - Cached role lookups (reduces store hits)
//! - Owner tokens that bypass the lookup
//!
//! ## Usage
//!
//! ```rust
//! let perms = Permissions::with_owners(stores.users.clone(), config.admin_tokens.clone());
//!
//! perms.require(bearer_token(&headers), Capability::ManageContent).await?;
//! ```

mod checker;

pub use checker::{Capability, Permissions};
