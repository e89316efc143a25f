//! Cache module - small typed wrapper over Moka.
//!
//! Only short-lived lookups are cached (admin token -> role). Verse text and
//! events are always read fresh.
//!
//! ## Usage
//!
//! ```rust
//! let roles: TypedCache<String, Option<Role>> =
//!     TypedCache::new("admin_roles", CacheConfig::role_lookups());
//!
//! roles.insert(token.clone(), Some(Role::Editor));
//! let role = roles.get(&token);
//! ```

mod config;
mod typed;

pub use config::CacheConfig;
pub use typed::TypedCache;
