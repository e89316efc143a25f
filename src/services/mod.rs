//! Request-level services behind the public endpoints.

pub mod daily_bread;
pub mod events;

pub use daily_bread::{DailyBreadDefaults, DailyBreadResult, DailyBreadService};
pub use events::{EventQuery, EventService};
