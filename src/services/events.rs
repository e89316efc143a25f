//! Event queries by day or date range.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::database::{EventRecord, EventStore};
use crate::error::AppError;
use crate::utils::dates::{DayEdge, day_edge, parse_bound, parse_date, present};

/// Query parameters of `GET /api/events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    /// A single local day.
    pub day: Option<String>,
    /// Range start (date or RFC 3339 instant).
    pub start: Option<String>,
    /// Range end (date or RFC 3339 instant); requires `start`.
    pub end: Option<String>,
}

/// Inclusive time range; open-ended when `end` is `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Build the range a query asks for.
    ///
    /// `day` takes precedence over `start`/`end`. Date-only bounds cover the
    /// whole local day: `start` from 00:00:00.000, `end` to 23:59:59.999.
    pub fn from_query(query: &EventQuery, offset: FixedOffset) -> Result<Self, AppError> {
        if let Some(day) = present(query.day.as_deref()) {
            let day = parse_date("day", day)?;
            return Ok(Self {
                start: day_edge(day, DayEdge::Start, offset),
                end: Some(day_edge(day, DayEdge::End, offset)),
            });
        }

        let end = present(query.end.as_deref());

        let Some(start) = present(query.start.as_deref()) else {
            return Err(AppError::MissingParameter(if end.is_some() {
                "start"
            } else {
                "day or start"
            }));
        };

        let start = parse_bound("start", start, DayEdge::Start, offset)?;
        let end = match end {
            Some(raw) => {
                let end = parse_bound("end", raw, DayEdge::End, offset)?;
                if end < start {
                    return Err(AppError::InvalidParameter {
                        name: "end",
                        value: raw.to_string(),
                    });
                }
                Some(end)
            }
            None => None,
        };

        Ok(Self { start, end })
    }
}

/// Serves event lookups.
pub struct EventService {
    store: Arc<dyn EventStore>,
    offset: FixedOffset,
}

impl EventService {
    /// `offset` is the site's local offset used for whole-day bounds.
    pub fn new(store: Arc<dyn EventStore>, offset: FixedOffset) -> Self {
        Self { store, offset }
    }

    /// Events matching the query, ordered by timestamp ascending.
    pub async fn query(&self, query: &EventQuery) -> Result<Vec<EventRecord>, AppError> {
        let range = TimeRange::from_query(query, self.offset)?;
        debug!("Event query {:?} -> {:?}", query, range);

        let events = self
            .store
            .find_between(range.start, range.end)
            .await
            .with_context(|| format!("fetching events from {} to {:?}", range.start, range.end))?;

        Ok(events)
    }
}
