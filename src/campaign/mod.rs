use chrono::{DateTime, Utc};

use crate::event::OpenEvent;
use crate::typedid::{TypedId, TypedIdMarker};

pub mod db;
pub mod endpoints;
pub mod manager;
pub use endpoints::*;

pub type TrackingId = TypedId<Campaign>;

pub const DEFAULT_CAMPAIGN_NAME: &str = "Untitled Campaign";

/// A campaign is created once per generated pixel and is never modified
/// afterwards, apart from opens being appended to `events`.
#[derive(Clone, Debug)]
pub struct Campaign {
    pub id: TrackingId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub events: Vec<OpenEvent>,
}

impl TypedIdMarker for Campaign {
    fn tag() -> &'static str {
        "CPN"
    }
}
