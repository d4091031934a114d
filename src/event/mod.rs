use chrono::{DateTime, Utc};

pub mod endpoints;
pub mod manager;
pub mod pixel;
pub mod timestamp;
pub use endpoints::*;

/// One fetch of a campaign's pixel.
///
/// `sequence` is handed out by the store in append order across every
/// campaign, which breaks ties between opens recorded in the same instant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenEvent {
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub sequence: u64,
}
