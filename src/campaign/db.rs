use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Error;
use crate::event::OpenEvent;

use super::{Campaign, TrackingId};

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error>;
    async fn append_event(
        &self,
        tracking_id: TrackingId,
        ip_address: String,
        user_agent: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<OpenEvent>, Error>;
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;
}

#[derive(Debug, Default)]
struct Registry {
    campaigns: HashMap<TrackingId, Campaign>,
    next_sequence: u64,
}

/// Process-local campaign storage. One lock covers both creating campaigns
/// and appending opens; every critical section is a map lookup plus a push.
#[derive(Debug, Default)]
pub struct MemoryCampaignStore {
    registry: Mutex<Registry>,
}

impl MemoryCampaignStore {
    pub fn new() -> MemoryCampaignStore {
        MemoryCampaignStore::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Registry>, Error> {
        self.registry
            .lock()
            .map_err(|_| Error::ExistentialState("campaign registry lock is poisoned".into()))
    }
}

#[async_trait]
impl CampaignStore for MemoryCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &Campaign) -> Result<(), Error> {
        let mut registry = self.lock()?;
        match registry.campaigns.entry(campaign.id) {
            Entry::Occupied(_) => Err(Error::TrackingIdAlreadyExists {
                tracking_id: campaign.id,
            }),
            Entry::Vacant(entry) => {
                entry.insert(campaign.clone());
                Ok(())
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn append_event(
        &self,
        tracking_id: TrackingId,
        ip_address: String,
        user_agent: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Result<Option<OpenEvent>, Error> {
        let mut registry = self.lock()?;
        let sequence = registry.next_sequence;

        let campaign = match registry.campaigns.get_mut(&tracking_id) {
            Some(campaign) => campaign,
            None => return Ok(None),
        };

        let event = OpenEvent {
            ip_address,
            user_agent,
            timestamp,
            sequence,
        };
        campaign.events.push(event.clone());
        registry.next_sequence += 1;

        Ok(Some(event))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let registry = self.lock()?;
        let campaigns = registry.campaigns.values().cloned().collect();

        Ok(campaigns)
    }
}
