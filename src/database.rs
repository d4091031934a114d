use crate::campaign::db::{CampaignStore, MemoryCampaignStore};

/// Everything a request handler may touch. Handlers receive it as
/// `Data<Box<dyn Database>>` so each test can build its own instance.
pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
}

/// Keeps all state in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    campaigns: MemoryCampaignStore,
}

impl MemoryDatabase {
    pub fn new() -> MemoryDatabase {
        MemoryDatabase::default()
    }
}

impl Database for MemoryDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}
