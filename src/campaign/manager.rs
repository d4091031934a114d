use chrono::Utc;

use crate::database::Database;
use crate::error::Error;

use super::{Campaign, TrackingId, DEFAULT_CAMPAIGN_NAME};

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &dyn Database, name: Option<String>) -> Result<Campaign, Error> {
    let campaign = Campaign {
        id: TrackingId::new(),
        name: name.unwrap_or_else(|| DEFAULT_CAMPAIGN_NAME.to_string()),
        created_at: Utc::now(),
        events: vec![],
    };

    db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDatabase;

    #[tokio::test]
    async fn can_create_campaign() {
        let db = MemoryDatabase::new();

        let campaign = create_campaign(&db, Some("Spring Sale".into()))
            .await
            .unwrap();

        assert_eq!(campaign.name, "Spring Sale".to_string());
        assert!(campaign.events.is_empty());
        let stored = db.campaigns().fetch_campaigns().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, campaign.id);
    }

    #[tokio::test]
    async fn create_campaign_defaults_name() {
        let db = MemoryDatabase::new();

        let campaign = create_campaign(&db, None).await.unwrap();

        assert_eq!(campaign.name, DEFAULT_CAMPAIGN_NAME.to_string());
    }

    #[tokio::test]
    async fn create_campaign_issues_fresh_ids() {
        let db = MemoryDatabase::new();

        let first = create_campaign(&db, None).await.unwrap();
        let second = create_campaign(&db, None).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(db.campaigns().fetch_campaigns().await.unwrap().len(), 2);
    }
}
