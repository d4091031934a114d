use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::campaign::{Campaign, TrackingId};
use crate::database::Database;
use crate::error::Error;

use super::OpenEvent;

/// An open flattened out of its campaign.
#[derive(Clone, Debug)]
pub struct EventRecord {
    pub campaign: String,
    pub track_id: TrackingId,
    pub event: OpenEvent,
}

/// Appends an open to the campaign behind `tracking_id`. Returns whether an
/// open was recorded; ids that don't parse or aren't known are ignored.
#[tracing::instrument(skip(db))]
pub async fn record_open(
    db: &dyn Database,
    tracking_id: &str,
    ip_address: String,
    user_agent: Option<String>,
    timestamp: DateTime<Utc>,
) -> Result<bool, Error> {
    let tracking_id = match TrackingId::from_str(tracking_id) {
        Ok(tracking_id) => tracking_id,
        Err(_) => {
            debug!("ignoring open for malformed tracking id");
            return Ok(false);
        }
    };

    let event = db
        .campaigns()
        .append_event(tracking_id, ip_address, user_agent, timestamp)
        .await?;

    match event {
        Some(event) => {
            info!(%tracking_id, ip_address = %event.ip_address, "tracked open");
            Ok(true)
        }
        None => {
            debug!(%tracking_id, "ignoring open for unknown tracking id");
            Ok(false)
        }
    }
}

/// All opens of all campaigns, newest first.
#[tracing::instrument(skip(db))]
pub async fn list_events(db: &dyn Database) -> Result<Vec<EventRecord>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    let mut records: Vec<EventRecord> = campaigns
        .into_iter()
        .flat_map(|campaign| {
            let Campaign {
                id, name, events, ..
            } = campaign;
            events.into_iter().map(move |event| EventRecord {
                campaign: name.clone(),
                track_id: id,
                event,
            })
        })
        .collect();

    records.sort_by(|a, b| {
        let a = (a.event.timestamp, a.event.sequence);
        let b = (b.event.timestamp, b.event.sequence);
        b.cmp(&a)
    });

    Ok(records)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::campaign::manager::create_campaign;
    use crate::database::MemoryDatabase;

    async fn event_count(db: &dyn Database) -> usize {
        list_events(db).await.unwrap().len()
    }

    #[tokio::test]
    async fn record_open_appends_one_event_for_known_id() {
        let db = MemoryDatabase::new();
        let campaign = create_campaign(&db, Some("Spring Sale".into()))
            .await
            .unwrap();

        let recorded = record_open(
            &db,
            &campaign.id.to_string(),
            "10.0.0.1".into(),
            Some("Mail/1.0".into()),
            Utc::now(),
        )
        .await
        .unwrap();

        assert!(recorded);
        let campaigns = db.campaigns().fetch_campaigns().await.unwrap();
        assert_eq!(campaigns[0].events.len(), 1);
        assert_eq!(campaigns[0].events[0].ip_address, "10.0.0.1");
        assert_eq!(campaigns[0].events[0].user_agent.as_deref(), Some("Mail/1.0"));
    }

    #[tokio::test]
    async fn record_open_ignores_unknown_id() {
        let db = MemoryDatabase::new();
        let campaign = create_campaign(&db, None).await.unwrap();
        record_open(&db, &campaign.id.to_string(), "1.1.1.1".into(), None, Utc::now())
            .await
            .unwrap();
        let before = event_count(&db).await;

        let unknown = TrackingId::new().to_string();
        let recorded = record_open(&db, &unknown, "1.1.1.1".into(), None, Utc::now())
            .await
            .unwrap();

        assert!(!recorded);
        assert_eq!(event_count(&db).await, before);
    }

    #[tokio::test]
    async fn record_open_ignores_malformed_id() {
        let db = MemoryDatabase::new();
        create_campaign(&db, None).await.unwrap();

        let recorded = record_open(&db, "does-not-exist", "1.1.1.1".into(), None, Utc::now())
            .await
            .unwrap();

        assert!(!recorded);
        assert_eq!(event_count(&db).await, 0);
    }

    #[tokio::test]
    async fn list_events_is_newest_first() {
        let db = MemoryDatabase::new();
        let first = create_campaign(&db, Some("First".into())).await.unwrap();
        let second = create_campaign(&db, Some("Second".into())).await.unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let t2 = t1 + Duration::minutes(5);
        let t3 = t2 + Duration::hours(13);

        record_open(&db, &first.id.to_string(), "t2".into(), None, t2)
            .await
            .unwrap();
        record_open(&db, &second.id.to_string(), "t3".into(), None, t3)
            .await
            .unwrap();
        record_open(&db, &first.id.to_string(), "t1".into(), None, t1)
            .await
            .unwrap();

        let records = list_events(&db).await.unwrap();

        let ips: Vec<&str> = records.iter().map(|r| r.event.ip_address.as_str()).collect();
        assert_eq!(ips, vec!["t3", "t2", "t1"]);
        assert_eq!(records[0].campaign, "Second");
        assert_eq!(records[0].track_id, second.id);
        assert_eq!(records[1].track_id, first.id);
    }

    #[tokio::test]
    async fn list_events_breaks_ties_by_arrival() {
        let db = MemoryDatabase::new();
        let campaign = create_campaign(&db, None).await.unwrap();
        let now = Utc::now();

        for ip in ["a", "b", "c"] {
            record_open(&db, &campaign.id.to_string(), ip.into(), None, now)
                .await
                .unwrap();
        }

        let records = list_events(&db).await.unwrap();

        let ips: Vec<&str> = records.iter().map(|r| r.event.ip_address.as_str()).collect();
        assert_eq!(ips, vec!["c", "b", "a"]);
    }
}
