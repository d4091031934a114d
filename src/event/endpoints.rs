use actix_web::http::header::USER_AGENT;
use actix_web::web::{Data, Json, Path};
use actix_web::{get, HttpRequest, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::campaign::TrackingId;
use crate::database::Database;
use crate::error::Error;

use super::manager::{self, EventRecord};
use super::pixel;
use super::timestamp::format_timestamp;

const X_FORWARDED_FOR: &str = "X-Forwarded-For";

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventBody {
    pub campaign: String,
    pub track_id: TrackingId,
    pub timestamp: String,
    pub ip_address: String,
    pub user_agent: Option<String>,
}

impl EventBody {
    pub fn render(record: EventRecord) -> EventBody {
        EventBody {
            campaign: record.campaign,
            track_id: record.track_id,
            timestamp: format_timestamp(&record.event.timestamp),
            ip_address: record.event.ip_address,
            user_agent: record.event.user_agent,
        }
    }
}

// the forwarded header is kept verbatim, proxy chains included
fn client_ip(req: &HttpRequest) -> String {
    if let Some(forwarded) = req
        .headers()
        .get(X_FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
    {
        return forwarded.to_string();
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_default()
}

fn user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

#[get("/track/{tracking_id}")]
#[tracing::instrument(skip(db, req))]
pub async fn track_open(
    db: Data<Box<dyn Database>>,
    req: HttpRequest,
    params: Path<String>,
) -> HttpResponse {
    let tracking_id = params.into_inner();

    let result = manager::record_open(
        &***db,
        &tracking_id,
        client_ip(&req),
        user_agent(&req),
        Utc::now(),
    )
    .await;

    // the pixel is served regardless so mail clients never show a broken image
    if let Err(err) = result {
        warn!(%tracking_id, error = %err, "failed to record open");
    }

    pixel::pixel_response()
}

#[get("/events")]
#[tracing::instrument(skip(db))]
pub async fn get_events(db: Data<Box<dyn Database>>) -> Result<Json<Vec<EventBody>>, Error> {
    let records = manager::list_events(&***db).await?;

    let body = records.into_iter().map(EventBody::render).collect();

    Ok(Json(body))
}
