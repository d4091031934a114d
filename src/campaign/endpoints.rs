use actix_web::post;
use actix_web::web::{Data, Json};
use actix_web::HttpRequest;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::Error;

use super::{manager, TrackingId};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GenerateBody {
    pub campaign: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TrackingBody {
    pub tracking_id: TrackingId,
    pub tracking_url: String,
    pub html_snippet: String,
}

impl TrackingBody {
    pub fn render(req: &HttpRequest, tracking_id: TrackingId) -> TrackingBody {
        let info = req.connection_info();
        let tracking_url = format!("{}://{}/track/{}", info.scheme(), info.host(), tracking_id);
        let html_snippet = format!(r#"<img src="{}" width="1" height="1" alt="">"#, tracking_url);

        TrackingBody {
            tracking_id,
            tracking_url,
            html_snippet,
        }
    }
}

// a missing or unparsable body is treated the same as `{}`
#[post("/generate")]
#[tracing::instrument(skip(db, req))]
pub async fn generate_pixel(
    db: Data<Box<dyn Database>>,
    req: HttpRequest,
    body: Option<Json<GenerateBody>>,
) -> Result<Json<TrackingBody>, Error> {
    let body = body.map(Json::into_inner).unwrap_or_default();
    let campaign = manager::create_campaign(&***db, body.campaign).await?;

    Ok(Json(TrackingBody::render(&req, campaign.id)))
}
