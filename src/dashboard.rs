use actix_web::http::header::ContentType;
use actix_web::{get, HttpResponse};

const INDEX_HTML: &str = include_str!("../templates/index.html");

#[get("/")]
#[tracing::instrument]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
