use actix_cors::Cors;
use actix_web::web::{self, Data, PathConfig, ServiceConfig};
use actix_web::{App, HttpServer, ResponseError};
use tracing::info;
use tracing_actix_web::TracingLogger;

pub mod campaign;
pub mod config;
pub mod dashboard;
pub mod database;
pub mod error;
pub mod event;
pub mod typedid;

pub use campaign::{GenerateBody, TrackingBody, TrackingId};
pub use config::Config;
pub use database::{Database, MemoryDatabase};
pub use error::Error;
pub use event::EventBody;

/// Registers every route. Shared by the server and the http tests so both
/// see the same surface.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .service(dashboard::index)
    .service(campaign::endpoints::generate_pixel)
    .service(event::endpoints::track_open)
    .service(event::endpoints::get_events)
    .default_service(web::to(|| async { Error::PathDoesNotExist.error_response() }));
}

pub fn database(db: impl Database + 'static) -> Data<Box<dyn Database>> {
    Data::new(Box::new(db) as Box<dyn Database>)
}

pub async fn run(config: Config, db: Data<Box<dyn Database>>) -> Result<(), Error> {
    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .configure(configure)
    });

    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    info!("listening on {}:{}", config.host, config.port);
    server.bind(config.address())?.run().await?;

    Ok(())
}
