use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use opentrack::{Config, Error, MemoryDatabase};

const DEFAULT_LOG_FILTER: &str = "opentrack=info,actix_web=info";

#[actix_web::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    let config = Config::from_env()?;

    // opens only live as long as the process
    let db = opentrack::database(MemoryDatabase::new());

    opentrack::run(config, db).await
}
