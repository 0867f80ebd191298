use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lang_registry::api::{self, AppState};
use lang_registry::config::Config;
use lang_registry::db::SqliteProgrammingLangRepository;
use lang_registry::service::ProgrammingLangService;

#[derive(Parser)]
#[command(name = "langreg")]
#[command(about = "CRUD server for programming language records")]
struct Cli {
    #[command(flatten)]
    config: Config,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "lang_registry=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    let config = cli.config;
    let db = config.open_database()?;
    db.ensure_schema()?;

    let service = ProgrammingLangService::new(SqliteProgrammingLangRepository::new(&db));
    let state = AppState::new(service).with_request_timeout(config.request_timeout());
    let app = api::create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Language registry listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
