use std::sync::Arc;

use ummobile_api::{api, config, db, questionnaire, upstream};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ummobile_api::init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let settings = config::Settings::from_env()?;
    let store = db::open_database(&settings.database_path)?;
    let academic = upstream::AcademicClient::from_settings(&settings);
    let service = Arc::new(questionnaire::QuestionnaireService::new(academic, store));

    let mut server = api::start_api_server(service, settings.bind_addr).await?;
    tracing::info!(addr = %server.local_addr, "listening");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested");
    server.shutdown();

    Ok(())
}
