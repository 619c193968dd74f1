use std::net::TcpListener;

use dotenvy::dotenv;

use stock_news_api::configuration::Settings;
use stock_news_api::news::enrich::Enricher;
use stock_news_api::news::extract::ExtractorRules;
use stock_news_api::news::fetch::Fetcher;
use stock_news_api::news::summarize::Summarizer;
use stock_news_api::news::NewsPipeline;
use stock_news_api::startup::AppState;
use stock_news_api::{database, observability, scheduler, startup};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let subscriber = observability::get_subscriber("info");
    observability::init_subscriber(subscriber);

    let settings = Settings::from_env()?;
    let db = database::init_database(&settings.database_url).await?;

    let fetcher = Fetcher::new(settings.fetch_timeout);
    let summarizer = Summarizer::new(
        &settings.summarizer_api_url,
        settings.summarizer_api_key.clone(),
        &settings.summarizer_model,
    );
    let enricher = Enricher::new(fetcher.clone(), summarizer.clone(), settings.enrich_concurrency);
    let pipeline = NewsPipeline::new(
        db.clone(),
        fetcher,
        enricher,
        summarizer,
        ExtractorRules::default(),
        settings.search_base_url.clone(),
    );

    scheduler::start(pipeline.clone(), &settings.refresh_schedule).await?;

    let listener = TcpListener::bind(&settings.listen_address)?;
    tracing::info!("Listening on {}", settings.listen_address);

    startup::startup(AppState { db, pipeline }, listener).await?;

    Ok(())
}
