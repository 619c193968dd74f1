use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::common::{news as news_store, selections};
use crate::news::NewsPipeline;

/// Upper bound on stocks refreshed at once within a tick.
const REFRESH_CONCURRENCY: usize = 5;

/// Guard ensuring a refresh tick never overlaps the previous one. The store
/// upserts are idempotent, so skipping a tick is always safe.
pub type RefreshLock = Arc<Mutex<()>>;

/// Start the recurring watchlist refresh on the given cron schedule.
pub async fn start(pipeline: NewsPipeline, schedule: &str) -> anyhow::Result<()> {
    let scheduler = JobScheduler::new().await?;
    let lock: RefreshLock = Arc::new(Mutex::new(()));

    tracing::info!("Scheduling watchlist refresh: {schedule}");

    let job = Job::new_async(schedule, move |_id, _scheduler| {
        let pipeline = pipeline.clone();
        let lock = lock.clone();
        Box::pin(async move {
            refresh_tick(&pipeline, &lock).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    Ok(())
}

/// One refresh tick over every selected stock.
///
/// Returns whether the tick actually ran; it is skipped when the previous
/// one still holds the refresh lock. One stock failing is logged and does
/// not stop the remaining stocks.
#[tracing::instrument(skip_all)]
pub async fn refresh_tick(pipeline: &NewsPipeline, lock: &RefreshLock) -> bool {
    let Ok(_guard) = lock.try_lock() else {
        tracing::warn!("Previous refresh still running, skipping this tick");
        return false;
    };

    let stock_names = match selections::selected_stock_names(pipeline.db()).await {
        Ok(names) => names,
        Err(error) => {
            tracing::error!("Could not load the selected stocks: {error}");
            return true;
        }
    };
    tracing::info!("Refreshing {} selected stocks", stock_names.len());

    // Stocks refresh independently: every refresh runs to completion and
    // a failing one only costs its own articles.
    futures::stream::iter(&stock_names)
        .for_each_concurrent(REFRESH_CONCURRENCY, |name| async move {
            if let Err(error) = pipeline.run_for_stock(name).await {
                tracing::error!("Refresh failed for {name}: {error}");
            }
        })
        .await;

    // Second pass: articles discovered earlier whose summary is still missing.
    match news_store::list_pending_enrichment(pipeline.db()).await {
        Ok(pending) => {
            for article in pending {
                if let Err(error) = pipeline.extract_one(&article.url, &article.stock_name).await {
                    tracing::error!("Enrichment failed for {}: {error}", article.url);
                }
            }
        }
        Err(error) => tracing::error!("Could not load the articles pending enrichment: {error}"),
    }

    true
}
