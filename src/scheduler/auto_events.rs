//! Weekly auto events.
//!
//! Every auto event owns one cron job that fires at midnight (UTC) on the posting day,
//! `lead_days` before the event. Each run removes the raid published by the previous run
//! and publishes a fresh one.

use std::{collections::HashMap, sync::Arc};

use chrono::{Utc, Weekday};
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use uuid::Uuid;

use crate::{
    data::auto_event::AutoEventRepository,
    error::AppError,
    model::auto_event::{AutoEvent, CreateAutoEventParams},
    service::lifecycle::RaidLifecycle,
    state::BotState,
};

#[derive(Clone)]
pub struct AutoEventScheduler {
    scheduler: JobScheduler,
    /// Job id per auto event id.
    jobs: Arc<Mutex<HashMap<i32, Uuid>>>,
}

impl AutoEventScheduler {
    pub async fn new() -> Result<Self, AppError> {
        Ok(Self {
            scheduler: JobScheduler::new().await?,
            jobs: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Stores and schedules a new auto event.
    ///
    /// # Returns
    /// - `Ok(Some(AutoEvent))` - Registered
    /// - `Ok(None)` - The guild already has the maximum number of auto events
    /// - `Err(AppError)` - Database or scheduler error
    pub async fn create(
        &self,
        state: &BotState,
        params: CreateAutoEventParams,
    ) -> Result<Option<AutoEvent>, AppError> {
        let repo = AutoEventRepository::new(&state.db);

        if repo.count_by_guild(params.guild_id).await? >= state.max_auto_events {
            tracing::info!(
                "Guild {} reached the limit of {} auto events",
                params.guild_id,
                state.max_auto_events
            );
            return Ok(None);
        }

        let event = AutoEvent::from_entity(repo.create(&params).await?)?;
        if let Err(e) = self.schedule(state, &event).await {
            repo.delete(event.id).await?;
            return Err(e);
        }

        tracing::info!(
            "Registered auto event {} for guild {}, posting on {}",
            event.id,
            event.guild_id,
            event.posting_weekday()
        );

        Ok(Some(event))
    }

    /// Unschedules and deletes an auto event.
    ///
    /// # Returns
    /// - `Ok(true)` - Removed
    /// - `Ok(false)` - No such auto event
    pub async fn stop(&self, state: &BotState, id: i32) -> Result<bool, AppError> {
        if let Some(job) = self.jobs.lock().await.remove(&id) {
            self.scheduler.remove(&job).await?;
        }

        Ok(AutoEventRepository::new(&state.db).delete(id).await?)
    }

    /// Gets the auto events of a guild in creation order.
    pub async fn list(&self, state: &BotState, guild_id: u64) -> Result<Vec<AutoEvent>, AppError> {
        AutoEventRepository::new(&state.db)
            .get_by_guild(guild_id)
            .await?
            .into_iter()
            .map(AutoEvent::from_entity)
            .collect()
    }

    async fn schedule(&self, state: &BotState, event: &AutoEvent) -> Result<(), AppError> {
        let job_state = state.clone();
        let id = event.id;

        let job = Job::new_async(
            posting_cron(event.posting_weekday()).as_str(),
            move |_uuid, _lock| {
                let state = job_state.clone();

                Box::pin(async move {
                    if let Err(e) = run_auto_event(&state, id).await {
                        tracing::error!("Error running auto event {}: {}", id, e);
                    }
                })
            },
        )?;

        let job_id = self.scheduler.add(job).await?;
        self.jobs.lock().await.insert(id, job_id);

        Ok(())
    }
}

/// Schedules every stored auto event and starts the scheduler
///
/// Rows that fail to convert are logged and skipped.
pub async fn start_scheduler(state: &BotState) -> Result<(), AppError> {
    let scheduler = &state.auto_events;
    let models = AutoEventRepository::new(&state.db).get_all().await?;

    for model in models {
        let event = match AutoEvent::from_entity(model) {
            Ok(event) => event,
            Err(e) => {
                tracing::error!("Skipping stored auto event: {}", e);
                continue;
            }
        };
        scheduler.schedule(state, &event).await?;
    }

    scheduler.scheduler.start().await?;

    tracing::info!("Auto event scheduler started");

    Ok(())
}

/// Publishes this week's raid of an auto event, replacing last week's.
pub async fn run_auto_event(state: &BotState, id: i32) -> Result<(), AppError> {
    let repo = AutoEventRepository::new(&state.db);
    let Some(model) = repo.get_by_id(id).await? else {
        tracing::warn!("Auto event {} no longer exists", id);
        return Ok(());
    };
    let event = AutoEvent::from_entity(model)?;
    let lifecycle = RaidLifecycle::from_state(state);

    if let Some(last) = event.last_raid_id {
        if state.roster.contains(last).await {
            lifecycle.remove(last).await;
        }
    }

    let raid_id = lifecycle
        .publish(event.pending_for(Utc::now().date_naive()))
        .await?;
    repo.set_last_raid(id, Some(raid_id)).await?;

    tracing::info!("Auto event {} published event {}", id, raid_id);

    Ok(())
}

/// Cron expression for midnight on the given weekday.
fn posting_cron(weekday: Weekday) -> String {
    format!("0 0 0 * * {}", weekday)
}
