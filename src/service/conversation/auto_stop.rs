use async_trait::async_trait;

use crate::{error::{flow::FlowError, AppError}, model::auto_event::AutoEvent, state::BotState};

use super::{
    input::{numbered, parse_choice, weekday_name},
    reply, ConversationFlow, StepOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoStopStep {
    Select,
}

/// Stops one of the guild's auto events.
pub struct AutoStopFlow {
    events: Vec<AutoEvent>,
    selected: Option<usize>,
    step: AutoStopStep,
}

impl AutoStopFlow {
    /// Loads the guild's auto events.
    ///
    /// # Returns
    /// - `Ok(Some(flow))` - The guild has auto events to choose from
    /// - `Ok(None)` - Nothing to stop
    pub async fn start(state: &BotState, guild_id: u64) -> Result<Option<Self>, AppError> {
        let events = state.auto_events.list(state, guild_id).await?;
        if events.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            events,
            selected: None,
            step: AutoStopStep::Select,
        }))
    }
}

#[async_trait]
impl ConversationFlow for AutoStopFlow {
    type Step = AutoStopStep;

    fn set_step(&mut self, step: AutoStopStep) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        let options: Vec<String> = self
            .events
            .iter()
            .map(|event| {
                format!(
                    "{} ({} {})",
                    event.template.name,
                    weekday_name(event.weekday),
                    event.template.time
                )
            })
            .collect();

        vec![format!(
            "Which automated event should be stopped?\n{}",
            numbered(&options)
        )]
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        match parse_choice(input, self.events.len()) {
            Some(index) => {
                self.selected = Some(index);
                Ok(StepOutcome::Done)
            }
            None => {
                reply(state, user_id, "Please choose one of the listed events.").await;
                Ok(StepOutcome::Retry)
            }
        }
    }

    fn next_step(&self) -> Option<AutoStopStep> {
        None
    }

    async fn complete(self, state: &BotState, _user_id: u64) -> Option<String> {
        let event = self.selected.and_then(|index| self.events.get(index))?;

        let text = match state.auto_events.stop(state, event.id).await {
            Ok(true) => {
                tracing::info!("Stopped auto event {} of guild {}", event.id, event.guild_id);
                "Automated event stopped."
            }
            Ok(false) => "That automated event no longer exists.",
            Err(e) => {
                tracing::error!("Failed to stop auto event {}: {}", event.id, e);
                "Cannot stop the automated event, please try again later."
            }
        };
        Some(text.to_string())
    }
}
