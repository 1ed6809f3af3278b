use async_trait::async_trait;
use chrono::Weekday;

use crate::{
    error::flow::FlowError,
    model::auto_event::CreateAutoEventParams,
    state::BotState,
};

use super::{
    fields::{DraftField, RaidDraft},
    input::{parse_weekday, weekday_name},
    reply, ConversationFlow, StepOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoCreationStep {
    Field(DraftField),
    Weekday,
    LeadDays,
}

/// Registers a weekly event that is published automatically.
pub struct AutoCreationFlow {
    draft: RaidDraft,
    weekday: Weekday,
    lead_days: u32,
    step: AutoCreationStep,
}

impl AutoCreationFlow {
    pub fn new(draft: RaidDraft) -> Self {
        Self {
            draft,
            weekday: Weekday::Mon,
            lead_days: 0,
            step: AutoCreationStep::Field(DraftField::Name),
        }
    }
}

#[async_trait]
impl ConversationFlow for AutoCreationFlow {
    type Step = AutoCreationStep;

    fn set_step(&mut self, step: AutoCreationStep) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        match self.step {
            AutoCreationStep::Field(field) => self.draft.prompt(field),
            AutoCreationStep::Weekday => {
                vec!["On which day of the week does the event take place? (e.g. Saturday)".to_string()]
            }
            AutoCreationStep::LeadDays => vec![
                "How many days before the event should it be posted? (0-6)".to_string(),
            ],
        }
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        match self.step {
            AutoCreationStep::Field(field) => {
                self.draft.handle(field, state, user_id, input).await
            }
            AutoCreationStep::Weekday => match parse_weekday(input) {
                Some(weekday) => {
                    self.weekday = weekday;
                    Ok(StepOutcome::Done)
                }
                None => {
                    reply(state, user_id, "Please enter a day of the week, e.g. Saturday.").await;
                    Ok(StepOutcome::Retry)
                }
            },
            AutoCreationStep::LeadDays => match input.parse::<u32>().ok().filter(|d| *d < 7) {
                Some(days) => {
                    self.lead_days = days;
                    Ok(StepOutcome::Done)
                }
                None => {
                    reply(state, user_id, "Please enter a number between 0 and 6.").await;
                    Ok(StepOutcome::Retry)
                }
            },
        }
    }

    fn next_step(&self) -> Option<AutoCreationStep> {
        match self.step {
            AutoCreationStep::Field(DraftField::Description) => {
                Some(AutoCreationStep::Field(DraftField::Time))
            }
            AutoCreationStep::Field(DraftField::Channel) => Some(AutoCreationStep::Weekday),
            AutoCreationStep::Weekday => Some(AutoCreationStep::LeadDays),
            AutoCreationStep::LeadDays => Some(AutoCreationStep::Field(DraftField::OpenWorld)),
            AutoCreationStep::Field(field) => {
                self.draft.field_after(field).map(AutoCreationStep::Field)
            }
        }
    }

    async fn complete(self, state: &BotState, user_id: u64) -> Option<String> {
        let params = CreateAutoEventParams {
            guild_id: self.draft.pending.guild_id,
            creator_id: user_id,
            template: self.draft.pending,
            weekday: self.weekday,
            lead_days: self.lead_days,
        };

        let text = match state.auto_events.create(state, params).await {
            Ok(Some(event)) => format!(
                "Automated event created. It will be posted every {} for the event on {}.",
                weekday_name(event.posting_weekday()),
                weekday_name(event.weekday)
            ),
            Ok(None) => format!(
                "This server already has the maximum of {} automated events.",
                state.max_auto_events
            ),
            Err(e) => {
                tracing::error!("Failed to create auto event: {}", e);
                "Cannot create automated event, please try again later.".to_string()
            }
        };
        Some(text)
    }
}
