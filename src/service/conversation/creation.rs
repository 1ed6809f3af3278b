use async_trait::async_trait;

use crate::{
    error::{flow::FlowError, publish::PublishError},
    service::lifecycle::RaidLifecycle,
    state::BotState,
};

use super::{
    fields::{DraftField, RaidDraft},
    ConversationFlow, StepOutcome,
};

/// Creates and publishes a one-off event.
pub struct CreationFlow {
    draft: RaidDraft,
    step: DraftField,
}

impl CreationFlow {
    pub fn new(draft: RaidDraft) -> Self {
        Self {
            draft,
            step: DraftField::Name,
        }
    }
}

#[async_trait]
impl ConversationFlow for CreationFlow {
    type Step = DraftField;

    fn set_step(&mut self, step: DraftField) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        self.draft.prompt(self.step)
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        self.draft.handle(self.step, state, user_id, input).await
    }

    fn next_step(&self) -> Option<DraftField> {
        self.draft.field_after(self.step)
    }

    async fn complete(self, state: &BotState, _user_id: u64) -> Option<String> {
        match RaidLifecycle::from_state(state).publish(self.draft.pending).await {
            Ok(raid_id) => {
                tracing::info!("Event {} created", raid_id);
                Some("Event created.".to_string())
            }
            Err(PublishError::NotPersisted(message_id)) => {
                tracing::error!("Event message {} could not be stored", message_id);
                Some("Cannot create event - the event could not be saved.".to_string())
            }
            Err(e) => {
                tracing::warn!("Failed to publish event: {}", e);
                Some(
                    "Cannot create event - does the bot have permission to post in the specified channel?"
                        .to_string(),
                )
            }
        }
    }
}
