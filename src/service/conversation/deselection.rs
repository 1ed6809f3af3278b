use async_trait::async_trait;

use crate::{
    error::{flow::FlowError, roster::RosterError},
    model::raid::Raid,
    service::lifecycle::RaidLifecycle,
    state::BotState,
};

use super::{input::parse_yes_no, reply, ConversationFlow, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeselectionStep {
    Confirm,
}

/// Asks a participant to confirm leaving an event.
pub struct DeselectionFlow {
    raid_id: u64,
    raid_name: String,
    confirmed: bool,
    step: DeselectionStep,
}

impl DeselectionFlow {
    pub fn new(raid: &Raid) -> Self {
        Self {
            raid_id: raid.id,
            raid_name: raid.name.clone(),
            confirmed: false,
            step: DeselectionStep::Confirm,
        }
    }
}

#[async_trait]
impl ConversationFlow for DeselectionFlow {
    type Step = DeselectionStep;

    fn set_step(&mut self, step: DeselectionStep) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        vec![format!(
            "Do you really want to sign off from {}? (yes/no)",
            self.raid_name
        )]
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        match parse_yes_no(input) {
            Some(answer) => {
                self.confirmed = answer;
                Ok(StepOutcome::Done)
            }
            None => {
                reply(state, user_id, "Please answer yes or no.").await;
                Ok(StepOutcome::Retry)
            }
        }
    }

    fn next_step(&self) -> Option<DeselectionStep> {
        None
    }

    async fn complete(self, state: &BotState, user_id: u64) -> Option<String> {
        if !self.confirmed {
            return Some(format!("You are still signed up for {}.", self.raid_name));
        }

        let text = match RaidLifecycle::from_state(state)
            .withdraw(self.raid_id, user_id)
            .await
        {
            Ok(true) => format!("You are no longer signed up for {}.", self.raid_name),
            Ok(false) => format!("You were not signed up for {}.", self.raid_name),
            Err(RosterError::RaidNotFound(_)) => "That event no longer exists.".to_string(),
            Err(e) => {
                tracing::error!(
                    "Failed to remove user {} from event {}: {}",
                    user_id,
                    self.raid_id,
                    e
                );
                "Cannot sign you off right now, please try again later.".to_string()
            }
        };
        Some(text)
    }
}
