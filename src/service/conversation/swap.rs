use async_trait::async_trait;

use crate::{
    error::{flow::FlowError, roster::RosterError},
    model::raid::{Raid, RaidUser},
    service::lifecycle::RaidLifecycle,
    state::BotState,
};

use super::{
    input::{numbered, pick},
    reply, ConversationFlow, StepOutcome,
};

/// Suffix that requests a flex slot in the chosen role.
const FLEX_SUFFIX: &str = "flex";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapStep {
    Role,
}

/// Moves a participant to another role, keeping their specialization.
pub struct SwapFlow {
    raid_id: u64,
    user_name: String,
    spec: String,
    roles: Vec<String>,
    step: SwapStep,
}

impl SwapFlow {
    pub fn new(raid: &Raid, participant: &RaidUser) -> Self {
        Self {
            raid_id: raid.id,
            user_name: participant.name.clone(),
            spec: participant.spec.clone(),
            roles: raid.roles().iter().map(|role| role.name.clone()).collect(),
            step: SwapStep::Role,
        }
    }
}

/// Splits an optional trailing `flex` off the role choice.
fn split_flex(input: &str) -> (&str, bool) {
    let trimmed = input.trim();
    match trimmed.rsplit_once(' ') {
        Some((choice, suffix)) if suffix.eq_ignore_ascii_case(FLEX_SUFFIX) => (choice.trim(), true),
        _ => (trimmed, false),
    }
}

#[async_trait]
impl ConversationFlow for SwapFlow {
    type Step = SwapStep;

    fn set_step(&mut self, step: SwapStep) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        vec![format!(
            "Which role do you want to swap to? Add flex to take a flex slot (e.g. 2 flex).\n{}",
            numbered(&self.roles)
        )]
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        let (choice, as_flex) = split_flex(input);
        let Some(role) = pick(choice, &self.roles).cloned() else {
            reply(state, user_id, "Please choose one of the listed roles.").await;
            return Ok(StepOutcome::Retry);
        };

        let result = RaidLifecycle::from_state(state)
            .sign_up(
                self.raid_id,
                user_id,
                &self.user_name,
                &self.spec,
                &role,
                as_flex,
            )
            .await;

        match result {
            Ok(()) => Ok(StepOutcome::Done),
            Err(RosterError::RoleUnavailable(_)) => {
                reply(
                    state,
                    user_id,
                    "That role is full or only takes flex sign-ups. Please choose another role.",
                )
                .await;
                Ok(StepOutcome::Retry)
            }
            Err(RosterError::RaidNotFound(_)) => Err(FlowError::SessionMissing),
            Err(e) => Err(e.into()),
        }
    }

    fn next_step(&self) -> Option<SwapStep> {
        None
    }

    async fn complete(self, _state: &BotState, _user_id: u64) -> Option<String> {
        None
    }
}
