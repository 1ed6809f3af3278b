use async_trait::async_trait;

use crate::{
    error::{flow::FlowError, roster::RosterError},
    model::{catalog::RoleCatalog, raid::Raid},
    service::lifecycle::RaidLifecycle,
    state::BotState,
};

use super::{
    input::{numbered, pick},
    reply, ConversationFlow, StepOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    Spec,
    Role,
}

/// Signs a user up after they picked a class (or flex) reaction.
pub struct SelectionFlow {
    raid_id: u64,
    raid_name: String,
    user_name: String,
    /// Class whose specializations are offered; `None` offers every specialization.
    class: Option<&'static str>,
    spec: Option<String>,
    as_flex: bool,
    /// Roles the user may pick, in raid order.
    roles: Vec<String>,
    step: SelectionStep,
}

impl SelectionFlow {
    /// Primary sign-up with a specialization of `class`.
    pub fn for_class(raid: &Raid, user_name: &str, class: &'static str) -> Self {
        Self::build(raid, user_name, Some(class), false)
    }

    /// Flex sign-up with any specialization.
    pub fn flex(raid: &Raid, user_name: &str) -> Self {
        Self::build(raid, user_name, None, true)
    }

    fn build(raid: &Raid, user_name: &str, class: Option<&'static str>, as_flex: bool) -> Self {
        let roles = raid
            .roles()
            .iter()
            .filter(|role| as_flex || !role.flex_only)
            .map(|role| role.name.clone())
            .collect();

        Self {
            raid_id: raid.id,
            raid_name: raid.name.clone(),
            user_name: user_name.to_string(),
            class,
            spec: None,
            as_flex,
            roles,
            step: SelectionStep::Spec,
        }
    }

    fn specs(&self) -> Vec<&'static str> {
        match self.class {
            Some(class) => RoleCatalog::specializations_for(class).to_vec(),
            None => RoleCatalog::class_names()
                .flat_map(RoleCatalog::specializations_for)
                .copied()
                .collect(),
        }
    }
}

#[async_trait]
impl ConversationFlow for SelectionFlow {
    type Step = SelectionStep;

    fn set_step(&mut self, step: SelectionStep) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        match self.step {
            SelectionStep::Spec => match self.class {
                Some(class) => vec![format!(
                    "Signing up for {} as {}. Which specialization will you play?\n{}",
                    self.raid_name,
                    class,
                    numbered(&self.specs())
                )],
                None => vec![format!(
                    "Signing up for {} as flex. Which specialization will you play? Type its name.",
                    self.raid_name
                )],
            },
            SelectionStep::Role => vec![format!(
                "Which role will you take?\n{}",
                numbered(&self.roles)
            )],
        }
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        match self.step {
            SelectionStep::Spec => {
                let specs = self.specs();
                let Some(spec) = pick(input, &specs) else {
                    reply(state, user_id, "Please choose one of the listed specializations.").await;
                    return Ok(StepOutcome::Retry);
                };
                self.spec = Some(spec.to_string());
                Ok(StepOutcome::Done)
            }
            SelectionStep::Role => {
                let Some(role) = pick(input, &self.roles).cloned() else {
                    reply(state, user_id, "Please choose one of the listed roles.").await;
                    return Ok(StepOutcome::Retry);
                };
                let spec = self.spec.as_deref().ok_or(FlowError::SessionMissing)?;

                let result = RaidLifecycle::from_state(state)
                    .sign_up(
                        self.raid_id,
                        user_id,
                        &self.user_name,
                        spec,
                        &role,
                        self.as_flex,
                    )
                    .await;

                match result {
                    Ok(()) => Ok(StepOutcome::Done),
                    Err(RosterError::RoleUnavailable(_)) => {
                        reply(
                            state,
                            user_id,
                            "That role is already full. Please choose another role.",
                        )
                        .await;
                        Ok(StepOutcome::Retry)
                    }
                    Err(RosterError::RaidNotFound(_)) => Err(FlowError::SessionMissing),
                    Err(e) => Err(e.into()),
                }
            }
        }
    }

    fn next_step(&self) -> Option<SelectionStep> {
        match self.step {
            SelectionStep::Spec => Some(SelectionStep::Role),
            SelectionStep::Role => None,
        }
    }

    async fn complete(self, _state: &BotState, _user_id: u64) -> Option<String> {
        None
    }
}
