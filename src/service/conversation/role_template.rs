use async_trait::async_trait;

use crate::{
    error::{flow::FlowError, AppError},
    model::{raid::RaidRole, settings::RoleTemplate},
    service::{lock::LockScope, settings::SettingsService},
    state::BotState,
    util::format::{format_roles, parse_roles_strict},
};

use super::{
    input::{is_keyword, numbered, parse_choice, pick, DONE_KEYWORD},
    reply, ConversationFlow, StepOutcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleTemplateStep {
    Menu,
    Add,
    Remove,
}

/// Edits the guild's role templates. Holds the guild's role template lock until it ends.
pub struct RoleTemplateFlow {
    guild_id: u64,
    templates: Vec<RoleTemplate>,
    selected: Option<RoleTemplateStep>,
    step: RoleTemplateStep,
}

impl RoleTemplateFlow {
    /// Loads the current templates. The caller must hold the guild's role template lock.
    pub async fn start(state: &BotState, guild_id: u64) -> Result<Self, AppError> {
        let templates = SettingsService::new(&state.db)
            .role_templates(guild_id)
            .await?;

        Ok(Self {
            guild_id,
            templates,
            selected: None,
            step: RoleTemplateStep::Menu,
        })
    }

    fn template_names(&self) -> Vec<String> {
        self.templates.iter().map(|t| t.name.clone()).collect()
    }

    async fn reload(&mut self, state: &BotState) -> Result<(), FlowError> {
        self.templates = SettingsService::new(&state.db)
            .role_templates(self.guild_id)
            .await?;
        Ok(())
    }
}

/// Parses `name = amount:role;amount:!role`. Every role entry must be valid.
fn parse_template(input: &str) -> Option<(String, Vec<RaidRole>)> {
    let (name, roles) = input.split_once('=')?;
    let name = name.trim();
    let roles = parse_roles_strict(roles)?;
    if name.is_empty() || roles.is_empty() {
        return None;
    }
    Some((name.to_string(), roles))
}

#[async_trait]
impl ConversationFlow for RoleTemplateFlow {
    type Step = RoleTemplateStep;

    fn set_step(&mut self, step: RoleTemplateStep) {
        self.step = step;
    }

    fn prompt(&self) -> Vec<String> {
        let text = match self.step {
            RoleTemplateStep::Menu => {
                let current = if self.templates.is_empty() {
                    "There are no role templates yet.".to_string()
                } else {
                    let lines: Vec<String> = self
                        .templates
                        .iter()
                        .map(|t| format!("{} = {}", t.name, format_roles(&t.roles)))
                        .collect();
                    format!("Current role templates:\n{}", lines.join("\n"))
                };
                format!(
                    "{}\n\n1. Add or replace a role template\n2. Remove a role template\nType done when finished.",
                    current
                )
            }
            RoleTemplateStep::Add => "Enter the template in the format name = amount:role;amount:role \
                 (e.g. Standard = 2:Tank;3:DPS;1:!Support):"
                .to_string(),
            RoleTemplateStep::Remove => format!(
                "Which role template should be removed?\n{}",
                numbered(&self.template_names())
            ),
        };
        vec![text]
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        let settings = SettingsService::new(&state.db);

        match self.step {
            RoleTemplateStep::Menu => {
                self.selected = if is_keyword(input, DONE_KEYWORD) {
                    None
                } else {
                    match parse_choice(input, 2) {
                        Some(0) => Some(RoleTemplateStep::Add),
                        Some(_) if self.templates.is_empty() => {
                            reply(state, user_id, "There are no role templates to remove.").await;
                            return Ok(StepOutcome::Retry);
                        }
                        Some(_) => Some(RoleTemplateStep::Remove),
                        None => {
                            reply(state, user_id, "Please choose 1, 2 or type done.").await;
                            return Ok(StepOutcome::Retry);
                        }
                    }
                };
            }
            RoleTemplateStep::Add => {
                let Some((name, roles)) = parse_template(input) else {
                    reply(
                        state,
                        user_id,
                        "Invalid input: use the format name = amount:role;amount:role",
                    )
                    .await;
                    return Ok(StepOutcome::Retry);
                };
                settings
                    .save_role_template(self.guild_id, &name, &roles)
                    .await?;
                tracing::info!("Saved role template '{}' of guild {}", name, self.guild_id);
                reply(state, user_id, &format!("Role template {} saved.", name)).await;
                self.reload(state).await?;
            }
            RoleTemplateStep::Remove => {
                let Some(name) = pick(input, &self.template_names()).cloned() else {
                    reply(state, user_id, "Please choose one of the listed role templates.").await;
                    return Ok(StepOutcome::Retry);
                };
                settings.delete_role_template(self.guild_id, &name).await?;
                reply(state, user_id, &format!("Role template {} removed.", name)).await;
                self.reload(state).await?;
            }
        }

        Ok(StepOutcome::Done)
    }

    fn next_step(&self) -> Option<RoleTemplateStep> {
        match self.step {
            RoleTemplateStep::Menu => self.selected,
            _ => Some(RoleTemplateStep::Menu),
        }
    }

    fn release(&self, state: &BotState) {
        state.locks.release(LockScope::RoleTemplates, self.guild_id);
    }

    async fn complete(self, _state: &BotState, _user_id: u64) -> Option<String> {
        Some("Finished editing role templates.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_template_definition() {
        let (name, roles) = parse_template("Standard = 2:Tank;1:!Support").unwrap();
        assert_eq!(name, "Standard");
        assert_eq!(
            roles,
            vec![RaidRole::new(2, "Tank"), RaidRole::flex(1, "Support")]
        );

        assert!(parse_template("Standard = 2:Tank;oops").is_none());
        assert!(parse_template("Standard 2:Tank").is_none());
        assert!(parse_template(" = 2:Tank").is_none());
    }
}
