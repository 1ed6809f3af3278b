//! Guild text commands.
//!
//! Commands are typed in a guild channel and answered by direct message. Everything but
//! `!help` requires the Manage Server permission, which the bot layer checks before
//! calling [`execute`].

use crate::{
    error::{publish::PublishError, AppError},
    model::fractal::{self, pending_fractal, TeamComposition},
    service::{
        conversation::{
            input::{parse_date, parse_time},
            AutoCreationFlow, AutoStopFlow, ConversationEngine, CreationFlow, RaidDraft,
            RoleGroupFlow, RoleTemplateFlow, Session, APOLOGY,
        },
        lifecycle::RaidLifecycle,
        lock::LockScope,
        settings::SettingsService,
    },
};

pub const COMMAND_PREFIX: char = '!';

const HELP_TEXT: &str = "Commands:\n\
!createEvent - Create an event\n\
!removeEvent <event id> - Remove an event\n\
!autoEvent - Create a weekly event that is posted automatically\n\
!stopAutoEvent - Stop a weekly event\n\
!editRoleGroups - Edit the role groups events can be restricted to\n\
!editRoleTemplates - Edit the role templates offered during event creation\n\
!setFractalChannel <channel name> - Set the channel fractal events are posted in\n\
!fractal <team composition> <dd.mm.yyyy> <HH:MM> <name> - Post a fractal event\n\
!help - Show this message\n\n\
React to an event with a class to sign up, Flex to sign up as flex, Swap to change your \
role and Cancel to sign off.";

/// Arguments of `!fractal`, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractalRequest {
    pub composition: &'static TeamComposition,
    /// Rendered as `Weekday, dd.mm.yyyy`.
    pub date: String,
    pub time: String,
    pub name: String,
}

impl FractalRequest {
    fn parse<'a>(mut parts: impl Iterator<Item = &'a str>) -> Option<Self> {
        let composition = fractal::composition(parts.next()?.parse().ok()?)?;
        let date = parse_date(parts.next()?)?;
        let time = parse_time(parts.next()?)?;
        let name = parts.collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            return None;
        }

        Some(Self {
            composition,
            date,
            time,
            name,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateEvent,
    /// Event id, if a valid one was given.
    RemoveEvent(Option<u64>),
    AutoEvent,
    StopAutoEvent,
    EditRoleGroups,
    EditRoleTemplates,
    /// Channel name, if one was given.
    SetFractalChannel(Option<String>),
    /// Request, if the arguments were valid.
    Fractal(Option<FractalRequest>),
    Help,
}

impl Command {
    /// Parses a channel message. Returns `None` for anything that is not a known command.
    pub fn parse(content: &str) -> Option<Self> {
        let mut parts = content.trim().strip_prefix(COMMAND_PREFIX)?.split_whitespace();
        let name = parts.next()?.to_lowercase();

        let command = match name.as_str() {
            "createevent" => Command::CreateEvent,
            "removeevent" => Command::RemoveEvent(parts.next().and_then(|id| id.parse().ok())),
            "autoevent" => Command::AutoEvent,
            "stopautoevent" => Command::StopAutoEvent,
            "editrolegroups" => Command::EditRoleGroups,
            "editroletemplates" => Command::EditRoleTemplates,
            "setfractalchannel" => Command::SetFractalChannel(
                parts
                    .next()
                    .map(|channel| channel.trim_start_matches('#').to_string())
                    .filter(|channel| !channel.is_empty()),
            ),
            "fractal" => Command::Fractal(FractalRequest::parse(parts)),
            "help" => Command::Help,
            _ => return None,
        };
        Some(command)
    }

    pub fn requires_manage(&self) -> bool {
        *self != Command::Help
    }
}

/// Runs a command for `user_id` in `guild_id`. Failures are logged and answered with an
/// apology; nothing is returned to the caller.
pub async fn execute(engine: &ConversationEngine, command: Command, guild_id: u64, user_id: u64) {
    tracing::debug!("Command {:?} from {} in guild {}", command, user_id, guild_id);

    if let Err(e) = run(engine, command.clone(), guild_id, user_id).await {
        tracing::error!("Command {:?} failed for user {}: {}", command, user_id, e);
        reply(engine, user_id, APOLOGY).await;
    }
}

async fn run(
    engine: &ConversationEngine,
    command: Command,
    guild_id: u64,
    user_id: u64,
) -> Result<(), AppError> {
    let state = engine.state();

    match command {
        Command::CreateEvent => {
            let draft = RaidDraft::load(state, guild_id, user_id).await?;
            engine
                .begin(user_id, Session::Creation(CreationFlow::new(draft)))
                .await;
        }
        Command::AutoEvent => {
            let draft = RaidDraft::load(state, guild_id, user_id).await?;
            engine
                .begin(user_id, Session::AutoCreation(AutoCreationFlow::new(draft)))
                .await;
        }
        Command::RemoveEvent(None) => {
            reply(engine, user_id, "Usage: !removeEvent <event id>").await;
        }
        Command::RemoveEvent(Some(raid_id)) => {
            let in_guild = state
                .roster
                .get(raid_id)
                .await
                .is_some_and(|raid| raid.guild_id == guild_id);

            let text = if in_guild && RaidLifecycle::from_state(state).remove(raid_id).await {
                tracing::info!("Event {} removed by {}", raid_id, user_id);
                "Event removed.".to_string()
            } else {
                format!("There is no event with id {} in this server.", raid_id)
            };
            reply(engine, user_id, &text).await;
        }
        Command::StopAutoEvent => match AutoStopFlow::start(state, guild_id).await? {
            Some(flow) => {
                engine.begin(user_id, Session::AutoStop(flow)).await;
            }
            None => {
                reply(engine, user_id, "There are no automated events in this server.").await;
            }
        },
        Command::EditRoleGroups => {
            if !state.locks.try_acquire(LockScope::RoleGroups, guild_id) {
                reply(engine, user_id, "Role groups are already being edited.").await;
                return Ok(());
            }
            match RoleGroupFlow::start(state, guild_id).await {
                Ok(flow) => {
                    engine.begin(user_id, Session::RoleGroupEdit(flow)).await;
                }
                Err(e) => {
                    state.locks.release(LockScope::RoleGroups, guild_id);
                    return Err(e);
                }
            }
        }
        Command::EditRoleTemplates => {
            if !state.locks.try_acquire(LockScope::RoleTemplates, guild_id) {
                reply(engine, user_id, "Role templates are already being edited.").await;
                return Ok(());
            }
            match RoleTemplateFlow::start(state, guild_id).await {
                Ok(flow) => {
                    engine.begin(user_id, Session::RoleTemplateEdit(flow)).await;
                }
                Err(e) => {
                    state.locks.release(LockScope::RoleTemplates, guild_id);
                    return Err(e);
                }
            }
        }
        Command::SetFractalChannel(None) => {
            reply(engine, user_id, "Usage: !setFractalChannel <channel name>").await;
        }
        Command::SetFractalChannel(Some(channel)) => {
            let text = if state
                .gateway
                .resolve_channel_by_name(guild_id, &channel)
                .await?
                .is_some()
            {
                SettingsService::new(&state.db)
                    .set_fractal_channel(guild_id, &channel)
                    .await?;
                tracing::info!("Fractal channel of guild {} set to {}", guild_id, channel);
                format!("Fractal events will be posted in #{}.", channel)
            } else {
                "I could not find a text channel with that name.".to_string()
            };
            reply(engine, user_id, &text).await;
        }
        Command::Fractal(None) => {
            let usage = format!(
                "Usage: !fractal <team composition> <dd.mm.yyyy> <HH:MM> <name>\n\
                 Team compositions:\n{}",
                fractal::composition_list()
            );
            reply(engine, user_id, &usage).await;
        }
        Command::Fractal(Some(request)) => {
            let text = post_fractal(engine, request, guild_id, user_id).await?;
            reply(engine, user_id, text).await;
        }
        Command::Help => reply(engine, user_id, HELP_TEXT).await,
    }

    Ok(())
}

/// Publishes a fractal event in the guild's fractal channel.
async fn post_fractal(
    engine: &ConversationEngine,
    request: FractalRequest,
    guild_id: u64,
    user_id: u64,
) -> Result<&'static str, AppError> {
    let state = engine.state();

    let Some(channel) = SettingsService::new(&state.db)
        .fractal_channel(guild_id)
        .await?
    else {
        return Ok(FRACTAL_CHANNEL_MISSING);
    };
    let pending = pending_fractal(
        guild_id,
        user_id,
        &request.name,
        &request.date,
        &request.time,
        request.composition,
        &channel,
    );

    Ok(match RaidLifecycle::from_state(state).publish(pending).await {
        Ok(raid_id) => {
            tracing::info!("Fractal event {} created by {}", raid_id, user_id);
            "Fractal event created."
        }
        Err(PublishError::ChannelNotFound { .. }) => FRACTAL_CHANNEL_MISSING,
        Err(e) => {
            tracing::warn!("Failed to publish fractal event: {}", e);
            "Cannot create fractal event - does the bot have permission to post in the fractal channel?"
        }
    })
}

const FRACTAL_CHANNEL_MISSING: &str = "The fractal channel is not set or no longer exists. \
Someone with the Manage Server permission can set it with !setFractalChannel <channel name>.";

async fn reply(engine: &ConversationEngine, user_id: u64, text: &str) {
    crate::service::conversation::reply(engine.state(), user_id, text).await;
}

#[cfg(test)]
mod tests {
    use test_utils::factory::create_auto_event;

    use super::*;
    use crate::{
        model::raid::{PendingRaid, RaidRole},
        service::conversation::FlowKind,
        test_support::test_state,
    };

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("!createEvent"), Some(Command::CreateEvent));
        assert_eq!(Command::parse("  !HELP  "), Some(Command::Help));
        assert_eq!(
            Command::parse("!removeEvent 123"),
            Some(Command::RemoveEvent(Some(123)))
        );
        assert_eq!(
            Command::parse("!removeEvent abc"),
            Some(Command::RemoveEvent(None))
        );
        assert_eq!(Command::parse("!dance"), None);
        assert_eq!(Command::parse("createEvent"), None);
        assert_eq!(Command::parse("!"), None);
    }

    #[test]
    fn parses_fractal_commands() {
        assert_eq!(
            Command::parse("!fractal 2 29.02.2020 20:00 T4 Dailies"),
            Some(Command::Fractal(Some(FractalRequest {
                composition: &fractal::TEAM_COMPOSITIONS[1],
                date: "Saturday, 29.02.2020".to_string(),
                time: "20:00".to_string(),
                name: "T4 Dailies".to_string(),
            })))
        );
        assert_eq!(
            Command::parse("!fractal 9 29.02.2020 20:00 T4"),
            Some(Command::Fractal(None))
        );
        assert_eq!(
            Command::parse("!fractal 1 31.02.2020 20:00 T4"),
            Some(Command::Fractal(None))
        );
        assert_eq!(
            Command::parse("!fractal 1 29.02.2020 20:00"),
            Some(Command::Fractal(None))
        );
        assert_eq!(
            Command::parse("!setFractalChannel #fractals"),
            Some(Command::SetFractalChannel(Some("fractals".to_string())))
        );
        assert_eq!(
            Command::parse("!setFractalChannel"),
            Some(Command::SetFractalChannel(None))
        );
    }

    #[test]
    fn only_help_is_public() {
        assert!(!Command::Help.requires_manage());
        assert!(Command::CreateEvent.requires_manage());
        assert!(Command::RemoveEvent(None).requires_manage());
    }

    /// Tests removing an event of the same and of another guild.
    ///
    /// Expected: only the event of the command's guild is removed
    #[tokio::test]
    async fn remove_event_checks_guild() {
        let (state, gateway) = test_state().await;
        let mut pending = PendingRaid::new(1, 2);
        pending.name = "Weekly Clear".to_string();
        pending.add_role(RaidRole::new(2, "Tank"));
        assert!(state.roster.insert(pending.into_raid(77, 10)).await);
        let engine = ConversationEngine::new(state.clone());

        execute(&engine, Command::RemoveEvent(Some(77)), 2, 5).await;
        assert!(state.roster.contains(77).await);
        assert_eq!(
            gateway.messages_to(5).last().unwrap(),
            "There is no event with id 77 in this server."
        );

        execute(&engine, Command::RemoveEvent(Some(77)), 1, 5).await;
        assert!(!state.roster.contains(77).await);
        assert_eq!(gateway.messages_to(5).last().unwrap(), "Event removed.");
        assert_eq!(gateway.state().deleted.len(), 1);
    }

    /// Tests that create starts a creation conversation.
    ///
    /// Expected: creation session active, first prompt sent
    #[tokio::test]
    async fn create_event_starts_conversation() {
        let (state, gateway) = test_state().await;
        let engine = ConversationEngine::new(state);

        execute(&engine, Command::CreateEvent, 1, 5).await;

        assert_eq!(engine.active_kind(5).await, Some(FlowKind::Creation));
        assert_eq!(
            gateway.messages_to(5),
            vec!["Enter the name of the event:".to_string()]
        );
    }

    /// Tests the guild lock on role group editing.
    ///
    /// Expected: a second editor is turned away
    #[tokio::test]
    async fn role_groups_are_edited_by_one_user() {
        let (state, gateway) = test_state().await;
        let engine = ConversationEngine::new(state.clone());

        execute(&engine, Command::EditRoleGroups, 1, 5).await;
        execute(&engine, Command::EditRoleGroups, 1, 6).await;

        assert_eq!(engine.active_kind(5).await, Some(FlowKind::RoleGroupEdit));
        assert_eq!(engine.active_kind(6).await, None);
        assert_eq!(
            gateway.messages_to(6),
            vec!["Role groups are already being edited.".to_string()]
        );
        assert!(state.locks.is_held(LockScope::RoleGroups, 1));
    }

    /// Tests posting a fractal event before and after the fractal channel is set.
    ///
    /// Expected: hint without a channel; afterwards a short special event with the preset
    /// roles is published in the configured channel
    #[tokio::test]
    async fn fractal_needs_fractal_channel() {
        let (state, gateway) = test_state().await;
        let engine = ConversationEngine::new(state.clone());
        let command = Command::parse("!fractal 1 29.02.2020 20:00 T4 Dailies").unwrap();

        execute(&engine, command.clone(), 1, 5).await;
        assert_eq!(gateway.messages_to(5), vec![FRACTAL_CHANNEL_MISSING.to_string()]);
        assert!(state.roster.raids_for_guild(1).await.is_empty());

        execute(&engine, Command::SetFractalChannel(Some("fractals".to_string())), 1, 5).await;
        assert_eq!(
            gateway.messages_to(5).last().unwrap(),
            "I could not find a text channel with that name."
        );

        gateway.add_channel(1, "fractals", 20);
        execute(&engine, Command::SetFractalChannel(Some("fractals".to_string())), 1, 5).await;
        assert_eq!(
            gateway.messages_to(5).last().unwrap(),
            "Fractal events will be posted in #fractals."
        );

        execute(&engine, command, 1, 5).await;
        assert_eq!(gateway.messages_to(5).last().unwrap(), "Fractal event created.");

        let raids = state.roster.raids_for_guild(1).await;
        assert_eq!(raids.len(), 1);
        let raid = &raids[0];
        assert!(raid.is_special_category);
        assert!(raid.is_display_short);
        assert_eq!(raid.channel_id, 20);
        assert_eq!(raid.leader_id, 5);
        assert_eq!(raid.capacity(), 5);

        let sent = gateway.state().sent[0].1.title.clone();
        assert!(sent.starts_with("Fractal: T4 Dailies - [Saturday, 29.02.2020 20:00]"));
    }

    /// Tests stopping auto events with and without registered ones.
    ///
    /// Expected: hint without auto events, conversation otherwise
    #[tokio::test]
    async fn stop_auto_event_needs_auto_events() {
        let (state, gateway) = test_state().await;
        let engine = ConversationEngine::new(state.clone());

        execute(&engine, Command::StopAutoEvent, 1, 5).await;
        assert_eq!(
            gateway.messages_to(5),
            vec!["There are no automated events in this server.".to_string()]
        );

        create_auto_event(&state.db, "1").await.unwrap();
        execute(&engine, Command::StopAutoEvent, 1, 5).await;
        assert_eq!(engine.active_kind(5).await, Some(FlowKind::AutoStop));
    }
}
