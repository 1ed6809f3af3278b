//! Multi-step direct message conversations.
//!
//! Every conversation is a [`Session`] of one [`FlowKind`]. Each kind is a small state
//! machine over a closed step enum: the current step handles a message, and once it
//! reports [`StepOutcome::Done`] the flow either moves to its next step and prompts for
//! it, or finishes and runs its completion action.
//!
//! A user has at most one active session. Messages are dispatched by
//! [`ConversationEngine::handle_message`], which serializes messages of the same user.

mod auto_creation;
mod auto_stop;
mod creation;
mod deselection;
mod edit;
mod fields;
pub mod input;
mod role_group;
mod role_template;
mod selection;
pub mod session;
mod swap;

#[cfg(test)]
mod test;

use async_trait::async_trait;

use crate::{error::flow::FlowError, state::BotState};

pub use auto_creation::AutoCreationFlow;
pub use auto_stop::AutoStopFlow;
pub use creation::CreationFlow;
pub use deselection::DeselectionFlow;
pub use edit::EditFlow;
pub use fields::RaidDraft;
pub use role_group::RoleGroupFlow;
pub use role_template::RoleTemplateFlow;
pub use selection::SelectionFlow;
pub use swap::SwapFlow;

use input::CANCEL_KEYWORD;
use session::SessionStore;

/// Sent when a conversation ends because of an unexpected failure.
pub const APOLOGY: &str =
    "Sorry, something went wrong and this process had to be stopped. Please start again.";

/// Conversation kinds in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlowKind {
    Creation,
    RoleSelection,
    Edit,
    AutoCreation,
    AutoStop,
    RoleGroupEdit,
    RoleTemplateEdit,
    Deselection,
    Swap,
}

impl FlowKind {
    /// Whether typing `cancel` ends the conversation.
    pub fn supports_cancel(self) -> bool {
        !matches!(self, FlowKind::Deselection | FlowKind::Swap)
    }

    pub fn cancel_notice(self) -> &'static str {
        match self {
            FlowKind::Creation => "Event creation has been cancelled.",
            FlowKind::RoleSelection => "Role selection has been cancelled.",
            FlowKind::Edit => "Event editing has been cancelled.",
            FlowKind::AutoCreation => "Automated event creation has been cancelled.",
            FlowKind::AutoStop => "Removal of automated event has been cancelled.",
            FlowKind::RoleGroupEdit => "Editing role groups has been cancelled.",
            FlowKind::RoleTemplateEdit => "Editing role templates has been cancelled.",
            FlowKind::Deselection | FlowKind::Swap => "",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FlowKind::Creation => "creating an event",
            FlowKind::RoleSelection => "selecting a role",
            FlowKind::Edit => "editing an event",
            FlowKind::AutoCreation => "creating an automated event",
            FlowKind::AutoStop => "stopping an automated event",
            FlowKind::RoleGroupEdit => "editing role groups",
            FlowKind::RoleTemplateEdit => "editing role templates",
            FlowKind::Deselection => "leaving an event",
            FlowKind::Swap => "swapping roles",
        }
    }
}

/// Result of handling one message in the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The step is satisfied.
    Done,
    /// The step stays active; it already told the user what to do next.
    Retry,
}

/// A conversation state machine over a closed step enum.
#[async_trait]
pub trait ConversationFlow: Send {
    type Step: Copy + Send;

    fn set_step(&mut self, step: Self::Step);

    /// Messages asking for the current step's input.
    fn prompt(&self) -> Vec<String>;

    /// Handles one message for the current step.
    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError>;

    /// The step after the current one, or `None` when the flow is finished.
    fn next_step(&self) -> Option<Self::Step>;

    /// Installs the next step.
    ///
    /// # Returns
    /// - `true` - A next step was installed
    /// - `false` - The flow is finished
    fn advance(&mut self) -> bool {
        match self.next_step() {
            Some(step) => {
                self.set_step(step);
                true
            }
            None => false,
        }
    }

    /// Releases held resources such as edit locks. Runs whenever the session ends.
    fn release(&self, _state: &BotState) {}

    /// Runs the completion action and returns the closing message, if any.
    async fn complete(self, state: &BotState, user_id: u64) -> Option<String>
    where
        Self: Sized;
}

/// An active conversation.
pub enum Session {
    Creation(CreationFlow),
    RoleSelection(SelectionFlow),
    Edit(EditFlow),
    AutoCreation(AutoCreationFlow),
    AutoStop(AutoStopFlow),
    RoleGroupEdit(RoleGroupFlow),
    RoleTemplateEdit(RoleTemplateFlow),
    Deselection(DeselectionFlow),
    Swap(SwapFlow),
}

macro_rules! dispatch {
    ($session:expr, $flow:ident => $body:expr) => {
        match $session {
            Session::Creation($flow) => $body,
            Session::RoleSelection($flow) => $body,
            Session::Edit($flow) => $body,
            Session::AutoCreation($flow) => $body,
            Session::AutoStop($flow) => $body,
            Session::RoleGroupEdit($flow) => $body,
            Session::RoleTemplateEdit($flow) => $body,
            Session::Deselection($flow) => $body,
            Session::Swap($flow) => $body,
        }
    };
}

impl Session {
    pub fn kind(&self) -> FlowKind {
        match self {
            Session::Creation(_) => FlowKind::Creation,
            Session::RoleSelection(_) => FlowKind::RoleSelection,
            Session::Edit(_) => FlowKind::Edit,
            Session::AutoCreation(_) => FlowKind::AutoCreation,
            Session::AutoStop(_) => FlowKind::AutoStop,
            Session::RoleGroupEdit(_) => FlowKind::RoleGroupEdit,
            Session::RoleTemplateEdit(_) => FlowKind::RoleTemplateEdit,
            Session::Deselection(_) => FlowKind::Deselection,
            Session::Swap(_) => FlowKind::Swap,
        }
    }

    pub fn prompt(&self) -> Vec<String> {
        dispatch!(self, flow => flow.prompt())
    }

    async fn handle(
        &mut self,
        state: &BotState,
        user_id: u64,
        input: &str,
    ) -> Result<StepOutcome, FlowError> {
        dispatch!(self, flow => flow.handle(state, user_id, input).await)
    }

    fn advance(&mut self) -> bool {
        dispatch!(self, flow => flow.advance())
    }

    fn release(&self, state: &BotState) {
        dispatch!(self, flow => flow.release(state))
    }

    async fn complete(self, state: &BotState, user_id: u64) -> Option<String> {
        dispatch!(self, flow => flow.complete(state, user_id).await)
    }
}

/// Dispatches direct messages to the sessions of their senders.
pub struct ConversationEngine {
    state: BotState,
    sessions: SessionStore,
}

impl ConversationEngine {
    pub fn new(state: BotState) -> Self {
        Self {
            state,
            sessions: SessionStore::default(),
        }
    }

    pub fn state(&self) -> &BotState {
        &self.state
    }

    /// Kind of the user's active session, if any.
    pub async fn active_kind(&self, user_id: u64) -> Option<FlowKind> {
        let kind = self.sessions.lock(user_id).await.active_kind();
        self.sessions.release_if_idle(user_id);
        kind
    }

    /// Starts a session on behalf of a command or reaction.
    ///
    /// A busy user has already been told to finish their running conversation by
    /// [`ConversationEngine::start`], so that outcome is only logged.
    pub async fn begin(&self, user_id: u64, session: Session) {
        if let Err(active) = self.start(user_id, session).await {
            tracing::debug!("User {} is busy with {:?}, new session dropped", user_id, active);
        }
    }

    /// Starts a session and sends its first prompt.
    ///
    /// Only one session per user may be active. When another one is running, the new
    /// session's resources are released and the user is told to finish the running one.
    ///
    /// # Returns
    /// - `Ok(())` - Session started
    /// - `Err(kind)` - The user already has an active session of `kind`
    pub async fn start(&self, user_id: u64, session: Session) -> Result<(), FlowKind> {
        let mut sessions = self.sessions.lock(user_id).await;

        if let Some(active) = sessions.active_kind() {
            drop(sessions);
            session.release(&self.state);

            let hint = if active.supports_cancel() {
                " Finish it or type cancel first."
            } else {
                " Finish it first."
            };
            self.reply(
                user_id,
                &format!("You are already {}.{}", active.description(), hint),
            )
            .await;

            self.sessions.release_if_idle(user_id);
            return Err(active);
        }

        let prompt = session.prompt();
        sessions.insert(session);
        for message in prompt {
            self.reply(user_id, &message).await;
        }

        Ok(())
    }

    /// Handles a direct message.
    ///
    /// # Returns
    /// - `true` - The message belonged to an active session
    /// - `false` - The user has no active session
    pub async fn handle_message(&self, user_id: u64, text: &str) -> bool {
        let mut sessions = self.sessions.lock(user_id).await;

        let Some(kind) = sessions.active_kind() else {
            drop(sessions);
            self.sessions.release_if_idle(user_id);
            return false;
        };
        let input = text.trim();

        if kind.supports_cancel() && input.eq_ignore_ascii_case(CANCEL_KEYWORD) {
            if let Some(session) = sessions.remove(kind) {
                session.release(&self.state);
                self.reply(user_id, kind.cancel_notice()).await;
            }
            drop(sessions);
            self.sessions.release_if_idle(user_id);
            return true;
        }

        let outcome = match sessions.get_mut(kind) {
            Some(session) => session.handle(&self.state, user_id, input).await,
            None => Err(FlowError::SessionMissing),
        };

        let finished = match outcome {
            Ok(StepOutcome::Retry) => None,
            Ok(StepOutcome::Done) => {
                let next_prompt = sessions
                    .get_mut(kind)
                    .and_then(|session| session.advance().then(|| session.prompt()));

                match next_prompt {
                    Some(prompt) => {
                        for message in prompt {
                            self.reply(user_id, &message).await;
                        }
                        None
                    }
                    None => sessions.remove(kind),
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Stopping {} for user {}: {}",
                    kind.description(),
                    user_id,
                    e
                );
                if let Some(session) = sessions.remove(kind) {
                    session.release(&self.state);
                }
                self.reply(user_id, APOLOGY).await;
                None
            }
        };
        drop(sessions);

        if let Some(session) = finished {
            session.release(&self.state);
            if let Some(message) = session.complete(&self.state, user_id).await {
                self.reply(user_id, &message).await;
            }
        }

        self.sessions.release_if_idle(user_id);
        true
    }

    async fn reply(&self, user_id: u64, text: &str) {
        reply(&self.state, user_id, text).await;
    }

    #[cfg(test)]
    pub fn tracked_users(&self) -> usize {
        self.sessions.tracked_users()
    }
}

/// Sends a direct message, logging failures.
pub(crate) async fn reply(state: &BotState, user_id: u64, text: &str) {
    if let Err(e) = state.gateway.send_direct_message(user_id, text).await {
        tracing::warn!("Failed to send direct message to {}: {}", user_id, e);
    }
}
