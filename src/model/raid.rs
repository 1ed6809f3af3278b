//! Domain model for events ("raids") and their participants.
//!
//! A [`Raid`] owns its role list and participants and enforces the capacity rules:
//! every participant references an existing role, the number of primary participants in
//! a role never exceeds its amount, flex-only roles hold no primary participants, and a
//! user occupies at most one slot per raid.

use std::collections::BTreeSet;

use crate::{
    error::AppError,
    model::document::DisplayDocument,
    util::{
        format::{parse_name_list, parse_roles},
        parse::parse_u64_from_string,
    },
};

/// A named role with a capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidRole {
    pub name: String,
    /// Maximum number of primary participants.
    pub amount: u32,
    /// Only flex participants may pick this role.
    pub flex_only: bool,
}

impl RaidRole {
    pub fn new(amount: u32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            flex_only: false,
        }
    }

    pub fn flex(amount: u32, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            flex_only: true,
        }
    }
}

/// A user signed up for a raid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaidUser {
    pub user_id: u64,
    /// Display name at sign-up time.
    pub name: String,
    /// Chosen specialization.
    pub spec: String,
    /// Name of the role the user occupies.
    pub role: String,
    /// Whether the user is on the flex list instead of holding a primary slot.
    pub is_flex: bool,
}

impl RaidUser {
    /// Converts a primary participant row, returning the raid id alongside.
    pub fn from_primary_entity(entity: entity::raid_user::Model) -> Result<(u64, Self), AppError> {
        let raid_id = parse_u64_from_string(entity.raid_id)?;
        Ok((
            raid_id,
            Self {
                user_id: parse_u64_from_string(entity.user_id)?,
                name: entity.username,
                spec: entity.spec,
                role: entity.role,
                is_flex: false,
            },
        ))
    }

    /// Converts a flex participant row, returning the raid id alongside.
    pub fn from_flex_entity(
        entity: entity::raid_user_flex::Model,
    ) -> Result<(u64, Self), AppError> {
        let raid_id = parse_u64_from_string(entity.raid_id)?;
        Ok((
            raid_id,
            Self {
                user_id: parse_u64_from_string(entity.user_id)?,
                name: entity.username,
                spec: entity.spec,
                role: entity.role,
                is_flex: true,
            },
        ))
    }
}

/// A message to deliver to a user after a roster change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterNotice {
    pub user_id: u64,
    pub text: String,
}

/// An event being assembled by the creation conversation.
///
/// Holds everything a [`Raid`] needs except the ids that only exist once the event
/// message has been published.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingRaid {
    pub guild_id: u64,
    pub leader_id: u64,
    pub name: String,
    pub description: String,
    pub date: String,
    pub time: String,
    /// Name of the channel the event is announced in.
    pub channel: String,
    pub is_open_world: bool,
    pub is_display_short: bool,
    pub is_special_category: bool,
    pub permitted_groups: BTreeSet<String>,
    roles: Vec<RaidRole>,
}

impl PendingRaid {
    pub fn new(guild_id: u64, leader_id: u64) -> Self {
        Self {
            guild_id,
            leader_id,
            ..Default::default()
        }
    }

    pub fn roles(&self) -> &[RaidRole] {
        &self.roles
    }

    /// Adds a role unless one with the same name (ignoring case) exists.
    pub fn add_role(&mut self, role: RaidRole) -> bool {
        if find_role(&self.roles, &role.name).is_some() {
            return false;
        }
        self.roles.push(role);
        true
    }

    pub fn clear_roles(&mut self) {
        self.roles.clear();
    }

    /// Converts into a published raid.
    pub fn into_raid(self, id: u64, channel_id: u64) -> Raid {
        Raid {
            id,
            guild_id: self.guild_id,
            channel_id,
            leader_id: self.leader_id,
            name: self.name,
            description: self.description,
            date: self.date,
            time: self.time,
            is_open_world: self.is_open_world,
            is_display_short: self.is_display_short,
            is_special_category: self.is_special_category,
            permitted_groups: self.permitted_groups,
            roles: self.roles,
            participants: Vec::new(),
            notices: Vec::new(),
        }
    }
}

/// A published event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raid {
    /// Id of the published message; unique and never changes.
    pub id: u64,
    pub guild_id: u64,
    pub channel_id: u64,
    pub leader_id: u64,
    pub name: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub is_open_world: bool,
    pub is_display_short: bool,
    pub is_special_category: bool,
    /// Role groups allowed to sign up; empty means everyone.
    pub permitted_groups: BTreeSet<String>,
    roles: Vec<RaidRole>,
    participants: Vec<RaidUser>,
    notices: Vec<RosterNotice>,
}

impl Raid {
    /// Converts a stored raid row into a raid without participants.
    ///
    /// Invalid role entries are logged and skipped.
    ///
    /// # Returns
    /// - `Ok(Raid)` - Converted raid
    /// - `Err(AppError::InternalErr(_))` - A stored id is not a valid snowflake
    pub fn from_entity(entity: entity::raid::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: parse_u64_from_string(entity.id)?,
            guild_id: parse_u64_from_string(entity.guild_id)?,
            channel_id: parse_u64_from_string(entity.channel_id)?,
            leader_id: parse_u64_from_string(entity.leader_id)?,
            name: entity.name,
            description: entity.description.unwrap_or_default(),
            date: entity.date,
            time: entity.time,
            is_open_world: entity.is_open_world,
            is_display_short: entity.is_display_short,
            is_special_category: entity.is_special_category,
            permitted_groups: parse_name_list(&entity.permitted_groups)
                .into_iter()
                .collect(),
            roles: parse_roles(&entity.roles),
            participants: Vec::new(),
            notices: Vec::new(),
        })
    }

    pub fn roles(&self) -> &[RaidRole] {
        &self.roles
    }

    pub fn role(&self, name: &str) -> Option<&RaidRole> {
        find_role(&self.roles, name)
    }

    pub fn participants(&self) -> &[RaidUser] {
        &self.participants
    }

    pub fn participant(&self, user_id: u64) -> Option<&RaidUser> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }

    /// Number of primary participants holding the role.
    pub fn primary_count(&self, role_name: &str) -> u32 {
        self.participants
            .iter()
            .filter(|p| !p.is_flex && p.role.eq_ignore_ascii_case(role_name))
            .count() as u32
    }

    /// Sum of the amounts of all roles open to primary participants.
    pub fn capacity(&self) -> u32 {
        self.roles
            .iter()
            .filter(|r| !r.flex_only)
            .map(|r| r.amount)
            .sum()
    }

    /// Adds a role unless one with the same name (ignoring case) exists.
    pub fn add_role(&mut self, role: RaidRole) -> bool {
        if self.role(&role.name).is_some() {
            return false;
        }
        self.roles.push(role);
        true
    }

    /// Removes a role together with everyone assigned to it.
    ///
    /// # Returns
    /// - `Some(removed)` - The participants that held the role
    /// - `None` - No such role, or it is the only role left
    pub fn remove_role(&mut self, name: &str) -> Option<Vec<RaidUser>> {
        if self.roles.len() <= 1 {
            return None;
        }
        let index = self
            .roles
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(name))?;
        let role = self.roles.remove(index);

        let (removed, kept): (Vec<RaidUser>, Vec<RaidUser>) = std::mem::take(&mut self.participants)
            .into_iter()
            .partition(|p| p.role == role.name);
        self.participants = kept;

        Some(removed)
    }

    /// Assigns a user to a role, replacing any previous assignment.
    ///
    /// # Arguments
    /// - `as_flex` - Sign up on the flex list instead of taking a primary slot
    /// - `notify` - Queue a [`RosterNotice`] for the user, drained with [`Raid::take_notices`]
    ///
    /// # Returns
    /// - `true` - The user now holds the requested slot
    /// - `false` - Unknown role, primary sign-up on a flex-only role, or role at capacity;
    ///   the raid is unchanged
    pub fn add_participant(
        &mut self,
        user_id: u64,
        name: impl Into<String>,
        spec: impl Into<String>,
        role_name: &str,
        as_flex: bool,
        notify: bool,
    ) -> bool {
        let Some(role) = self.role(role_name) else {
            return false;
        };
        let role = role.clone();

        if !as_flex {
            if role.flex_only {
                return false;
            }
            // A user already holding a primary slot in this role does not need another one.
            let already_holds = self
                .participant(user_id)
                .is_some_and(|p| !p.is_flex && p.role == role.name);
            let occupied = self.primary_count(&role.name) - u32::from(already_holds);
            if occupied >= role.amount {
                return false;
            }
        }

        self.participants.retain(|p| p.user_id != user_id);

        let user = RaidUser {
            user_id,
            name: name.into(),
            spec: spec.into(),
            role: role.name,
            is_flex: as_flex,
        };

        if notify {
            let text = if as_flex {
                format!(
                    "You are signed up for {} as flex {} ({}).",
                    self.name, user.role, user.spec
                )
            } else {
                format!(
                    "You are signed up for {} as {} ({}).",
                    self.name, user.role, user.spec
                )
            };
            self.notices.push(RosterNotice { user_id, text });
        }

        self.participants.push(user);
        true
    }

    /// Removes every assignment of the user.
    pub fn remove_participant(&mut self, user_id: u64) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.user_id != user_id);
        self.participants.len() != before
    }

    /// Drains queued notices.
    pub fn take_notices(&mut self) -> Vec<RosterNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Whether a member of the given role groups may sign up.
    pub fn is_user_permitted(&self, member_groups: &BTreeSet<String>) -> bool {
        self.permitted_groups.is_empty()
            || self
                .permitted_groups
                .iter()
                .any(|group| member_groups.contains(group))
    }

    /// Renders the raid for display. Pure; equal raids render equal documents.
    pub fn render(&self, short: bool) -> DisplayDocument {
        let signed_up = self.participants.iter().filter(|p| !p.is_flex).count();

        if short {
            let label = if self.is_special_category { "Fractal: " } else { "" };
            return DisplayDocument::new(format!(
                "{}{} - [{} {}] ({}/{})",
                label,
                self.name,
                self.date,
                self.time,
                signed_up,
                self.capacity()
            ));
        }

        let mut document = DisplayDocument::new(&self.name);
        if !self.description.is_empty() {
            document = document.description(&self.description);
        }

        document = document
            .field("Leader", format!("<@{}>", self.leader_id), true)
            .field("Date", &self.date, true)
            .field("Time", &self.time, true);

        if !self.permitted_groups.is_empty() {
            let groups = self
                .permitted_groups
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            document = document.field("Restricted to", groups, false);
        }

        for role in self.roles.iter().filter(|r| !r.flex_only) {
            let members = self
                .participants
                .iter()
                .filter(|p| !p.is_flex && p.role == role.name)
                .map(|p| format!("{} ({})", p.name, p.spec))
                .collect::<Vec<_>>();

            document = document.field(
                format!("{} ({}/{})", role.name, members.len(), role.amount),
                list_or_dash(members),
                true,
            );
        }

        if !self.is_open_world {
            let flex = self
                .participants
                .iter()
                .filter(|p| p.is_flex)
                .map(|p| format!("{} - {} ({})", p.name, p.role, p.spec))
                .collect::<Vec<_>>();
            document = document.field("Flex", list_or_dash(flex), false);
        }

        document.footer(format!("{}/{} signed up", signed_up, self.capacity()))
    }
}

fn find_role<'a>(roles: &'a [RaidRole], name: &str) -> Option<&'a RaidRole> {
    roles.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

fn list_or_dash(lines: Vec<String>) -> String {
    if lines.is_empty() {
        "-".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raid() -> Raid {
        let mut pending = PendingRaid::new(1, 2);
        pending.name = "Weekly Clear".to_string();
        pending.description = "Full clear".to_string();
        pending.date = "Saturday, 29.02.2020".to_string();
        pending.time = "20:00".to_string();
        pending.add_role(RaidRole::new(2, "Tank"));
        pending.add_role(RaidRole::new(1, "Healer"));
        pending.add_role(RaidRole::flex(1, "Support"));
        pending.into_raid(100, 10)
    }

    /// Tests that a full role rejects further primary sign-ups.
    ///
    /// Expected: third primary Tank is refused and the roster is unchanged
    #[test]
    fn rejects_primary_at_capacity() {
        let mut raid = raid();
        assert!(raid.add_participant(1, "a", "Firebrand", "Tank", false, false));
        assert!(raid.add_participant(2, "b", "Firebrand", "tank", false, false));

        let before = raid.clone();
        assert!(!raid.add_participant(3, "c", "Firebrand", "Tank", false, false));
        assert_eq!(raid, before);
        assert_eq!(raid.primary_count("Tank"), 2);
    }

    /// Tests that signing up again moves the user instead of duplicating them.
    ///
    /// Expected: exactly one record, in the new role
    #[test]
    fn relocates_existing_participant() {
        let mut raid = raid();
        assert!(raid.add_participant(1, "a", "Druid", "Tank", false, false));
        assert!(raid.add_participant(1, "a", "Druid", "Healer", false, false));

        assert_eq!(raid.participants().len(), 1);
        assert_eq!(raid.participant(1).unwrap().role, "Healer");
        assert_eq!(raid.primary_count("Tank"), 0);
    }

    #[test]
    fn re_signing_same_full_role_is_allowed() {
        let mut raid = raid();
        assert!(raid.add_participant(1, "a", "Druid", "Healer", false, false));
        assert!(raid.add_participant(1, "a", "Tempest", "Healer", false, false));
        assert_eq!(raid.participant(1).unwrap().spec, "Tempest");
    }

    #[test]
    fn flex_only_role_rejects_primary() {
        let mut raid = raid();
        assert!(!raid.add_participant(1, "a", "Chronomancer", "Support", false, false));
        assert!(raid.add_participant(1, "a", "Chronomancer", "Support", true, false));
        assert!(raid.participant(1).unwrap().is_flex);
    }

    #[test]
    fn flex_ignores_capacity() {
        let mut raid = raid();
        assert!(raid.add_participant(1, "a", "Druid", "Healer", false, false));
        assert!(raid.add_participant(2, "b", "Druid", "Healer", true, false));
        assert!(raid.add_participant(3, "c", "Druid", "Healer", true, false));
        assert_eq!(raid.primary_count("Healer"), 1);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut raid = raid();
        assert!(!raid.add_participant(1, "a", "Druid", "Bard", false, false));
        assert!(raid.participants().is_empty());
    }

    #[test]
    fn notices_are_queued_only_when_requested() {
        let mut raid = raid();
        raid.add_participant(1, "a", "Druid", "Healer", false, false);
        assert!(raid.take_notices().is_empty());

        raid.add_participant(2, "b", "Herald", "Tank", false, true);
        let notices = raid.take_notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].user_id, 2);
        assert!(raid.take_notices().is_empty());
    }

    /// Tests that rendering twice without a mutation yields the same document.
    ///
    /// Expected: both renders are equal in long and short form
    #[test]
    fn short_render_marks_fractal_events() {
        let mut raid = raid();
        assert!(!raid.render(true).title.starts_with("Fractal: "));

        raid.is_special_category = true;
        assert!(raid.render(true).title.starts_with("Fractal: Weekly Clear - ["));
    }

    #[test]
    fn render_is_idempotent() {
        let mut raid = raid();
        raid.add_participant(1, "a", "Firebrand", "Tank", false, false);
        raid.add_participant(2, "b", "Chronomancer", "Support", true, false);

        assert_eq!(raid.render(false), raid.render(false));
        assert_eq!(raid.render(true), raid.render(true));
    }

    #[test]
    fn render_shows_counts() {
        let mut raid = raid();
        raid.add_participant(1, "a", "Firebrand", "Tank", false, false);

        let document = raid.render(false);
        assert_eq!(document.title, "Weekly Clear");
        assert!(document.fields.iter().any(|f| f.name == "Tank (1/2)"));
        assert!(document.fields.iter().any(|f| f.name == "Flex" && f.value == "-"));

        let short = raid.render(true);
        assert_eq!(short.title, "Weekly Clear - [Saturday, 29.02.2020 20:00] (1/3)");
        assert!(short.fields.is_empty());
    }

    #[test]
    fn remove_role_drops_its_participants() {
        let mut raid = raid();
        raid.add_participant(1, "a", "Firebrand", "Tank", false, false);
        raid.add_participant(2, "b", "Druid", "Healer", false, false);

        let removed = raid.remove_role("tank").unwrap();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].user_id, 1);
        assert!(raid.role("Tank").is_none());
        assert_eq!(raid.participants().len(), 1);
    }

    #[test]
    fn cannot_remove_last_role() {
        let mut pending = PendingRaid::new(1, 2);
        pending.add_role(RaidRole::new(5, "Participants"));
        let mut raid = pending.into_raid(1, 1);

        assert!(raid.remove_role("Participants").is_none());
        assert!(raid.remove_role("Missing").is_none());
    }

    #[test]
    fn duplicate_role_names_are_rejected() {
        let mut raid = raid();
        assert!(!raid.add_role(RaidRole::new(3, "TANK")));
        assert!(raid.add_role(RaidRole::new(3, "DPS")));
    }

    #[test]
    fn permission_requires_shared_group() {
        let mut raid = raid();
        assert!(raid.is_user_permitted(&BTreeSet::new()));

        raid.permitted_groups.insert("Static".to_string());
        assert!(!raid.is_user_permitted(&BTreeSet::new()));
        assert!(raid.is_user_permitted(&BTreeSet::from(["Static".to_string()])));
    }
}
