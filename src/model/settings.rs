//! Per-guild server settings: role groups and role templates.

use crate::{
    error::AppError,
    model::raid::RaidRole,
    util::{
        format::{parse_name_list, parse_roles},
        parse::parse_u64_from_string,
    },
};

/// A named set of Discord role names used to restrict event sign-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGroup {
    pub guild_id: u64,
    pub name: String,
    /// Discord role names belonging to the group.
    pub roles: Vec<String>,
}

impl RoleGroup {
    pub fn from_entity(entity: entity::role_group::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            name: entity.name,
            roles: parse_name_list(&entity.roles),
        })
    }

    /// Whether any of the member's Discord roles belongs to this group.
    pub fn matches(&self, member_roles: &[String]) -> bool {
        self.roles.iter().any(|role| {
            member_roles
                .iter()
                .any(|member_role| member_role.eq_ignore_ascii_case(role))
        })
    }
}

/// A reusable role list offered while creating events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleTemplate {
    pub guild_id: u64,
    pub name: String,
    pub roles: Vec<RaidRole>,
}

impl RoleTemplate {
    pub fn from_entity(entity: entity::role_template::Model) -> Result<Self, AppError> {
        Ok(Self {
            guild_id: parse_u64_from_string(entity.guild_id)?,
            name: entity.name,
            roles: parse_roles(&entity.roles),
        })
    }
}
