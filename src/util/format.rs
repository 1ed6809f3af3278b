//! Text encodings used for stored columns and typed user input.
//!
//! Roles are encoded as `amount:name` entries joined by `;`. A `!` in front of the name
//! marks a flex-only role. Name lists (permitted groups, Discord role names) are joined
//! by `,`.

use crate::model::raid::RaidRole;

/// Marks a flex-only role in the role encoding.
pub const FLEX_ONLY_PREFIX: char = '!';

/// Separates entries of a stored role list.
pub const ROLE_SEPARATOR: char = ';';

/// Separates entries of a stored name list.
pub const NAME_SEPARATOR: char = ',';

/// Parses one `amount:name` entry.
///
/// Returns `None` when the amount is not a positive integer, the name is empty, or the
/// name contains the role list separator.
pub fn parse_role_entry(entry: &str) -> Option<RaidRole> {
    let (amount, name) = entry.trim().split_once(':')?;
    let amount = amount.trim().parse::<u32>().ok().filter(|amount| *amount > 0)?;
    let name = name.trim();

    let (name, flex_only) = match name.strip_prefix(FLEX_ONLY_PREFIX) {
        Some(stripped) => (stripped.trim(), true),
        None => (name, false),
    };

    if name.is_empty() || name.contains(ROLE_SEPARATOR) {
        return None;
    }

    Some(RaidRole {
        name: name.to_string(),
        amount,
        flex_only,
    })
}

/// Parses a stored role list, skipping and logging invalid entries.
pub fn parse_roles(text: &str) -> Vec<RaidRole> {
    text.split(ROLE_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .filter_map(|entry| {
            let role = parse_role_entry(entry);
            if role.is_none() {
                tracing::warn!("Skipping invalid role entry '{}'", entry);
            }
            role
        })
        .collect()
}

/// Parses a role list where every entry must be valid.
///
/// Used for typed input, where a single bad entry should reject the whole line.
pub fn parse_roles_strict(text: &str) -> Option<Vec<RaidRole>> {
    let roles = text
        .split(ROLE_SEPARATOR)
        .filter(|entry| !entry.trim().is_empty())
        .map(parse_role_entry)
        .collect::<Option<Vec<_>>>()?;

    if roles.is_empty() {
        None
    } else {
        Some(roles)
    }
}

pub fn format_role(role: &RaidRole) -> String {
    if role.flex_only {
        format!("{}:{}{}", role.amount, FLEX_ONLY_PREFIX, role.name)
    } else {
        format!("{}:{}", role.amount, role.name)
    }
}

pub fn format_roles(roles: &[RaidRole]) -> String {
    roles
        .iter()
        .map(format_role)
        .collect::<Vec<_>>()
        .join(&ROLE_SEPARATOR.to_string())
}

/// Splits a comma separated list, trimming entries and dropping empty ones.
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.split(NAME_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_name_list<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    names
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(&NAME_SEPARATOR.to_string())
}
