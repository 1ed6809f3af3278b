//! Fractal events.
//!
//! Fractal events are five-player events posted in a guild's fractal channel. They use a
//! fixed team composition instead of a typed role list and are always shown in the short
//! layout.

use crate::model::raid::{PendingRaid, RaidRole};

/// A preset role list for a five-player group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamComposition {
    pub name: &'static str,
    roles: &'static [(u32, &'static str)],
}

impl TeamComposition {
    pub fn roles(&self) -> Vec<RaidRole> {
        self.roles
            .iter()
            .map(|(amount, name)| RaidRole::new(*amount, *name))
            .collect()
    }
}

pub const TEAM_COMPOSITIONS: [TeamComposition; 3] = [
    TeamComposition {
        name: "Healer",
        roles: &[(1, "Heal Alacrity"), (1, "Quickness DPS"), (3, "DPS")],
    },
    TeamComposition {
        name: "Boon DPS",
        roles: &[(1, "Alacrity DPS"), (1, "Quickness DPS"), (3, "DPS")],
    },
    TeamComposition {
        name: "Open",
        roles: &[(5, "Player")],
    },
];

/// Looks up a composition by its one-based number as shown to users.
pub fn composition(number: usize) -> Option<&'static TeamComposition> {
    number.checked_sub(1).and_then(|index| TEAM_COMPOSITIONS.get(index))
}

/// Numbered list of the compositions for help and usage texts.
pub fn composition_list() -> String {
    TEAM_COMPOSITIONS
        .iter()
        .enumerate()
        .map(|(index, comp)| {
            let roles = comp
                .roles
                .iter()
                .map(|(amount, name)| format!("{}x {}", amount, name))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}. {} ({})", index + 1, comp.name, roles)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the pending event for a fractal run.
pub fn pending_fractal(
    guild_id: u64,
    leader_id: u64,
    name: &str,
    date: &str,
    time: &str,
    composition: &TeamComposition,
    channel: &str,
) -> PendingRaid {
    let mut pending = PendingRaid::new(guild_id, leader_id);
    pending.name = name.to_string();
    pending.date = date.to_string();
    pending.time = time.to_string();
    pending.channel = channel.to_string();
    pending.is_display_short = true;
    pending.is_special_category = true;
    for role in composition.roles() {
        pending.add_role(role);
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compositions_are_numbered_from_one() {
        assert_eq!(composition(1).map(|c| c.name), Some("Healer"));
        assert_eq!(composition(3).map(|c| c.name), Some("Open"));
        assert!(composition(0).is_none());
        assert!(composition(4).is_none());
    }

    /// Tests that every composition fills a five-player group.
    ///
    /// Expected: capacity 5 for each composition
    #[test]
    fn compositions_fill_five_slots() {
        for comp in &TEAM_COMPOSITIONS {
            let total: u32 = comp.roles().iter().map(|role| role.amount).sum();
            assert_eq!(total, 5, "{}", comp.name);
        }
    }

    #[test]
    fn fractal_is_short_and_special() {
        let pending = pending_fractal(
            1,
            2,
            "T4 Dailies",
            "Saturday, 29.02.2020",
            "20:00",
            composition(2).unwrap(),
            "fractals",
        );

        assert!(pending.is_display_short);
        assert!(pending.is_special_category);
        assert_eq!(pending.channel, "fractals");
        assert_eq!(pending.roles().len(), 3);
    }
}
