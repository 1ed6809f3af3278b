//! Static class and reaction catalog.
//!
//! The catalog knows the nine core classes with their elite specializations and the
//! named reaction symbols attached to published events. Emoji ids come from configuration
//! and are checked against the emojis the platform actually knows about, so a missing
//! or stale id degrades to [`ReactionSymbol::Unresolved`] instead of failing.

use std::collections::{HashMap, HashSet};

/// Core classes, each followed by its specializations. The core class itself is the
/// first specialization entry.
const CLASSES: [(&str, [&str; 5]); 9] = [
    (
        "Guardian",
        ["Guardian", "Dragonhunter", "Firebrand", "Willbender", "Luminary"],
    ),
    (
        "Warrior",
        ["Warrior", "Berserker", "Spellbreaker", "Bladesworn", "Paragon"],
    ),
    (
        "Engineer",
        ["Engineer", "Scrapper", "Holosmith", "Mechanist", "Amalgam"],
    ),
    (
        "Ranger",
        ["Ranger", "Druid", "Soulbeast", "Untamed", "Galeshot"],
    ),
    (
        "Thief",
        ["Thief", "Daredevil", "Deadeye", "Specter", "Antiquary"],
    ),
    (
        "Elementalist",
        ["Elementalist", "Tempest", "Weaver", "Catalyst", "Evoker"],
    ),
    (
        "Mesmer",
        ["Mesmer", "Chronomancer", "Mirage", "Virtuoso", "Troubadour"],
    ),
    (
        "Necromancer",
        ["Necromancer", "Reaper", "Scourge", "Harbinger", "Ritualist"],
    ),
    (
        "Revenant",
        ["Revenant", "Herald", "Renegade", "Vindicator", "Conduit"],
    ),
];

pub const FLEX: &str = "Flex";
pub const SWAP: &str = "Swap";
pub const CANCEL: &str = "Cancel";
pub const EDIT: &str = "Edit";
pub const CHECK: &str = "Check";

const ACTIONS: [&str; 5] = [FLEX, SWAP, CANCEL, EDIT, CHECK];

/// A reaction symbol attached to event messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReactionSymbol {
    /// Custom emoji registered with the platform.
    Custom { id: u64, name: String },
    /// No usable emoji is known for this name.
    Unresolved(String),
}

impl ReactionSymbol {
    pub fn name(&self) -> &str {
        match self {
            ReactionSymbol::Custom { name, .. } => name,
            ReactionSymbol::Unresolved(name) => name,
        }
    }
}

/// Lookup of reaction symbols by name and by emoji id.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    symbols: HashMap<String, ReactionSymbol>,
    by_emoji: HashMap<u64, String>,
}

impl RoleCatalog {
    /// Builds the catalog from configured emoji ids.
    ///
    /// # Arguments
    /// - `emote_ids` - Configured emoji id per reaction name (class or action)
    /// - `registered` - Emoji ids known to the platform, or `None` when they could not
    ///   be listed, in which case configured ids are trusted as-is
    pub fn new(emote_ids: &HashMap<String, u64>, registered: Option<&HashSet<u64>>) -> Self {
        let mut symbols = HashMap::new();
        let mut by_emoji = HashMap::new();

        for name in Self::reaction_names() {
            let symbol = match emote_ids.get(name) {
                Some(id) if registered.is_none_or(|known| known.contains(id)) => {
                    by_emoji.insert(*id, name.to_string());
                    ReactionSymbol::Custom {
                        id: *id,
                        name: name.to_string(),
                    }
                }
                Some(id) => {
                    tracing::warn!("Emoji {} for '{}' is not registered", id, name);
                    ReactionSymbol::Unresolved(name.to_string())
                }
                None => {
                    tracing::warn!("No emoji configured for '{}'", name);
                    ReactionSymbol::Unresolved(name.to_string())
                }
            };
            symbols.insert(name.to_lowercase(), symbol);
        }

        Self { symbols, by_emoji }
    }

    /// Every name the catalog can hold a symbol for, classes first.
    pub fn reaction_names() -> impl Iterator<Item = &'static str> {
        CLASSES
            .iter()
            .map(|(class, _)| *class)
            .chain(ACTIONS.iter().copied())
    }

    pub fn class_names() -> impl Iterator<Item = &'static str> {
        CLASSES.iter().map(|(class, _)| *class)
    }

    /// Returns the specializations of a core class, or an empty slice for unknown names.
    pub fn specializations_for(class: &str) -> &'static [&'static str] {
        CLASSES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(class))
            .map(|(_, specs)| specs.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the canonical class name for a case-insensitive match.
    pub fn class_name(name: &str) -> Option<&'static str> {
        Self::class_names().find(|class| class.eq_ignore_ascii_case(name))
    }

    pub fn reaction_for(&self, name: &str) -> ReactionSymbol {
        self.symbols
            .get(&name.to_lowercase())
            .cloned()
            .unwrap_or_else(|| ReactionSymbol::Unresolved(name.to_string()))
    }

    pub fn name_for_emoji(&self, emoji_id: u64) -> Option<&str> {
        self.by_emoji.get(&emoji_id).map(String::as_str)
    }

    /// Reactions attached to regular events, in attachment order.
    pub fn core_class_reactions(&self) -> Vec<ReactionSymbol> {
        Self::class_names()
            .chain([FLEX, SWAP, CANCEL, EDIT])
            .map(|name| self.reaction_for(name))
            .collect()
    }

    /// Reactions attached to open world events, in attachment order.
    pub fn open_world_reactions(&self) -> Vec<ReactionSymbol> {
        [CHECK, CANCEL, EDIT]
            .into_iter()
            .map(|name| self.reaction_for(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> HashMap<String, u64> {
        RoleCatalog::reaction_names()
            .enumerate()
            .map(|(i, name)| (name.to_string(), 1000 + i as u64))
            .collect()
    }

    #[test]
    fn unknown_class_has_no_specializations() {
        assert!(RoleCatalog::specializations_for("Bard").is_empty());
        assert_eq!(RoleCatalog::specializations_for("guardian")[1], "Dragonhunter");
    }

    #[test]
    fn core_reactions_follow_declared_order() {
        let catalog = RoleCatalog::new(&configured(), None);

        let names: Vec<_> = catalog
            .core_class_reactions()
            .iter()
            .map(|s| s.name().to_string())
            .collect();

        assert_eq!(names.len(), 13);
        assert_eq!(names[0], "Guardian");
        assert_eq!(&names[9..], &["Flex", "Swap", "Cancel", "Edit"]);
    }

    /// Tests that configured emoji ids the platform does not know are not used.
    ///
    /// Expected: the unregistered name resolves to `Unresolved`, others to `Custom`
    #[test]
    fn unregistered_emoji_is_unresolved() {
        let ids = configured();
        let mut registered: HashSet<u64> = ids.values().copied().collect();
        registered.remove(&ids["Check"]);

        let catalog = RoleCatalog::new(&ids, Some(&registered));

        assert_eq!(
            catalog.reaction_for("Check"),
            ReactionSymbol::Unresolved("Check".to_string())
        );
        assert!(matches!(
            catalog.reaction_for("edit"),
            ReactionSymbol::Custom { .. }
        ));
        assert_eq!(catalog.name_for_emoji(ids["Edit"]), Some("Edit"));
        assert_eq!(catalog.name_for_emoji(ids["Check"]), None);
    }

    #[test]
    fn missing_configuration_never_fails() {
        let catalog = RoleCatalog::new(&HashMap::new(), None);

        assert_eq!(
            catalog.reaction_for("Nope"),
            ReactionSymbol::Unresolved("Nope".to_string())
        );
        assert_eq!(catalog.open_world_reactions().len(), 3);
    }
}
