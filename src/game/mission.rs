//! Mission catalog, binding and evaluation.
//!
//! A mission is shown to its player as text and checked against the map as a
//! [`MissionKind`]. The kind is derived from the bound text exactly once, at
//! bind time, so the displayed sentence and the checked predicate cannot
//! drift apart.

use serde::Serialize;

use crate::game::{RandomSource, Registry};

/// Placeholder replaced by the player's color when a template is bound.
pub const COLOR_PLACEHOLDER: &str = "{color}";

/// Territories a player must hold for the "control at least" mission.
pub const TERRITORY_GOAL: usize = 3;

/// Troops a player must accumulate for the troop mission.
pub const TROOP_GOAL: u64 = 20;

// Trigger phrases, matched ASCII-case-insensitively in this order.
const CONTROL_AT_LEAST: &str = "control at least 3 territories";
const ACCUMULATE_TROOPS: &str = "accumulate at least 20 troops";
const CONSECUTIVE: &str = "control 2 consecutive territories";
const ELIMINATE: &str = "eliminate color ";
const CONTROL_ALL: &str = "control all territories";

static STANDARD_TEMPLATES: [MissionTemplate; 5] = [
    MissionTemplate::new("Control at least 3 territories with your color ({color})."),
    MissionTemplate::new(
        "Accumulate at least 20 troops across territories of your color ({color}).",
    ),
    MissionTemplate::new("Control 2 consecutive territories with your color ({color})."),
    MissionTemplate::new("Eliminate color Red from the map."),
    MissionTemplate::new("Control all territories with your color ({color})."),
];

/// A mission description with an optional color placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionTemplate {
    text: &'static str,
}

impl MissionTemplate {
    /// Create a template from its text.
    #[must_use]
    pub const fn new(text: &'static str) -> Self {
        Self { text }
    }

    /// Template text, placeholder included.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        self.text
    }

    /// Whether binding substitutes the player's color.
    #[must_use]
    pub fn is_color_parametric(&self) -> bool {
        self.text.contains(COLOR_PLACEHOLDER)
    }
}

/// Fixed, ordered list of mission templates.
#[derive(Debug, Clone, Copy)]
pub struct MissionCatalog {
    templates: &'static [MissionTemplate],
}

impl MissionCatalog {
    /// The catalog used by regular sessions.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            templates: &STANDARD_TEMPLATES,
        }
    }

    /// Build a catalog from custom templates.
    ///
    /// Returns `None` for an empty list, since a mission must always be drawable.
    #[must_use]
    pub const fn new(templates: &'static [MissionTemplate]) -> Option<Self> {
        if templates.is_empty() {
            None
        } else {
            Some(Self { templates })
        }
    }

    /// All templates in catalog order.
    #[must_use]
    pub const fn templates(&self) -> &'static [MissionTemplate] {
        self.templates
    }

    /// Number of templates.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always `false`; catalogs are non-empty by construction.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Get a template by catalog index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'static MissionTemplate> {
        self.templates.get(index)
    }

    /// Draw a template from `dice`, along with its catalog index.
    pub fn draw<R: RandomSource + ?Sized>(
        &self,
        dice: &mut R,
    ) -> (usize, &'static MissionTemplate) {
        let templates = self.templates;
        let index = dice.pick_index(templates.len()) % templates.len();
        (index, &templates[index])
    }

    /// Draw a template from `dice`.
    pub fn pick_random<R: RandomSource + ?Sized>(&self, dice: &mut R) -> &'static MissionTemplate {
        self.draw(dice).1
    }
}

impl Default for MissionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// The condition a mission checks, derived from its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissionKind {
    /// Hold at least `count` territories.
    ControlAtLeast {
        /// Color that must hold them.
        color: String,
        /// Territories required.
        count: usize,
    },
    /// Hold at least `min` troops in total.
    TroopSum {
        /// Color whose troops are summed.
        color: String,
        /// Troops required.
        min: u64,
    },
    /// Hold two territories that are next to each other in map order.
    AdjacentPair {
        /// Color that must hold both.
        color: String,
    },
    /// Leave no territory held by `color`.
    EliminateColor {
        /// Color to wipe out.
        color: String,
    },
    /// Hold every territory.
    ControlAll {
        /// Color that must hold them.
        color: String,
    },
    /// Text that matches no known mission; never satisfied.
    Unknown,
}

impl MissionKind {
    /// Derive the mission condition from its text.
    ///
    /// Trigger phrases are checked in a fixed order and the first one found
    /// wins. Color-relative missions take their color from the first
    /// parenthesized group; a missing or empty group yields [`MissionKind::Unknown`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        // ASCII lowering keeps byte offsets aligned with `text`.
        let lower = text.to_ascii_lowercase();

        if lower.contains(CONTROL_AT_LEAST) {
            return extract_color(text).map_or(Self::Unknown, |color| Self::ControlAtLeast {
                color,
                count: TERRITORY_GOAL,
            });
        }
        if lower.contains(ACCUMULATE_TROOPS) {
            return extract_color(text).map_or(Self::Unknown, |color| Self::TroopSum {
                color,
                min: TROOP_GOAL,
            });
        }
        if lower.contains(CONSECUTIVE) {
            return extract_color(text).map_or(Self::Unknown, |color| Self::AdjacentPair { color });
        }
        if let Some(pos) = lower.find(ELIMINATE) {
            let literal = text[pos + ELIMINATE.len()..]
                .split(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '!' | '('))
                .next()
                .unwrap_or_default();
            if literal.is_empty() {
                return Self::Unknown;
            }
            return Self::EliminateColor {
                color: literal.to_string(),
            };
        }
        if lower.contains(CONTROL_ALL) {
            return extract_color(text).map_or(Self::Unknown, |color| Self::ControlAll { color });
        }
        Self::Unknown
    }

    /// Check the condition against the current map.
    #[must_use]
    pub fn is_satisfied(&self, registry: &Registry) -> bool {
        match self {
            Self::ControlAtLeast { color, count } => registry.count_with_color(color) >= *count,
            Self::TroopSum { color, min } => registry.troops_with_color(color) >= *min,
            Self::AdjacentPair { color } => registry.has_adjacent_pair(color),
            Self::EliminateColor { color } => !registry.any_has_color(color),
            Self::ControlAll { color } => registry.all_have_color(color),
            Self::Unknown => false,
        }
    }

    /// The color this mission is about, if any.
    #[must_use]
    pub fn target_color(&self) -> Option<&str> {
        match self {
            Self::ControlAtLeast { color, .. }
            | Self::TroopSum { color, .. }
            | Self::AdjacentPair { color }
            | Self::EliminateColor { color }
            | Self::ControlAll { color } => Some(color),
            Self::Unknown => None,
        }
    }
}

/// Text between the first `(` and the first `)` after it.
fn extract_color(text: &str) -> Option<String> {
    let open = text.find('(')?;
    let rest = &text[open + 1..];
    let close = rest.find(')')?;
    if close == 0 {
        return None;
    }
    Some(rest[..close].to_string())
}

/// A mission bound to one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundMission {
    text: String,
    kind: MissionKind,
}

impl BoundMission {
    /// Bind free-form mission text, deriving its condition from the text.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let kind = MissionKind::parse(&text);
        Self { text, kind }
    }

    /// Text shown to the player.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The condition checked by [`evaluate`].
    #[must_use]
    pub const fn kind(&self) -> &MissionKind {
        &self.kind
    }
}

/// Bind `template` to a player's color.
///
/// Templates without a placeholder bind verbatim.
#[must_use]
pub fn bind(template: &MissionTemplate, player_color: &str) -> BoundMission {
    BoundMission::from_text(template.text().replace(COLOR_PLACEHOLDER, player_color))
}

/// Whether `mission` currently holds on `registry`.
#[must_use]
pub fn evaluate(mission: &BoundMission, registry: &Registry) -> bool {
    mission.kind.is_satisfied(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{LoadedDice, Territory};

    fn map(colors: &[(&str, u32)]) -> Registry {
        Registry::from_territories(
            colors
                .iter()
                .enumerate()
                .map(|(i, (color, troops))| Territory::new(format!("T{i}"), *color, *troops))
                .collect(),
        )
    }

    #[test]
    fn test_bind_substitutes_color() {
        let template = MissionCatalog::standard().get(0).unwrap();
        let mission = bind(template, "Green");
        assert_eq!(
            mission.text(),
            "Control at least 3 territories with your color (Green)."
        );
        assert_eq!(
            *mission.kind(),
            MissionKind::ControlAtLeast {
                color: "Green".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn test_bind_without_placeholder_is_verbatim() {
        let template = MissionCatalog::standard().get(3).unwrap();
        assert!(!template.is_color_parametric());
        let mission = bind(template, "Green");
        assert_eq!(mission.text(), template.text());
        assert_eq!(
            *mission.kind(),
            MissionKind::EliminateColor {
                color: "Red".to_string()
            }
        );
    }

    #[test]
    fn test_control_at_least_three() {
        let mission =
            BoundMission::from_text("Control at least 3 territories with your color (Green).");
        let three = map(&[("Green", 1), ("Blue", 1), ("Green", 1), ("Red", 1), ("Green", 1)]);
        let two = map(&[("Green", 1), ("Blue", 1), ("Green", 1), ("Red", 1), ("Blue", 1)]);
        assert!(evaluate(&mission, &three));
        assert!(!evaluate(&mission, &two));
    }

    #[test]
    fn test_troop_sum() {
        let mission = bind(MissionCatalog::standard().get(1).unwrap(), "Blue");
        assert!(evaluate(&mission, &map(&[("Blue", 15), ("Red", 40), ("Blue", 5)])));
        assert!(!evaluate(&mission, &map(&[("Blue", 15), ("Red", 40), ("Blue", 4)])));
    }

    #[test]
    fn test_adjacent_pair_uses_registry_order() {
        let mission = bind(MissionCatalog::standard().get(2).unwrap(), "Blue");
        assert!(evaluate(&mission, &map(&[("Red", 1), ("Blue", 1), ("Blue", 1)])));
        assert!(!evaluate(&mission, &map(&[("Blue", 1), ("Red", 1), ("Blue", 1)])));
    }

    #[test]
    fn test_eliminate_fixed_literal() {
        let mission = bind(MissionCatalog::standard().get(3).unwrap(), "Blue");
        assert!(!evaluate(&mission, &map(&[("Red", 1), ("Blue", 1)])));
        assert!(evaluate(&mission, &map(&[("Green", 1), ("Blue", 1)])));
    }

    #[test]
    fn test_control_all() {
        let mission = bind(MissionCatalog::standard().get(4).unwrap(), "Red");
        assert!(evaluate(&mission, &map(&[("Red", 1), ("Red", 0)])));
        assert!(!evaluate(&mission, &map(&[("Red", 1), ("Blue", 0)])));
    }

    #[test]
    fn test_unknown_mission_never_succeeds() {
        let mission = BoundMission::from_text("Win the game (Red).");
        assert_eq!(*mission.kind(), MissionKind::Unknown);
        assert!(!evaluate(&mission, &map(&[("Red", 50)])));
    }

    #[test]
    fn test_missing_or_empty_color_never_succeeds() {
        let empty = BoundMission::from_text("Control all territories with your color ().");
        let missing = BoundMission::from_text("Control all territories with your color Red.");
        let registry = map(&[("", 1)]);
        assert_eq!(*empty.kind(), MissionKind::Unknown);
        assert_eq!(*missing.kind(), MissionKind::Unknown);
        assert!(!evaluate(&empty, &registry));
        assert!(!evaluate(&missing, &registry));
    }

    #[test]
    fn test_first_trigger_wins() {
        let mission = BoundMission::from_text(
            "Control all territories or control at least 3 territories (Red).",
        );
        assert_eq!(
            *mission.kind(),
            MissionKind::ControlAtLeast {
                color: "Red".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn test_color_with_closing_paren_is_cut() {
        // The first ")" closes the group, so this player's color is read as "Re".
        let mission = bind(MissionCatalog::standard().get(4).unwrap(), "Re)d");
        assert_eq!(
            *mission.kind(),
            MissionKind::ControlAll {
                color: "Re".to_string()
            }
        );
    }

    #[test]
    fn test_triggers_ignore_case() {
        let mission = BoundMission::from_text("CONTROL 2 CONSECUTIVE TERRITORIES (Azul)");
        assert_eq!(mission.kind().target_color(), Some("Azul"));
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let mission = bind(MissionCatalog::standard().get(0).unwrap(), "Green");
        let registry = map(&[("Green", 1), ("Green", 1), ("Green", 1)]);
        let first = evaluate(&mission, &registry);
        assert_eq!(first, evaluate(&mission, &registry));
    }

    #[test]
    fn test_pick_random_uses_dice() {
        let catalog = MissionCatalog::standard();
        let mut dice = LoadedDice::new([2, 9]);
        assert_eq!(catalog.pick_random(&mut dice), catalog.get(2).unwrap());
        assert_eq!(catalog.pick_random(&mut dice), catalog.get(4).unwrap());
        assert_eq!(dice.draws(), 2);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        static NONE: [MissionTemplate; 0] = [];
        assert!(MissionCatalog::new(&NONE).is_none());
        assert_eq!(MissionCatalog::standard().len(), 5);
    }
}
