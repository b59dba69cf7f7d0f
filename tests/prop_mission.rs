//! Property-based tests for mission parsing and evaluation.
//!
//! Run with: cargo test --release prop_mission

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;

use war::game::{COLOR_PLACEHOLDER, TERRITORY_GOAL, TROOP_GOAL};
use war::{BoundMission, MissionCatalog, MissionKind, Registry, Territory, bind, evaluate};

const COLORS: [&str; 4] = ["Red", "Blue", "Green", "Yellow"];

fn arb_registry() -> impl Strategy<Value = Registry> {
    prop::collection::vec((0usize..COLORS.len(), 0u32..15), 1..8).prop_map(|cells| {
        Registry::from_territories(
            cells
                .into_iter()
                .enumerate()
                .map(|(i, (color, troops))| Territory::new(format!("T{i}"), COLORS[color], troops))
                .collect(),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    /// Parsing arbitrary text never panics.
    #[test]
    fn prop_parse_never_panics(text in any::<String>()) {
        let kind = MissionKind::parse(&text);
        if kind == MissionKind::Unknown {
            prop_assert!(kind.target_color().is_none());
        }
    }

    /// Binding a catalog template yields a mission about the player's color.
    #[test]
    fn prop_bound_color_missions_target_player(
        index in 0usize..5,
        color in "[A-Za-z][A-Za-z-]{0,8}",
    ) {
        let catalog = MissionCatalog::standard();
        let template = catalog.get(index).unwrap();
        let mission = bind(template, &color);

        let has_placeholder = mission.text().contains(COLOR_PLACEHOLDER);
        prop_assert!(!has_placeholder);
        prop_assert_ne!(mission.kind(), &MissionKind::Unknown);
        if template.is_color_parametric() {
            let wrapped = format!("({color})");
            let has_wrapped = mission.text().contains(&wrapped);
            prop_assert!(has_wrapped);
            prop_assert_eq!(mission.kind().target_color(), Some(color.as_str()));
        } else {
            prop_assert_eq!(mission.text(), template.text());
        }
    }

    /// Every standard mission agrees with a direct count over the map.
    #[test]
    fn prop_evaluation_matches_map(
        registry in arb_registry(),
        color_index in 0usize..COLORS.len(),
    ) {
        let color = COLORS[color_index];
        let catalog = MissionCatalog::standard();
        let held: Vec<&Territory> = registry.iter().filter(|t| t.color == color).collect();
        let troops: u64 = held.iter().map(|t| u64::from(t.troops)).sum();
        let adjacent = registry
            .territories()
            .windows(2)
            .any(|w| w[0].color == color && w[1].color == color);

        let expected = [
            held.len() >= TERRITORY_GOAL,
            troops >= TROOP_GOAL,
            adjacent,
            registry.iter().all(|t| t.color != "Red"),
            held.len() == registry.len(),
        ];
        for (index, want) in expected.into_iter().enumerate() {
            let mission = bind(catalog.get(index).unwrap(), color);
            prop_assert_eq!(evaluate(&mission, &registry), want, "mission {}", index);
        }
    }

    /// Text that names no known mission is never satisfied.
    #[test]
    fn prop_unknown_never_satisfied(registry in arb_registry(), text in "[0-9 ]{0,20}") {
        let mission = BoundMission::from_text(text);
        prop_assert!(!evaluate(&mission, &registry));
    }
}
