#![no_main]

use libfuzzer_sys::fuzz_target;
use war::{evaluate, BoundMission, MissionKind, Registry, Territory};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mission = BoundMission::from_text(text);
    assert_eq!(mission.kind(), &MissionKind::parse(text));

    // Any parsed color must occur verbatim in the text.
    if let Some(color) = mission.kind().target_color() {
        assert!(!color.is_empty());
        assert!(text.contains(color));
    }

    let registry = Registry::from_territories(vec![
        Territory::new("North", "Red", 3),
        Territory::new("South", "Blue", 0),
    ]);
    if mission.kind() == &MissionKind::Unknown {
        assert!(!evaluate(&mission, &registry));
    }
});
