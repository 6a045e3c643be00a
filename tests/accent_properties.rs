use german_accent::{
    AccentGetEvent, EventBus, GermanAccentComponent, GermanAccentSystem, World, accentuate,
};
use proptest::prelude::*;

// No vowels, no 'w', no 't'/'h', no 'z'/'v': nothing can match any pass.
const INERT: &str = "[bcdfgjklmnpqrsxBCDFGJKLMNPQRSX0-9 .,!?'_-]{0,64}";

proptest! {
    #[test]
    fn inert_text_is_unchanged(s in INERT) {
        prop_assert_eq!(accentuate(&s), s);
    }

    #[test]
    fn any_text_is_accepted(s in "\\PC{0,64}") {
        let _ = accentuate(&s);
    }

    #[test]
    fn no_w_survives_without_vocabulary(s in "[a-zA-Z ]{0,48}") {
        // Only "wissenschaftler" and "auf wiedersehen" bring a 'w' back.
        let lower = s.to_lowercase();
        prop_assume!(!lower.contains("scientist") && !lower.contains("goodbye"));
        let out = accentuate(&s);
        prop_assert!(!out.contains(['w', 'W']), "{out}");
    }

    #[test]
    fn leading_shift_is_uppercase(s in "[wW][a-z ]{0,32}") {
        let out = accentuate(&s);
        prop_assert!(out.starts_with('V'), "{out}");
    }
}

#[test]
fn documented_examples() {
    assert_eq!(accentuate("that is a theory"), "that ist a zeory");
    assert_eq!(accentuate("we are friends"), "Ve are friends");
    assert_eq!(accentuate("Thank you for the cheese"), "Zank you for ze käse");
    assert_eq!(accentuate("call the security officer"), "call ze polizei officer");
}

#[test]
fn hook_overwrites_message_for_accented_speaker() {
    let mut world = World::new();
    let mut bus = EventBus::new();
    GermanAccentSystem::initialize(&mut bus);

    let captain = world.spawn();
    world.insert(captain, GermanAccentComponent);

    let mut event = AccentGetEvent::new("Yes, captain, the cargo is here");
    bus.raise_local(&world, captain, &mut event);
    assert_eq!(event.message, "Ja, kapitän, ze fracht ist here");
}
