use crate::config::Config;
use crate::events::{
    AccentGetEvent, EntityId, EventBus, GermanAccentComponent, GermanAccentSystem, World,
};
use log::debug;
use std::sync::Arc;

/// Long-running speaker session: one accented speaker, one plain speaker.
pub struct Daemon {
    world: World,
    bus: EventBus,
    speaker: EntityId,
    bystander: EntityId,
    accentuated: u64,
}

impl Daemon {
    pub fn new(config: &Config) -> Self {
        let mut world = World::new();
        let mut bus = EventBus::new();
        GermanAccentSystem::initialize_with(&mut bus, Arc::new(config.replacement_table()));

        let speaker = world.spawn();
        world.insert(speaker, GermanAccentComponent);
        let bystander = world.spawn();

        Self {
            world,
            bus,
            speaker,
            bystander,
            accentuated: 0,
        }
    }

    pub fn status(&self) -> String {
        format!("ready {}", self.accentuated)
    }

    pub fn say(&mut self, text: &str) -> String {
        self.accentuated += 1;
        self.render(self.speaker, text)
    }

    pub fn echo(&self, text: &str) -> String {
        self.render(self.bystander, text)
    }

    fn render(&self, entity: EntityId, text: &str) -> String {
        let mut event = AccentGetEvent::new(text);
        self.bus.raise_local(&self.world, entity, &mut event);
        debug!("rendered: {}", event.message);
        event.message
    }
}
