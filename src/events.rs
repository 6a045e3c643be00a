//! Minimal entity/component/event model used to hook the accent into message rendering.
//!
//! Handlers subscribe for a (component, event) pair and run synchronously, in
//! registration order, only for entities that carry the component.

use crate::accent::{ReplacementTable, accentuate};
use log::debug;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(u64);

pub trait Component: Any + Send + Sync {}

#[derive(Default)]
pub struct World {
    next_id: u64,
    components: HashMap<(EntityId, TypeId), Box<dyn Any + Send + Sync>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert<C: Component>(&mut self, entity: EntityId, component: C) {
        self.components
            .insert((entity, TypeId::of::<C>()), Box::new(component));
    }

    pub fn get<C: Component>(&self, entity: EntityId) -> Option<&C> {
        self.components
            .get(&(entity, TypeId::of::<C>()))
            .and_then(|c| c.downcast_ref::<C>())
    }

    pub fn has<C: Component>(&self, entity: EntityId) -> bool {
        self.get::<C>(entity).is_some()
    }

    pub fn remove<C: Component>(&mut self, entity: EntityId) -> Option<C> {
        self.components
            .remove(&(entity, TypeId::of::<C>()))
            .and_then(|c| c.downcast::<C>().ok())
            .map(|c| *c)
    }
}

type Handler = Box<dyn Fn(&World, EntityId, &mut dyn Any) + Send + Sync>;

#[derive(Default)]
pub struct EventBus {
    handlers: HashMap<TypeId, Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of type `E` raised on entities that carry `C`.
    pub fn subscribe_local<C, E, F>(&mut self, handler: F)
    where
        C: Component,
        E: 'static,
        F: Fn(EntityId, &C, &mut E) + Send + Sync + 'static,
    {
        let handler: Handler = Box::new(
            move |world: &World, entity: EntityId, event: &mut dyn Any| {
                let (Some(component), Some(event)) =
                    (world.get::<C>(entity), event.downcast_mut::<E>())
                else {
                    return;
                };
                handler(entity, component, event);
            },
        );
        self.handlers
            .entry(TypeId::of::<E>())
            .or_default()
            .push(handler);
    }

    /// Run every handler for `E` against `entity`. Returns once all of them have run.
    pub fn raise_local<E: 'static>(&self, world: &World, entity: EntityId, event: &mut E) {
        if let Some(handlers) = self.handlers.get(&TypeId::of::<E>()) {
            for handler in handlers {
                handler(world, entity, &mut *event);
            }
        }
    }
}

/// Raised right before a spoken message is displayed. Handlers rewrite `message` in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentGetEvent {
    pub message: String,
}

impl AccentGetEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Marks a speaker whose messages get the German accent.
#[derive(Debug, Clone, Copy, Default)]
pub struct GermanAccentComponent;

impl Component for GermanAccentComponent {}

pub struct GermanAccentSystem;

impl GermanAccentSystem {
    /// Subscribe the accent to [`AccentGetEvent`] using the built-in table.
    pub fn initialize(bus: &mut EventBus) {
        bus.subscribe_local::<GermanAccentComponent, AccentGetEvent, _>(on_accent_get);
    }

    /// Same as [`initialize`](Self::initialize) but with a caller-supplied table.
    pub fn initialize_with(bus: &mut EventBus, table: Arc<ReplacementTable>) {
        bus.subscribe_local::<GermanAccentComponent, AccentGetEvent, _>(
            move |entity, _component, event| {
                debug!("raw: {} ({entity:?})", event.message);
                event.message = table.accentuate(&event.message);
            },
        );
    }
}

fn on_accent_get(
    entity: EntityId,
    _component: &GermanAccentComponent,
    event: &mut AccentGetEvent,
) {
    debug!("raw: {} ({entity:?})", event.message);
    event.message = accentuate(&event.message);
}
