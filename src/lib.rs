//! German accent filter for chat/dialogue messages.
//!
//! [`accentuate`] is the pure transform. [`events`] wires it into a
//! message-rendering event for speakers tagged with [`GermanAccentComponent`].

pub mod accent;
pub mod config;
pub mod daemon;
pub mod events;
pub mod ipc;
pub mod oneshot;

pub use accent::{DEFAULT_REPLACEMENTS, ReplacementTable, accentuate};
pub use events::{AccentGetEvent, EventBus, GermanAccentComponent, GermanAccentSystem, World};
