//! Trigger policies: which host events start and stop emission

use glint_core::Vec2;
use serde::{Deserialize, Serialize};

/// When an effect emits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerPolicy {
    /// Start on mount, settle into steady state once fully revealed
    #[default]
    Mount,
    /// Emit while the pointer is over the container
    Hover,
    /// Pointer-down toggles emission and requests a burst at the pointer
    Click,
    /// Driven by the host's `active` flag
    External,
    /// Start on mount fully revealed, skipping the reveal ramp
    Instant,
}

impl TriggerPolicy {
    pub const ALL: [Self; 5] = [
        Self::Mount,
        Self::Hover,
        Self::Click,
        Self::External,
        Self::Instant,
    ];

    /// Whether a completed reveal settles into the steady phase
    pub fn settles(self) -> bool {
        matches!(self, Self::Mount | Self::Instant)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Hover => "hover",
            Self::Click => "click",
            Self::External => "external",
            Self::Instant => "instant",
        }
    }

    /// Map a host event to what the effect should do under this policy
    pub fn react(self, event: &TriggerEvent) -> Reaction {
        let emission = match (self, event) {
            (_, TriggerEvent::Unmount) => Some(EmissionCommand::Stop),
            (Self::Mount | Self::Instant, TriggerEvent::Mount) => Some(EmissionCommand::Start),
            (Self::Hover, TriggerEvent::PointerEnter) => Some(EmissionCommand::Start),
            (Self::Hover, TriggerEvent::PointerLeave) => Some(EmissionCommand::Stop),
            (Self::Click, TriggerEvent::PointerDown { .. }) => Some(EmissionCommand::Toggle),
            (Self::External, TriggerEvent::ExternalActive(true)) => Some(EmissionCommand::Start),
            (Self::External, TriggerEvent::ExternalActive(false)) => Some(EmissionCommand::Stop),
            _ => None,
        };
        let burst = match (self, event) {
            (Self::Click, TriggerEvent::PointerDown { x, y }) => Some(Vec2::new(*x, *y)),
            _ => None,
        };
        Reaction { emission, burst }
    }
}

/// Lifecycle and pointer events delivered by the host container
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerEvent {
    Mount,
    Unmount,
    PointerEnter,
    PointerLeave,
    /// Pointer position in logical pixels relative to the container
    PointerDown { x: f32, y: f32 },
    ExternalActive(bool),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmissionCommand {
    Start,
    Stop,
    Toggle,
}

/// Outcome of one event under a policy
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Reaction {
    pub emission: Option<EmissionCommand>,
    pub burst: Option<Vec2>,
}
