use std::fmt;
use eframe::egui::Color32;
use serde::{Serialize, Deserialize};

/// Identity of one of the three navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreenId {
    A,
    B,
    C,
}

impl ScreenId {
    pub const ALL: [ScreenId; 3] = [ScreenId::A, ScreenId::B, ScreenId::C];

    pub fn name(&self) -> &'static str {
        match self {
            ScreenId::A => "A",
            ScreenId::B => "B",
            ScreenId::C => "C",
        }
    }

    /// The two screens this one can navigate to.
    pub fn others(&self) -> [ScreenId; 2] {
        match self {
            ScreenId::A => [ScreenId::B, ScreenId::C],
            ScreenId::B => [ScreenId::A, ScreenId::C],
            ScreenId::C => [ScreenId::A, ScreenId::B],
        }
    }

    /// Accent color for this screen's navigation buttons.
    pub fn accent(&self) -> Color32 {
        match self {
            ScreenId::A => Color32::from_rgb(0x4f, 0x8c, 0xc9),
            ScreenId::B => Color32::from_rgb(0x5d, 0xa8, 0x60),
            ScreenId::C => Color32::from_rgb(0xc9, 0x7b, 0x4f),
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle phases a screen passes through, in platform order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

impl Phase {
    /// State word stored in the status store ("A: created").
    pub fn state_name(&self) -> &'static str {
        match self {
            Phase::Created => "created",
            Phase::Started => "started",
            Phase::Resumed => "resumed",
            Phase::Paused => "paused",
            Phase::Stopped => "stopped",
            Phase::Destroyed => "destroyed",
        }
    }

    /// Callback name logged on entry ("A.on_create()").
    pub fn method_name(&self) -> &'static str {
        match self {
            Phase::Created => "on_create",
            Phase::Started => "on_start",
            Phase::Resumed => "on_resume",
            Phase::Paused => "on_pause",
            Phase::Stopped => "on_stop",
            Phase::Destroyed => "on_destroy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn others_never_contains_self() {
        for id in ScreenId::ALL {
            assert!(!id.others().contains(&id));
        }
    }

    #[test]
    fn phase_names_match_callbacks() {
        assert_eq!(Phase::Created.state_name(), "created");
        assert_eq!(Phase::Created.method_name(), "on_create");
        assert_eq!(Phase::Destroyed.method_name(), "on_destroy");
    }
}
