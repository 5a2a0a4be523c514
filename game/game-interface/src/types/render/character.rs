use math::math::vector::vec2;
use serde::{Deserialize, Serialize};

/// What the hook would hit if it was fired now
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookCollisionLineColor {
    /// Hook would hit nothing
    Nothing,
    /// Hook would hit a player
    Player,
    /// Hook would hit hookable
    Hookable,
    /// Hook would hit unhookable
    Unhookable,
}

/// Information about the hook collision
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HookCollisionLine {
    /// Start position of the hook collision line
    pub start: vec2,
    /// End position of the hook collision line
    pub end: vec2,
    /// color of the hook collision line
    pub color: HookCollisionLineColor,
}
