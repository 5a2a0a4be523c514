use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Things that happened to a character core during the last tick.
///
/// Consumed by sound, effects and network code; the physics never reads them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoreEvents(u32);
bitflags! {
    impl CoreEvents: u32 {
        const GROUND_JUMP = (1 << 0);
        const AIR_JUMP = (1 << 1);
        const HOOK_LAUNCH = (1 << 2);
        const HOOK_ATTACH_PLAYER = (1 << 3);
        const HOOK_ATTACH_GROUND = (1 << 4);
        /// The hook hit an unhookable tile
        const HOOK_HIT_NOHOOK = (1 << 5);
        const HOOK_RETRACT = (1 << 6);
    }
}
