pub mod character_hook {
    use game_interface::types::id_types::CharacterId;
    use math::math::vector::vec2;
    use serde::{Deserialize, Serialize};

    use crate::{collision::collision::Tunings, state::state::TICKS_PER_SECOND};

    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum HookState {
        /// Fully retracted, waits for the hook input to be released.
        Retracted,
        /// Ready to be launched.
        #[default]
        Idle,
        RetractStart,
        RetractMid,
        RetractEnd,
        Flying,
        Grabbed,
    }

    impl HookState {
        pub fn is_retracting(&self) -> bool {
            matches!(self, Self::RetractStart | Self::RetractMid | Self::RetractEnd)
        }
    }

    /// The hook of a single character.
    ///
    /// `hooked_char` is only a lookup key, whoever reads it must expect the
    /// character to be gone.
    #[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
    pub struct CharacterHook {
        pub state: HookState,
        pub pos: vec2,
        pub dir: vec2,
        pub hooked_char: Option<CharacterId>,
        /// Ticks left until a grabbed hook lets go.
        pub timer: i32,
    }

    impl CharacterHook {
        pub fn new(owner_pos: vec2) -> Self {
            Self {
                state: HookState::Idle,
                pos: owner_pos,
                dir: vec2::default(),
                hooked_char: None,
                timer: 0,
            }
        }

        /// How many ticks a hook may stay grabbed.
        pub fn grab_ticks(tunings: &Tunings) -> i32 {
            (TICKS_PER_SECOND as f64 * tunings.hook_duration * 1.2).ceil() as i32
        }

        pub fn launch(&mut self, start: vec2, dir: vec2, tunings: &Tunings) {
            self.state = HookState::Flying;
            self.pos = start;
            self.dir = dir;
            self.hooked_char = None;
            self.timer = Self::grab_ticks(tunings);
        }

        /// Hook input was released, back to [`HookState::Idle`] from any state.
        pub fn release(&mut self, owner_pos: vec2) {
            self.state = HookState::Idle;
            self.pos = owner_pos;
            self.hooked_char = None;
        }

        pub fn retract(&mut self) {
            self.state = HookState::RetractStart;
            self.hooked_char = None;
        }

        /// Advances the retract animation by one tick.
        ///
        /// Returns `true` once the hook is fully retracted.
        pub fn advance_retract(&mut self) -> bool {
            match self.state {
                HookState::RetractStart => {
                    self.state = HookState::RetractMid;
                    false
                }
                HookState::RetractMid => {
                    self.state = HookState::RetractEnd;
                    false
                }
                HookState::RetractEnd => {
                    self.state = HookState::Retracted;
                    self.hooked_char = None;
                    true
                }
                _ => false,
            }
        }

        pub fn hooked_char(&self) -> Option<CharacterId> {
            match self.state {
                HookState::Grabbed => self.hooked_char,
                _ => None,
            }
        }
    }

    #[cfg(test)]
    mod test {
        use math::math::vector::vec2;

        use super::{CharacterHook, HookState};
        use crate::collision::collision::Tunings;

        #[test]
        fn retract_cycle() {
            let tunings = Tunings::default();
            let mut hook = CharacterHook::new(vec2::new(10.0, 10.0));
            hook.launch(vec2::new(52.0, 10.0), vec2::new(1.0, 0.0), &tunings);
            assert_eq!(hook.state, HookState::Flying);
            assert_eq!(hook.timer, 75);

            hook.retract();
            assert!(hook.state.is_retracting());
            assert!(!hook.advance_retract());
            assert!(!hook.advance_retract());
            assert!(hook.advance_retract());
            assert_eq!(hook.state, HookState::Retracted);
            // stays retracted until released
            assert!(!hook.advance_retract());
            assert_eq!(hook.state, HookState::Retracted);

            hook.release(vec2::new(20.0, 10.0));
            assert_eq!(hook.state, HookState::Idle);
            assert_eq!(hook.pos, vec2::new(20.0, 10.0));
            assert_eq!(hook.hooked_char(), None);
        }
    }
}
