pub mod snapshot {
    use game_interface::{events::CoreEvents, types::id_types::CharacterId};
    use math::math::vector::vec2;
    use serde::{Deserialize, Serialize};

    use crate::entities::character::{
        character::Characters,
        core::character_core::{Core, CoreFlags, JumpState, WallContact},
        hook::character_hook::HookState,
    };

    /// Read only state of a single character after a tick.
    #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
    pub struct CharacterSnapshot {
        pub id: CharacterId,
        pub pos: vec2,
        pub vel: vec2,
        pub hook_state: HookState,
        pub hook_pos: vec2,
        pub hooked_char: Option<CharacterId>,
        pub grounded: bool,
        pub events: CoreEvents,
        pub direction: i32,
        pub angle: i32,
        pub jumped: JumpState,
        pub jumped_total: i32,
        pub colliding: WallContact,
        pub flags: CoreFlags,
        pub team: u32,
    }

    impl CharacterSnapshot {
        pub fn new(id: CharacterId, core: &Core) -> Self {
            Self {
                id,
                pos: core.pos,
                vel: core.vel,
                hook_state: core.hook.state,
                hook_pos: core.hook.pos,
                hooked_char: core.hook.hooked_char(),
                grounded: core.grounded,
                events: core.triggered_events,
                direction: core.direction,
                angle: core.angle,
                jumped: core.jumped,
                jumped_total: core.jumped_total,
                colliding: core.colliding,
                flags: core.flags,
                team: core.team,
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct WorldSnapshot {
        pub tick: u64,
        pub characters: Vec<CharacterSnapshot>,
    }

    impl WorldSnapshot {
        pub fn new(tick: u64, characters: &Characters) -> Self {
            Self {
                tick,
                characters: characters
                    .iter()
                    .map(|(id, character)| CharacterSnapshot::new(id, &character.core))
                    .collect(),
            }
        }
    }

    #[cfg(test)]
    mod test {
        use game_interface::types::id_types::CharacterId;
        use math::math::vector::vec2;

        use super::WorldSnapshot;
        use crate::entities::character::{
            character::Characters, hook::character_hook::HookState,
        };

        #[test]
        fn only_live_characters() {
            let mut chars = Characters::new(3);
            chars.spawn(vec2::new(1.0, 2.0)).unwrap();
            let b = chars.spawn(vec2::new(3.0, 4.0)).unwrap();
            chars.spawn(vec2::new(5.0, 6.0)).unwrap();
            chars.remove(&b).unwrap();

            let snap = WorldSnapshot::new(7, &chars);
            assert_eq!(snap.tick, 7);
            assert_eq!(
                snap.characters.iter().map(|c| c.id).collect::<Vec<_>>(),
                vec![CharacterId::from(0), CharacterId::from(2)]
            );
            assert_eq!(snap.characters[1].pos, vec2::new(5.0, 6.0));
            assert_eq!(snap.characters[1].hook_state, HookState::Idle);
            assert_eq!(snap.characters[1].hooked_char, None);
        }
    }
}
