pub mod world {
    use game_interface::types::{id_types::CharacterId, render::character::HookCollisionLine};
    use math::math::vector::vec2;

    use crate::{
        collision::collision::{CollisionQuery, Tunings},
        entities::character::character::{Characters, RosterError},
        simulation_pipe::simulation_pipe::{CharactersSnapshotView, SimulationPipeCharacter},
    };

    /// All characters of a simulation.
    #[derive(Debug, Clone)]
    pub struct GameWorld {
        pub characters: Characters,
    }

    impl GameWorld {
        pub fn new(max_characters: usize) -> Self {
            Self {
                characters: Characters::new(max_characters),
            }
        }

        /// Input, gravity and hooks of every character.
        fn tick_characters(&mut self, collision: &dyn CollisionQuery, tunings: &Tunings) {
            let cores = self.characters.cores();
            for (id, character) in self.characters.iter_mut() {
                let others = CharactersSnapshotView::new(id, &cores);
                character.tick(&SimulationPipeCharacter::new(&others, collision, tunings));
            }
        }

        /// Pushing characters apart and hook drag between characters.
        ///
        /// All impulses are computed from the same state before any of them is applied.
        fn tick_characters_deferred(&mut self, collision: &dyn CollisionQuery, tunings: &Tunings) {
            let cores = self.characters.cores();
            let mut own_changes = vec![vec2::default(); cores.len()];
            let mut hook_changes = vec![vec2::default(); cores.len()];
            for (id, character) in self.characters.iter() {
                let others = CharactersSnapshotView::new(id, &cores);
                let impulses =
                    character.tick_deferred(&SimulationPipeCharacter::new(&others, collision, tunings));
                own_changes[id.index()] = impulses.own;
                if let Some((hooked_id, vel_change)) = impulses.hooked {
                    hook_changes[hooked_id.index()] += vel_change;
                }
            }
            for (id, character) in self.characters.iter_mut() {
                character
                    .core
                    .apply_deferred(own_changes[id.index()] + hook_changes[id.index()]);
            }
        }

        /// Moves every character against the positions from before the move.
        fn post_tick_characters(&mut self, collision: &dyn CollisionQuery, tunings: &Tunings) {
            let cores = self.characters.cores();
            for (id, character) in self.characters.iter_mut() {
                let others = CharactersSnapshotView::new(id, &cores);
                character.tick_move(&SimulationPipeCharacter::new(&others, collision, tunings));
            }
        }

        /// Advances every character by one tick.
        pub fn tick(&mut self, collision: &dyn CollisionQuery, tunings: &Tunings) {
            self.tick_characters(collision, tunings);
            self.tick_characters_deferred(collision, tunings);
            self.post_tick_characters(collision, tunings);
        }

        pub fn hook_collision_line(
            &self,
            id: &CharacterId,
            collision: &dyn CollisionQuery,
            tunings: &Tunings,
        ) -> Result<HookCollisionLine, RosterError> {
            let character = self.characters.get(id)?;
            let cores = self.characters.cores();
            let others = CharactersSnapshotView::new(*id, &cores);
            Ok(character.hook_collision_line(&SimulationPipeCharacter::new(
                &others, collision, tunings,
            )))
        }
    }

    #[cfg(test)]
    mod test {
        use game_interface::{
            events::CoreEvents,
            types::{id_types::CharacterId, input::CharacterInput, render::character::HookCollisionLineColor},
        };
        use math::math::{distance, vector::vec2, Rng};

        use super::GameWorld;
        use crate::{
            collision::collision::{Collision, Tunings},
            entities::character::{
                core::character_core::CoreFlags, hook::character_hook::HookState,
            },
        };

        /// 30x15 tiles of 32 units, solid border, floor surface at y = 448.
        fn room() -> Collision {
            let mut rows = vec!["#".repeat(30)];
            for _ in 0..13 {
                rows.push(format!("#{}#", ".".repeat(28)));
            }
            rows.push("#".repeat(30));
            Collision::from_ascii(32.0, &rows).unwrap()
        }

        const FLOOR_Y: f64 = 448.0 - 14.0 - 0.25;

        fn char_distance(world: &GameWorld, a: &CharacterId, b: &CharacterId) -> f64 {
            distance(
                &world.characters.get(a).unwrap().core.pos,
                &world.characters.get(b).unwrap().core.pos,
            )
        }

        #[test]
        fn overlapping_characters_are_pushed_apart() {
            let collision = room();
            let tunings = Tunings::default();

            let mut world = GameWorld::new(2);
            let a = world.characters.spawn(vec2::new(300.0, FLOOR_Y)).unwrap();
            let b = world.characters.spawn(vec2::new(310.0, FLOOR_Y)).unwrap();
            world.tick(&collision, &tunings);
            assert!(world.characters.get(&a).unwrap().core.vel.x < 0.0);
            assert!(world.characters.get(&b).unwrap().core.vel.x > 0.0);
            assert!(char_distance(&world, &a, &b) > 25.0);

            // without collision they stay inside each other
            let mut world = GameWorld::new(2);
            let a = world.characters.spawn(vec2::new(300.0, FLOOR_Y)).unwrap();
            let b = world.characters.spawn(vec2::new(310.0, FLOOR_Y)).unwrap();
            world.characters.get_mut(&b).unwrap().core.flags |= CoreFlags::COLLISION_DISABLED;
            world.tick(&collision, &tunings);
            assert!((char_distance(&world, &a, &b) - 10.0).abs() < 1e-9);

            // neither do different teams
            let mut world = GameWorld::new(2);
            let a = world.characters.spawn(vec2::new(300.0, FLOOR_Y)).unwrap();
            let b = world.characters.spawn(vec2::new(310.0, FLOOR_Y)).unwrap();
            world.characters.get_mut(&b).unwrap().core.team = 1;
            world.tick(&collision, &tunings);
            assert!((char_distance(&world, &a, &b) - 10.0).abs() < 1e-9);
        }

        #[test]
        fn walking_into_a_character_stops_in_front_of_it() {
            let collision = room();
            let tunings = Tunings::default();

            let mut world = GameWorld::new(2);
            let a = world.characters.spawn(vec2::new(200.0, FLOOR_Y)).unwrap();
            let b = world.characters.spawn(vec2::new(400.0, FLOOR_Y)).unwrap();
            world
                .characters
                .set_input(
                    &a,
                    CharacterInput {
                        dir: 1,
                        ..Default::default()
                    },
                )
                .unwrap();
            for _ in 0..100 {
                world.tick(&collision, &tunings);
                assert!(char_distance(&world, &a, &b) >= 28.0 - 1.0);
            }
        }

        #[test]
        fn hook_drags_character_and_degrades_on_removal() {
            let collision = room();
            let tunings = Tunings::default();

            let mut world = GameWorld::new(2);
            let a = world.characters.spawn(vec2::new(200.0, FLOOR_Y)).unwrap();
            let b = world.characters.spawn(vec2::new(400.0, FLOOR_Y)).unwrap();
            world
                .characters
                .set_input(
                    &a,
                    CharacterInput {
                        hook: true,
                        cursor: vec2::new(1.0, 0.0),
                        ..Default::default()
                    },
                )
                .unwrap();

            let line = world.hook_collision_line(&a, &collision, &tunings).unwrap();
            assert_eq!(line.color, HookCollisionLineColor::Player);

            world.tick(&collision, &tunings);
            world.tick(&collision, &tunings);
            let hooker = &world.characters.get(&a).unwrap().core;
            assert!(hooker.triggered_events.contains(CoreEvents::HOOK_ATTACH_PLAYER));
            assert_eq!(hooker.hook.state, HookState::Grabbed);
            assert_eq!(hooker.hook.hooked_char, Some(b));
            assert!(hooker.vel.x > 0.0);
            assert!(world.characters.get(&b).unwrap().core.vel.x < 0.0);
            assert_eq!(world.characters.attached_to(&b), vec![a]);

            // the hook follows the hooked character
            world.tick(&collision, &tunings);
            let hook_pos = world.characters.get(&a).unwrap().core.hook.pos;
            let b_pos = world.characters.get(&b).unwrap().core.pos;
            assert!(distance(&hook_pos, &b_pos) < 5.0);

            world.characters.remove(&b).unwrap();
            world.tick(&collision, &tunings);
            let hooker = &world.characters.get(&a).unwrap().core;
            assert_eq!(hooker.hook.state, HookState::RetractStart);
            assert_eq!(hooker.hook.hooked_char, None);
            for _ in 0..3 {
                world.tick(&collision, &tunings);
            }
            assert_eq!(
                world.characters.get(&a).unwrap().core.hook.state,
                HookState::Retracted
            );
        }

        #[test]
        fn hook_hit_disabled_flies_through() {
            let collision = room();
            let tunings = Tunings::default();

            let mut world = GameWorld::new(2);
            let a = world.characters.spawn(vec2::new(200.0, FLOOR_Y)).unwrap();
            world.characters.spawn(vec2::new(400.0, FLOOR_Y)).unwrap();
            let character = world.characters.get_mut(&a).unwrap();
            character.core.flags |= CoreFlags::HOOK_HIT_DISABLED;
            character.input = CharacterInput {
                hook: true,
                cursor: vec2::new(1.0, 0.0),
                ..Default::default()
            };
            for _ in 0..10 {
                world.tick(&collision, &tunings);
                assert_eq!(world.characters.get(&a).unwrap().core.hook.hooked_char, None);
            }
        }

        /// Runs two characters with their own input streams, `swapped` puts
        /// them into each other's slots.
        fn run_pair(swapped: bool) -> Vec<(vec2, vec2, HookState)> {
            let collision = room();
            let tunings = Tunings::default();
            let mut world = GameWorld::new(2);
            let (slot_a, slot_b) = if swapped {
                (CharacterId::from(1), CharacterId::from(0))
            } else {
                (CharacterId::from(0), CharacterId::from(1))
            };
            world
                .characters
                .spawn_at(&slot_a, vec2::new(300.0, FLOOR_Y))
                .unwrap();
            world
                .characters
                .spawn_at(&slot_b, vec2::new(330.0, FLOOR_Y))
                .unwrap();

            let mut rngs = [Rng::new(7), Rng::new(8)];
            let mut states = Vec::new();
            for _ in 0..500 {
                for (slot, rng) in [slot_a, slot_b].iter().zip(rngs.iter_mut()) {
                    let inp = CharacterInput {
                        dir: rng.random_int_in(-1..=1) as i32,
                        cursor: vec2::new(
                            rng.random_float_in(-1.0, 1.0),
                            rng.random_float_in(-1.0, 1.0),
                        ),
                        jump: rng.random_int_in(0..=1) != 0,
                        hook: rng.random_int_in(0..=3) != 0,
                        fire: false,
                    };
                    world.characters.set_input(slot, inp).unwrap();
                }
                world.tick(&collision, &tunings);
                for slot in [slot_a, slot_b] {
                    let core = &world.characters.get(&slot).unwrap().core;
                    states.push((core.pos, core.vel, core.hook.state));
                }
            }
            states
        }

        #[test]
        fn roster_order_does_not_matter() {
            assert_eq!(run_pair(false), run_pair(true));
        }
    }
}
