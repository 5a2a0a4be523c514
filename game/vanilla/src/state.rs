pub mod state {
    use game_interface::types::{
        id_types::CharacterId, input::CharacterInput, render::character::HookCollisionLine,
    };
    use math::math::vector::vec2;

    use crate::{
        collision::collision::{CollisionQuery, Tunings},
        config::ConfigVanilla,
        entities::character::character::{Characters, RosterError},
        snapshot::snapshot::{CharacterSnapshot, WorldSnapshot},
        world::world::GameWorld,
    };

    pub const TICKS_PER_SECOND: u64 = 50;

    /// A complete simulation: the map, its tunings and every character.
    pub struct GameState {
        collision: Box<dyn CollisionQuery>,
        tunings: Tunings,
        config: ConfigVanilla,
        world: GameWorld,
        cur_tick: u64,
    }

    impl GameState {
        pub fn new(collision: Box<dyn CollisionQuery>, config: ConfigVanilla) -> anyhow::Result<Self> {
            config.validate()?;
            let tunings = config.effective_tunings();
            log::info!(
                target: "world",
                "created game with {} character slots", config.max_characters
            );
            Ok(Self {
                collision,
                tunings,
                world: GameWorld::new(config.max_characters),
                config,
                cur_tick: 0,
            })
        }

        /// Like [`GameState::new`], but with a JSON encoded config.
        ///
        /// A missing or unreadable config falls back to the default one.
        pub fn new_from_json(
            collision: Box<dyn CollisionQuery>,
            config: Option<&[u8]>,
        ) -> anyhow::Result<Self> {
            let config: ConfigVanilla = config
                .and_then(|config| match serde_json::from_slice(config) {
                    Ok(config) => Some(config),
                    Err(err) => {
                        log::warn!(target: "world", "invalid config, using defaults: {err}");
                        None
                    }
                })
                .unwrap_or_default();
            Self::new(collision, config)
        }

        pub fn collision(&self) -> &dyn CollisionQuery {
            &*self.collision
        }

        pub fn tunings(&self) -> &Tunings {
            &self.tunings
        }

        pub fn config(&self) -> &ConfigVanilla {
            &self.config
        }

        pub fn characters(&self) -> &Characters {
            &self.world.characters
        }

        pub fn characters_mut(&mut self) -> &mut Characters {
            &mut self.world.characters
        }

        pub fn spawn_character(&mut self, pos: vec2) -> Result<CharacterId, RosterError> {
            self.world.characters.spawn(pos)
        }

        pub fn remove_character(&mut self, id: &CharacterId) -> Result<(), RosterError> {
            self.world.characters.remove(id).map(|_| ())
        }

        pub fn set_input(&mut self, id: &CharacterId, input: CharacterInput) -> Result<(), RosterError> {
            self.world.characters.set_input(id, input)
        }

        pub fn tick(&mut self) {
            self.world.tick(&*self.collision, &self.tunings);
            self.cur_tick += 1;
        }

        /// Ticks simulated so far.
        pub fn tick_count(&self) -> u64 {
            self.cur_tick
        }

        pub fn snapshots(&self) -> Vec<CharacterSnapshot> {
            self.snapshot().characters
        }

        pub fn snapshot(&self) -> WorldSnapshot {
            WorldSnapshot::new(self.cur_tick, &self.world.characters)
        }

        pub fn hook_collision_line(&self, id: &CharacterId) -> Result<HookCollisionLine, RosterError> {
            self.world
                .hook_collision_line(id, &*self.collision, &self.tunings)
        }
    }

}
