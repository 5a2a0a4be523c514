pub mod simulation_pipe {
    use std::ops::ControlFlow;

    use game_interface::types::id_types::CharacterId;

    use crate::{
        collision::collision::{CollisionQuery, Tunings},
        entities::character::core::character_core::Core,
    };

    /// Read access to every character except the one being simulated.
    pub trait SimulationPipeCharactersGetter {
        fn for_each_other_character(
            &self,
            for_each_func: &mut dyn FnMut(&CharacterId, &Core) -> ControlFlow<()>,
        ) -> ControlFlow<()>;
        fn get_other_character_core_by_id(&self, other_char_id: &CharacterId) -> Option<&Core>;
    }

    /// The other characters as they were when the current phase started.
    ///
    /// Every character of a phase reads the same frozen state, so the result
    /// does not depend on the order the characters are simulated in.
    pub struct CharactersSnapshotView<'a> {
        own_id: CharacterId,
        cores: &'a [Option<Core>],
    }

    impl<'a> CharactersSnapshotView<'a> {
        pub fn new(own_id: CharacterId, cores: &'a [Option<Core>]) -> Self {
            Self { own_id, cores }
        }
    }

    impl SimulationPipeCharactersGetter for CharactersSnapshotView<'_> {
        fn for_each_other_character(
            &self,
            for_each_func: &mut dyn FnMut(&CharacterId, &Core) -> ControlFlow<()>,
        ) -> ControlFlow<()> {
            for (index, core) in self.cores.iter().enumerate() {
                let id = CharacterId::from(index);
                if id == self.own_id {
                    continue;
                }
                if let Some(core) = core {
                    for_each_func(&id, core)?;
                }
            }
            ControlFlow::Continue(())
        }

        fn get_other_character_core_by_id(&self, other_char_id: &CharacterId) -> Option<&Core> {
            if *other_char_id == self.own_id {
                return None;
            }
            self.cores
                .get(other_char_id.index())
                .and_then(|core| core.as_ref())
        }
    }

    /// A getter for a character that is alone in the world.
    pub struct NoOtherCharacters;

    impl SimulationPipeCharactersGetter for NoOtherCharacters {
        fn for_each_other_character(
            &self,
            _for_each_func: &mut dyn FnMut(&CharacterId, &Core) -> ControlFlow<()>,
        ) -> ControlFlow<()> {
            ControlFlow::Continue(())
        }

        fn get_other_character_core_by_id(&self, _other_char_id: &CharacterId) -> Option<&Core> {
            None
        }
    }

    /// Everything a character needs from the world for a single phase.
    pub struct SimulationPipeCharacter<'a> {
        pub characters: &'a dyn SimulationPipeCharactersGetter,
        pub collision: &'a dyn CollisionQuery,
        pub tunings: &'a Tunings,
    }

    impl<'a> SimulationPipeCharacter<'a> {
        pub fn new(
            characters: &'a dyn SimulationPipeCharactersGetter,
            collision: &'a dyn CollisionQuery,
            tunings: &'a Tunings,
        ) -> Self {
            Self {
                characters,
                collision,
                tunings,
            }
        }
    }
}
