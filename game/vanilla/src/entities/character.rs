pub mod core;
pub mod hook;

pub mod character {
    use game_interface::types::{
        id_types::CharacterId, input::CharacterInput, render::character::HookCollisionLine,
    };
    use math::math::vector::vec2;
    use thiserror::Error;

    use crate::simulation_pipe::simulation_pipe::SimulationPipeCharacter;

    use super::core::character_core::{Core, DeferredImpulses};

    #[derive(Debug, Clone)]
    pub struct Character {
        pub core: Core,
        /// The input used for the next tick.
        pub input: CharacterInput,
    }

    impl Character {
        pub fn new(pos: vec2) -> Self {
            Self {
                core: Core::new(pos),
                input: CharacterInput::default(),
            }
        }

        /// Resets the character to a fresh state at `pos`, it stays in its team.
        pub fn respawn(&mut self, pos: vec2) {
            let team = self.core.team;
            self.core = Core::new(pos);
            self.core.team = team;
            self.input = CharacterInput::default();
        }

        pub fn tick(&mut self, pipe: &SimulationPipeCharacter) {
            self.core.physics_tick(true, &self.input, pipe);
        }

        pub fn tick_deferred(&self, pipe: &SimulationPipeCharacter) -> DeferredImpulses {
            self.core.physics_tick_deferred(pipe)
        }

        pub fn tick_move(&mut self, pipe: &SimulationPipeCharacter) {
            self.core.physics_move(pipe);
        }

        /// The hook preview for the current aim.
        pub fn hook_collision_line(&self, pipe: &SimulationPipeCharacter) -> HookCollisionLine {
            self.core.hook_collision_line(&self.input.aim(), pipe)
        }
    }

    #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
    pub enum RosterError {
        #[error("all {0} character slots are in use")]
        Full(usize),
        #[error("character id {id} is out of range, only {capacity} slots exist")]
        OutOfRange { id: CharacterId, capacity: usize },
        #[error("character slot {0} is already in use")]
        SlotOccupied(CharacterId),
        #[error("character slot {0} is empty")]
        SlotEmpty(CharacterId),
    }

    /// Fixed capacity arena of characters.
    ///
    /// A [`CharacterId`] is the slot index, it stays valid until the slot is
    /// freed and can be reused afterwards.
    #[derive(Debug, Clone)]
    pub struct Characters {
        slots: Vec<Option<Character>>,
    }

    impl Characters {
        pub fn new(capacity: usize) -> Self {
            Self {
                slots: vec![None; capacity],
            }
        }

        pub fn capacity(&self) -> usize {
            self.slots.len()
        }

        /// Number of live characters.
        pub fn len(&self) -> usize {
            self.slots.iter().filter(|slot| slot.is_some()).count()
        }

        pub fn is_empty(&self) -> bool {
            self.slots.iter().all(|slot| slot.is_none())
        }

        fn slot(&self, id: &CharacterId) -> Result<&Option<Character>, RosterError> {
            self.slots.get(id.index()).ok_or(RosterError::OutOfRange {
                id: *id,
                capacity: self.slots.len(),
            })
        }

        fn slot_mut(&mut self, id: &CharacterId) -> Result<&mut Option<Character>, RosterError> {
            let capacity = self.slots.len();
            self.slots
                .get_mut(id.index())
                .ok_or(RosterError::OutOfRange { id: *id, capacity })
        }

        /// Spawns a character in the first free slot.
        pub fn spawn(&mut self, pos: vec2) -> Result<CharacterId, RosterError> {
            let index = self
                .slots
                .iter()
                .position(|slot| slot.is_none())
                .ok_or(RosterError::Full(self.slots.len()))?;
            let id = CharacterId::from(index);
            self.slots[index] = Some(Character::new(pos));
            log::info!(target: "world", "character {id} spawned at {:.1}, {:.1}", pos.x, pos.y);
            Ok(id)
        }

        pub fn spawn_at(&mut self, id: &CharacterId, pos: vec2) -> Result<(), RosterError> {
            let slot = self.slot_mut(id)?;
            if slot.is_some() {
                return Err(RosterError::SlotOccupied(*id));
            }
            *slot = Some(Character::new(pos));
            log::info!(target: "world", "character {id} spawned at {:.1}, {:.1}", pos.x, pos.y);
            Ok(())
        }

        /// Frees the slot, hooks holding this character let go on their next tick.
        pub fn remove(&mut self, id: &CharacterId) -> Result<Character, RosterError> {
            let character = self.slot_mut(id)?.take().ok_or(RosterError::SlotEmpty(*id))?;
            log::info!(target: "world", "character {id} removed");
            Ok(character)
        }

        pub fn respawn(&mut self, id: &CharacterId, pos: vec2) -> Result<(), RosterError> {
            self.get_mut(id)?.respawn(pos);
            log::info!(target: "world", "character {id} respawned at {:.1}, {:.1}", pos.x, pos.y);
            Ok(())
        }

        pub fn set_input(
            &mut self,
            id: &CharacterId,
            input: CharacterInput,
        ) -> Result<(), RosterError> {
            self.get_mut(id)?.input = input;
            Ok(())
        }

        pub fn get(&self, id: &CharacterId) -> Result<&Character, RosterError> {
            self.slot(id)?.as_ref().ok_or(RosterError::SlotEmpty(*id))
        }

        pub fn get_mut(&mut self, id: &CharacterId) -> Result<&mut Character, RosterError> {
            self.slot_mut(id)?
                .as_mut()
                .ok_or(RosterError::SlotEmpty(*id))
        }

        pub fn contains(&self, id: &CharacterId) -> bool {
            self.get(id).is_ok()
        }

        /// All live characters in slot order.
        pub fn iter(&self) -> impl Iterator<Item = (CharacterId, &Character)> {
            self.slots
                .iter()
                .enumerate()
                .filter_map(|(index, slot)| slot.as_ref().map(|c| (CharacterId::from(index), c)))
        }

        pub fn iter_mut(&mut self) -> impl Iterator<Item = (CharacterId, &mut Character)> {
            self.slots
                .iter_mut()
                .enumerate()
                .filter_map(|(index, slot)| slot.as_mut().map(|c| (CharacterId::from(index), c)))
        }

        /// Every character whose hook currently holds `id`.
        pub fn attached_to(&self, id: &CharacterId) -> Vec<CharacterId> {
            self.iter()
                .filter(|(_, character)| character.core.hook.hooked_char() == Some(*id))
                .map(|(char_id, _)| char_id)
                .collect()
        }

        /// A copy of every core, indexed like the slots.
        pub fn cores(&self) -> Vec<Option<Core>> {
            self.slots
                .iter()
                .map(|slot| slot.as_ref().map(|character| character.core))
                .collect()
        }
    }

    #[cfg(test)]
    mod test {
        use game_interface::types::{id_types::CharacterId, input::CharacterInput};
        use math::math::vector::vec2;

        use super::{Characters, RosterError};
        use crate::entities::character::hook::character_hook::HookState;

        #[test]
        fn spawn_and_remove() {
            let mut chars = Characters::new(2);
            assert!(chars.is_empty());
            let a = chars.spawn(vec2::new(10.0, 10.0)).unwrap();
            let b = chars.spawn(vec2::new(20.0, 10.0)).unwrap();
            assert_eq!(a, CharacterId::from(0));
            assert_eq!(b, CharacterId::from(1));
            assert_eq!(chars.spawn(vec2::default()), Err(RosterError::Full(2)));
            assert_eq!(chars.len(), 2);

            chars.remove(&a).unwrap();
            assert!(!chars.contains(&a));
            assert_eq!(chars.remove(&a).map(|_| ()), Err(RosterError::SlotEmpty(a)));
            assert_eq!(
                chars.set_input(&a, CharacterInput::default()),
                Err(RosterError::SlotEmpty(a))
            );

            // freed slots are reused
            assert_eq!(chars.spawn(vec2::default()), Ok(a));
            assert_eq!(
                chars.spawn_at(&b, vec2::default()),
                Err(RosterError::SlotOccupied(b))
            );
            let out = CharacterId::from(5);
            assert_eq!(
                chars.spawn_at(&out, vec2::default()),
                Err(RosterError::OutOfRange {
                    id: out,
                    capacity: 2
                })
            );
            assert_eq!(
                chars.iter().map(|(id, _)| id).collect::<Vec<_>>(),
                vec![a, b]
            );
        }

        #[test]
        fn respawn_resets_in_place() {
            let mut chars = Characters::new(1);
            let id = chars.spawn(vec2::new(10.0, 10.0)).unwrap();
            {
                let character = chars.get_mut(&id).unwrap();
                character.core.vel = vec2::new(5.0, 5.0);
                character.core.team = 3;
                character.core.hook.state = HookState::Flying;
            }
            chars.respawn(&id, vec2::new(50.0, 60.0)).unwrap();
            let core = &chars.get(&id).unwrap().core;
            assert_eq!(core.pos, vec2::new(50.0, 60.0));
            assert_eq!(core.vel, vec2::default());
            assert_eq!(core.hook.state, HookState::Idle);
            assert_eq!(core.team, 3);
        }

        #[test]
        fn hooked_by_back_references() {
            let mut chars = Characters::new(3);
            let a = chars.spawn(vec2::default()).unwrap();
            let b = chars.spawn(vec2::default()).unwrap();
            let c = chars.spawn(vec2::default()).unwrap();
            for id in [a, c] {
                let hook = &mut chars.get_mut(&id).unwrap().core.hook;
                hook.state = HookState::Grabbed;
                hook.hooked_char = Some(b);
            }
            assert_eq!(chars.attached_to(&b), vec![a, c]);
            assert!(chars.attached_to(&a).is_empty());

            chars.get_mut(&a).unwrap().core.hook.retract();
            assert_eq!(chars.attached_to(&b), vec![c]);
        }
    }
}
