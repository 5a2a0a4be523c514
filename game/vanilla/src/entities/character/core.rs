pub mod character_core {
    use std::{
        cmp::Ordering,
        ops::{AddAssign, ControlFlow},
    };

    use bitflags::bitflags;
    use game_interface::{
        events::CoreEvents,
        types::{
            id_types::CharacterId,
            input::CharacterInput,
            render::character::{HookCollisionLine, HookCollisionLineColor},
        },
    };
    use math::math::{
        closest_point_on_line, distance, distance_squared, dot, length, mix, normalize, PI,
        vector::vec2,
    };
    use num_traits::Zero;
    use serde::{Deserialize, Serialize};

    use crate::{
        collision::collision::{CollisionQuery, Tunings},
        entities::character::hook::character_hook::{CharacterHook, HookState},
        simulation_pipe::simulation_pipe::{
            SimulationPipeCharacter, SimulationPipeCharactersGetter,
        },
        state::state::TICKS_PER_SECOND,
    };

    pub const PHYSICAL_SIZE: f64 = 28.0;
    const fn physical_size() -> f64 {
        PHYSICAL_SIZE
    }
    const fn physical_size_vec2() -> vec2 {
        vec2 {
            x: PHYSICAL_SIZE,
            y: PHYSICAL_SIZE,
        }
    }
    const HOOK_RADIUS: f64 = 2.0;
    /// Below this distance a grabbed hook stops dragging its owner.
    const HOOK_DRAG_MIN_DISTANCE: f64 = 46.0;
    const MAX_VELOCITY: f64 = 6000.0;
    pub const DEFAULT_JUMPS: i32 = 2;

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CoreFlags(u32);
    bitflags! {
        impl CoreFlags: u32 {
            /// Doesn't interact with other characters, unless one of them is super.
            const SOLO = (1 << 0);
            const COLLISION_DISABLED = (1 << 1);
            /// A grabbed hook never times out.
            const ENDLESS_HOOK = (1 << 2);
            /// Air jumps are never used up.
            const ENDLESS_JUMP = (1 << 3);
            /// Interacts with everyone, ignoring solo and teams.
            const SUPER = (1 << 4);
            const INVINCIBLE = (1 << 5);
            /// The hook flies through characters.
            const HOOK_HIT_DISABLED = (1 << 6);
        }
    }

    /// Jump bookkeeping.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct JumpState {
        /// The current jump press already made a jump, released with the input.
        pub consumed_this_press: bool,
        /// No air jumps left until the character touches the ground.
        pub air_jumps_exhausted: bool,
    }

    /// The side a wall blocked the character on during the last move.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum WallContact {
        #[default]
        None,
        Right,
        Left,
    }

    /// Velocity changes of the pairwise phase.
    ///
    /// Computed for every character before any of them is applied.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct DeferredImpulses {
        pub own: vec2,
        /// The change for the character this one holds with its hook.
        pub hooked: Option<(CharacterId, vec2)>,
    }

    #[derive(Debug, Copy, Clone, Serialize, Deserialize)]
    pub struct Core {
        pub pos: vec2,
        pub vel: vec2,

        pub hook: CharacterHook,

        pub jumped: JumpState,
        // counts the jumps performed in the air
        pub jumped_total: i32,
        pub jumps: i32,

        pub direction: i32,
        pub angle: i32,

        pub grounded: bool,
        pub colliding: WallContact,
        pub left_wall: bool,

        pub flags: CoreFlags,
        pub team: u32,

        pub triggered_events: CoreEvents,
    }

    impl Core {
        pub fn new(pos: vec2) -> Self {
            Self {
                pos,
                vel: vec2::default(),
                hook: CharacterHook::new(pos),
                jumped: JumpState::default(),
                jumped_total: 0,
                jumps: DEFAULT_JUMPS,
                direction: 0,
                angle: 0,
                grounded: false,
                colliding: WallContact::None,
                left_wall: false,
                flags: CoreFlags::empty(),
                team: 0,
                triggered_events: CoreEvents::empty(),
            }
        }

        /// Adds `modifier` to `current` without pushing it past `min_val`/`max_val`.
        ///
        /// A value that is already outside of the band is never pulled back
        /// into it, only further acceleration is prevented.
        pub fn saturated_add<T: AddAssign + PartialOrd + Zero>(
            min_val: T,
            max_val: T,
            current: T,
            modifier: T,
        ) -> T {
            let mut cur = current;
            if modifier < T::zero() {
                if cur < min_val {
                    return cur;
                }
                cur += modifier;
                if cur < min_val {
                    cur = min_val;
                }
                cur
            } else {
                if cur > max_val {
                    return cur;
                }
                cur += modifier;
                if cur > max_val {
                    cur = max_val;
                }
                cur
            }
        }

        pub fn velocity_ramp(value: f64, start: f64, range: f64, curvature: f64) -> f64 {
            if value < start {
                return 1.0;
            }
            1.0 / curvature.powf((value - start) / range)
        }

        /// Whether there is solid ground right below the character's feet.
        pub fn is_grounded(collision: &dyn CollisionQuery, pos: &vec2) -> bool {
            let y = pos.y + physical_size() / 2.0 + 5.0;
            collision.is_solid(&vec2::new(pos.x + physical_size() / 2.0, y))
                || collision.is_solid(&vec2::new(pos.x - physical_size() / 2.0, y))
        }

        pub fn is_super(&self) -> bool {
            self.flags.contains(CoreFlags::SUPER)
        }

        /// Whether hooks and collisions between both characters are possible at all.
        pub fn can_interact_with(&self, other: &Core) -> bool {
            if self.is_super() || other.is_super() {
                return true;
            }
            !self.flags.contains(CoreFlags::SOLO)
                && !other.flags.contains(CoreFlags::SOLO)
                && self.team == other.team
        }

        pub fn can_collide_with(&self, other: &Core, tunings: &Tunings) -> bool {
            self.can_interact_with(other)
                && ((self.is_super() || other.is_super())
                    || (!self.flags.contains(CoreFlags::COLLISION_DISABLED)
                        && !other.flags.contains(CoreFlags::COLLISION_DISABLED)
                        && tunings.player_collision > 0.0))
        }

        fn aim_angle(dir: &vec2) -> i32 {
            let tmp_angle = dir.y.atan2(dir.x);
            if tmp_angle < -(PI / 2.0) {
                ((tmp_angle + 2.0 * PI) * 256.0) as i32
            } else {
                (tmp_angle * 256.0) as i32
            }
        }

        fn refill_jumps(&mut self) {
            self.jumped.air_jumps_exhausted = self.jumps == 0;
            self.jumped_total = 0;
        }

        fn handle_jump(&mut self, grounded: bool, tunings: &Tunings) {
            if self.jumped.consumed_this_press {
                return;
            }
            let endless = self.flags.contains(CoreFlags::ENDLESS_JUMP);
            if grounded && (!self.jumped.air_jumps_exhausted || self.jumps != 0) {
                self.triggered_events |= CoreEvents::GROUND_JUMP;
                self.vel.y = -tunings.ground_jump_impulse;
                self.jumped.consumed_this_press = true;
                // a single jump is either a ground or an air jump
                if self.jumps <= 1 && !endless {
                    self.jumped.air_jumps_exhausted = true;
                }
                self.jumped_total = 0;
            } else if !self.jumped.air_jumps_exhausted {
                self.triggered_events |= CoreEvents::AIR_JUMP;
                self.vel.y = -tunings.air_jump_impulse;
                self.jumped.consumed_this_press = true;
                self.jumped_total += 1;
                if !endless && self.jumped_total >= self.jumps - 1 {
                    self.jumped.air_jumps_exhausted = true;
                }
            }
        }

        /// Input, gravity, jumping and the hook.
        ///
        /// Other characters are only read, never written.
        pub fn physics_tick(
            &mut self,
            use_input: bool,
            input: &CharacterInput,
            pipe: &SimulationPipeCharacter,
        ) {
            let tunings = pipe.tunings;
            self.triggered_events = CoreEvents::empty();

            // get ground state
            let grounded = Self::is_grounded(pipe.collision, &self.pos);
            self.grounded = grounded;

            self.vel.y += tunings.gravity;

            let max_speed = if grounded {
                tunings.ground_control_speed
            } else {
                tunings.air_control_speed
            };
            let accel = if grounded {
                tunings.ground_control_accel
            } else {
                tunings.air_control_accel
            };
            let friction = if grounded {
                tunings.ground_friction
            } else {
                tunings.air_friction
            };

            // refilled before the jump is handled, so the ground jump of a
            // character with a single jump uses it up
            if grounded {
                self.refill_jumps();
            }

            // handle input
            if use_input {
                self.direction = input.direction();
                let target_direction = input.aim_dir();
                self.angle = Self::aim_angle(&target_direction);

                if input.jump {
                    self.handle_jump(grounded, tunings);
                } else {
                    self.jumped.consumed_this_press = false;
                }

                if input.hook {
                    if self.hook.state == HookState::Idle {
                        self.hook.launch(
                            self.pos + target_direction * physical_size() * 1.5,
                            target_direction,
                            tunings,
                        );
                        self.triggered_events |= CoreEvents::HOOK_LAUNCH;
                    }
                } else {
                    self.hook.release(self.pos);
                }
            }

            // add the speed modification according to players wanted direction
            match self.direction.cmp(&0) {
                Ordering::Less => {
                    self.vel.x = Self::saturated_add(-max_speed, max_speed, self.vel.x, -accel);
                }
                Ordering::Greater => {
                    self.vel.x = Self::saturated_add(-max_speed, max_speed, self.vel.x, accel);
                }
                Ordering::Equal => self.vel.x *= friction,
            }

            // do hook
            match self.hook.state {
                HookState::Idle => {
                    self.hook.hooked_char = None;
                    self.hook.pos = self.pos;
                }
                HookState::RetractStart | HookState::RetractMid | HookState::RetractEnd => {
                    if self.hook.advance_retract() {
                        self.triggered_events |= CoreEvents::HOOK_RETRACT;
                    }
                }
                HookState::Flying => self.tick_hook_flying(pipe),
                HookState::Retracted | HookState::Grabbed => {}
            }
            if self.hook.state == HookState::Grabbed {
                self.tick_hook_grabbed(pipe);
            }
        }

        /// The nearest character that a hook moving from `from` to `to` touches.
        fn closest_hookable_character(
            &self,
            from: &vec2,
            to: &vec2,
            characters: &dyn SimulationPipeCharactersGetter,
        ) -> Option<(CharacterId, vec2)> {
            let mut closest: Option<(f64, CharacterId, vec2)> = None;
            let _ = characters.for_each_other_character(&mut |char_id, char_core| {
                if !self.can_interact_with(char_core) {
                    return ControlFlow::Continue(());
                }
                let closest_point = closest_point_on_line(from, to, &char_core.pos).unwrap_or(*from);
                if distance_squared(&char_core.pos, &closest_point)
                    < (physical_size() + HOOK_RADIUS).powi(2)
                {
                    let distance_hook = distance_squared(from, &char_core.pos);
                    if closest.map_or(true, |(closest_distance, ..)| distance_hook < closest_distance)
                    {
                        closest = Some((distance_hook, *char_id, closest_point));
                    }
                }
                ControlFlow::Continue(())
            });
            closest.map(|(_, char_id, point)| (char_id, point))
        }

        fn can_hook_characters(&self, tunings: &Tunings) -> bool {
            !self.flags.contains(CoreFlags::HOOK_HIT_DISABLED) && tunings.player_hooking > 0.0
        }

        fn tick_hook_flying(&mut self, pipe: &SimulationPipeCharacter) {
            let tunings = pipe.tunings;
            let mut new_pos = self.hook.pos + self.hook.dir * tunings.hook_fire_speed;
            if distance(&self.pos, &new_pos) > tunings.hook_length {
                self.hook.state = HookState::RetractStart;
                new_pos = self.pos + normalize(&(new_pos - self.pos)) * tunings.hook_length;
            }

            // make sure that the hook doesn't go though the ground
            let mut hit_pos = vec2::default();
            let mut before_hit = vec2::default();
            let hit =
                pipe.collision
                    .intersect_line(&self.hook.pos, &new_pos, &mut hit_pos, &mut before_hit);

            // check against other characters first
            if self.can_hook_characters(tunings) {
                if let Some((char_id, _)) =
                    self.closest_hookable_character(&self.hook.pos, &before_hit, pipe.characters)
                {
                    self.triggered_events |= CoreEvents::HOOK_ATTACH_PLAYER;
                    self.hook.state = HookState::Grabbed;
                    self.hook.hooked_char = Some(char_id);
                }
            }

            if self.hook.state == HookState::Flying {
                if hit.is_hookable() {
                    self.triggered_events |= CoreEvents::HOOK_ATTACH_GROUND;
                    self.hook.state = HookState::Grabbed;
                } else if hit.is_solid() {
                    self.triggered_events |= CoreEvents::HOOK_HIT_NOHOOK;
                    self.hook.state = HookState::RetractStart;
                }
                self.hook.pos = before_hit;
            }
        }

        fn tick_hook_grabbed(&mut self, pipe: &SimulationPipeCharacter) {
            let tunings = pipe.tunings;
            if let Some(hooked_char_id) = self.hook.hooked_char {
                match pipe.characters.get_other_character_core_by_id(&hooked_char_id) {
                    Some(char_core) => self.hook.pos = char_core.pos,
                    None => {
                        log::debug!(
                            target: "core",
                            "hooked character {hooked_char_id} no longer exists, retracting"
                        );
                        self.hook.retract();
                        return;
                    }
                }
            }

            // characters are dragged in the pairwise phase
            if self.hook.hooked_char.is_none()
                && distance_squared(&self.hook.pos, &self.pos) > HOOK_DRAG_MIN_DISTANCE.powi(2)
            {
                let mut hook_vel =
                    normalize(&(self.hook.pos - self.pos)) * tunings.hook_drag_accel;
                // the hook as more power to drag you up then down.
                // this makes it easier to get on top of an platform
                if hook_vel.y > 0.0 {
                    hook_vel.y *= 0.3;
                }

                // the hook will boost it's power if the character wants to move
                // in that direction. otherwise it will dampen everything abit
                if (hook_vel.x < 0.0 && self.direction < 0)
                    || (hook_vel.x > 0.0 && self.direction > 0)
                {
                    hook_vel.x *= 0.95;
                } else {
                    hook_vel.x *= 0.75;
                }

                let new_vel = self.vel + hook_vel;

                // check if we are under the legal limit for the hook
                if length(&new_vel) < tunings.hook_drag_speed
                    || length(&new_vel) < length(&self.vel)
                {
                    self.vel = new_vel; // no problem. apply
                }
            }

            if !self.flags.contains(CoreFlags::ENDLESS_HOOK) {
                self.hook.timer -= 1;
                if self.hook.timer <= 0 {
                    self.hook.retract();
                }
            }
        }

        /// Pushing apart close characters and the drag of a hooked character.
        ///
        /// Reads only the frozen state of this phase and returns the resulting
        /// velocity changes instead of applying them.
        pub fn physics_tick_deferred(&self, pipe: &SimulationPipeCharacter) -> DeferredImpulses {
            let tunings = pipe.tunings;
            let mut vel = self.vel;

            let _ = pipe
                .characters
                .for_each_other_character(&mut |_, char_core| {
                    if !self.can_collide_with(char_core, tunings) {
                        return ControlFlow::Continue(());
                    }

                    // handle character <-> character collision
                    let distance_sqr_pos = distance_squared(&self.pos, &char_core.pos);
                    if distance_sqr_pos > 0.0
                        && distance_sqr_pos < (physical_size() * 1.25).powi(2)
                    {
                        let dir = normalize(&(self.pos - char_core.pos));

                        let dist = distance_sqr_pos.sqrt();
                        let a = physical_size() * 1.45 - dist;
                        let mut velocity = 0.5;

                        // make sure that we don't add excess force by checking the
                        // direction against the current velocity. if not zero.
                        if length(&vel) > 0.0001 {
                            velocity = 1.0 - (dot(&normalize(&vel), &dir) + 1.0) / 2.0;
                        }

                        vel += dir * a * (velocity * 0.75);
                        vel *= 0.85;
                    }
                    ControlFlow::Continue(())
                });

            let mut hooked = None;
            if let Some(hooked_char_id) = self.hook.hooked_char() {
                let char_core = pipe
                    .characters
                    .get_other_character_core_by_id(&hooked_char_id)
                    .filter(|char_core| {
                        self.can_hook_characters(tunings) && self.can_interact_with(char_core)
                    });
                if let Some(char_core) = char_core {
                    let dist = distance(&self.pos, &char_core.pos);
                    if dist > physical_size() * 1.50 {
                        let dir = normalize(&(self.pos - char_core.pos));
                        let hook_accel = tunings.hook_drag_accel * (dist / tunings.hook_length);
                        let drag_speed = tunings.hook_drag_speed;

                        // add force to the hooked character
                        let other_vel = vec2::new(
                            Self::saturated_add(
                                -drag_speed,
                                drag_speed,
                                char_core.vel.x,
                                hook_accel * dir.x * 1.5,
                            ),
                            Self::saturated_add(
                                -drag_speed,
                                drag_speed,
                                char_core.vel.y,
                                hook_accel * dir.y * 1.5,
                            ),
                        );
                        hooked = Some((hooked_char_id, other_vel - char_core.vel));

                        // add a little bit force to the guy who has the grip
                        vel = vec2::new(
                            Self::saturated_add(
                                -drag_speed,
                                drag_speed,
                                vel.x,
                                -hook_accel * dir.x * 0.25,
                            ),
                            Self::saturated_add(
                                -drag_speed,
                                drag_speed,
                                vel.y,
                                -hook_accel * dir.y * 0.25,
                            ),
                        );
                    }
                }
            }

            DeferredImpulses {
                own: vel - self.vel,
                hooked,
            }
        }

        /// Adds the summed pairwise impulses of this tick.
        pub fn apply_deferred(&mut self, vel_change: vec2) {
            self.vel += vel_change;
            self.clamp_vel();
        }

        fn clamp_vel(&mut self) {
            // clamp the velocity to something sane
            if length(&self.vel) > MAX_VELOCITY {
                self.vel = normalize(&self.vel) * MAX_VELOCITY;
            }
        }

        /// Moves the character by its velocity through the world, stopping at
        /// walls and in front of other characters.
        pub fn physics_move(&mut self, pipe: &SimulationPipeCharacter) {
            let tunings = pipe.tunings;
            let collision = pipe.collision;
            let ramp_value = Self::velocity_ramp(
                length(&self.vel) * TICKS_PER_SECOND as f64,
                tunings.velramp_start,
                tunings.velramp_range,
                tunings.velramp_curvature,
            );

            self.vel.x *= ramp_value;

            let mut new_pos = self.pos;

            let old_vel = self.vel;
            collision.move_box(&mut new_pos, &mut self.vel, &physical_size_vec2());

            self.colliding = WallContact::None;
            if self.vel.x < 0.001 && self.vel.x > -0.001 {
                if old_vel.x > 0.0 {
                    self.colliding = WallContact::Right;
                } else if old_vel.x < 0.0 {
                    self.colliding = WallContact::Left;
                }
            } else {
                self.left_wall = true;
            }

            self.vel.x *= 1.0 / ramp_value;

            let mut final_pos = new_pos;
            if self.is_super()
                || (tunings.player_collision > 0.0
                    && !self.flags.contains(CoreFlags::COLLISION_DISABLED)
                    && !self.flags.contains(CoreFlags::SOLO))
            {
                // check character collision
                let distance_pos = distance(&self.pos, &new_pos);
                if distance_pos > 0.0 {
                    let end = distance_pos + 1.0;
                    let mut last_pos = self.pos;

                    for i in 0..end as i32 {
                        let a = i as f64 / distance_pos;
                        let pos = mix(&self.pos, &new_pos, a);
                        let blocked = pipe.characters.for_each_other_character(
                            &mut |_, char_core| {
                                if !self.can_collide_with(char_core, tunings) {
                                    return ControlFlow::Continue(());
                                }
                                let d = distance_squared(&pos, &char_core.pos);
                                if d < physical_size() * physical_size() {
                                    final_pos = if a > 0.0 {
                                        last_pos
                                    } else if distance_squared(&new_pos, &char_core.pos) > d {
                                        new_pos
                                    } else {
                                        self.pos
                                    };
                                    return ControlFlow::Break(());
                                }
                                ControlFlow::Continue(())
                            },
                        );
                        if blocked.is_break() {
                            break;
                        }
                        last_pos = pos;
                    }
                }
            }
            self.pos = final_pos;

            self.grounded = Self::is_grounded(collision, &self.pos);
            if self.grounded {
                self.refill_jumps();
            }

            self.clamp_vel();
        }

        /// Where a hook fired from the current position towards `cursor`
        /// would end up, without changing any state.
        pub fn hook_collision_line(
            &self,
            cursor: &vec2,
            pipe: &SimulationPipeCharacter,
        ) -> HookCollisionLine {
            let tunings = pipe.tunings;
            let mut color = HookCollisionLineColor::Nothing;

            let dir = if cursor.is_zero() {
                vec2::new(0.0, -1.0)
            } else {
                normalize(cursor)
            };

            let mut new_pos = self.pos + dir * physical_size() * 1.5;
            let mut finish_pos;

            loop {
                let old_pos = new_pos;
                new_pos = old_pos + dir * tunings.hook_fire_speed;

                let mut do_break = false;
                if distance(&self.pos, &new_pos) > tunings.hook_length {
                    new_pos = self.pos + normalize(&(new_pos - self.pos)) * tunings.hook_length;
                    do_break = true;
                }

                let mut hit_pos = vec2::default();
                let mut before_hit = vec2::default();
                let hit = pipe.collision.intersect_line(
                    &old_pos,
                    &new_pos,
                    &mut hit_pos,
                    &mut before_hit,
                );
                finish_pos = before_hit;

                if self.can_hook_characters(tunings) {
                    if let Some((_, pos)) =
                        self.closest_hookable_character(&old_pos, &finish_pos, pipe.characters)
                    {
                        finish_pos = pos;
                        color = HookCollisionLineColor::Player;
                        break;
                    }
                }

                if hit.is_solid() {
                    if !do_break {
                        color = if hit.is_hookable() {
                            HookCollisionLineColor::Hookable
                        } else {
                            HookCollisionLineColor::Unhookable
                        };
                    }
                    break;
                }

                if do_break || old_pos == new_pos {
                    break;
                }
            }

            HookCollisionLine {
                start: self.pos,
                end: finish_pos,
                color,
            }
        }
    }

}
