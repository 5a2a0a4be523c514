pub mod collision {
    use anyhow::anyhow;
    use config::{ConfigInterface, ConfigValueRange};
    use num::FromPrimitive;
    use num_derive::FromPrimitive;
    use serde::{Deserialize, Serialize};

    use math::math::{distance, mix, vector::vec2};

    use crate::state::state::TICKS_PER_SECOND;

    /// The physics constants of a world.
    ///
    /// Speeds and accelerations are in units per tick, durations in seconds.
    #[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Tunings {
        pub ground_control_speed: f64,
        pub ground_control_accel: f64,
        pub ground_friction: f64,
        pub ground_jump_impulse: f64,
        pub air_jump_impulse: f64,
        pub air_control_speed: f64,
        pub air_control_accel: f64,
        pub air_friction: f64,
        pub hook_length: f64,
        pub hook_fire_speed: f64,
        pub hook_drag_accel: f64,
        pub hook_drag_speed: f64,
        pub gravity: f64,
        pub velramp_start: f64,
        pub velramp_range: f64,
        pub velramp_curvature: f64,
        pub player_collision: f64,
        pub player_hooking: f64,
        pub hook_duration: f64,
    }

    impl Default for Tunings {
        fn default() -> Self {
            Self {
                ground_control_speed: 10.0,
                ground_control_accel: 100.0 / TICKS_PER_SECOND as f64,
                ground_friction: 0.5,
                ground_jump_impulse: 13.2,
                air_jump_impulse: 12.0,
                air_control_speed: 250.0 / TICKS_PER_SECOND as f64,
                air_control_accel: 1.5,
                air_friction: 0.95,
                hook_length: 380.0,
                hook_fire_speed: 80.0,
                hook_drag_accel: 3.0,
                hook_drag_speed: 15.0,
                gravity: 0.5,
                velramp_start: 550.0,
                velramp_range: 2000.0,
                velramp_curvature: 1.4,
                player_collision: 1.0,
                player_hooking: 1.0,
                hook_duration: 1.25,
            }
        }
    }

    impl ConfigInterface for Tunings {
        fn conf_ranges() -> Vec<ConfigValueRange> {
            let non_negative = |path| ConfigValueRange {
                path,
                min: 0.0,
                max: f64::MAX,
            };
            vec![
                non_negative("ground_control_speed"),
                non_negative("ground_control_accel"),
                non_negative("air_control_speed"),
                non_negative("air_control_accel"),
                non_negative("hook_length"),
                non_negative("hook_fire_speed"),
                non_negative("hook_drag_accel"),
                non_negative("hook_drag_speed"),
                non_negative("hook_duration"),
                ConfigValueRange {
                    path: "ground_friction",
                    min: 0.0,
                    max: 1.0,
                },
                ConfigValueRange {
                    path: "air_friction",
                    min: 0.0,
                    max: 1.0,
                },
                // both are used as divisor/base of the velocity ramp
                ConfigValueRange {
                    path: "velramp_range",
                    min: f64::MIN_POSITIVE,
                    max: f64::MAX,
                },
                ConfigValueRange {
                    path: "velramp_curvature",
                    min: f64::MIN_POSITIVE,
                    max: f64::MAX,
                },
            ]
        }
    }

    /// What a single tile does to characters and hooks.
    #[derive(
        Debug,
        Default,
        Clone,
        Copy,
        PartialEq,
        Eq,
        Hash,
        FromPrimitive,
        Serialize,
        Deserialize,
    )]
    #[repr(u8)]
    pub enum TileClassification {
        #[default]
        Air = 0,
        Solid = 1,
        Death = 2,
        /// Blocks movement like [`TileClassification::Solid`], but hooks can't attach.
        NoHook = 3,
    }

    impl TileClassification {
        pub fn is_solid(&self) -> bool {
            matches!(self, Self::Solid | Self::NoHook)
        }

        pub fn is_hookable(&self) -> bool {
            matches!(self, Self::Solid)
        }
    }

    /// Upper bound of the sweep steps of [`CollisionQuery::move_box`].
    pub const MAX_MOVE_BOX_STEPS: u64 = 100_000;

    /// Geometric queries against a world.
    ///
    /// Only [`CollisionQuery::tile_at`] is required, everything else is
    /// derived from it.
    pub trait CollisionQuery {
        /// Classification of the tile containing `pos`.
        fn tile_at(&self, pos: &vec2) -> TileClassification;

        fn is_solid(&self, pos: &vec2) -> bool {
            self.tile_at(pos).is_solid()
        }

        fn is_death(&self, pos: &vec2) -> bool {
            self.tile_at(pos) == TileClassification::Death
        }

        /// Whether any corner of the rectangle is solid.
        fn collide_rect(&self, top_left: &vec2, size: &vec2) -> bool {
            self.is_solid(top_left)
                || self.is_solid(&vec2::new(top_left.x + size.x, top_left.y))
                || self.is_solid(&vec2::new(top_left.x, top_left.y + size.y))
                || self.is_solid(&(*top_left + *size))
        }

        /// Like [`CollisionQuery::collide_rect`] for a box around `pos`.
        fn test_box(&self, pos: &vec2, size: &vec2) -> bool {
            self.collide_rect(&(*pos - *size / 2.0), size)
        }

        /// Sweeps a box of `size` centered on `in_out_pos` by `in_out_vel`.
        ///
        /// The sweep is split into steps of at most one unit per axis, x is
        /// tried before y in every step. An axis that hits something stays
        /// blocked for the rest of the sweep and its velocity is zeroed.
        ///
        /// The step count is capped at [`MAX_MOVE_BOX_STEPS`], velocities above
        /// that many units per tick may skip thin walls.
        fn move_box(&self, in_out_pos: &mut vec2, in_out_vel: &mut vec2, size: &vec2) {
            let vel = *in_out_vel;
            if !vel.x.is_finite() || !vel.y.is_finite() {
                *in_out_vel = vec2::default();
                return;
            }

            let steps = vel
                .x
                .abs()
                .max(vel.y.abs())
                .floor()
                .clamp(1.0, MAX_MOVE_BOX_STEPS as f64) as u64;
            let fraction = vel / steps as f64;

            let mut pos = *in_out_pos;
            let mut blocked_x = false;
            let mut blocked_y = false;
            for _ in 0..steps {
                if !blocked_x && fraction.x != 0.0 {
                    let new_pos = vec2::new(pos.x + fraction.x, pos.y);
                    if self.test_box(&new_pos, size) {
                        blocked_x = true;
                    } else {
                        pos = new_pos;
                    }
                }
                if !blocked_y && fraction.y != 0.0 {
                    let new_pos = vec2::new(pos.x, pos.y + fraction.y);
                    if self.test_box(&new_pos, size) {
                        blocked_y = true;
                    } else {
                        pos = new_pos;
                    }
                }

                if (blocked_x || fraction.x == 0.0) && (blocked_y || fraction.y == 0.0) {
                    break;
                }
            }

            if blocked_x {
                in_out_vel.x = 0.0;
            }
            if blocked_y {
                in_out_vel.y = 0.0;
            }
            *in_out_pos = pos;
        }

        /// Walks from `pos_0` to `pos_1` in steps of at most one unit and
        /// stops at the first solid sample.
        ///
        /// Returns the tile that was hit, [`TileClassification::Air`] if the
        /// line is free. In that case both out positions are `pos_1`.
        fn intersect_line(
            &self,
            pos_0: &vec2,
            pos_1: &vec2,
            out_collision: &mut vec2,
            out_before_collision: &mut vec2,
        ) -> TileClassification {
            let d = distance(pos_0, pos_1);
            let end = (d + 1.0) as i32;
            let mut last_pos = *pos_0;
            for i in 0..=end {
                let a = i as f64 / end as f64;
                let pos = mix(pos_0, pos_1, a);
                let tile = self.tile_at(&pos);
                if tile.is_solid() {
                    *out_collision = pos;
                    *out_before_collision = last_pos;
                    return tile;
                }
                last_pos = pos;
            }
            *out_collision = *pos_1;
            *out_before_collision = *pos_1;
            TileClassification::Air
        }
    }

    /// A rectangular grid of tiles.
    ///
    /// Everything outside of the grid counts as solid.
    #[derive(Debug, Clone)]
    pub struct Collision {
        tiles: Vec<TileClassification>,
        width: u32,
        height: u32,
        tile_size: f64,
    }

    impl Collision {
        pub fn new(
            width: u32,
            height: u32,
            tile_size: f64,
            tiles: Vec<TileClassification>,
        ) -> anyhow::Result<Self> {
            if width == 0 || height == 0 {
                return Err(anyhow!("the playfield must not be empty"));
            }
            if !(tile_size.is_finite() && tile_size > 0.0) {
                return Err(anyhow!("tile size must be positive, got {tile_size}"));
            }
            let expected = width as usize * height as usize;
            if tiles.len() != expected {
                return Err(anyhow!(
                    "expected {expected} tiles for a {width}x{height} playfield, got {}",
                    tiles.len()
                ));
            }
            Ok(Self {
                tiles,
                width,
                height,
                tile_size,
            })
        }

        /// Builds the grid from raw tile indices, unknown indices become air.
        pub fn from_indices(
            width: u32,
            height: u32,
            tile_size: f64,
            indices: &[u8],
        ) -> anyhow::Result<Self> {
            let mut unknown = 0;
            let tiles = indices
                .iter()
                .map(|&index| {
                    TileClassification::from_u8(index).unwrap_or_else(|| {
                        unknown += 1;
                        TileClassification::Air
                    })
                })
                .collect();
            if unknown > 0 {
                log::warn!(target: "collision", "{unknown} unknown tile indices were treated as air");
            }
            Self::new(width, height, tile_size, tiles)
        }

        /// Builds the grid from text rows.
        ///
        /// `#` is solid, `x` is death, `n` is unhookable, everything else is air.
        /// Shorter rows are padded with air.
        pub fn from_ascii<S: AsRef<str>>(tile_size: f64, rows: &[S]) -> anyhow::Result<Self> {
            let width = rows
                .iter()
                .map(|row| row.as_ref().chars().count())
                .max()
                .unwrap_or_default();
            let mut tiles = Vec::with_capacity(width * rows.len());
            for row in rows {
                let row = row.as_ref();
                tiles.extend(row.chars().map(|c| match c {
                    '#' => TileClassification::Solid,
                    'x' | 'X' => TileClassification::Death,
                    'n' | 'N' => TileClassification::NoHook,
                    _ => TileClassification::Air,
                }));
                tiles.extend(
                    std::iter::repeat(TileClassification::Air).take(width - row.chars().count()),
                );
            }
            Self::new(
                u32::try_from(width)?,
                u32::try_from(rows.len())?,
                tile_size,
                tiles,
            )
        }

        pub fn get_playfield_width(&self) -> u32 {
            self.width
        }

        pub fn get_playfield_height(&self) -> u32 {
            self.height
        }

        pub fn tile_size(&self) -> f64 {
            self.tile_size
        }

        /// Tile at grid coordinates, [`TileClassification::Solid`] outside the grid.
        pub fn get_tile(&self, x: i64, y: i64) -> TileClassification {
            if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
                return TileClassification::Solid;
            }
            self.tiles[self.tile_index(x as usize, y as usize)]
        }

        fn tile_index(&self, x: usize, y: usize) -> usize {
            y * self.width as usize + x
        }
    }

    impl CollisionQuery for Collision {
        fn tile_at(&self, pos: &vec2) -> TileClassification {
            let x = (pos.x / self.tile_size).floor();
            let y = (pos.y / self.tile_size).floor();
            if !x.is_finite() || !y.is_finite() {
                return TileClassification::Solid;
            }
            self.get_tile(x as i64, y as i64)
        }
    }

    /// A world without any tiles, nothing is ever solid.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct NoCollision;

    impl CollisionQuery for NoCollision {
        fn tile_at(&self, _pos: &vec2) -> TileClassification {
            TileClassification::Air
        }
    }

}
