use math::math::vector::vec2;
use serde::{Deserialize, Serialize};

/// The input of a single character for a single tick.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterInput {
    /// Wanted walking direction, `-1` left, `1` right, `0` none.
    pub dir: i32,
    /// Aim target relative to the character.
    pub cursor: vec2,
    pub jump: bool,
    pub hook: bool,
    pub fire: bool,
}

impl Default for CharacterInput {
    fn default() -> Self {
        Self {
            dir: 0,
            // never both 0
            cursor: vec2::new(0.0, -1.0),
            jump: false,
            hook: false,
            fire: false,
        }
    }
}

impl CharacterInput {
    /// The walking direction clamped to `-1..=1`.
    pub fn direction(&self) -> i32 {
        self.dir.signum()
    }

    /// The aim target, a zero cursor falls back to aiming upwards.
    pub fn aim(&self) -> vec2 {
        if self.cursor.is_zero() {
            vec2::new(0.0, -1.0)
        } else {
            self.cursor
        }
    }

    /// Normalized aim direction.
    pub fn aim_dir(&self) -> vec2 {
        self.aim().normalize()
    }
}

#[cfg(test)]
mod test {
    use math::math::vector::vec2;

    use super::CharacterInput;

    #[test]
    fn sanitized_values() {
        let inp = CharacterInput {
            dir: 7,
            cursor: vec2::default(),
            ..Default::default()
        };
        assert_eq!(inp.direction(), 1);
        assert_eq!(inp.aim(), vec2::new(0.0, -1.0));

        let inp = CharacterInput {
            dir: -3,
            cursor: vec2::new(10.0, 0.0),
            ..Default::default()
        };
        assert_eq!(inp.direction(), -1);
        assert_eq!(inp.aim_dir(), vec2::new(1.0, 0.0));
    }
}
