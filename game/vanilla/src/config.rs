use anyhow::anyhow;
use config::{ConfigInterface, ConfigValueRange};
use serde::{Deserialize, Serialize};

use crate::collision::collision::Tunings;

const MAX_CHARACTERS_MIN: usize = 1;
const MAX_CHARACTERS_MAX: usize = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigVanilla {
    /// The amount of character slots.
    pub max_characters: usize,
    pub tunings: Tunings,
    /// Tune commands applied on top of `tunings` when the game is created,
    /// e.g. `["gravity", "0.25"]`.
    pub tune_overrides: Vec<(String, String)>,
}

impl Default for ConfigVanilla {
    fn default() -> Self {
        Self {
            max_characters: 64,
            tunings: Tunings::default(),
            tune_overrides: Vec::new(),
        }
    }
}

impl ConfigInterface for ConfigVanilla {
    fn conf_ranges() -> Vec<ConfigValueRange> {
        vec![ConfigValueRange {
            path: "max_characters",
            min: MAX_CHARACTERS_MIN as f64,
            max: MAX_CHARACTERS_MAX as f64,
        }]
    }
}

impl ConfigVanilla {
    /// Checks values that deserialization alone can't.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(MAX_CHARACTERS_MIN..=MAX_CHARACTERS_MAX).contains(&self.max_characters) {
            return Err(anyhow!(
                "max_characters must be in range [{MAX_CHARACTERS_MIN}, {MAX_CHARACTERS_MAX}], got {}",
                self.max_characters
            ));
        }
        Ok(())
    }

    /// The configured tunings with all tune overrides applied.
    ///
    /// Overrides that fail are skipped.
    pub fn effective_tunings(&self) -> Tunings {
        let mut tunings = self.tunings;
        for (name, val) in &self.tune_overrides {
            if let Err(err) = tunings.try_set_from_str(name, val) {
                log::info!(target: "tunes", "failed to apply tune {name} {val}: {err}");
            }
        }
        tunings
    }
}
