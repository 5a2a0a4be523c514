use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigFromStrErr {
    #[error("no config value named `{0}`")]
    PathNotFound(String),
    #[error("`{val}` is not a valid value for `{path}`: {err}")]
    InvalidValue {
        path: String,
        val: String,
        err: String,
    },
    #[error("`{path}` must be in range [{min}, {max}], got {val}")]
    OutOfRange {
        path: String,
        val: f64,
        min: f64,
        max: f64,
    },
}

/// Allowed numeric range of a single config value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigValueRange {
    pub path: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Assign config values by their (dot separated) name, e.g. from a console
/// command or a map's tune list.
///
/// Values are parsed as JSON first and fall back to a plain string, so
/// `gravity 0.25`, `enabled true` and `name foo` all work.
pub trait ConfigInterface: Serialize + DeserializeOwned {
    /// Ranges that [`ConfigInterface::try_set_from_str`] validates against.
    fn conf_ranges() -> Vec<ConfigValueRange> {
        Vec::new()
    }

    /// All leaf value names of this config.
    fn conf_paths(&self) -> Vec<String> {
        fn collect(prefix: &str, val: &Value, out: &mut Vec<String>) {
            match val {
                Value::Object(map) => {
                    for (name, val) in map {
                        let path = if prefix.is_empty() {
                            name.clone()
                        } else {
                            format!("{prefix}.{name}")
                        };
                        collect(&path, val, out);
                    }
                }
                _ => out.push(prefix.to_string()),
            }
        }

        let mut res = Vec::new();
        if let Ok(val) = serde_json::to_value(self) {
            collect("", &val, &mut res);
        }
        res
    }

    fn try_get_str(&self, path: &str) -> Result<String, ConfigFromStrErr> {
        let json = serde_json::to_value(self).map_err(|err| ConfigFromStrErr::InvalidValue {
            path: path.to_string(),
            val: String::new(),
            err: err.to_string(),
        })?;
        let val = path
            .split('.')
            .try_fold(&json, |cur, name| cur.get(name))
            .ok_or_else(|| ConfigFromStrErr::PathNotFound(path.to_string()))?;
        Ok(match val {
            Value::String(s) => s.clone(),
            val => val.to_string(),
        })
    }

    fn try_set_from_str(&mut self, path: &str, val: &str) -> Result<(), ConfigFromStrErr> {
        let invalid = |err: String| ConfigFromStrErr::InvalidValue {
            path: path.to_string(),
            val: val.to_string(),
            err,
        };

        let mut json = serde_json::to_value(&*self).map_err(|err| invalid(err.to_string()))?;
        let entry = path
            .split('.')
            .try_fold(&mut json, |cur, name| cur.get_mut(name))
            .ok_or_else(|| ConfigFromStrErr::PathNotFound(path.to_string()))?;

        let new_val: Value =
            serde_json::from_str(val.trim()).unwrap_or_else(|_| Value::String(val.to_string()));

        if let Some(num) = new_val.as_f64() {
            if let Some(range) = Self::conf_ranges().into_iter().find(|r| r.path == path) {
                if num < range.min || num > range.max {
                    return Err(ConfigFromStrErr::OutOfRange {
                        path: path.to_string(),
                        val: num,
                        min: range.min,
                        max: range.max,
                    });
                }
            }
        }

        *entry = new_val;
        *self = serde_json::from_value(json).map_err(|err| invalid(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use serde::{Deserialize, Serialize};

    use super::{ConfigFromStrErr, ConfigInterface, ConfigValueRange};

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Inner {
        speed: f64,
    }

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Conf {
        count: u32,
        enabled: bool,
        inner: Inner,
    }

    impl ConfigInterface for Conf {
        fn conf_ranges() -> Vec<ConfigValueRange> {
            vec![ConfigValueRange {
                path: "count",
                min: 1.0,
                max: 10.0,
            }]
        }
    }

    #[test]
    fn set_and_get() {
        let mut conf = Conf::default();
        conf.try_set_from_str("count", "5").unwrap();
        conf.try_set_from_str("enabled", "true").unwrap();
        conf.try_set_from_str("inner.speed", "2.5").unwrap();
        assert_eq!(
            conf,
            Conf {
                count: 5,
                enabled: true,
                inner: Inner { speed: 2.5 }
            }
        );
        assert_eq!(conf.try_get_str("inner.speed").unwrap(), "2.5");

        let mut paths = conf.conf_paths();
        paths.sort();
        assert_eq!(paths, vec!["count", "enabled", "inner.speed"]);
    }

    #[test]
    fn errors() {
        let mut conf = Conf::default();
        assert_eq!(
            conf.try_set_from_str("nope", "1"),
            Err(ConfigFromStrErr::PathNotFound("nope".into()))
        );
        assert!(matches!(
            conf.try_set_from_str("count", "20"),
            Err(ConfigFromStrErr::OutOfRange { .. })
        ));
        assert!(matches!(
            conf.try_set_from_str("inner.speed", "fast"),
            Err(ConfigFromStrErr::InvalidValue { .. })
        ));
        // failed assignments leave the config untouched
        assert_eq!(conf, Conf::default());
    }
}
