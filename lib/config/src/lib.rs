pub mod traits;

pub use traits::{ConfigFromStrErr, ConfigInterface, ConfigValueRange};
