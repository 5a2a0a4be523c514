#![allow(clippy::module_inception)]

pub mod events;
pub mod types;
