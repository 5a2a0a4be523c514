#![allow(clippy::module_inception)]

pub mod collision;
pub mod config;
pub mod entities;
pub mod simulation_pipe;
pub mod snapshot;
pub mod state;
pub mod world;
