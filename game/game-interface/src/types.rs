pub mod id_types;
pub mod input;
pub mod render;
