//! The five node kinds a scene is built from.

pub mod button;
pub mod container;
pub mod slider;
pub mod surface;
pub mod text;
