pub mod actions;
pub mod common;
pub mod quartiles;
pub mod segment;
