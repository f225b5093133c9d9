pub mod config;
pub mod errors;
pub mod frame;
pub mod generator;
pub mod rig;
pub mod script;
