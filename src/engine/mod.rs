pub mod arena;
pub mod models;
pub mod presets;
pub mod simulator;
pub mod strategy;
