pub mod config;
pub mod controller;
pub mod effects;
pub mod prompt;

pub use config::{CartConfig, Messages};
pub use controller::CartController;
pub use effects::EffectTimeline;
pub use prompt::{FnPrompter, Prompter, ScriptedPrompter};
