pub mod config;
pub mod error;
pub mod types;

pub use config::SkillConfig;
pub use error::{HangukError, Result};
pub use types::*;
