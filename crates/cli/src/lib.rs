//! Console front end for the shop simulation: environment configuration,
//! decision collectors, and the day report.

pub mod config;
pub mod console;
pub mod render;
pub mod scripted;

pub use config::{ConfigError, RunConfig};
pub use console::{ConsoleDecisions, InputError, SharedInput};
pub use render::ConsoleReport;
pub use scripted::{ScriptError, ScriptedDecisions};
