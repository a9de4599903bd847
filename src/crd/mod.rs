//! Custom Resource Definitions and API types
//!
//! - UIPlugin: observability console plugin declaration
//! - Condition: status conditions stored on a UIPlugin
//! - ConsolePluginProxy: proxy routes handed to the console

pub mod condition;
pub mod console;
pub mod ui_plugin;

pub use condition::*;
pub use console::*;
pub use ui_plugin::*;
