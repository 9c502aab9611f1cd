//! Command handlers, one module per subcommand.
//!
//! Handlers translate parsed arguments into core service calls and render
//! the results. No patching logic lives here.

pub mod completions;
pub mod config;
pub mod deps;
pub mod init;
pub mod list;
pub mod permissions;
pub mod scaffold;
pub mod setup;

mod support;
