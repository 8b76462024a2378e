/// Main configuration module.
///
/// Re-exports submodules for arena and chat configuration.
pub mod arena;
pub mod chat;
