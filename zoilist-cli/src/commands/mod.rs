//! CLI command implementations

pub mod notify;
pub mod remind;

pub use notify::NotifyArgs;
pub use remind::RemindArgs;
