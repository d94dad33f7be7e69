//! Coded logging for the Planer toolkit
//!
//! Every event carries a [`Code`] whose metadata explains the failure to the
//! user. Events are forwarded to the `log` facade; the binary decides which
//! backend receives them.

pub mod codes;
pub mod events;
pub mod macros;

pub use codes::Code;
pub use events::{LogEvent, LogLevel};

/// Log target shared by every event
pub const TARGET: &str = "planer";

/// Forward an event to the `log` facade
pub fn emit(event: LogEvent) {
    log::log!(target: TARGET, event.level.into(), "{}", event.format());
}

/// Whether debug events would be recorded (used by `log_debug!`)
pub fn debug_enabled() -> bool {
    log::log_enabled!(target: TARGET, log::Level::Debug)
}

/// Build an event from a code, message and context pairs
pub fn event_with_context(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(event_with_context(LogEvent::error(code, message), context));
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    emit(event_with_context(LogEvent::success(code, message), context));
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(event_with_context(LogEvent::info(message), context));
}

pub fn log_warning_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(event_with_context(LogEvent::warning(message), context));
}

pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    emit(event_with_context(LogEvent::debug(message), context));
}
