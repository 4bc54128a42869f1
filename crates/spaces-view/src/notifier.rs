//! How controllers talk back to the person using them.

use spaces_core::error::{AppError, ErrorKind};

/// Blocking alerts and yes/no confirmations.
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Show a message and wait for it to be acknowledged.
    fn alert(&self, message: &str);

    /// Ask a yes/no question. `false` cancels the action.
    fn confirm(&self, prompt: &str) -> bool;
}

/// The message to show for a failed request: the `error` field of the
/// gateway's JSON body when there is one, `fallback` otherwise.
pub fn failure_message(err: &AppError, fallback: &str) -> String {
    if err.kind != ErrorKind::Upstream {
        return fallback.to_string();
    }

    err.upstream
        .as_ref()
        .and_then(|reply| serde_json::from_slice::<serde_json::Value>(&reply.body).ok())
        .and_then(|body| {
            body.get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string)
        })
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
