// src/notifier.rs

use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
    Info,
    Warning,
}

/// Fire-and-forget alert channel towards the operator.
///
/// The engine never consumes a return value: delivery failures are the
/// collaborator's problem, the draft must stay usable either way.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: AlertKind, message: &str);
}

/// Default collaborator: routes alerts into the log stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: AlertKind, message: &str) {
        match kind {
            AlertKind::Success | AlertKind::Info => info!("{}", message),
            AlertKind::Warning => warn!("{}", message),
            AlertKind::Error => error!("{}", message),
        }
    }
}
