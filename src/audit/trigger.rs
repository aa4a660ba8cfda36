//! Flush Trigger Module
//!
//! Two independent trigger sources feed the same guarded flush function:
//! - Threshold: buffer length reached the submission limit
//! - Timeout: the periodic timer fired while the buffer was non-empty
//!
//! A trigger that finds a flush already running is a no-op; the next
//! trigger catches any remaining backlog.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushTrigger {
    Threshold,
    Timeout,
}

impl fmt::Display for FlushTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlushTrigger::Threshold => write!(f, "threshold"),
            FlushTrigger::Timeout => write!(f, "timeout"),
        }
    }
}
