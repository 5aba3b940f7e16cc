//! Hook contract the adapters plug into.
//!
//! Each subsystem exposes a struct of optional callback slots. A slot left
//! as `None` is never invoked. Start callbacks return the completion
//! closure for the same operation; streaming operations have an
//! intermediate stage in between that may fire several times.

use std::fmt;

pub mod details;
pub mod discovery;
pub mod driver;
pub mod error;
pub mod retry;
pub mod scripting;
pub mod sql;
pub mod table;
pub mod topic;

pub use details::{Detailer, Details};
pub use discovery::Discovery;
pub use driver::Driver;
pub use error::{DriverError, RetryMode};
pub use retry::Retry;
pub use scripting::Scripting;
pub use sql::DatabaseSql;
pub use table::Table;
pub use topic::Topic;

/// Completion callback of one operation.
pub type OnDone<D> = Box<dyn FnOnce(D) + Send>;

/// Start callback of a two-stage operation.
pub type OnStart<S, D> = Box<dyn Fn(S) -> OnDone<D> + Send + Sync>;

/// Intermediate callback of a three-stage operation. Each call hands back
/// the completion callback to use if the operation ends after it.
pub type OnIntermediate<I, D> = Box<dyn FnMut(I) -> OnDone<D> + Send>;

/// Start callback of a three-stage operation.
pub type OnStartStream<S, I, D> = Box<dyn Fn(S) -> OnIntermediate<I, D> + Send + Sync>;

/// Fire-and-forget event.
pub type OnEvent<E> = Box<dyn Fn(E) + Send + Sync>;

/// Invoke a start slot, returning a completion closure that is a no-op
/// when the slot is unset.
pub fn start<S, D: 'static>(hook: &Option<OnStart<S, D>>, info: S) -> OnDone<D> {
    match hook {
        Some(hook) => hook(info),
        None => Box::new(|_: D| {}),
    }
}

pub fn start_stream<S, I: 'static, D: 'static>(
    hook: &Option<OnStartStream<S, I, D>>,
    info: S,
) -> OnIntermediate<I, D> {
    match hook {
        Some(hook) => hook(info),
        None => Box::new(|_: I| -> OnDone<D> { Box::new(|_: D| {}) }),
    }
}

pub fn event<E>(hook: &Option<OnEvent<E>>, info: E) {
    if let Some(hook) = hook {
        hook(info);
    }
}

/// A database node as seen by the driver.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    pub node_id: u32,
    pub address: String,
    pub location: String,
    /// Node lives in the client's data center.
    pub local_dc: bool,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        if !self.location.is_empty() {
            write!(f, "@{}", self.location)?;
        }
        if self.local_dc {
            f.write_str(" (local)")?;
        }
        Ok(())
    }
}

/// Connection or endpoint state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnState {
    #[default]
    Unknown,
    Created,
    Online,
    Banned,
    Offline,
    Destroyed,
}

impl fmt::Display for ConnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConnState::Unknown => "unknown",
            ConnState::Created => "created",
            ConnState::Online => "online",
            ConnState::Banned => "banned",
            ConnState::Offline => "offline",
            ConnState::Destroyed => "destroyed",
        })
    }
}

/// Server-side session handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn unset_slots_are_no_ops() {
        let hook: Option<OnStart<u32, u32>> = None;
        start(&hook, 1)(2);

        let stream: Option<OnStartStream<(), (), ()>> = None;
        let mut intermediate = start_stream(&stream, ());
        intermediate(())(());

        event(&None::<OnEvent<&str>>, "ignored");
    }

    #[test]
    fn set_slot_sees_start_and_done() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let hook: Option<OnStart<usize, usize>> = Some(Box::new(move |a| {
            let seen = seen.clone();
            Box::new(move |b| {
                seen.fetch_add(a + b, Ordering::SeqCst);
            })
        }));

        start(&hook, 2)(3);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn endpoint_display() {
        let e = Endpoint { node_id: 1, address: "n1:2135".into(), location: "vla".into(), local_dc: true };
        assert_eq!(e.to_string(), "n1:2135@vla (local)");
    }
}
