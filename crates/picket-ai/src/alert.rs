//! "Under attack" alert propagation.
//!
//! A [`Subject`] keeps an ordered registry of observer ids. It never owns
//! the observers: `notify` resolves each id through an [`ObserverDirectory`]
//! at call time. Fan-out is synchronous and in registration order.
//!
//! Failures are isolated per observer. An id that does not resolve, or an
//! observer that rejects the alert, is logged and reported, and delivery
//! continues with the next entry.

use picket_core::types::AgentId;
use thiserror::Error;

/// Payload delivered to every observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    /// The agent that was attacked.
    pub source: AgentId,
    /// Tick on which the attack landed.
    pub tick: u64,
}

/// Why one delivery failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlertError {
    #[error("{0} does not resolve to an observer")]
    UnknownObserver(AgentId),
    #[error("{0} is not active")]
    Inactive(AgentId),
}

/// Anything that reacts to an alert.
pub trait AlertObserver {
    fn on_alert(&mut self, alert: &Alert) -> Result<(), AlertError>;
}

/// Resolves registry ids to live observers.
pub trait ObserverDirectory {
    fn observer_mut(&mut self, id: AgentId) -> Option<&mut dyn AlertObserver>;
}

/// A slice of observers resolves ids by index.
impl<O: AlertObserver> ObserverDirectory for [O] {
    fn observer_mut(&mut self, id: AgentId) -> Option<&mut dyn AlertObserver> {
        self.get_mut(id.index())
            .map(|observer| observer as &mut dyn AlertObserver)
    }
}

/// Outcome of one `notify` pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyReport {
    /// Observers that accepted the alert, in delivery order.
    pub delivered: Vec<AgentId>,
    /// Observers that could not take it, in delivery order.
    pub rejected: Vec<(AgentId, AlertError)>,
}

/// Ordered, append-only registry of observers.
#[derive(Debug, Clone, Default)]
pub struct Subject {
    observers: Vec<AgentId>,
}

impl Subject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id`. Attaching the same id twice makes it receive every
    /// alert twice.
    pub fn attach(&mut self, id: AgentId) {
        self.observers.push(id);
    }

    /// Append `id` unless it is already registered. Returns whether it was
    /// added.
    pub fn attach_unique(&mut self, id: AgentId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.observers.push(id);
        true
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.observers.contains(&id)
    }

    /// Registered ids in registration order.
    pub fn observers(&self) -> &[AgentId] {
        &self.observers
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `alert` to every registry entry, in order, once per entry.
    pub fn notify<D>(&self, directory: &mut D, alert: &Alert) -> NotifyReport
    where
        D: ObserverDirectory + ?Sized,
    {
        let mut report = NotifyReport::default();
        for &id in &self.observers {
            let result = match directory.observer_mut(id) {
                Some(observer) => observer.on_alert(alert),
                None => Err(AlertError::UnknownObserver(id)),
            };
            match result {
                Ok(()) => report.delivered.push(id),
                Err(err) => {
                    log::warn!("alert from {} not delivered: {err}", alert.source);
                    report.rejected.push((id, err));
                }
            }
        }
        report
    }
}

/// Broadcast channel owned by the simulation root. Agents subscribe once;
/// any agent publishing reaches every subscriber, itself included.
#[derive(Debug, Clone, Default)]
pub struct AlertBus {
    subject: Subject,
}

impl AlertBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `id`. One subscription per agent; returns `false` if it was
    /// already subscribed.
    pub fn subscribe(&mut self, id: AgentId) -> bool {
        self.subject.attach_unique(id)
    }

    pub fn subscribers(&self) -> &[AgentId] {
        self.subject.observers()
    }

    pub fn publish<D>(&self, directory: &mut D, alert: &Alert) -> NotifyReport
    where
        D: ObserverDirectory + ?Sized,
    {
        log::info!(
            "{} under attack on tick {}, alerting {} subscribers",
            alert.source,
            alert.tick,
            self.subject.len()
        );
        self.subject.notify(directory, alert)
    }
}
