//! Observers a route search reports to.
//!
//! Both observers are passed explicitly to the search; nothing here is global.
//! [`ProgressObserver`] receives human-readable milestone messages while
//! [`RouteRequestHook`] is told about the request itself once both endpoints
//! are known and before any relaxation happens.

use std::fmt;

use crate::city::City;
use crate::link::TransportMode;

/// Fixed checkpoints of a route search, in the order they are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Milestone {
    EndpointsResolved,
    RelevantCitiesComputed,
    RelaxationComplete,
    CitiesExtracted,
    LinksFinalised,
}

impl Milestone {
    pub const ALL: [Milestone; 5] = [
        Milestone::EndpointsResolved,
        Milestone::RelevantCitiesComputed,
        Milestone::RelaxationComplete,
        Milestone::CitiesExtracted,
        Milestone::LinksFinalised,
    ];

    pub fn message(self) -> &'static str {
        match self {
            Milestone::EndpointsResolved => "find cities by name - done",
            Milestone::RelevantCitiesComputed => "find cities between endpoints - done",
            Milestone::RelaxationComplete => "route calculation - done",
            Milestone::CitiesExtracted => "gather cities on route - done",
            Milestone::LinksFinalised => "find path - done",
        }
    }
}

impl fmt::Display for Milestone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives milestone messages during a search.
pub trait ProgressObserver {
    fn report(&self, message: &str);
}

impl<F> ProgressObserver for F
where
    F: Fn(&str),
{
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Forward milestones to an async consumer. A closed receiver is ignored.
#[cfg(feature = "async")]
impl ProgressObserver for tokio::sync::mpsc::UnboundedSender<String> {
    fn report(&self, message: &str) {
        let _ = self.send(message.to_string());
    }
}

/// Notified when a route between two resolved cities has been requested.
pub trait RouteRequestHook {
    fn on_route_requested(&self, from: &City, to: &City, mode: TransportMode);
}

impl<F> RouteRequestHook for F
where
    F: Fn(&City, &City, TransportMode),
{
    fn on_route_requested(&self, from: &City, to: &City, mode: TransportMode) {
        self(from, to, mode)
    }
}

pub(crate) fn report(observer: Option<&dyn ProgressObserver>, milestone: Milestone) {
    tracing::debug!(milestone = %milestone, "route search progress");
    if let Some(observer) = observer {
        observer.report(milestone.message());
    }
}
