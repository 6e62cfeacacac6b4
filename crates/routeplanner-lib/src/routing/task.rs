//! Background execution of route searches.
//!
//! The search itself never yields; it runs to completion on tokio's blocking
//! pool so the caller's task stays responsive. Must be called from within a
//! tokio runtime.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::task::{JoinError, JoinHandle};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::RouteNetwork;
use crate::progress::{ProgressObserver, RouteRequestHook};

use super::{find_shortest_route_with, Route, RouteRequest};

/// Handle to a route search running in the background.
///
/// Await it for the result. [`RouteTask::abort`] prevents a search that has
/// not started yet from running, and the handle then resolves to
/// [`Error::Cancelled`]. A search already running is unaffected.
#[derive(Debug)]
pub struct RouteTask {
    handle: JoinHandle<Result<Route>>,
}

impl RouteTask {
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for RouteTask {
    type Output = Result<Route>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|joined| joined.unwrap_or_else(|err| Err(join_error(err))))
    }
}

/// Start a search on the blocking pool, optionally reporting milestones to
/// `progress` and the resolved request to `hook`.
pub fn spawn_shortest_route(
    network: Arc<RouteNetwork>,
    request: RouteRequest,
    progress: Option<Arc<dyn ProgressObserver + Send + Sync>>,
    hook: Option<Arc<dyn RouteRequestHook + Send + Sync>>,
) -> RouteTask {
    debug!(from = %request.from, to = %request.to, mode = %request.mode, "spawning route search");
    let handle = tokio::task::spawn_blocking(move || {
        let observer = progress
            .as_deref()
            .map(|observer| observer as &dyn ProgressObserver);
        let hook = hook.as_deref().map(|hook| hook as &dyn RouteRequestHook);
        find_shortest_route_with(&network, &request, observer, hook)
    });
    RouteTask { handle }
}

/// Compute the shortest route on the blocking pool.
pub async fn find_shortest_route_async(
    network: Arc<RouteNetwork>,
    request: RouteRequest,
) -> Result<Route> {
    spawn_shortest_route(network, request, None, None).await
}

fn join_error(err: JoinError) -> Error {
    if err.is_cancelled() {
        Error::Cancelled
    } else {
        Error::TaskJoin {
            message: err.to_string(),
        }
    }
}
