mod common;

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use routeplanner_lib::{
    find_shortest_route, find_shortest_route_async, spawn_shortest_route, City, Error, Milestone,
    RouteRequest, RouteRequestHook, TransportMode,
};

use common::diamond;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_search_matches_blocking_search() {
    let network = Arc::new(diamond());
    let request = RouteRequest::new("A", "D", TransportMode::Car);

    let expected = find_shortest_route(&network, &request).unwrap();
    let route = find_shortest_route_async(Arc::clone(&network), request)
        .await
        .expect("route exists");
    assert_eq!(route, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn async_search_propagates_errors() {
    let network = Arc::new(diamond());
    let err = find_shortest_route_async(network, RouteRequest::new("A", "Q", TransportMode::Car))
        .await
        .unwrap_err();
    assert!(err.is_unknown_city());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn progress_streams_through_channel() {
    let network = Arc::new(diamond());
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<String>();

    let task = spawn_shortest_route(
        network,
        RouteRequest::new("A", "D", TransportMode::Car),
        Some(Arc::new(tx)),
        None,
    );
    let route = task.await.unwrap();
    assert_eq!(route.total_distance, 6.0);

    let mut messages = Vec::new();
    while let Some(message) = rx.recv().await {
        messages.push(message);
    }
    let expected: Vec<String> = Milestone::ALL
        .iter()
        .map(|m| m.message().to_string())
        .collect();
    assert_eq!(messages, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn background_search_notifies_request_hook() {
    let network = Arc::new(diamond());
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);
    let hook = move |from: &City, to: &City, mode: TransportMode| {
        recorded
            .lock()
            .unwrap()
            .push((from.name.clone(), to.name.clone(), mode));
    };
    let hook: Arc<dyn RouteRequestHook + Send + Sync> = Arc::new(hook);

    let route = spawn_shortest_route(
        network,
        RouteRequest::new("B", "C", TransportMode::Car),
        None,
        Some(hook),
    )
    .await
    .unwrap();
    assert_eq!(route.total_distance, 8.0);

    assert_eq!(
        *calls.lock().unwrap(),
        vec![("B".to_string(), "C".to_string(), TransportMode::Car)]
    );
}

#[test]
fn concurrent_searches_share_one_network() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .build()
        .unwrap();
    let network = Arc::new(diamond());

    let routes = runtime.block_on(async {
        let tasks: Vec<_> = (0..8)
            .map(|_| {
                spawn_shortest_route(
                    Arc::clone(&network),
                    RouteRequest::new("A", "D", TransportMode::Car),
                    None,
                    None,
                )
            })
            .collect();
        let mut routes = Vec::new();
        for task in tasks {
            routes.push(task.await.unwrap());
        }
        routes
    });

    assert_eq!(routes.len(), 8);
    assert!(routes.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn aborting_a_queued_search_cancels_it() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .max_blocking_threads(1)
        .build()
        .unwrap();
    let network = Arc::new(diamond());

    let result = runtime.block_on(async {
        // Occupy the only blocking thread so the search stays queued.
        let (release_tx, release_rx) = mpsc::channel::<()>();
        let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();
        let blocker = tokio::task::spawn_blocking(move || {
            let _ = started_tx.send(());
            let _ = release_rx.recv();
        });
        started_rx.await.unwrap();

        let task = spawn_shortest_route(
            network,
            RouteRequest::new("A", "D", TransportMode::Car),
            None,
            None,
        );
        task.abort();
        release_tx.send(()).unwrap();
        blocker.await.unwrap();
        task.await
    });

    assert!(matches!(result, Err(Error::Cancelled)));
}
