mod common;

use routeplanner_lib::{
    find_shortest_route, load_network, RouteRequest, RouteSummary, TransportMode,
};

use common::fixtures_dir;

fn route_names(from: &str, to: &str, mode: TransportMode) -> Vec<String> {
    let network = load_network(&fixtures_dir()).expect("fixture loads");
    let route = find_shortest_route(&network, &RouteRequest::new(from, to, mode))
        .expect("route exists");
    route
        .cities
        .iter()
        .map(|&id| network.city_name(id).unwrap().to_string())
        .collect()
}

#[test]
fn fixture_loads_all_cities_and_links() {
    let network = load_network(&fixtures_dir()).expect("fixture loads");
    assert_eq!(network.cities().len(), 12);
    assert_eq!(network.links().len(), 21);
    assert!(network.find_city("St. Gallen").is_some());
}

#[test]
fn rail_route_bern_to_lugano_goes_via_luzern() {
    assert_eq!(
        route_names("Bern", "Lugano", TransportMode::Rail),
        vec!["Bern", "Olten", "Luzern", "Lugano"]
    );
}

#[test]
fn rail_route_geneve_to_chur_crosses_the_country() {
    let network = load_network(&fixtures_dir()).unwrap();
    let route = find_shortest_route(
        &network,
        &RouteRequest::new("Genève", "Chur", TransportMode::Rail),
    )
    .unwrap();
    assert_eq!(route.total_distance, 398.0);
    assert_eq!(route.hop_count(), 5);
}

#[test]
fn ferry_is_only_way_to_friedrichshafen() {
    let network = load_network(&fixtures_dir()).unwrap();
    let err = find_shortest_route(
        &network,
        &RouteRequest::new("Zürich", "Friedrichshafen", TransportMode::Rail),
    )
    .unwrap_err();
    assert!(err.is_unreachable());

    assert_eq!(
        route_names("Romanshorn", "Friedrichshafen", TransportMode::Ship),
        vec!["Romanshorn", "Friedrichshafen"]
    );
}

#[test]
fn misspelled_city_gets_suggestion() {
    let network = load_network(&fixtures_dir()).unwrap();
    let err = find_shortest_route(
        &network,
        &RouteRequest::new("Zurich", "Bern", TransportMode::Rail),
    )
    .unwrap_err();
    assert!(err.is_unknown_city());
    assert!(err.to_string().contains("Did you mean 'Zürich'?"));
}

#[test]
fn summary_of_fixture_route_serialises() {
    let network = load_network(&fixtures_dir()).unwrap();
    let route = find_shortest_route(
        &network,
        &RouteRequest::new("Bern", "Zürich", TransportMode::Rail),
    )
    .unwrap();
    let summary = RouteSummary::from_route(&network, &route).unwrap();
    assert_eq!(summary.total_distance, 122.0);
    let json = summary.to_json().unwrap();
    assert!(json.contains("\"country\": \"Switzerland\""));
}
