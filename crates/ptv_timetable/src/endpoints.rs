//! Endpoint catalog
//!
//! One constructor per Timetable API operation. Each picks the path template
//! (some operations have a narrower path when a filter is given), binds the
//! path arguments and attaches the optional query parameters. Nothing here
//! touches credentials or the network.

use crate::error::PtvError;
use crate::models::{Expand, RouteType};
use crate::options::{
    DeparturesOptions, DisruptionsOptions, OutletsOptions, PatternOptions, RoutesOptions,
    SearchOptions, StopOptions, StopsForLocationOptions, StopsForRouteOptions,
};
use crate::request::EndpointRequest;

/// Departures from a stop, optionally limited to one route
pub fn departures(
    route_type: RouteType,
    stop_id: u64,
    options: &DeparturesOptions,
) -> EndpointRequest {
    let request = match options.route_id {
        Some(route_id) => EndpointRequest::new(
            "/departures/route_type/{route_type}/stop/{stop_id}/route/{route_id}",
        )
        .arg("route_id", route_id),
        None => EndpointRequest::new("/departures/route_type/{route_type}/stop/{stop_id}"),
    };
    request
        .arg("route_type", route_type)
        .arg("stop_id", stop_id)
        .with_query(options.to_query())
}

/// Directions of a route, optionally limited to one transport mode
pub fn directions_for_route(route_id: u64, route_type: Option<RouteType>) -> EndpointRequest {
    match route_type {
        Some(route_type) => {
            EndpointRequest::new("/directions/route/{route_id}/route_type/{route_type}")
                .arg("route_id", route_id)
                .arg("route_type", route_type)
        },
        None => EndpointRequest::new("/directions/route/{route_id}").arg("route_id", route_id),
    }
}

/// Routes travelling in a direction
pub fn routes_for_direction(direction_id: u64) -> EndpointRequest {
    EndpointRequest::new("/directions/{direction_id}").arg("direction_id", direction_id)
}

/// Disruptions, optionally scoped to a route, a stop, or both
pub fn disruptions(options: &DisruptionsOptions) -> EndpointRequest {
    let request = match (options.route_id, options.stop_id) {
        (Some(route_id), Some(stop_id)) => {
            EndpointRequest::new("/disruptions/route/{route_id}/stop/{stop_id}")
                .arg("route_id", route_id)
                .arg("stop_id", stop_id)
        },
        (Some(route_id), None) => {
            EndpointRequest::new("/disruptions/route/{route_id}").arg("route_id", route_id)
        },
        (None, Some(stop_id)) => {
            EndpointRequest::new("/disruptions/stop/{stop_id}").arg("stop_id", stop_id)
        },
        (None, None) => EndpointRequest::new("/disruptions"),
    };
    request.with_query(options.to_query())
}

/// A single disruption
pub fn disruption(disruption_id: u64) -> EndpointRequest {
    EndpointRequest::new("/disruptions/{disruption_id}").arg("disruption_id", disruption_id)
}

/// All disruption modes
pub fn disruption_modes() -> EndpointRequest {
    EndpointRequest::new("/disruptions/modes")
}

/// Ticket outlets, optionally around a location
pub fn outlets(options: &OutletsOptions) -> EndpointRequest {
    let request = match options.location {
        Some((latitude, longitude)) => {
            EndpointRequest::new("/outlets/location/{latitude},{longitude}")
                .arg("latitude", latitude)
                .arg("longitude", longitude)
        },
        None => EndpointRequest::new("/outlets"),
    };
    request.with_query(options.to_query())
}

/// Stopping pattern of a run
pub fn pattern(
    run_id: u64,
    route_type: RouteType,
    expand: &[Expand],
    options: &PatternOptions,
) -> EndpointRequest {
    EndpointRequest::new("/pattern/run/{run_id}/route_type/{route_type}")
        .arg("run_id", run_id)
        .arg("route_type", route_type)
        .with_query(options.to_query(expand))
}

/// All routes, optionally filtered by mode or name
pub fn routes(options: &RoutesOptions) -> EndpointRequest {
    EndpointRequest::new("/routes").with_query(options.to_query())
}

/// A single route
pub fn route(route_id: u64) -> EndpointRequest {
    EndpointRequest::new("/routes/{route_id}").arg("route_id", route_id)
}

/// All route types
pub fn route_types() -> EndpointRequest {
    EndpointRequest::new("/route_types")
}

/// A run, optionally limited to one transport mode
pub fn run(run_id: u64, route_type: Option<RouteType>) -> EndpointRequest {
    match route_type {
        Some(route_type) => EndpointRequest::new("/runs/{run_id}/route_type/{route_type}")
            .arg("run_id", run_id)
            .arg("route_type", route_type),
        None => EndpointRequest::new("/runs/{run_id}").arg("run_id", run_id),
    }
}

/// Runs on a route, optionally limited to one transport mode
pub fn runs_for_route(route_id: u64, route_type: Option<RouteType>) -> EndpointRequest {
    match route_type {
        Some(route_type) => EndpointRequest::new("/runs/route/{route_id}/route_type/{route_type}")
            .arg("route_id", route_id)
            .arg("route_type", route_type),
        None => EndpointRequest::new("/runs/route/{route_id}").arg("route_id", route_id),
    }
}

/// Free-text search across stops, routes and outlets
///
/// # Errors
///
/// Returns an error if the search term is blank.
pub fn search(search_term: &str, options: &SearchOptions) -> Result<EndpointRequest, PtvError> {
    if search_term.trim().is_empty() {
        return Err(PtvError::InvalidRequest(
            "search term must not be empty".to_string(),
        ));
    }
    Ok(EndpointRequest::new("/search/{search_term}")
        .arg("search_term", search_term)
        .with_query(options.to_query()))
}

/// Facilities of a single stop
pub fn stop(stop_id: u64, route_type: RouteType, options: &StopOptions) -> EndpointRequest {
    EndpointRequest::new("/stops/{stop_id}/route_type/{route_type}")
        .arg("stop_id", stop_id)
        .arg("route_type", route_type)
        .with_query(options.to_query())
}

/// Stops along a route
pub fn stops_for_route(
    route_id: u64,
    route_type: RouteType,
    options: &StopsForRouteOptions,
) -> EndpointRequest {
    EndpointRequest::new("/stops/route/{route_id}/route_type/{route_type}")
        .arg("route_id", route_id)
        .arg("route_type", route_type)
        .with_query(options.to_query())
}

/// Stops near a location
pub fn stops_for_location(
    latitude: f64,
    longitude: f64,
    options: &StopsForLocationOptions,
) -> EndpointRequest {
    EndpointRequest::new("/stops/location/{latitude},{longitude}")
        .arg("latitude", latitude)
        .arg("longitude", longitude)
        .with_query(options.to_query())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisruptionStatus;

    fn path(request: &EndpointRequest) -> String {
        request.render_path().unwrap()
    }

    #[test]
    fn test_departures_paths() {
        let request = departures(RouteType::Train, 1071, &DeparturesOptions::default());
        assert_eq!(path(&request), "/v3/departures/route_type/0/stop/1071");
        assert!(request.query().is_empty());

        let options = DeparturesOptions {
            route_id: Some(1),
            ..Default::default()
        };
        let request = departures(RouteType::Train, 1071, &options);
        assert_eq!(path(&request), "/v3/departures/route_type/0/stop/1071/route/1");
        assert!(request.query().is_empty());
    }

    #[test]
    fn test_directions_paths() {
        assert_eq!(path(&directions_for_route(1, None)), "/v3/directions/route/1");
        assert_eq!(
            path(&directions_for_route(1, Some(RouteType::Train))),
            "/v3/directions/route/1/route_type/0"
        );
        assert_eq!(path(&routes_for_direction(1)), "/v3/directions/1");
    }

    #[test]
    fn test_disruptions_paths() {
        assert_eq!(
            path(&disruptions(&DisruptionsOptions::default())),
            "/v3/disruptions"
        );

        let scoped = |route_id, stop_id| DisruptionsOptions {
            route_id,
            stop_id,
            ..Default::default()
        };
        assert_eq!(
            path(&disruptions(&scoped(Some(1), None))),
            "/v3/disruptions/route/1"
        );
        assert_eq!(
            path(&disruptions(&scoped(None, Some(1071)))),
            "/v3/disruptions/stop/1071"
        );
        assert_eq!(
            path(&disruptions(&scoped(Some(1), Some(1071)))),
            "/v3/disruptions/route/1/stop/1071"
        );

        assert_eq!(path(&disruption(1)), "/v3/disruptions/1");
        assert_eq!(path(&disruption_modes()), "/v3/disruptions/modes");
    }

    #[test]
    fn test_disruptions_status_query() {
        let options = DisruptionsOptions {
            disruption_status: Some(DisruptionStatus::Current),
            ..Default::default()
        };
        assert_eq!(
            disruptions(&options).query().encode(),
            "disruption_status=current"
        );
    }

    #[test]
    fn test_outlets_paths() {
        assert_eq!(path(&outlets(&OutletsOptions::default())), "/v3/outlets");

        let options = OutletsOptions {
            location: Some((-37.818_271_1, 144.964_873_1)),
            max_distance: Some(1000.0),
            ..Default::default()
        };
        let request = outlets(&options);
        assert_eq!(
            path(&request),
            "/v3/outlets/location/-37.8182711,144.9648731"
        );
        assert_eq!(request.query().encode(), "max_distance=1000");
    }

    #[test]
    fn test_pattern_path() {
        let request = pattern(1, RouteType::Train, &[Expand::All], &PatternOptions::default());
        assert_eq!(path(&request), "/v3/pattern/run/1/route_type/0");
        assert_eq!(request.query().encode(), "expand=All");
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(path(&routes(&RoutesOptions::default())), "/v3/routes");
        assert_eq!(path(&route(1)), "/v3/routes/1");
        assert_eq!(path(&route_types()), "/v3/route_types");
    }

    #[test]
    fn test_run_paths() {
        assert_eq!(path(&run(1, None)), "/v3/runs/1");
        assert_eq!(path(&run(1, Some(RouteType::Train))), "/v3/runs/1/route_type/0");
        assert_eq!(path(&runs_for_route(1, None)), "/v3/runs/route/1");
        assert_eq!(
            path(&runs_for_route(1, Some(RouteType::Bus))),
            "/v3/runs/route/1/route_type/2"
        );
    }

    #[test]
    fn test_search_path() {
        let request = search("Flinders St", &SearchOptions::default()).unwrap();
        assert_eq!(path(&request), "/v3/search/Flinders%20St");
    }

    #[test]
    fn test_search_blank_term() {
        assert!(matches!(
            search("   ", &SearchOptions::default()),
            Err(PtvError::InvalidRequest(_))
        ));
        assert!(search("", &SearchOptions::default()).is_err());
    }

    #[test]
    fn test_stop_paths() {
        assert_eq!(
            path(&stop(1071, RouteType::Train, &StopOptions::default())),
            "/v3/stops/1071/route_type/0"
        );
        assert_eq!(
            path(&stops_for_route(1, RouteType::Train, &StopsForRouteOptions::default())),
            "/v3/stops/route/1/route_type/0"
        );
        assert_eq!(
            path(&stops_for_location(
                -37.818_271_1,
                144.964_873_1,
                &StopsForLocationOptions::default()
            )),
            "/v3/stops/location/-37.8182711,144.9648731"
        );
    }

    #[test]
    fn test_requests_are_independent() {
        let options = StopOptions {
            stop_location: Some(true),
            ..Default::default()
        };
        let first = stop(1071, RouteType::Train, &options);
        let second = stop(1071, RouteType::Train, &StopOptions::default());
        assert_eq!(first.query().encode(), "stop_location=true");
        assert!(second.query().is_empty());
    }
}
