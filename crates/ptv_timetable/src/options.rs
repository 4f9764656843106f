//! Optional parameters per endpoint
//!
//! Every field is an `Option`; `None` means "not supplied" and produces no
//! query entry. Any `Some` value is sent, including `Some(false)` and
//! `Some(0)`.

use chrono::{DateTime, Utc};

use crate::models::{DisruptionStatus, Expand, RouteType};
use crate::query::QueryParams;

/// Options for departures from a stop
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeparturesOptions {
    /// Only departures on this route (selects the route-scoped path)
    pub route_id: Option<u64>,
    /// Only departures from these platforms
    pub platform_numbers: Option<Vec<u32>>,
    /// Only departures in this direction
    pub direction_id: Option<u64>,
    /// Include departures before `date_utc`
    pub look_backwards: Option<bool>,
    /// Interpret the stop id as a GTFS stop id
    pub gtfs: Option<bool>,
    /// Reference time (defaults to now on the service side)
    pub date_utc: Option<DateTime<Utc>>,
    /// Maximum departures per route/direction
    pub max_results: Option<u32>,
    /// Include cancelled services
    pub include_cancelled: Option<bool>,
    /// Objects to inline in the response
    pub expand: Option<Vec<Expand>>,
}

impl DeparturesOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_list_opt("platform_numbers", self.platform_numbers.clone());
        query.insert_opt("direction_id", self.direction_id);
        query.insert_opt("look_backwards", self.look_backwards);
        query.insert_opt("gtfs", self.gtfs);
        query.insert_opt("date_utc", self.date_utc);
        query.insert_opt("max_results", self.max_results);
        query.insert_opt("include_cancelled", self.include_cancelled);
        query.insert_list_opt("expand", self.expand.clone());
        query
    }
}

/// Options for the disruption listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisruptionsOptions {
    /// Only disruptions on this route
    pub route_id: Option<u64>,
    /// Only disruptions at this stop
    pub stop_id: Option<u64>,
    /// Current or planned disruptions only
    pub disruption_status: Option<DisruptionStatus>,
    /// Only disruptions affecting these transport modes
    pub route_types: Option<Vec<RouteType>>,
    /// Only disruptions of these disruption modes
    pub disruption_modes: Option<Vec<u32>>,
}

impl DisruptionsOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_opt("disruption_status", self.disruption_status);
        query.insert_list_opt("route_types", self.route_types.clone());
        query.insert_list_opt("disruption_modes", self.disruption_modes.clone());
        query
    }
}

/// Options for ticket outlets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutletsOptions {
    /// Centre point as (latitude, longitude); selects the location path
    pub location: Option<(f64, f64)>,
    /// Search radius in metres
    pub max_distance: Option<f64>,
    /// Maximum number of outlets
    pub max_results: Option<u32>,
}

impl OutletsOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_opt("max_distance", self.max_distance);
        query.insert_opt("max_results", self.max_results);
        query
    }
}

/// Options for a run's stopping pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternOptions {
    /// Only the pattern from this stop
    pub stop_id: Option<u64>,
    /// Reference time
    pub date_utc: Option<DateTime<Utc>>,
}

impl PatternOptions {
    /// Query parameters for the supplied options, after the required `expand`
    #[must_use]
    pub fn to_query(&self, expand: &[Expand]) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_list("expand", expand.iter().copied());
        query.insert_opt("stop_id", self.stop_id);
        query.insert_opt("date_utc", self.date_utc);
        query
    }
}

/// Options for the route listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutesOptions {
    /// Only routes of these transport modes
    pub route_types: Option<Vec<RouteType>>,
    /// Only routes whose name contains this text
    pub route_name: Option<String>,
}

impl RoutesOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_list_opt("route_types", self.route_types.clone());
        query.insert_opt("route_name", self.route_name.clone());
        query
    }
}

/// Options for free-text search
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Only results of these transport modes
    pub route_types: Option<Vec<RouteType>>,
    /// Latitude to rank results around
    pub latitude: Option<f64>,
    /// Longitude to rank results around
    pub longitude: Option<f64>,
    /// Search radius in metres around the location
    pub max_distance: Option<f64>,
    /// Include matching addresses
    pub include_addresses: Option<bool>,
    /// Include matching ticket outlets
    pub include_outlets: Option<bool>,
    /// Match stops by suburb name
    pub match_stop_by_suburb: Option<bool>,
    /// Match routes by suburb name
    pub match_route_by_suburb: Option<bool>,
    /// Match stops by GTFS stop id
    pub match_stop_by_gtfs_stop_id: Option<bool>,
}

impl SearchOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_list_opt("route_types", self.route_types.clone());
        query.insert_opt("latitude", self.latitude);
        query.insert_opt("longitude", self.longitude);
        query.insert_opt("max_distance", self.max_distance);
        query.insert_opt("include_addresses", self.include_addresses);
        query.insert_opt("include_outlets", self.include_outlets);
        query.insert_opt("match_stop_by_suburb", self.match_stop_by_suburb);
        query.insert_opt("match_route_by_suburb", self.match_route_by_suburb);
        query.insert_opt("match_stop_by_gtfs_stop_id", self.match_stop_by_gtfs_stop_id);
        query
    }
}

/// Detail flags for a single stop's facilities
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopOptions {
    /// Include location details
    pub stop_location: Option<bool>,
    /// Include amenities
    pub stop_amenities: Option<bool>,
    /// Include accessibility details
    pub stop_accessibility: Option<bool>,
    /// Include contact details
    pub stop_contact: Option<bool>,
    /// Include ticketing details
    pub stop_ticket: Option<bool>,
    /// Interpret the stop id as a GTFS stop id
    pub gtfs: Option<bool>,
    /// Include staffing details
    pub stop_staffing: Option<bool>,
    /// Include disruptions
    pub stop_disruptions: Option<bool>,
}

impl StopOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_opt("stop_location", self.stop_location);
        query.insert_opt("stop_amenities", self.stop_amenities);
        query.insert_opt("stop_accessibility", self.stop_accessibility);
        query.insert_opt("stop_contact", self.stop_contact);
        query.insert_opt("stop_ticket", self.stop_ticket);
        query.insert_opt("gtfs", self.gtfs);
        query.insert_opt("stop_staffing", self.stop_staffing);
        query.insert_opt("stop_disruptions", self.stop_disruptions);
        query
    }
}

/// Options for stops along a route
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopsForRouteOptions {
    /// Order stops for this direction
    pub direction_id: Option<u64>,
    /// Include disruptions
    pub stop_disruptions: Option<bool>,
}

impl StopsForRouteOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_opt("direction_id", self.direction_id);
        query.insert_opt("stop_disruptions", self.stop_disruptions);
        query
    }
}

/// Options for stops near a location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopsForLocationOptions {
    /// Only stops served by these transport modes
    pub route_types: Option<Vec<RouteType>>,
    /// Maximum number of stops
    pub max_results: Option<u32>,
    /// Search radius in metres
    pub max_distance: Option<f64>,
    /// Include disruptions
    pub stop_disruptions: Option<bool>,
}

impl StopsForLocationOptions {
    /// Query parameters for the supplied options
    #[must_use]
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        query.insert_list_opt("route_types", self.route_types.clone());
        query.insert_opt("max_results", self.max_results);
        query.insert_opt("max_distance", self.max_distance);
        query.insert_opt("stop_disruptions", self.stop_disruptions);
        query
    }
}
