//! Timetable API data models
//!
//! Typed vocabulary for request parameters (route types, expand targets,
//! disruption states) and a thin wrapper around the decoded JSON response.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::QueryScalar;

/// Transport mode code used throughout the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// Metropolitan train
    Train,
    /// Tram
    Tram,
    /// Bus (metropolitan, regional and Skybus)
    Bus,
    /// V/Line regional train and coach
    VLine,
    /// Night bus
    NightBus,
    /// Any code this client has no name for
    Other(u32),
}

impl RouteType {
    /// Numeric code as sent to the service
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Train => 0,
            Self::Tram => 1,
            Self::Bus => 2,
            Self::VLine => 3,
            Self::NightBus => 4,
            Self::Other(code) => code,
        }
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Train => "Train",
            Self::Tram => "Tram",
            Self::Bus => "Bus",
            Self::VLine => "V/Line",
            Self::NightBus => "Night Bus",
            Self::Other(_) => "Other",
        }
    }
}

impl From<u32> for RouteType {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::Train,
            1 => Self::Tram,
            2 => Self::Bus,
            3 => Self::VLine,
            4 => Self::NightBus,
            other => Self::Other(other),
        }
    }
}

impl From<RouteType> for QueryScalar {
    fn from(route_type: RouteType) -> Self {
        Self::from(route_type.code())
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Referenced objects the service should inline instead of returning ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expand {
    /// Every kind below
    All,
    /// Stops
    Stop,
    /// Routes
    Route,
    /// Runs
    Run,
    /// Directions
    Direction,
    /// Disruptions
    Disruption,
    /// Vehicle descriptors on runs
    VehicleDescriptor,
    /// Live vehicle positions on runs
    VehiclePosition,
    /// Nothing
    None,
}

impl Expand {
    /// Parameter value as the service spells it
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Stop => "Stop",
            Self::Route => "Route",
            Self::Run => "Run",
            Self::Direction => "Direction",
            Self::Disruption => "Disruption",
            Self::VehicleDescriptor => "VehicleDescriptor",
            Self::VehiclePosition => "VehiclePosition",
            Self::None => "None",
        }
    }
}

impl From<Expand> for QueryScalar {
    fn from(expand: Expand) -> Self {
        Self::from(expand.as_str())
    }
}

impl fmt::Display for Expand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Disruption lifecycle filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisruptionStatus {
    /// In effect now
    Current,
    /// Scheduled for the future
    Planned,
}

impl DisruptionStatus {
    /// Parameter value as the service spells it
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Planned => "planned",
        }
    }
}

impl From<DisruptionStatus> for QueryScalar {
    fn from(status: DisruptionStatus) -> Self {
        Self::from(status.as_str())
    }
}

/// The `status` object every response carries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResponseStatus {
    /// API version that served the request
    pub version: String,
    /// 1 when the service is healthy, 0 otherwise
    pub health: i64,
}

impl ResponseStatus {
    /// Returns true if the service reported itself healthy
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.health == 1
    }
}

/// Decoded response body.
///
/// The shape depends on the endpoint and is owned by the service, so the
/// body is kept as a generic JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse(Map<String, Value>);

impl ApiResponse {
    /// Wrap an already-decoded JSON object
    #[must_use]
    pub const fn new(body: Map<String, Value>) -> Self {
        Self(body)
    }

    /// Top-level value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the body has the given top-level key
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Top-level keys
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// The common `status` envelope, if present and well-formed
    #[must_use]
    pub fn status(&self) -> Option<ResponseStatus> {
        self.0
            .get("status")
            .and_then(|status| serde_json::from_value(status.clone()).ok())
    }

    /// Consume the wrapper and return the raw JSON object
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<ApiResponse> for Value {
    fn from(response: ApiResponse) -> Self {
        Self::Object(response.0)
    }
}
