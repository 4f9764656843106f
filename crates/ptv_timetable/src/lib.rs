//! Client for the Public Transport Victoria Timetable API (v3)
//!
//! Every request to the [Timetable API](http://timetableapi.ptv.vic.gov.au)
//! carries the caller's developer id and an HMAC-SHA1 signature of its own
//! path and query, keyed with the developer's API key.
//!
//! # Architecture
//!
//! The request pipeline is split into small pieces:
//! - [`QueryParams`] encodes typed, insertion-ordered query parameters
//! - [`signature::sign`] computes the upper-case hex HMAC-SHA1 signature
//! - [`RequestBuilder`] renders an [`EndpointRequest`] into a [`SignedUrl`]
//! - [`HttpTransport`] performs the GET ([`ReqwestTransport`] by default)
//! - [`response::decode`] turns status and body into an [`ApiResponse`]
//!
//! [`PtvClient`] implements [`TimetableApi`], one method per endpoint, on top
//! of that pipeline. The [`endpoints`] module holds the path templates.
//!
//! # Example
//!
//! ```rust,ignore
//! use ptv_timetable::{Credentials, DeparturesOptions, PtvClient, RouteType, TimetableApi};
//!
//! let client = PtvClient::with_defaults(Credentials::new("3001026", api_key))?;
//!
//! let departures = client
//!     .departures(RouteType::Train, 1071, &DeparturesOptions {
//!         max_results: Some(3),
//!         ..Default::default()
//!     })
//!     .await?;
//! ```

mod client;
mod config;
pub mod endpoints;
mod error;
mod models;
mod options;
mod query;
mod request;
pub mod response;
pub mod signature;
mod transport;

pub use client::{PtvClient, TimetableApi};
pub use config::{Credentials, PtvConfig, PtvSettings};
pub use error::PtvError;
pub use models::{ApiResponse, DisruptionStatus, Expand, ResponseStatus, RouteType};
pub use options::{
    DeparturesOptions, DisruptionsOptions, OutletsOptions, PatternOptions, RoutesOptions,
    SearchOptions, StopOptions, StopsForLocationOptions, StopsForRouteOptions,
};
pub use query::{QueryParams, QueryScalar, QueryValue};
pub use request::{
    API_VERSION, DEVELOPER_ID_PARAM, EndpointRequest, PathArg, RequestBuilder, SIGNATURE_PARAM,
    SignedUrl,
};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport};
