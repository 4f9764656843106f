//! PTV Timetable API client
//!
//! Every operation builds a fresh [`EndpointRequest`], signs it, performs one
//! GET and decodes the body. The client holds only immutable credentials and
//! configuration, so a single instance can be shared across tasks.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::config::{Credentials, PtvConfig, PtvSettings};
use crate::endpoints;
use crate::error::PtvError;
use crate::models::{ApiResponse, Expand, RouteType};
use crate::options::{
    DeparturesOptions, DisruptionsOptions, OutletsOptions, PatternOptions, RoutesOptions,
    SearchOptions, StopOptions, StopsForLocationOptions, StopsForRouteOptions,
};
use crate::request::{EndpointRequest, RequestBuilder, SignedUrl};
use crate::response;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Operations offered by the Timetable API
#[async_trait]
pub trait TimetableApi: Send + Sync {
    /// Departures from a stop
    async fn departures(
        &self,
        route_type: RouteType,
        stop_id: u64,
        options: &DeparturesOptions,
    ) -> Result<ApiResponse, PtvError>;

    /// Directions of a route
    async fn directions_for_route(
        &self,
        route_id: u64,
        route_type: Option<RouteType>,
    ) -> Result<ApiResponse, PtvError>;

    /// Routes travelling in a direction
    async fn routes_for_direction(&self, direction_id: u64) -> Result<ApiResponse, PtvError>;

    /// Disruptions, optionally scoped to a route and/or stop
    async fn disruptions(&self, options: &DisruptionsOptions) -> Result<ApiResponse, PtvError>;

    /// A single disruption
    async fn disruption(&self, disruption_id: u64) -> Result<ApiResponse, PtvError>;

    /// All disruption modes
    async fn disruption_modes(&self) -> Result<ApiResponse, PtvError>;

    /// Ticket outlets
    async fn outlets(&self, options: &OutletsOptions) -> Result<ApiResponse, PtvError>;

    /// Stopping pattern of a run
    async fn pattern(
        &self,
        run_id: u64,
        route_type: RouteType,
        expand: &[Expand],
        options: &PatternOptions,
    ) -> Result<ApiResponse, PtvError>;

    /// All routes
    async fn routes(&self, options: &RoutesOptions) -> Result<ApiResponse, PtvError>;

    /// A single route
    async fn route(&self, route_id: u64) -> Result<ApiResponse, PtvError>;

    /// All route types
    async fn route_types(&self) -> Result<ApiResponse, PtvError>;

    /// A run
    async fn run(
        &self,
        run_id: u64,
        route_type: Option<RouteType>,
    ) -> Result<ApiResponse, PtvError>;

    /// Runs on a route
    async fn runs_for_route(
        &self,
        route_id: u64,
        route_type: Option<RouteType>,
    ) -> Result<ApiResponse, PtvError>;

    /// Free-text search
    async fn search(
        &self,
        search_term: &str,
        options: &SearchOptions,
    ) -> Result<ApiResponse, PtvError>;

    /// Facilities of a stop
    async fn stop(
        &self,
        stop_id: u64,
        route_type: RouteType,
        options: &StopOptions,
    ) -> Result<ApiResponse, PtvError>;

    /// Stops along a route
    async fn stops_for_route(
        &self,
        route_id: u64,
        route_type: RouteType,
        options: &StopsForRouteOptions,
    ) -> Result<ApiResponse, PtvError>;

    /// Stops near a location
    async fn stops_for_location(
        &self,
        latitude: f64,
        longitude: f64,
        options: &StopsForLocationOptions,
    ) -> Result<ApiResponse, PtvError>;
}

/// Signed Timetable API client
#[derive(Clone)]
pub struct PtvClient {
    credentials: Credentials,
    config: PtvConfig,
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for PtvClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PtvClient")
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PtvClient {
    /// Create a client that talks to the service over `reqwest`
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials or configuration are invalid or
    /// the HTTP client cannot be initialized.
    pub fn new(credentials: Credentials, config: PtvConfig) -> Result<Self, PtvError> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(credentials, config, Arc::new(transport))
    }

    /// Create a client against the public service with default settings
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are blank or the HTTP client
    /// cannot be initialized.
    pub fn with_defaults(credentials: Credentials) -> Result<Self, PtvError> {
        Self::new(credentials, PtvConfig::default())
    }

    /// Create a client from loaded settings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_settings(settings: PtvSettings) -> Result<Self, PtvError> {
        Self::new(settings.credentials, settings.config)
    }

    /// Create a client with a custom transport
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials or configuration are invalid.
    pub fn with_transport(
        credentials: Credentials,
        config: PtvConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, PtvError> {
        credentials.validate()?;
        config.validate()?;
        Ok(Self {
            credentials,
            config,
            transport,
        })
    }

    /// Developer id this client signs with
    #[must_use]
    pub fn developer_id(&self) -> &str {
        &self.credentials.developer_id
    }

    /// Sign a request without sending it
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be rendered.
    pub fn sign(&self, request: &EndpointRequest) -> Result<SignedUrl, PtvError> {
        RequestBuilder::new(&self.credentials, self.config.normalized_base_url()).build(request)
    }

    /// Sign, send and decode a request
    ///
    /// # Errors
    ///
    /// Returns an error if signing, the HTTP round trip or decoding fails.
    #[instrument(skip(self, request), fields(template = %request.path_template()))]
    pub async fn execute(&self, request: EndpointRequest) -> Result<ApiResponse, PtvError> {
        let url = self.sign(&request)?;
        debug!(path = %url.path(), "Sending request");

        let raw = self.transport.get(url.as_str()).await?;
        if !(200..300).contains(&raw.status) {
            warn!(status = raw.status, path = %url.path(), "Timetable API returned an error");
        }

        response::decode(raw.status, &raw.body)
    }
}

#[async_trait]
impl TimetableApi for PtvClient {
    #[instrument(skip(self, options))]
    async fn departures(
        &self,
        route_type: RouteType,
        stop_id: u64,
        options: &DeparturesOptions,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::departures(route_type, stop_id, options))
            .await
    }

    #[instrument(skip(self))]
    async fn directions_for_route(
        &self,
        route_id: u64,
        route_type: Option<RouteType>,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::directions_for_route(route_id, route_type))
            .await
    }

    #[instrument(skip(self))]
    async fn routes_for_direction(&self, direction_id: u64) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::routes_for_direction(direction_id))
            .await
    }

    #[instrument(skip(self, options))]
    async fn disruptions(&self, options: &DisruptionsOptions) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::disruptions(options)).await
    }

    #[instrument(skip(self))]
    async fn disruption(&self, disruption_id: u64) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::disruption(disruption_id)).await
    }

    #[instrument(skip(self))]
    async fn disruption_modes(&self) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::disruption_modes()).await
    }

    #[instrument(skip(self, options))]
    async fn outlets(&self, options: &OutletsOptions) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::outlets(options)).await
    }

    #[instrument(skip(self, options))]
    async fn pattern(
        &self,
        run_id: u64,
        route_type: RouteType,
        expand: &[Expand],
        options: &PatternOptions,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::pattern(run_id, route_type, expand, options))
            .await
    }

    #[instrument(skip(self, options))]
    async fn routes(&self, options: &RoutesOptions) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::routes(options)).await
    }

    #[instrument(skip(self))]
    async fn route(&self, route_id: u64) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::route(route_id)).await
    }

    #[instrument(skip(self))]
    async fn route_types(&self) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::route_types()).await
    }

    #[instrument(skip(self))]
    async fn run(
        &self,
        run_id: u64,
        route_type: Option<RouteType>,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::run(run_id, route_type)).await
    }

    #[instrument(skip(self))]
    async fn runs_for_route(
        &self,
        route_id: u64,
        route_type: Option<RouteType>,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::runs_for_route(route_id, route_type))
            .await
    }

    #[instrument(skip(self, options))]
    async fn search(
        &self,
        search_term: &str,
        options: &SearchOptions,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::search(search_term, options)?).await
    }

    #[instrument(skip(self, options))]
    async fn stop(
        &self,
        stop_id: u64,
        route_type: RouteType,
        options: &StopOptions,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::stop(stop_id, route_type, options))
            .await
    }

    #[instrument(skip(self, options))]
    async fn stops_for_route(
        &self,
        route_id: u64,
        route_type: RouteType,
        options: &StopsForRouteOptions,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::stops_for_route(route_id, route_type, options))
            .await
    }

    #[instrument(skip(self, options))]
    async fn stops_for_location(
        &self,
        latitude: f64,
        longitude: f64,
        options: &StopsForLocationOptions,
    ) -> Result<ApiResponse, PtvError> {
        self.execute(endpoints::stops_for_location(latitude, longitude, options))
            .await
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::transport::{MockHttpTransport, RawResponse};

    const DEV_ID: &str = "3001026";
    const API_KEY: &str = "fa83ef37-71d1-49e3-afa1-b8a765327650";

    fn client_with(transport: MockHttpTransport) -> PtvClient {
        PtvClient::with_transport(
            Credentials::new(DEV_ID, API_KEY),
            PtvConfig::for_testing(),
            Arc::new(transport),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_departures_sends_signed_url() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .with(eq(
                "http://timetableapi.ptv.vic.gov.au/v3/departures/route_type/0/stop/1071\
                 ?devid=3001026&signature=E519C292EA41EB4FB4BCB1735CB808DD359303DE",
            ))
            .times(1)
            .returning(|_| {
                Ok(RawResponse::new(
                    200,
                    r#"{"departures":[],"stops":{},"routes":{},"runs":{},"directions":{},
                        "disruptions":{},"status":{"version":"3.0","health":1}}"#,
                ))
            });

        let client = client_with(transport);
        let response = client
            .departures(RouteType::Train, 1071, &DeparturesOptions::default())
            .await
            .unwrap();

        for key in [
            "departures",
            "stops",
            "routes",
            "runs",
            "directions",
            "disruptions",
            "status",
        ] {
            assert!(response.contains_key(key), "missing {key}");
        }
        assert!(response.status().unwrap().is_healthy());
    }

    #[tokio::test]
    async fn test_http_error_is_surfaced() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .returning(|_| Ok(RawResponse::new(403, "Forbidden")));

        let client = client_with(transport);
        let err = client.route_types().await.unwrap_err();
        assert!(matches!(err, PtvError::Http { status: 403, .. }));
        assert!(err.is_authentication_failure());
    }

    #[tokio::test]
    async fn test_decode_error_is_surfaced() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .returning(|_| Ok(RawResponse::new(200, "<html></html>")));

        let client = client_with(transport);
        let err = client.route(1).await.unwrap_err();
        assert!(matches!(err, PtvError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_error_is_surfaced_once() {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_| Err(PtvError::Timeout { timeout_secs: 5 }));

        let client = client_with(transport);
        let err = client.disruption_modes().await.unwrap_err();
        assert!(matches!(err, PtvError::Timeout { timeout_secs: 5 }));
    }

    #[tokio::test]
    async fn test_blank_search_never_hits_transport() {
        let mut transport = MockHttpTransport::new();
        transport.expect_get().times(0);

        let client = client_with(transport);
        let err = client
            .search(" ", &SearchOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PtvError::InvalidRequest(_)));
    }

    #[test]
    fn test_sign_search_vector() {
        let client = client_with(MockHttpTransport::new());
        let request = endpoints::search("flinders st", &SearchOptions::default()).unwrap();
        let url = client.sign(&request).unwrap();
        assert_eq!(url.signature(), "B7D24259809BC6DD3D4D4B1E57804F30FE01892B");
    }

    #[test]
    fn test_rejects_blank_credentials() {
        let result = PtvClient::with_transport(
            Credentials::new("", API_KEY),
            PtvConfig::for_testing(),
            Arc::new(MockHttpTransport::new()),
        );
        assert!(matches!(result, Err(PtvError::Configuration(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = client_with(MockHttpTransport::new());
        let debug = format!("{client:?}");
        assert!(debug.contains(DEV_ID));
        assert!(!debug.contains(API_KEY));
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PtvClient>();
    }
}
