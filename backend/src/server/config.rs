//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::web;

use crate::inbound::http::state::HttpState;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
    pub(crate) enable_docs: bool,
    pub(crate) permissive_cors: bool,
}

impl ServerConfig {
    /// Construct a server configuration over prepared handler state.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: web::Data<HttpState>) -> Self {
        Self {
            bind_addr,
            http_state,
            enable_docs: false,
            permissive_cors: false,
        }
    }

    /// Serve Swagger UI at `/docs` and the OpenAPI document.
    #[must_use]
    pub fn with_docs(mut self, enable: bool) -> Self {
        self.enable_docs = enable;
        self
    }

    /// Answer CORS preflights permissively. Intended for local frontend
    /// development only.
    #[must_use]
    pub fn with_permissive_cors(mut self, enable: bool) -> Self {
        self.permissive_cors = enable;
        self
    }
}
