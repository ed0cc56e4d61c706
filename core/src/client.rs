//! Client handle for the economy catalog API.
//!
//! # Design
//! `EconomyClient` bundles the three things a call reads: resolved
//! settings, the session (token and error handler) and the transport. It
//! carries no per-call state and is cheap to clone; clones share the
//! transport. The per-endpoint methods live in [`crate::endpoints`] and all
//! funnel into [`EconomyClient::call`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::dispatch::PendingCall;
use crate::endpoints::Endpoint;
use crate::error::ApiError;
use crate::session::Session;
use crate::settings::Settings;
use crate::transport::{Transport, UreqTransport};

#[derive(Clone)]
pub struct EconomyClient {
    settings: Arc<Settings>,
    session: Session,
    transport: Arc<dyn Transport>,
}

impl EconomyClient {
    /// Build a client using the default `ureq` transport.
    ///
    /// Fails with `ApiError::Settings` if the settings cannot resolve a
    /// service URL.
    pub fn new(settings: Settings, session: Session) -> Result<Self, ApiError> {
        let transport = Arc::new(UreqTransport::new(settings.timeout));
        Self::with_transport(settings, session, transport)
    }

    pub fn with_transport(
        settings: Settings,
        session: Session,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        settings.base_url()?;
        Ok(Self {
            settings: Arc::new(settings),
            session,
            transport,
        })
    }

    /// A client sharing this one's settings and transport with a new session.
    pub fn with_session(&self, session: Session) -> Self {
        Self {
            session,
            ..self.clone()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Prepare a call to an arbitrary path. Nothing is sent until the
    /// returned call is blocked on or awaited.
    pub fn call<Req, Resp>(&self, path: impl Into<String>, request: Req) -> PendingCall<Req, Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        PendingCall::new(
            Arc::clone(&self.transport),
            Arc::clone(&self.settings),
            self.session.clone(),
            path.into(),
            request,
        )
    }

    /// Blocking call to an arbitrary path.
    pub fn dispatch<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp, ApiError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        self.call(path, request).block()
    }

    /// Blocking call to the endpoint bound to the request type.
    pub fn send<E: Endpoint>(&self, request: &E) -> Result<E::Response, ApiError> {
        self.call(E::PATH, request).block()
    }

    /// Deferred call to the endpoint bound to the request type.
    pub fn send_async<E>(&self, request: E) -> PendingCall<E, E::Response>
    where
        E: Endpoint + Send + 'static,
        E::Response: Send + 'static,
    {
        self.call(E::PATH, request)
    }
}

impl std::fmt::Debug for EconomyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EconomyClient")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
