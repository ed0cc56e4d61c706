//! Client core for the economy catalog service.
//!
//! # Overview
//! Every catalog operation is a POST of a JSON payload to a fixed path with
//! the caller's entity token in `X-EntityToken`, answered by a
//! `{code, status, data}` envelope. This crate implements that exchange once,
//! generically, and generates the typed per-endpoint methods from a table.
//!
//! # Design
//! - `dispatch` splits a call into `build_request` / transport /
//!   `parse_response`, so both halves are testable without a network.
//! - `Session` carries the token and the optional error handler explicitly;
//!   there is no process-wide state.
//! - Every call returns `Result<T, ApiError>`. Each endpoint has a blocking
//!   method and a deferred `_async` method sharing one `PendingCall`.
//! - DTOs are defined independently from the fixture server crate;
//!   integration tests catch schema drift.
//!
//! ```no_run
//! use economy_core::{EconomyClient, GetItemRequest, Session, Settings};
//!
//! let session = Session::new().with_entity_token("entity-token");
//! let client = EconomyClient::new(Settings::for_title("A1B2"), session)?;
//! let response = client.get_item(&GetItemRequest::by_id("sword-01"))?;
//! println!("{:?}", response.item);
//! # Ok::<(), economy_core::ApiError>(())
//! ```

pub mod client;
pub mod dispatch;
pub mod endpoints;
pub mod envelope;
pub mod error;
pub mod http;
pub mod session;
pub mod settings;
pub mod transport;
pub mod types;

pub use client::EconomyClient;
pub use dispatch::{build_request, dispatch, parse_response, PendingCall};
pub use endpoints::{Endpoint, CATALOG_PATHS};
pub use envelope::{Envelope, ErrorEnvelope};
pub use error::{ApiError, ErrorCode, ErrorInfo};
pub use http::{HttpRequest, HttpResponse, ENTITY_TOKEN_HEADER};
pub use session::{ErrorHandler, Session};
pub use settings::Settings;
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::*;
