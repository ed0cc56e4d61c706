//! Generic request dispatch shared by every catalog endpoint.
//!
//! # Design
//! A call is split the same way for every endpoint:
//! `build_request` turns a payload into an `HttpRequest`, the transport
//! executes it, and `parse_response` turns the `HttpResponse` into the typed
//! result. Only the path, the request type and the response type vary.
//!
//! [`PendingCall`] is the single unit of work behind both invocation modes.
//! Blocking callers run it in place with [`PendingCall::block`]; async
//! callers `.await` it, which runs the same unit on tokio's blocking pool.

use std::any::Any;
use std::future::{Future, IntoFuture};
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::envelope::{Envelope, ErrorEnvelope};
use crate::error::{ApiError, ErrorCode, ErrorInfo};
use crate::http::{HttpRequest, HttpResponse, ENTITY_TOKEN_HEADER};
use crate::session::Session;
use crate::settings::Settings;
use crate::transport::Transport;

/// Build the POST for `path`. Fails with `MissingCredential` before doing
/// anything else when the session has no token.
pub fn build_request<Req: Serialize + ?Sized>(
    settings: &Settings,
    session: &Session,
    path: &str,
    request: &Req,
) -> Result<HttpRequest, ApiError> {
    let token = session.entity_token()?;
    if path.trim_matches('/').is_empty() {
        return Err(ApiError::unknown("endpoint path is empty"));
    }
    let body = serde_json::to_string(request).map_err(|e| ApiError::unknown(e.to_string()))?;
    Ok(HttpRequest {
        url: settings.url(path)?,
        headers: vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            (ENTITY_TOKEN_HEADER.to_string(), token.to_string()),
        ],
        body,
    })
}

/// Interpret a response: unwrap `data` on success, map the error envelope
/// otherwise.
pub fn parse_response<Resp: DeserializeOwned>(response: HttpResponse) -> Result<Resp, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Api(error_info(response)));
    }
    serde_json::from_str::<Envelope<Resp>>(&response.body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::unknown(e.to_string()))
}

fn error_info(response: HttpResponse) -> ErrorInfo {
    match serde_json::from_str::<ErrorEnvelope>(&response.body) {
        Ok(envelope) => envelope.into(),
        Err(e) => {
            let message = if response.body.trim().is_empty() {
                empty_body_message(response.status)
            } else {
                debug!(error = %e, "error body is not an envelope");
                response.body
            };
            ErrorInfo::new(i32::from(response.status), ErrorCode::Unknown, message)
        }
    }
}

fn empty_body_message(status: u16) -> String {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("empty response body")
        .to_string()
}

/// Run one call to completion on the current thread.
pub fn dispatch<Req, Resp>(
    transport: &dyn Transport,
    settings: &Settings,
    session: &Session,
    path: &str,
    request: &Req,
) -> Result<Resp, ApiError>
where
    Req: Serialize + ?Sized,
    Resp: DeserializeOwned,
{
    let http_request = build_request(settings, session, path, request).inspect_err(|e| {
        debug!(path, error = %e, "catalog call not sent");
    })?;
    debug!(path, bytes = http_request.body.len(), "dispatching catalog call");

    let result = match transport.execute(&http_request) {
        Ok(response) => {
            debug!(path, status = response.status, "catalog call answered");
            parse_response(response)
        }
        Err(e) => Err(ApiError::TransportFailure(ErrorInfo::connection(e.message))),
    };

    if let Err(error) = &result {
        if error.is_wire_error() {
            let info = error.info();
            warn!(
                path,
                http_code = info.http_code,
                error = %info.error_name,
                message = %info.message,
                "catalog call failed"
            );
            session.report(&info);
        } else {
            warn!(path, error = %error, "catalog response could not be read");
        }
    }
    result
}

/// A catalog call that has been prepared but not yet executed.
///
/// Nothing is sent until the call is either blocked on or awaited.
#[must_use = "a pending call does nothing until it is blocked on or awaited"]
pub struct PendingCall<Req, Resp> {
    transport: Arc<dyn Transport>,
    settings: Arc<Settings>,
    session: Session,
    path: String,
    request: Req,
    response: PhantomData<fn() -> Resp>,
}

impl<Req, Resp> PendingCall<Req, Resp>
where
    Req: Serialize,
    Resp: DeserializeOwned,
{
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        settings: Arc<Settings>,
        session: Session,
        path: String,
        request: Req,
    ) -> Self {
        Self {
            transport,
            settings,
            session,
            path,
            request,
            response: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run the call on the current thread and wait for its result.
    ///
    /// A panic while executing the call is reported as `Unknown`.
    pub fn block(self) -> Result<Resp, ApiError> {
        catch_unwind(AssertUnwindSafe(|| self.run()))
            .unwrap_or_else(|panic| Err(ApiError::unknown(panic_message(panic.as_ref()))))
    }

    fn run(self) -> Result<Resp, ApiError> {
        dispatch(
            self.transport.as_ref(),
            &self.settings,
            &self.session,
            &self.path,
            &self.request,
        )
    }
}

impl<Req, Resp> IntoFuture for PendingCall<Req, Resp>
where
    Req: Serialize + Send + 'static,
    Resp: DeserializeOwned + Send + 'static,
{
    type Output = Result<Resp, ApiError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    /// Execute on tokio's blocking pool when awaited inside a tokio runtime.
    /// Under any other executor the call runs on a dedicated thread instead.
    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            if tokio::runtime::Handle::try_current().is_err() {
                return self.run_on_thread().await;
            }
            match tokio::task::spawn_blocking(move || self.run()).await {
                Ok(result) => result,
                Err(e) if e.is_panic() => Err(ApiError::unknown(panic_message(
                    e.into_panic().as_ref(),
                ))),
                Err(e) => Err(ApiError::unknown(e.to_string())),
            }
        })
    }
}

impl<Req, Resp> PendingCall<Req, Resp>
where
    Req: Serialize + Send + 'static,
    Resp: DeserializeOwned + Send + 'static,
{
    async fn run_on_thread(self) -> Result<Resp, ApiError> {
        let (tx, rx) = oneshot::channel();
        std::thread::Builder::new()
            .name("catalog-call".to_string())
            .spawn(move || {
                let _ = tx.send(self.block());
            })
            .map_err(|e| ApiError::unknown(e.to_string()))?;
        rx.await
            .unwrap_or_else(|_| Err(ApiError::unknown("catalog call worker exited")))
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "catalog call panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;
    use crate::transport::TransportError;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
        title: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct GetItem {
        item: Item,
    }

    fn settings() -> Settings {
        Settings::with_base_url("http://localhost:3000").sdk_tag("")
    }

    fn session() -> Session {
        Session::new().with_entity_token("T")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn build_request_posts_json_with_token() {
        let req = build_request(&settings(), &session(), "/Catalog/GetItem", &json!({"itemId": "A"}))
            .unwrap();
        assert_eq!(req.url, "http://localhost:3000/Catalog/GetItem");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header(ENTITY_TOKEN_HEADER), Some("T"));
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body, json!({"itemId": "A"}));
    }

    #[test]
    fn build_request_without_token_is_missing_credential() {
        let err = build_request(&settings(), &Session::new(), "/Catalog/GetItem", &json!({}))
            .unwrap_err();
        assert_eq!(err, ApiError::MissingCredential);
    }

    #[test]
    fn build_request_rejects_empty_path() {
        let err = build_request(&settings(), &session(), "/", &json!({})).unwrap_err();
        assert!(matches!(err, ApiError::Unknown { .. }));
    }

    #[test]
    fn build_request_accepts_unit_payload() {
        let req = build_request(&settings(), &session(), "/Catalog/GetCatalogConfig", &()).unwrap();
        assert_eq!(req.body, "null");
    }

    #[test]
    fn parse_success_unwraps_data() {
        let body = r#"{"code":200,"status":"OK","data":{"item":{"id":"A","title":"X"}}}"#;
        let parsed: GetItem = parse_response(response(200, body)).unwrap();
        assert_eq!(parsed.item.id, "A");
        assert_eq!(parsed.item.title, "X");
    }

    #[test]
    fn parse_malformed_success_is_unknown() {
        let err = parse_response::<GetItem>(response(200, "not json")).unwrap_err();
        let info = err.info();
        assert!(matches!(err, ApiError::Unknown { .. }));
        assert_eq!(info.http_code, -1);
        assert_eq!(info.error_code, ErrorCode::Unknown);
    }

    #[test]
    fn parse_success_with_wrong_shape_is_unknown() {
        let body = r#"{"code":200,"status":"OK","data":{"item":{"id":7}}}"#;
        let err = parse_response::<GetItem>(response(200, body)).unwrap_err();
        assert!(matches!(err, ApiError::Unknown { .. }));
    }

    #[test]
    fn parse_error_envelope() {
        let body = r#"{"code":404,"status":"NotFound","error":"ItemNotFound","errorCode":1047,"errorMessage":"Item not found"}"#;
        let err = parse_response::<GetItem>(response(404, body)).unwrap_err();
        let ApiError::Api(info) = err else {
            panic!("expected Api error");
        };
        assert_eq!(info.http_code, 404);
        assert_eq!(info.error_code, ErrorCode::ItemNotFound);
        assert_eq!(info.message, "Item not found");
    }

    #[test]
    fn parse_error_without_envelope_keeps_status_and_body() {
        let err = parse_response::<GetItem>(response(502, "Bad Gateway")).unwrap_err();
        let ApiError::Api(info) = err else {
            panic!("expected Api error");
        };
        assert_eq!(info.http_code, 502);
        assert_eq!(info.error_code, ErrorCode::Unknown);
        assert_eq!(info.message, "Bad Gateway");
    }

    #[test]
    fn parse_error_with_empty_body_uses_status_reason() {
        let err = parse_response::<GetItem>(response(503, "")).unwrap_err();
        let info = err.info();
        assert_eq!(info.http_code, 503);
        assert_eq!(info.message, "Service Unavailable");

        let err = parse_response::<GetItem>(response(599, "  ")).unwrap_err();
        assert_eq!(err.info().message, "empty response body");
    }

    #[test]
    fn dispatch_without_token_sends_nothing() {
        let transport = FakeTransport::new().reply(200, "{}");
        let result: Result<GetItem, _> =
            dispatch(&transport, &settings(), &Session::new(), "/Catalog/GetItem", &json!({}));
        assert_eq!(result.unwrap_err(), ApiError::MissingCredential);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn dispatch_transport_failure_reports_connection_error() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let session = session().with_error_handler(move |info| sink.lock().unwrap().push(info.clone()));
        let transport = FakeTransport::new().fail("connection refused");

        let err = dispatch::<_, GetItem>(&transport, &settings(), &session, "/Catalog/GetItem", &json!({}))
            .unwrap_err();

        let ApiError::TransportFailure(info) = &err else {
            panic!("expected transport failure");
        };
        assert_eq!(info.error_code, ErrorCode::ConnectionError);
        assert_eq!(info.message, "connection refused");
        assert_eq!(seen.lock().unwrap().as_slice(), &[info.clone()]);
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn dispatch_api_error_invokes_handler_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let session = session().with_error_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let body = r#"{"code":400,"status":"BadRequest","error":"InvalidParams","errorCode":1000,"errorMessage":"bad","errorDetails":{"Id":["required"]}}"#;
        let transport = FakeTransport::new().reply(400, body);

        let err = dispatch::<_, GetItem>(&transport, &settings(), &session, "/Catalog/GetItem", &json!({}))
            .unwrap_err();

        assert_eq!(err.error_code(), ErrorCode::InvalidParams);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dispatch_malformed_success_does_not_invoke_handler() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let session = session().with_error_handler(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let transport = FakeTransport::new().reply(200, "{\"code\":200");

        let err = dispatch::<_, GetItem>(&transport, &settings(), &session, "/Catalog/GetItem", &json!({}))
            .unwrap_err();

        assert!(matches!(err, ApiError::Unknown { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    struct PanickingTransport;

    impl Transport for PanickingTransport {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            panic!("transport exploded");
        }
    }

    fn pending(transport: Arc<dyn Transport>) -> PendingCall<serde_json::Value, GetItem> {
        PendingCall::new(
            transport,
            Arc::new(settings()),
            session(),
            "/Catalog/GetItem".to_string(),
            json!({"itemId": "A"}),
        )
    }

    #[test]
    fn block_converts_panic_to_unknown() {
        let err = pending(Arc::new(PanickingTransport)).block().unwrap_err();
        assert_eq!(
            err,
            ApiError::Unknown {
                message: "transport exploded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn await_converts_panic_to_unknown() {
        let err = pending(Arc::new(PanickingTransport)).await.unwrap_err();
        assert_eq!(err.info().message, "transport exploded");
    }

    #[tokio::test]
    async fn await_and_block_agree() {
        let body = r#"{"code":200,"status":"OK","data":{"item":{"id":"A","title":"X"}}}"#;
        let blocking = pending(Arc::new(FakeTransport::new().reply(200, body))).block();
        let deferred = pending(Arc::new(FakeTransport::new().reply(200, body))).await;
        assert_eq!(blocking, deferred);
        assert_eq!(deferred.unwrap().item.id, "A");
    }

    /// Minimal executor with no tokio runtime behind it.
    fn block_on<F: Future>(future: F) -> F::Output {
        use std::task::{Context, Poll, Wake, Waker};
        use std::thread::Thread;

        struct Unpark(Thread);

        impl Wake for Unpark {
            fn wake(self: Arc<Self>) {
                self.0.unpark();
            }
        }

        let waker = Waker::from(Arc::new(Unpark(std::thread::current())));
        let mut cx = Context::from_waker(&waker);
        let mut future = std::pin::pin!(future);
        loop {
            match future.as_mut().poll(&mut cx) {
                Poll::Ready(output) => return output,
                Poll::Pending => std::thread::park(),
            }
        }
    }

    #[test]
    fn await_without_tokio_runtime_still_checks_token() {
        let transport = Arc::new(FakeTransport::new().reply(200, "{}"));
        let call: PendingCall<_, GetItem> = PendingCall::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::new(settings()),
            Session::new(),
            "/Catalog/GetItem".to_string(),
            json!({"itemId": "A"}),
        );
        let result = catch_unwind(AssertUnwindSafe(|| block_on(call.into_future())));
        assert_eq!(result.unwrap().unwrap_err(), ApiError::MissingCredential);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn await_without_tokio_runtime_matches_block() {
        let body = r#"{"code":200,"status":"OK","data":{"item":{"id":"A","title":"X"}}}"#;
        let deferred = block_on(pending(Arc::new(FakeTransport::new().reply(200, body))).into_future());
        assert_eq!(deferred.unwrap().item.id, "A");

        let err = block_on(pending(Arc::new(PanickingTransport)).into_future()).unwrap_err();
        assert_eq!(err.info().message, "transport exploded");
    }
}
