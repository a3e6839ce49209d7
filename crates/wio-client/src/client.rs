//! # Gateway Client
//!
//! `WioPayments` is the public facade over the gateway API.
//! Every method validates its input, makes exactly one request, and maps the
//! response. A validation failure returns before anything touches the network.

use crate::config::WioConfig;
use crate::transport::HttpTransport;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use wio_core::validate::{require_id, Params};
use wio_core::{
    BoxedTransport, GatewayRequest, HostedSession, HostedSessionRequest, HostedSessionStatus,
    Method, Payment, PaymentLink, PaymentLinkFilters, PaymentLinkList, PaymentLinkRequest,
    PaymentRequest, PaymentStatus, RequestOptions, Transport, WioError, WioResult,
};

/// Gateway API paths
pub mod paths {
    pub const CREATE_PAYMENT: &str = "/api/v1/create-payment";
    pub const HOSTED_SESSIONS: &str = "/api/v1/hosted/sessions";
    pub const PAYMENT_LINKS: &str = "/api/v1/payment-links";

    pub fn payment_status(payment_id: &str) -> String {
        format!("/api/v1/payment/{}/status", payment_id)
    }

    pub fn hosted_session_status(session_id: &str) -> String {
        format!("{}/{}/status", HOSTED_SESSIONS, session_id)
    }

    pub fn payment_link(link_id: &str) -> String {
        format!("{}/{}", PAYMENT_LINKS, link_id)
    }
}

/// WioPayments gateway client
///
/// Holds only immutable configuration, so a clone can be shared across tasks.
#[derive(Clone)]
pub struct WioPayments {
    auth_header: String,
    transport: BoxedTransport,
}

impl WioPayments {
    /// Create a client that talks HTTP to `config.base_url`
    pub fn new(config: WioConfig) -> WioResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self {
            auth_header: config.auth_header(),
            transport: Arc::new(transport),
        })
    }

    /// Create from environment variables
    pub fn from_env() -> WioResult<Self> {
        let config = WioConfig::from_env()?;
        Self::new(config)
    }

    /// Create a client over any transport (fakes, proxies)
    pub fn with_transport(api_key: &str, transport: BoxedTransport) -> Self {
        Self {
            auth_header: WioConfig::new(api_key).auth_header(),
            transport,
        }
    }

    fn options(&self) -> RequestOptions {
        RequestOptions::new().with_header("Authorization", self.auth_header.clone())
    }

    async fn get(&self, path: &str) -> WioResult<Value> {
        self.transport.request(Method::Get, path, self.options()).await
    }

    async fn post(&self, path: &str, body: Params) -> WioResult<Value> {
        let options = self.options().with_json(Value::Object(body));
        self.transport.request(Method::Post, path, options).await
    }

    /// Create a payment.
    ///
    /// The returned `Payment` carries the `client_secret` the card widget needs.
    /// Confirming the charge and re-checking its status are separate calls.
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn create_payment(&self, request: &PaymentRequest) -> WioResult<Payment> {
        let body = request.prepare()?;
        let raw = self.post(paths::CREATE_PAYMENT, body).await?;
        let payment = Payment::from_value(&raw);

        info!(
            "Created payment: id={}, status={}",
            payment.id.as_deref().unwrap_or("-"),
            payment.status.as_deref().unwrap_or("-")
        );
        Ok(payment)
    }

    /// Fetch the current status of a payment
    #[instrument(skip(self))]
    pub async fn get_payment_status(&self, payment_id: &str) -> WioResult<PaymentStatus> {
        require_id("payment_id", payment_id)?;
        let raw = self.get(&paths::payment_status(payment_id)).await?;
        Ok(PaymentStatus::from_value(&raw))
    }

    /// Create a session on the gateway-hosted payment page
    #[instrument(skip(self, request), fields(order_id = %request.order_id))]
    pub async fn create_hosted_session(
        &self,
        request: &HostedSessionRequest,
    ) -> WioResult<HostedSession> {
        let body = request.prepare()?;
        let raw = self.post(paths::HOSTED_SESSIONS, body).await?;
        let session = HostedSession::from_value(&raw);

        info!(
            "Created hosted session: id={}",
            session.session_id.as_deref().unwrap_or("-")
        );
        Ok(session)
    }

    /// Create a hosted session and return only the URL to redirect the customer to
    pub async fn create_hosted_payment_url(
        &self,
        request: &HostedSessionRequest,
    ) -> WioResult<String> {
        let session = self.create_hosted_session(request).await?;
        session.payment_url.ok_or_else(|| {
            WioError::api(200, None, "Hosted session response has no payment_url")
        })
    }

    /// Fetch the status of a hosted session
    #[instrument(skip(self))]
    pub async fn get_hosted_session_status(
        &self,
        session_id: &str,
    ) -> WioResult<HostedSessionStatus> {
        require_id("session_id", session_id)?;
        let raw = self.get(&paths::hosted_session_status(session_id)).await?;
        Ok(HostedSessionStatus::from_value(&raw))
    }

    /// Create a shareable payment link
    #[instrument(skip(self, request), fields(description = %request.description))]
    pub async fn create_payment_link(&self, request: &PaymentLinkRequest) -> WioResult<PaymentLink> {
        let body = request.prepare()?;
        let raw = self.post(paths::PAYMENT_LINKS, body).await?;
        let link = PaymentLink::from_value(&raw);

        info!(
            "Created payment link: id={}, url={}",
            link.id.as_deref().unwrap_or("-"),
            link.url.as_deref().unwrap_or("-")
        );
        Ok(link)
    }

    /// Fetch a payment link's details and status
    #[instrument(skip(self))]
    pub async fn get_payment_link(&self, link_id: &str) -> WioResult<PaymentLink> {
        require_id("link_id", link_id)?;
        let raw = self.get(&paths::payment_link(link_id)).await?;
        Ok(PaymentLink::from_value(&raw))
    }

    /// List the site's payment links, optionally filtered
    #[instrument(skip(self))]
    pub async fn list_payment_links(
        &self,
        filters: &PaymentLinkFilters,
    ) -> WioResult<PaymentLinkList> {
        let path = match filters.to_query() {
            Some(query) => format!("{}?{}", paths::PAYMENT_LINKS, query),
            None => paths::PAYMENT_LINKS.to_string(),
        };

        let raw = self.get(&path).await?;
        let list = PaymentLinkList::from_value(&raw);

        debug!("Listed {} payment links", list.len());
        Ok(list)
    }
}

impl std::fmt::Debug for WioPayments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WioPayments").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use wio_core::Customer;

    /// Records every request and answers with a canned body
    struct RecordingTransport {
        response: Value,
        calls: Mutex<Vec<(Method, String, RequestOptions)>>,
    }

    impl RecordingTransport {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(Method, String, RequestOptions)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn request(
            &self,
            method: Method,
            path: &str,
            options: RequestOptions,
        ) -> WioResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((method, path.to_string(), options));
            Ok(self.response.clone())
        }
    }

    fn client(transport: &Arc<RecordingTransport>) -> WioPayments {
        WioPayments::with_transport("wio_test_key", transport.clone())
    }

    #[tokio::test]
    async fn test_create_payment_normalizes_currency() {
        let transport = RecordingTransport::new(json!({
            "id": "pay_1", "amount": 50.0, "currency": "USD", "status": "pending", "order_id": "O1"
        }));

        let payment = client(&transport)
            .create_payment(&PaymentRequest::new(50.00, "usd", "O1"))
            .await
            .unwrap();

        assert_eq!(payment.currency.as_deref(), Some("USD"));

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        let (method, path, options) = &calls[0];
        assert_eq!(*method, Method::Post);
        assert_eq!(path, "/api/v1/create-payment");
        assert_eq!(options.header("Authorization"), Some("Bearer wio_test_key"));
        let body = options.json.as_ref().unwrap();
        assert_eq!(body["currency"], json!("USD"));
        assert_eq!(body["order_id"], json!("O1"));
    }

    #[tokio::test]
    async fn test_validation_error_skips_network() {
        let transport = RecordingTransport::new(json!({}));
        let client = client(&transport);

        let err = client
            .create_payment(&PaymentRequest::new(50.0, "XYZ", "O1"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unsupported currency");

        let err = client
            .create_payment_link(&PaymentLinkRequest::new(25.0, "USD", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: description");

        let err = client
            .create_hosted_session(&HostedSessionRequest::new(
                75.0,
                "USD",
                "H1",
                "https://shop.example.com/ok",
                "/cancel",
            ))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid cancel URL");

        let err = client.get_payment_status("").await.unwrap_err();
        assert!(err.is_validation());

        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_get_requests_have_no_body() {
        let transport = RecordingTransport::new(json!({"id": "pay_1", "status": "succeeded"}));
        let status = client(&transport).get_payment_status("pay_1").await.unwrap();

        assert_eq!(status.status.as_deref(), Some("succeeded"));
        let (method, path, options) = &transport.calls()[0];
        assert_eq!(*method, Method::Get);
        assert_eq!(path, "/api/v1/payment/pay_1/status");
        assert!(options.json.is_none());
    }

    #[tokio::test]
    async fn test_hosted_session_flow() {
        let transport = RecordingTransport::new(json!({
            "session_id": "hs_1",
            "payment_url": "https://gw.wiopayments.com/pay/hs_1",
            "expires_at": "2024-05-01 11:00:00"
        }));
        let request = HostedSessionRequest::new(
            75.0,
            "eur",
            "HOSTED_1",
            "https://shop.example.com/success",
            "https://shop.example.com/cancel",
        )
        .with_customer(Customer::new("Jane Smith", "jane@example.com"))
        .with_metadata("product_id", "premium_service");

        let url = client(&transport).create_hosted_payment_url(&request).await.unwrap();
        assert_eq!(url, "https://gw.wiopayments.com/pay/hs_1");

        let (_, path, options) = &transport.calls()[0];
        assert_eq!(path, "/api/v1/hosted/sessions");
        let body = options.json.as_ref().unwrap();
        assert_eq!(body["currency"], json!("EUR"));
        assert_eq!(body["metadata"]["product_id"], json!("premium_service"));
    }

    #[tokio::test]
    async fn test_hosted_payment_url_missing() {
        let transport = RecordingTransport::new(json!({"session_id": "hs_1"}));
        let request = HostedSessionRequest::new(
            75.0,
            "USD",
            "HOSTED_1",
            "https://shop.example.com/success",
            "https://shop.example.com/cancel",
        );

        let err = client(&transport).create_hosted_payment_url(&request).await.unwrap_err();
        assert!(matches!(err, WioError::Api { .. }));
    }

    #[tokio::test]
    async fn test_session_and_link_paths() {
        let transport = RecordingTransport::new(json!({"status": "open"}));
        let client = client(&transport);

        client.get_hosted_session_status("hs_9").await.unwrap();
        client.get_payment_link("pl_9").await.unwrap();
        client
            .list_payment_links(&PaymentLinkFilters::new())
            .await
            .unwrap();
        client
            .list_payment_links(&PaymentLinkFilters::new().status("active"))
            .await
            .unwrap();

        let paths: Vec<String> = transport.calls().into_iter().map(|(_, p, _)| p).collect();
        assert_eq!(
            paths,
            vec![
                "/api/v1/hosted/sessions/hs_9/status",
                "/api/v1/payment-links/pl_9",
                "/api/v1/payment-links",
                "/api/v1/payment-links?status=active",
            ]
        );
    }
}
