//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use url::Url;

use crate::domain::{
    ApiKey, BlacklistEntry, Bulk, Contact, DeliveryStatus, JoinStyle, MessageId, MessageRecord,
    MessageText, NewContact, Payment, PaymentSystem, RawPhoneNumber, RequestParams,
    ResponseEnvelope, SendMessage, SenderName, Tag, TaskEntry, UserLogin, ValidationError,
};
use crate::transport;
use crate::transport::{EnvelopeError, ExtractError};

const DEFAULT_GATEWAY: &str = "littlesms.ru/api";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.post(url).form(&params).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Authentication mode for gateway calls.
///
/// Use [`Auth::api_key`] to transmit the account login and the raw API key as
/// form fields, or [`Auth::signed`] to transmit the login plus a request
/// signature derived from the secret (the secret itself never goes on the
/// wire in that mode).
pub enum Auth {
    /// Authenticate by sending `user` + `apikey` form fields.
    ApiKey { user: UserLogin, key: ApiKey },
    /// Authenticate by sending `user` + a computed `sign` form field.
    Signed { user: UserLogin, key: ApiKey },
}

impl Auth {
    /// Create [`Auth::ApiKey`] and validate that both parts are non-empty.
    pub fn api_key(
        user: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::ApiKey {
            user: UserLogin::new(user)?,
            key: ApiKey::new(key)?,
        })
    }

    /// Create [`Auth::Signed`] and validate that both parts are non-empty.
    pub fn signed(
        user: impl Into<String>,
        key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Signed {
            user: UserLogin::new(user)?,
            key: ApiKey::new(key)?,
        })
    }

    /// Append the auth parameters to an already-flattened request.
    ///
    /// In signed mode the signature covers every value pushed so far plus
    /// `user`, in order; `sign` itself is excluded.
    fn append_to(&self, params: &mut Vec<(String, String)>) {
        match self {
            Self::ApiKey { user, key } => {
                params.push((UserLogin::FIELD.to_owned(), user.as_str().to_owned()));
                params.push((ApiKey::FIELD.to_owned(), key.as_str().to_owned()));
            }
            Self::Signed { user, key } => {
                params.push((UserLogin::FIELD.to_owned(), user.as_str().to_owned()));
                let signature = transport::legacy_sign(
                    params.iter().map(|(_, value)| value.as_str()),
                    key.as_str(),
                );
                params.push(("sign".to_owned(), signature));
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`LittleSmsClient`].
///
/// The four failure classes the gateway contract distinguishes are kept
/// apart: transport failures, non-2xx HTTP statuses, undecodable bodies, and
/// logical API errors (`status == "error"`, raw envelope preserved).
pub enum LittleSmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The configured gateway and endpoint do not form a valid URL.
    #[error("invalid endpoint URL {url}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },

    /// Response body is not the JSON envelope the gateway promises.
    #[error("decode error: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway reported `status: "error"`; the full envelope is kept.
    #[error("API error")]
    Api { envelope: ResponseEnvelope },

    /// A success envelope lacks the payload field the endpoint promises.
    #[error("response field {field} is missing")]
    MissingField { field: &'static str },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<EnvelopeError> for LittleSmsError {
    fn from(err: EnvelopeError) -> Self {
        Self::Decode(Box::new(err))
    }
}

impl From<ExtractError> for LittleSmsError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::MissingField { field } => Self::MissingField { field },
            shape @ ExtractError::FieldShape { .. } => Self::Decode(Box::new(shape)),
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`LittleSmsClient`].
///
/// Use this to pick the gateway host, TLS behavior, test mode, list join
/// style, timeout, or user-agent.
pub struct LittleSmsClientBuilder {
    auth: Auth,
    gateway: String,
    use_tls: bool,
    accept_invalid_certs: bool,
    test_mode: bool,
    join_style: JoinStyle,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl LittleSmsClientBuilder {
    /// Create a builder with the default gateway and plain-HTTP transport.
    pub fn new(auth: Auth) -> Self {
        Self {
            auth,
            gateway: DEFAULT_GATEWAY.to_owned(),
            use_tls: false,
            accept_invalid_certs: false,
            test_mode: false,
            join_style: JoinStyle::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the gateway host and API root (default `littlesms.ru/api`).
    pub fn gateway(mut self, gateway: impl Into<String>) -> Self {
        self.gateway = gateway.into();
        self
    }

    /// Switch between `https` and `http` for every request.
    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// Skip TLS certificate validation.
    ///
    /// A compatibility concession for the gateway's certificate setup; leave
    /// this off unless the handshake actually fails.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Route message sends to the gateway's non-delivering sandbox.
    pub fn test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    /// Pick the delimiter used when list parameters are flattened.
    pub fn join_style(mut self, join_style: JoinStyle) -> Self {
        self.join_style = join_style;
        self
    }

    /// Set an HTTP client timeout applied to the entire request (default 15 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`LittleSmsClient`].
    pub fn build(self) -> Result<LittleSmsClient, LittleSmsError> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .redirect(reqwest::redirect::Policy::none());
        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| LittleSmsError::Transport(Box::new(err)))?;

        Ok(LittleSmsClient {
            auth: self.auth,
            gateway: self.gateway,
            use_tls: self.use_tls,
            test_mode: self.test_mode,
            join_style: self.join_style,
            http: Arc::new(ReqwestTransport { client }),
            last_response: Arc::new(Mutex::new(None)),
        })
    }
}

#[derive(Clone)]
/// High-level LittleSMS client.
///
/// Every public operation performs one authenticated POST to
/// `{scheme}://{gateway}/{endpoint}` and decodes the JSON envelope. Typed
/// methods return their payload directly; [`LittleSmsClient::call`] is the
/// raw escape hatch for endpoints this crate does not model.
pub struct LittleSmsClient {
    auth: Auth,
    gateway: String,
    use_tls: bool,
    test_mode: bool,
    join_style: JoinStyle,
    http: Arc<dyn HttpTransport>,
    last_response: Arc<Mutex<Option<ResponseEnvelope>>>,
}

impl LittleSmsClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`LittleSmsClient::builder`].
    pub fn new(auth: Auth) -> Result<Self, LittleSmsError> {
        Self::builder(auth).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(auth: Auth) -> LittleSmsClientBuilder {
        LittleSmsClientBuilder::new(auth)
    }

    /// The configured gateway host and API root.
    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    /// Issue an authenticated call to an arbitrary endpoint.
    ///
    /// Returns the decoded envelope whatever its `status`; callers check
    /// [`ResponseEnvelope::is_success`] themselves. The typed methods below
    /// are thin wrappers over this primitive.
    pub async fn call(
        &self,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        self.dispatch(endpoint, params, true).await
    }

    /// Issue an unauthenticated call (the signup flow runs before an
    /// account exists).
    pub async fn call_anonymous(
        &self,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        self.dispatch(endpoint, params, false).await
    }

    /// The envelope decoded from the most recent request, if any.
    ///
    /// Convenience over the value each call already returns. Concurrent
    /// callers should trust their own return values instead: the slot is
    /// overwritten by every request on this client and its clones.
    pub fn last_response(&self) -> Option<ResponseEnvelope> {
        self.last_response
            .lock()
            .ok()
            .and_then(|last| last.clone())
    }

    /// Whether the most recent request succeeded; `None` before any request.
    pub fn is_success(&self) -> Option<bool> {
        self.last_response
            .lock()
            .ok()
            .and_then(|last| last.as_ref().map(ResponseEnvelope::is_success))
    }

    // --- messages ---

    /// Send an SMS to one or more recipients (`message/send`).
    ///
    /// With test mode enabled on the client, the gateway simulates delivery
    /// instead of performing it.
    ///
    /// Errors:
    /// - [`LittleSmsError::Validation`] for invalid domain values,
    /// - [`LittleSmsError::Api`] when the gateway reports a logical error,
    /// - [`LittleSmsError::Transport`] / [`LittleSmsError::Decode`] for
    ///   wire-level failures.
    pub async fn send_message(
        &self,
        request: SendMessage,
    ) -> Result<Vec<MessageId>, LittleSmsError> {
        let params = transport::message::encode_send_params(&request, self.test_mode);
        let envelope = self.request("message/send", params).await?;
        Ok(transport::message::decode_send_response(&envelope)?)
    }

    /// Check delivery status for previously sent messages (`message/status`).
    pub async fn message_status(
        &self,
        ids: &[MessageId],
    ) -> Result<BTreeMap<MessageId, DeliveryStatus>, LittleSmsError> {
        let params = transport::message::encode_status_params(ids);
        let envelope = self.request("message/status", params).await?;
        Ok(transport::message::decode_status_response(&envelope)?)
    }

    /// Quote the price of a message without sending it (`message/price`).
    pub async fn message_price(
        &self,
        recipients: &[RawPhoneNumber],
        message: &MessageText,
    ) -> Result<f64, LittleSmsError> {
        let params = transport::message::encode_price_params(recipients, message);
        let envelope = self.request("message/price", params).await?;
        Ok(transport::message::decode_price_response(&envelope)?)
    }

    /// List sent messages (`message/list`). `filter` is forwarded verbatim.
    pub async fn message_list(
        &self,
        filter: RequestParams,
    ) -> Result<Vec<MessageRecord>, LittleSmsError> {
        let envelope = self.request("message/list", filter).await?;
        Ok(transport::message::decode_list_response(&envelope)?)
    }

    #[deprecated(since = "0.3.0", note = "use `message_list`")]
    /// Former name of [`LittleSmsClient::message_list`].
    pub async fn message_history(
        &self,
        filter: RequestParams,
    ) -> Result<Vec<MessageRecord>, LittleSmsError> {
        self.message_list(filter).await
    }

    // --- account ---

    /// Current account balance (`user/balance`).
    pub async fn balance(&self) -> Result<f64, LittleSmsError> {
        let params = transport::account::encode_balance_params();
        let envelope = self.request("user/balance", params).await?;
        Ok(transport::account::decode_balance_response(&envelope)?)
    }

    // --- contacts ---

    /// List address-book contacts (`contact/list`).
    pub async fn contact_list(
        &self,
        filter: RequestParams,
    ) -> Result<Vec<Contact>, LittleSmsError> {
        let envelope = self.request("contact/list", filter).await?;
        Ok(transport::contact::decode_list_response(&envelope)?)
    }

    /// Create a contact (`contact/create`); returns its id.
    pub async fn contact_create(&self, contact: NewContact) -> Result<u64, LittleSmsError> {
        let params = transport::contact::encode_create_params(&contact);
        let envelope = self.request("contact/create", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Update a contact (`contact/update`); returns its id.
    pub async fn contact_update(
        &self,
        id: u64,
        changes: RequestParams,
    ) -> Result<u64, LittleSmsError> {
        let params = transport::contact::encode_update_params(id, changes);
        let envelope = self.request("contact/update", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Delete a contact (`contact/delete`); returns the removed count.
    pub async fn contact_delete(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::contact::encode_delete_params(id);
        let envelope = self.request("contact/delete", params).await?;
        Ok(transport::envelope::count_field(&envelope, "count")?)
    }

    // --- tags ---

    /// List tags (`tag/list`).
    pub async fn tag_list(&self, filter: RequestParams) -> Result<Vec<Tag>, LittleSmsError> {
        let envelope = self.request("tag/list", filter).await?;
        Ok(transport::tag::decode_list_response(&envelope)?)
    }

    /// Create a tag (`tag/create`); returns its id.
    pub async fn tag_create(&self, params: RequestParams) -> Result<u64, LittleSmsError> {
        let envelope = self.request("tag/create", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Update a tag (`tag/update`); returns its id.
    pub async fn tag_update(&self, id: u64, changes: RequestParams) -> Result<u64, LittleSmsError> {
        let params = transport::tag::encode_update_params(id, changes);
        let envelope = self.request("tag/update", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Delete a tag (`tag/delete`); returns the removed count.
    pub async fn tag_delete(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::tag::encode_delete_params(id);
        let envelope = self.request("tag/delete", params).await?;
        Ok(transport::envelope::count_field(&envelope, "count")?)
    }

    // --- tasks ---

    /// List scheduled tasks (`task/list`).
    pub async fn task_list(&self, filter: RequestParams) -> Result<Vec<TaskEntry>, LittleSmsError> {
        let envelope = self.request("task/list", filter).await?;
        Ok(transport::task::decode_list_response(&envelope)?)
    }

    /// Create a task (`task/create`); returns its id.
    pub async fn task_create(&self, params: RequestParams) -> Result<u64, LittleSmsError> {
        let envelope = self.request("task/create", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Update a task (`task/update`); returns its id.
    pub async fn task_update(
        &self,
        id: u64,
        changes: RequestParams,
    ) -> Result<u64, LittleSmsError> {
        let params = transport::task::encode_update_params(id, changes);
        let envelope = self.request("task/update", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Delete a task (`task/delete`); returns the removed count.
    pub async fn task_delete(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::task::encode_delete_params(id);
        let envelope = self.request("task/delete", params).await?;
        Ok(transport::envelope::count_field(&envelope, "count")?)
    }

    // --- sender names ---

    /// Register a sender name (`sender/create`); the gateway's response
    /// shape varies, so the whole envelope is returned.
    pub async fn sender_create(
        &self,
        params: RequestParams,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        self.request("sender/create", params).await
    }

    /// Confirm a sender name with the code from the verification SMS
    /// (`sender/confirm`); returns its id.
    pub async fn sender_confirm(&self, id: u64, code: &str) -> Result<u64, LittleSmsError> {
        let params = transport::sender::encode_confirm_params(id, code);
        let envelope = self.request("sender/confirm", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Make a sender name the account default (`sender/default`).
    pub async fn sender_default(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::sender::encode_default_params(id);
        let envelope = self.request("sender/default", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Delete a sender name (`sender/delete`); returns the removed count.
    pub async fn sender_delete(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::sender::encode_delete_params(id);
        let envelope = self.request("sender/delete", params).await?;
        Ok(transport::envelope::count_field(&envelope, "count")?)
    }

    /// List registered sender names (`sender/list`).
    pub async fn sender_list(
        &self,
        filter: RequestParams,
    ) -> Result<Vec<SenderName>, LittleSmsError> {
        let envelope = self.request("sender/list", filter).await?;
        Ok(transport::sender::decode_list_response(&envelope)?)
    }

    // --- blacklist ---

    /// Add numbers to the stop list (`blacklist/append`); returns the new
    /// entry id.
    pub async fn blacklist_append(
        &self,
        phones: &[RawPhoneNumber],
        description: Option<&str>,
    ) -> Result<u64, LittleSmsError> {
        let params = transport::blacklist::encode_append_params(phones, description);
        let envelope = self.request("blacklist/append", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Remove numbers from the stop list (`blacklist/delete`); returns the
    /// removed count.
    pub async fn blacklist_delete(&self, phones: &[RawPhoneNumber]) -> Result<u64, LittleSmsError> {
        let params = transport::blacklist::encode_delete_params(phones);
        let envelope = self.request("blacklist/delete", params).await?;
        Ok(transport::envelope::count_field(&envelope, "count")?)
    }

    /// List stop-list entries (`blacklist/list`).
    pub async fn blacklist_list(
        &self,
        filter: RequestParams,
    ) -> Result<Vec<BlacklistEntry>, LittleSmsError> {
        let envelope = self.request("blacklist/list", filter).await?;
        Ok(transport::blacklist::decode_list_response(&envelope)?)
    }

    // --- bulk campaigns ---

    /// List bulk campaigns (`bulk/list`).
    pub async fn bulk_list(&self, filter: RequestParams) -> Result<Vec<Bulk>, LittleSmsError> {
        let envelope = self.request("bulk/list", filter).await?;
        Ok(transport::bulk::decode_list_response(&envelope)?)
    }

    /// Create a bulk campaign (`bulk/create`); returns its id.
    pub async fn bulk_create(&self, params: RequestParams) -> Result<u64, LittleSmsError> {
        let envelope = self.request("bulk/create", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Update a bulk campaign (`bulk/update`); returns its id.
    pub async fn bulk_update(
        &self,
        id: u64,
        changes: RequestParams,
    ) -> Result<u64, LittleSmsError> {
        let params = transport::bulk::encode_update_params(id, changes);
        let envelope = self.request("bulk/update", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Delete a bulk campaign (`bulk/delete`); returns the removed count.
    pub async fn bulk_delete(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::bulk::encode_id_params(id);
        let envelope = self.request("bulk/delete", params).await?;
        Ok(transport::envelope::count_field(&envelope, "count")?)
    }

    /// Start sending a bulk campaign (`bulk/send`).
    pub async fn bulk_send(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::bulk::encode_id_params(id);
        let envelope = self.request("bulk/send", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    /// Stop an in-flight bulk campaign (`bulk/stop`).
    pub async fn bulk_stop(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::bulk::encode_id_params(id);
        let envelope = self.request("bulk/stop", params).await?;
        Ok(transport::envelope::count_field(&envelope, "id")?)
    }

    // --- payments ---

    /// List payment providers (`payment/systems`).
    pub async fn payment_systems(&self) -> Result<Vec<PaymentSystem>, LittleSmsError> {
        let params = transport::payment::encode_systems_params();
        let envelope = self.request("payment/systems", params).await?;
        Ok(transport::payment::decode_systems_response(&envelope)?)
    }

    /// Create an invoice (`payment/create`); the gateway's response shape
    /// varies, so the whole envelope is returned.
    pub async fn payment_create(
        &self,
        params: RequestParams,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        self.request("payment/create", params).await
    }

    /// Payment gateway URL for an invoice (`payment/url`).
    pub async fn payment_url(&self, id: u64) -> Result<String, LittleSmsError> {
        let params = transport::payment::encode_id_params(id);
        let envelope = self.request("payment/url", params).await?;
        Ok(transport::payment::decode_url_response(&envelope)?)
    }

    /// Delete an unpaid invoice (`payment/delete`); returns the removed
    /// count.
    pub async fn payment_delete(&self, id: u64) -> Result<u64, LittleSmsError> {
        let params = transport::payment::encode_id_params(id);
        let envelope = self.request("payment/delete", params).await?;
        Ok(transport::envelope::count_field(&envelope, "count")?)
    }

    /// List invoices (`payment/list`).
    pub async fn payment_list(
        &self,
        filter: RequestParams,
    ) -> Result<Vec<Payment>, LittleSmsError> {
        let envelope = self.request("payment/list", filter).await?;
        Ok(transport::payment::decode_list_response(&envelope)?)
    }

    // --- signup ---

    /// Start the registration flow (`signup/request`, anonymous).
    pub async fn signup_request(
        &self,
        params: RequestParams,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        self.request_anonymous("signup/request", params).await
    }

    /// Submit the captcha code (`signup/confirm`, anonymous).
    pub async fn signup_confirm(
        &self,
        key: &str,
        code: &str,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        let params = transport::signup::encode_code_params(key, code);
        self.request_anonymous("signup/confirm", params).await
    }

    /// Finish registration with the code from the SMS (`signup/finish`,
    /// anonymous).
    pub async fn signup_finish(
        &self,
        key: &str,
        code: &str,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        let params = transport::signup::encode_code_params(key, code);
        self.request_anonymous("signup/finish", params).await
    }

    // --- internals ---

    async fn request(
        &self,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        let envelope = self.call(endpoint, params).await?;
        Self::require_success(envelope)
    }

    async fn request_anonymous(
        &self,
        endpoint: &str,
        params: RequestParams,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        let envelope = self.call_anonymous(endpoint, params).await?;
        Self::require_success(envelope)
    }

    fn require_success(envelope: ResponseEnvelope) -> Result<ResponseEnvelope, LittleSmsError> {
        if envelope.is_success() {
            Ok(envelope)
        } else {
            Err(LittleSmsError::Api { envelope })
        }
    }

    async fn dispatch(
        &self,
        endpoint: &str,
        params: RequestParams,
        authenticated: bool,
    ) -> Result<ResponseEnvelope, LittleSmsError> {
        let mut pairs = params.flatten(self.join_style)?;
        if authenticated {
            self.auth.append_to(&mut pairs);
        }

        let url = self.endpoint_url(endpoint)?;
        tracing::debug!(endpoint, params = pairs.len(), "dispatching gateway request");

        let response = self
            .http
            .post_form(url.as_str(), pairs)
            .await
            .map_err(LittleSmsError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(LittleSmsError::HttpStatus {
                status: response.status,
                body,
            });
        }

        let envelope = transport::decode_envelope(&response.body)?;
        tracing::debug!(endpoint, status = ?envelope.status(), "decoded gateway response");

        if let Ok(mut last) = self.last_response.lock() {
            *last = Some(envelope.clone());
        }

        Ok(envelope)
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url, LittleSmsError> {
        let scheme = if self.use_tls { "https" } else { "http" };
        let raw = format!("{scheme}://{}/{endpoint}", self.gateway);
        Url::parse(&raw).map_err(|source| LittleSmsError::InvalidUrl { url: raw, source })
    }
}
