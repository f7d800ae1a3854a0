use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use oauth2::{
    AuthorizationCode, CsrfToken, ResourceOwnerPassword, ResourceOwnerUsername, TokenResponse,
};
use reqwest::{Method, RequestBuilder, Response, header};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::config::Config;
use crate::endpoints::ParasutEndpoint;
use crate::entities::{
    DataEnvelope, ListParameters, ListResponse, Resource, ResourceType, WriteEnvelope,
    account::AccountsApi,
    bank_fee::BankFeesApi,
    contact::ContactsApi,
    e_document::{EArchivesApi, EInvoiceInboxesApi, EInvoicesApi, ESmmsApi},
    employee::EmployeesApi,
    item_category::ItemCategoriesApi,
    me::MeApi,
    product::ProductsApi,
    purchase_bill::PurchaseBillsApi,
    salary::SalariesApi,
    sales_invoice::SalesInvoicesApi,
    sales_offer::SalesOffersApi,
    sharing::SharingsApi,
    shipment_document::ShipmentDocumentsApi,
    stock::{StockMovementsApi, StockUpdatesApi},
    tag::TagsApi,
    tax::TaxesApi,
    trackable_job::TrackableJobsApi,
    transaction::TransactionsApi,
    warehouse::WarehousesApi,
    webhook::WebhooksApi,
};
use crate::error::{Error, Result};
use crate::oauth::{self, OAuthClient, Token};

/// This is the client that is used for interacting with the Parasut API. It handles OAuth 2
/// authentication and scopes every resource path to the configured company.
///
/// Operations that install a token take `&mut self`; everything else borrows the client
/// shared, so re-authentication can never race an in-flight request.
#[derive(Clone)]
pub struct Client {
    config: Arc<Config>,
    http_client: reqwest::Client,
    oauth_http_client: reqwest::Client,
    oauth_client: OAuthClient,
    token: Option<Token>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Build an unauthenticated client. Call one of the `authenticate_*` methods or
    /// [`Client::set_token`] before touching company resources.
    ///
    /// # Errors
    /// Returns [`Error::InvalidEndpoint`] if one of the configured URLs does not parse.
    #[instrument]
    pub fn new(config: Config) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|_| Error::InvalidEndpoint(config.base_url.clone()))?;
        let oauth_client = oauth::build_oauth_client(&config)?;

        let http_client = reqwest::Client::builder().timeout(config.timeout).build()?;
        // Token endpoints must not follow redirects.
        let oauth_http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
            oauth_http_client,
            oauth_client,
            token: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generates an authorization URL with a random `state` for the code flow.
    #[must_use]
    pub fn authorize_url(&self) -> (Url, CsrfToken) {
        self.oauth_client.authorize_url(CsrfToken::new_random).url()
    }

    /// Generates an authorization URL carrying the given `state`.
    #[must_use]
    pub fn authorize_url_with_state(&self, state: &str) -> Url {
        let state = state.to_string();
        let (url, _) = self
            .oauth_client
            .authorize_url(move || CsrfToken::new(state))
            .url();
        url
    }

    /// Exchanges a code generated in the code flow authorization method for a token.
    ///
    /// # Errors
    /// Returns [`Error::Auth`] if the token endpoint rejects the code or cannot be reached.
    #[instrument(skip(self, code))]
    pub async fn authenticate_with_code(&mut self, code: impl Into<String>) -> Result<()> {
        let response = self
            .oauth_client
            .exchange_code(AuthorizationCode::new(code.into()))
            .request_async(&self.oauth_http_client)
            .await?;
        self.install(Token::from_response(&response));
        Ok(())
    }

    /// Authenticates with the resource owner password grant.
    ///
    /// # Errors
    /// Returns [`Error::Auth`] if the token endpoint rejects the credentials.
    #[instrument(skip(self, password))]
    pub async fn authenticate_with_password(
        &mut self,
        email: impl Into<String> + fmt::Debug,
        password: impl Into<String>,
    ) -> Result<()> {
        let username = ResourceOwnerUsername::new(email.into());
        let password = ResourceOwnerPassword::new(password.into());

        let mut request = self.oauth_client.exchange_password(&username, &password);
        if !self.config.redirect_url.is_empty() {
            request = request.add_extra_param("redirect_uri", self.config.redirect_url.clone());
        }
        let response = request.request_async(&self.oauth_http_client).await?;
        self.install(Token::from_response(&response));
        Ok(())
    }

    /// Refreshes the access token using the refresh token.
    ///
    /// The previous refresh token is kept when the server does not issue a new one.
    ///
    /// # Errors
    /// Returns [`Error::MissingRefreshToken`] when no refresh token is held.
    #[instrument(skip(self))]
    pub async fn refresh_access_token(&mut self) -> Result<()> {
        let Some(refresh_token) = self
            .token
            .as_ref()
            .and_then(|token| token.refresh_token.clone())
        else {
            return Err(Error::MissingRefreshToken);
        };

        let response = self
            .oauth_client
            .exchange_refresh_token(&refresh_token)
            .request_async(&self.oauth_http_client)
            .await?;

        let mut token = Token::from_response(&response);
        if response.refresh_token().is_none() {
            token.refresh_token = Some(refresh_token);
        }
        self.install(token);
        Ok(())
    }

    /// Installs a token obtained elsewhere, e.g. one persisted from an earlier session.
    pub fn set_token(&mut self, token: Token) {
        self.install(token);
    }

    /// The token currently in use, if any.
    #[must_use]
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    fn install(&mut self, token: Token) {
        trace!(token_type = %token.token_type, expires_at = ?token.expires_at, "installing token");
        self.token = Some(token);
    }

    fn build_request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self
            .http_client
            .request(method, url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");
        match &self.token {
            Some(token) => request.bearer_auth(token.secret()),
            None => request,
        }
    }

    fn resolve(&self, endpoint: &ParasutEndpoint) -> Result<Url> {
        endpoint.to_url(&self.config.base_url, self.config.company_id)
    }

    /// Sends one request to `endpoint`. `None` sends no body at all.
    ///
    /// The status code is not inspected.
    ///
    /// # Errors
    /// Fails on transport errors, an unresolvable endpoint or an unencodable body.
    pub async fn execute<B: Serialize + ?Sized>(
        &self,
        method: Method,
        endpoint: &ParasutEndpoint,
        body: Option<&B>,
    ) -> Result<Response> {
        let url = self.resolve(endpoint)?;
        trace!(%method, %url, has_body = body.is_some(), "making request");
        let mut request = self.build_request(method, url);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
            request = request.body(bytes);
        }
        Ok(request.send().await?)
    }

    /// Sends a body-less request with the given query pairs.
    ///
    /// # Errors
    /// Fails on transport errors or an unresolvable endpoint.
    pub async fn execute_with_query(
        &self,
        method: Method,
        endpoint: &ParasutEndpoint,
        query: &BTreeMap<String, String>,
    ) -> Result<Response> {
        let url = self.resolve(endpoint)?;
        trace!(%method, %url, ?query, "making request");
        Ok(self.build_request(method, url).query(query).send().await?)
    }

    /// Retrieve one page of a collection.
    #[instrument(skip(self))]
    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &ParasutEndpoint,
        parameters: &ListParameters,
    ) -> Result<ListResponse<T>> {
        let response = self
            .execute_with_query(Method::GET, endpoint, &parameters.to_query())
            .await?;
        Self::handle_response(response).await
    }

    /// Retrieve a single resource.
    #[instrument(skip(self))]
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &ParasutEndpoint) -> Result<T> {
        let response = self.execute(Method::GET, endpoint, None::<&()>).await?;
        let envelope: DataEnvelope<T> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        endpoint: &ParasutEndpoint,
        query: &BTreeMap<String, String>,
    ) -> Result<T> {
        let response = self.execute_with_query(Method::GET, endpoint, query).await?;
        let envelope: DataEnvelope<T> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }

    /// POST a new resource. The request omits `id`, and omits `relationships` when
    /// `relationships` is `None`.
    #[instrument(skip(self, attributes, relationships))]
    pub async fn create<A, R>(
        &self,
        endpoint: &ParasutEndpoint,
        attributes: &A,
        relationships: Option<&R>,
    ) -> Result<Resource<A, R>>
    where
        A: ResourceType + Serialize + DeserializeOwned,
        R: Serialize + DeserializeOwned,
    {
        let body = WriteEnvelope::new(None, A::TYPE, attributes, relationships);
        let response = self.execute(Method::POST, endpoint, Some(&body)).await?;
        let envelope: DataEnvelope<Resource<A, R>> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }

    /// PUT a full replacement of the resource `id`.
    #[instrument(skip(self, attributes, relationships))]
    pub async fn replace<A, R>(
        &self,
        endpoint: &ParasutEndpoint,
        id: &str,
        attributes: &A,
        relationships: Option<&R>,
    ) -> Result<Resource<A, R>>
    where
        A: ResourceType + Serialize + DeserializeOwned,
        R: Serialize + DeserializeOwned,
    {
        let body = WriteEnvelope::new(Some(id), A::TYPE, attributes, relationships);
        let response = self.execute(Method::PUT, endpoint, Some(&body)).await?;
        let envelope: DataEnvelope<Resource<A, R>> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }

    /// PATCH an action endpoint without a body and discard the response.
    #[instrument(skip(self))]
    pub async fn trigger_action(&self, endpoint: &ParasutEndpoint) -> Result<()> {
        let response = self.execute(Method::PATCH, endpoint, None::<&()>).await?;
        Self::ensure_success(response).await
    }

    /// PATCH an action endpoint with `body` and decode the resource it returns.
    #[instrument(skip(self, body))]
    pub async fn action<B, T>(&self, endpoint: &ParasutEndpoint, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(Method::PATCH, endpoint, Some(body)).await?;
        let envelope: DataEnvelope<T> = Self::handle_response(response).await?;
        Ok(envelope.data)
    }

    /// DELETE a resource.
    ///
    /// A non-success status is logged and otherwise ignored; only transport failures
    /// are returned as errors.
    #[instrument(skip(self))]
    pub async fn delete(&self, endpoint: &ParasutEndpoint) -> Result<()> {
        let response = self.execute(Method::DELETE, endpoint, None::<&()>).await?;
        let status = response.status();
        debug!(%status, "delete response");
        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %url, %body, "delete returned a non-success status");
        }
        Ok(())
    }

    /// Fetch a rendered document. The API answers with a JSON string holding base64;
    /// `null` yields an empty buffer.
    #[instrument(skip(self))]
    pub async fn get_pdf(&self, endpoint: &ParasutEndpoint) -> Result<Vec<u8>> {
        let response = self.execute(Method::GET, endpoint, None::<&()>).await?;
        let payload: Option<String> = Self::handle_response(response).await?;
        match payload {
            Some(encoded) => STANDARD
                .decode(encoded.trim())
                .map_err(Error::InvalidPdfPayload),
            None => Ok(Vec::new()),
        }
    }

    async fn ensure_success(response: Response) -> Result<()> {
        let status = response.status();
        debug!(%status, url = %response.url(), "action response");
        if status.is_success() {
            return Ok(());
        }
        let url = response.url().to_string();
        let text = response.text().await?;
        Err(Error::api(status, url, &text))
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();
        let text = response.text().await?;

        debug!(%url, %status, bytes = text.len(), "response received");

        if !status.is_success() {
            return Err(Error::api(status, url, &text));
        }

        trace!("Response text:\n{}", text);
        match serde_json::from_str(&text) {
            Ok(result) => Ok(result),
            Err(e) => {
                error!(
                    "Deserialization error: {}, near line {} column {}",
                    e,
                    e.line(),
                    e.column()
                );
                Err(Error::DeserializationError(e, Some(text)))
            }
        }
    }

    /// Access the current user
    #[must_use]
    pub fn me(&self) -> MeApi<'_> {
        MeApi { client: self }
    }

    /// Access the accounts API
    #[must_use]
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi { client: self }
    }

    #[must_use]
    pub fn bank_fees(&self) -> BankFeesApi<'_> {
        BankFeesApi { client: self }
    }

    /// Access the contacts API
    #[must_use]
    pub fn contacts(&self) -> ContactsApi<'_> {
        ContactsApi { client: self }
    }

    #[must_use]
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi { client: self }
    }

    /// Access the sales invoices API
    #[must_use]
    pub fn sales_invoices(&self) -> SalesInvoicesApi<'_> {
        SalesInvoicesApi { client: self }
    }

    /// Access the purchase bills API
    #[must_use]
    pub fn purchase_bills(&self) -> PurchaseBillsApi<'_> {
        PurchaseBillsApi { client: self }
    }

    #[must_use]
    pub fn employees(&self) -> EmployeesApi<'_> {
        EmployeesApi { client: self }
    }

    #[must_use]
    pub fn salaries(&self) -> SalariesApi<'_> {
        SalariesApi { client: self }
    }

    #[must_use]
    pub fn taxes(&self) -> TaxesApi<'_> {
        TaxesApi { client: self }
    }

    #[must_use]
    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi { client: self }
    }

    #[must_use]
    pub fn warehouses(&self) -> WarehousesApi<'_> {
        WarehousesApi { client: self }
    }

    #[must_use]
    pub fn stock_movements(&self) -> StockMovementsApi<'_> {
        StockMovementsApi { client: self }
    }

    #[must_use]
    pub fn stock_updates(&self) -> StockUpdatesApi<'_> {
        StockUpdatesApi { client: self }
    }

    #[must_use]
    pub fn webhooks(&self) -> WebhooksApi<'_> {
        WebhooksApi { client: self }
    }

    /// Access the e-archive API
    #[must_use]
    pub fn e_archives(&self) -> EArchivesApi<'_> {
        EArchivesApi { client: self }
    }

    #[must_use]
    pub fn e_invoice_inboxes(&self) -> EInvoiceInboxesApi<'_> {
        EInvoiceInboxesApi { client: self }
    }

    #[must_use]
    pub fn e_invoices(&self) -> EInvoicesApi<'_> {
        EInvoicesApi { client: self }
    }

    #[must_use]
    pub fn e_smms(&self) -> ESmmsApi<'_> {
        ESmmsApi { client: self }
    }

    #[must_use]
    pub fn item_categories(&self) -> ItemCategoriesApi<'_> {
        ItemCategoriesApi { client: self }
    }

    /// Access the sales offers API
    #[must_use]
    pub fn sales_offers(&self) -> SalesOffersApi<'_> {
        SalesOffersApi { client: self }
    }

    #[must_use]
    pub fn sharings(&self) -> SharingsApi<'_> {
        SharingsApi { client: self }
    }

    #[must_use]
    pub fn shipment_documents(&self) -> ShipmentDocumentsApi<'_> {
        ShipmentDocumentsApi { client: self }
    }

    #[must_use]
    pub fn trackable_jobs(&self) -> TrackableJobsApi<'_> {
        TrackableJobsApi { client: self }
    }

    #[must_use]
    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi { client: self }
    }
}
