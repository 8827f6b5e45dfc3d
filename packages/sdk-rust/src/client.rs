use crate::auth::{self, Credentials, HEADER_KEY, HEADER_PASSPHRASE, HEADER_SIGN, HEADER_TIMESTAMP};
use crate::error::{SdkError, SdkResult};
use crate::models::*;
use crate::pagination::Pages;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// Default number of records requested per page
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

const CLIENT_USER_AGENT: &str = concat!("gdaxcli/", env!("CARGO_PKG_VERSION"));

/// Authenticated REST API client for the exchange
#[derive(Clone)]
pub struct ExchangeClient {
    base_url: String,
    credentials: Credentials,
    page_limit: u32,
    client: Client,
}

impl ExchangeClient {
    /// Create a new client with the given base URL and API credentials
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credentials,
            page_limit: DEFAULT_PAGE_LIMIT,
            client: Client::new(),
        }
    }

    /// Set the page size used by paginated endpoints
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    // ===== Market Data =====

    /// Get all products available for trading
    pub async fn get_products(&self) -> SdkResult<Vec<Product>> {
        self.get("/products", &[]).await
    }

    /// Get the sorted list of product ids
    pub async fn get_product_ids(&self) -> SdkResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .get_products()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Get the last trade, best bid/ask and 24h volume of a product
    pub async fn get_product_ticker(&self, product_id: &str) -> SdkResult<Ticker> {
        self.get(&format!("/products/{}/ticker", product_id), &[])
            .await
    }

    /// Get 24 hour open/high/low/volume of a product
    pub async fn get_product_stats(&self, product_id: &str) -> SdkResult<ProductStats> {
        self.get(&format!("/products/{}/stats", product_id), &[])
            .await
    }

    // ===== Accounts =====

    /// Get all trading accounts of the profile
    pub async fn get_accounts(&self) -> SdkResult<Vec<Account>> {
        self.get("/accounts", &[]).await
    }

    /// Get the ledger of an account, newest first
    pub fn get_account_history(&self, account_id: &str) -> Pages<LedgerEntry> {
        Pages::new(self.clone(), format!("/accounts/{}/ledger", account_id), vec![])
    }

    // ===== Orders =====

    /// Get open orders, optionally for a single product
    pub fn get_orders(&self, product_id: Option<&str>) -> Pages<Order> {
        let mut query = vec![("status".to_string(), "open".to_string())];
        if let Some(product_id) = product_id {
            query.push(("product_id".to_string(), product_id.to_string()));
        }
        Pages::new(self.clone(), "/orders".to_string(), query)
    }

    /// Get a single order by id
    pub async fn get_order(&self, order_id: &str) -> SdkResult<Order> {
        self.get(&format!("/orders/{}", order_id), &[]).await
    }

    /// Place an order
    pub async fn place_order(&self, order: &PlaceOrder) -> SdkResult<Order> {
        let response = self
            .request(Method::POST, "/orders", &[], Some(order))
            .await?;
        Ok(response.json().await?)
    }

    /// Cancel an order, returning the id of the cancelled order
    pub async fn cancel_order(&self, order_id: &str) -> SdkResult<String> {
        let response = self
            .request::<()>(Method::DELETE, &format!("/orders/{}", order_id), &[], None)
            .await?;
        Ok(response.json().await?)
    }

    /// Cancel all open orders, optionally for a single product
    pub async fn cancel_all(&self, product_id: Option<&str>) -> SdkResult<Vec<String>> {
        let query: Vec<(String, String)> = product_id
            .map(|p| vec![("product_id".to_string(), p.to_string())])
            .unwrap_or_default();
        let response = self
            .request::<()>(Method::DELETE, "/orders", &query, None)
            .await?;
        Ok(response.json().await?)
    }

    // ===== Fills =====

    /// Get recent fills, optionally for a single product
    pub fn get_fills(&self, product_id: Option<&str>) -> Pages<Fill> {
        let query = product_id
            .map(|p| vec![("product_id".to_string(), p.to_string())])
            .unwrap_or_default();
        Pages::new(self.clone(), "/fills".to_string(), query)
    }

    // ===== Internal Helper Methods =====

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(String, String)]) -> SdkResult<T> {
        let response = self.request::<()>(Method::GET, path, query, None).await?;
        Ok(response.json().await?)
    }

    /// Send a signed request and turn non-success statuses into `ApiError`
    pub(crate) async fn request<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&B>,
    ) -> SdkResult<Response> {
        let url = self.url(path, query)?;
        let request_path = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        let body = match body {
            Some(body) => serde_json::to_string(body)?,
            None => String::new(),
        };

        let timestamp = auth::timestamp();
        let signature = self
            .credentials
            .sign(&timestamp, method.as_str(), &request_path, &body)?;

        debug!(%method, path = %request_path, "exchange request");

        let mut builder = self
            .client
            .request(method, url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(HEADER_KEY, self.credentials.key())
            .header(HEADER_SIGN, signature)
            .header(HEADER_TIMESTAMP, timestamp)
            .header(HEADER_PASSPHRASE, self.credentials.passphrase());
        if !body.is_empty() {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(api_error(response).await)
        }
    }

    fn url(&self, path: &str, query: &[(String, String)]) -> SdkResult<Url> {
        let raw = format!("{}{}", self.base_url, path);
        let url = if query.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, query)
        };
        url.map_err(|e| SdkError::InvalidRequest(format!("Invalid URL {}: {}", raw, e)))
    }
}

/// Build an `ApiError` from the `{"message": ...}` body the exchange sends on failure
async fn api_error(response: Response) -> SdkError {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or(text);
    SdkError::ApiError { status, message }
}
