use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use gdax_sdk::auth::{HEADER_KEY, HEADER_PASSPHRASE, HEADER_SIGN, HEADER_TIMESTAMP};
use gdax_sdk::{
    Account, Credentials, ExchangeClient, Fill, LedgerEntry, Order, PlaceOrder, Product,
    ProductStats, Ticker, CURSOR_HEADER,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

const DEFAULT_LIMIT: usize = 100;

/// Everything the mock exchange knows about, plus a log of mutations
#[derive(Debug, Clone, Default)]
pub struct MockState {
    pub products: Vec<Product>,
    pub tickers: HashMap<String, Ticker>,
    pub stats: HashMap<String, ProductStats>,
    pub accounts: Vec<Account>,
    pub ledgers: HashMap<String, Vec<LedgerEntry>>,
    pub orders: Vec<Order>,
    pub fills: Vec<Fill>,
    /// Request bodies of every accepted `POST /orders`
    pub placed: Vec<PlaceOrder>,
    /// Ids removed by `DELETE /orders[/{id}]`
    pub cancelled: Vec<String>,
    /// Number of authenticated requests served
    pub request_count: usize,
}

#[derive(Clone)]
struct AppState {
    state: Arc<Mutex<MockState>>,
    credentials: Credentials,
}

impl AppState {
    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().expect("mock exchange state poisoned")
    }
}

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    limit: Option<usize>,
    after: Option<String>,
    product_id: Option<String>,
}

/// Handle to a running mock exchange
///
/// Serves the subset of the REST API used by the CLI, verifies every request
/// signature against `credentials`, and shuts down when dropped.
pub struct MockExchange {
    pub base_url: String,
    pub credentials: Credentials,
    state: Arc<Mutex<MockState>>,
    _shutdown_tx: tokio::sync::oneshot::Sender<()>,
}

impl MockExchange {
    /// Start the mock on a random available port
    pub async fn start(state: MockState, credentials: Credentials) -> anyhow::Result<Self> {
        let state = Arc::new(Mutex::new(state));
        let app_state = AppState {
            state: state.clone(),
            credentials: credentials.clone(),
        };

        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/{id}/ticker", get(product_ticker))
            .route("/products/{id}/stats", get(product_stats))
            .route("/accounts", get(list_accounts))
            .route("/accounts/{id}/ledger", get(account_ledger))
            .route(
                "/orders",
                get(list_orders).post(place_order).delete(cancel_all),
            )
            .route("/orders/{id}", get(get_order).delete(cancel_order))
            .route("/fills", get(list_fills))
            .layer(middleware::from_fn_with_state(
                app_state.clone(),
                verify_signature,
            ))
            .with_state(app_state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind mock exchange: {}", e))?;
        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock exchange failed");
        });

        Ok(Self {
            base_url: format!("http://{}", addr),
            credentials,
            state,
            _shutdown_tx: shutdown_tx,
        })
    }

    /// Build full HTTP URL for a path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Client authenticated with the mock's credentials
    pub fn client(&self) -> ExchangeClient {
        ExchangeClient::new(&self.base_url, self.credentials.clone())
    }

    /// Inspect or modify the state while the server is running
    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        let mut state = self.state.lock().expect("mock exchange state poisoned");
        f(&mut state)
    }

    pub fn placed_orders(&self) -> Vec<PlaceOrder> {
        self.with_state(|s| s.placed.clone())
    }

    pub fn cancelled_orders(&self) -> Vec<String> {
        self.with_state(|s| s.cancelled.clone())
    }

    pub fn open_orders(&self) -> Vec<Order> {
        self.with_state(|s| s.orders.clone())
    }

    pub fn request_count(&self) -> usize {
        self.with_state(|s| s.request_count)
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "message": message }))).into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "NotFound")
}

/// Reject requests whose key, passphrase or signature do not match
async fn verify_signature(State(app): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(_) => return error(StatusCode::BAD_REQUEST, "Unreadable body"),
    };

    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    };
    let request_path = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let body = String::from_utf8_lossy(&bytes);

    let authorized = header(HEADER_KEY) == app.credentials.key()
        && header(HEADER_PASSPHRASE) == app.credentials.passphrase()
        && app.credentials.verify(
            &header(HEADER_TIMESTAMP),
            parts.method.as_str(),
            request_path,
            &body,
            &header(HEADER_SIGN),
        );
    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "invalid signature");
    }

    app.lock().request_count += 1;
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Serve one page of `items`, using the item offset as the cursor
fn paginate<T: Serialize>(items: &[T], params: &ListParams) -> Response {
    let start = match params.after.as_deref().map(str::parse::<usize>) {
        None => 0,
        Some(Ok(offset)) => offset.min(items.len()),
        Some(Err(_)) => return error(StatusCode::BAD_REQUEST, "Invalid cursor"),
    };
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    let end = (start + limit).min(items.len());

    let mut headers = HeaderMap::new();
    if end < items.len() {
        if let Ok(value) = HeaderValue::from_str(&end.to_string()) {
            headers.insert(CURSOR_HEADER, value);
        }
    }
    (headers, Json(&items[start..end])).into_response()
}

// ===== Market Data =====

async fn list_products(State(app): State<AppState>) -> Json<Vec<Product>> {
    Json(app.lock().products.clone())
}

async fn product_ticker(State(app): State<AppState>, Path(id): Path<String>) -> Response {
    match app.lock().tickers.get(&id) {
        Some(ticker) => Json(ticker.clone()).into_response(),
        None => not_found(),
    }
}

async fn product_stats(State(app): State<AppState>, Path(id): Path<String>) -> Response {
    match app.lock().stats.get(&id) {
        Some(stats) => Json(stats.clone()).into_response(),
        None => not_found(),
    }
}

// ===== Accounts =====

async fn list_accounts(State(app): State<AppState>) -> Json<Vec<Account>> {
    Json(app.lock().accounts.clone())
}

async fn account_ledger(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ListParams>,
) -> Response {
    let state = app.lock();
    if !state.accounts.iter().any(|a| a.id == id) {
        return not_found();
    }
    let entries = state.ledgers.get(&id).cloned().unwrap_or_default();
    paginate(&entries, &params)
}

// ===== Orders =====

async fn list_orders(State(app): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let orders: Vec<Order> = app
        .lock()
        .orders
        .iter()
        .filter(|o| params.product_id.as_ref().map_or(true, |p| &o.product_id == p))
        .cloned()
        .collect();
    paginate(&orders, &params)
}

async fn get_order(State(app): State<AppState>, Path(id): Path<String>) -> Response {
    match app.lock().orders.iter().find(|o| o.id == id) {
        Some(order) => Json(order.clone()).into_response(),
        None => not_found(),
    }
}

async fn place_order(State(app): State<AppState>, Json(request): Json<PlaceOrder>) -> Response {
    let mut state = app.lock();
    if !state.products.iter().any(|p| p.id == request.product_id) {
        return error(StatusCode::BAD_REQUEST, "Invalid product_id");
    }

    let order = Order {
        id: uuid::Uuid::new_v4().to_string(),
        price: request.price.clone(),
        size: Some(request.size.clone()),
        product_id: request.product_id.clone(),
        side: request.side,
        order_type: request.order_type,
        time_in_force: Some("GTC".to_string()),
        post_only: false,
        created_at: chrono::Utc::now().to_rfc3339(),
        fill_fees: "0.0000000000000000".to_string(),
        filled_size: "0.00000000".to_string(),
        executed_value: "0.0000000000000000".to_string(),
        status: "pending".to_string(),
        settled: false,
        stp: request.stp.clone(),
    };
    state.orders.push(order.clone());
    state.placed.push(request);
    Json(order).into_response()
}

async fn cancel_order(State(app): State<AppState>, Path(id): Path<String>) -> Response {
    let mut state = app.lock();
    let Some(index) = state.orders.iter().position(|o| o.id == id) else {
        return not_found();
    };
    state.orders.remove(index);
    state.cancelled.push(id.clone());
    Json(id).into_response()
}

async fn cancel_all(State(app): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let mut state = app.lock();
    let (cancelled, kept): (Vec<Order>, Vec<Order>) = state
        .orders
        .drain(..)
        .partition(|o| params.product_id.as_ref().map_or(true, |p| &o.product_id == p));
    state.orders = kept;

    let ids: Vec<String> = cancelled.into_iter().map(|o| o.id).collect();
    state.cancelled.extend(ids.iter().cloned());
    Json(ids).into_response()
}

// ===== Fills =====

async fn list_fills(State(app): State<AppState>, Query(params): Query<ListParams>) -> Response {
    let fills: Vec<Fill> = app
        .lock()
        .fills
        .iter()
        .filter(|f| params.product_id.as_ref().map_or(true, |p| &f.product_id == p))
        .cloned()
        .collect();
    paginate(&fills, &params)
}
