use crate::cli::usage;
use crate::command::{Command, OrderArgs};
use crate::config::Config;
use crate::confirm::Prompt;
use crate::error::{CliError, CliResult, OrderRejection};
use crate::order::{check_limit_price, parse_decimal, resolve_price, validate_order};
use crate::table::{render, Palette, Row};
use crate::views::{
    balance_rows, fill_row, history_row, order_row, product_row, ticker_row, NO_FILLS,
    NO_HISTORY, NO_ORDERS,
};
use gdax_sdk::{ExchangeClient, OrderType, PlaceOrder, SdkError, DEFAULT_ACCURACY};
use tracing::{debug, info, warn};

/// Printed when the user answers anything but `y` to a confirmation
pub const DECLINED: &str = "Aborted, nothing was sent.";

/// Display and trading settings for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub accuracy: usize,
    pub color: bool,
    pub self_trade_prevention: Option<String>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_ACCURACY,
            color: false,
            self_trade_prevention: None,
        }
    }
}

impl SessionOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            accuracy: config.display.accuracy,
            color: config.display.color,
            self_trade_prevention: config.self_trade_prevention(),
        }
    }
}

/// Runs one command against the exchange and returns what to print
pub struct Session {
    client: ExchangeClient,
    options: SessionOptions,
    palette: Palette,
    prompt: Box<dyn Prompt>,
}

impl Session {
    pub fn new(client: ExchangeClient, options: SessionOptions, prompt: Box<dyn Prompt>) -> Self {
        let palette = Palette::new(options.color);
        Self {
            client,
            options,
            palette,
            prompt,
        }
    }

    pub async fn run(&self, command: Command) -> CliResult<String> {
        debug!("Running {:?}", command);
        match command {
            Command::Help => Ok(usage()),
            Command::Products => self.products().await,
            Command::Ticker { products } => self.ticker(&products).await,
            Command::Balance => self.balance().await,
            Command::History { accounts } => self.history(&accounts).await,
            Command::Orders => self.orders().await,
            Command::CancelAll { product } => self.cancel_all(&product).await,
            Command::Cancel { order_id } => self.cancel(&order_id).await,
            Command::Place(args) => self.place_order(&args).await,
            Command::Fills { product } => self.fills(product.as_deref()).await,
        }
    }

    // ===== Market Data =====

    pub async fn products(&self) -> CliResult<String> {
        let products = self.client.get_products().await?;
        let rows: Vec<Row> = products.iter().map(product_row).collect();
        Ok(render(&rows))
    }

    /// Ticker and 24h stats for `products`, or for the whole catalog when empty
    pub async fn ticker(&self, products: &[String]) -> CliResult<String> {
        let product_ids = if products.is_empty() {
            self.client.get_product_ids().await?
        } else {
            products.iter().map(|p| p.to_uppercase()).collect()
        };

        let mut rows = Vec::with_capacity(product_ids.len());
        for product_id in &product_ids {
            let ticker = self.client.get_product_ticker(product_id).await?;
            let stats = self.client.get_product_stats(product_id).await?;
            rows.push(ticker_row(
                product_id,
                &ticker,
                &stats,
                self.palette,
                self.options.accuracy,
            ));
        }
        Ok(render(&rows))
    }

    // ===== Accounts =====

    pub async fn balance(&self) -> CliResult<String> {
        let accounts = self.client.get_accounts().await?;
        Ok(render(&balance_rows(
            &accounts,
            self.palette,
            self.options.accuracy,
        )))
    }

    /// Ledger of each requested currency, newest first
    pub async fn history(&self, currencies: &[String]) -> CliResult<String> {
        let accounts = self.client.get_accounts().await?;

        let mut sections = Vec::new();
        for currency in currencies.iter().map(|c| c.to_uppercase()) {
            let Some(account) = accounts.iter().find(|a| a.currency == currency) else {
                warn!("No {} account", currency);
                continue;
            };

            let mut rows = Vec::new();
            let mut pages = self.client.get_account_history(&account.id);
            while let Some(page) = pages.next_page().await? {
                rows.extend(
                    page.iter()
                        .map(|entry| history_row(entry, self.palette, self.options.accuracy)),
                );
            }

            let body = if rows.is_empty() {
                NO_HISTORY.to_string()
            } else {
                render(&rows)
            };
            sections.push(format!("Account: {}\n{}", currency, body));
        }

        if sections.is_empty() {
            return Ok(NO_HISTORY.to_string());
        }
        Ok(sections.join("\n\n"))
    }

    // ===== Orders =====

    pub async fn orders(&self) -> CliResult<String> {
        let mut rows = Vec::new();
        let mut pages = self.client.get_orders(None);
        while let Some(page) = pages.next_page().await? {
            rows.extend(
                page.iter()
                    .map(|order| order_row(order, self.palette, self.options.accuracy)),
            );
        }

        if rows.is_empty() {
            return Ok(NO_ORDERS.to_string());
        }
        Ok(render(&rows))
    }

    /// Validate, price and place an order
    pub async fn place_order(&self, args: &OrderArgs) -> CliResult<String> {
        let product_ids = self.client.get_product_ids().await?;
        let request = validate_order(args, &product_ids)?;

        let ticker = self.client.get_product_ticker(&request.product_id).await?;
        let current = parse_decimal(&ticker.price).ok_or_else(|| {
            SdkError::InvalidResponse(format!("Ticker price is not a number: {}", ticker.price))
        })?;

        let price = match request.order_type {
            OrderType::Limit => {
                let token = request
                    .price
                    .as_deref()
                    .ok_or(OrderRejection::MissingPrice(OrderType::Limit))?;
                let resolved = resolve_price(token, current)?;
                check_limit_price(request.side, &resolved, current)?;
                info!(
                    "Placing limit order: {} {} @ {} ({})",
                    request.side, request.size, resolved.price, resolved.delta
                );
                Some(resolved.price)
            }
            OrderType::Stop => {
                return Err(CliError::NotImplemented("Placing stop orders".to_string()));
            }
            OrderType::Market => {
                info!(
                    "Placing market order: {} {} @ {}",
                    request.side,
                    request.size,
                    current.round_dp(2)
                );
                None
            }
        };

        let question = match &price {
            Some(price) => format!(
                "Place {} {} {} {} @ {}?",
                request.order_type, request.side, request.size, request.product_id, price
            ),
            None => format!(
                "Place {} {} {} {} at market (~{})?",
                request.order_type, request.side, request.size, request.product_id, current
            ),
        };
        if !self.confirm(&question)? {
            return Ok(DECLINED.to_string());
        }

        let order = self
            .client
            .place_order(&PlaceOrder {
                order_type: request.order_type,
                side: request.side,
                product_id: request.product_id,
                size: request.size,
                price,
                stp: self.options.self_trade_prevention.clone(),
            })
            .await?;
        info!("Placed order {}", order.id);

        let row = order_row(&order, self.palette, self.options.accuracy);
        Ok(format!("Placed order {}\n{}", order.id, render(&[row])))
    }

    /// Cancel one order by id or unambiguous id prefix
    pub async fn cancel(&self, id: &str) -> CliResult<String> {
        let order_id = self.resolve_order_id(id).await?;
        if !self.confirm(&format!("Cancel order {}?", order_id))? {
            return Ok(DECLINED.to_string());
        }

        info!("Cancelling order {}", order_id);
        let cancelled = self.client.cancel_order(&order_id).await?;
        Ok(format!("Cancelled order {}", cancelled))
    }

    /// Cancel every open order of one product
    pub async fn cancel_all(&self, product: &str) -> CliResult<String> {
        let product_id = product.to_uppercase();
        let product_ids = self.client.get_product_ids().await?;
        if !product_ids.contains(&product_id) {
            return Err(OrderRejection::UnknownProduct(product.to_string()).into());
        }

        if !self.confirm(&format!("Cancel all open orders for {}?", product_id))? {
            return Ok(DECLINED.to_string());
        }

        info!("Cancelling all orders for {}", product_id);
        let cancelled = self.client.cancel_all(Some(&product_id)).await?;
        if cancelled.is_empty() {
            return Ok(format!("No open orders for {}", product_id));
        }
        Ok(cancelled
            .iter()
            .map(|id| format!("Cancelled order {}", id))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    async fn resolve_order_id(&self, id: &str) -> CliResult<String> {
        if uuid::Uuid::parse_str(id).is_ok() {
            return Ok(id.to_string());
        }
        if id.is_empty() {
            return Err(OrderRejection::UnknownOrderId(id.to_string()).into());
        }

        let orders = self.client.get_orders(None).collect_all().await?;
        let matches: Vec<&str> = orders
            .iter()
            .map(|order| order.id.as_str())
            .filter(|order_id| order_id.starts_with(id))
            .collect();

        match matches.as_slice() {
            [order_id] => Ok(order_id.to_string()),
            [] => Err(OrderRejection::UnknownOrderId(id.to_string()).into()),
            _ => Err(OrderRejection::AmbiguousOrderId {
                prefix: id.to_string(),
                count: matches.len(),
            }
            .into()),
        }
    }

    // ===== Fills =====

    pub async fn fills(&self, product: Option<&str>) -> CliResult<String> {
        let product_id = product.map(str::to_uppercase);

        let mut rows = Vec::new();
        let mut pages = self.client.get_fills(product_id.as_deref());
        while let Some(page) = pages.next_page().await? {
            rows.extend(
                page.iter()
                    .map(|fill| fill_row(fill, self.palette, self.options.accuracy)),
            );
        }

        if rows.is_empty() {
            return Ok(NO_FILLS.to_string());
        }
        Ok(render(&rows))
    }

    fn confirm(&self, question: &str) -> CliResult<bool> {
        let confirmed = self.prompt.confirm(question)?;
        if !confirmed {
            warn!("Declined: {}", question);
        }
        Ok(confirmed)
    }
}
