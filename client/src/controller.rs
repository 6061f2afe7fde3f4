//! The report view controller
//!
//! Owns all view state for the product/variant grid and mediates between
//! the host UI (search box, filter dropdown, pager, modal) and the report
//! transport. Methods take `&mut self`; the host drives the controller
//! from its single UI task.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use uuid::Uuid;

use shared::models::{
    classify_quantity, Attribute, Product, QuantityClass, QuantityFilter, ReportConfig, ReportData,
    Variant, PLACEHOLDER_IMAGE_URL,
};
use shared::types::Pagination;
use shared::validation::normalize_search_term;

use crate::filters::apply_filters;
use crate::notify::{NotificationLevel, Notifier};
use crate::transport::{ReportQuery, ReportTransport};

/// Delay between the last keystroke and the search request it triggers
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// View state exposed to the host for rendering
#[derive(Debug, Clone)]
pub struct ViewState {
    pub products: Vec<Product>,
    pub attributes: Vec<Attribute>,
    pub filtered_products: Vec<Product>,
    pub search_input: String,
    pub filter: QuantityFilter,
    pub loading: bool,
    pub config: Option<ReportConfig>,
    pub show_variant_modal: bool,
    pub selected_variant: Option<VariantDetails>,
    pub error: Option<String>,
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl Default for ViewState {
    fn default() -> Self {
        let pagination = Pagination::default();
        Self {
            products: Vec::new(),
            attributes: Vec::new(),
            filtered_products: Vec::new(),
            search_input: String::new(),
            filter: QuantityFilter::All,
            loading: true,
            config: None,
            show_variant_modal: false,
            selected_variant: None,
            error: None,
            current_page: pagination.page,
            page_size: pagination.page_size,
            total_count: 0,
            total_pages: 1,
        }
    }
}

/// Everything the variant modal renders
#[derive(Debug, Clone)]
pub struct VariantDetails {
    pub id: Uuid,
    pub name: String,
    pub product_name: String,
    pub default_code: Option<String>,
    pub image_url: Option<String>,
    pub qty: Decimal,
    pub qty_on_hand: Decimal,
    pub qty_reserved: Decimal,
    pub incoming_qty: Decimal,
    pub outgoing_qty: Decimal,
    pub virtual_available: Decimal,
    pub attributes: Vec<AttributeDisplay>,
    pub attributes_list: String,
    pub quantity_class: QuantityClass,
    pub product_url: Option<String>,
}

/// One resolved attribute name/value pair for the modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDisplay {
    pub name: String,
    pub value: String,
}

/// Token identifying one debounced search edit
///
/// Each keystroke supersedes the previous token; only the latest one
/// survives [`ReportController::debounced_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken(u64);

/// Outcome of one fetch, used to pair a response with the request that
/// produced it
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    generation: u64,
}

pub struct ReportController {
    transport: Arc<dyn ReportTransport>,
    notifier: Arc<dyn Notifier>,
    state: ViewState,
    search_generation: u64,
    fetch_generation: u64,
}

impl ReportController {
    pub fn new(transport: Arc<dyn ReportTransport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            state: ViewState::default(),
            search_generation: 0,
            fetch_generation: 0,
        }
    }

    /// Current view state, for rendering
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Load the configuration and the first page of report data.
    ///
    /// Any failure surfaces one notification and leaves the controller
    /// non-loading with `error` set.
    pub async fn load(&mut self, config_id: Option<Uuid>) {
        let Some(config_id) = config_id else {
            self.fail(NotificationLevel::Warning, "No configuration provided");
            return;
        };

        match self.transport.read_config(config_id).await {
            Ok(Some(config)) => {
                self.state.config = Some(config);
                self.fetch_data().await;
            }
            Ok(None) => {
                self.fail(NotificationLevel::Danger, "Configuration not found");
            }
            Err(err) => {
                tracing::warn!(%config_id, error = %err, "failed to load report configuration");
                self.fail(NotificationLevel::Danger, "Failed to load configuration");
            }
        }
    }

    /// Fetch the current page of report data.
    ///
    /// The loading flag is set for the duration of the call and cleared on
    /// every exit path. Responses belonging to a superseded request are
    /// discarded instead of overwriting newer state.
    pub async fn fetch_data(&mut self) {
        let Some(ticket) = self.begin_fetch() else {
            return;
        };
        let query = self.current_query();
        let result = self.transport.get_report_data(&query).await;
        match result {
            Ok(data) => self.apply_report_data(ticket, data),
            Err(err) => {
                if !self.is_current(ticket) {
                    tracing::debug!("discarding error from superseded report request");
                    return;
                }
                tracing::warn!(error = %err, "report data fetch failed");
                self.fail(NotificationLevel::Danger, "Failed to fetch data");
            }
        }
    }

    /// Start a fetch: flags the view as loading and hands out the ticket
    /// the response must present. `None` without a loaded config.
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.state.config.as_ref()?;
        self.state.loading = true;
        self.state.error = None;
        self.fetch_generation += 1;
        Some(FetchTicket {
            generation: self.fetch_generation,
        })
    }

    /// The query a fetch started now would issue
    pub fn current_query(&self) -> ReportQuery {
        let config_id = self
            .state
            .config
            .as_ref()
            .map(|c| c.id)
            .unwrap_or_else(Uuid::nil);
        ReportQuery {
            config_id,
            page: self.state.current_page,
            page_size: self.state.page_size,
            search_term: self.state.search_input.clone(),
        }
    }

    /// Apply a fetched payload if its ticket is still current.
    pub fn apply_report_data(&mut self, ticket: FetchTicket, data: ReportData) {
        if !self.is_current(ticket) {
            tracing::debug!("discarding stale report response");
            return;
        }

        if let Some(message) = data.error {
            tracing::warn!(%message, "backend reported a report error");
            self.fail(NotificationLevel::Danger, &message);
            return;
        }

        self.state.products = transform_products(data.products);
        self.state.attributes = data.attributes;
        self.state.total_count = data.pagination.total;
        self.state.total_pages = data.pagination.pages;
        self.apply_filters();
        self.state.loading = false;
    }

    fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.fetch_generation
    }

    /// Re-derive `filtered_products` from the in-memory product set
    pub fn apply_filters(&mut self) {
        self.state.filtered_products = apply_filters(
            &self.state.products,
            &self.state.search_input,
            self.state.filter,
            self.state.config.as_ref(),
        );
    }

    /// Record a search box edit; the fetch happens after the debounce.
    ///
    /// The returned token must be passed to [`debounced_search`]; a newer
    /// keystroke invalidates older tokens so rapid typing coalesces into
    /// one request.
    ///
    /// [`debounced_search`]: ReportController::debounced_search
    pub fn on_search_input(&mut self, raw: &str) -> SearchToken {
        self.state.search_input = normalize_search_term(raw);
        self.state.current_page = 1;
        self.search_generation += 1;
        SearchToken(self.search_generation)
    }

    /// Wait out the debounce window, then fetch if the token is still the
    /// latest edit.
    pub async fn debounced_search(&mut self, token: SearchToken) {
        tokio::time::sleep(SEARCH_DEBOUNCE).await;
        if token.0 != self.search_generation {
            return;
        }
        self.fetch_data().await;
    }

    /// Clear the search box and refetch immediately
    pub async fn clear_search(&mut self) {
        self.state.search_input.clear();
        self.state.current_page = 1;
        // Invalidate any debounce still pending for the old term
        self.search_generation += 1;
        self.fetch_data().await;
    }

    /// Switch the quantity bucket; purely local, no refetch
    pub fn on_filter_change(&mut self, filter: QuantityFilter) {
        self.state.filter = filter;
        self.state.current_page = 1;
        self.apply_filters();
    }

    /// Jump to a page; no-op outside `[1, total_pages]`
    pub async fn change_page(&mut self, page: u32) {
        if page < 1 || page > self.state.total_pages {
            return;
        }
        self.state.current_page = page;
        self.fetch_data().await;
    }

    pub async fn next_page(&mut self) {
        if self.state.current_page < self.state.total_pages {
            let page = self.state.current_page + 1;
            self.change_page(page).await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.state.current_page > 1 {
            let page = self.state.current_page - 1;
            self.change_page(page).await;
        }
    }

    /// Reload from the first page and confirm to the user
    pub async fn refresh(&mut self) {
        self.state.current_page = 1;
        self.fetch_data().await;
        if self.state.error.is_none() {
            self.notifier
                .notify(NotificationLevel::Success, "Data refreshed");
        }
    }

    /// Open the variant modal with resolved details
    pub fn show_variant_details(&mut self, variant: &Variant) {
        let product = self
            .state
            .products
            .iter()
            .find(|p| p.variants.iter().any(|v| v.id == variant.id));
        let product_name = product
            .map(|p| p.name.display().to_string())
            .unwrap_or_else(|| variant.name.display().to_string());

        let attributes = self.format_attributes_for_display(variant);
        let attributes_list = if attributes.is_empty() {
            variant
                .default_code
                .clone()
                .unwrap_or_else(|| "Default".to_string())
        } else {
            attributes
                .iter()
                .map(|a| a.value.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let use_forecast = self
            .state
            .config
            .as_ref()
            .map(|c| c.use_forecast)
            .unwrap_or(false);
        let qty = variant.qty_for(use_forecast);

        self.state.selected_variant = Some(VariantDetails {
            id: variant.id,
            name: format!("{} - {}", product_name, attributes_list),
            product_name,
            default_code: variant.default_code.clone(),
            image_url: variant
                .image_url
                .clone()
                .or_else(|| Some(PLACEHOLDER_IMAGE_URL.to_string())),
            qty,
            qty_on_hand: variant.qty_available,
            qty_reserved: variant.qty_reserved,
            incoming_qty: variant.incoming_qty,
            outgoing_qty: variant.outgoing_qty,
            virtual_available: variant.virtual_available,
            attributes,
            attributes_list,
            quantity_class: classify_quantity(qty),
            product_url: variant
                .product_url
                .clone()
                .or_else(|| product.and_then(|p| p.product_url.clone())),
        });
        self.state.show_variant_modal = true;
    }

    /// Close the variant modal
    pub fn close_variant_modal(&mut self) {
        self.state.show_variant_modal = false;
        self.state.selected_variant = None;
    }

    /// Resolve a variant's attribute map into displayable name/value pairs,
    /// ordered by attribute name for stable rendering
    fn format_attributes_for_display(&self, variant: &Variant) -> Vec<AttributeDisplay> {
        let mut resolved: Vec<AttributeDisplay> = variant
            .attributes
            .iter()
            .map(|(attribute_id, value_id)| {
                match self.state.attributes.iter().find(|a| a.id == *attribute_id) {
                    Some(attribute) => AttributeDisplay {
                        name: attribute.name.clone(),
                        value: attribute
                            .value_label(*value_id)
                            .map(str::to_string)
                            .unwrap_or_else(|| value_id.to_string()),
                    },
                    None => AttributeDisplay {
                        name: format!("Attribute {attribute_id}"),
                        value: value_id.to_string(),
                    },
                }
            })
            .collect();
        resolved.sort_by(|a, b| a.name.cmp(&b.name));
        resolved
    }

    /// Stop in a non-loading error state with one user notification
    fn fail(&mut self, level: NotificationLevel, message: &str) {
        self.state.error = Some(message.to_string());
        self.state.loading = false;
        self.notifier.notify(level, message);
    }
}

/// Normalize fetched products for display: fill image and detail-URL
/// fallbacks on products and their variants.
fn transform_products(products: Vec<Product>) -> Vec<Product> {
    products
        .into_iter()
        .map(|mut product| {
            let product_image = product
                .image_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());
            let product_url = product
                .product_url
                .clone()
                .unwrap_or_else(|| format!("/app/products/{}", product.id));

            for variant in &mut product.variants {
                if variant.image_url.is_none() {
                    variant.image_url = Some(product_image.clone());
                }
                if variant.product_url.is_none() {
                    variant.product_url = Some(format!("/app/variants/{}", variant.id));
                }
            }

            product.image_url = Some(product_image);
            product.product_url = Some(product_url);
            product
        })
        .collect()
}
