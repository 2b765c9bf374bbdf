//! Cart route handlers.
//!
//! Cart operations return HTMX fragments so the navbar badge and the
//! slide-over panel update without full page reloads. Every handler builds a
//! fresh `CartStore` over the request's session slot; the badge fragment is
//! fed by a store subscription rather than ad-hoc refresh calls.

use std::sync::{Arc, Mutex};

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use kharido_cart::{Cart, CartStore, ProductInfo, migrate};
use kharido_core::{Price, ProductId};

use crate::cart_slot::SessionSlot;
use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub img: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    fn render(cart: &Cart, state: &AppState) -> Self {
        let currency = state.config().currency;
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    id: line.id.to_string(),
                    name: line.name.clone(),
                    img: line.img.clone(),
                    quantity: line.quantity,
                    price: Price::new(line.price, currency).to_string(),
                    line_total: Price::new(line.line_total(), currency).to_string(),
                })
                .collect(),
            subtotal: Price::new(cart.total(), currency).to_string(),
            item_count: cart.item_count(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Slide-over cart panel (full render).
#[derive(Template, WebTemplate)]
#[template(path = "cart/panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
    pub open: bool,
}

/// Cart items fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

// =============================================================================
// Store plumbing
// =============================================================================

/// Last item count reported by the store's change notification.
type BadgeCount = Arc<Mutex<Option<u64>>>;

/// Build a store over the session slot with the badge renderer subscribed.
///
/// Legacy widget payloads are upgraded before the store is handed out, so
/// every handler sees the unified document form.
async fn open_store(session: &Session) -> Result<(CartStore<SessionSlot>, BadgeCount)> {
    let slot = SessionSlot::new(session.clone());
    migrate::migrate_legacy(&slot).await?;

    let mut store = CartStore::new(slot);
    let badge: BadgeCount = Arc::default();
    let sink = Arc::clone(&badge);
    store.subscribe(move |change| {
        tracing::debug!(kind = ?change.kind, count = change.cart.item_count(), "cart changed");
        if let Ok(mut last) = sink.lock() {
            *last = Some(change.cart.item_count());
        }
    });

    Ok((store, badge))
}

/// The badge count the subscription saw, if any mutation fired.
fn badge_count(badge: &BadgeCount) -> Option<u64> {
    badge.lock().ok().and_then(|last| *last)
}

async fn panel_is_open(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::CART_PANEL_OPEN)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

async fn set_panel_open(session: &Session, open: bool) -> Result<()> {
    session
        .insert(session_keys::CART_PANEL_OPEN, open)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store panel state: {e}")))
}

// =============================================================================
// Handlers
// =============================================================================

/// Render the slide-over cart panel.
///
/// GET /cart
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartPanelTemplate> {
    let (store, _badge) = open_store(&session).await?;
    let cart = store.load().await;

    Ok(CartPanelTemplate {
        cart: CartView::render(&cart, &state),
        open: panel_is_open(&session).await,
    })
}

/// Open the panel (cart icon activation).
///
/// POST /cart/open
#[instrument(skip(state, session))]
pub async fn open(State(state): State<AppState>, session: Session) -> Result<CartPanelTemplate> {
    set_panel_open(&session, true).await?;
    let (store, _badge) = open_store(&session).await?;
    let cart = store.load().await;

    Ok(CartPanelTemplate {
        cart: CartView::render(&cart, &state),
        open: true,
    })
}

/// Close the panel (close control or backdrop).
///
/// POST /cart/close
#[instrument(skip(state, session))]
pub async fn close(State(state): State<AppState>, session: Session) -> Result<CartPanelTemplate> {
    set_panel_open(&session, false).await?;
    let (store, _badge) = open_store(&session).await?;
    let cart = store.load().await;

    Ok(CartPanelTemplate {
        cart: CartView::render(&cart, &state),
        open: false,
    })
}

/// Add one unit of a catalog product to the cart.
///
/// POST /cart/add
///
/// The catalog is the source of product data; the client only names the id.
/// Returns the badge fragment and triggers a panel refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let id = ProductId::new(form.product_id);
    let product = ProductRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let (store, badge) = open_store(&session).await?;
    let cart = store
        .add_item(ProductInfo {
            id: product.id,
            name: product.name,
            price: product.price,
            img: product.img,
        })
        .await?;

    let count = badge_count(&badge).unwrap_or_else(|| cart.item_count());
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Overwrite a line's quantity (clamped to a minimum of 1).
///
/// POST /cart/update
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let (store, _badge) = open_store(&session).await?;
    let cart = store
        .set_quantity(&ProductId::new(form.product_id), form.quantity)
        .await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::render(&cart, &state),
        },
    )
        .into_response())
}

/// Remove a line from the cart.
///
/// POST /cart/remove
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let (store, _badge) = open_store(&session).await?;
    let cart = store.remove_item(&ProductId::new(form.product_id)).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::render(&cart, &state),
        },
    )
        .into_response())
}

/// Render the navbar badge.
///
/// GET /cart/count
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let (store, _badge) = open_store(&session).await?;
    let cart = store.load().await;

    Ok(CartCountTemplate {
        count: cart.item_count(),
    })
}

/// Empty the cart.
///
/// POST /cart/clear
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    let (store, _badge) = open_store(&session).await?;
    store.clear().await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::render(&Cart::default(), &state),
        },
    )
        .into_response())
}

/// Demo checkout: reject an empty cart, otherwise clear and close the panel.
///
/// POST /cart/checkout
///
/// An empty cart comes back as 422 with a user-visible message and no state
/// change.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let (store, _badge) = open_store(&session).await?;
    let checked_out = store.checkout().await?;
    set_panel_open(&session, false).await?;

    tracing::info!(
        lines = checked_out.len(),
        total = %checked_out.total(),
        "demo checkout completed"
    );

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated, checkout-complete")]),
        CartItemsTemplate {
            cart: CartView::render(&Cart::default(), &state),
        },
    )
        .into_response())
}
