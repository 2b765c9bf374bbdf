//! The cart store: read-modify-write operations over one storage slot.

use chrono::Utc;
use rust_decimal::Decimal;

use kharido_core::ProductId;

use crate::error::CartError;
use crate::event::{CartChange, ChangeKind};
use crate::line::{Cart, CartLine, ProductInfo};
use crate::schema;
use crate::storage::CartSlot;

type Listener = Box<dyn Fn(&CartChange) + Send + Sync>;

/// Cart store over a pluggable [`CartSlot`].
///
/// Every mutating operation reloads the persisted cart, applies one change,
/// and writes the whole cart back, so the slot is always the sole source of
/// truth. Holders of independent stores over the same slot are
/// last-writer-wins; there is no lost-update detection.
///
/// Subscribed listeners are invoked synchronously after each effective
/// mutation with the state the cart was left in.
pub struct CartStore<S> {
    slot: S,
    key: String,
    listeners: Vec<Listener>,
}

impl<S: CartSlot> CartStore<S> {
    /// Create a store over `slot` using the default key
    /// ([`schema::CART_KEY`]).
    #[must_use]
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, schema::CART_KEY)
    }

    /// Create a store addressing a non-default slot key.
    ///
    /// Separate keys give fully independent carts over the same backend.
    #[must_use]
    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
            listeners: Vec::new(),
        }
    }

    /// The slot key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Register a change listener.
    ///
    /// Listeners fire once per effective mutation, after the write succeeded.
    pub fn subscribe(&mut self, listener: impl Fn(&CartChange) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Load the persisted cart.
    ///
    /// Absent, unreadable, or malformed state all come back as an empty cart;
    /// this never surfaces an error.
    pub async fn load(&self) -> Cart {
        match self.slot.read(&self.key).await {
            Ok(Some(raw)) => schema::decode(&raw),
            Ok(None) => Cart::default(),
            Err(err) => {
                tracing::debug!(%err, "cart slot unreadable, starting empty");
                Cart::default()
            }
        }
    }

    /// Overwrite the persisted cart wholesale.
    ///
    /// # Errors
    ///
    /// Propagates backend write failures as [`CartError::Storage`]; there is
    /// no retry or fallback path.
    pub async fn save(&self, cart: &Cart) -> Result<(), CartError> {
        self.persist(cart).await?;
        self.notify(cart, ChangeKind::Replaced);
        Ok(())
    }

    /// Add one unit of `product` to the cart.
    ///
    /// A repeat add of an existing id only increments its quantity; the
    /// stored name, price, and image keep their first-insertion values. A new
    /// id appends a line with quantity 1 stamped `added_at = now`. Prices
    /// below zero are stored as zero.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures; see [`CartStore::save`].
    pub async fn add_item(&self, product: ProductInfo) -> Result<Cart, CartError> {
        let mut cart = self.load().await;
        let id = product.id.clone();

        match cart.get_mut(&id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => cart.push(CartLine {
                id: product.id,
                name: product.name,
                price: product.price.max(Decimal::ZERO),
                img: product.img,
                quantity: 1,
                added_at: Utc::now(),
            }),
        }

        self.persist(&cart).await?;
        self.notify(&cart, ChangeKind::Added(id));
        Ok(cart)
    }

    /// Remove the line for `id`, if present.
    ///
    /// An absent id is a benign no-op: the reloaded cart is written back
    /// unchanged and no notification fires. Calling this twice in a row is
    /// therefore idempotent.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures; see [`CartStore::save`].
    pub async fn remove_item(&self, id: &ProductId) -> Result<Cart, CartError> {
        let mut cart = self.load().await;
        let removed = cart.retain_except(id);
        self.persist(&cart).await?;
        if removed {
            self.notify(&cart, ChangeKind::Removed(id.clone()));
        }
        Ok(cart)
    }

    /// Overwrite the quantity of the line for `id`.
    ///
    /// Quantities clamp to a minimum of 1 — there is no remove-via-zero path;
    /// removal is [`CartStore::remove_item`]. An absent id is a no-op and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures; see [`CartStore::save`].
    pub async fn set_quantity(&self, id: &ProductId, quantity: i64) -> Result<Cart, CartError> {
        let mut cart = self.load().await;

        let Some(line) = cart.get_mut(id) else {
            return Ok(cart);
        };
        let clamped = u32::try_from(quantity.max(1)).unwrap_or(u32::MAX);
        line.quantity = clamped;

        self.persist(&cart).await?;
        self.notify(&cart, ChangeKind::QuantitySet(id.clone(), clamped));
        Ok(cart)
    }

    /// Remove the persisted cart entirely.
    ///
    /// # Errors
    ///
    /// Propagates backend failures as [`CartError::Storage`].
    pub async fn clear(&self) -> Result<(), CartError> {
        self.slot.remove(&self.key).await?;
        self.notify(&Cart::default(), ChangeKind::Cleared);
        Ok(())
    }

    /// Check out: reject an empty cart, otherwise clear it.
    ///
    /// Returns the cart as it stood at checkout so callers can show a
    /// confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] (with no state change) when there is
    /// nothing to check out; otherwise propagates backend failures.
    pub async fn checkout(&self) -> Result<Cart, CartError> {
        let cart = self.load().await;
        if cart.is_empty() {
            return Err(CartError::EmptyCart);
        }

        self.slot.remove(&self.key).await?;
        self.notify(&Cart::default(), ChangeKind::CheckedOut);
        Ok(cart)
    }

    async fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        let raw = schema::encode(cart)?;
        self.slot.write(&self.key, &raw).await?;
        Ok(())
    }

    fn notify(&self, cart: &Cart, kind: ChangeKind) {
        if self.listeners.is_empty() {
            return;
        }
        let change = CartChange {
            cart: cart.clone(),
            kind,
        };
        for listener in &self.listeners {
            listener(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;
    use std::sync::{Arc, Mutex};

    fn product(id: &str, price: Decimal) -> ProductInfo {
        ProductInfo {
            id: id.into(),
            name: format!("Product {id}"),
            price,
            img: String::new(),
        }
    }

    fn store() -> CartStore<MemorySlot> {
        CartStore::new(MemorySlot::default())
    }

    #[tokio::test]
    async fn distinct_ids_make_distinct_lines() {
        let store = store();
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        store.add_item(product("p2", Decimal::ONE)).await.expect("add");
        store.add_item(product("p3", Decimal::ONE)).await.expect("add");

        let cart = store.load().await;
        assert_eq!(cart.len(), 3);
        assert!(cart.lines().iter().all(|line| line.quantity == 1));
    }

    #[tokio::test]
    async fn repeat_adds_increment_quantity_only() {
        let store = store();
        store
            .add_item(ProductInfo {
                id: "p1".into(),
                name: "Shoe".to_owned(),
                price: Decimal::new(4999, 2),
                img: "shoe.png".to_owned(),
            })
            .await
            .expect("add");

        // Second add carries different catalog data; the stored line must
        // keep its first-insertion snapshot.
        store
            .add_item(ProductInfo {
                id: "p1".into(),
                name: "Renamed Shoe".to_owned(),
                price: Decimal::new(100, 0),
                img: "other.png".to_owned(),
            })
            .await
            .expect("add");

        let cart = store.load().await;
        assert_eq!(cart.len(), 1);
        let line = cart.get(&"p1".into()).expect("line");
        assert_eq!(line.quantity, 2);
        assert_eq!(line.name, "Shoe");
        assert_eq!(line.price, Decimal::new(4999, 2));
        assert_eq!(line.img, "shoe.png");
    }

    #[tokio::test]
    async fn added_at_is_set_once() {
        let store = store();
        let first = store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        let stamped = first.get(&"p1".into()).expect("line").added_at;

        store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        let cart = store.load().await;
        assert_eq!(cart.get(&"p1".into()).expect("line").added_at, stamped);
    }

    #[tokio::test]
    async fn insertion_order_is_preserved_across_reload() {
        let store = store();
        for id in ["p3", "p1", "p2"] {
            store.add_item(product(id, Decimal::ONE)).await.expect("add");
        }
        store.add_item(product("p3", Decimal::ONE)).await.expect("add");

        let cart = store.load().await;
        let ids: Vec<&str> = cart.lines().iter().map(|line| line.id.as_str()).collect();
        assert_eq!(ids, ["p3", "p1", "p2"]);
    }

    #[tokio::test]
    async fn set_quantity_clamps_to_one() {
        let store = store();
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");

        store.set_quantity(&"p1".into(), 0).await.expect("set");
        assert_eq!(store.load().await.get(&"p1".into()).expect("line").quantity, 1);

        store.set_quantity(&"p1".into(), -5).await.expect("set");
        assert_eq!(store.load().await.get(&"p1".into()).expect("line").quantity, 1);

        store.set_quantity(&"p1".into(), 7).await.expect("set");
        assert_eq!(store.load().await.get(&"p1".into()).expect("line").quantity, 7);
    }

    #[tokio::test]
    async fn set_quantity_on_missing_id_is_a_no_op() {
        let store = store();
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        let before = store.load().await;

        store.set_quantity(&"ghost".into(), 4).await.expect("set");
        assert_eq!(store.load().await, before);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = store();
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");

        store.remove_item(&"p1".into()).await.expect("remove");
        assert!(store.load().await.get(&"p1".into()).is_none());

        // Second removal is a benign no-op.
        store.remove_item(&"p1".into()).await.expect("remove");
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn clear_leaves_an_empty_cart() {
        let store = store();
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        store.clear().await.expect("clear");
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn full_demo_scenario() {
        let store = store();
        let shoe = ProductInfo {
            id: "p1".into(),
            name: "Shoe".to_owned(),
            price: Decimal::new(4999, 2),
            img: String::new(),
        };

        let cart = store.add_item(shoe.clone()).await.expect("add");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&"p1".into()).expect("line").quantity, 1);

        let cart = store.add_item(shoe).await.expect("add");
        assert_eq!(cart.get(&"p1".into()).expect("line").quantity, 2);
        assert_eq!(cart.total(), Decimal::new(9998, 2));

        let cart = store.set_quantity(&"p1".into(), 0).await.expect("set");
        assert_eq!(cart.get(&"p1".into()).expect("line").quantity, 1);

        let cart = store.remove_item(&"p1".into()).await.expect("remove");
        assert!(cart.is_empty());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn loading_garbage_yields_an_empty_cart() {
        let slot = MemorySlot::default();
        slot.write(schema::CART_KEY, "not json").await.expect("seed");

        let store = CartStore::new(slot);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn mutating_on_top_of_garbage_starts_fresh() {
        let slot = MemorySlot::default();
        slot.write(schema::CART_KEY, "not json").await.expect("seed");

        let store = CartStore::new(slot);
        let cart = store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        assert_eq!(cart.len(), 1);
    }

    #[tokio::test]
    async fn checkout_rejects_an_empty_cart() {
        let store = store();
        assert!(matches!(store.checkout().await, Err(CartError::EmptyCart)));
    }

    #[tokio::test]
    async fn checkout_clears_a_non_empty_cart() {
        let store = store();
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");

        let checked_out = store.checkout().await.expect("checkout");
        assert_eq!(checked_out.len(), 1);
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn separate_keys_are_independent_carts() {
        let slot = MemorySlot::default();
        let a = CartStore::with_key(slot.clone(), "cart_a");
        let b = CartStore::with_key(slot, "cart_b");

        a.add_item(product("p1", Decimal::ONE)).await.expect("add");
        assert!(b.load().await.is_empty());
        assert_eq!(a.load().await.len(), 1);
    }

    #[tokio::test]
    async fn shared_slot_is_last_writer_wins() {
        let slot = MemorySlot::default();
        let a = CartStore::new(slot.clone());
        let b = CartStore::new(slot);

        a.add_item(product("p1", Decimal::ONE)).await.expect("add");
        // b reloads before mutating, so it sees a's write rather than a
        // stale snapshot.
        b.add_item(product("p2", Decimal::ONE)).await.expect("add");
        assert_eq!(a.load().await.len(), 2);
    }

    #[tokio::test]
    async fn listeners_see_one_event_per_effective_mutation() {
        let slot = MemorySlot::default();
        let seen: Arc<Mutex<Vec<ChangeKind>>> = Arc::default();

        let mut store = CartStore::new(slot);
        let sink = Arc::clone(&seen);
        store.subscribe(move |change| {
            if let Ok(mut kinds) = sink.lock() {
                kinds.push(change.kind.clone());
            }
        });

        store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        store.set_quantity(&"p1".into(), 3).await.expect("set");
        store.set_quantity(&"ghost".into(), 3).await.expect("set");
        store.remove_item(&"ghost".into()).await.expect("remove");
        store.remove_item(&"p1".into()).await.expect("remove");
        store.clear().await.expect("clear");

        let kinds = seen.lock().expect("lock").clone();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Added("p1".into()),
                ChangeKind::QuantitySet("p1".into(), 3),
                ChangeKind::Removed("p1".into()),
                ChangeKind::Cleared,
            ]
        );
    }

    #[tokio::test]
    async fn listener_change_carries_resulting_state() {
        let counts: Arc<Mutex<Vec<u64>>> = Arc::default();

        let mut store = store();
        let sink = Arc::clone(&counts);
        store.subscribe(move |change| {
            if let Ok(mut seen) = sink.lock() {
                seen.push(change.cart.item_count());
            }
        });

        store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");
        store.clear().await.expect("clear");

        assert_eq!(counts.lock().expect("lock").clone(), vec![1, 2, 0]);
    }

    #[tokio::test]
    async fn explicit_save_replaces_the_cart() {
        let store = store();
        store.add_item(product("p1", Decimal::ONE)).await.expect("add");

        store.save(&Cart::default()).await.expect("save");
        assert!(store.load().await.is_empty());
    }
}
