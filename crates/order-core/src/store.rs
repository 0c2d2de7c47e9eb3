//! # Persistence Ports
//!
//! `OrderStore` and `CartStore` traits plus thread-safe in-memory
//! implementations. Writes are atomic per record: a concurrent reader
//! sees either the previous record or the new one, never a partial
//! update.

use crate::error::{OrderError, OrderResult};
use crate::order::{Order, OrderStatus};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Persistence port for orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order
    async fn create(&self, order: Order) -> OrderResult<()>;

    /// Fetch an order by id
    async fn get(&self, order_id: &str) -> OrderResult<Option<Order>>;

    /// All orders for a user, newest first
    async fn list_by_user(&self, user_id: &str) -> OrderResult<Vec<Order>>;

    /// Delete an order. Not-found is an error here so callers can
    /// distinguish it without a prior read.
    async fn delete(&self, order_id: &str) -> OrderResult<()>;

    /// Set the lifecycle status (and optionally the payment id) of an
    /// order in one atomic write. Last write wins; there is no version
    /// token.
    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        payment_id: Option<&str>,
    ) -> OrderResult<()>;
}

/// Persistence port for carts. Cart contents are owned by an external
/// collaborator; this module only ever clears them after checkout.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Remove all cart items for a user
    async fn clear(&self, user_id: &str) -> OrderResult<()>;
}

/// Type alias for a shared order store
pub type BoxedOrderStore = Arc<dyn OrderStore>;

/// Type alias for a shared cart store
pub type BoxedCartStore = Arc<dyn CartStore>;

/// A thread-safe in-memory order store.
///
/// Uses `Arc<RwLock<HashMap<String, Order>>>` for shared concurrent
/// access. Suitable for tests and single-process deployment.
#[derive(Default, Clone)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new, empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, order: Order) -> OrderResult<()> {
        let mut orders = self.orders.write().await;
        orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn get(&self, order_id: &str) -> OrderResult<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn delete(&self, order_id: &str) -> OrderResult<()> {
        let mut orders = self.orders.write().await;
        orders
            .remove(order_id)
            .map(|_| ())
            .ok_or_else(|| OrderError::NotFound {
                order_id: order_id.to_string(),
            })
    }

    async fn update_status(
        &self,
        order_id: &str,
        status: OrderStatus,
        payment_id: Option<&str>,
    ) -> OrderResult<()> {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(order_id).ok_or_else(|| OrderError::NotFound {
            order_id: order_id.to_string(),
        })?;
        order.status = status;
        if let Some(pid) = payment_id {
            order.payment_id = Some(pid.to_string());
        }
        Ok(())
    }
}

/// A thread-safe in-memory cart store.
#[derive(Default, Clone)]
pub struct InMemoryCartStore {
    carts: Arc<RwLock<HashMap<String, Vec<serde_json::Value>>>>,
}

impl InMemoryCartStore {
    /// Creates a new, empty in-memory cart store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user's cart (test support)
    pub async fn put(&self, user_id: &str, items: Vec<serde_json::Value>) {
        let mut carts = self.carts.write().await;
        carts.insert(user_id.to_string(), items);
    }

    /// Number of items currently in a user's cart
    pub async fn len(&self, user_id: &str) -> usize {
        let carts = self.carts.read().await;
        carts.get(user_id).map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn clear(&self, user_id: &str) -> OrderResult<()> {
        let mut carts = self.carts.write().await;
        carts.remove(user_id);
        Ok(())
    }
}
