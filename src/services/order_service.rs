//! # Order Workflow
//!
//! Placement, cancellation and status changes. The only code in the crate that touches
//! more than one store per call.
//!
//! ## Placement
//!
//! 1. Validate the request and coalesce repeated product ids.
//! 2. Batch-fetch the products; any missing id fails with `ProductNotFound`.
//! 3. Check every line against that snapshot; any shortfall fails with
//!    `InsufficientStock` before anything is written.
//! 4. Freeze prices: each line is rounded to cents, the total is the sum of the lines.
//!    An amount `Decimal` cannot hold fails with `InvalidInput`.
//! 5. Store the shipping address, reserve stock per line, store the order.
//!
//! Step 5 runs inside a [`Transaction`](crate::store::Transaction). The snapshot check in
//! step 3 is advisory; the reservation itself is the product actor's indivisible
//! decrement-if-sufficient, so a concurrent checkout that drains the stock in between
//! makes the reservation fail and the whole placement roll back.
//!
//! ## Cancellation
//!
//! The `pending -> cancelled` compare-and-set and the per-line stock release run in one
//! transaction: if a release fails, released stock is re-reserved and the order reopened.

use crate::auth::{require_admin, Principal};
use crate::error::AppError;
use crate::model::{
    order_total, Order, OrderCreate, OrderId, OrderItem, OrderLineRequest, OrderStatus,
    PlaceOrderRequest, Product, ProductId, UserId,
};
use crate::product_actor::ProductError;
use crate::store::{AddressStore, OrderStore, ProductStore, Transaction};
use std::collections::HashMap;
use tracing::{debug, error, info, instrument, warn};

pub struct OrderService<P, O, A> {
    products: P,
    orders: O,
    addresses: A,
}

impl<P: Clone, O: Clone, A: Clone> Clone for OrderService<P, O, A> {
    fn clone(&self) -> Self {
        Self {
            products: self.products.clone(),
            orders: self.orders.clone(),
            addresses: self.addresses.clone(),
        }
    }
}

/// Sums quantities of repeated product ids, keeping first-appearance order.
fn coalesce(lines: &[OrderLineRequest]) -> Result<Vec<(ProductId, u32)>, AppError> {
    let mut merged: Vec<(ProductId, u32)> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity == 0 {
            return Err(AppError::InvalidInput(format!(
                "quantity for {} must be at least 1",
                line.product_id
            )));
        }
        match merged.iter_mut().find(|(id, _)| *id == line.product_id) {
            Some((_, quantity)) => {
                *quantity = quantity.checked_add(line.quantity).ok_or_else(|| {
                    AppError::InvalidInput(format!("quantity for {} is too large", line.product_id))
                })?;
            }
            None => merged.push((line.product_id, line.quantity)),
        }
    }
    Ok(merged)
}

impl<P, O, A> OrderService<P, O, A>
where
    P: ProductStore,
    O: OrderStore,
    A: AddressStore,
{
    pub fn new(products: P, orders: O, addresses: A) -> Self {
        Self {
            products,
            orders,
            addresses,
        }
    }

    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn place_order(&self, user_id: UserId, request: PlaceOrderRequest) -> Result<Order, AppError> {
        let mut tx = self.orders.begin_transaction();
        match self.place_within(&mut tx, user_id, request).await {
            Ok(order) => {
                tx.commit();
                info!(order_id = %order.id, total = %order.total, "Order placed");
                Ok(order)
            }
            Err(err) => {
                warn!(error = %err, "Order placement failed, rolling back");
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "Placement rollback incomplete");
                }
                Err(err)
            }
        }
    }

    async fn place_within(
        &self,
        tx: &mut Transaction,
        user_id: UserId,
        request: PlaceOrderRequest,
    ) -> Result<Order, AppError> {
        if request.items.is_empty() {
            return Err(AppError::InvalidInput("order must contain at least one item".into()));
        }
        if request.payment_method.trim().is_empty() {
            return Err(AppError::InvalidInput("payment method is required".into()));
        }
        if let Some(field) = request.shipping_address.first_blank_field() {
            return Err(AppError::InvalidInput(format!("shipping address {field} is required")));
        }
        let lines = coalesce(&request.items)?;

        let ids: Vec<ProductId> = lines.iter().map(|(id, _)| *id).collect();
        let snapshot: HashMap<ProductId, Product> = self
            .products
            .get_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut items = Vec::with_capacity(lines.len());
        for &(product_id, quantity) in &lines {
            let product = snapshot
                .get(&product_id)
                .ok_or(AppError::ProductNotFound(product_id))?;
            if product.stock < quantity {
                return Err(AppError::InsufficientStock {
                    product_id,
                    requested: quantity,
                    available: product.stock,
                });
            }
            let item = OrderItem::priced(product_id, quantity, product.price).map_err(|_| {
                AppError::InvalidInput(format!("subtotal for {quantity} x {product_id} is out of range"))
            })?;
            items.push(item);
        }
        let total = order_total(&items)
            .map_err(|_| AppError::InvalidInput("order total is out of range".into()))?;

        let address_id = self
            .addresses
            .create(user_id, request.shipping_address)
            .await?;
        let addresses = self.addresses.clone();
        tx.on_rollback(format!("delete {address_id}"), move || async move {
            addresses.delete(address_id).await
        });

        for item in &items {
            let (product_id, quantity) = (item.product_id, item.quantity);
            let remaining = match self.products.reserve_stock(product_id, quantity).await {
                Ok(remaining) => remaining,
                Err(ProductError::NotFound(_)) => return Err(AppError::ProductNotFound(product_id)),
                Err(e) => return Err(e.into()),
            };
            debug!(%product_id, quantity, remaining, "Stock reserved");
            let products = self.products.clone();
            tx.on_rollback(format!("release {quantity} x {product_id}"), move || async move {
                products.release_stock(product_id, quantity).await.map(|_| ())
            });
        }

        let order = self
            .orders
            .create(OrderCreate {
                user_id,
                items,
                total,
                shipping_address_id: address_id,
                payment_method: request.payment_method,
            })
            .await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn list_user_orders(&self, user_id: UserId) -> Result<Vec<Order>, AppError> {
        Ok(self.orders.list(user_id).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, AppError> {
        Ok(self.orders.get_by_id(order_id).await?)
    }

    /// Cancels a pending order and returns its stock.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<Order, AppError> {
        let order = self.orders.get_by_id(order_id).await?;
        if order.status != OrderStatus::Pending {
            return Err(AppError::InvalidState {
                from: order.status,
                to: OrderStatus::Cancelled,
            });
        }

        let mut tx = self.orders.begin_transaction();
        match self.cancel_within(&mut tx, order_id).await {
            Ok(order) => {
                tx.commit();
                info!(%order_id, "Order cancelled");
                Ok(order)
            }
            Err(err) => {
                warn!(error = %err, "Cancellation failed, rolling back");
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "Cancellation rollback incomplete");
                }
                Err(err)
            }
        }
    }

    async fn cancel_within(&self, tx: &mut Transaction, order_id: OrderId) -> Result<Order, AppError> {
        let cancelled = self.orders.cancel(order_id).await?;
        let orders = self.orders.clone();
        tx.on_rollback(format!("reopen {order_id}"), move || async move {
            orders.reopen(order_id).await.map(|_| ())
        });

        for item in &cancelled.items {
            let (product_id, quantity) = (item.product_id, item.quantity);
            match self.products.release_stock(product_id, quantity).await {
                Ok(level) => debug!(%product_id, quantity, level, "Stock released"),
                Err(ProductError::NotFound(_)) => {
                    warn!(%order_id, %product_id, quantity, "Product no longer exists, stock not restored");
                    continue;
                }
                Err(e) => return Err(AppError::storage(e)),
            }
            let products = self.products.clone();
            tx.on_rollback(
                format!("reserve {quantity} x {product_id} for {order_id}"),
                move || async move { products.reserve_stock(product_id, quantity).await.map(|_| ()) },
            );
        }
        Ok(cancelled)
    }

    /// Moves an order one step forward. Admin only.
    #[instrument(skip(self, principal), fields(caller = %principal.user_id))]
    pub async fn update_order_status(
        &self,
        principal: &Principal,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        require_admin(principal)?;
        let order = self.orders.get_by_id(order_id).await?;
        if !order.status.can_advance_to(status) {
            return Err(AppError::InvalidState {
                from: order.status,
                to: status,
            });
        }
        let updated = self.orders.advance(order_id, status).await?;
        info!(%order_id, from = %order.status, to = %status, "Order status updated");
        Ok(updated)
    }
}
