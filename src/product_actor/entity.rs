//! Entity trait implementation for the Product domain type.
//!
//! This module contains the [`ActorEntity`] trait implementation
//! that enables [`Product`] to be managed by the generic [`actor_framework::ResourceActor`].
//!
//! Stock changes go through [`ProductAction`]s. Because the actor handles one message
//! at a time and only keeps the result of a successful action, `ReserveStock` is an
//! indivisible decrement-if-sufficient.

use super::actions::{ProductAction, ProductActionResult};
use super::ProductError;
use crate::model::{Product, ProductCreate, ProductFilter, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

fn validate(name: &str, sku: &str, price: Decimal) -> Result<(), ProductError> {
    if name.trim().is_empty() {
        return Err(ProductError::ValidationError("name is required".into()));
    }
    if sku.trim().is_empty() {
        return Err(ProductError::ValidationError("sku is required".into()));
    }
    if price < Decimal::ZERO {
        return Err(ProductError::ValidationError(format!(
            "price must not be negative, got {price}"
        )));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Filter = ProductFilter;
    type Context = ();
    type Error = ProductError;

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, Self::Error> {
        validate(&params.name, &params.sku, params.price)?;
        let now = Utc::now();
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            sku: params.sku,
            stock: params.stock,
            category: params.category,
            image_url: params.image_url,
            created_at: now,
            updated_at: now,
        })
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        filter.accepts(self)
    }

    fn conflicts_with(&self, other: &Self) -> Option<String> {
        (self.sku == other.sku).then(|| format!("sku {}", self.sku))
    }

    /// Applies the set fields to the current row and validates the result.
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
        update.apply_to(self);
        validate(&self.name, &self.sku, self.price)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Handles custom actions for the Product entity.
    ///
    /// # Actions
    /// - `ReserveStock`: decrements if enough is available, otherwise fails untouched
    /// - `ReleaseStock`: increments
    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::ReserveStock(0) | ProductAction::ReleaseStock(0) => Err(
                ProductError::ValidationError("quantity must be at least 1".into()),
            ),
            ProductAction::ReserveStock(quantity) => {
                if self.stock < quantity {
                    return Err(ProductError::InsufficientStock {
                        product_id: self.id,
                        requested: quantity,
                        available: self.stock,
                    });
                }
                self.stock -= quantity;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::ReserveStock(self.stock))
            }
            ProductAction::ReleaseStock(quantity) => {
                self.stock = self.stock.checked_add(quantity).ok_or_else(|| {
                    ProductError::ValidationError(format!("stock overflow releasing {quantity}"))
                })?;
                self.updated_at = Utc::now();
                Ok(ProductActionResult::ReleaseStock(self.stock))
            }
        }
    }
}
