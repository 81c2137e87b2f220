//! Catalog management. Reads are open; writes are admin only.

use crate::auth::{require_admin, Principal};
use crate::error::AppError;
use crate::model::{Page, Pagination, Product, ProductCreate, ProductFilter, ProductId, ProductUpdate};
use crate::store::ProductStore;
use tracing::{info, instrument};

#[derive(Clone)]
pub struct ProductService<P> {
    products: P,
    default_page_size: u32,
}

impl<P: ProductStore> ProductService<P> {
    pub fn new(products: P, default_page_size: u32) -> Self {
        Self {
            products,
            default_page_size,
        }
    }

    #[instrument(skip(self, principal, params), fields(sku = %params.sku))]
    pub async fn create(&self, principal: &Principal, params: ProductCreate) -> Result<Product, AppError> {
        require_admin(principal)?;
        let product = self.products.create(params).await?;
        info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: ProductId) -> Result<Product, AppError> {
        Ok(self.products.get_by_id(id).await?)
    }

    /// Applies the fields set in `update`; everything else keeps its stored value.
    #[instrument(skip(self, principal, update))]
    pub async fn update(
        &self,
        principal: &Principal,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, AppError> {
        require_admin(principal)?;
        let product = self.products.update(id, update).await?;
        info!(product_id = %id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self, principal))]
    pub async fn delete(&self, principal: &Principal, id: ProductId) -> Result<(), AppError> {
        require_admin(principal)?;
        self.products.delete(id).await?;
        info!(product_id = %id, "Product deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list(&self, filter: ProductFilter, pagination: Pagination) -> Result<Page<Product>, AppError> {
        let matches = self.products.list(filter).await?;
        Ok(Page::slice(matches, pagination.normalized(self.default_page_size)))
    }
}
