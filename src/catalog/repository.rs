//! Lookup repositories for warehouses and products.
//!
//! The transfer engine depends on these only through the trait objects, so a
//! future relational implementation can be swapped in without touching the
//! engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use super::models::{NewProduct, NewWarehouse, Product, Warehouse};
use crate::core_types::{ProductId, WarehouseId};

/// Warehouse lookup collaborator.
#[async_trait]
pub trait WarehouseDirectory: Send + Sync {
    async fn get(&self, id: WarehouseId) -> Option<Warehouse>;
    async fn list(&self) -> Vec<Warehouse>;
    async fn insert(&self, req: NewWarehouse) -> Warehouse;
}

/// Product lookup collaborator.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get(&self, id: ProductId) -> Option<Product>;
    async fn list(&self) -> Vec<Product>;
    async fn insert(&self, req: NewProduct) -> Product;
}

/// In-process warehouse directory backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryWarehouseDirectory {
    warehouses: DashMap<WarehouseId, Warehouse>,
    id_gen: AtomicU64,
}

impl InMemoryWarehouseDirectory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> WarehouseId {
        self.id_gen.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl WarehouseDirectory for InMemoryWarehouseDirectory {
    async fn get(&self, id: WarehouseId) -> Option<Warehouse> {
        self.warehouses.get(&id).map(|w| w.clone())
    }

    async fn list(&self) -> Vec<Warehouse> {
        let mut all: Vec<Warehouse> = self.warehouses.iter().map(|w| w.clone()).collect();
        all.sort_by_key(|w| w.id);
        all
    }

    async fn insert(&self, req: NewWarehouse) -> Warehouse {
        let warehouse = Warehouse::new(self.next_id(), req);
        self.warehouses.insert(warehouse.id, warehouse.clone());
        warehouse
    }
}

/// In-process product catalog backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryProductCatalog {
    products: DashMap<ProductId, Product>,
    id_gen: AtomicU64,
}

impl InMemoryProductCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> ProductId {
        self.id_gen.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl ProductCatalog for InMemoryProductCatalog {
    async fn get(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).map(|p| p.clone())
    }

    async fn list(&self) -> Vec<Product> {
        let mut all: Vec<Product> = self.products.iter().map(|p| p.clone()).collect();
        all.sort_by_key(|p| p.id);
        all
    }

    async fn insert(&self, req: NewProduct) -> Product {
        let product = Product::new(self.next_id(), req);
        self.products.insert(product.id, product.clone());
        product
    }
}
