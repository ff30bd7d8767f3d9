//! Warehouse and product catalog
//!
//! Lookup collaborators consumed by the transfer engine. The engine only ever
//! needs resolve-by-id, but the gateway exposes enough CRUD to make the
//! workflow drivable end to end.

pub mod models;
pub mod repository;

pub use models::{NewProduct, NewWarehouse, Product, Warehouse};
pub use repository::{
    InMemoryProductCatalog, InMemoryWarehouseDirectory, ProductCatalog, WarehouseDirectory,
};
