use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core_types::{ProductId, WarehouseId};

/// A physical warehouse that stock records and transfers reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for registering a warehouse.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewWarehouse {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 2, max = 200))]
    pub location: String,
    pub manager: Option<String>,
    pub phone: Option<String>,
}

/// A product that can be stocked and transferred.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for registering a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 2, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub sku: String,
    pub description: Option<String>,
}

impl Warehouse {
    pub fn new(id: WarehouseId, req: NewWarehouse) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: req.name,
            location: req.location,
            manager: req.manager,
            phone: req.phone,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Product {
    pub fn new(id: ProductId, req: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: req.name,
            sku: req.sku,
            description: req.description,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
