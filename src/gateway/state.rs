//! Shared gateway state.

use std::sync::Arc;

use crate::catalog::{ProductCatalog, WarehouseDirectory};
use crate::config::AuthConfig;
use crate::stock::StockStore;
use crate::transfer::{Transfer, TransferEngine};

use super::types::TransferDto;

/// Everything the handlers need, shared behind one `Arc`.
pub struct AppState {
    pub engine: Arc<TransferEngine>,
    pub warehouses: Arc<dyn WarehouseDirectory>,
    pub products: Arc<dyn ProductCatalog>,
    pub stock: Arc<dyn StockStore>,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(
        engine: Arc<TransferEngine>,
        warehouses: Arc<dyn WarehouseDirectory>,
        products: Arc<dyn ProductCatalog>,
        stock: Arc<dyn StockStore>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            engine,
            warehouses,
            products,
            stock,
            auth,
        }
    }

    /// Resolve warehouse and product references for a transfer response.
    pub async fn transfer_dto(&self, transfer: Transfer) -> TransferDto {
        let source = self.warehouses.get(transfer.source_warehouse_id).await;
        let destination = self
            .warehouses
            .get(transfer.destination_warehouse_id)
            .await;
        let product = self.products.get(transfer.product_id).await;
        TransferDto::assemble(transfer, source, destination, product)
    }

    pub async fn transfer_dtos(&self, transfers: Vec<Transfer>) -> Vec<TransferDto> {
        let mut dtos = Vec::with_capacity(transfers.len());
        for transfer in transfers {
            dtos.push(self.transfer_dto(transfer).await);
        }
        dtos
    }
}
