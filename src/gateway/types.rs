//! Wire types for the HTTP gateway.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::{Product, Warehouse};
use crate::core_types::Quantity;
use crate::stock::StockError;
use crate::transfer::{Transfer, TransferError, TransferStatus};

/// Unified API response wrapper
///
/// All API responses follow this structure:
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: actual data (success) or null (error)
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const VALIDATION_FAILED: i32 = 1001;
    pub const CONSTRAINT_VIOLATION: i32 = 1002;
    pub const INVALID_STATE_TRANSITION: i32 = 1003;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4004;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
}

/// Handler-level error that renders as an `ApiResponse` with no data.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg)
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_FAILED,
            msg,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.code, self.msg);
        (self.status, Json(body)).into_response()
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = match &err {
            TransferError::TransferNotFound(_)
            | TransferError::WarehouseNotFound(_)
            | TransferError::ProductNotFound(_) => error_codes::NOT_FOUND,
            TransferError::NotPending { .. }
            | TransferError::TerminalState { .. }
            | TransferError::DeleteInTransit
            | TransferError::DeleteCompleted => error_codes::INVALID_STATE_TRANSITION,
            TransferError::Stock(_) => error_codes::INTERNAL_ERROR,
            _ => error_codes::CONSTRAINT_VIOLATION,
        };
        Self::new(status, code, err.to_string())
    }
}

impl From<StockError> for ApiError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::RecordNotFound { .. } => Self::not_found(err.to_string()),
            StockError::DuplicateRecord { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::CONSTRAINT_VIOLATION,
                err.to_string(),
            ),
            StockError::NegativeQuantity { .. } | StockError::NegativeReservation { .. } => {
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    err.to_string(),
                )
            }
        }
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// 200 with a success envelope.
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// 201 with a success envelope.
pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Warehouse reference embedded in transfer responses.
#[derive(Debug, Serialize)]
pub struct WarehouseRef {
    pub id: u64,
    pub name: String,
    pub location: String,
}

impl From<Warehouse> for WarehouseRef {
    fn from(w: Warehouse) -> Self {
        Self {
            id: w.id,
            name: w.name,
            location: w.location,
        }
    }
}

/// Product reference embedded in transfer responses.
#[derive(Debug, Serialize)]
pub struct ProductRef {
    pub id: u64,
    pub name: String,
    pub sku: String,
}

impl From<Product> for ProductRef {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            sku: p.sku,
        }
    }
}

/// Transfer response with warehouse and product references resolved.
///
/// References are `Option` only because resolution happens after the engine
/// call; a missing reference for a stored transfer would be a wiring bug, not
/// a client error, so the field degrades to null instead of failing the
/// whole response.
#[derive(Debug, Serialize)]
pub struct TransferDto {
    pub id: u64,
    pub source_warehouse: Option<WarehouseRef>,
    pub destination_warehouse: Option<WarehouseRef>,
    pub product: Option<ProductRef>,
    pub quantity: Quantity,
    pub driver_name: String,
    pub driver_tc_id: String,
    pub driver_phone: String,
    pub vehicle_plate: String,
    pub status: TransferStatus,
    pub transfer_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancelled_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransferDto {
    pub fn assemble(
        transfer: Transfer,
        source: Option<Warehouse>,
        destination: Option<Warehouse>,
        product: Option<Product>,
    ) -> Self {
        Self {
            id: transfer.id,
            source_warehouse: source.map(WarehouseRef::from),
            destination_warehouse: destination.map(WarehouseRef::from),
            product: product.map(ProductRef::from),
            quantity: transfer.quantity,
            driver_name: transfer.driver_name,
            driver_tc_id: transfer.driver_tc_id,
            driver_phone: transfer.driver_phone,
            vehicle_plate: transfer.vehicle_plate,
            status: transfer.status,
            transfer_date: transfer.transfer_date,
            completed_date: transfer.completed_date,
            cancelled_date: transfer.cancelled_date,
            notes: transfer.notes,
            created_at: transfer.created_at,
            updated_at: transfer.updated_at,
        }
    }
}
