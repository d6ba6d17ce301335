//! Invoice handlers

use axum::extract::State;
use rextrix_service::dto::{CreateInvoiceRequest, InvoiceResponse, UpdateInvoiceRequest};
use rextrix_service::InvoiceService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiJson, ApiResult, Created};
use crate::state::AppState;

/// GET /api/contracts/:id/invoices
pub async fn list_invoices(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(contract_id): IdPath,
) -> ApiResult<ApiJson<Vec<InvoiceResponse>>> {
    let service = InvoiceService::new(state.service_context());
    Ok(ApiJson(service.list(auth.user_id, contract_id).await?))
}

/// POST /api/contracts/:id/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(contract_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateInvoiceRequest>,
) -> ApiResult<Created<ApiJson<InvoiceResponse>>> {
    let service = InvoiceService::new(state.service_context());
    let invoice = service.create(auth.user_id, contract_id, request).await?;
    Ok(Created(ApiJson(invoice)))
}

/// PATCH /api/invoices/:id
pub async fn update_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(invoice_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateInvoiceRequest>,
) -> ApiResult<ApiJson<InvoiceResponse>> {
    let service = InvoiceService::new(state.service_context());
    let invoice = service
        .update_status(auth.user_id, invoice_id, request)
        .await?;
    Ok(ApiJson(invoice))
}
