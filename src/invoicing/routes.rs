use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::Utc;

use super::requests::{CustomInvoiceRequest, ListInvoicesQuery, MarkPaidRequest};
use super::responses::{InvoiceCreatedResponse, InvoiceListResponse, InvoiceResponse};
use super::services;
use crate::error::Result;
use crate::AppState;

async fn generate_from_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<(StatusCode, Json<InvoiceCreatedResponse>)> {
    let invoice = services::generate_from_booking(&state.db, booking_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(InvoiceCreatedResponse {
            invoice_id: invoice.id,
            invoice_number: invoice.invoice_number,
        }),
    ))
}

async fn create_custom_invoice(
    State(state): State<AppState>,
    Json(req): Json<CustomInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>)> {
    let invoice = services::generate_custom(&state.db, &req).await?;
    let response = InvoiceResponse::from_invoice(invoice, Utc::now().date_naive())?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_invoices(
    State(state): State<AppState>,
    Query(query): Query<ListInvoicesQuery>,
) -> Result<Json<InvoiceListResponse>> {
    let today = Utc::now().date_naive();
    let invoices = services::list_invoices(&state.db, &query).await?;
    let invoices = invoices
        .into_iter()
        .map(|inv| InvoiceResponse::from_invoice(inv, today))
        .collect::<Result<Vec<_>>>()?;
    Ok(Json(InvoiceListResponse { invoices }))
}

async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<InvoiceResponse>> {
    let invoice = super::queries::get_invoice(&state.db, id).await?;
    let response = InvoiceResponse::from_invoice(invoice, Utc::now().date_naive())?;
    Ok(Json(response))
}

async fn mark_paid(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<MarkPaidRequest>,
) -> Result<Json<InvoiceResponse>> {
    let invoice = services::mark_paid(&state.db, id, &req).await?;
    let response = InvoiceResponse::from_invoice(invoice, Utc::now().date_naive())?;
    Ok(Json(response))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/invoices", get(list_invoices))
        .route("/admin/invoices/custom", post(create_custom_invoice))
        .route(
            "/admin/invoices/from-booking/:booking_id",
            post(generate_from_booking),
        )
        .route("/admin/invoices/:id", get(get_invoice))
        .route("/admin/invoices/:id/mark-paid", put(mark_paid))
}
