use crate::db::StockUnit;
use crate::{StoreError, router::InventoryState};
use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

/// GET /products -> up to 200 stock units as an indented JSON array.
pub async fn list_products(State(state): State<InventoryState>) -> Result<Response, StoreError> {
    let stock = state.store.list_stock().await?;
    let body = render_stock(&stock)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// DELETE /products/{id} -> acknowledges the id. Storage is not modified.
pub async fn delete_product(Path(id): Path<String>) -> String {
    info!(id = %id, "Successfully deleted");
    format!("Successfully deleted {id}\n")
}

/// Four-space indented array followed by a newline. An empty listing renders as `[]`.
pub fn render_stock(stock: &[StockUnit]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    stock.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}
