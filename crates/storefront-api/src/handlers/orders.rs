//! Order listing endpoint.

use crate::error::ApiError;
use axum::{Extension, Json};
use storefront_auth::Identity;
use storefront_db::models::Order;
use storefront_db::{with_store_context, Database};

/// GET /api/orders — the caller's store's orders.
///
/// Orders have no store column; visibility flows through the customer
/// FK via the transitive RLS policy.
pub async fn list_orders(
    Extension(identity): Extension<Identity>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let subject = identity.rls_subject().ok_or_else(|| {
        ApiError::Forbidden("Administrative tokens cannot access store data".to_string())
    })?;

    let orders = with_store_context(db.inner(), &subject, |conn| {
        Box::pin(async move { Ok(Order::list(conn).await?) })
    })
    .await?;

    Ok(Json(orders))
}
