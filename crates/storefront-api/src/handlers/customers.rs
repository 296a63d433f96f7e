//! Customer listing endpoint.

use crate::error::ApiError;
use axum::{Extension, Json};
use storefront_auth::Identity;
use storefront_db::models::Customer;
use storefront_db::{with_store_context, Database};

/// GET /api/customers — the caller's store's customers.
///
/// Runs inside the tenant context binder, so the RLS policy does the
/// filtering; there is no store clause in the query. Admin tokens are
/// rejected: maintenance work goes through the labeled bypass handle,
/// not this API.
pub async fn list_customers(
    Extension(identity): Extension<Identity>,
    Extension(db): Extension<Database>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let subject = identity.rls_subject().ok_or_else(|| {
        ApiError::Forbidden("Administrative tokens cannot access store data".to_string())
    })?;

    let customers = with_store_context(db.inner(), &subject, |conn| {
        Box::pin(async move { Ok(Customer::list(conn).await?) })
    })
    .await?;

    Ok(Json(customers))
}
