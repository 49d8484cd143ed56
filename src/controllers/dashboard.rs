use axum::Json;
use axum::extract::State;
use common::{DbPool, Error};
use models::DashboardStats;

#[instrument(skip(pool))]
pub(crate) async fn get_dashboard(
	State(pool): State<DbPool>,
) -> Result<Json<DashboardStats>, Error> {
	let conn = pool.get().await?;

	let stats = DashboardStats::collect(&conn).await?;

	Ok(Json(stats))
}
