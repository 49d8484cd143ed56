//! Controllers for document types and the documents attached to bookings

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use models::{
	BookingDocument,
	DocumentType,
	NewBookingDocument,
	NewDocumentType,
};
use validator::Validate;

use crate::Session;
use crate::controllers::booking::{
	get_accessible_booking,
	get_modifiable_booking,
};
use crate::schemas::document::{
	BookingDocumentResponse,
	CreateDocumentTypeRequest,
	DocumentTypeResponse,
	RegisterDocumentRequest,
};

#[instrument(skip(pool))]
pub(crate) async fn get_document_types(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let types: Vec<DocumentTypeResponse> = DocumentType::get_all(&conn)
		.await?
		.into_iter()
		.map(Into::into)
		.collect();

	Ok((StatusCode::OK, Json(types)))
}

#[instrument(skip(pool))]
pub(crate) async fn create_document_type(
	State(pool): State<DbPool>,
	Json(request): Json<CreateDocumentTypeRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let doc_type = NewDocumentType::from(request).insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(DocumentTypeResponse::from(doc_type))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_document_type(
	State(pool): State<DbPool>,
	Path(t_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	DocumentType::delete_by_id(t_id, &conn).await?;

	Ok(NoContent)
}

#[instrument(skip(pool))]
pub(crate) async fn get_booking_documents(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	get_accessible_booking(b_id, session, &conn).await?;

	let documents: Vec<BookingDocumentResponse> =
		BookingDocument::for_booking(b_id, &conn)
			.await?
			.into_iter()
			.map(Into::into)
			.collect();

	Ok((StatusCode::OK, Json(documents)))
}

/// Register a document that was stored for a booking
#[instrument(skip(pool))]
pub(crate) async fn register_booking_document(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
	Json(request): Json<RegisterDocumentRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let booking = get_modifiable_booking(b_id, session, &conn).await?;

	let document = NewBookingDocument {
		booking_id:       booking.id,
		document_type_id: request.document_type_id,
		file_path:        request.file_path,
		file_name:        request.file_name,
	}
	.insert(&conn)
	.await?;

	// Reload with the document type included
	let response = BookingDocument::for_booking(b_id, &conn)
		.await?
		.into_iter()
		.find(|(d, _)| d.id == document.id)
		.map(BookingDocumentResponse::from)
		.ok_or_else(|| {
			Error::Infallible("registered document vanished".into())
		})?;

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_booking_document(
	State(pool): State<DbPool>,
	session: Session,
	Path((b_id, d_id)): Path<(i32, i32)>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	get_modifiable_booking(b_id, session, &conn).await?;

	BookingDocument::delete(b_id, d_id, &conn).await?;

	Ok(NoContent)
}
