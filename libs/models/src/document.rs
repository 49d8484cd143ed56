use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::{booking_documents, document_types};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A kind of supporting document (request letter, event proposal, ...)
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = document_types)]
#[diesel(check_for_backend(Pg))]
pub struct DocumentType {
	pub id:         i32,
	pub name:       String,
	pub created_at: NaiveDateTime,
}

impl DocumentType {
	/// Get all [`DocumentType`]s ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let types = conn
			.interact(|conn| {
				use self::document_types::dsl::*;

				document_types.order(name).select(Self::as_select()).load(conn)
			})
			.await??;

		Ok(types)
	}

	/// Delete a [`DocumentType`] and every document of that type
	#[instrument(skip(conn))]
	pub async fn delete_by_id(t_id: i32, conn: &DbConn) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::document_types::dsl::*;

				diesel::delete(document_types.find(t_id)).execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!("document type with id {t_id}")));
		}

		info!("deleted document type with id {t_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = document_types)]
#[diesel(check_for_backend(Pg))]
pub struct NewDocumentType {
	pub name: String,
}

impl NewDocumentType {
	/// Insert this [`NewDocumentType`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<DocumentType, Error> {
		let doc_type = conn
			.interact(|conn| {
				diesel::insert_into(document_types::table)
					.values(self)
					.returning(DocumentType::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created document type {doc_type:?}");

		Ok(doc_type)
	}
}

/// A document attached to a booking, the file itself lives in external
/// storage at `file_path`
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = booking_documents)]
#[diesel(check_for_backend(Pg))]
pub struct BookingDocument {
	pub id:               i32,
	pub booking_id:       i32,
	pub document_type_id: i32,
	pub file_path:        String,
	pub file_name:        String,
	pub uploaded_at:      NaiveDateTime,
}

impl BookingDocument {
	/// Get all documents of a booking together with their type
	#[instrument(skip(conn))]
	pub async fn for_booking(
		b_id: i32,
		conn: &DbConn,
	) -> Result<Vec<(Self, DocumentType)>, Error> {
		let documents = conn
			.interact(move |conn| {
				booking_documents::table
					.inner_join(document_types::table)
					.filter(booking_documents::booking_id.eq(b_id))
					.order(booking_documents::uploaded_at)
					.select((Self::as_select(), DocumentType::as_select()))
					.load(conn)
			})
			.await??;

		Ok(documents)
	}

	/// Delete a document from a booking
	#[instrument(skip(conn))]
	pub async fn delete(
		b_id: i32,
		d_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let count = conn
			.interact(move |conn| {
				use self::booking_documents::dsl::*;

				diesel::delete(
					booking_documents.find(d_id).filter(booking_id.eq(b_id)),
				)
				.execute(conn)
			})
			.await??;

		if count == 0 {
			return Err(Error::NotFound(format!(
				"document {d_id} of booking {b_id}"
			)));
		}

		info!("deleted document {d_id} of booking {b_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = booking_documents)]
#[diesel(check_for_backend(Pg))]
pub struct NewBookingDocument {
	pub booking_id:       i32,
	pub document_type_id: i32,
	pub file_path:        String,
	pub file_name:        String,
}

impl NewBookingDocument {
	/// Register a stored document for a booking
	///
	/// An unknown document type is a validation error
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<BookingDocument, Error> {
		let document = conn
			.interact(|conn| {
				diesel::insert_into(booking_documents::table)
					.values(self)
					.returning(BookingDocument::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"registered document {} for booking {}",
			document.file_name, document.booking_id
		);

		Ok(document)
	}
}
