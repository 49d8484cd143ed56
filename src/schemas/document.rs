use chrono::NaiveDateTime;
use models::{BookingDocument, DocumentType, NewDocumentType};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentTypeResponse {
	pub id:         i32,
	pub name:       String,
	pub created_at: NaiveDateTime,
}

impl From<DocumentType> for DocumentTypeResponse {
	fn from(doc_type: DocumentType) -> Self {
		Self {
			id:         doc_type.id,
			name:       doc_type.name,
			created_at: doc_type.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentTypeRequest {
	#[validate(length(
		min = 2,
		max = 100,
		message = "name must be between 2 and 100 characters long",
		code = "name-length"
	))]
	pub name: String,
}

impl From<CreateDocumentTypeRequest> for NewDocumentType {
	fn from(request: CreateDocumentTypeRequest) -> Self {
		Self { name: request.name }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDocumentResponse {
	pub id:            i32,
	pub booking_id:    i32,
	pub document_type: DocumentTypeResponse,
	pub file_path:     String,
	pub file_name:     String,
	pub uploaded_at:   NaiveDateTime,
}

impl From<(BookingDocument, DocumentType)> for BookingDocumentResponse {
	fn from((document, doc_type): (BookingDocument, DocumentType)) -> Self {
		Self {
			id:            document.id,
			booking_id:    document.booking_id,
			document_type: doc_type.into(),
			file_path:     document.file_path,
			file_name:     document.file_name,
			uploaded_at:   document.uploaded_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDocumentRequest {
	pub document_type_id: i32,
	#[validate(length(
		min = 1,
		max = 1024,
		message = "file path must be between 1 and 1024 characters long",
		code = "file-path-length"
	))]
	pub file_path:        String,
	#[validate(length(
		min = 1,
		max = 255,
		message = "file name must be between 1 and 255 characters long",
		code = "file-name-length"
	))]
	pub file_name:        String,
}
