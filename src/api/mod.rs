use folio_models::{Error, ITEMS_PER_PAGE};
use rocket::{
    http::Status,
    request::Request,
    response::{self, status, Responder},
};
use rocket_contrib::json::Json;
use tracing::error;

pub mod authors;
pub mod comments;
pub mod errors;
pub mod notifications;
pub mod posts;
pub mod reports;
pub mod users;

pub type Api<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> ApiError {
        ApiError(err)
    }
}

impl<'r> Responder<'r> for ApiError {
    fn respond_to(self, req: &Request<'_>) -> response::Result<'r> {
        let (code, message) = match self.0 {
            Error::NotFound => (Status::NotFound, "Not found".to_owned()),
            Error::Conflict(reason) => (Status::Conflict, reason),
            Error::InvalidReference(reason) => (Status::BadRequest, reason),
            Error::Validation { field, message } => {
                (Status::BadRequest, format!("{}: {}", field, message))
            }
            other => {
                error!("unhandled error: {:?}", other);
                (Status::InternalServerError, "Internal server error".to_owned())
            }
        };
        status::Custom(code, Json(json!({ "error": message }))).respond_to(req)
    }
}

/// Turns `?skip&limit` query parameters into the (min, max) window the
/// model layer paginates with.
pub fn page_limits(skip: Option<i32>, limit: Option<i32>) -> (i32, i32) {
    let skip = skip.unwrap_or(0).max(0);
    let limit = limit.unwrap_or(ITEMS_PER_PAGE).max(0);
    (skip, skip + limit)
}

#[get("/")]
pub fn index() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to the Book Review API!" }))
}
