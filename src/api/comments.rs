use crate::api::{Api, ApiError};
use folio_api::comments::CommentData;
use folio_models::{comments::Comment, db_conn::DbConn};
use rocket::http::Status;
use rocket_contrib::json::Json;

#[get("/comments/<id>")]
pub fn get(id: i32, conn: DbConn) -> Api<CommentData> {
    Ok(Json(Comment::get(&*conn, id)?.into()))
}

#[delete("/comments/<id>")]
pub fn delete(id: i32, conn: DbConn) -> Result<Status, ApiError> {
    Comment::get(&*conn, id)?.delete(&*conn)?;
    Ok(Status::NoContent)
}
