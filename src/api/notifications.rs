use crate::api::Api;
use folio_api::notifications::{MarkReadData, NotificationData};
use folio_models::{db_conn::DbConn, notifications::Notification};
use rocket_contrib::json::Json;

#[patch("/notifications/<id>/read", data = "<payload>")]
pub fn mark_read(id: i32, payload: Json<MarkReadData>, conn: DbConn) -> Api<NotificationData> {
    let notification = Notification::get(&*conn, id)?;
    let recipient = notification.mark_read(&*conn, payload.user_id)?;
    Ok(Json((notification, recipient).into()))
}
