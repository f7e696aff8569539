use crate::api::{Api, ApiError};
use folio_api::reports::{ReportData, ReportStatusData};
use folio_models::{
    db_conn::DbConn,
    post_reports::{report_status, PostReport},
    Error,
};
use rocket::http::Status;
use rocket_contrib::json::Json;

#[get("/reports")]
pub fn list(conn: DbConn) -> Api<Vec<ReportData>> {
    Ok(Json(
        PostReport::list(&*conn)?
            .into_iter()
            .map(ReportData::from)
            .collect(),
    ))
}

#[get("/reports/<id>")]
pub fn get(id: i32, conn: DbConn) -> Api<ReportData> {
    Ok(Json(PostReport::get(&*conn, id)?.into()))
}

#[patch("/reports/<id>", data = "<payload>")]
pub fn update(id: i32, payload: Json<ReportStatusData>, conn: DbConn) -> Api<ReportData> {
    let payload = payload.into_inner();
    if !report_status::is_valid(&payload.status) {
        return Err(Error::Validation {
            field: "status",
            message: format!("Unknown status {}", payload.status),
        }
        .into());
    }
    let report = PostReport::get(&*conn, id)?;
    Ok(Json(report.set_status(&*conn, &payload.status)?.into()))
}

#[delete("/reports/<id>")]
pub fn delete(id: i32, conn: DbConn) -> Result<Status, ApiError> {
    PostReport::get(&*conn, id)?.delete(&*conn)?;
    Ok(Status::NoContent)
}
