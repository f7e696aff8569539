use crate::api::{page_limits, Api, ApiError};
use folio_api::{
    notifications::NotificationData,
    users::{NewUserData, RoleData, UserData, UserUpdateData},
};
use folio_models::{
    db_conn::DbConn,
    notifications::Notification,
    users::{NewUser, Role, User, UserChanges},
    validation,
};
use rocket::{http::Status, response::status};
use rocket_contrib::json::Json;

#[post("/users", data = "<payload>")]
pub fn create(
    payload: Json<NewUserData>,
    conn: DbConn,
) -> Result<status::Created<Json<UserData>>, ApiError> {
    let payload = payload.into_inner();
    let email = validation::email(&payload.email)?;
    let password = validation::password(&payload.password)?;
    let phone = payload.phone.as_deref().map(validation::phone).transpose()?;
    let user = NewUser::create(&*conn, email, &password, phone, Role::Reader)?;
    Ok(status::Created(
        format!("/users/{}", user.id),
        Some(Json(user.into())),
    ))
}

#[get("/users?<skip>&<limit>")]
pub fn list(skip: Option<i32>, limit: Option<i32>, conn: DbConn) -> Api<Vec<UserData>> {
    let users = User::page(&*conn, page_limits(skip, limit))?;
    Ok(Json(users.into_iter().map(UserData::from).collect()))
}

#[get("/users/<id>")]
pub fn get(id: i32, conn: DbConn) -> Api<UserData> {
    Ok(Json(User::get(&*conn, id)?.into()))
}

#[patch("/users/<id>", data = "<payload>")]
pub fn update(id: i32, payload: Json<UserUpdateData>, conn: DbConn) -> Api<UserData> {
    let payload = payload.into_inner();
    let user = User::get(&*conn, id)?;
    let changes = UserChanges {
        email: payload.email.as_deref().map(validation::email).transpose()?,
        hashed_password: match payload
            .password
            .as_deref()
            .map(validation::password)
            .transpose()?
        {
            Some(password) => Some(User::hash_pass(&password)?),
            None => None,
        },
        phone: payload.phone.as_deref().map(validation::phone).transpose()?,
    };
    Ok(Json(user.update(&*conn, changes)?.into()))
}

#[delete("/users/<id>")]
pub fn delete(id: i32, conn: DbConn) -> Result<Status, ApiError> {
    User::get(&*conn, id)?.delete(&*conn)?;
    Ok(Status::NoContent)
}

#[patch("/users/<id>/role", data = "<payload>")]
pub fn update_role(id: i32, payload: Json<RoleData>, conn: DbConn) -> Api<UserData> {
    let role = validation::role(payload.role)?;
    let user = User::get(&*conn, id)?;
    user.update_role(&*conn, role)?;
    Ok(Json(User::get(&*conn, id)?.into()))
}

#[get("/users/<id>/notifications?<skip>&<limit>")]
pub fn notifications(
    id: i32,
    skip: Option<i32>,
    limit: Option<i32>,
    conn: DbConn,
) -> Api<Vec<NotificationData>> {
    let user = User::get(&*conn, id)?;
    let feed = Notification::page_for_user(&*conn, &user, page_limits(skip, limit))?;
    Ok(Json(feed.into_iter().map(NotificationData::from).collect()))
}
