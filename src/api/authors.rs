use crate::api::{Api, ApiError};
use folio_api::{
    authors::{AuthorData, AuthorUpdateData, FollowData, NewAuthorData, PromoteAuthorData},
    users::UserData,
};
use folio_models::{
    authors::{Author, AuthorChanges},
    db_conn::DbConn,
    follows::Follow,
    users::User,
    validation,
};
use rocket::{http::Status, response::status};
use rocket_contrib::json::Json;

#[post("/authors", data = "<payload>")]
pub fn create(
    payload: Json<NewAuthorData>,
    conn: DbConn,
) -> Result<status::Created<Json<AuthorData>>, ApiError> {
    let payload = payload.into_inner();
    let pen_name = validation::pen_name(&payload.pen_name)?;
    let email = validation::email(&payload.profile.email)?;
    let password = validation::password(&payload.profile.password)?;
    let phone = payload
        .profile
        .phone
        .as_deref()
        .map(validation::phone)
        .transpose()?;
    let author =
        Author::create_with_user(&*conn, pen_name, payload.bio, email, &password, phone)?;
    let data = author.to_data(&*conn)?;
    Ok(status::Created(
        format!("/authors/{}", author.id),
        Some(Json(data)),
    ))
}

/// Promotes an existing user, `POST /authors/<user_id>`.
#[post("/authors/<user_id>", data = "<payload>")]
pub fn promote(
    user_id: i32,
    payload: Json<PromoteAuthorData>,
    conn: DbConn,
) -> Result<status::Created<Json<AuthorData>>, ApiError> {
    let payload = payload.into_inner();
    let pen_name = validation::pen_name(&payload.pen_name)?;
    let author = Author::create_for_user(&*conn, user_id, pen_name, payload.bio)?;
    let data = author.to_data(&*conn)?;
    Ok(status::Created(
        format!("/authors/{}", author.id),
        Some(Json(data)),
    ))
}

#[get("/authors")]
pub fn list(conn: DbConn) -> Api<Vec<AuthorData>> {
    let authors = Author::list(&*conn)?;
    let mut result = Vec::with_capacity(authors.len());
    for author in authors {
        result.push(author.to_data(&*conn)?);
    }
    Ok(Json(result))
}

#[get("/authors/<id>")]
pub fn get(id: i32, conn: DbConn) -> Api<AuthorData> {
    Ok(Json(Author::get(&*conn, id)?.to_data(&*conn)?))
}

#[get("/authors/user/<user_id>")]
pub fn get_by_user(user_id: i32, conn: DbConn) -> Api<AuthorData> {
    Ok(Json(Author::find_by_user(&*conn, user_id)?.to_data(&*conn)?))
}

#[patch("/authors/<id>", data = "<payload>")]
pub fn update(id: i32, payload: Json<AuthorUpdateData>, conn: DbConn) -> Api<AuthorData> {
    let payload = payload.into_inner();
    let author = Author::get(&*conn, id)?;
    let changes = AuthorChanges {
        pen_name: payload
            .pen_name
            .as_deref()
            .map(validation::pen_name)
            .transpose()?,
        bio: payload.bio,
    };
    Ok(Json(author.update(&*conn, changes)?.to_data(&*conn)?))
}

#[delete("/authors/<id>")]
pub fn delete(id: i32, conn: DbConn) -> Result<Status, ApiError> {
    Author::get(&*conn, id)?.delete(&*conn)?;
    Ok(Status::NoContent)
}

#[post("/authors/<id>/followers", data = "<payload>")]
pub fn follow(
    id: i32,
    payload: Json<FollowData>,
    conn: DbConn,
) -> Result<status::Created<Json<UserData>>, ApiError> {
    let author = Author::get(&*conn, id)?;
    let user = User::get(&*conn, payload.user_id)?;
    Follow::create(&*conn, user.id, author.id)?;
    Ok(status::Created(
        format!("/authors/{}/followers/{}", author.id, user.id),
        Some(Json(user.into())),
    ))
}

#[delete("/authors/<id>/followers/<user_id>")]
pub fn unfollow(id: i32, user_id: i32, conn: DbConn) -> Result<Status, ApiError> {
    Follow::find(&*conn, user_id, id)?.delete(&*conn)?;
    Ok(Status::NoContent)
}

// ranked below get_by_user, with which it shares the shape
#[get("/authors/<id>/followers", rank = 2)]
pub fn followers(id: i32, conn: DbConn) -> Api<Vec<UserData>> {
    let author = Author::get(&*conn, id)?;
    Ok(Json(
        author
            .followers(&*conn)?
            .into_iter()
            .map(UserData::from)
            .collect(),
    ))
}
