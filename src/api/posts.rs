use crate::api::{page_limits, Api, ApiError};
use folio_api::{
    comments::{CommentData, NewCommentData},
    posts::{NewPostData, PostData, PostUpdateData},
    reactions::{NewReactionData, ReactionData},
    reports::{NewReportData, ReportData},
};
use folio_models::{
    comments::{Comment, NewComment},
    db_conn::DbConn,
    post_reports::{NewPostReport, PostReport},
    posts::{post_status, NewPost, Post, PostChanges},
    reactions::{reaction_kind, Reaction},
    Error,
};
use rocket::{http::Status, response::status};
use rocket_contrib::json::Json;

fn check_status(value: &str) -> Result<(), ApiError> {
    if post_status::is_valid(value) {
        Ok(())
    } else {
        Err(Error::Validation {
            field: "status",
            message: format!("Unknown status {}", value),
        }
        .into())
    }
}

#[post("/posts", data = "<payload>")]
pub fn create(
    payload: Json<NewPostData>,
    conn: DbConn,
) -> Result<status::Created<Json<PostData>>, ApiError> {
    let payload = payload.into_inner();
    let post_status = match payload.status {
        Some(value) => {
            check_status(&value)?;
            value
        }
        None => post_status::PENDING.to_owned(),
    };
    let post = Post::insert(
        &*conn,
        NewPost {
            title: payload.title,
            content: payload.content,
            cover_url: payload.cover_url,
            credit: payload.credit,
            sale_url: payload.sale_url,
            status: post_status,
            author_id: Some(payload.author_id),
        },
    )?;
    Ok(status::Created(
        format!("/posts/{}", post.id),
        Some(Json(post.into())),
    ))
}

#[get("/posts?<skip>&<limit>")]
pub fn list(skip: Option<i32>, limit: Option<i32>, conn: DbConn) -> Api<Vec<PostData>> {
    let posts = Post::page(&*conn, page_limits(skip, limit))?;
    Ok(Json(posts.into_iter().map(PostData::from).collect()))
}

#[get("/posts/<id>")]
pub fn get(id: i32, conn: DbConn) -> Api<PostData> {
    Ok(Json(Post::get(&*conn, id)?.into()))
}

#[get("/posts/posts/<author_id>")]
pub fn list_by_author(author_id: i32, conn: DbConn) -> Api<Vec<PostData>> {
    let posts = Post::list_by_author(&*conn, author_id)?;
    Ok(Json(posts.into_iter().map(PostData::from).collect()))
}

#[patch("/posts/<id>", data = "<payload>")]
pub fn update(id: i32, payload: Json<PostUpdateData>, conn: DbConn) -> Api<PostData> {
    let payload = payload.into_inner();
    if let Some(value) = payload.status.as_deref() {
        check_status(value)?;
    }
    let post = Post::get(&*conn, id)?;
    let changes = PostChanges {
        title: payload.title,
        content: payload.content,
        cover_url: payload.cover_url,
        credit: payload.credit,
        sale_url: payload.sale_url,
        status: payload.status,
    };
    Ok(Json(post.update(&*conn, changes)?.into()))
}

#[delete("/posts/<id>")]
pub fn delete(id: i32, conn: DbConn) -> Result<Status, ApiError> {
    Post::get(&*conn, id)?.delete(&*conn)?;
    Ok(Status::NoContent)
}

#[post("/posts/<id>/comments", data = "<payload>")]
pub fn create_comment(
    id: i32,
    payload: Json<NewCommentData>,
    conn: DbConn,
) -> Result<status::Created<Json<CommentData>>, ApiError> {
    let payload = payload.into_inner();
    let post = Post::get(&*conn, id)?;
    let comment = Comment::insert(
        &*conn,
        NewComment {
            content: payload.content,
            user_id: payload.user_id,
            post_id: post.id,
        },
    )?;
    Ok(status::Created(
        format!("/comments/{}", comment.id),
        Some(Json(comment.into())),
    ))
}

// ranked below list_by_author, with which it shares the shape
#[get("/posts/<id>/comments", rank = 2)]
pub fn comments(id: i32, conn: DbConn) -> Api<Vec<CommentData>> {
    let post = Post::get(&*conn, id)?;
    Ok(Json(
        Comment::list_by_post(&*conn, post.id)?
            .into_iter()
            .map(CommentData::from)
            .collect(),
    ))
}

#[put("/posts/<id>/reactions", data = "<payload>")]
pub fn react(id: i32, payload: Json<NewReactionData>, conn: DbConn) -> Api<ReactionData> {
    let payload = payload.into_inner();
    if !reaction_kind::is_valid(&payload.kind) {
        return Err(Error::Validation {
            field: "kind",
            message: format!("Unknown reaction kind {}", payload.kind),
        }
        .into());
    }
    let post = Post::get(&*conn, id)?;
    let reaction = Reaction::react(&*conn, payload.user_id, post.id, &payload.kind)?;
    Ok(Json(reaction.into()))
}

#[delete("/posts/<id>/reactions/<user_id>")]
pub fn unreact(id: i32, user_id: i32, conn: DbConn) -> Result<Status, ApiError> {
    Reaction::find_by_user_on_post(&*conn, user_id, id)?.delete(&*conn)?;
    Ok(Status::NoContent)
}

#[get("/posts/<id>/reactions", rank = 2)]
pub fn reactions(id: i32, conn: DbConn) -> Api<Vec<ReactionData>> {
    let post = Post::get(&*conn, id)?;
    Ok(Json(
        Reaction::list_by_post(&*conn, post.id)?
            .into_iter()
            .map(ReactionData::from)
            .collect(),
    ))
}

#[post("/posts/<id>/reports", data = "<payload>")]
pub fn create_report(
    id: i32,
    payload: Json<NewReportData>,
    conn: DbConn,
) -> Result<status::Created<Json<ReportData>>, ApiError> {
    let payload = payload.into_inner();
    let post = Post::get(&*conn, id)?;
    let report = PostReport::insert(
        &*conn,
        NewPostReport {
            user_id: payload.user_id,
            post_id: post.id,
            reason: payload.reason,
        },
    )?;
    Ok(status::Created(
        format!("/reports/{}", report.id),
        Some(Json(report.into())),
    ))
}
