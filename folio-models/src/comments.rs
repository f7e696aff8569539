use crate::{
    authors::Author,
    notifications::{notification_kind, Notification},
    posts::Post,
    schema::comments,
    users::User,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use folio_api::comments::CommentData;

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct Comment {
    pub id: i32,
    pub content: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comments"]
pub struct NewComment {
    pub content: String,
    pub user_id: i32,
    pub post_id: i32,
}

impl Comment {
    insert!(comments, NewComment, |inserted, conn| {
        inserted.notify(conn)?;
        Ok(inserted)
    });
    get!(comments);
    list_by!(comments, list_by_post, post_id as i32);
    list_by!(comments, list_by_user, user_id as i32);

    pub fn get_author(&self, conn: &Connection) -> Result<User> {
        User::get(conn, self.user_id)
    }

    pub fn get_post(&self, conn: &Connection) -> Result<Post> {
        Post::get(conn, self.post_id)
    }

    /// Tells the post's author, unless they are commenting on their own
    /// post.
    pub fn notify(&self, conn: &Connection) -> Result<()> {
        let post = self.get_post(conn)?;
        if let Some(author_id) = post.author_id {
            let author = Author::get(conn, author_id)?;
            if author.user_id != self.user_id {
                Notification::notify(
                    conn,
                    notification_kind::COMMENT,
                    self.id,
                    author.user_id,
                    &[],
                )?;
            }
        }
        Ok(())
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self).execute(conn)?;
        Notification::delete_for_object(conn, notification_kind::COMMENT, self.id)
    }
}

impl From<Comment> for CommentData {
    fn from(comment: Comment) -> CommentData {
        CommentData {
            id: comment.id,
            content: comment.content,
            user_id: comment.user_id,
            post_id: comment.post_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        authors::tests::simple_author,
        posts::{post_status, tests::simple_post},
        tests::db,
        users::tests::fill_database,
    };
    use diesel::Connection;

    #[test]
    fn commenting_notifies_the_author() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::APPROVED);

            let comment = Comment::insert(
                &conn,
                NewComment {
                    content: "Loved it".to_owned(),
                    user_id: users[0].id,
                    post_id: post.id,
                },
            )?;
            assert_eq!(comment.get_post(&conn)?.id, post.id);
            assert_eq!(comment.get_author(&conn)?.id, users[0].id);

            let author_user = User::get(&conn, author.user_id)?;
            let feed = Notification::page_for_user(&conn, &author_user, (0, 10))?;
            assert_eq!(feed.len(), 1);
            assert_eq!(feed[0].0.kind, notification_kind::COMMENT);
            assert_eq!(feed[0].0.object_id, comment.id);
            Ok(())
        });
    }

    #[test]
    fn own_comments_stay_quiet() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::APPROVED);
            Comment::insert(
                &conn,
                NewComment {
                    content: "Author's note".to_owned(),
                    user_id: author.user_id,
                    post_id: post.id,
                },
            )?;

            let author_user = User::get(&conn, author.user_id)?;
            assert!(Notification::page_for_user(&conn, &author_user, (0, 10))?.is_empty());
            Ok(())
        });
    }

    #[test]
    fn delete_cleans_up_the_notification() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::APPROVED);
            let comment = Comment::insert(
                &conn,
                NewComment {
                    content: "Loved it".to_owned(),
                    user_id: users[0].id,
                    post_id: post.id,
                },
            )?;

            assert!(Notification::find(&conn, notification_kind::COMMENT, comment.id).is_ok());
            comment.delete(&conn)?;
            assert!(matches!(
                Notification::find(&conn, notification_kind::COMMENT, comment.id),
                Err(Error::NotFound)
            ));
            assert!(Comment::list_by_post(&conn, post.id)?.is_empty());
            Ok(())
        });
    }
}
