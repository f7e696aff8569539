use crate::{
    authors::Author,
    comments::Comment,
    notifications::{notification_kind, Notification},
    post_reports::PostReport,
    reactions::Reaction,
    schema::posts,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, Connection as _, ExpressionMethods, QueryDsl, RunQueryDsl};
use folio_api::posts::PostData;

pub mod post_status {
    pub const PENDING: &str = "PENDING";
    pub const APPROVED: &str = "APPROVED";
    pub const REJECTED: &str = "REJECTED";

    pub fn is_valid(status: &str) -> bool {
        matches!(status, PENDING | APPROVED | REJECTED)
    }
}

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub cover_url: Option<String>,
    pub credit: Option<String>,
    pub sale_url: Option<String>,
    pub status: String,
    pub author_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "posts"]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub cover_url: Option<String>,
    pub credit: Option<String>,
    pub sale_url: Option<String>,
    pub status: String,
    pub author_id: Option<i32>,
}

/// Partial update; author_id deliberately has no field here, a post
/// cannot move to another author.
#[derive(AsChangeset, Default)]
#[table_name = "posts"]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_url: Option<String>,
    pub credit: Option<String>,
    pub sale_url: Option<String>,
    pub status: Option<String>,
}

impl Post {
    get!(posts);
    last!(posts);

    pub fn insert(conn: &Connection, new: NewPost) -> Result<Self> {
        conn.transaction(|| {
            diesel::insert_into(posts::table).values(new).execute(conn)?;
            let post = Self::last(conn)?;
            post.notify_followers(conn)?;
            Ok(post)
        })
    }

    pub fn list_by_author(conn: &Connection, author_id: i32) -> Result<Vec<Post>> {
        posts::table
            .filter(posts::author_id.eq(author_id))
            .order(posts::created_at.desc())
            .load(conn)
            .map_err(Error::from)
    }

    pub fn page(conn: &Connection, (min, max): (i32, i32)) -> Result<Vec<Post>> {
        posts::table
            .order(posts::created_at.desc())
            .offset(min.into())
            .limit((max - min).into())
            .load(conn)
            .map_err(Error::from)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        posts::table.count().get_result(conn).map_err(Error::from)
    }

    pub fn update(&self, conn: &Connection, changes: PostChanges) -> Result<Post> {
        diesel::update(self)
            .set((changes, posts::updated_at.eq(diesel::dsl::now)))
            .execute(conn)?;
        Post::get(conn, self.id)
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        conn.transaction(|| {
            for comment in Comment::list_by_post(conn, self.id)? {
                comment.delete(conn)?;
            }
            for reaction in Reaction::list_by_post(conn, self.id)? {
                reaction.delete(conn)?;
            }
            for report in PostReport::list_by_post(conn, self.id)? {
                report.delete(conn)?;
            }
            Notification::delete_for_object(conn, notification_kind::POST, self.id)?;
            diesel::delete(self)
                .execute(conn)
                .map(|_| ())
                .map_err(Error::from)
        })
    }

    /// A freshly approved post shows up in the feed of everyone following
    /// its author.
    fn notify_followers(&self, conn: &Connection) -> Result<()> {
        if self.status != post_status::APPROVED {
            return Ok(());
        }
        let author = match self.author_id {
            Some(author_id) => Author::get(conn, author_id)?,
            None => return Ok(()),
        };
        let followers = author.followers(conn)?;
        if let Some((first, rest)) = followers.split_first() {
            let rest = rest.iter().map(|user| user.id).collect::<Vec<_>>();
            Notification::notify(
                conn,
                notification_kind::POST,
                self.id,
                first.id,
                &rest,
            )?;
        }
        Ok(())
    }
}

impl From<Post> for PostData {
    fn from(post: Post) -> PostData {
        PostData {
            id: post.id,
            title: post.title,
            content: post.content,
            cover_url: post.cover_url,
            credit: post.credit,
            sale_url: post.sale_url,
            status: post.status,
            author_id: post.author_id,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        authors::tests::simple_author, follows::Follow, tests::db,
        users::tests::fill_database, Connection as Conn,
    };
    use diesel::Connection;

    pub(crate) fn simple_post(conn: &Conn, author: &Author, status: &str) -> Post {
        Post::insert(
            conn,
            NewPost {
                title: "Indiana".to_owned(),
                content: "A novel".to_owned(),
                cover_url: None,
                credit: None,
                sale_url: None,
                status: status.to_owned(),
                author_id: Some(author.id),
            },
        )
        .unwrap()
    }

    #[test]
    fn insert_and_list() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::PENDING);
            assert_eq!(post.status, post_status::PENDING);

            let by_author = Post::list_by_author(&conn, author.id)?;
            assert_eq!(by_author.len(), 1);
            assert_eq!(by_author[0].id, post.id);
            Ok(())
        });
    }

    #[test]
    fn unknown_author_is_rejected_and_nothing_is_persisted() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let res = Post::insert(
                &conn,
                NewPost {
                    title: "Orphan".to_owned(),
                    content: "No author".to_owned(),
                    cover_url: None,
                    credit: None,
                    sale_url: None,
                    status: post_status::PENDING.to_owned(),
                    author_id: Some(4242),
                },
            );
            assert!(matches!(res, Err(Error::InvalidReference(_))));
            assert_eq!(Post::count(&conn)?, 0);
            Ok(())
        });
    }

    #[test]
    fn update_touches_only_the_given_fields() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::PENDING);
            let updated = post.update(
                &conn,
                PostChanges {
                    status: Some(post_status::APPROVED.to_owned()),
                    ..PostChanges::default()
                },
            )?;
            assert_eq!(updated.status, post_status::APPROVED);
            assert_eq!(updated.title, post.title);
            assert_eq!(updated.author_id, post.author_id);
            Ok(())
        });
    }

    #[test]
    fn approved_posts_notify_the_followers() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            Follow::create(&conn, users[0].id, author.id)?;
            Follow::create(&conn, users[1].id, author.id)?;

            let post = simple_post(&conn, &author, post_status::APPROVED);
            for user in &users[..2] {
                let feed = Notification::page_for_user(&conn, user, (0, 10))?;
                assert_eq!(feed.len(), 1, "missing feed entry for {}", user.email);
                assert_eq!(feed[0].0.kind, notification_kind::POST);
                assert_eq!(feed[0].0.object_id, post.id);
                assert!(!feed[0].1.is_read);
            }

            // pending drafts stay quiet
            simple_post(&conn, &author, post_status::PENDING);
            let feed = Notification::page_for_user(&conn, &users[0], (0, 10))?;
            assert_eq!(feed.len(), 1);
            Ok(())
        });
    }

    #[test]
    fn delete_removes_dependent_rows() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::PENDING);
            let comment = Comment::insert(
                &conn,
                crate::comments::NewComment {
                    content: "First".to_owned(),
                    user_id: users[0].id,
                    post_id: post.id,
                },
            )?;
            Reaction::react(&conn, users[0].id, post.id, crate::reactions::reaction_kind::LIKE)?;

            post.delete(&conn)?;
            assert!(matches!(Post::get(&conn, post.id), Err(Error::NotFound)));
            assert!(matches!(Comment::get(&conn, comment.id), Err(Error::NotFound)));
            assert!(Reaction::list_by_post(&conn, post.id)?.is_empty());
            Ok(())
        });
    }
}
