use crate::{
    authors::Author,
    notifications::{notification_kind, Notification},
    posts::Post,
    schema::reactions,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, Connection as _, ExpressionMethods, QueryDsl, RunQueryDsl};
use folio_api::reactions::ReactionData;

pub mod reaction_kind {
    pub const LIKE: &str = "LIKE";
    pub const DISLIKE: &str = "DISLIKE";

    pub fn is_valid(kind: &str) -> bool {
        matches!(kind, LIKE | DISLIKE)
    }
}

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct Reaction {
    pub id: i32,
    pub kind: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "reactions"]
pub struct NewReaction {
    pub kind: String,
    pub user_id: i32,
    pub post_id: i32,
}

impl Reaction {
    insert!(reactions, NewReaction);
    get!(reactions);
    find_by!(reactions, find_by_user_on_post, user_id as i32, post_id as i32);
    list_by!(reactions, list_by_post, post_id as i32);
    list_by!(reactions, list_by_user, user_id as i32);

    /// One reaction per user and post: reacting again with another kind
    /// replaces the old one instead of stacking up.
    pub fn react(conn: &Connection, user_id: i32, post_id: i32, kind: &str) -> Result<Reaction> {
        match Reaction::find_by_user_on_post(conn, user_id, post_id) {
            Ok(existing) => {
                if existing.kind == kind {
                    return Ok(existing);
                }
                diesel::update(&existing)
                    .set((
                        reactions::kind.eq(kind),
                        reactions::updated_at.eq(diesel::dsl::now),
                    ))
                    .execute(conn)?;
                Reaction::get(conn, existing.id)
            }
            Err(Error::NotFound) => conn.transaction(|| {
                let reaction = Reaction::insert(
                    conn,
                    NewReaction {
                        kind: kind.to_owned(),
                        user_id,
                        post_id,
                    },
                )?;
                reaction.notify(conn)?;
                Ok(reaction)
            }),
            Err(other) => Err(other),
        }
    }

    pub fn notify(&self, conn: &Connection) -> Result<()> {
        let post = Post::get(conn, self.post_id)?;
        if let Some(author_id) = post.author_id {
            let author = Author::get(conn, author_id)?;
            if author.user_id != self.user_id {
                Notification::notify(
                    conn,
                    notification_kind::REACTION,
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
        Notification::delete_for_object(conn, notification_kind::REACTION, self.id)
    }
}

impl From<Reaction> for ReactionData {
    fn from(reaction: Reaction) -> ReactionData {
        ReactionData {
            id: reaction.id,
            kind: reaction.kind,
            user_id: reaction.user_id,
            post_id: reaction.post_id,
            created_at: reaction.created_at,
            updated_at: reaction.updated_at,
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
    fn react_then_change_your_mind() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::APPROVED);

            let like = Reaction::react(&conn, users[0].id, post.id, reaction_kind::LIKE)?;
            assert_eq!(like.kind, reaction_kind::LIKE);

            let dislike = Reaction::react(&conn, users[0].id, post.id, reaction_kind::DISLIKE)?;
            assert_eq!(dislike.id, like.id);
            assert_eq!(dislike.kind, reaction_kind::DISLIKE);
            assert_eq!(Reaction::list_by_post(&conn, post.id)?.len(), 1);
            Ok(())
        });
    }

    #[test]
    fn only_the_first_reaction_notifies() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::APPROVED);
            let author_user = crate::users::User::get(&conn, author.user_id)?;

            Reaction::react(&conn, users[0].id, post.id, reaction_kind::LIKE)?;
            Reaction::react(&conn, users[0].id, post.id, reaction_kind::DISLIKE)?;
            let feed = Notification::page_for_user(&conn, &author_user, (0, 10))?;
            assert_eq!(feed.len(), 1);
            assert_eq!(feed[0].0.kind, notification_kind::REACTION);
            Ok(())
        });
    }
}
