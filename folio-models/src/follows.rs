use crate::{
    authors::Author,
    notifications::{notification_kind, Notification},
    schema::users_follow_authors,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, Connection as _, ExpressionMethods, QueryDsl, RunQueryDsl};

#[derive(Queryable, Identifiable, Clone, Debug)]
#[table_name = "users_follow_authors"]
pub struct Follow {
    pub id: i32,
    pub user_id: i32,
    pub author_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users_follow_authors"]
pub struct NewFollow {
    pub user_id: i32,
    pub author_id: i32,
}

impl Follow {
    insert!(users_follow_authors, NewFollow);
    list_by!(users_follow_authors, list_by_user, user_id as i32);
    list_by!(users_follow_authors, list_by_author, author_id as i32);

    pub fn find(conn: &Connection, user_id: i32, author_id: i32) -> Result<Follow> {
        users_follow_authors::table
            .filter(users_follow_authors::user_id.eq(user_id))
            .filter(users_follow_authors::author_id.eq(author_id))
            .get_result(conn)
            .map_err(Error::from)
    }

    /// Links the user to the author and tells the author about it.
    /// Following twice conflicts on the (user, author) pair.
    pub fn create(conn: &Connection, user_id: i32, author_id: i32) -> Result<Follow> {
        conn.transaction(|| {
            let follow = Follow::insert(conn, NewFollow { user_id, author_id })?;
            follow.notify(conn)?;
            Ok(follow)
        })
    }

    pub fn notify(&self, conn: &Connection) -> Result<()> {
        let author = Author::get(conn, self.author_id)?;
        if author.user_id != self.user_id {
            Notification::notify(
                conn,
                notification_kind::FOLLOW,
                self.id,
                author.user_id,
                &[],
            )?;
        }
        Ok(())
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self).execute(conn)?;
        Notification::delete_for_object(conn, notification_kind::FOLLOW, self.id)
    }

    pub fn delete_all_for_user(conn: &Connection, user_id: i32) -> Result<()> {
        for follow in Follow::list_by_user(conn, user_id)? {
            follow.delete(conn)?;
        }
        Ok(())
    }

    pub fn delete_all_for_author(conn: &Connection, author_id: i32) -> Result<()> {
        for follow in Follow::list_by_author(conn, author_id)? {
            follow.delete(conn)?;
        }
        Ok(())
    }
}
