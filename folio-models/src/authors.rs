use crate::{
    follows::Follow,
    posts::Post,
    schema::{authors, users, users_follow_authors},
    users::{NewUser, Role, User},
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, Connection as _, ExpressionMethods, QueryDsl, RunQueryDsl};
use folio_api::authors::AuthorData;

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct Author {
    pub id: i32,
    pub pen_name: String,
    pub bio: Option<String>,
    pub user_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "authors"]
pub struct NewAuthor {
    pub pen_name: String,
    pub bio: Option<String>,
    pub user_id: i32,
}

#[derive(AsChangeset, Default)]
#[table_name = "authors"]
pub struct AuthorChanges {
    pub pen_name: Option<String>,
    pub bio: Option<String>,
}

impl Author {
    insert!(authors, NewAuthor);
    get!(authors);
    find_by!(authors, find_by_pen_name, pen_name as &str);
    find_by!(authors, find_by_user, user_id as i32);

    pub fn default_pen_name(user_id: i32) -> String {
        format!("Author_{}", user_id)
    }

    pub fn list(conn: &Connection) -> Result<Vec<Author>> {
        authors::table
            .order(authors::pen_name.asc())
            .load(conn)
            .map_err(Error::from)
    }

    /// Registers the user profile and the author in one transaction. The
    /// user is inserted first, so on a double conflict the email is the
    /// one that gets reported.
    pub fn create_with_user(
        conn: &Connection,
        pen_name: String,
        bio: Option<String>,
        email: String,
        password: &str,
        phone: Option<String>,
    ) -> Result<Author> {
        conn.transaction(|| {
            let user = NewUser::create(conn, email, password, phone, Role::Author)?;
            Author::insert(
                conn,
                NewAuthor {
                    pen_name,
                    bio,
                    user_id: user.id,
                },
            )
        })
    }

    /// Promotes an existing user to author.
    pub fn create_for_user(
        conn: &Connection,
        user_id: i32,
        pen_name: String,
        bio: Option<String>,
    ) -> Result<Author> {
        conn.transaction(|| {
            let user = User::get(conn, user_id)?;
            user.set_role(conn, Role::Author)?;
            Author::insert(
                conn,
                NewAuthor {
                    pen_name,
                    bio,
                    user_id,
                },
            )
        })
    }

    pub fn update(&self, conn: &Connection, changes: AuthorChanges) -> Result<Author> {
        diesel::update(self)
            .set((changes, authors::updated_at.eq(diesel::dsl::now)))
            .execute(conn)?;
        Author::get(conn, self.id)
    }

    pub fn followers(&self, conn: &Connection) -> Result<Vec<User>> {
        let ids = users_follow_authors::table
            .filter(users_follow_authors::author_id.eq(self.id))
            .select(users_follow_authors::user_id);
        users::table
            .filter(users::id.eq_any(ids))
            .order(users::id.asc())
            .load(conn)
            .map_err(Error::from)
    }

    pub fn count_followers(&self, conn: &Connection) -> Result<i64> {
        users_follow_authors::table
            .filter(users_follow_authors::author_id.eq(self.id))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    /// Removes the author, their posts (with comments, reactions and
    /// reports) and the follower links. The user account stays around as
    /// a plain reader.
    pub fn delete(&self, conn: &Connection) -> Result<()> {
        conn.transaction(|| {
            for post in Post::list_by_author(conn, self.id)? {
                post.delete(conn)?;
            }
            Follow::delete_all_for_author(conn, self.id)?;
            match User::get(conn, self.user_id) {
                Ok(user) => user.set_role(conn, Role::Reader)?,
                Err(Error::NotFound) => {}
                Err(other) => return Err(other),
            }
            diesel::delete(self)
                .execute(conn)
                .map(|_| ())
                .map_err(Error::from)
        })
    }

    pub fn to_data(&self, conn: &Connection) -> Result<AuthorData> {
        Ok(AuthorData {
            id: self.id,
            pen_name: self.pen_name.clone(),
            bio: self.bio.clone(),
            user_id: self.user_id,
            profile: User::get(conn, self.user_id)?.into(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{tests::db, users::tests::fill_database, Connection as Conn};
    use diesel::Connection;

    pub(crate) fn simple_author(conn: &Conn) -> Author {
        Author::create_with_user(
            conn,
            "George Sand".to_owned(),
            Some("Writes under a pen name".to_owned()),
            "aurore@example.com".to_owned(),
            "invalid_aurore_password",
            None,
        )
        .unwrap()
    }

    #[test]
    fn create_with_user() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let author = simple_author(&conn);
            let user = User::get(&conn, author.user_id)?;
            assert_eq!(user.email, "aurore@example.com");
            assert_eq!(user.role, Role::Author as i32);

            let data = author.to_data(&conn)?;
            assert_eq!(data.pen_name, "George Sand");
            assert_eq!(data.profile.id, user.id);
            Ok(())
        });
    }

    #[test]
    fn conflicting_email_wins_over_conflicting_pen_name() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            simple_author(&conn);
            let res = Author::create_with_user(
                &conn,
                "George Sand".to_owned(),
                None,
                "aurore@example.com".to_owned(),
                "invalid_password",
                None,
            );
            match res {
                Err(Error::Conflict(reason)) => assert_eq!(reason, "Email already exists"),
                other => panic!("expected a conflict, got {:?}", other),
            }
            Ok(())
        });
    }

    #[test]
    fn conflicting_pen_name_rolls_back_the_user() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let first = simple_author(&conn);
            let res = Author::create_with_user(
                &conn,
                "George Sand".to_owned(),
                None,
                "fresh@example.com".to_owned(),
                "invalid_password",
                None,
            );
            match res {
                Err(Error::Conflict(reason)) => assert_eq!(reason, "Pen name already exists"),
                other => panic!("expected a conflict, got {:?}", other),
            }
            // the user insert was rolled back with the author, and the pen
            // name still belongs to its first owner
            assert!(matches!(
                User::find_by_email(&conn, "fresh@example.com"),
                Err(Error::NotFound)
            ));
            assert_eq!(Author::find_by_pen_name(&conn, "George Sand")?.id, first.id);
            Ok(())
        });
    }

    #[test]
    fn promote_existing_user() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author =
                Author::create_for_user(&conn, users[0].id, "Currer Bell".to_owned(), None)?;
            assert_eq!(author.user_id, users[0].id);
            assert_eq!(User::get(&conn, users[0].id)?.role, Role::Author as i32);

            // promoting twice conflicts on the author's user_id
            let res = Author::create_for_user(&conn, users[0].id, "Acton Bell".to_owned(), None);
            match res {
                Err(Error::Conflict(reason)) => {
                    assert_eq!(reason, "Author for this user already exists")
                }
                other => panic!("expected a conflict, got {:?}", other),
            }

            assert!(matches!(
                Author::create_for_user(&conn, 0, "Ellis Bell".to_owned(), None),
                Err(Error::NotFound)
            ));
            Ok(())
        });
    }

    #[test]
    fn update_pen_name_conflicts_with_existing_one() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let first = simple_author(&conn);
            let second =
                Author::create_for_user(&conn, users[0].id, "Currer Bell".to_owned(), None)?;

            let updated = second.update(
                &conn,
                AuthorChanges {
                    bio: Some("Yorkshire".to_owned()),
                    ..AuthorChanges::default()
                },
            )?;
            assert_eq!(updated.pen_name, "Currer Bell");
            assert_eq!(updated.bio.as_deref(), Some("Yorkshire"));

            let res = second.update(
                &conn,
                AuthorChanges {
                    pen_name: Some(first.pen_name.clone()),
                    ..AuthorChanges::default()
                },
            );
            match res {
                Err(Error::Conflict(reason)) => assert_eq!(reason, "Pen name already exists"),
                other => panic!("expected a conflict, got {:?}", other),
            }
            Ok(())
        });
    }

    #[test]
    fn delete_demotes_the_user() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let author = simple_author(&conn);
            let user_id = author.user_id;
            author.delete(&conn)?;
            assert!(matches!(Author::get(&conn, author.id), Err(Error::NotFound)));
            assert_eq!(User::get(&conn, user_id)?.role, Role::Reader as i32);
            Ok(())
        });
    }
}
