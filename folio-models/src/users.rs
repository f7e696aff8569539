use crate::{
    authors::{Author, NewAuthor},
    comments::Comment,
    follows::Follow,
    notifications::{Notification, NotificationRecipient},
    post_reports::PostReport,
    reactions::Reaction,
    schema::users,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, Connection as _, ExpressionMethods, QueryDsl, RunQueryDsl};
use folio_api::users::UserData;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Reader = 0,
    Author = 1,
    Admin = 2,
}

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub hashed_password: String,
    pub phone: Option<String>,
    pub role: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "users"]
pub struct NewUser {
    pub email: String,
    pub hashed_password: String,
    pub phone: Option<String>,
    pub role: i32,
}

/// Partial update; `None` fields are left as they are. id and the
/// timestamps are not represented here and therefore immutable.
#[derive(AsChangeset, Default)]
#[table_name = "users"]
pub struct UserChanges {
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub phone: Option<String>,
}

impl User {
    insert!(users, NewUser);
    get!(users);
    find_by!(users, find_by_email, email as &str);

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin as i32
    }

    pub fn is_author(&self) -> bool {
        self.role == Role::Author as i32
    }

    pub fn hash_pass(pass: &str) -> Result<String> {
        bcrypt::hash(pass, 10).map_err(Error::from)
    }

    /// Newest accounts first.
    pub fn page(conn: &Connection, (min, max): (i32, i32)) -> Result<Vec<User>> {
        users::table
            .order(users::created_at.desc())
            .offset(min.into())
            .limit((max - min).into())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn count(conn: &Connection) -> Result<i64> {
        users::table.count().get_result(conn).map_err(Error::from)
    }

    pub fn list_admins(conn: &Connection) -> Result<Vec<User>> {
        users::table
            .filter(users::role.eq(Role::Admin as i32))
            .order(users::id.asc())
            .load::<User>(conn)
            .map_err(Error::from)
    }

    pub fn update(&self, conn: &Connection, changes: UserChanges) -> Result<User> {
        diesel::update(self)
            .set((changes, users::updated_at.eq(diesel::dsl::now)))
            .execute(conn)?;
        User::get(conn, self.id)
    }

    pub fn set_role(&self, conn: &Connection, new_role: Role) -> Result<()> {
        diesel::update(self)
            .set((
                users::role.eq(new_role as i32),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }

    /// Changes the role, creating the Author row when the user becomes an
    /// author. Both changes happen in one transaction: a user that already
    /// has an Author row keeps their old role on Conflict.
    pub fn update_role(&self, conn: &Connection, new_role: Role) -> Result<()> {
        conn.transaction(|| {
            self.set_role(conn, new_role)?;
            if new_role == Role::Author {
                match Author::find_by_user(conn, self.id) {
                    Ok(_) => {
                        return Err(Error::Conflict("User is already an author".to_owned()))
                    }
                    Err(Error::NotFound) => {
                        Author::insert(
                            conn,
                            NewAuthor {
                                pen_name: Author::default_pen_name(self.id),
                                bio: None,
                                user_id: self.id,
                            },
                        )?;
                    }
                    Err(other) => return Err(other),
                }
            }
            Ok(())
        })
    }

    /// Removes the user and everything they own, children first so the
    /// whole graph goes in one transaction.
    pub fn delete(&self, conn: &Connection) -> Result<()> {
        conn.transaction(|| {
            match Author::find_by_user(conn, self.id) {
                Ok(author) => author.delete(conn)?,
                Err(Error::NotFound) => {}
                Err(other) => return Err(other),
            }
            for comment in Comment::list_by_user(conn, self.id)? {
                comment.delete(conn)?;
            }
            for reaction in Reaction::list_by_user(conn, self.id)? {
                reaction.delete(conn)?;
            }
            for report in PostReport::list_by_user(conn, self.id)? {
                report.delete(conn)?;
            }
            Follow::delete_all_for_user(conn, self.id)?;
            for notification in Notification::list_for_recipient(conn, self.id)? {
                notification.delete(conn)?;
            }
            NotificationRecipient::delete_all_for_user(conn, self.id)?;
            diesel::delete(self)
                .execute(conn)
                .map(|_| ())
                .map_err(Error::from)
        })
    }
}

impl From<User> for UserData {
    fn from(user: User) -> UserData {
        UserData {
            id: user.id,
            email: user.email,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl NewUser {
    /// Creates an account with a freshly hashed password.
    pub fn create(
        conn: &Connection,
        email: String,
        password: &str,
        phone: Option<String>,
        role: Role,
    ) -> Result<User> {
        User::insert(
            conn,
            NewUser {
                email,
                hashed_password: User::hash_pass(password)?,
                phone,
                role: role as i32,
            },
        )
    }
}
