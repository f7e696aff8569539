#[macro_use]
extern crate diesel;
#[macro_use]
extern crate lazy_static;
#[cfg(test)]
#[macro_use]
extern crate diesel_migrations;

#[cfg(all(feature = "postgres", not(feature = "sqlite")))]
pub type Connection = diesel::PgConnection;

#[cfg(all(feature = "sqlite", not(feature = "postgres")))]
pub type Connection = diesel::SqliteConnection;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Conflict(String),
    Db(diesel::result::Error),
    DbPool(diesel::r2d2::PoolError),
    Hash(bcrypt::BcryptError),
    InvalidReference(String),
    NotFound,
    Validation {
        field: &'static str,
        message: String,
    },
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DbError};

        match err {
            DbError::NotFound => Error::NotFound,
            DbError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let constraint = info
                    .constraint_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| info.message().to_owned());
                Error::Conflict(conflict_reason(&constraint))
            }
            DbError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                let constraint = info
                    .constraint_name()
                    .map(str::to_owned)
                    .unwrap_or_else(|| info.message().to_owned());
                Error::InvalidReference(reference_reason(&constraint))
            }
            other => Error::Db(other),
        }
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Error::DbPool(err)
    }
}

impl From<bcrypt::BcryptError> for Error {
    fn from(err: bcrypt::BcryptError) -> Self {
        Error::Hash(err)
    }
}

/// Maps the name of a violated unique constraint to something a client
/// can act on. Postgres reports the constraint name, SQLite only the
/// message, so both are matched on substrings.
fn conflict_reason(constraint: &str) -> String {
    if constraint.contains("email") {
        "Email already exists".to_owned()
    } else if constraint.contains("pen_name") {
        "Pen name already exists".to_owned()
    } else if constraint.contains("users_follow_authors") {
        "Already following this author".to_owned()
    } else if constraint.contains("reactions") {
        "User already reacted to this post".to_owned()
    } else if constraint.contains("notification_recipients") {
        "Duplicate or invalid data".to_owned()
    } else if constraint.contains("user_id") {
        "Author for this user already exists".to_owned()
    } else {
        "Duplicate or invalid data".to_owned()
    }
}

fn reference_reason(constraint: &str) -> String {
    if constraint.contains("author_id") {
        "Author does not exist".to_owned()
    } else if constraint.contains("post_id") {
        "Post does not exist".to_owned()
    } else if constraint.contains("user_id") || constraint.contains("recipient_id") {
        "User does not exist".to_owned()
    } else {
        "Invalid reference".to_owned()
    }
}

macro_rules! find_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        /// Try to find a $table with a given $col
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Self> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .first(conn)
                .map_err(Error::from)
        }
    };
}

macro_rules! list_by {
    ($table:ident, $fn:ident, $($col:ident as $type:ty),+) => {
        /// Try to find all $table with a given $col
        pub fn $fn(conn: &crate::Connection, $($col: $type),+) -> Result<Vec<Self>> {
            $table::table
                $(.filter($table::$col.eq($col)))+
                .load::<Self>(conn)
                .map_err(Error::from)
        }
    };
}

macro_rules! get {
    ($table:ident) => {
        pub fn get(conn: &crate::Connection, id: i32) -> Result<Self> {
            $table::table
                .filter($table::id.eq(id))
                .first(conn)
                .map_err(Error::from)
        }
    };
}

macro_rules! last {
    ($table:ident) => {
        pub fn last(conn: &crate::Connection) -> Result<Self> {
            $table::table
                .order_by($table::id.desc())
                .first(conn)
                .map_err(Error::from)
        }
    };
}

macro_rules! insert {
    ($table:ident, $from:ty) => {
        insert!($table, $from, |x, _conn| Ok(x));
    };
    ($table:ident, $from:ty, |$val:ident, $conn:ident| $( $after:tt )+) => {
        last!($table);

        pub fn insert(conn: &crate::Connection, new: $from) -> Result<Self> {
            diesel::insert_into($table::table)
                .values(new)
                .execute(conn)?;
            #[allow(unused_mut)]
            let mut $val = Self::last(conn)?;
            let $conn = conn;
            $( $after )+
        }
    };
}

pub const ITEMS_PER_PAGE: i32 = 10;

pub mod authors;
pub mod comments;
pub mod config;
pub mod db_conn;
pub mod follows;
pub mod notifications;
pub mod post_reports;
pub mod posts;
pub mod reactions;
pub mod schema;
pub mod users;
pub mod validation;

pub use config::CONFIG;
