use crate::{
    notifications::{notification_kind, Notification},
    schema::post_reports,
    users::User,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use folio_api::reports::ReportData;
use tracing::warn;

pub mod report_status {
    pub const PENDING: &str = "PENDING";
    pub const RESOLVED: &str = "RESOLVED";
    pub const DISMISSED: &str = "DISMISSED";

    pub fn is_valid(status: &str) -> bool {
        matches!(status, PENDING | RESOLVED | DISMISSED)
    }
}

#[derive(Queryable, Identifiable, Clone, Debug)]
pub struct PostReport {
    pub id: i32,
    pub user_id: i32,
    pub post_id: i32,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "post_reports"]
pub struct NewPostReport {
    pub user_id: i32,
    pub post_id: i32,
    pub reason: Option<String>,
}

impl PostReport {
    insert!(post_reports, NewPostReport, |inserted, conn| {
        inserted.notify(conn)?;
        Ok(inserted)
    });
    get!(post_reports);
    list_by!(post_reports, list_by_post, post_id as i32);
    list_by!(post_reports, list_by_user, user_id as i32);

    /// Newest first.
    pub fn list(conn: &Connection) -> Result<Vec<PostReport>> {
        post_reports::table
            .order(post_reports::created_at.desc())
            .load(conn)
            .map_err(Error::from)
    }

    pub fn set_status(&self, conn: &Connection, status: &str) -> Result<PostReport> {
        diesel::update(self)
            .set((
                post_reports::status.eq(status),
                post_reports::updated_at.eq(diesel::dsl::now),
            ))
            .execute(conn)?;
        PostReport::get(conn, self.id)
    }

    /// Fans the report out to every admin. A deployment without admins
    /// simply gets no notification.
    pub fn notify(&self, conn: &Connection) -> Result<()> {
        let admins = User::list_admins(conn)?;
        if let Some((first, rest)) = admins.split_first() {
            let rest = rest.iter().map(|user| user.id).collect::<Vec<_>>();
            Notification::notify(
                conn,
                notification_kind::REPORT,
                self.id,
                first.id,
                &rest,
            )?;
        } else {
            warn!("report {}: no admin to notify", self.id);
        }
        Ok(())
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(self).execute(conn)?;
        Notification::delete_for_object(conn, notification_kind::REPORT, self.id)
    }
}

impl From<PostReport> for ReportData {
    fn from(report: PostReport) -> ReportData {
        ReportData {
            id: report.id,
            user_id: report.user_id,
            post_id: report.post_id,
            reason: report.reason,
            status: report.status,
            created_at: report.created_at,
            updated_at: report.updated_at,
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
    fn reports_land_in_the_admin_feed() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::APPROVED);

            let report = PostReport::insert(
                &conn,
                NewPostReport {
                    user_id: users[0].id,
                    post_id: post.id,
                    reason: Some("plagiarism".to_owned()),
                },
            )?;
            assert_eq!(report.status, report_status::PENDING);

            // users[2] is the admin
            let feed = Notification::page_for_user(&conn, &users[2], (0, 10))?;
            assert_eq!(feed.len(), 1);
            assert_eq!(feed[0].0.kind, notification_kind::REPORT);
            assert_eq!(feed[0].0.object_id, report.id);
            Ok(())
        });
    }

    #[test]
    fn status_lifecycle() {
        let conn = db();
        conn.test_transaction::<_, Error, _>(|| {
            let users = fill_database(&conn);
            let author = simple_author(&conn);
            let post = simple_post(&conn, &author, post_status::APPROVED);
            let report = PostReport::insert(
                &conn,
                NewPostReport {
                    user_id: users[0].id,
                    post_id: post.id,
                    reason: None,
                },
            )?;

            let resolved = report.set_status(&conn, report_status::RESOLVED)?;
            assert_eq!(resolved.status, report_status::RESOLVED);
            assert_eq!(PostReport::list(&conn)?.len(), 1);

            resolved.delete(&conn)?;
            assert!(matches!(
                PostReport::get(&conn, report.id),
                Err(Error::NotFound)
            ));
            Ok(())
        });
    }
}
