use crate::{
    schema::{notification_recipients, notifications},
    users::User,
    Connection, Error, Result,
};
use chrono::NaiveDateTime;
use diesel::{self, ExpressionMethods, QueryDsl, RunQueryDsl};
use folio_api::notifications::NotificationData;

pub mod notification_kind {
    pub const COMMENT: &str = "COMMENT";
    pub const FOLLOW: &str = "FOLLOW";
    pub const POST: &str = "POST";
    pub const REACTION: &str = "REACTION";
    pub const REPORT: &str = "REPORT";
}

#[derive(Clone, Queryable, Identifiable, Debug)]
pub struct Notification {
    pub id: i32,
    pub recipient_id: i32,
    pub kind: String,
    pub object_id: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "notifications"]
pub struct NewNotification {
    pub recipient_id: i32,
    pub kind: String,
    pub object_id: i32,
}

/// One row per user a notification was delivered to, carrying their
/// personal read flag. The primary recipient has one too, so the feed
/// query never has to special-case them.
#[derive(Clone, Queryable, Identifiable, Debug)]
#[table_name = "notification_recipients"]
pub struct NotificationRecipient {
    pub id: i32,
    pub notification_id: i32,
    pub user_id: i32,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "notification_recipients"]
pub struct NewNotificationRecipient {
    pub notification_id: i32,
    pub user_id: i32,
}

impl Notification {
    insert!(notifications, NewNotification);
    get!(notifications);
    list_by!(notifications, list_for_recipient, recipient_id as i32);

    /// Creates the notification and its delivery rows in one go.
    pub fn notify(
        conn: &Connection,
        kind: &str,
        object_id: i32,
        recipient_id: i32,
        fan_out: &[i32],
    ) -> Result<Notification> {
        let notification = Notification::insert(
            conn,
            NewNotification {
                recipient_id,
                kind: kind.to_owned(),
                object_id,
            },
        )?;
        NotificationRecipient::insert(
            conn,
            NewNotificationRecipient {
                notification_id: notification.id,
                user_id: recipient_id,
            },
        )?;
        for &user_id in fan_out {
            if user_id != recipient_id {
                NotificationRecipient::insert(
                    conn,
                    NewNotificationRecipient {
                        notification_id: notification.id,
                        user_id,
                    },
                )?;
            }
        }
        Ok(notification)
    }

    pub fn find(conn: &Connection, kind: &str, object_id: i32) -> Result<Notification> {
        notifications::table
            .filter(notifications::kind.eq(kind))
            .filter(notifications::object_id.eq(object_id))
            .first(conn)
            .map_err(Error::from)
    }

    /// Everything delivered to the user, newest first.
    pub fn page_for_user(
        conn: &Connection,
        user: &User,
        (min, max): (i32, i32),
    ) -> Result<Vec<(Notification, NotificationRecipient)>> {
        notifications::table
            .inner_join(notification_recipients::table)
            .filter(notification_recipients::user_id.eq(user.id))
            .order(notifications::created_at.desc())
            .offset(min.into())
            .limit((max - min).into())
            .load::<(Notification, NotificationRecipient)>(conn)
            .map_err(Error::from)
    }

    pub fn count_unread_for_user(conn: &Connection, user: &User) -> Result<i64> {
        notification_recipients::table
            .filter(notification_recipients::user_id.eq(user.id))
            .filter(notification_recipients::is_read.eq(false))
            .count()
            .get_result(conn)
            .map_err(Error::from)
    }

    pub fn mark_read(&self, conn: &Connection, user_id: i32) -> Result<NotificationRecipient> {
        let recipient = notification_recipients::table
            .filter(notification_recipients::notification_id.eq(self.id))
            .filter(notification_recipients::user_id.eq(user_id))
            .first::<NotificationRecipient>(conn)
            .map_err(Error::from)?;
        diesel::update(&recipient)
            .set(notification_recipients::is_read.eq(true))
            .execute(conn)?;
        NotificationRecipient::get(conn, recipient.id)
    }

    /// Removes every notification raised by the given object, delivery
    /// rows included.
    pub fn delete_for_object(conn: &Connection, kind: &str, object_id: i32) -> Result<()> {
        let all = notifications::table
            .filter(notifications::kind.eq(kind))
            .filter(notifications::object_id.eq(object_id))
            .load::<Notification>(conn)?;
        for notification in all {
            notification.delete(conn)?;
        }
        Ok(())
    }

    pub fn delete(&self, conn: &Connection) -> Result<()> {
        diesel::delete(
            notification_recipients::table
                .filter(notification_recipients::notification_id.eq(self.id)),
        )
        .execute(conn)?;
        diesel::delete(self)
            .execute(conn)
            .map(|_| ())
            .map_err(Error::from)
    }
}

impl NotificationRecipient {
    insert!(notification_recipients, NewNotificationRecipient);
    get!(notification_recipients);
    list_by!(
        notification_recipients,
        list_by_notification,
        notification_id as i32
    );

    pub fn delete_all_for_user(conn: &Connection, user_id: i32) -> Result<()> {
        diesel::delete(
            notification_recipients::table.filter(notification_recipients::user_id.eq(user_id)),
        )
        .execute(conn)
        .map(|_| ())
        .map_err(Error::from)
    }
}

impl From<(Notification, NotificationRecipient)> for NotificationData {
    fn from((notification, recipient): (Notification, NotificationRecipient)) -> NotificationData {
        NotificationData {
            id: notification.id,
            kind: notification.kind,
            object_id: notification.object_id,
            is_read: recipient.is_read,
            created_at: notification.created_at,
        }
    }
}
