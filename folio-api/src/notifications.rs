use chrono::NaiveDateTime;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NotificationData {
    pub id: i32,
    pub kind: String,
    pub object_id: i32,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MarkReadData {
    pub user_id: i32,
}
