use chrono::NaiveDateTime;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PostData {
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

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPostData {
    pub title: String,
    pub content: String,
    pub author_id: i32,
    pub cover_url: Option<String>,
    pub credit: Option<String>,
    pub status: Option<String>,
    pub sale_url: Option<String>,
}

/// Partial update; id, author_id and the timestamps are immutable.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PostUpdateData {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_url: Option<String>,
    pub credit: Option<String>,
    pub status: Option<String>,
    pub sale_url: Option<String>,
}
