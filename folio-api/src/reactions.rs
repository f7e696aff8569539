use chrono::NaiveDateTime;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReactionData {
    pub id: i32,
    pub kind: String,
    pub user_id: i32,
    pub post_id: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewReactionData {
    pub user_id: i32,
    pub kind: String,
}
