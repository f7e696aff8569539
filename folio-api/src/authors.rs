use crate::users::{NewUserData, UserData};
use chrono::NaiveDateTime;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthorData {
    pub id: i32,
    pub pen_name: String,
    pub bio: Option<String>,
    pub user_id: i32,
    pub profile: UserData,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Creates the author and their user profile in one request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewAuthorData {
    pub pen_name: String,
    pub bio: Option<String>,
    pub profile: NewUserData,
}

/// Promotes an already registered user to author.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromoteAuthorData {
    pub pen_name: String,
    pub bio: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuthorUpdateData {
    pub pen_name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FollowData {
    pub user_id: i32,
}
