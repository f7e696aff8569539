use chrono::NaiveDateTime;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserData {
    pub id: i32,
    pub email: String,
    pub phone: Option<String>,
    pub role: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewUserData {
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UserUpdateData {
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RoleData {
    pub role: i32,
}
