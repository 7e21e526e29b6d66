use serde::{Deserialize, Serialize};

/// The User struct is the profile the account API returns for a token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

impl User {
    /// Fill in `profile_pic` with `default_avatar` when the API sent none (or an empty string).
    pub fn with_default_avatar(mut self, default_avatar: &str) -> Self {
        let missing = self
            .profile_pic
            .as_deref()
            .map(str::is_empty)
            .unwrap_or(true);
        if missing {
            self.profile_pic = Some(default_avatar.to_string());
        }
        self
    }
}
