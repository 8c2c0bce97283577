use crate::domain::user::{email::Email, password::Password, username::Username, NewUser};

#[derive(serde::Deserialize, serde::Serialize)]
pub struct JoinRequestBody {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl TryFrom<JoinRequestBody> for NewUser {
    type Error = String;
    fn try_from(value: JoinRequestBody) -> Result<Self, Self::Error> {
        let username = Username::try_from(value.username)?;
        let password = Password::try_from(value.password)?;
        let email = Email::try_from(value.email)?;
        Ok(Self {
            username,
            password,
            email,
        })
    }
}

#[derive(serde::Deserialize, serde::Serialize)]
pub struct LoginRequestBody {
    pub username: String,
    pub password: String,
}

#[derive(serde::Deserialize, serde::Serialize)]
pub struct JoinResponseBody {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Always `null` right after joining.
    pub profile: Option<String>,
}
