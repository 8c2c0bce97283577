pub mod email;
pub mod password;
pub mod username;

use self::email::Email;
use self::password::Password;
use self::username::Username;

/// A validated join request.
pub struct NewUser {
    pub username: Username,
    pub password: Password,
    pub email: Email,
}
