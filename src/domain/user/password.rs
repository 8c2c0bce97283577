use secrecy::Secret;

const MIN_LEN: usize = 4;
const MAX_LEN: usize = 20;

/// A plain-text password that passed the length policy. Only ever hashed.
pub struct Password(Secret<String>);

impl TryFrom<String> for Password {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        let len = value.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(format!(
                "password must be between {} and {} characters",
                MIN_LEN, MAX_LEN
            ));
        }

        Ok(Self(Secret::new(value)))
    }
}

impl Password {
    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
