use derive_more::Display;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 20;

/// 2 to 20 ASCII letters or digits.
#[derive(Debug, Display)]
#[display(fmt = "{}", _0)]
pub struct Username(String);

impl TryFrom<String> for Username {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if !(MIN_LEN..=MAX_LEN).contains(&value.len()) {
            return Err(format!(
                "username must be between {} and {} characters",
                MIN_LEN, MAX_LEN
            ));
        }

        if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("username may only contain letters and digits".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
