use derive_more::Display;

#[derive(Debug, Display)]
#[display(fmt = "{}", _0)]
pub struct Content(String);

impl TryFrom<String> for Content {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Err("content is empty".into());
        }

        Ok(Self(value))
    }
}

impl AsRef<str> for Content {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
