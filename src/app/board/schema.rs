use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::board::{content::Content, title::Title, NewPost};

#[derive(Deserialize, Serialize)]
pub struct SaveRequestBody {
    pub title: String,
    pub content: String,
}

#[derive(Deserialize, Serialize)]
pub struct UpdateRequestBody {
    pub title: String,
    pub content: String,
}

impl TryFrom<SaveRequestBody> for NewPost {
    type Error = String;
    fn try_from(value: SaveRequestBody) -> Result<Self, Self::Error> {
        let title = Title::try_from(value.title)?;
        let content = Content::try_from(value.content)?;
        Ok(Self { title, content })
    }
}

impl TryFrom<UpdateRequestBody> for NewPost {
    type Error = String;
    fn try_from(value: UpdateRequestBody) -> Result<Self, Self::Error> {
        let title = Title::try_from(value.title)?;
        let content = Content::try_from(value.content)?;
        Ok(Self { title, content })
    }
}

/// Returned by both save and update.
#[derive(Deserialize, Serialize)]
pub struct PostResponseBody {
    pub id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: u32,
}

#[derive(Deserialize, Serialize, sqlx::FromRow)]
pub struct ListItem {
    pub id: i64,
    pub title: String,
}

#[derive(Deserialize, Serialize)]
pub struct ListResponseBody {
    pub boards: Vec<ListItem>,
    pub page: u32,
    pub first: bool,
    pub last: bool,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailResponseBody {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub writer: Writer,
}

#[derive(Deserialize, Serialize)]
pub struct Writer {
    pub id: i64,
    pub username: String,
}
