pub mod content;
pub mod title;

use self::content::Content;
use self::title::Title;

/// A validated board write, used for both saving and updating a post.
pub struct NewPost {
    pub title: Title,
    pub content: Content,
}
