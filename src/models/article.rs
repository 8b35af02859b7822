use url::Url;

/// A single article from the listing page.
///
/// `content` stays empty until the content fetch stage fills it with the
/// rewritten article HTML.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub url: Url,
    /// Publish time as epoch seconds, midnight UTC of the displayed date.
    pub time: i64,
    pub content: String,
}

impl Article {
    pub fn new(title: String, url: Url, time: i64) -> Self {
        Self {
            title,
            url,
            time,
            content: String::new(),
        }
    }
}
