mod article;
mod listing;

pub use article::{fetch_contents, rewrite_content};
pub use listing::{fetch_listing, parse_listing};
