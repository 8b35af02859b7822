mod article;

pub use article::Article;
