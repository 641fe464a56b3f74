//! News domain entities.

pub mod model;

pub use model::{NewNewsArticle, NewsArticle};
