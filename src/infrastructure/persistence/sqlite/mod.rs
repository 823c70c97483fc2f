//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod followed_hashtags_repo;
mod hashtag_repo;
mod liked_posts_repo;
mod liked_users_repo;
mod post_repo;
mod user_repo;

pub use database::*;
pub use followed_hashtags_repo::*;
pub use hashtag_repo::*;
pub use liked_posts_repo::*;
pub use liked_users_repo::*;
pub use post_repo::*;
pub use user_repo::*;
