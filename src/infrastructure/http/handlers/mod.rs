//! HTTP Handlers
//!
//! 每个实体一个 handler 模块，CRUD 之外的查询操作挂在对应实体下

mod followed_hashtags;
mod hashtags;
mod liked_posts;
mod liked_users;
mod ping;
mod posts;
mod users;

pub use followed_hashtags::*;
pub use hashtags::*;
pub use liked_posts::*;
pub use liked_users::*;
pub use ping::*;
pub use posts::*;
pub use users::*;
