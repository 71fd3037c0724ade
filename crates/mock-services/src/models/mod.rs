//! 模拟数据模型
//!
//! 协作方持有的种子目录数据，以及随机用户生成。

pub mod catalog;
pub mod user;

pub use catalog::{seed_offers, seed_user_rewards, seed_users};
pub use user::random_profile;
