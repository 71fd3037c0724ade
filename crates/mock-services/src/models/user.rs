//! 随机用户
//!
//! 用于 `--populate` 填充身份目录，ID 从 U500000 起按序号分配，不与种子用户冲突。

use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use reward_shared::models::UserProfile;

/// 生成用户 ID 的起点
pub const GENERATED_USER_ID_BASE: usize = 500_000;

/// 生成第 `index` 个随机用户
pub fn random_profile(index: usize) -> UserProfile {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    let email: String = SafeEmail().fake();

    UserProfile::new(
        format!("U{}", GENERATED_USER_ID_BASE + index),
        first_name,
        last_name,
        email,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_profile_fields() {
        let profile = random_profile(7);

        assert_eq!(profile.user_id, "U500007");
        assert!(!profile.first_name.is_empty());
        assert!(!profile.last_name.is_empty());
        assert!(profile.email.contains('@'));
    }
}
