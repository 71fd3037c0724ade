//! 数据生成器
//!
//! 批量生成随机用户，填充身份目录的内存存储。

use reward_shared::models::UserProfile;

use crate::models::random_profile;
use crate::store::MemoryStore;

/// 数据生成器配置
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 生成的用户数量
    pub user_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { user_count: 100 }
    }
}

/// 批量数据生成器
pub struct DataGenerator {
    config: GeneratorConfig,
}

impl DataGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn generate_users(&self) -> Vec<UserProfile> {
        (0..self.config.user_count).map(random_profile).collect()
    }

    /// 生成用户并写入存储，已存在的种子用户不受影响
    pub fn populate_users(&self, users: &MemoryStore<UserProfile>) -> GenerationStats {
        let before = users.count();
        users.insert_many(self.generate_users(), |u| u.user_id.clone());

        GenerationStats {
            generated: users.count() - before,
            total_users: users.count(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }
}

/// 数据生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationStats {
    pub generated: usize,
    pub total_users: usize,
}
