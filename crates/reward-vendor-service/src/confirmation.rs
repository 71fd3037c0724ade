//! 确认号生成
//!
//! 确认号是 [1_000_000_000_000_000, 9_999_999_999_999_999] 内均匀分布的整数，
//! 十进制表示恰好 16 位。唯一性是概率性的，不做去重。

use parking_lot::Mutex;
use rand::{Rng, SeedableRng, rngs::StdRng};

pub const MIN_CONFIRMATION_NUMBER: u64 = 1_000_000_000_000_000;
pub const MAX_CONFIRMATION_NUMBER: u64 = 9_999_999_999_999_999;

/// 确认号生成器
///
/// 每个实例只在创建时从操作系统取一次种子，进程内共享一个实例。
pub struct ConfirmationNumberGenerator {
    rng: Mutex<StdRng>,
}

impl ConfirmationNumberGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// 固定种子，用于可复现的测试
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn generate(&self) -> String {
        let number = self
            .rng
            .lock()
            .random_range(MIN_CONFIRMATION_NUMBER..=MAX_CONFIRMATION_NUMBER);
        number.to_string()
    }
}

impl Default for ConfirmationNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
