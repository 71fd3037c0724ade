//! 内存存储
//!
//! 基于 DashMap 的并发键值存储，模拟协作方持有的目录数据。

use std::sync::Arc;

use dashmap::DashMap;

/// 通用内存存储
///
/// `list` 按 key 排序返回，保证接口输出稳定。
#[derive(Debug)]
pub struct MemoryStore<T> {
    data: Arc<DashMap<String, T>>,
}

impl<T: Clone> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    /// 插入或覆盖
    pub fn insert(&self, key: impl Into<String>, value: T) {
        self.data.insert(key.into(), value);
    }

    /// 返回克隆，不持有分片锁
    pub fn get(&self, key: &str) -> Option<T> {
        self.data.get(key).map(|v| v.clone())
    }

    pub fn remove(&self, key: &str) -> Option<T> {
        self.data.remove(key).map(|(_, v)| v)
    }

    /// 按 key 升序列出全部数据
    pub fn list(&self) -> Vec<T> {
        let mut entries: Vec<(String, T)> = self
            .data
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.into_iter().map(|(_, v)| v).collect()
    }

    /// 删除不满足条件的数据，返回删除数量
    pub fn retain<F>(&self, keep: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        let before = self.data.len();
        self.data.retain(|_, v| keep(v));
        before - self.data.len()
    }

    pub fn count(&self) -> usize {
        self.data.len()
    }

    pub fn clear(&self) {
        self.data.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// 批量插入，key 由 `key_fn` 从元素中提取
    pub fn insert_many<I, F>(&self, items: I, key_fn: F)
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> String,
    {
        for item in items {
            self.data.insert(key_fn(&item), item);
        }
    }
}

impl<T> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}
