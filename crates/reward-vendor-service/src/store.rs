//! 奖励分配存储
//!
//! 进程内只追加的列表：不去重、不更新、不删除，重启后清空。

use parking_lot::RwLock;
use reward_shared::models::VendorRewardAssignment;

#[derive(Debug, Default)]
pub struct AssignmentStore {
    entries: RwLock<Vec<VendorRewardAssignment>>,
}

impl AssignmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加一条分配，返回追加后的总数
    pub fn append(&self, assignment: VendorRewardAssignment) -> usize {
        let mut entries = self.entries.write();
        entries.push(assignment);
        entries.len()
    }

    /// 按写入顺序返回全部分配的快照
    pub fn list(&self) -> Vec<VendorRewardAssignment> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn assignment(reward_id: &str) -> VendorRewardAssignment {
        VendorRewardAssignment {
            reward_id: reward_id.to_string(),
            user_id: "U451298".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_identical_assignments_are_both_kept() {
        let store = AssignmentStore::new();
        assert_eq!(store.append(assignment("RWD34589")), 1);
        assert_eq!(store.append(assignment("RWD34589")), 2);

        assert_eq!(store.list(), vec![assignment("RWD34589"), assignment("RWD34589")]);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let store = AssignmentStore::new();
        for id in ["RWD1", "RWD2", "RWD3"] {
            store.append(assignment(id));
        }

        let ids: Vec<_> = store.list().into_iter().map(|a| a.reward_id).collect();
        assert_eq!(ids, ["RWD1", "RWD2", "RWD3"]);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = Arc::new(AssignmentStore::new());
        let handles: Vec<_> = (0..50)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.append(assignment(&format!("RWD{i}"))) })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len(), 50);
    }
}
