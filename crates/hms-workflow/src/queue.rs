//! 分诊队列
//!
//! 先进先出的候诊患者队列

use hms_core::{utils::generate_patient_id, PatientId, PatientQueueEntry};
use std::collections::{HashSet, VecDeque};

/// 分诊队列
#[derive(Debug, Default)]
pub struct TriageQueue {
    entries: VecDeque<PatientQueueEntry>,
    issued_ids: HashSet<PatientId>, // 本队列生命周期内已发放的标识
}

impl TriageQueue {
    /// 创建空队列
    pub fn new() -> Self {
        Self::default()
    }

    /// 患者入队（队尾），返回新建条目
    pub fn enqueue(&mut self, name: &str, condition: &str) -> PatientQueueEntry {
        let id = self.next_id();
        let entry = PatientQueueEntry {
            id,
            name: name.to_string(),
            condition: condition.to_string(),
        };

        self.entries.push_back(entry.clone());
        tracing::debug!("Enqueued patient {} (queue size {})", entry.id, self.entries.len());
        entry
    }

    /// 队首患者出队
    pub fn dequeue(&mut self) -> Option<PatientQueueEntry> {
        let entry = self.entries.pop_front()?;
        tracing::debug!("Dequeued patient {} (queue size {})", entry.id, self.entries.len());
        Some(entry)
    }

    /// 按先进先出顺序返回队列快照
    pub fn list(&self) -> Vec<PatientQueueEntry> {
        self.entries.iter().cloned().collect()
    }

    /// 查看队首患者
    pub fn peek(&self) -> Option<&PatientQueueEntry> {
        self.entries.front()
    }

    /// 按标识查找仍在队列中的患者
    pub fn find(&self, id: &PatientId) -> Option<&PatientQueueEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn next_id(&mut self) -> PatientId {
        loop {
            let candidate = PatientId::new(generate_patient_id());
            if self.issued_ids.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = TriageQueue::new();
        let names = ["P1", "P2", "P3", "P4"];
        let ids: Vec<PatientId> = names
            .iter()
            .map(|name| queue.enqueue(name, "Headache").id)
            .collect();

        for expected in &ids {
            let entry = queue.dequeue().unwrap();
            assert_eq!(&entry.id, expected);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_size_tracks_enqueues_minus_dequeues() {
        let mut queue = TriageQueue::new();
        queue.enqueue("A", "Cough");
        queue.enqueue("B", "Cough");
        queue.enqueue("C", "Cough");
        assert_eq!(queue.size(), 3);

        queue.dequeue();
        assert_eq!(queue.size(), 2);

        queue.enqueue("D", "Cough");
        assert_eq!(queue.size(), 3);

        while queue.dequeue().is_some() {}
        assert_eq!(queue.size(), 0);
        assert!(queue.peek().is_none());
    }

    #[test]
    fn test_dequeue_empty() {
        let mut queue = TriageQueue::new();
        assert!(queue.dequeue().is_none());
        assert_eq!(queue.size(), 0);

        queue.enqueue("A", "Rash");
        queue.dequeue();
        assert!(queue.dequeue().is_none());
        assert_eq!(queue.size(), 0);
    }

    #[test]
    fn test_list_is_non_destructive() {
        let mut queue = TriageQueue::new();
        let first = queue.enqueue("Alice Johnson", "Severe fever");
        let second = queue.enqueue("Bob Davis", "Broken arm");

        let snapshot = queue.list();
        assert_eq!(snapshot, vec![first.clone(), second]);
        assert_eq!(queue.size(), 2);
        assert_eq!(queue.peek(), Some(&first));
    }

    #[test]
    fn test_ids_are_unique_and_findable() {
        let mut queue = TriageQueue::new();
        let ids: HashSet<PatientId> = (0..200).map(|i| queue.enqueue(&format!("P{}", i), "X").id).collect();
        assert_eq!(ids.len(), 200);

        let entry = queue.enqueue("Carol", "Migraine");
        assert_eq!(queue.find(&entry.id).map(|e| e.name.as_str()), Some("Carol"));
        assert!(queue.find(&PatientId::from("missing")).is_none());
    }
}
