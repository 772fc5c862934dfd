//! 延迟动作 (Deferred)
//!
//! 引擎从不阻塞等待。需要延迟执行的状态转换（答题揭晓、翻错的牌扣回去等）
//! 会返回一个 [`Deferred`]，由外部运行时在 `delay` 之后把其中的 [`Ticket`]
//! 交回引擎的 `resolve`。会话重置时 generation 前进，旧的 Ticket 自然失效。

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// 选择题揭晓答案后停留的时间
pub const QUIZ_REVEAL_DELAY: Duration = Duration::from_millis(1500);
/// 翻开两张不同的牌后，扣回去之前的停留时间
pub const MISMATCH_DELAY: Duration = Duration::from_millis(1000);
/// 拼词结果展示时间
pub const ANAGRAM_REVEAL_DELAY: Duration = Duration::from_millis(2000);

// 进程内全局递增，保证不同引擎、不同会话之间的 generation 不会撞车
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    generation: u64,
    seq: u32,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// 一个待执行的延迟动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub ticket: Ticket,
    pub delay: Duration,
}

/// 每个会话最多只有一个未决的延迟动作
#[derive(Debug, Clone)]
pub struct PendingSlot {
    generation: u64,
    seq: u32,
    pending: Option<Ticket>,
}

impl Default for PendingSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingSlot {
    pub fn new() -> Self {
        Self { generation: next_generation(), seq: 0, pending: None }
    }

    /// 登记一个新的延迟动作，覆盖旧的
    pub fn schedule(&mut self, delay: Duration) -> Deferred {
        self.seq = self.seq.wrapping_add(1);
        let ticket = Ticket { generation: self.generation, seq: self.seq };
        self.pending = Some(ticket);
        Deferred { ticket, delay }
    }

    /// 仅当 `ticket` 正是当前未决的那个时返回 true，并将其消费
    pub fn take(&mut self, ticket: Ticket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// 作废所有已发出的 Ticket
    pub fn invalidate(&mut self) {
        self.generation = next_generation();
        self.seq = 0;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_is_consumed_once() {
        let mut slot = PendingSlot::new();
        let d = slot.schedule(MISMATCH_DELAY);
        assert_eq!(d.delay, MISMATCH_DELAY);
        assert!(slot.is_pending());
        assert!(slot.take(d.ticket));
        assert!(!slot.take(d.ticket));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_invalidate_rejects_stale_ticket() {
        let mut slot = PendingSlot::new();
        let before = slot.generation();
        let d = slot.schedule(QUIZ_REVEAL_DELAY);
        slot.invalidate();
        assert_ne!(slot.generation(), before);
        assert!(!slot.take(d.ticket));

        // 重置后重新登记的 seq 与旧 Ticket 相同，但 generation 不同
        let fresh = slot.schedule(QUIZ_REVEAL_DELAY);
        assert_ne!(fresh.ticket, d.ticket);
        assert!(!slot.take(d.ticket));
        assert!(slot.take(fresh.ticket));
    }

    #[test]
    fn test_slots_never_share_generation() {
        let a = PendingSlot::new();
        let b = PendingSlot::new();
        assert_ne!(a.generation(), b.generation());
    }
}
