use serde::{Deserialize, Serialize};

/// 题目进度 (ProgressTracker)
///
/// `index` 只增不减；`finished` 是单向的终止状态，
/// 在 `index` 即将越过最后一题时置位。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressTracker {
    index: usize,
    score: u32,
    finished: bool,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录当前题目的作答结果
    pub fn record(&mut self, correct: bool) {
        if correct && !self.finished {
            self.score += 1;
        }
    }

    /// 前进到下一题；已是最后一题时进入 finished
    pub fn advance(&mut self, total: usize) {
        if self.finished {
            return;
        }
        if self.index + 1 < total {
            self.index += 1;
        } else {
            self.finished = true;
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn percentage(&self, total: usize) -> u32 {
        percentage(self.score, total)
    }
}

/// 四舍五入到最近的整数百分比 (.5 向上取整)
pub fn percentage(score: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let total = total as u64;
    // floor((200 * score + total) / (2 * total)) == floor(100 * score / total + 0.5)
    ((200 * score as u64 + total) / (2 * total)) as u32
}
