use serde::{Deserialize, Serialize};

/// 会话计时器 (Timer)
///
/// 自身不读取系统时钟：外部驱动每秒调用一次 `tick()`，
/// 只有在 `running` 时才累加。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    elapsed_seconds: u32,
    running: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// 归零并停止
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 一秒过去了
    pub fn tick(&mut self) {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// 格式化为 `MM:SS`，分钟数超过 59 时不进位到小时
    pub fn format_clock(&self) -> String {
        format_clock(self.elapsed_seconds)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
