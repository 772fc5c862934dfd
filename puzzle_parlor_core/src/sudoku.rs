use crate::content::{ContentError, ContentRequest, EMPTY_GRID, Grid, SudokuLevel, SudokuPuzzle};
use crate::deferred::Ticket;
use crate::session::GameSession;
use crate::timer::Timer;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Solved,
    /// 与答案不一致，玩家可继续填写
    Mismatch,
}

/// 数独编辑会话
///
/// 题面中的非零格为固定格，不可修改；其余格子随意填写，
/// 填写时不做任何合法性检查，只在 `check` 时与答案整体比较。
#[derive(Debug, Clone)]
pub struct GridEditSession {
    level: SudokuLevel,
    given: Grid,
    working: Grid,
    solution: Grid,
    timer: Timer,
    loaded: bool,
    solved: bool,
    revealed: bool,
}

impl GridEditSession {
    pub fn new(level: SudokuLevel) -> Self {
        Self {
            level,
            given: EMPTY_GRID,
            working: EMPTY_GRID,
            solution: EMPTY_GRID,
            timer: Timer::new(),
            loaded: false,
            solved: false,
            revealed: false,
        }
    }

    pub fn request(&self) -> ContentRequest {
        ContentRequest::Sudoku { level: self.level }
    }

    /// 载入题面与答案，开始计时
    pub fn load(&mut self, pair: SudokuPuzzle) -> Result<(), ContentError> {
        if let Err(e) = pair.validate() {
            warn!("数独题目格式错误 ({}): {}", self.level.label(), e);
            return Err(e);
        }
        self.given = pair.puzzle;
        self.working = pair.puzzle;
        self.solution = pair.solution;
        self.loaded = true;
        self.solved = false;
        self.revealed = false;
        self.timer.reset();
        self.timer.start();
        debug!("数独已载入 ({}), 空格 {}", self.level.label(), self.empty_count());
        Ok(())
    }

    /// 换一道题：会话回到加载中，直到新题到达
    pub fn new_puzzle(&mut self, level: SudokuLevel) -> ContentRequest {
        *self = Self::new(level);
        self.request()
    }

    /// 修改一个格子。固定格、越界坐标或非法数值被拒绝，返回 false
    pub fn set_cell(&mut self, row: usize, col: usize, value: u8) -> bool {
        if !self.loaded || row >= 9 || col >= 9 || value > 9 {
            return false;
        }
        if self.is_given(row, col) {
            return false;
        }
        self.working[row][col] = value;
        true
    }

    pub fn clear_cell(&mut self, row: usize, col: usize) -> bool {
        self.set_cell(row, col, 0)
    }

    /// 检查整个盘面是否与答案完全一致
    ///
    /// 成功时停表；失败时不碰计时器，盘面保持不变。
    pub fn check(&mut self) -> CheckOutcome {
        if self.loaded && self.working == self.solution {
            self.solved = true;
            self.timer.stop();
            CheckOutcome::Solved
        } else {
            CheckOutcome::Mismatch
        }
    }

    /// 认输：直接填入答案并停表
    pub fn reveal(&mut self) {
        if !self.loaded {
            return;
        }
        self.working = self.solution;
        self.revealed = true;
        self.timer.stop();
    }

    /// 越界坐标视为非固定格
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.given.get(row).and_then(|r| r.get(col)).is_some_and(|&v| v != 0)
    }

    /// 越界时为 None
    pub fn cell(&self, row: usize, col: usize) -> Option<u8> {
        self.working.get(row)?.get(col).copied()
    }

    pub fn working(&self) -> &Grid {
        &self.working
    }

    pub fn level(&self) -> SudokuLevel {
        self.level
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn filled_count(&self) -> usize {
        self.working.iter().flatten().filter(|&&v| v != 0).count()
    }

    pub fn empty_count(&self) -> usize {
        81 - self.filled_count()
    }
}

impl GameSession for GridEditSession {
    fn is_loading(&self) -> bool {
        !self.loaded
    }

    /// 解出或认输之后，计时意义上的结束
    fn is_finished(&self) -> bool {
        self.solved || self.revealed
    }

    fn tick(&mut self) {
        self.timer.tick();
    }

    // 数独没有延迟动作
    fn resolve(&mut self, _ticket: Ticket) {}

    fn restart(&mut self) -> Option<ContentRequest> {
        Some(self.new_puzzle(self.level))
    }
}
