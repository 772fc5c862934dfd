use crate::content::{ContentError, ContentRequest, Locale, Question, QuizCategory};
use crate::deferred::{Deferred, PendingSlot, Ticket, QUIZ_REVEAL_DELAY};
use crate::progress::ProgressTracker;
use crate::session::GameSession;
use crate::timer::Timer;
use tracing::{debug, warn};

/// 选项在揭晓阶段的显示标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Neutral,
    Correct, // 正确答案
    Wrong,   // 玩家选了但是错的
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
    pub elapsed_seconds: u32,
}

/// 选择题会话 (车牌 / 首都 / 城市)
#[derive(Debug, Clone)]
pub struct ChoiceQuizSession {
    category: QuizCategory,
    locale: Locale,
    questions: Vec<Question>,
    progress: ProgressTracker,
    // 当前题目已锁定的答案；Some 时拒绝再次作答
    locked: Option<String>,
    slot: PendingSlot,
    timer: Timer,
}

impl ChoiceQuizSession {
    /// 新建的会话处于加载中，需要先 `load`
    pub fn new(category: QuizCategory, locale: Locale) -> Self {
        Self {
            category,
            locale,
            questions: Vec::new(),
            progress: ProgressTracker::new(),
            locked: None,
            slot: PendingSlot::new(),
            timer: Timer::new(),
        }
    }

    /// 本会话需要的内容
    pub fn request(&self) -> ContentRequest {
        ContentRequest::Questions { category: self.category, locale: self.locale }
    }

    /// 用新题目替换当前状态
    ///
    /// 空列表或格式错误时记录日志并保留原状态：
    /// 空列表意味着"仍在加载"，绝不能当成 0 道题的游戏。
    pub fn load(&mut self, items: Vec<Question>) -> Result<(), ContentError> {
        if items.is_empty() {
            warn!("{:?} 题目为空，保持原状态", self.category);
            return Err(ContentError::Empty);
        }
        if let Err(e) = items.iter().enumerate().try_for_each(|(i, q)| q.validate(i)) {
            warn!("{:?} 题目格式错误: {}", self.category, e);
            return Err(e);
        }

        self.questions = items;
        self.reset_progress();
        self.timer.start();
        debug!("{:?} 已加载 {} 道题", self.category, self.questions.len());
        Ok(())
    }

    fn reset_progress(&mut self) {
        self.progress = ProgressTracker::new();
        self.locked = None;
        self.slot.invalidate();
        self.timer.reset();
    }

    /// 提交一个答案
    ///
    /// 已锁定或已结束时什么也不做。否则锁定答案、计分，
    /// 并返回一个 1500ms 后执行的前进动作。
    pub fn submit_answer(&mut self, choice: &str) -> Option<Deferred> {
        if self.locked.is_some() || self.progress.is_finished() {
            return None;
        }
        let question = self.questions.get(self.progress.index())?;
        let correct = question.correct_answer == choice;

        self.locked = Some(choice.to_string());
        self.progress.record(correct);
        Some(self.slot.schedule(QUIZ_REVEAL_DELAY))
    }

    fn advance(&mut self) {
        self.progress.advance(self.questions.len());
        if self.progress.is_finished() {
            self.timer.stop();
        } else {
            self.locked = None;
        }
    }

    pub fn category(&self) -> QuizCategory {
        self.category
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.progress.is_finished() {
            return None;
        }
        self.questions.get(self.progress.index())
    }

    /// 答案锁定期间 UI 应禁用所有选项
    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    pub fn locked_answer(&self) -> Option<&str> {
        self.locked.as_deref()
    }

    /// 当前题目每个选项的显示标记，未锁定时全部为 Neutral
    pub fn option_marks(&self) -> Vec<OptionMark> {
        let Some(question) = self.questions.get(self.progress.index()) else {
            return Vec::new();
        };
        question
            .options
            .iter()
            .map(|option| match &self.locked {
                Some(_) if *option == question.correct_answer => OptionMark::Correct,
                Some(chosen) if chosen == option => OptionMark::Wrong,
                _ => OptionMark::Neutral,
            })
            .collect()
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// 结束后的成绩
    pub fn summary(&self) -> Option<QuizSummary> {
        if !self.progress.is_finished() {
            return None;
        }
        let total = self.questions.len();
        Some(QuizSummary {
            score: self.progress.score(),
            total,
            percentage: self.progress.percentage(total),
            elapsed_seconds: self.timer.elapsed_seconds(),
        })
    }
}

impl GameSession for ChoiceQuizSession {
    fn is_loading(&self) -> bool {
        self.questions.is_empty()
    }

    fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    fn tick(&mut self) {
        self.timer.tick();
    }

    fn resolve(&mut self, ticket: Ticket) {
        if self.slot.take(ticket) {
            self.advance();
        }
    }

    /// 立即重置进度，并请求一批新题；新题到达前仍可玩旧题
    fn restart(&mut self) -> Option<ContentRequest> {
        self.reset_progress();
        if !self.questions.is_empty() {
            self.timer.start();
        }
        Some(self.request())
    }
}
