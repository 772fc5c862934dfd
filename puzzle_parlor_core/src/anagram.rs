use crate::content::{Challenge, ContentError, ContentRequest, Locale};
use crate::deferred::{ANAGRAM_REVEAL_DELAY, Deferred, PendingSlot, Ticket};
use crate::progress::ProgressTracker;
use crate::session::GameSession;
use serde::Serialize;
use tracing::{debug, warn};

pub type TileId = usize;

/// 字母块，每个挑战重新生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LetterTile {
    pub id: TileId,
    pub letter: char,
    pub is_used: bool,
}

/// 拼词引擎
///
/// 维护当前挑战的字母池和已选序列。不变量：
/// `已用字母块数 == 已选序列长度`，且 (未用 ∪ 已选) 的字母多重集等于乱序词。
#[derive(Debug, Clone)]
pub struct AnagramAssemblyEngine {
    locale: Locale,
    challenges: Vec<Challenge>,
    progress: ProgressTracker,
    tiles: Vec<LetterTile>,
    selected: Vec<TileId>,
    // Some 时结果正在展示，拒绝所有输入
    result: Option<bool>,
    slot: PendingSlot,
}

impl AnagramAssemblyEngine {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            challenges: Vec::new(),
            progress: ProgressTracker::new(),
            tiles: Vec::new(),
            selected: Vec::new(),
            result: None,
            slot: PendingSlot::new(),
        }
    }

    pub fn request(&self) -> ContentRequest {
        ContentRequest::Challenges { locale: self.locale }
    }

    /// 载入一组挑战并为第一个挑战生成字母池
    ///
    /// 字母顺序沿用内容源给出的乱序，这里不再洗牌。
    pub fn load_challenges(&mut self, items: Vec<Challenge>) -> Result<(), ContentError> {
        if items.is_empty() {
            warn!("拼词挑战为空，保持原状态");
            return Err(ContentError::Empty);
        }
        if let Err(e) = items.iter().enumerate().try_for_each(|(i, c)| c.validate(i)) {
            warn!("拼词挑战格式错误: {}", e);
            return Err(e);
        }

        self.challenges = items;
        self.reset_progress();
        debug!("已加载 {} 个拼词挑战", self.challenges.len());
        Ok(())
    }

    fn reset_progress(&mut self) {
        self.progress = ProgressTracker::new();
        self.slot.invalidate();
        self.rebuild_tiles();
    }

    fn rebuild_tiles(&mut self) {
        self.result = None;
        self.selected.clear();
        self.tiles = match self.challenges.get(self.progress.index()) {
            Some(challenge) => challenge
                .scrambled_word
                .chars()
                .enumerate()
                .map(|(id, letter)| LetterTile { id, letter, is_used: false })
                .collect(),
            None => Vec::new(),
        };
    }

    /// 点击（或拖放）一个字母块，追加到已选序列末尾
    pub fn select_tile(&mut self, tile_id: TileId) -> bool {
        if self.result.is_some() || self.progress.is_finished() {
            return false;
        }
        match self.tiles.get_mut(tile_id) {
            Some(tile) if !tile.is_used => {
                tile.is_used = true;
                self.selected.push(tile_id);
                true
            }
            _ => false,
        }
    }

    /// 拖放到答案区，与点击完全等价
    pub fn drop_tile(&mut self, tile_id: TileId) -> bool {
        self.select_tile(tile_id)
    }

    /// 从已选序列中移除 `position` 处的字母块，放回字母池
    pub fn deselect_at(&mut self, position: usize) -> bool {
        if self.result.is_some() || position >= self.selected.len() {
            return false;
        }
        let tile_id = self.selected.remove(position);
        self.tiles[tile_id].is_used = false;
        true
    }

    /// 提交拼出的单词（区分大小写）
    pub fn submit(&mut self) -> Option<Deferred> {
        if self.result.is_some() || self.selected.is_empty() || self.progress.is_finished() {
            return None;
        }
        let challenge = self.challenges.get(self.progress.index())?;
        let correct = self.assembled_word() == challenge.correct_word;

        self.result = Some(correct);
        self.progress.record(correct);
        Some(self.slot.schedule(ANAGRAM_REVEAL_DELAY))
    }

    fn advance(&mut self) {
        self.progress.advance(self.challenges.len());
        if !self.progress.is_finished() {
            self.rebuild_tiles();
        }
    }

    pub fn assembled_word(&self) -> String {
        self.selected.iter().map(|&id| self.tiles[id].letter).collect()
    }

    pub fn tiles(&self) -> &[LetterTile] {
        &self.tiles
    }

    /// 已选序列，按选择顺序
    pub fn selected(&self) -> impl Iterator<Item = &LetterTile> {
        self.selected.iter().map(|&id| &self.tiles[id])
    }

    pub fn selected_len(&self) -> usize {
        self.selected.len()
    }

    /// 结果展示中时为 Some(是否正确)
    pub fn last_result(&self) -> Option<bool> {
        self.result
    }

    /// 当前挑战的正确答案，用于答错时展示
    pub fn correct_word(&self) -> Option<&str> {
        self.challenges.get(self.progress.index()).map(|c| c.correct_word.as_str())
    }

    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn total(&self) -> usize {
        self.challenges.len()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn percentage(&self) -> u32 {
        self.progress.percentage(self.challenges.len())
    }
}

impl GameSession for AnagramAssemblyEngine {
    fn is_loading(&self) -> bool {
        self.challenges.is_empty()
    }

    fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    fn tick(&mut self) {}

    fn resolve(&mut self, ticket: Ticket) {
        if self.slot.take(ticket) {
            self.advance();
        }
    }

    fn restart(&mut self) -> Option<ContentRequest> {
        self.reset_progress();
        Some(self.request())
    }
}
