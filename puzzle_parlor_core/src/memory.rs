use crate::content::ContentRequest;
use crate::deferred::{Deferred, PendingSlot, Ticket, MISMATCH_DELAY};
use crate::session::GameSession;
use crate::timer::Timer;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub type CardId = usize;

// --- 主题与难度 ---

/// 卡牌主题，每个主题 12 个图标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "emojis")]
    Fruits,
    #[serde(rename = "animals")]
    Animals,
    #[serde(rename = "sports")]
    Sports,
    #[serde(rename = "vehicles")]
    Vehicles,
    #[serde(rename = "hearts")]
    Hearts,
}

impl Theme {
    pub const ALL: [Theme; 5] = [Theme::Fruits, Theme::Animals, Theme::Sports, Theme::Vehicles, Theme::Hearts];

    pub fn icons(&self) -> &'static [&'static str] {
        match self {
            Theme::Fruits => &["🍎", "🍌", "🍇", "🍓", "🍊", "🍋", "🥝", "🍉", "🍒", "🥭", "🍑", "🍍"],
            Theme::Animals => &["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮"],
            Theme::Sports => &["⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🏉", "🎱", "🏓", "🏸", "🏒", "🏑"],
            Theme::Vehicles => &["🚗", "🚕", "🚙", "🚌", "🚎", "🏎️", "🚓", "🚑", "🚒", "🚐", "🚚", "🚛"],
            Theme::Hearts => &["❤️", "🧡", "💛", "💚", "💙", "💜", "🖤", "🤍", "🤎", "💖", "💗", "💝"],
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Theme::Fruits => "emojis",
            Theme::Animals => "animals",
            Theme::Sports => "sports",
            Theme::Vehicles => "vehicles",
            Theme::Hearts => "hearts",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fruits" => Ok(Theme::Fruits),
            _ => Theme::ALL.into_iter().find(|t| t.key() == s).ok_or_else(|| format!("unknown theme: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn pairs(&self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    /// 显示时每行几张牌
    pub fn columns(&self) -> usize {
        match self {
            Difficulty::Easy | Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL.into_iter().find(|d| d.key() == s).ok_or_else(|| format!("unknown difficulty: {s}"))
    }
}

// --- 卡牌 ---

/// 单张牌的状态：concealed -> flipped -> matched(终态)，或 flipped -> concealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Concealed,
    Flipped,
    Matched,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: CardId,
    pub icon: &'static str,
    pub face: CardFace,
}

impl Card {
    pub fn is_flipped(&self) -> bool {
        self.face == CardFace::Flipped
    }

    pub fn is_matched(&self) -> bool {
        self.face == CardFace::Matched
    }

    /// 是否朝上显示
    pub fn is_face_up(&self) -> bool {
        self.face != CardFace::Concealed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameComplete {
    pub moves: u32,
    pub elapsed_seconds: u32,
}

/// 一次翻牌的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// 被守卫拒绝（已有两张待判定、已翻开、已配对、id 不存在）
    Ignored,
    /// 翻开了第一张
    Revealed,
    /// 两张配对成功，立即生效
    Matched,
    /// 两张不同，延迟后扣回
    Mismatched(Deferred),
    /// 最后一对配对成功
    Completed(GameComplete),
}

/// 记忆翻牌引擎
#[derive(Debug, Clone)]
pub struct MemoryMatchEngine {
    // None 表示停留在主题/难度选择界面
    setup: Option<(Theme, Difficulty)>,
    cards: Vec<Card>,
    flipped: Vec<CardId>, // 最多两张
    matched_count: usize,
    moves: u32,
    timer: Timer,
    slot: PendingSlot,
    complete: Option<GameComplete>,
}

impl Default for MemoryMatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMatchEngine {
    pub fn new() -> Self {
        Self {
            setup: None,
            cards: Vec::new(),
            flipped: Vec::with_capacity(2),
            matched_count: 0,
            moves: 0,
            timer: Timer::new(),
            slot: PendingSlot::new(),
            complete: None,
        }
    }

    pub fn new_game(&mut self, theme: Theme, difficulty: Difficulty) {
        self.new_game_with_rng(theme, difficulty, &mut rand::rng());
    }

    /// 取主题前 `pairs` 个图标各复制一份，Fisher-Yates 洗牌
    pub fn new_game_with_rng<R: Rng + ?Sized>(&mut self, theme: Theme, difficulty: Difficulty, rng: &mut R) {
        let pairs = difficulty.pairs();
        let icons = &theme.icons()[..pairs];

        let mut deck: Vec<&'static str> = icons.iter().chain(icons.iter()).copied().collect();
        deck.shuffle(rng);

        self.cards = deck
            .into_iter()
            .enumerate()
            .map(|(id, icon)| Card { id, icon, face: CardFace::Concealed })
            .collect();
        self.setup = Some((theme, difficulty));
        self.flipped.clear();
        self.matched_count = 0;
        self.moves = 0;
        self.timer.reset();
        self.slot.invalidate();
        self.complete = None;
    }

    /// 翻一张牌
    pub fn flip(&mut self, card_id: CardId) -> FlipOutcome {
        if self.flipped.len() == 2 {
            return FlipOutcome::Ignored;
        }
        match self.cards.get(card_id) {
            Some(card) if card.face == CardFace::Concealed => {}
            _ => return FlipOutcome::Ignored,
        }

        // 整局第一次翻牌时开始计时
        if self.moves == 0 && self.matched_count == 0 && self.flipped.is_empty() {
            self.timer.start();
        }

        self.cards[card_id].face = CardFace::Flipped;
        self.flipped.push(card_id);
        if self.flipped.len() < 2 {
            return FlipOutcome::Revealed;
        }

        self.moves += 1;
        let (first, second) = (self.flipped[0], self.flipped[1]);
        if self.cards[first].icon != self.cards[second].icon {
            return FlipOutcome::Mismatched(self.slot.schedule(MISMATCH_DELAY));
        }

        self.cards[first].face = CardFace::Matched;
        self.cards[second].face = CardFace::Matched;
        self.matched_count += 2;
        self.flipped.clear();

        if self.matched_count == self.cards.len() {
            self.timer.stop();
            let complete = GameComplete { moves: self.moves, elapsed_seconds: self.timer.elapsed_seconds() };
            self.complete = Some(complete);
            return FlipOutcome::Completed(complete);
        }
        FlipOutcome::Matched
    }

    fn conceal_flipped(&mut self) {
        for id in self.flipped.drain(..) {
            self.cards[id].face = CardFace::Concealed;
        }
    }

    /// 丢弃所有牌，回到主题/难度选择
    pub fn change_theme(&mut self) {
        self.setup = None;
        self.cards.clear();
        self.flipped.clear();
        self.matched_count = 0;
        self.moves = 0;
        self.timer.reset();
        self.slot.invalidate();
        self.complete = None;
    }

    pub fn setup(&self) -> Option<(Theme, Difficulty)> {
        self.setup
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn flipped(&self) -> &[CardId] {
        &self.flipped
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn columns(&self) -> usize {
        self.setup.map_or(4, |(_, d)| d.columns())
    }

    pub fn completion(&self) -> Option<GameComplete> {
        self.complete
    }
}

impl GameSession for MemoryMatchEngine {
    /// 没有远程内容；在选择界面时视为"未开始"
    fn is_loading(&self) -> bool {
        self.setup.is_none()
    }

    fn is_finished(&self) -> bool {
        self.complete.is_some()
    }

    fn tick(&mut self) {
        self.timer.tick();
    }

    fn resolve(&mut self, ticket: Ticket) {
        if self.slot.take(ticket) {
            self.conceal_flipped();
        }
    }

    /// 同主题同难度重新洗牌
    fn restart(&mut self) -> Option<ContentRequest> {
        if let Some((theme, difficulty)) = self.setup {
            self.new_game(theme, difficulty);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn easy_game() -> MemoryMatchEngine {
        let mut engine = MemoryMatchEngine::new();
        engine.new_game_with_rng(Theme::Animals, Difficulty::Easy, &mut StdRng::seed_from_u64(7));
        engine
    }

    /// 找一对相同图标的牌，以及一张与第一张不同的牌
    fn pair_and_other(engine: &MemoryMatchEngine) -> (CardId, CardId, CardId) {
        let first = &engine.cards()[0];
        let twin = engine.cards().iter().find(|c| c.id != first.id && c.icon == first.icon).unwrap();
        let other = engine.cards().iter().find(|c| c.icon != first.icon).unwrap();
        (first.id, twin.id, other.id)
    }

    #[test]
    fn test_new_game_builds_pairs() {
        let engine = easy_game();
        assert_eq!(engine.cards().len(), 12);
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for card in engine.cards() {
            *counts.entry(card.icon).or_insert(0) += 1;
            assert_eq!(card.face, CardFace::Concealed);
        }
        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&n| n == 2));
        assert!(counts.keys().all(|icon| Theme::Animals.icons()[..6].contains(icon)));
        assert_eq!(engine.columns(), 4);
    }

    #[test]
    fn test_hard_uses_twelve_pairs() {
        let mut engine = MemoryMatchEngine::new();
        engine.new_game(Theme::Hearts, Difficulty::Hard);
        assert_eq!(engine.cards().len(), 24);
        assert_eq!(engine.columns(), 6);
    }

    #[test]
    fn test_match_resolves_immediately() {
        let mut engine = easy_game();
        let (a, b, _) = pair_and_other(&engine);
        assert_eq!(engine.flip(a), FlipOutcome::Revealed);
        assert!(engine.timer().is_running());
        assert_eq!(engine.flip(b), FlipOutcome::Matched);
        assert!(engine.cards()[a].is_matched() && engine.cards()[b].is_matched());
        assert!(engine.flipped().is_empty());
        assert_eq!(engine.moves(), 1);
        assert_eq!(engine.matched_count(), 2);
    }

    #[test]
    fn test_mismatch_conceals_after_delay() {
        let mut engine = easy_game();
        let (a, _, c) = pair_and_other(&engine);
        engine.flip(a);
        let FlipOutcome::Mismatched(deferred) = engine.flip(c) else {
            panic!("expected a mismatch");
        };
        assert_eq!(deferred.delay, MISMATCH_DELAY);
        assert!(engine.cards()[a].is_flipped() && engine.cards()[c].is_flipped());

        // 等待期间再翻无效
        let (_, b, _) = pair_and_other(&engine);
        assert_eq!(engine.flip(b), FlipOutcome::Ignored);
        assert_eq!(engine.moves(), 1);

        engine.resolve(deferred.ticket);
        assert!(engine.flipped().is_empty());
        assert_eq!(engine.cards()[a].face, CardFace::Concealed);
        assert_eq!(engine.cards()[c].face, CardFace::Concealed);
    }

    #[test]
    fn test_flip_guards() {
        let mut engine = easy_game();
        let (a, b, _) = pair_and_other(&engine);
        engine.flip(a);
        assert_eq!(engine.flip(a), FlipOutcome::Ignored); // 重复点击
        engine.flip(b);
        assert_eq!(engine.flip(a), FlipOutcome::Ignored); // 已配对
        assert_eq!(engine.flip(99), FlipOutcome::Ignored);
        assert_eq!(engine.moves(), 1);
    }

    #[test]
    fn test_restart_invalidates_pending_mismatch() {
        let mut engine = easy_game();
        let (a, _, c) = pair_and_other(&engine);
        engine.flip(a);
        let FlipOutcome::Mismatched(deferred) = engine.flip(c) else {
            panic!("expected a mismatch");
        };
        engine.restart();
        assert_eq!(engine.moves(), 0);
        engine.flip(0);
        engine.resolve(deferred.ticket);
        assert_eq!(engine.flipped().to_vec(), vec![0]);
        assert!(engine.cards()[0].is_flipped());
    }

    #[test]
    fn test_completion_stops_timer() {
        let mut engine = easy_game();
        let mut by_icon: HashMap<&str, Vec<CardId>> = HashMap::new();
        for card in engine.cards() {
            by_icon.entry(card.icon).or_default().push(card.id);
        }
        engine.tick(); // 尚未开始计时
        let pairs: Vec<Vec<CardId>> = by_icon.into_values().collect();
        let mut last = FlipOutcome::Ignored;
        for pair in &pairs {
            engine.flip(pair[0]);
            engine.tick();
            last = engine.flip(pair[1]);
        }
        let expected = GameComplete { moves: 6, elapsed_seconds: 6 };
        assert_eq!(last, FlipOutcome::Completed(expected));
        assert!(engine.is_finished());
        engine.tick();
        assert_eq!(engine.completion(), Some(expected));
        assert_eq!(engine.timer().elapsed_seconds(), 6);
    }

    #[test]
    fn test_change_theme_returns_to_selection() {
        let mut engine = easy_game();
        engine.flip(0);
        engine.change_theme();
        assert!(engine.is_loading());
        assert!(engine.cards().is_empty());
        assert_eq!(engine.restart(), None);
        assert!(engine.cards().is_empty());
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("emojis".parse::<Theme>(), Ok(Theme::Fruits));
        assert_eq!("fruits".parse::<Theme>(), Ok(Theme::Fruits));
        assert_eq!("hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!(Theme::ALL.iter().all(|t| t.icons().len() == 12));
    }
}
