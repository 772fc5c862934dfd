use crate::anagram::AnagramAssemblyEngine;
use crate::content::{Content, ContentError, ContentRequest, Locale, QuizCategory, SudokuLevel};
use crate::deferred::Ticket;
use crate::i18n::Translations;
use crate::memory::MemoryMatchEngine;
use crate::quiz::ChoiceQuizSession;
use crate::session::GameSession;
use crate::sudoku::GridEditSession;
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

/// 菜单上的六个游戏
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Sudoku,
    Memory,
    Plates,
    Capitals,
    Cities,
    Words,
}

impl GameKind {
    pub const ALL: [GameKind; 6] =
        [GameKind::Sudoku, GameKind::Memory, GameKind::Plates, GameKind::Capitals, GameKind::Cities, GameKind::Words];

    pub fn key(&self) -> &'static str {
        match self {
            GameKind::Sudoku => "sudoku",
            GameKind::Memory => "memory",
            GameKind::Plates => "plates",
            GameKind::Capitals => "capitals",
            GameKind::Cities => "cities",
            GameKind::Words => "words",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GameKind::Sudoku => "🔢",
            GameKind::Memory => "🃏",
            GameKind::Plates => "🚗",
            GameKind::Capitals => "🏛️",
            GameKind::Cities => "🌍",
            GameKind::Words => "📝",
        }
    }

    pub fn quiz_category(&self) -> Option<QuizCategory> {
        match self {
            GameKind::Plates => Some(QuizCategory::Plates),
            GameKind::Capitals => Some(QuizCategory::Capitals),
            GameKind::Cities => Some(QuizCategory::Cities),
            _ => None,
        }
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL.into_iter().find(|k| k.key() == s).ok_or_else(|| format!("unknown game: {s}"))
    }
}

/// 当前正在进行的游戏，同一时间只有一个
#[enum_dispatch(GameSession)]
#[derive(Debug, Clone)]
pub enum ActiveGame {
    Quiz(ChoiceQuizSession),
    Memory(MemoryMatchEngine),
    Anagram(AnagramAssemblyEngine),
    Sudoku(GridEditSession),
}

/// 内容投递的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    /// 内容与当前游戏不符（玩家已经离开），丢弃
    Stale,
    Rejected(ContentError),
}

/// 编排器：选择并持有一个游戏会话，提供"返回菜单"的边界
///
/// 当前语言在构造时注入每个会话；语言变更时按 `set_locale` 的约定重新加载。
#[derive(Debug, Clone)]
pub struct Arcade {
    locale: Locale,
    translations: Translations,
    current: Option<GameKind>,
    active: Option<ActiveGame>,
}

impl Arcade {
    pub fn new(locale: Locale) -> Self {
        Self { locale, translations: Translations::builtin(locale), current: None, active: None }
    }

    /// 进入一个游戏，返回需要获取的内容
    ///
    /// 记忆翻牌还需要选择主题和难度，数独还需要选择难度（见 `start_sudoku`）。
    pub fn select(&mut self, kind: GameKind) -> Option<ContentRequest> {
        self.current = Some(kind);
        let (game, request): (Option<ActiveGame>, _) = match kind {
            GameKind::Plates | GameKind::Capitals | GameKind::Cities => {
                let category = kind.quiz_category()?;
                let session = ChoiceQuizSession::new(category, self.locale);
                let request = session.request();
                (Some(session.into()), Some(request))
            }
            GameKind::Words => {
                let engine = AnagramAssemblyEngine::new(self.locale);
                let request = engine.request();
                (Some(engine.into()), Some(request))
            }
            GameKind::Memory => (Some(MemoryMatchEngine::new().into()), None),
            GameKind::Sudoku => (None, None),
        };
        self.active = game;
        info!("进入游戏 {}", kind.key());
        request
    }

    /// 数独难度选定后开始获取题目
    pub fn start_sudoku(&mut self, level: SudokuLevel) -> Option<ContentRequest> {
        if self.current != Some(GameKind::Sudoku) {
            return None;
        }
        let mut session = GridEditSession::new(level);
        let request = session.new_puzzle(level);
        self.active = Some(session.into());
        Some(request)
    }

    /// 丢弃当前会话（连同其计时器与未决的延迟动作）
    pub fn back_to_menu(&mut self) {
        if let Some(kind) = self.current.take() {
            debug!("离开游戏 {}", kind.key());
        }
        self.active = None;
    }

    /// 把获取到的内容交给当前会话
    pub fn deliver(&mut self, content: Content) -> Delivery {
        let result = match (content, self.active.as_mut()) {
            (Content::Translations { locale, entries }, _) => {
                if locale != self.locale {
                    return Delivery::Stale;
                }
                self.translations = Translations::new(locale, entries);
                Ok(())
            }
            (Content::Questions { category, questions }, Some(ActiveGame::Quiz(session)))
                if session.category() == category =>
            {
                session.load(questions)
            }
            (Content::Challenges(challenges), Some(ActiveGame::Anagram(engine))) => engine.load_challenges(challenges),
            (Content::Sudoku { level, puzzle }, Some(ActiveGame::Sudoku(session))) if session.level() == level => {
                session.load(puzzle)
            }
            (content, _) => {
                debug!("丢弃与当前游戏不符的内容: {:?}", std::mem::discriminant(&content));
                return Delivery::Stale;
            }
        };
        match result {
            Ok(()) => Delivery::Applied,
            Err(e) => Delivery::Rejected(e),
        }
    }

    /// 切换语言
    ///
    /// 总是重新请求翻译；正在进行的选择题 / 拼词会话按新语言重建并重新请求内容。
    pub fn set_locale(&mut self, locale: Locale) -> Vec<ContentRequest> {
        if locale == self.locale {
            return Vec::new();
        }
        self.locale = locale;
        self.translations = Translations::builtin(locale);
        let mut requests = vec![ContentRequest::Translations { locale }];

        let rebuilt: Option<ActiveGame> = match &self.active {
            Some(ActiveGame::Quiz(session)) => Some(ChoiceQuizSession::new(session.category(), locale).into()),
            Some(ActiveGame::Anagram(_)) => Some(AnagramAssemblyEngine::new(locale).into()),
            _ => None,
        };
        if let Some(game) = rebuilt {
            requests.extend(game.content_request());
            self.active = Some(game);
        }
        requests
    }

    /// 当前游戏从头再来
    pub fn restart(&mut self) -> Option<ContentRequest> {
        self.active.as_mut()?.restart()
    }

    pub fn tick(&mut self) {
        if let Some(game) = self.active.as_mut() {
            game.tick();
        }
    }

    pub fn resolve(&mut self, ticket: Ticket) {
        match self.active.as_mut() {
            Some(game) => game.resolve(ticket),
            None => debug!("没有进行中的游戏，忽略延迟动作 {:?}", ticket),
        }
    }

    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.lookup(key)
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn current(&self) -> Option<GameKind> {
        self.current
    }

    pub fn active(&self) -> Option<&ActiveGame> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveGame> {
        self.active.as_mut()
    }
}

impl ActiveGame {
    /// 该会话当前需要的远程内容
    pub fn content_request(&self) -> Option<ContentRequest> {
        match self {
            ActiveGame::Quiz(session) => Some(session.request()),
            ActiveGame::Anagram(engine) => Some(engine.request()),
            ActiveGame::Sudoku(session) => Some(session.request()),
            ActiveGame::Memory(_) => None,
        }
    }
}
