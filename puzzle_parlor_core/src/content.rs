use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// --- 内容数据结构 ---
// 字段名与内容服务端的 JSON 格式保持一致

/// 选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// 拼词挑战
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub scrambled_word: String,
    pub correct_word: String,
}

/// 9x9 数独盘面，0 表示空格
pub type Grid = [[u8; 9]; 9];

pub const EMPTY_GRID: Grid = [[0; 9]; 9];

/// 题面 + 答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SudokuPuzzle {
    pub puzzle: Grid,
    pub solution: Grid,
}

// --- 分类 / 难度 / 语言 ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizCategory {
    Plates,   // 车牌
    Capitals, // 首都
    Cities,   // 城市
}

impl QuizCategory {
    pub const ALL: [QuizCategory; 3] = [QuizCategory::Plates, QuizCategory::Capitals, QuizCategory::Cities];

    pub fn key(&self) -> &'static str {
        match self {
            QuizCategory::Plates => "plates",
            QuizCategory::Capitals => "capitals",
            QuizCategory::Cities => "cities",
        }
    }
}

/// 数独难度，序列化名沿用服务端的接口
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SudokuLevel {
    #[serde(rename = "cocuk")]
    Children,
    #[serde(rename = "kolay")]
    Easy,
    #[serde(rename = "orta")]
    Medium,
    #[serde(rename = "zor")]
    Hard,
}

impl SudokuLevel {
    pub const ALL: [SudokuLevel; 4] = [SudokuLevel::Children, SudokuLevel::Easy, SudokuLevel::Medium, SudokuLevel::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            SudokuLevel::Children => "cocuk",
            SudokuLevel::Easy => "kolay",
            SudokuLevel::Medium => "orta",
            SudokuLevel::Hard => "zor",
        }
    }

    /// 翻译表中对应的键
    pub fn key(&self) -> &'static str {
        match self {
            SudokuLevel::Children => "children",
            SudokuLevel::Easy => "easy",
            SudokuLevel::Medium => "medium",
            SudokuLevel::Hard => "hard",
        }
    }
}

impl FromStr for SudokuLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SudokuLevel::ALL
            .into_iter()
            .find(|l| l.label() == s || l.key() == s)
            .ok_or_else(|| format!("unknown sudoku level: {s}"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }

    /// 语言切换按钮：tr <-> en
    pub fn toggled(&self) -> Locale {
        match self {
            Locale::Tr => Locale::En,
            Locale::En => Locale::Tr,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tr" => Ok(Locale::Tr),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

// --- 内容请求与投递 ---

/// 引擎需要从内容服务获取的东西。传输方式由上层决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentRequest {
    Questions { category: QuizCategory, locale: Locale },
    Challenges { locale: Locale },
    Sudoku { level: SudokuLevel },
    Translations { locale: Locale },
}

/// 获取到的内容，交给编排器分发
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Questions { category: QuizCategory, questions: Vec<Question> },
    Challenges(Vec<Challenge>),
    Sudoku { level: SudokuLevel, puzzle: SudokuPuzzle },
    Translations { locale: Locale, entries: HashMap<String, String> },
}

// --- 内容校验 ---

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("content source returned no items")]
    Empty,
    #[error("question {index} is malformed: {reason}")]
    MalformedQuestion { index: usize, reason: &'static str },
    #[error("challenge {index} is malformed: scrambled letters do not match the word")]
    MalformedChallenge { index: usize },
    #[error("sudoku grid is malformed: {0}")]
    MalformedGrid(&'static str),
}

impl Question {
    pub fn validate(&self, index: usize) -> Result<(), ContentError> {
        if self.options.is_empty() {
            return Err(ContentError::MalformedQuestion { index, reason: "no options" });
        }
        if !self.options.contains(&self.correct_answer) {
            return Err(ContentError::MalformedQuestion { index, reason: "correct answer is not an option" });
        }
        let mut seen = self.options.clone();
        seen.sort();
        seen.dedup();
        if seen.len() != self.options.len() {
            return Err(ContentError::MalformedQuestion { index, reason: "duplicate options" });
        }
        Ok(())
    }
}

impl Challenge {
    pub fn validate(&self, index: usize) -> Result<(), ContentError> {
        if self.scrambled_word.is_empty() || !is_permutation(&self.scrambled_word, &self.correct_word) {
            return Err(ContentError::MalformedChallenge { index });
        }
        Ok(())
    }
}

impl SudokuPuzzle {
    pub fn validate(&self) -> Result<(), ContentError> {
        for row in 0..9 {
            for col in 0..9 {
                let given = self.puzzle[row][col];
                let answer = self.solution[row][col];
                if given > 9 || answer > 9 {
                    return Err(ContentError::MalformedGrid("cell value out of range"));
                }
                if answer == 0 {
                    return Err(ContentError::MalformedGrid("solution has empty cells"));
                }
                if given != 0 && given != answer {
                    return Err(ContentError::MalformedGrid("given cell disagrees with solution"));
                }
            }
        }
        Ok(())
    }
}

/// 两个字符串的字符多重集是否相同
pub fn is_permutation(a: &str, b: &str) -> bool {
    let mut a: Vec<char> = a.chars().collect();
    let mut b: Vec<char> = b.chars().collect();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}
