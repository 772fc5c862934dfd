use crate::content::{Challenge, Content, ContentRequest, Locale, Question, QuizCategory, SudokuLevel, SudokuPuzzle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// 用于把响应与请求对应起来
pub type RequestId = Uuid;

// --- 客户端 -> 服务器 的消息 ---
// 每条请求恰好对应一条响应。

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// 获取一组选择题
    FetchQuestions { request_id: RequestId, category: QuizCategory, locale: Locale },
    /// 获取一组拼词挑战
    FetchChallenges { request_id: RequestId, locale: Locale },
    /// 获取一道数独（题面 + 答案）
    FetchSudoku { request_id: RequestId, level: SudokuLevel },
    /// 获取界面翻译
    FetchTranslations { request_id: RequestId, locale: Locale },
}

// --- 服务器 -> 客户端 的消息 ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Questions { request_id: RequestId, category: QuizCategory, questions: Vec<Question> },
    Challenges { request_id: RequestId, challenges: Vec<Challenge> },
    Sudoku { request_id: RequestId, level: SudokuLevel, puzzle: SudokuPuzzle },
    Translations { request_id: RequestId, locale: Locale, entries: HashMap<String, String> },
    /// 请求无法满足；无法解析的请求没有 request_id
    Error { request_id: Option<RequestId>, message: String },
}

impl ClientMessage {
    /// 为一个内容请求生成带新 request_id 的消息
    pub fn for_request(request: ContentRequest) -> Self {
        let request_id = Uuid::new_v4();
        match request {
            ContentRequest::Questions { category, locale } => ClientMessage::FetchQuestions { request_id, category, locale },
            ContentRequest::Challenges { locale } => ClientMessage::FetchChallenges { request_id, locale },
            ContentRequest::Sudoku { level } => ClientMessage::FetchSudoku { request_id, level },
            ContentRequest::Translations { locale } => ClientMessage::FetchTranslations { request_id, locale },
        }
    }

    pub fn request_id(&self) -> RequestId {
        match self {
            ClientMessage::FetchQuestions { request_id, .. }
            | ClientMessage::FetchChallenges { request_id, .. }
            | ClientMessage::FetchSudoku { request_id, .. }
            | ClientMessage::FetchTranslations { request_id, .. } => *request_id,
        }
    }
}

impl ServerMessage {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            ServerMessage::Questions { request_id, .. }
            | ServerMessage::Challenges { request_id, .. }
            | ServerMessage::Sudoku { request_id, .. }
            | ServerMessage::Translations { request_id, .. } => Some(*request_id),
            ServerMessage::Error { request_id, .. } => *request_id,
        }
    }

    /// 拆出内容；Error 返回错误信息
    pub fn into_content(self) -> Result<Content, String> {
        match self {
            ServerMessage::Questions { category, questions, .. } => Ok(Content::Questions { category, questions }),
            ServerMessage::Challenges { challenges, .. } => Ok(Content::Challenges(challenges)),
            ServerMessage::Sudoku { level, puzzle, .. } => Ok(Content::Sudoku { level, puzzle }),
            ServerMessage::Translations { locale, entries, .. } => Ok(Content::Translations { locale, entries }),
            ServerMessage::Error { message, .. } => Err(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_request_assigns_fresh_ids() {
        let request = ContentRequest::Challenges { locale: Locale::Tr };
        let a = ClientMessage::for_request(request);
        let b = ClientMessage::for_request(request);
        assert_ne!(a.request_id(), b.request_id());
        assert!(matches!(a, ClientMessage::FetchChallenges { locale: Locale::Tr, .. }));
    }

    #[test]
    fn test_client_message_json_shape() {
        let msg = ClientMessage::FetchSudoku { request_id: Uuid::nil(), level: SudokuLevel::Medium };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.starts_with(r#"{"FetchSudoku""#));
        assert!(json.contains(r#""level":"orta""#));
        assert_eq!(serde_json::from_str::<ClientMessage>(&json).unwrap(), msg);
    }

    #[test]
    fn test_error_into_content() {
        let msg = ServerMessage::Error { request_id: None, message: "unknown".into() };
        assert_eq!(msg.request_id(), None);
        assert_eq!(msg.into_content(), Err("unknown".to_string()));
    }
}
