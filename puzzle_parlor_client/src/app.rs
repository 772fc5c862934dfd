use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use puzzle_parlor_core::*;

use crate::commands::{Command, HELP};

/// 处理完一条命令后主循环该做什么
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// 客户端运行时：持有编排器，把内容请求变成线上消息，把延迟动作变成定时任务
pub struct App {
    arcade: Arcade,
    // 已发出、尚未收到响应的请求
    pending: HashMap<RequestId, ContentRequest>,
    outbox: Vec<ClientMessage>,
    tickets: mpsc::UnboundedSender<Ticket>,
    notice: Option<String>,
}

impl App {
    pub fn new(locale: Locale, tickets: mpsc::UnboundedSender<Ticket>) -> Self {
        let mut app = Self {
            arcade: Arcade::new(locale),
            pending: HashMap::new(),
            outbox: Vec::new(),
            tickets,
            notice: None,
        };
        // 先用内置翻译，远程的到了再替换
        app.request(ContentRequest::Translations { locale });
        app
    }

    pub fn arcade(&self) -> &Arcade {
        &self.arcade
    }

    pub fn take_outbox(&mut self) -> Vec<ClientMessage> {
        std::mem::take(&mut self.outbox)
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn notify(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    pub fn tick(&mut self) {
        self.arcade.tick();
    }

    pub fn resolve(&mut self, ticket: Ticket) {
        self.arcade.resolve(ticket);
    }

    fn request(&mut self, request: ContentRequest) {
        let msg = ClientMessage::for_request(request);
        self.pending.insert(msg.request_id(), request);
        self.outbox.push(msg);
    }

    /// 离开或重建游戏时，旧游戏的内容请求作废；翻译请求保留
    fn forget_game_requests(&mut self) {
        self.pending.retain(|_, request| matches!(request, ContentRequest::Translations { .. }));
    }

    /// 到期后把 Ticket 送回主循环
    fn schedule(&self, deferred: Deferred) {
        let tickets = self.tickets.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deferred.delay).await;
            let _ = tickets.send(deferred.ticket);
        });
    }

    fn not_here(&mut self) {
        self.notify("当前界面不支持该命令".to_string());
    }

    pub fn handle_command(&mut self, command: Command) -> Flow {
        match command {
            Command::Play(kind) => {
                self.forget_game_requests();
                if let Some(request) = self.arcade.select(kind) {
                    self.request(request);
                }
            }
            Command::Menu => {
                self.forget_game_requests();
                self.arcade.back_to_menu();
            }
            Command::Restart => {
                self.forget_game_requests();
                if let Some(request) = self.arcade.restart() {
                    self.request(request);
                }
            }
            Command::New(level) => match self.arcade.start_sudoku(level) {
                Some(request) => {
                    self.forget_game_requests();
                    self.request(request);
                }
                None => self.not_here(),
            },
            Command::Lang(locale) => {
                let requests = self.arcade.set_locale(locale);
                // 只有会话真的按新语言重建了，旧的内容请求才作废
                if requests.iter().any(|r| !matches!(r, ContentRequest::Translations { .. })) {
                    self.forget_game_requests();
                }
                for request in requests {
                    self.request(request);
                }
            }
            Command::Help => self.notice = Some(HELP.to_string()),
            Command::Quit => return Flow::Quit,
            other => self.game_command(other),
        }
        Flow::Continue
    }

    /// 只作用于当前会话的命令；不适用时给出提示
    fn game_command(&mut self, command: Command) {
        let deferred = match (command, self.arcade.active_mut()) {
            (Command::Answer(i), Some(ActiveGame::Quiz(session))) => {
                let choice = session.current_question().and_then(|q| q.options.get(i).cloned());
                choice.and_then(|choice| session.submit_answer(&choice))
            }
            (Command::Flip(i), Some(ActiveGame::Memory(engine))) => match engine.flip(i) {
                FlipOutcome::Mismatched(deferred) => Some(deferred),
                _ => None,
            },
            (Command::Theme, Some(ActiveGame::Memory(engine))) => {
                engine.change_theme();
                None
            }
            (Command::Memory { theme, difficulty }, Some(ActiveGame::Memory(engine))) => {
                engine.new_game(theme, difficulty);
                None
            }
            (Command::Pick(i), Some(ActiveGame::Anagram(engine))) => {
                engine.select_tile(i);
                None
            }
            (Command::Drop(i), Some(ActiveGame::Anagram(engine))) => {
                engine.drop_tile(i);
                None
            }
            (Command::Undo(pos), Some(ActiveGame::Anagram(engine))) => {
                engine.deselect_at(pos);
                None
            }
            (Command::Submit, Some(ActiveGame::Anagram(engine))) => engine.submit(),
            (Command::Set { row, col, value }, Some(ActiveGame::Sudoku(session))) => {
                session.set_cell(row, col, value);
                None
            }
            (Command::Clear { row, col }, Some(ActiveGame::Sudoku(session))) => {
                session.clear_cell(row, col);
                None
            }
            (Command::Check, Some(ActiveGame::Sudoku(session))) => {
                if session.check() == CheckOutcome::Mismatch {
                    self.notice = Some(format!("✗ {}", self.arcade.t("wrong")));
                }
                None
            }
            (Command::Reveal, Some(ActiveGame::Sudoku(session))) => {
                session.reveal();
                None
            }
            _ => {
                self.not_here();
                None
            }
        };
        if let Some(deferred) = deferred {
            self.schedule(deferred);
        }
    }

    /// 处理服务器的一条文本消息
    pub fn handle_server_text(&mut self, text: &str) {
        match serde_json::from_str::<ServerMessage>(text) {
            Ok(msg) => self.handle_server_message(msg),
            Err(e) => warn!("解析服务器消息失败: {}", e),
        }
    }

    pub fn handle_server_message(&mut self, msg: ServerMessage) {
        let Some(request_id) = msg.request_id() else {
            warn!("服务器报告错误: {:?}", msg);
            return;
        };
        if self.pending.remove(&request_id).is_none() {
            debug!("忽略已作废的响应 {}", request_id);
            return;
        }
        let content = match msg.into_content() {
            Ok(content) => content,
            Err(message) => {
                warn!("内容获取失败: {}", message);
                self.notice = Some(message);
                return;
            }
        };
        match self.arcade.deliver(content) {
            Delivery::Applied => {}
            Delivery::Stale => debug!("内容已过期，丢弃"),
            Delivery::Rejected(e) => {
                warn!("内容无效: {}", e);
                self.notice = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        App::new(Locale::En, tx)
    }

    fn question(prompt: &str) -> Question {
        Question {
            prompt: prompt.to_string(),
            options: vec!["Ankara".to_string(), "Paris".to_string()],
            correct_answer: "Ankara".to_string(),
        }
    }

    fn answer_to(request: &ClientMessage) -> ServerMessage {
        ServerMessage::Questions {
            request_id: request.request_id(),
            category: QuizCategory::Capitals,
            questions: vec![question("Türkiye")],
        }
    }

    #[test]
    fn test_startup_requests_translations() {
        let mut app = app();
        let outbox = app.take_outbox();
        assert_eq!(outbox.len(), 1);
        assert!(matches!(outbox[0], ClientMessage::FetchTranslations { locale: Locale::En, .. }));
    }

    #[test]
    fn test_response_is_delivered_to_selected_game() {
        let mut app = app();
        app.handle_command(Command::Play(GameKind::Capitals));
        let request = app.take_outbox().pop().unwrap();
        app.handle_server_message(answer_to(&request));
        let Some(ActiveGame::Quiz(session)) = app.arcade().active() else {
            panic!("expected quiz");
        };
        assert_eq!(session.total(), 1);
    }

    #[test]
    fn test_response_after_leaving_is_ignored() {
        let mut app = app();
        app.handle_command(Command::Play(GameKind::Capitals));
        let request = app.take_outbox().pop().unwrap();
        app.handle_command(Command::Menu);
        app.handle_command(Command::Play(GameKind::Capitals));
        app.handle_server_message(answer_to(&request));
        let Some(ActiveGame::Quiz(session)) = app.arcade().active() else {
            panic!("expected quiz");
        };
        assert!(session.is_loading());
    }

    #[test]
    fn test_remote_translations_replace_builtin() {
        let mut app = app();
        let request = app.take_outbox().pop().unwrap();
        let entries = HashMap::from([("score".to_string(), "Points".to_string())]);
        app.handle_server_message(ServerMessage::Translations {
            request_id: request.request_id(),
            locale: Locale::En,
            entries,
        });
        assert_eq!(app.arcade().t("score"), "Points");
    }

    #[test]
    fn test_same_language_keeps_pending_content() {
        let mut app = app();
        app.handle_command(Command::Play(GameKind::Capitals));
        let request = app.take_outbox().pop().unwrap();
        app.handle_command(Command::Lang(Locale::En));
        assert!(app.take_outbox().is_empty());

        app.handle_server_message(answer_to(&request));
        let Some(ActiveGame::Quiz(session)) = app.arcade().active() else {
            panic!("expected quiz");
        };
        assert!(!session.is_loading());
    }

    #[test]
    fn test_language_switch_keeps_sudoku_request() {
        let mut app = app();
        app.handle_command(Command::Play(GameKind::Sudoku));
        app.handle_command(Command::New(SudokuLevel::Easy));
        let request = app.take_outbox().pop().unwrap();
        app.handle_command(Command::Lang(Locale::Tr));

        let mut puzzle = [[0u8; 9]; 9];
        let solution: Grid = std::array::from_fn(|r| std::array::from_fn(|c| ((r * 3 + r / 3 + c) % 9 + 1) as u8));
        puzzle[0] = solution[0];
        app.handle_server_message(ServerMessage::Sudoku {
            request_id: request.request_id(),
            level: SudokuLevel::Easy,
            puzzle: SudokuPuzzle { puzzle, solution },
        });
        assert!(!app.arcade().active().unwrap().is_loading());
    }

    #[test]
    fn test_new_level_outside_sudoku_keeps_pending_content() {
        let mut app = app();
        app.handle_command(Command::Play(GameKind::Capitals));
        let request = app.take_outbox().pop().unwrap();
        app.handle_command(Command::New(SudokuLevel::Easy));
        assert!(app.take_notice().is_some());
        assert!(app.take_outbox().is_empty());

        app.handle_server_message(answer_to(&request));
        let Some(ActiveGame::Quiz(session)) = app.arcade().active() else {
            panic!("expected quiz");
        };
        assert!(!session.is_loading());
    }

    #[test]
    fn test_misplaced_command_sets_notice() {
        let mut app = app();
        assert_eq!(app.handle_command(Command::Flip(0)), Flow::Continue);
        assert!(app.take_notice().is_some());
        assert_eq!(app.handle_command(Command::Quit), Flow::Quit);
    }
}
