use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::IntoResponse,
    routing::get,
    Router,
};
use futures_util::{stream::StreamExt, SinkExt};
use pico_args::Arguments;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use puzzle_parlor_core::{ClientMessage, ServerMessage};

mod catalog;
mod sudoku;
mod translations;

const HELP: &str = "\
Puzzle parlor content server

USAGE:
  puzzle_parlor_server [OPTIONS]

OPTIONS:
  --bind ADDR           Listen address   [env: PARLOR_BIND, default: 0.0.0.0:25917]
  --questions N         Items per quiz / word request  [default: 10]

FLAGS:
  -h, --help            Print help information
";

const DEFAULT_BIND: &str = "0.0.0.0:25917";

struct Config {
    bind: SocketAddr,
    item_count: usize,
}

impl Config {
    fn from_args() -> Result<Self> {
        let mut pargs = Arguments::from_env();
        if pargs.contains(["-h", "--help"]) {
            print!("{HELP}");
            std::process::exit(0);
        }

        let bind: String = match pargs.opt_value_from_str("--bind")? {
            Some(bind) => bind,
            None => std::env::var("PARLOR_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
        };
        let bind = bind.parse().with_context(|| format!("无效的监听地址: {bind}"))?;
        let item_count = pargs.opt_value_from_str("--questions")?.unwrap_or(10);

        Ok(Self { bind, item_count })
    }
}

// 服务器全局状态：内容都是按请求现场生成的，这里只有配置
struct AppState {
    item_count: usize,
}

type SharedState = Arc<AppState>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_args()?;
    let state = SharedState::new(AppState { item_count: config.item_count });

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("无法监听 {}", config.bind))?;
    info!("服务器正在监听 {}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}

/// 处理 WebSocket 连接请求
async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// 处理单个 WebSocket 连接的生命周期
async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut sender, mut receiver) = socket.split();

    // 创建一个 MPSC 通道，发送任务专门负责把响应写回 WebSocket
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(32);

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let payload = match serde_json::to_string(&msg) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("序列化响应失败: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(payload.into())).await.is_err() {
                // 发送失败，说明客户端已断开
                break;
            }
        }
    });

    info!("客户端已连接");
    while let Some(Ok(msg)) = receiver.next().await {
        let Message::Text(text) = msg else {
            continue;
        };
        let response = match serde_json::from_str::<ClientMessage>(&text) {
            Ok(client_msg) => handle_client_message(client_msg, &state),
            Err(e) => {
                warn!("解析消息失败: {}", e);
                ServerMessage::Error { request_id: None, message: format!("invalid request: {e}") }
            }
        };
        if tx.send(response).await.is_err() {
            break;
        }
    }
    info!("客户端连接关闭");
}

/// 一条请求对应一条响应
fn handle_client_message(msg: ClientMessage, state: &AppState) -> ServerMessage {
    let mut rng = rand::rng();
    match msg {
        ClientMessage::FetchQuestions { request_id, category, locale } => {
            debug!("题目请求 {:?} {} ({})", category, locale, request_id);
            let questions = catalog::sample_questions(category, locale, state.item_count, &mut rng);
            ServerMessage::Questions { request_id, category, questions }
        }
        ClientMessage::FetchChallenges { request_id, locale } => {
            debug!("拼词请求 {} ({})", locale, request_id);
            let challenges = catalog::sample_challenges(locale, state.item_count, &mut rng);
            ServerMessage::Challenges { request_id, challenges }
        }
        ClientMessage::FetchSudoku { request_id, level } => {
            debug!("数独请求 {} ({})", level.label(), request_id);
            let puzzle = sudoku::make_puzzle(level, &mut rng);
            ServerMessage::Sudoku { request_id, level, puzzle }
        }
        ClientMessage::FetchTranslations { request_id, locale } => {
            debug!("翻译请求 {} ({})", locale, request_id);
            ServerMessage::Translations { request_id, locale, entries: translations::translations(locale) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_parlor_core::{Locale, QuizCategory, SudokuLevel};
    use uuid::Uuid;

    fn state() -> AppState {
        AppState { item_count: 5 }
    }

    #[test]
    fn test_response_echoes_request_id() {
        let msg = ClientMessage::FetchQuestions {
            request_id: Uuid::new_v4(),
            category: QuizCategory::Cities,
            locale: Locale::En,
        };
        let id = msg.request_id();
        let response = handle_client_message(msg, &state());
        assert_eq!(response.request_id(), Some(id));
        let ServerMessage::Questions { questions, category, .. } = response else {
            panic!("expected questions");
        };
        assert_eq!(category, QuizCategory::Cities);
        assert_eq!(questions.len(), 5);
    }

    #[test]
    fn test_sudoku_response_keeps_level() {
        let msg = ClientMessage::FetchSudoku { request_id: Uuid::new_v4(), level: SudokuLevel::Hard };
        let ServerMessage::Sudoku { level, puzzle, .. } = handle_client_message(msg, &state()) else {
            panic!("expected sudoku");
        };
        assert_eq!(level, SudokuLevel::Hard);
        assert!(puzzle.validate().is_ok());
    }

    #[test]
    fn test_translations_response() {
        let msg = ClientMessage::FetchTranslations { request_id: Uuid::nil(), locale: Locale::Tr };
        let ServerMessage::Translations { entries, locale, .. } = handle_client_message(msg, &state()) else {
            panic!("expected translations");
        };
        assert_eq!(locale, Locale::Tr);
        assert_eq!(entries["score"], "Puan");
    }
}
