use std::io::Write;

use anyhow::{Context, Result};
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use futures_util::{SinkExt, StreamExt};
use pico_args::Arguments;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use url::Url;

use puzzle_parlor_core::Locale;

mod app;
mod commands;
mod render;

use app::{App, Flow};
use commands::Command;

const HELP: &str = "\
Puzzle parlor terminal client

USAGE:
  puzzle_parlor_client [OPTIONS]

OPTIONS:
  --server URL          Content server   [env: PARLOR_SERVER, default: ws://127.0.0.1:25917/ws]
  --lang tr|en          Interface language (asked at startup when omitted)

FLAGS:
  -h, --help            Print help information
";

const DEFAULT_SERVER: &str = "ws://127.0.0.1:25917/ws";

struct Config {
    server: Url,
    lang: Option<Locale>,
}

impl Config {
    fn from_args() -> Result<Self> {
        let mut pargs = Arguments::from_env();
        if pargs.contains(["-h", "--help"]) {
            print!("{HELP}");
            std::process::exit(0);
        }

        let server: String = match pargs.opt_value_from_str("--server")? {
            Some(server) => server,
            None => std::env::var("PARLOR_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string()),
        };
        let server = Url::parse(&server).with_context(|| format!("无效的服务器地址: {server}"))?;
        let lang = pargs.opt_value_from_fn("--lang", |s| s.parse::<Locale>())?;

        Ok(Self { server, lang })
    }
}

type Lines = tokio::io::Lines<BufReader<tokio::io::Stdin>>;

/// 没有指定语言时先让用户选一个
async fn choose_language(stdin: &mut Lines) -> Result<Locale> {
    loop {
        print!("{}> ", render::language_selector());
        std::io::stdout().flush()?;
        let Some(line) = stdin.next_line().await? else {
            return Ok(Locale::default());
        };
        match line.trim() {
            "1" => return Ok(Locale::Tr),
            "2" => return Ok(Locale::En),
            other => match other.trim_start_matches("lang").trim().parse() {
                Ok(locale) => return Ok(locale),
                Err(e) => println!("{e}"),
            },
        }
    }
}

fn redraw(app: &mut App) -> Result<()> {
    let mut stdout = std::io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    print!("{}", render::screen(app.arcade()));
    if let Some(notice) = app.take_notice() {
        println!("\n{notice}");
    }
    print!("\n> ");
    stdout.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // 日志写到 stderr，不和棋盘混在一起
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = Config::from_args()?;
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let locale = match config.lang {
        Some(locale) => locale,
        None => choose_language(&mut stdin).await?,
    };

    println!("正在连接到: {}", config.server);
    let (ws_stream, _) = connect_async(config.server.as_str())
        .await
        .with_context(|| format!("无法连接 {}", config.server))?;
    let (mut write, mut read) = ws_stream.split();

    let (ticket_tx, mut ticket_rx) = mpsc::unbounded_channel();
    let mut app = App::new(locale, ticket_tx);
    let mut ticker = tokio::time::interval(std::time::Duration::from_secs(1));

    redraw(&mut app)?;
    loop {
        for msg in app.take_outbox() {
            let payload = serde_json::to_string(&msg)?;
            write.send(Message::Text(payload.into())).await.context("发送请求失败")?;
        }

        tokio::select! {
            line = stdin.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    redraw(&mut app)?;
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if app.handle_command(command) == Flow::Quit {
                            break;
                        }
                    }
                    Err(e) => app.notify(e),
                }
                redraw(&mut app)?;
            }
            msg = read.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    app.handle_server_text(&text);
                    redraw(&mut app)?;
                }
                Some(Ok(Message::Close(_))) | None => {
                    warn!("服务器关闭了连接");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("接收消息时出错"),
            },
            Some(ticket) = ticket_rx.recv() => {
                app.resolve(ticket);
                redraw(&mut app)?;
            }
            _ = ticker.tick() => app.tick(),
        }
    }

    println!("正在断开连接...");
    let _ = write.close().await;
    Ok(())
}
