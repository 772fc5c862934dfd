use std::str::FromStr;

use puzzle_parlor_core::{Difficulty, GameKind, Locale, SudokuLevel, Theme};

/// 用户在终端输入的一条命令。界面上的编号从 1 开始，这里已换算成下标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(GameKind),
    Answer(usize),
    Flip(usize),
    Pick(usize),
    Drop(usize),
    Undo(usize),
    Submit,
    Set { row: usize, col: usize, value: u8 },
    Clear { row: usize, col: usize },
    Check,
    Reveal,
    Restart,
    Theme,
    Memory { theme: Theme, difficulty: Difficulty },
    New(SudokuLevel),
    Lang(Locale),
    Menu,
    Help,
    Quit,
}

pub const HELP: &str = "\
命令:
  play <sudoku|memory|plates|capitals|cities|words>   进入游戏
  answer <n>                 选择第 n 个选项
  memory <主题> <easy|medium|hard>   开始翻牌 (主题: fruits animals sports vehicles hearts)
  flip <n>                   翻开第 n 张牌
  theme                      重新选择主题和难度
  pick <n>                   选用第 n 个字母块
  drop <n>                   把第 n 个字母块拖到答案区
  undo <pos>                 移除已拼出的第 pos 个字母
  submit                     提交单词
  new <cocuk|kolay|orta|zor> 新的数独
  set <行> <列> <值>         填数 (1-9)
  clear <行> <列>            清空格子
  check | reveal             检查 / 显示答案
  restart                    从头再来
  lang <tr|en>               切换语言
  menu | help | quit";

/// 把 1 开始的编号换成下标
fn index_arg(arg: Option<&str>, name: &str) -> Result<usize, String> {
    let raw = arg.ok_or_else(|| format!("缺少参数 <{name}>"))?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("无效的 <{name}>: {raw}")),
    }
}

fn parsed_arg<T: FromStr<Err = String>>(arg: Option<&str>, name: &str) -> Result<T, String> {
    arg.ok_or_else(|| format!("缺少参数 <{name}>"))?.parse()
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            return Err("请输入命令，help 查看帮助".to_string());
        };
        let command = command.to_ascii_lowercase();

        let parsed = match command.as_str() {
            "play" => Command::Play(parsed_arg(parts.next(), "game")?),
            "answer" | "a" => Command::Answer(index_arg(parts.next(), "n")?),
            "flip" | "f" => Command::Flip(index_arg(parts.next(), "n")?),
            "pick" | "p" => Command::Pick(index_arg(parts.next(), "n")?),
            "drop" => Command::Drop(index_arg(parts.next(), "n")?),
            "undo" => Command::Undo(index_arg(parts.next(), "pos")?),
            "submit" => Command::Submit,
            "set" => {
                let row = index_arg(parts.next(), "row")?;
                let col = index_arg(parts.next(), "col")?;
                let raw = parts.next().ok_or("缺少参数 <value>")?;
                let value = match raw.parse::<u8>() {
                    Ok(v @ 1..=9) => v,
                    _ => return Err(format!("数值必须在 1 到 9 之间: {raw}")),
                };
                Command::Set { row, col, value }
            }
            "clear" => Command::Clear { row: index_arg(parts.next(), "row")?, col: index_arg(parts.next(), "col")? },
            "check" => Command::Check,
            "reveal" => Command::Reveal,
            "restart" => Command::Restart,
            "theme" => Command::Theme,
            "memory" => Command::Memory {
                theme: parsed_arg(parts.next(), "theme")?,
                difficulty: parsed_arg(parts.next(), "difficulty")?,
            },
            "new" => Command::New(parsed_arg(parts.next(), "level")?),
            "lang" => Command::Lang(parsed_arg(parts.next(), "tr|en")?),
            "menu" | "back" => Command::Menu,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("未知命令: {other}")),
        };

        if let Some(extra) = parts.next() {
            return Err(format!("多余的参数: {extra}"));
        }
        Ok(parsed)
    }
}
