//! # 益智小游戏核心库
//!
//! 这个 `core` crate 包含了四个小游戏（选择题、记忆翻牌、拼词、数独）的
//! 会话状态机、共用的计时器与进度、延迟动作、内容数据结构，
//! 以及客户端与内容服务之间的通信消息定义。
//! 它不关心网络传输和界面渲染，可以被任何上层应用复用。

mod content;
mod deferred;
mod i18n;
mod message;
mod progress;
mod session;
mod timer;

mod anagram;
mod memory;
mod quiz;
mod sudoku;

mod arcade;

pub use content::*;
pub use deferred::*;
pub use i18n::*;
pub use message::*;
pub use progress::*;
pub use session::*;
pub use timer::*;

pub use anagram::*;
pub use memory::*;
pub use quiz::*;
pub use sudoku::*;

pub use arcade::*;
