use crate::content::ContentRequest;
use crate::deferred::Ticket;
use enum_dispatch::enum_dispatch;

/// 四个小游戏共有的会话能力
///
/// 各引擎通过组合 `ProgressTracker` / `Timer` / `PendingSlot` 实现，
/// 编排器通过 `ActiveGame` 枚举静态分发。
#[enum_dispatch]
pub trait GameSession {
    /// 内容尚未到达（或上次加载失败），不可游玩
    fn is_loading(&self) -> bool;

    fn is_finished(&self) -> bool;

    /// 每秒调用一次
    fn tick(&mut self);

    /// 执行一个到期的延迟动作；过期或重复的 Ticket 被忽略
    fn resolve(&mut self, ticket: Ticket);

    /// 从头再来。返回需要重新获取的内容（如果有）
    fn restart(&mut self) -> Option<ContentRequest>;
}
