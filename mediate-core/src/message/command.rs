use crate::message::Message;

/// 命令（Command）
///
/// 表达“意图”的写操作请求，通常会修改外部状态。
/// - 与 [`Query`](crate::message::Query) 相对，`Command` 应避免读写混用；
/// - 建议保持语义化的“动宾结构”命名，如 `CreateUser`、`CloseOrder`；
/// - 纯标记，无行为；路由语义完全由 `Message` 承载。
pub trait Command: Message {}
