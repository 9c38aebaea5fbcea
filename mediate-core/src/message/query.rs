use crate::message::Message;

/// 查询（Query）
///
/// 表达只读意图，不改变外部状态。
/// - 与 [`Command`](crate::message::Command) 相对，`Query` 应避免副作用；
/// - 纯标记，无行为。
pub trait Query: Message {}

/// 流式查询（Stream Query）
///
/// 结果以惰性序列形式返回，由调用方按需消费；
/// 处理器产出 `'static` 生命周期的元素流，便于在异步运行时中转交。
pub trait StreamQuery: Send + Sync + 'static {
    /// 查询的稳定名称
    const NAME: &'static str;

    /// 序列元素类型
    type Item: Send + 'static;
}
