use tokio_util::sync::CancellationToken;

/// 调度上下文（Dispatch Context）
///
/// 承载一次调度（命令/查询/通知）所需的横切信息：
/// - 链路追踪：关联 `correlation_id` 与因果链 `causation_id`；
/// - 取消令牌：逐层透传到最内层处理器与全部扇出子任务。
///
/// 内核自身从不轮询令牌；是否以及如何响应取消由处理器决定。
#[derive(Clone, Debug, Default)]
pub struct DispatchContext {
    /// 关联ID（可选）
    pub correlation_id: Option<String>,
    /// 因果ID（可选）
    pub causation_id: Option<String>,
    /// 取消令牌
    pub cancellation: CancellationToken,
}
