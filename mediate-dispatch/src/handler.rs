//! 处理器契约
//!
//! 每类消息对应一个单方法异步契约；装饰器实现与被包裹处理器相同的契约。
//! 可恢复的处理失败通过失败结果（或 `anyhow::Result`）表达并沿链传递；
//! 内核任何位置都不捕获 panic。
//!
use crate::context::DispatchContext;
use async_trait::async_trait;
use futures_core::stream::BoxStream;
use mediate_core::{Message, Notification, OperationResult, StreamQuery};

/// 消息处理器：处理一条命令或查询，产出操作结果
#[async_trait]
pub trait MessageHandler<M>: Send + Sync
where
    M: Message,
{
    /// 针对具体消息实例的运行时能力检查；返回 false 表示拒绝本次处理
    fn can_handle(&self, _message: &M) -> bool {
        true
    }

    async fn handle(&self, ctx: &DispatchContext, message: M) -> OperationResult<M::Output>;
}

/// 流式查询处理器：产出 'static 生命周期的元素流，由调用方惰性消费
#[async_trait]
pub trait StreamQueryHandler<Q>: Send + Sync
where
    Q: StreamQuery,
{
    fn can_handle(&self, _query: &Q) -> bool {
        true
    }

    async fn handle(&self, ctx: &DispatchContext, query: Q) -> BoxStream<'static, Q::Item>;
}

/// 通知处理器：消费一条广播通知
#[async_trait]
pub trait NotificationHandler<N>: Send + Sync
where
    N: Notification,
{
    /// 处理器名称（用于失败定位与审计）
    fn handler_name(&self) -> &str;

    async fn handle(&self, ctx: &DispatchContext, notification: &N) -> anyhow::Result<()>;
}
