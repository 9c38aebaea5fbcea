//! 通知发布器（Notification Dispatcher）
//!
//! 按通知的运行时类型解析全部已注册处理器并并发扇出：
//! - 处理器之间无顺序保证；
//! - 全部完成后才返回，以首个处理器失败作为整体失败；
//! - 无已注册处理器时记一条 debug 日志并按无操作成功返回。
//!
//! 单个处理器失败不会中止其余处理器，但它们的完成情况不单独上报，
//! 调用方只能看到聚合后的首个错误。
//!
use crate::context::DispatchContext;
use crate::error::{DispatchError, DispatchResult};
use crate::outbox::PendingNotification;
use crate::registry::HandlerRegistry;
use futures_util::StreamExt;
use futures_util::stream;
use mediate_core::Notification;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// 发布器配置
#[derive(Clone, Copy, Debug)]
pub struct PublisherConfig {
    /// 单条通知的处理并发（同一通知广播给多个处理器）
    pub handler_concurrency: usize,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            handler_concurrency: 8,
        }
    }
}

pub struct NotificationPublisher {
    registry: Arc<HandlerRegistry>,
    config: PublisherConfig,
}

impl NotificationPublisher {
    pub fn new(registry: Arc<HandlerRegistry>, config: PublisherConfig) -> Self {
        Self { registry, config }
    }

    /// 广播一条类型化通知
    pub async fn publish<N: Notification>(
        &self,
        ctx: &DispatchContext,
        notification: N,
    ) -> DispatchResult<()> {
        self.publish_erased(ctx, N::NAME, TypeId::of::<N>(), Arc::new(notification))
            .await
    }

    /// 冲刷一条暂存区条目（领域事件/通知装饰器使用）
    pub async fn publish_pending(
        &self,
        ctx: &DispatchContext,
        entry: &PendingNotification,
    ) -> DispatchResult<()> {
        let value = entry.value();
        let type_id = (*value).type_id();
        self.publish_erased(ctx, entry.name(), type_id, value).await
    }

    async fn publish_erased(
        &self,
        ctx: &DispatchContext,
        name: &str,
        type_id: TypeId,
        value: Arc<dyn Any + Send + Sync>,
    ) -> DispatchResult<()> {
        let handlers = self.registry.notification_handlers(type_id);
        if handlers.is_empty() {
            tracing::debug!(notification = name, "no notification handlers registered");
            return Ok(());
        }

        // 并发扇出；等待全部完成后，以首个失败作为整体失败
        let outcomes: Vec<(String, anyhow::Result<()>)> =
            stream::iter(handlers.into_iter().map(|entry| {
                let value = value.clone();
                async move {
                    let outcome = entry.call(value, ctx).await;
                    (entry.handler_name().to_string(), outcome)
                }
            }))
            .buffer_unordered(self.config.handler_concurrency)
            .collect()
            .await;

        for (handler, outcome) in outcomes {
            if let Err(err) = outcome {
                return Err(DispatchError::NotificationHandler {
                    handler,
                    reason: err.to_string(),
                });
            }
        }
        Ok(())
    }
}
