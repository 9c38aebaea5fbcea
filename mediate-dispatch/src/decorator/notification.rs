//! 通知装饰器
//!
//! 与领域事件装饰器同构，但冲刷暂存区中的全部条目（不做子类型过滤），
//! 条目之间并发发布；全部完成后以首个失败作为整体失败，成功才清空。
//!
use crate::context::DispatchContext;
use crate::handler::MessageHandler;
use crate::outbox::PendingNotifications;
use crate::pipeline::SharedHandler;
use crate::publisher::NotificationPublisher;
use async_trait::async_trait;
use futures_util::future;
use mediate_core::result::status_code;
use mediate_core::{ErrorEntry, Message, OperationResult};
use std::sync::Arc;

pub struct NotificationDecorator<M: Message> {
    inner: SharedHandler<M>,
    store: Arc<dyn PendingNotifications>,
    publisher: Arc<NotificationPublisher>,
}

impl<M: Message> NotificationDecorator<M> {
    pub fn new(
        inner: SharedHandler<M>,
        store: Arc<dyn PendingNotifications>,
        publisher: Arc<NotificationPublisher>,
    ) -> Self {
        Self {
            inner,
            store,
            publisher,
        }
    }
}

#[async_trait]
impl<M: Message> MessageHandler<M> for NotificationDecorator<M> {
    fn can_handle(&self, message: &M) -> bool {
        self.inner.can_handle(message)
    }

    async fn handle(&self, ctx: &DispatchContext, message: M) -> OperationResult<M::Output> {
        let result = self.inner.handle(ctx, message).await;
        if result.is_failure() {
            return result;
        }

        let pending = self.store.pending();
        if !pending.is_empty() {
            // 条目间并发发布；等待全部完成后取首个失败
            let outcomes = future::join_all(
                pending
                    .iter()
                    .map(|entry| self.publisher.publish_pending(ctx, entry)),
            )
            .await;

            if let Some(err) = outcomes.into_iter().find_map(Result::err) {
                let message = err.to_string();
                return OperationResult::failure_with_status(status_code::INTERNAL_SERVER_ERROR)
                    .with_error(
                        ErrorEntry::new("notification", message).with_source(anyhow::Error::new(err)),
                    );
            }
        }

        self.store.clear();
        result
    }
}
