//! 日志装饰器
//!
//! 围绕内层调用发出进入/成功/失败/退出四类事件；结果原样透传，
//! 失败结果在记录后不做任何改写。默认日志槽接入 `tracing`。
//!
use crate::context::DispatchContext;
use crate::handler::MessageHandler;
use crate::pipeline::SharedHandler;
use async_trait::async_trait;
use mediate_core::{ErrorCollection, Message, OperationResult};
use std::sync::Arc;

/// 处理过程的日志槽
pub trait HandlerLogger: Send + Sync {
    fn on_entry(&self, name: &'static str);
    fn on_success(&self, name: &'static str, status_code: u16);
    fn on_failure(&self, name: &'static str, status_code: u16, errors: &ErrorCollection);
    fn on_exit(&self, name: &'static str);
}

/// 默认日志槽：接入 tracing
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl HandlerLogger for TracingLogger {
    fn on_entry(&self, name: &'static str) {
        tracing::debug!(name, "message handling started");
    }

    fn on_success(&self, name: &'static str, status_code: u16) {
        tracing::debug!(name, status_code, "message handled");
    }

    fn on_failure(&self, name: &'static str, status_code: u16, errors: &ErrorCollection) {
        tracing::error!(
            name,
            status_code,
            error_count = errors.len(),
            "message handling failed"
        );
    }

    fn on_exit(&self, name: &'static str) {
        tracing::trace!(name, "message handling finished");
    }
}

pub struct LoggingDecorator<M: Message> {
    inner: SharedHandler<M>,
    logger: Arc<dyn HandlerLogger>,
}

impl<M: Message> LoggingDecorator<M> {
    pub fn new(inner: SharedHandler<M>, logger: Arc<dyn HandlerLogger>) -> Self {
        Self { inner, logger }
    }

    /// 使用默认 tracing 日志槽
    pub fn with_tracing(inner: SharedHandler<M>) -> Self {
        Self::new(inner, Arc::new(TracingLogger))
    }
}

#[async_trait]
impl<M: Message> MessageHandler<M> for LoggingDecorator<M> {
    fn can_handle(&self, message: &M) -> bool {
        self.inner.can_handle(message)
    }

    async fn handle(&self, ctx: &DispatchContext, message: M) -> OperationResult<M::Output> {
        self.logger.on_entry(M::NAME);
        let result = self.inner.handle(ctx, message).await;
        if result.is_success() {
            self.logger.on_success(M::NAME, result.status_code());
        } else {
            self.logger.on_failure(M::NAME, result.status_code(), result.errors());
        }
        self.logger.on_exit(M::NAME);
        result
    }
}
