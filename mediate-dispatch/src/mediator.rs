//! 中介者（Mediator）
//!
//! 调度入口：`send`（命令）、`fetch`（查询）、`fetch_stream`（流式查询）、
//! `publish`（通知）。
//!
//! 解析类失败（未注册、处理器拒绝、还原类型不匹配）一律转换为
//! InternalServerError 的失败结果并写入 debug 日志，绝不向 `send`/`fetch`
//! 调用方抛出；处理器自身产出的失败结果原样透传。
//!
use crate::context::DispatchContext;
use crate::error::{DispatchError, DispatchResult};
use crate::handler::{MessageHandler, NotificationHandler, StreamQueryHandler};
use crate::publisher::{NotificationPublisher, PublisherConfig};
use crate::registry::HandlerRegistry;
use futures_core::stream::BoxStream;
use mediate_core::result::status_code;
use mediate_core::{Command, ErrorEntry, Notification, OperationResult, Query, StreamQuery};
use std::sync::Arc;

pub struct Mediator {
    registry: Arc<HandlerRegistry>,
    publisher: Arc<NotificationPublisher>,
}

impl Default for Mediator {
    fn default() -> Self {
        Self::with_config(PublisherConfig::default())
    }
}

// 解析失败统一收口：500 + 以参数名为键的错误条目，底层错误保留原因链
fn resolution_failure<T>(key: &'static str, err: DispatchError) -> OperationResult<T> {
    let message = err.to_string();
    OperationResult::failure_with_status(status_code::INTERNAL_SERVER_ERROR)
        .with_error(ErrorEntry::new(key, message).with_source(anyhow::Error::new(err)))
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PublisherConfig) -> Self {
        let registry = Arc::new(HandlerRegistry::new());
        let publisher = Arc::new(NotificationPublisher::new(registry.clone(), config));
        Self {
            registry,
            publisher,
        }
    }

    /// 底层注册表（Handler Provider）
    pub fn registry(&self) -> &Arc<HandlerRegistry> {
        &self.registry
    }

    /// 通知发布器（可供领域事件/通知装饰器复用）
    pub fn publisher(&self) -> Arc<NotificationPublisher> {
        self.publisher.clone()
    }

    pub fn register_command<C, H>(&self, handler: Arc<H>) -> DispatchResult<()>
    where
        C: Command,
        H: MessageHandler<C> + ?Sized + 'static,
    {
        self.registry.register_command::<C, H>(handler)
    }

    pub fn register_query<Q, H>(&self, handler: Arc<H>) -> DispatchResult<()>
    where
        Q: Query,
        H: MessageHandler<Q> + ?Sized + 'static,
    {
        self.registry.register_query::<Q, H>(handler)
    }

    pub fn register_stream_query<Q, H>(&self, handler: Arc<H>) -> DispatchResult<()>
    where
        Q: StreamQuery,
        H: StreamQueryHandler<Q> + ?Sized + 'static,
    {
        self.registry.register_stream_query::<Q, H>(handler)
    }

    pub fn register_notification_handler<N, H>(&self, handler: Arc<H>)
    where
        N: Notification,
        H: NotificationHandler<N> + ?Sized + 'static,
    {
        self.registry.register_notification_handler::<N, H>(handler)
    }

    /// 分发命令到对应处理器，返回该命令的操作结果
    pub async fn send<C: Command>(
        &self,
        ctx: &DispatchContext,
        command: C,
    ) -> OperationResult<C::Output> {
        let Some(invoke) = self.registry.command_handler::<C>() else {
            tracing::debug!(command = C::NAME, "command handler not found");
            return resolution_failure(
                "command",
                DispatchError::HandlerNotFound(C::NAME.to_string()),
            );
        };

        match (invoke)(Box::new(command), ctx).await {
            Ok(boxed) => match boxed.downcast::<OperationResult<C::Output>>() {
                Ok(result) => *result,
                Err(_) => {
                    tracing::debug!(command = C::NAME, "command result type mismatch");
                    resolution_failure(
                        "command",
                        DispatchError::TypeMismatch {
                            expected: C::NAME,
                            found: "unknown",
                        },
                    )
                }
            },
            Err(err) => {
                tracing::debug!(command = C::NAME, error = %err, "command dispatch failed");
                resolution_failure("command", err)
            }
        }
    }

    /// 分发查询到对应处理器，返回该查询的操作结果
    pub async fn fetch<Q: Query>(
        &self,
        ctx: &DispatchContext,
        query: Q,
    ) -> OperationResult<Q::Output> {
        let Some(invoke) = self.registry.query_handler::<Q>() else {
            tracing::debug!(query = Q::NAME, "query handler not found");
            return resolution_failure("query", DispatchError::HandlerNotFound(Q::NAME.to_string()));
        };

        match (invoke)(Box::new(query), ctx).await {
            Ok(boxed) => match boxed.downcast::<OperationResult<Q::Output>>() {
                Ok(result) => *result,
                Err(_) => {
                    tracing::debug!(query = Q::NAME, "query result type mismatch");
                    resolution_failure(
                        "query",
                        DispatchError::TypeMismatch {
                            expected: Q::NAME,
                            found: "unknown",
                        },
                    )
                }
            },
            Err(err) => {
                tracing::debug!(query = Q::NAME, error = %err, "query dispatch failed");
                resolution_failure("query", err)
            }
        }
    }

    /// 分发流式查询，成功时结果载荷为惰性元素流
    pub async fn fetch_stream<Q: StreamQuery>(
        &self,
        ctx: &DispatchContext,
        query: Q,
    ) -> OperationResult<BoxStream<'static, Q::Item>> {
        let Some(invoke) = self.registry.stream_handler::<Q>() else {
            tracing::debug!(query = Q::NAME, "stream query handler not found");
            return resolution_failure("query", DispatchError::HandlerNotFound(Q::NAME.to_string()));
        };

        match (invoke)(Box::new(query), ctx).await {
            Ok(boxed) => match boxed.downcast::<BoxStream<'static, Q::Item>>() {
                Ok(stream) => OperationResult::success_with(*stream),
                Err(_) => {
                    tracing::debug!(query = Q::NAME, "stream query result type mismatch");
                    resolution_failure(
                        "query",
                        DispatchError::TypeMismatch {
                            expected: Q::NAME,
                            found: "unknown",
                        },
                    )
                }
            },
            Err(err) => {
                tracing::debug!(query = Q::NAME, error = %err, "stream query dispatch failed");
                resolution_failure("query", err)
            }
        }
    }

    /// 广播通知：扇出给全部已注册处理器；首个处理器失败即整体失败
    pub async fn publish<N: Notification>(
        &self,
        ctx: &DispatchContext,
        notification: N,
    ) -> DispatchResult<()> {
        self.publisher.publish(ctx, notification).await
    }
}
