//! 处理器注册表（Handler Provider）
//!
//! 以消息的 TypeId 为键保存类型擦除后的处理器调用闭包：
//! - 命令/查询/流式查询：每个消息类型至多一个处理器；
//! - 通知：每个通知类型零到多个处理器。
//!
//! 注册表对调度期只读，并发读安全由 DashMap 保证；
//! 闭包内部完成 downcast、实例能力检查与实际调用。
//!
use crate::context::DispatchContext;
use crate::error::{DispatchError, DispatchResult};
use crate::handler::{MessageHandler, NotificationHandler, StreamQueryHandler};
use dashmap::DashMap;
use mediate_core::{Command, Message, Notification, Query, StreamQuery};
use std::any::{Any, TypeId};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type BoxAnySend = Box<dyn Any + Send>;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = DispatchResult<BoxAnySend>> + Send + 'a>>;

/// 类型擦除后的命令/查询调用闭包
pub type HandlerFn =
    Arc<dyn for<'a> Fn(BoxAnySend, &'a DispatchContext) -> HandlerFuture<'a> + Send + Sync>;

pub type NotifyFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send + 'a>>;

/// 类型擦除后的通知调用闭包；入参为共享值，便于同一通知扇出给多个处理器
pub type NotifyHandlerFn = Arc<
    dyn for<'a> Fn(Arc<dyn Any + Send + Sync>, &'a DispatchContext) -> NotifyFuture<'a>
        + Send
        + Sync,
>;

/// 一条通知处理器登记项
#[derive(Clone)]
pub struct NotificationEntry {
    pub(crate) handler_name: String,
    pub(crate) invoke: NotifyHandlerFn,
}

impl NotificationEntry {
    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    pub fn call<'a>(
        &self,
        value: Arc<dyn Any + Send + Sync>,
        ctx: &'a DispatchContext,
    ) -> NotifyFuture<'a> {
        (self.invoke)(value, ctx)
    }
}

/// 基于 TypeId 的进程内注册表
pub struct HandlerRegistry {
    commands: DashMap<TypeId, (&'static str, HandlerFn)>,
    queries: DashMap<TypeId, (&'static str, HandlerFn)>,
    streams: DashMap<TypeId, (&'static str, HandlerFn)>,
    notifications: DashMap<TypeId, Vec<NotificationEntry>>,
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self {
            commands: DashMap::new(),
            queries: DashMap::new(),
            streams: DashMap::new(),
            notifications: DashMap::new(),
        }
    }
}

// 把类型化的消息处理器擦除为统一闭包：
// downcast 恢复具体类型，先做实例能力检查，再交给处理器。
fn erase_message_handler<M, H>(handler: Arc<H>) -> HandlerFn
where
    M: Message,
    H: MessageHandler<M> + ?Sized + 'static,
{
    Arc::new(move |boxed, ctx| {
        let handler = handler.clone();

        Box::pin(async move {
            match boxed.downcast::<M>() {
                Ok(message) => {
                    if !handler.can_handle(&message) {
                        return Err(DispatchError::HandlerDeclined { message: M::NAME });
                    }
                    let result = handler.handle(ctx, *message).await;
                    Ok(Box::new(result) as BoxAnySend)
                }
                Err(_) => Err(DispatchError::TypeMismatch {
                    expected: M::NAME,
                    found: "unknown",
                }),
            }
        })
    })
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册命令处理器；同一命令类型重复注册报错
    pub fn register_command<C, H>(&self, handler: Arc<H>) -> DispatchResult<()>
    where
        C: Command,
        H: MessageHandler<C> + ?Sized + 'static,
    {
        let key = TypeId::of::<C>();
        if self.commands.contains_key(&key) {
            return Err(DispatchError::AlreadyRegisteredCommand { command: C::NAME });
        }
        self.commands
            .insert(key, (C::NAME, erase_message_handler::<C, H>(handler)));
        Ok(())
    }

    /// 注册查询处理器；同一查询类型重复注册报错
    pub fn register_query<Q, H>(&self, handler: Arc<H>) -> DispatchResult<()>
    where
        Q: Query,
        H: MessageHandler<Q> + ?Sized + 'static,
    {
        let key = TypeId::of::<Q>();
        if self.queries.contains_key(&key) {
            return Err(DispatchError::AlreadyRegisteredQuery { query: Q::NAME });
        }
        self.queries
            .insert(key, (Q::NAME, erase_message_handler::<Q, H>(handler)));
        Ok(())
    }

    /// 注册流式查询处理器
    pub fn register_stream_query<Q, H>(&self, handler: Arc<H>) -> DispatchResult<()>
    where
        Q: StreamQuery,
        H: StreamQueryHandler<Q> + ?Sized + 'static,
    {
        let key = TypeId::of::<Q>();
        if self.streams.contains_key(&key) {
            return Err(DispatchError::AlreadyRegisteredStreamQuery { query: Q::NAME });
        }

        let f: HandlerFn = {
            let handler = handler.clone();
            Arc::new(move |boxed, ctx| {
                let handler = handler.clone();

                Box::pin(async move {
                    match boxed.downcast::<Q>() {
                        Ok(query) => {
                            if !handler.can_handle(&query) {
                                return Err(DispatchError::HandlerDeclined { message: Q::NAME });
                            }
                            let stream = handler.handle(ctx, *query).await;
                            Ok(Box::new(stream) as BoxAnySend)
                        }
                        Err(_) => Err(DispatchError::TypeMismatch {
                            expected: Q::NAME,
                            found: "unknown",
                        }),
                    }
                })
            })
        };

        self.streams.insert(key, (Q::NAME, f));
        Ok(())
    }

    /// 注册通知处理器；同一通知类型可追加多个
    pub fn register_notification_handler<N, H>(&self, handler: Arc<H>)
    where
        N: Notification,
        H: NotificationHandler<N> + ?Sized + 'static,
    {
        let handler_name = handler.handler_name().to_string();

        let invoke: NotifyHandlerFn = {
            let handler = handler.clone();
            Arc::new(move |value, ctx| {
                let handler = handler.clone();

                Box::pin(async move {
                    match value.downcast::<N>() {
                        Ok(notification) => handler.handle(ctx, &notification).await,
                        Err(_) => Err(anyhow::anyhow!(
                            "notification type mismatch: expected {}",
                            N::NAME
                        )),
                    }
                })
            })
        };

        self.notifications
            .entry(TypeId::of::<N>())
            .or_default()
            .push(NotificationEntry {
                handler_name,
                invoke,
            });
    }

    /// 查找命令处理器（零或一个）
    pub fn command_handler<C: Command>(&self) -> Option<HandlerFn> {
        self.commands
            .get(&TypeId::of::<C>())
            .map(|e| e.value().1.clone())
    }

    /// 查找命令处理器；缺失转换为错误而非 None
    pub fn try_command_handler<C: Command>(&self) -> DispatchResult<HandlerFn> {
        self.command_handler::<C>()
            .ok_or_else(|| DispatchError::HandlerNotFound(C::NAME.to_string()))
    }

    pub fn query_handler<Q: Query>(&self) -> Option<HandlerFn> {
        self.queries
            .get(&TypeId::of::<Q>())
            .map(|e| e.value().1.clone())
    }

    pub fn try_query_handler<Q: Query>(&self) -> DispatchResult<HandlerFn> {
        self.query_handler::<Q>()
            .ok_or_else(|| DispatchError::HandlerNotFound(Q::NAME.to_string()))
    }

    pub fn stream_handler<Q: StreamQuery>(&self) -> Option<HandlerFn> {
        self.streams
            .get(&TypeId::of::<Q>())
            .map(|e| e.value().1.clone())
    }

    pub fn try_stream_handler<Q: StreamQuery>(&self) -> DispatchResult<HandlerFn> {
        self.stream_handler::<Q>()
            .ok_or_else(|| DispatchError::HandlerNotFound(Q::NAME.to_string()))
    }

    /// 查找某通知类型的全部处理器（可能为空）
    pub fn notification_handlers(&self, type_id: TypeId) -> Vec<NotificationEntry> {
        self.notifications
            .get(&type_id)
            .map(|e| e.value().clone())
            .unwrap_or_default()
    }

    /// 查找某通知类型的全部处理器；缺失转换为错误
    pub fn try_notification_handlers(
        &self,
        name: &str,
        type_id: TypeId,
    ) -> DispatchResult<Vec<NotificationEntry>> {
        let entries = self.notification_handlers(type_id);
        if entries.is_empty() {
            return Err(DispatchError::HandlerNotFound(name.to_string()));
        }
        Ok(entries)
    }

    /// 获取已注册的命令类型名列表（只读视图）
    pub fn registered_commands(&self) -> Vec<&'static str> {
        self.commands.iter().map(|e| e.value().0).collect()
    }

    /// 获取已注册的查询类型名列表（只读视图）
    pub fn registered_queries(&self) -> Vec<&'static str> {
        self.queries.iter().map(|e| e.value().0).collect()
    }
}
