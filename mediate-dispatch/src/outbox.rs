//! 待发通知暂存区（Outbox）
//!
//! 持久化协作方在处理过程中累积待发通知，装饰器在处理成功后统一冲刷。
//! 本 crate 只定义协议与擦除后的条目类型，不提供存储实现。
//!
use mediate_core::Notification;
use std::any::Any;
use std::sync::Arc;

/// 一条待发通知：入队时记录名称与领域事件标记，载荷被类型擦除
#[derive(Clone)]
pub struct PendingNotification {
    name: &'static str,
    domain_event: bool,
    value: Arc<dyn Any + Send + Sync>,
}

impl PendingNotification {
    pub fn of<N: Notification>(notification: N) -> Self {
        Self {
            name: N::NAME,
            domain_event: N::DOMAIN_EVENT,
            value: Arc::new(notification),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_domain_event(&self) -> bool {
        self.domain_event
    }

    /// 擦除后的载荷共享句柄（发布器据其运行时类型路由）
    pub fn value(&self) -> Arc<dyn Any + Send + Sync> {
        self.value.clone()
    }
}

/// 待发通知来源：只读视图 + 清空操作，由外部数据上下文实现
pub trait PendingNotifications: Send + Sync {
    /// 当前累积的待发通知（按累积顺序）
    fn pending(&self) -> Vec<PendingNotification>;

    /// 清空暂存区
    fn clear(&self);
}
