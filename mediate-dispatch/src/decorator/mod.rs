//! 处理器装饰器
//!
//! 每个装饰器实现与被包裹处理器相同的 [`MessageHandler`](crate::handler::MessageHandler)
//! 契约，持有唯一的内层引用，在调用前后施加单一横切行为：
//! - [`transaction`]：事务作用域，仅在内层成功时提交
//! - [`visitor`]：按序执行预处理访问器
//! - [`validation`]：按序校验，失败短路且不触达内层
//! - [`logging`]：进入/成功/失败/退出事件
//! - [`domain_event`]：成功后按序冲刷暂存区中的领域事件
//! - [`notification`]：成功后并发冲刷暂存区中的全部通知
//!
//! 所有装饰器把实例能力检查透传给内层，保证链外侧的 `can_handle`
//! 反映最内层处理器的判定。

pub mod domain_event;
pub mod logging;
pub mod notification;
pub mod transaction;
pub mod validation;
pub mod visitor;

pub use domain_event::DomainEventDecorator;
pub use logging::{HandlerLogger, LoggingDecorator, TracingLogger};
pub use notification::NotificationDecorator;
pub use transaction::{TransactionDecorator, TransactionProvider, TransactionScope};
pub use validation::{MessageValidator, ValidationDecorator};
pub use visitor::{MessageVisitor, VisitorDecorator};
