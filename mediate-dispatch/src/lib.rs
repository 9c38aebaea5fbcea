//! 中介调度库（mediate-dispatch）
//!
//! 在 `mediate-core` 的结果与消息模型之上，提供进程内的 CQRS 调度运行时：
//! - 处理器契约（`handler`）：命令/查询/流式查询/通知的异步处理接口
//! - 处理器注册表（`registry`）：以 TypeId 为键、类型擦除方式保存处理器
//! - 中介者（`mediator`）：`send` / `fetch` / `fetch_stream` / `publish` 四个调度入口
//! - 装饰器（`decorator`）与显式管道（`pipeline`）：事务、预处理、校验、日志、
//!   领域事件与通知发布等横切行为的有序组合
//! - 通知发布器（`publisher`）：按通知运行时类型向全部处理器并发扇出
//!
//! 解析失败（未注册、处理器拒绝）在 `send`/`fetch` 边界一律转换为失败结果返回，
//! 不向调用方抛出；`publish` 则以错误形式上抛首个处理器失败。
//!
pub mod context;
pub mod decorator;
pub mod error;
pub mod handler;
pub mod mediator;
pub mod outbox;
pub mod pipeline;
pub mod publisher;
pub mod registry;

pub use context::DispatchContext;
pub use mediator::Mediator;
pub use pipeline::{HandlerPipeline, SharedHandler};
pub use publisher::{NotificationPublisher, PublisherConfig};
pub use registry::HandlerRegistry;
