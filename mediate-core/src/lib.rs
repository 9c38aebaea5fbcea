//! 中介内核基础库（mediate-core）
//!
//! 提供 CQRS 中介框架的叶子构件，供上层调度 crate 与宿主应用共用：
//! - 操作结果（`result`）：带状态标签、HTTP 风格状态码与可合并键控错误的结果模型
//! - 消息标记（`message`）：命令/查询/流式查询/通知的零行为标记与消息元数据
//!
//! 本 crate 不依赖任何运行时或存储实现，仅定义值类型与最小必要的能力接口，
//! 以便在不同调度实现（进程内、消息中间件等）上复用同一套结果与消息语义。
//!
pub mod message;
pub mod result;

pub use message::{Command, Message, MessageInfo, Notification, Query, SelfDescribing, StreamQuery};
pub use result::{ErrorCollection, ErrorEntry, OperationResult, ResultStatus};
