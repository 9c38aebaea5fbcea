//! 消息标记与元数据
//!
//! 定义调用方与处理器之间传递的消息的最小接口：
//! - `Message`：稳定名称 + 结果载荷类型；
//! - `Command` / `Query`：零行为标记，区分写意图与读意图；
//! - `StreamQuery`：惰性序列查询；
//! - `Notification`:广播消息（零到多个处理器）；
//! - `MessageInfo` / `SelfDescribing`：可选的自描述元数据能力。

mod command;
mod message_trait;
mod metadata;
mod notification;
mod query;

pub use command::Command;
pub use message_trait::Message;
pub use metadata::{MessageInfo, SelfDescribing};
pub use notification::Notification;
pub use query::{Query, StreamQuery};
