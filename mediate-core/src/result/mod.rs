//! 操作结果（Operation Result）
//!
//! 定义一次消息处理的终值：成功/失败状态标签、HTTP 风格状态码、
//! 可按键合并的错误集合与可选的载荷值。
//!
//! 结果构造后不可变，只能被包装或转换（泛型 -> 非泛型、跨载荷类型传播失败），
//! 转换始终保留状态码、原因短语与错误集合。

mod error_entry;
mod operation_result;
pub mod status_code;

pub use error_entry::{ErrorCollection, ErrorEntry};
pub use operation_result::{OperationResult, ResultStatus};
