//! 操作结果类型
//!
//! 一次消息处理的终值。状态判定只看状态标签：成功结果允许携带补充性的
//! 错误条目（例如提示信息），`is_success` 不读取错误数量。
//!
use super::error_entry::{ErrorCollection, ErrorEntry};
use super::status_code;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 结果状态标签（二选一）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Success,
    Failure,
}

/// 操作结果：状态标签 + HTTP 风格状态码 + 原因短语 + 键控错误 + 可选载荷
///
/// 构造后不可变；链式构造器按值消费并返回新值。
/// 默认状态码：成功 200，失败 400。
pub struct OperationResult<T = ()> {
    status: ResultStatus,
    status_code: u16,
    reason: Option<String>,
    errors: ErrorCollection,
    value: Option<T>,
}

impl OperationResult<()> {
    /// 无载荷的成功结果
    pub fn success() -> Self {
        Self::success_with(())
    }
}

impl<T> OperationResult<T> {
    /// 携带载荷的成功结果
    pub fn success_with(value: T) -> Self {
        Self {
            status: ResultStatus::Success,
            status_code: status_code::OK,
            reason: None,
            errors: ErrorCollection::new(),
            value: Some(value),
        }
    }

    /// 失败结果（默认 400）
    pub fn failure() -> Self {
        Self::failure_with_status(status_code::BAD_REQUEST)
    }

    /// 指定状态码的失败结果
    pub fn failure_with_status(status_code: u16) -> Self {
        Self {
            status: ResultStatus::Failure,
            status_code,
            reason: None,
            errors: ErrorCollection::new(),
            value: None,
        }
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// 并入一个错误条目（同键合并）
    pub fn with_error(mut self, entry: ErrorEntry) -> Self {
        self.errors.push(entry);
        self
    }

    /// 并入一个错误集合（逐条同键合并）
    pub fn with_errors(mut self, errors: ErrorCollection) -> Self {
        self.errors.merge(errors);
        self
    }

    pub fn status(&self) -> ResultStatus {
        self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    pub fn is_failure(&self) -> bool {
        self.status == ResultStatus::Failure
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    pub fn errors(&self) -> &ErrorCollection {
        &self.errors
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// 泛型 -> 非泛型：丢弃载荷，保留状态、状态码、原因与错误
    pub fn without_value(self) -> OperationResult<()> {
        OperationResult {
            status: self.status,
            status_code: self.status_code,
            reason: self.reason,
            errors: self.errors,
            value: None,
        }
    }

    /// 跨载荷类型传播：载荷被丢弃，其余元数据原样保留。
    /// 多用于把一次失败结果沿调用链换成目标载荷类型。
    pub fn convert<U>(self) -> OperationResult<U> {
        OperationResult {
            status: self.status,
            status_code: self.status_code,
            reason: self.reason,
            errors: self.errors,
            value: None,
        }
    }

    /// 载荷映射，其余元数据原样保留
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        OperationResult {
            status: self.status,
            status_code: self.status_code,
            reason: self.reason,
            errors: self.errors,
            value: self.value.map(f),
        }
    }
}

impl<T: Clone> Clone for OperationResult<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            status_code: self.status_code,
            reason: self.reason.clone(),
            errors: self.errors.clone(),
            value: self.value.clone(),
        }
    }
}

// 载荷不要求 Debug（例如流式载荷），只打印是否存在
impl<T> fmt::Debug for OperationResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationResult")
            .field("status", &self.status)
            .field("status_code", &self.status_code)
            .field("reason", &self.reason)
            .field("errors", &self.errors)
            .field("has_value", &self.value.is_some())
            .finish()
    }
}
