use thiserror::Error;

/// 调度层统一错误定义
///
/// 注册冲突在注册时上抛；解析类错误（未注册、拒绝、类型不匹配）
/// 由中介者在 `send`/`fetch` 边界转换为失败结果，不会到达调用方。
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("handler not found: {0}")]
    HandlerNotFound(String),

    #[error("handler declined: message={message}")]
    HandlerDeclined { message: &'static str },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("handler already registered: command={command}")]
    AlreadyRegisteredCommand { command: &'static str },

    #[error("handler already registered: query={query}")]
    AlreadyRegisteredQuery { query: &'static str },

    #[error("handler already registered: stream query={query}")]
    AlreadyRegisteredStreamQuery { query: &'static str },

    #[error("notification handler failed: handler={handler}, reason={reason}")]
    NotificationHandler { handler: String, reason: String },

    #[error("transaction error: {reason}")]
    Transaction { reason: String },
}

/// 统一 Result 类型别名
pub type DispatchResult<T> = Result<T, DispatchError>;
