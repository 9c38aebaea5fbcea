//! 事务装饰器
//!
//! 向外部事务协作方为当前消息索取作用域（可能没有），围绕内层调用展开：
//! 仅当内层结果成功时发出提交信号；失败或 panic 路径上作用域
//! 随 Drop 释放，即隐式回滚。提交本身失败映射为 500 失败结果。
//!
use crate::context::DispatchContext;
use crate::error::DispatchError;
use crate::handler::MessageHandler;
use crate::pipeline::SharedHandler;
use async_trait::async_trait;
use mediate_core::result::status_code;
use mediate_core::{ErrorEntry, Message, OperationResult};
use std::sync::Arc;

/// 事务作用域：提交信号幂等；未提交即被 Drop 视为回滚
#[async_trait]
pub trait TransactionScope: Send {
    async fn complete(&mut self) -> anyhow::Result<()>;
}

/// 事务协作方：按消息决定是否提供作用域
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    /// 返回 None 表示该消息无需事务
    async fn begin(&self, message: &'static str) -> Option<Box<dyn TransactionScope>>;
}

pub struct TransactionDecorator<M: Message> {
    inner: SharedHandler<M>,
    provider: Arc<dyn TransactionProvider>,
}

impl<M: Message> TransactionDecorator<M> {
    pub fn new(inner: SharedHandler<M>, provider: Arc<dyn TransactionProvider>) -> Self {
        Self { inner, provider }
    }
}

#[async_trait]
impl<M: Message> MessageHandler<M> for TransactionDecorator<M> {
    fn can_handle(&self, message: &M) -> bool {
        self.inner.can_handle(message)
    }

    async fn handle(&self, ctx: &DispatchContext, message: M) -> OperationResult<M::Output> {
        let scope = self.provider.begin(M::NAME).await;
        let result = self.inner.handle(ctx, message).await;

        let Some(mut scope) = scope else {
            return result;
        };

        if result.is_failure() {
            // 不提交，作用域随 Drop 回滚
            return result;
        }

        if let Err(err) = scope.complete().await {
            let reason = err.to_string();
            return OperationResult::failure_with_status(status_code::INTERNAL_SERVER_ERROR)
                .with_error(
                    ErrorEntry::new("transaction", reason.clone())
                        .with_source(anyhow::Error::new(DispatchError::Transaction { reason })),
                );
        }

        result
    }
}
