//! 校验装饰器
//!
//! 按序（`order` 升序，同序号按注册顺序稳定）执行全部校验器并累积错误；
//! 存在任何错误即短路返回失败结果（默认 400），内层处理器不被调用。
//!
use crate::context::DispatchContext;
use crate::handler::MessageHandler;
use crate::pipeline::SharedHandler;
use async_trait::async_trait;
use mediate_core::{ErrorCollection, Message, OperationResult};
use std::sync::Arc;

/// 消息校验器：返回空集合表示通过
#[async_trait]
pub trait MessageValidator<M>: Send + Sync
where
    M: Message,
{
    /// 执行顺序（升序）；同序号按注册顺序稳定执行
    fn order(&self) -> i32 {
        0
    }

    async fn validate(&self, ctx: &DispatchContext, message: &M) -> ErrorCollection;
}

pub struct ValidationDecorator<M: Message> {
    inner: SharedHandler<M>,
    validators: Vec<Arc<dyn MessageValidator<M>>>,
}

impl<M: Message> ValidationDecorator<M> {
    pub fn new(inner: SharedHandler<M>, mut validators: Vec<Arc<dyn MessageValidator<M>>>) -> Self {
        validators.sort_by_key(|v| v.order());
        Self { inner, validators }
    }
}

#[async_trait]
impl<M: Message> MessageHandler<M> for ValidationDecorator<M> {
    fn can_handle(&self, message: &M) -> bool {
        self.inner.can_handle(message)
    }

    async fn handle(&self, ctx: &DispatchContext, message: M) -> OperationResult<M::Output> {
        let mut errors = ErrorCollection::new();
        for validator in &self.validators {
            errors.merge(validator.validate(ctx, &message).await);
        }

        if !errors.is_empty() {
            return OperationResult::failure().with_errors(errors);
        }

        self.inner.handle(ctx, message).await
    }
}
