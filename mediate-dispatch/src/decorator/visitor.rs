//! 访问器装饰器
//!
//! 在内层调用前按序（`order` 升序，同序号按注册顺序稳定）执行全部
//! 预处理访问器；访问器可修改消息。任一访问器出错即中止链条，
//! 以 500 失败结果返回并附带底层错误。
//!
use crate::context::DispatchContext;
use crate::handler::MessageHandler;
use crate::pipeline::SharedHandler;
use async_trait::async_trait;
use mediate_core::result::status_code;
use mediate_core::{ErrorEntry, Message, OperationResult};
use std::sync::Arc;

/// 消息预处理访问器
#[async_trait]
pub trait MessageVisitor<M>: Send + Sync
where
    M: Message,
{
    /// 执行顺序（升序）；同序号按注册顺序稳定执行
    fn order(&self) -> i32 {
        0
    }

    async fn visit(&self, ctx: &DispatchContext, message: &mut M) -> anyhow::Result<()>;
}

pub struct VisitorDecorator<M: Message> {
    inner: SharedHandler<M>,
    visitors: Vec<Arc<dyn MessageVisitor<M>>>,
}

impl<M: Message> VisitorDecorator<M> {
    pub fn new(inner: SharedHandler<M>, mut visitors: Vec<Arc<dyn MessageVisitor<M>>>) -> Self {
        // sort_by_key 稳定，注册顺序即同序号的平局顺序
        visitors.sort_by_key(|v| v.order());
        Self { inner, visitors }
    }
}

#[async_trait]
impl<M: Message> MessageHandler<M> for VisitorDecorator<M> {
    fn can_handle(&self, message: &M) -> bool {
        self.inner.can_handle(message)
    }

    async fn handle(&self, ctx: &DispatchContext, message: M) -> OperationResult<M::Output> {
        let mut message = message;
        for visitor in &self.visitors {
            if let Err(err) = visitor.visit(ctx, &mut message).await {
                return OperationResult::failure_with_status(status_code::INTERNAL_SERVER_ERROR)
                    .with_error(ErrorEntry::new("visitor", err.to_string()).with_source(err));
            }
        }
        self.inner.handle(ctx, message).await
    }
}
