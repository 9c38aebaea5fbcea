//! 显式处理器管道
//!
//! 以声明顺序把装饰器层组合到基础处理器外侧：先加入的层在最外。
//! 链条顺序由构造方一次性声明，属于可测试的一等属性，
//! 不依赖任何容器的注册顺序。
//!
use crate::handler::MessageHandler;
use mediate_core::Message;
use std::sync::Arc;

/// 共享的处理器句柄；装饰器以此为内层引用
pub type SharedHandler<M> = Arc<dyn MessageHandler<M>>;

type Layer<M> = Box<dyn Fn(SharedHandler<M>) -> SharedHandler<M> + Send + Sync>;

/// 处理器管道构造器
///
/// 层顺序（从外到内）即 `layer` 的调用顺序：
/// `HandlerPipeline::new().layer(a).layer(b).build(inner)` 得到 `a(b(inner))`。
pub struct HandlerPipeline<M: Message> {
    layers: Vec<Layer<M>>,
}

impl<M: Message> HandlerPipeline<M> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// 追加一层包装（先加入的在最外）
    pub fn layer<F>(mut self, wrap: F) -> Self
    where
        F: Fn(SharedHandler<M>) -> SharedHandler<M> + Send + Sync + 'static,
    {
        self.layers.push(Box::new(wrap));
        self
    }

    /// 围绕基础处理器组装整条链
    pub fn build(self, inner: SharedHandler<M>) -> SharedHandler<M> {
        self.layers
            .into_iter()
            .rev()
            .fold(inner, |handler, wrap| wrap(handler))
    }
}

impl<M: Message> Default for HandlerPipeline<M> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DispatchContext;
    use async_trait::async_trait;
    use mediate_core::OperationResult;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Probe;

    impl Message for Probe {
        const NAME: &'static str = "Probe";
        type Output = ();
    }

    struct Recorder {
        label: &'static str,
        inner: Option<SharedHandler<Probe>>,
        trace: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl MessageHandler<Probe> for Recorder {
        async fn handle(&self, ctx: &DispatchContext, message: Probe) -> OperationResult<()> {
            self.trace.lock().unwrap().push(self.label);
            match &self.inner {
                Some(inner) => inner.handle(ctx, message).await,
                None => OperationResult::success(),
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn first_layer_added_is_outermost() {
        let trace = Arc::new(Mutex::new(Vec::new()));

        let pipeline = HandlerPipeline::<Probe>::new()
            .layer({
                let trace = trace.clone();
                move |inner| {
                    Arc::new(Recorder {
                        label: "outer",
                        inner: Some(inner),
                        trace: trace.clone(),
                    })
                }
            })
            .layer({
                let trace = trace.clone();
                move |inner| {
                    Arc::new(Recorder {
                        label: "middle",
                        inner: Some(inner),
                        trace: trace.clone(),
                    })
                }
            });

        let handler = pipeline.build(Arc::new(Recorder {
            label: "base",
            inner: None,
            trace: trace.clone(),
        }));

        let ctx = DispatchContext::default();
        let result = handler.handle(&ctx, Probe).await;

        assert!(result.is_success());
        assert_eq!(*trace.lock().unwrap(), ["outer", "middle", "base"]);
    }
}
