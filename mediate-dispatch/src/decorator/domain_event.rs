//! 领域事件装饰器
//!
//! 内层失败时结果原样返回、不触碰暂存区；内层成功后按累积顺序逐条
//! 发布暂存区中标记为领域事件的条目，全部发布成功才清空暂存区。
//! 发布失败映射为 500 失败结果（暂存区保留，便于补偿重放）。
//!
use crate::context::DispatchContext;
use crate::handler::MessageHandler;
use crate::outbox::PendingNotifications;
use crate::pipeline::SharedHandler;
use crate::publisher::NotificationPublisher;
use async_trait::async_trait;
use mediate_core::result::status_code;
use mediate_core::{ErrorEntry, Message, OperationResult};
use std::sync::Arc;

pub struct DomainEventDecorator<M: Message> {
    inner: SharedHandler<M>,
    store: Arc<dyn PendingNotifications>,
    publisher: Arc<NotificationPublisher>,
}

impl<M: Message> DomainEventDecorator<M> {
    pub fn new(
        inner: SharedHandler<M>,
        store: Arc<dyn PendingNotifications>,
        publisher: Arc<NotificationPublisher>,
    ) -> Self {
        Self {
            inner,
            store,
            publisher,
        }
    }
}

#[async_trait]
impl<M: Message> MessageHandler<M> for DomainEventDecorator<M> {
    fn can_handle(&self, message: &M) -> bool {
        self.inner.can_handle(message)
    }

    async fn handle(&self, ctx: &DispatchContext, message: M) -> OperationResult<M::Output> {
        let result = self.inner.handle(ctx, message).await;
        if result.is_failure() {
            return result;
        }

        for entry in self
            .store
            .pending()
            .into_iter()
            .filter(|e| e.is_domain_event())
        {
            if let Err(err) = self.publisher.publish_pending(ctx, &entry).await {
                let message = err.to_string();
                return OperationResult::failure_with_status(status_code::INTERNAL_SERVER_ERROR)
                    .with_error(
                        ErrorEntry::new("notification", message).with_source(anyhow::Error::new(err)),
                    );
            }
        }

        self.store.clear();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::NotificationHandler;
    use crate::outbox::PendingNotification;
    use crate::publisher::PublisherConfig;
    use crate::registry::HandlerRegistry;
    use mediate_core::Notification;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct CloseOrder {
        succeed: bool,
    }

    impl Message for CloseOrder {
        const NAME: &'static str = "CloseOrder";
        type Output = ();
    }

    struct CloseOrderHandler;

    #[async_trait]
    impl MessageHandler<CloseOrder> for CloseOrderHandler {
        async fn handle(&self, _ctx: &DispatchContext, message: CloseOrder) -> OperationResult<()> {
            if message.succeed {
                OperationResult::success()
            } else {
                OperationResult::failure()
            }
        }
    }

    #[derive(Debug)]
    struct OrderClosed;

    impl Notification for OrderClosed {
        const NAME: &'static str = "OrderClosed";
        const DOMAIN_EVENT: bool = true;
    }

    #[derive(Debug)]
    struct AuditTrail;

    impl Notification for AuditTrail {
        const NAME: &'static str = "AuditTrail";
    }

    #[derive(Default)]
    struct FakeStore {
        entries: Mutex<Vec<PendingNotification>>,
    }

    impl FakeStore {
        fn seed(&self, entries: Vec<PendingNotification>) {
            *self.entries.lock().unwrap() = entries;
        }

        fn len(&self) -> usize {
            self.entries.lock().unwrap().len()
        }
    }

    impl PendingNotifications for FakeStore {
        fn pending(&self) -> Vec<PendingNotification> {
            self.entries.lock().unwrap().clone()
        }

        fn clear(&self) {
            self.entries.lock().unwrap().clear();
        }
    }

    struct Counting<N> {
        counter: Arc<AtomicUsize>,
        _marker: std::marker::PhantomData<N>,
    }

    #[async_trait]
    impl<N: Notification> NotificationHandler<N> for Counting<N> {
        fn handler_name(&self) -> &str {
            "counting"
        }

        async fn handle(&self, _ctx: &DispatchContext, _notification: &N) -> anyhow::Result<()> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn counting<N: Notification>(counter: Arc<AtomicUsize>) -> Arc<Counting<N>> {
        Arc::new(Counting {
            counter,
            _marker: std::marker::PhantomData,
        })
    }

    fn harness() -> (
        Arc<HandlerRegistry>,
        Arc<FakeStore>,
        Arc<AtomicUsize>,
        Arc<AtomicUsize>,
    ) {
        let registry = Arc::new(HandlerRegistry::new());
        let domain_count = Arc::new(AtomicUsize::new(0));
        let plain_count = Arc::new(AtomicUsize::new(0));
        registry
            .register_notification_handler::<OrderClosed, _>(counting(domain_count.clone()));
        registry.register_notification_handler::<AuditTrail, _>(counting(plain_count.clone()));

        let store = Arc::new(FakeStore::default());
        store.seed(vec![
            PendingNotification::of(OrderClosed),
            PendingNotification::of(AuditTrail),
            PendingNotification::of(OrderClosed),
        ]);

        (registry, store, domain_count, plain_count)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn success_flushes_domain_events_only_and_clears() {
        let (registry, store, domain_count, plain_count) = harness();
        let publisher = Arc::new(NotificationPublisher::new(
            registry,
            PublisherConfig::default(),
        ));
        let decorator =
            DomainEventDecorator::new(Arc::new(CloseOrderHandler), store.clone(), publisher);

        let ctx = DispatchContext::default();
        let result = decorator.handle(&ctx, CloseOrder { succeed: true }).await;

        assert!(result.is_success());
        assert_eq!(domain_count.load(Ordering::SeqCst), 2);
        assert_eq!(plain_count.load(Ordering::SeqCst), 0);
        assert_eq!(store.len(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn failure_skips_flush_and_keeps_store() {
        let (registry, store, domain_count, _plain_count) = harness();
        let publisher = Arc::new(NotificationPublisher::new(
            registry,
            PublisherConfig::default(),
        ));
        let decorator =
            DomainEventDecorator::new(Arc::new(CloseOrderHandler), store.clone(), publisher);

        let ctx = DispatchContext::default();
        let result = decorator.handle(&ctx, CloseOrder { succeed: false }).await;

        assert!(result.is_failure());
        assert_eq!(domain_count.load(Ordering::SeqCst), 0);
        assert_eq!(store.len(), 3);
    }
}
