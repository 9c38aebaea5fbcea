use async_trait::async_trait;
use mediate_core::result::status_code;
use mediate_core::{Command, ErrorCollection, ErrorEntry, Message, Notification, OperationResult};
use mediate_dispatch::context::DispatchContext;
use mediate_dispatch::decorator::{
    DomainEventDecorator, HandlerLogger, LoggingDecorator, MessageValidator, TransactionDecorator,
    TransactionProvider, TransactionScope, ValidationDecorator,
};
use mediate_dispatch::handler::{MessageHandler, NotificationHandler};
use mediate_dispatch::outbox::{PendingNotification, PendingNotifications};
use mediate_dispatch::{HandlerPipeline, Mediator, SharedHandler};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
struct PlaceOrder {
    amount: i64,
}

impl Message for PlaceOrder {
    const NAME: &'static str = "PlaceOrder";
    type Output = u64;
}

impl Command for PlaceOrder {}

#[derive(Debug)]
struct OrderPlaced;

impl Notification for OrderPlaced {
    const NAME: &'static str = "OrderPlaced";
    const DOMAIN_EVENT: bool = true;
}

#[derive(Default)]
struct Outbox {
    entries: Mutex<Vec<PendingNotification>>,
}

impl Outbox {
    fn push(&self, entry: PendingNotification) {
        self.entries.lock().unwrap().push(entry);
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl PendingNotifications for Outbox {
    fn pending(&self) -> Vec<PendingNotification> {
        self.entries.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

struct PlaceOrderHandler {
    outbox: Arc<Outbox>,
    invoked: Arc<AtomicUsize>,
}

#[async_trait]
impl MessageHandler<PlaceOrder> for PlaceOrderHandler {
    async fn handle(&self, _ctx: &DispatchContext, message: PlaceOrder) -> OperationResult<u64> {
        self.invoked.fetch_add(1, Ordering::SeqCst);
        self.outbox.push(PendingNotification::of(OrderPlaced));
        OperationResult::success_with(message.amount as u64)
    }
}

struct AmountValidator;

#[async_trait]
impl MessageValidator<PlaceOrder> for AmountValidator {
    async fn validate(&self, _ctx: &DispatchContext, message: &PlaceOrder) -> ErrorCollection {
        let mut errors = ErrorCollection::new();
        if message.amount <= 0 {
            errors.push(ErrorEntry::new("amount", "must be positive"));
        }
        errors
    }
}

struct Scope {
    completed: Arc<AtomicBool>,
}

#[async_trait]
impl TransactionScope for Scope {
    async fn complete(&mut self) -> anyhow::Result<()> {
        self.completed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

struct Provider {
    began: Arc<AtomicUsize>,
    completed: Arc<AtomicBool>,
}

#[async_trait]
impl TransactionProvider for Provider {
    async fn begin(&self, _message: &'static str) -> Option<Box<dyn TransactionScope>> {
        self.began.fetch_add(1, Ordering::SeqCst);
        Some(Box::new(Scope {
            completed: self.completed.clone(),
        }))
    }
}

struct Projection {
    applied: Arc<AtomicUsize>,
}

#[async_trait]
impl NotificationHandler<OrderPlaced> for Projection {
    fn handler_name(&self) -> &str {
        "order-projection"
    }

    async fn handle(&self, _ctx: &DispatchContext, _notification: &OrderPlaced) -> anyhow::Result<()> {
        self.applied.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct SpyLogger {
    successes: AtomicUsize,
    failures: AtomicUsize,
}

impl HandlerLogger for SpyLogger {
    fn on_entry(&self, _name: &'static str) {}

    fn on_success(&self, _name: &'static str, _status_code: u16) {
        self.successes.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failure(&self, _name: &'static str, _status_code: u16, _errors: &ErrorCollection) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }

    fn on_exit(&self, _name: &'static str) {}
}

struct Harness {
    mediator: Mediator,
    outbox: Arc<Outbox>,
    invoked: Arc<AtomicUsize>,
    tx_began: Arc<AtomicUsize>,
    tx_completed: Arc<AtomicBool>,
    applied: Arc<AtomicUsize>,
    logger: Arc<SpyLogger>,
}

// 日志(最外) -> 校验 -> 事务 -> 领域事件 -> 业务处理器
fn build_harness() -> Harness {
    let mediator = Mediator::new();
    let outbox = Arc::new(Outbox::default());
    let invoked = Arc::new(AtomicUsize::new(0));
    let tx_began = Arc::new(AtomicUsize::new(0));
    let tx_completed = Arc::new(AtomicBool::new(false));
    let applied = Arc::new(AtomicUsize::new(0));
    let logger = Arc::new(SpyLogger::default());

    let projection = Arc::new(Projection {
        applied: applied.clone(),
    });
    mediator.register_notification_handler::<OrderPlaced, _>(projection);

    let publisher = mediator.publisher();
    let provider = Arc::new(Provider {
        began: tx_began.clone(),
        completed: tx_completed.clone(),
    });

    let handler: SharedHandler<PlaceOrder> = {
        let outbox = outbox.clone();
        let logger = logger.clone();
        HandlerPipeline::new()
            .layer({
                let logger = logger.clone();
                move |inner| Arc::new(LoggingDecorator::new(inner, logger.clone())) as SharedHandler<_>
            })
            .layer(|inner| {
                Arc::new(ValidationDecorator::new(inner, vec![Arc::new(AmountValidator)]))
                    as SharedHandler<_>
            })
            .layer({
                let provider = provider.clone();
                move |inner| {
                    Arc::new(TransactionDecorator::new(inner, provider.clone()))
                        as SharedHandler<_>
                }
            })
            .layer({
                let outbox = outbox.clone();
                let publisher = publisher.clone();
                move |inner| {
                    Arc::new(DomainEventDecorator::new(
                        inner,
                        outbox.clone(),
                        publisher.clone(),
                    )) as SharedHandler<_>
                }
            })
            .build(Arc::new(PlaceOrderHandler {
                outbox: outbox.clone(),
                invoked: invoked.clone(),
            }))
    };

    mediator
        .register_command::<PlaceOrder, _>(handler)
        .unwrap();

    Harness {
        mediator,
        outbox,
        invoked,
        tx_began,
        tx_completed,
        applied,
        logger,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn full_pipeline_commits_and_flushes_on_success() {
    let h = build_harness();
    let ctx = DispatchContext {
        correlation_id: Some("cor-1".into()),
        ..DispatchContext::default()
    };

    let result = h.mediator.send(&ctx, PlaceOrder { amount: 120 }).await;

    assert!(result.is_success());
    assert_eq!(result.into_value(), Some(120));
    assert_eq!(h.invoked.load(Ordering::SeqCst), 1);
    assert_eq!(h.tx_began.load(Ordering::SeqCst), 1);
    assert!(h.tx_completed.load(Ordering::SeqCst));
    assert_eq!(h.applied.load(Ordering::SeqCst), 1);
    assert_eq!(h.outbox.len(), 0);
    assert_eq!(h.logger.successes.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn invalid_command_short_circuits_before_handler_and_transaction_stays_uncommitted() {
    let h = build_harness();
    let ctx = DispatchContext::default();

    let result = h.mediator.send(&ctx, PlaceOrder { amount: -3 }).await;

    assert!(result.is_failure());
    assert_eq!(result.status_code(), status_code::BAD_REQUEST);
    assert!(result.errors().get("amount").is_some());
    assert_eq!(h.invoked.load(Ordering::SeqCst), 0);
    // 校验在事务层之外短路，事务从未开启
    assert_eq!(h.tx_began.load(Ordering::SeqCst), 0);
    assert!(!h.tx_completed.load(Ordering::SeqCst));
    assert_eq!(h.applied.load(Ordering::SeqCst), 0);
    assert_eq!(h.logger.failures.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn publish_reaches_every_subscriber() {
    let h = build_harness();
    let extra = Arc::new(AtomicUsize::new(0));
    h.mediator
        .register_notification_handler::<OrderPlaced, _>(Arc::new(Projection {
            applied: extra.clone(),
        }));

    let ctx = DispatchContext::default();
    h.mediator.publish(&ctx, OrderPlaced).await.unwrap();

    assert_eq!(h.applied.load(Ordering::SeqCst), 1);
    assert_eq!(extra.load(Ordering::SeqCst), 1);
}
