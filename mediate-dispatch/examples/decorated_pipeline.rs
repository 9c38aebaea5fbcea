use async_trait::async_trait;
use mediate_core::{Command, ErrorCollection, ErrorEntry, Message, OperationResult};
use mediate_dispatch::context::DispatchContext;
use mediate_dispatch::decorator::{LoggingDecorator, MessageValidator, ValidationDecorator};
use mediate_dispatch::handler::MessageHandler;
use mediate_dispatch::{HandlerPipeline, Mediator, SharedHandler};
use std::sync::Arc;

#[derive(Debug)]
struct Deposit {
    amount: i64,
}

impl Message for Deposit {
    const NAME: &'static str = "Deposit";
    type Output = i64;
}

impl Command for Deposit {}

struct DepositHandler;

#[async_trait]
impl MessageHandler<Deposit> for DepositHandler {
    async fn handle(&self, _ctx: &DispatchContext, cmd: Deposit) -> OperationResult<i64> {
        OperationResult::success_with(cmd.amount)
    }
}

struct AmountValidator;

#[async_trait]
impl MessageValidator<Deposit> for AmountValidator {
    async fn validate(&self, _ctx: &DispatchContext, cmd: &Deposit) -> ErrorCollection {
        let mut errors = ErrorCollection::new();
        if cmd.amount <= 0 {
            errors.push(ErrorEntry::new("amount", "must be positive"));
        }
        errors
    }
}

#[tokio::main]
async fn main() {
    let mediator = Mediator::new();

    // 日志在最外，校验在内，最后才是业务处理器
    let handler: SharedHandler<Deposit> = HandlerPipeline::new()
        .layer(|inner| Arc::new(LoggingDecorator::with_tracing(inner)) as SharedHandler<_>)
        .layer(|inner| {
            Arc::new(ValidationDecorator::new(inner, vec![Arc::new(AmountValidator)]))
                as SharedHandler<_>
        })
        .build(Arc::new(DepositHandler));

    mediator.register_command::<Deposit, _>(handler).unwrap();

    let ctx = DispatchContext::default();

    let ok = mediator.send(&ctx, Deposit { amount: 100 }).await;
    println!("deposit(100): success={}", ok.is_success());

    let rejected = mediator.send(&ctx, Deposit { amount: -1 }).await;
    println!(
        "deposit(-1): failure={} errors={}",
        rejected.is_failure(),
        rejected.errors().len()
    );
}
