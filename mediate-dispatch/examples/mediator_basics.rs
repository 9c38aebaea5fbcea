use async_trait::async_trait;
use mediate_core::{Command, Message, OperationResult, Query};
use mediate_dispatch::Mediator;
use mediate_dispatch::context::DispatchContext;
use mediate_dispatch::handler::MessageHandler;
use std::sync::Arc;

#[derive(Debug)]
struct CreateUser {
    name: String,
}

impl Message for CreateUser {
    const NAME: &'static str = "CreateUser";
    type Output = ();
}

impl Command for CreateUser {}

struct CreateUserHandler;

#[async_trait]
impl MessageHandler<CreateUser> for CreateUserHandler {
    async fn handle(&self, _ctx: &DispatchContext, cmd: CreateUser) -> OperationResult<()> {
        println!("CreateUser: name={}", cmd.name);
        OperationResult::success()
    }
}

#[derive(Debug)]
struct CountUsers;

impl Message for CountUsers {
    const NAME: &'static str = "CountUsers";
    type Output = usize;
}

impl Query for CountUsers {}

struct CountUsersHandler;

#[async_trait]
impl MessageHandler<CountUsers> for CountUsersHandler {
    async fn handle(&self, _ctx: &DispatchContext, _q: CountUsers) -> OperationResult<usize> {
        OperationResult::success_with(1)
    }
}

#[tokio::main]
async fn main() {
    let mediator = Mediator::new();
    mediator
        .register_command::<CreateUser, _>(Arc::new(CreateUserHandler))
        .unwrap();
    mediator
        .register_query::<CountUsers, _>(Arc::new(CountUsersHandler))
        .unwrap();

    let ctx = DispatchContext {
        correlation_id: Some("cor-1".into()),
        ..DispatchContext::default()
    };

    let result = mediator
        .send(
            &ctx,
            CreateUser {
                name: "Alice".into(),
            },
        )
        .await;
    println!("send: success={}", result.is_success());

    let result = mediator.fetch(&ctx, CountUsers).await;
    println!("fetch: value={:?}", result.into_value());

    // 未注册的命令 -> 返回 500 失败结果，而非错误
    #[derive(Debug)]
    struct UpdateUser;

    impl Message for UpdateUser {
        const NAME: &'static str = "UpdateUser";
        type Output = ();
    }

    impl Command for UpdateUser {}

    let result = mediator.send(&ctx, UpdateUser).await;
    eprintln!(
        "unregistered: failure={} status={}",
        result.is_failure(),
        result.status_code()
    );
}
