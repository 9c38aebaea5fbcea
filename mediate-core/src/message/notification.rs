/// 通知（Notification）
///
/// 广播给零到多个处理器的消息，与路由到唯一处理器的命令/查询相对。
/// 没有结果载荷；处理器之间无顺序保证。
pub trait Notification: Send + Sync + 'static {
    /// 通知的稳定名称
    const NAME: &'static str;

    /// 是否为领域事件。待发通知被类型擦除进入暂存区后，
    /// 领域事件装饰器依赖该标记做子类型过滤。
    const DOMAIN_EVENT: bool = false;
}
