/// 消息的通用能力边界
///
/// - `NAME`：消息的稳定名称，用于日志、错误与只读视图。避免依赖 `type_name::<T>()`。
/// - `Output`:处理该消息得到的结果载荷类型；无载荷的命令使用 `()`。
///
/// 结果载荷由消息类型静态决定，调度端据此在编译期闭合处理器类型，
/// 不需要任何运行时的泛型类型构造。
pub trait Message: Send + Sync + 'static {
    /// 消息的稳定名称（建议常量字符串，不随重构变化）
    const NAME: &'static str;

    /// 处理结果的载荷类型
    type Output: Send + 'static;
}
