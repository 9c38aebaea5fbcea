//! HTTP 风格状态码常量
//!
//! 结果模型只携带整数码，不绑定任何 HTTP 实现；此处仅列出本库用到的取值。

pub const OK: u16 = 200;
pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const UNPROCESSABLE_ENTITY: u16 = 422;
pub const INTERNAL_SERVER_ERROR: u16 = 500;
