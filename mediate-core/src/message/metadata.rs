use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 消息元数据
///
/// 所有字段显式注入：本库不读取环境时钟或当前用户，
/// 由调用方在构造消息时给定，保证构造过程确定、可测。
#[derive(Builder, Debug, Clone, Serialize, Deserialize)]
pub struct MessageInfo {
    id: Uuid,
    created_at: DateTime<Utc>,
    created_by: String,
}

impl MessageInfo {
    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }
}

/// 自描述能力：消息可选实现，暴露自身元数据
pub trait SelfDescribing {
    fn info(&self) -> &MessageInfo;
}
