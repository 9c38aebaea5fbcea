//! 键控错误条目与错误集合
//!
//! - `ErrorEntry`：键 + 消息列表 + 可选的底层错误（anyhow）；
//! - `ErrorCollection`：按插入顺序保存条目，按键合并（消息去重并集、底层错误聚合）。
//!
use serde::Serialize;
use std::sync::Arc;

/// 单个键控错误：键标识出错的字段/参数，消息面向人读，底层错误保留原因链
#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorEntry {
    key: String,
    messages: Vec<String>,
    #[serde(skip)]
    sources: Vec<Arc<anyhow::Error>>,
}

impl ErrorEntry {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            messages: vec![message.into()],
            sources: Vec::new(),
        }
    }

    /// 追加一条消息（重复消息在合并时去重）
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// 附加底层错误（合并时聚合而非覆盖）
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn sources(&self) -> &[Arc<anyhow::Error>] {
        &self.sources
    }

    /// 同键合并：消息取并集（保持先到顺序、去重），底层错误聚合
    fn merge(&mut self, other: ErrorEntry) {
        for message in other.messages {
            if !self.messages.contains(&message) {
                self.messages.push(message);
            }
        }
        self.sources.extend(other.sources);
    }
}

/// 有序键控错误集合
#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorCollection {
    entries: Vec<ErrorEntry>,
}

impl ErrorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 插入一个条目；已存在同键条目时按键合并
    pub fn push(&mut self, entry: ErrorEntry) {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(existing) => existing.merge(entry),
            None => self.entries.push(entry),
        }
    }

    /// 并入另一个集合（逐条按键合并）
    pub fn merge(&mut self, other: ErrorCollection) {
        for entry in other.entries {
            self.push(entry);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ErrorEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.entries.iter()
    }
}

impl From<ErrorEntry> for ErrorCollection {
    fn from(entry: ErrorEntry) -> Self {
        let mut collection = Self::new();
        collection.push(entry);
        collection
    }
}

impl FromIterator<ErrorEntry> for ErrorCollection {
    fn from_iter<I: IntoIterator<Item = ErrorEntry>>(iter: I) -> Self {
        let mut collection = Self::new();
        for entry in iter {
            collection.push(entry);
        }
        collection
    }
}
