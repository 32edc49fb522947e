//! 配置元数据生成器
//!
//! 配置 ID 与时间戳均通过参数注入，测试中可替换为确定性实现。

use chrono::Utc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// 配置 ID 生成器
pub trait IdGenerator: Send + Sync {
    /// 生成新的唯一 ID
    fn new_id(&self) -> String;
}

/// 时钟
pub trait Clock: Send + Sync {
    /// 当前时间戳（毫秒）
    fn now_millis(&self) -> i64;
}

/// UUID v4 生成器
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn new_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// 按序生成 `{prefix}-{n}` 形式 ID 的生成器
#[derive(Debug)]
pub struct SequenceIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequenceIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }

    /// 已生成的 ID 数量
    pub fn issued(&self) -> u64 {
        self.next.load(Ordering::SeqCst) - 1
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn new_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

/// 固定时钟，可手动推进
#[derive(Debug)]
pub struct FixedClock {
    now: AtomicI64,
    reads: AtomicU64,
}

impl FixedClock {
    pub fn new(now_millis: i64) -> Self {
        Self {
            now: AtomicI64::new(now_millis),
            reads: AtomicU64::new(0),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    /// 被读取的次数
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.now.load(Ordering::SeqCst)
    }
}
