//! Compile-time defaults shared by the CLI parser and the validators.

pub const DEFAULT_MAX_ANSWER_SECONDS: u64 = 90;
pub const MIN_ANSWER_SECONDS: u64 = 5;
pub const MAX_ANSWER_SECONDS: u64 = 600;

pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 64;

pub const DEFAULT_SEMANTIC_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_CLOUD_STT_TIMEOUT_MS: u64 = 15_000;
pub const MIN_HTTP_TIMEOUT_MS: u64 = 500;
pub const MAX_HTTP_TIMEOUT_MS: u64 = 120_000;

/// Hard cap on the practice question bank.
pub const MAX_QUESTION_BANK: usize = 10;
