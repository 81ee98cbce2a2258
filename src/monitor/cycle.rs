//! 监控单轮执行
//!
//! # 设计思路
//!
//! 把一轮「读 → 分类 → 对比 → 重写 → 写回」做成独立函数，
//! 对剪贴板后端泛型化，循环调度与单轮语义解耦，单轮可离线测试。
//!
//! 分支优先级（与状态流转一一对应）：
//! 1. 读失败：`NonText` 是分类结果（置状态后结束本轮），
//!    其他读错误只记日志、提前结束，状态不变。
//! 2. 非文本 / 超长内容：置对应状态，不进入规则引擎。
//! 3. 与上次写回值相同：跳过（省去重复计算，属于尽力而为的抑制，
//!    不是正确性保证——外部进程原样放回旧文本时该启发式会失效）。
//! 4. 重写结果与原文相同：什么都不写。这是核心回写避免机制——
//!    只有规则真正触发的变化才会写回剪贴板。
//! 5. 重写结果不同：带上限重试写回；成功后记下写回值，
//!    下一轮读到同一值即识别为自身产物，不再处理。
//!
//! # 实现思路
//!
//! - 写回固定 2 次尝试、200ms 退避；耗尽后置失败状态，
//!   `last_written` 保持不变。
//! - 规则锁只在调用引擎的瞬间持有，不跨越剪贴板 I/O。

use std::time::Duration;

use crate::clipboard::classify::{is_text_content, is_too_large};
use crate::clipboard::{ClipboardBackend, ClipboardError};
use crate::rules::engine::apply_rules;

use super::{MonitorStatus, SharedState};

/// 写回重试上限
const WRITE_MAX_ATTEMPTS: u32 = 2;

/// 重试之间的退避
const WRITE_RETRY_DELAY: Duration = Duration::from_millis(200);

/// 执行一轮监控
///
/// `last_written` 由调用方（循环任务）独占持有，跨轮传递。
pub(super) async fn run_cycle<B: ClipboardBackend>(
    state: &SharedState,
    backend: &mut B,
    last_written: &mut String,
) {
    let current = match backend.read_text() {
        Ok(text) => text,
        Err(ClipboardError::NonText) => {
            state.set_status(MonitorStatus::NonText);
            return;
        }
        Err(err) => {
            log::warn!("📋 读取剪贴板失败: {}", err);
            return;
        }
    };

    if !is_text_content(&current) {
        state.set_status(MonitorStatus::NonText);
        return;
    }
    if is_too_large(&current) {
        state.set_status(MonitorStatus::TooLarge);
        return;
    }

    if current == *last_written {
        return;
    }

    let rewritten = {
        let rules = state.lock_rules();
        apply_rules(&rules, &current)
    };

    if rewritten == current {
        return;
    }

    match write_with_retry(backend, &rewritten).await {
        Ok(()) => {
            log::debug!("📋 已写回重写内容（{} 字符）", rewritten.chars().count());
            state.set_status(MonitorStatus::Rewritten);
            *last_written = rewritten;
        }
        Err(err) => {
            log::warn!("📋 写回剪贴板失败: {}", err);
            state.set_status(MonitorStatus::WriteFailed);
        }
    }
}

/// 带上限重试的剪贴板写入
async fn write_with_retry<B: ClipboardBackend>(
    backend: &mut B,
    text: &str,
) -> Result<(), ClipboardError> {
    let mut last_err = None;
    for attempt in 1..=WRITE_MAX_ATTEMPTS {
        match backend.write_text(text) {
            Ok(()) => return Ok(()),
            Err(err) => {
                log::warn!("📋 第 {} 次写入剪贴板失败: {}", attempt, err);
                last_err = Some(err);
                if attempt < WRITE_MAX_ATTEMPTS {
                    tokio::time::sleep(WRITE_RETRY_DELAY).await;
                }
            }
        }
    }
    Err(last_err.unwrap_or(ClipboardError::Io("写入失败".to_string())))
}
