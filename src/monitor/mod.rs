//! 剪贴板监控模块
//!
//! # 设计思路
//!
//! 一个常驻后台任务按轮询间隔执行「读 → 分类 → 对比 → 重写 → 写回」
//! 循环；控制面（上层 UI 或无头入口）通过 [`MonitorHandle`]
//! 增删规则、启停监控、读取状态。两个执行上下文共享的只有三样东西：
//! 规则列表、监控开关、状态快照，全部集中在 [`SharedState`] 内：
//!
//! - 规则列表用 `Mutex` 保护：单条规则的增删改对循环是原子的，
//!   迭代永远看不到插入 / 删除进行到一半的列表。
//! - 监控开关用 `AtomicBool`：循环在每轮顶部读取，
//!   切换在一个休眠周期内必然可见。
//! - 状态用 `Mutex` 包一个小枚举：循环写、控制面读，单向流动。
//!
//! `last_written`（上次写回值）只属于循环任务，不进共享状态。
//!
//! # 实现思路
//!
//! - 空闲态（监控关闭）按固定 200ms 短节拍休眠，只为及时响应开关，
//!   不做任何剪贴板 I/O；激活态由 `tokio::time::interval` 驱动，
//!   `MissedTickBehavior::Skip` 保证单轮超时只丢节拍、不积压。
//! - 控制面的每次规则变更同步落盘；落盘失败记日志，
//!   内存状态仍是权威（下次成功保存前磁盘旧状态不变）。
//! - 锁中毒按恢复处理：记日志后继续使用恢复数据。

mod cycle;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::clipboard::ClipboardBackend;
use crate::error::AppError;
use crate::rules::Rule;
use crate::settings::{RuleStore, Settings};

/// 空闲态的固定短节拍（独立于轮询间隔）
const IDLE_TICK: Duration = Duration::from_millis(200);

/// 监控循环对外展示的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorStatus {
    /// 初始态，尚无动作
    Waiting,
    /// 监控已开启
    Started,
    /// 监控已停止
    Stopped,
    /// 最近一轮：内容非文本，已跳过
    NonText,
    /// 最近一轮：内容超长，已跳过
    TooLarge,
    /// 最近一轮：重写内容已写回
    Rewritten,
    /// 最近一轮：写回重试耗尽
    WriteFailed,
}

impl std::fmt::Display for MonitorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MonitorStatus::Waiting => "Waiting for actions",
            MonitorStatus::Started => "Monitoring started",
            MonitorStatus::Stopped => "Monitoring stopped",
            MonitorStatus::NonText => "Non-text content detected, skipping",
            MonitorStatus::TooLarge => "Text too large, skipping",
            MonitorStatus::Rewritten => "Successfully wrote to clipboard",
            MonitorStatus::WriteFailed => "Failed to write to clipboard",
        };
        f.write_str(text)
    }
}

/// 循环任务与控制面之间的共享状态
pub struct SharedState {
    rules: Mutex<Vec<Rule>>,
    monitoring: AtomicBool,
    status: Mutex<MonitorStatus>,
}

impl SharedState {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: Mutex::new(rules),
            monitoring: AtomicBool::new(false),
            status: Mutex::new(MonitorStatus::Waiting),
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> MonitorStatus {
        *self.lock_status()
    }

    pub(crate) fn set_status(&self, status: MonitorStatus) {
        *self.lock_status() = status;
    }

    pub(crate) fn lock_rules(&self) -> MutexGuard<'_, Vec<Rule>> {
        match self.rules.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("规则列表锁中毒，继续使用恢复数据");
                poisoned.into_inner()
            }
        }
    }

    fn lock_status(&self) -> MutexGuard<'_, MonitorStatus> {
        match self.status.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("状态锁中毒，继续使用恢复数据");
                poisoned.into_inner()
            }
        }
    }
}

/// 控制面句柄：增删规则、启停监控、读取状态
///
/// 所有规则变更立即持久化，保持磁盘与内存最终一致。
pub struct MonitorHandle {
    state: Arc<SharedState>,
    store: RuleStore,
    interval_ms: u64,
}

impl MonitorHandle {
    /// 基于已加载的设置启动监控任务
    ///
    /// 任务立即进入空闲态；调用 [`start`](Self::start) 后开始轮询。
    /// 任务随进程存活，无终止态。
    pub fn launch<B>(store: RuleStore, settings: Settings, backend: B) -> Self
    where
        B: ClipboardBackend + Send + 'static,
    {
        let interval = settings.interval();
        let state = Arc::new(SharedState::new(settings.rules));

        let loop_state = Arc::clone(&state);
        tokio::spawn(run_loop(loop_state, backend, interval));

        Self {
            state,
            store,
            interval_ms: settings.interval_ms,
        }
    }

    /// 开启监控；循环在一个空闲节拍内感知
    pub fn start(&self) {
        self.state.monitoring.store(true, Ordering::SeqCst);
        self.state.set_status(MonitorStatus::Started);
        log::info!("📋 剪贴板监控已开启");
    }

    /// 停止监控；当前轮执行完后循环回到空闲态
    pub fn stop(&self) {
        self.state.monitoring.store(false, Ordering::SeqCst);
        self.state.set_status(MonitorStatus::Stopped);
        log::info!("📋 剪贴板监控已停止");
    }

    /// 新增一条规则（立即编译，模式无效直接拒绝）并持久化
    pub fn add_rule(&self, pattern: &str, replacement: &str) -> Result<(), AppError> {
        let rule = Rule::new(pattern, replacement)
            .map_err(|e| AppError::Rule(format!("正则无效: {}", e)))?;
        self.state.lock_rules().push(rule);
        self.persist();
        Ok(())
    }

    /// 启用 / 禁用指定规则并持久化
    pub fn set_enabled(&self, index: usize, enabled: bool) -> Result<(), AppError> {
        {
            let mut rules = self.state.lock_rules();
            let rule = rules
                .get_mut(index)
                .ok_or_else(|| AppError::Rule(format!("规则索引越界: {}", index)))?;
            rule.enabled = enabled;
        }
        self.persist();
        Ok(())
    }

    /// 删除指定规则并持久化
    pub fn delete_rule(&self, index: usize) -> Result<(), AppError> {
        {
            let mut rules = self.state.lock_rules();
            if index >= rules.len() {
                return Err(AppError::Rule(format!("规则索引越界: {}", index)));
            }
            rules.remove(index);
        }
        self.persist();
        Ok(())
    }

    /// 当前规则列表快照（供展示）
    pub fn rules(&self) -> Vec<Rule> {
        self.state.lock_rules().clone()
    }

    pub fn is_monitoring(&self) -> bool {
        self.state.is_monitoring()
    }

    pub fn status(&self) -> MonitorStatus {
        self.state.status()
    }

    /// 落盘当前规则列表；失败记日志，不影响内存状态
    fn persist(&self) {
        let settings = Settings {
            rules: self.rules(),
            interval_ms: self.interval_ms,
        };
        if let Err(err) = self.store.save(&settings) {
            log::warn!("💾 保存设置到 {} 失败: {}", self.store.path().display(), err);
        }
    }
}

/// 监控主循环：随进程存活
async fn run_loop<B: ClipboardBackend + Send>(
    state: Arc<SharedState>,
    mut backend: B,
    poll_interval: Duration,
) {
    let mut last_written = String::new();
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        if !state.is_monitoring() {
            tokio::time::sleep(IDLE_TICK).await;
            ticker.reset();
            continue;
        }

        ticker.tick().await;
        if !state.is_monitoring() {
            continue;
        }
        cycle::run_cycle(&state, &mut backend, &mut last_written).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_ui_strings() {
        assert_eq!(MonitorStatus::Waiting.to_string(), "Waiting for actions");
        assert_eq!(MonitorStatus::Started.to_string(), "Monitoring started");
        assert_eq!(MonitorStatus::Stopped.to_string(), "Monitoring stopped");
        assert_eq!(
            MonitorStatus::NonText.to_string(),
            "Non-text content detected, skipping"
        );
        assert_eq!(MonitorStatus::TooLarge.to_string(), "Text too large, skipping");
        assert_eq!(
            MonitorStatus::Rewritten.to_string(),
            "Successfully wrote to clipboard"
        );
        assert_eq!(
            MonitorStatus::WriteFailed.to_string(),
            "Failed to write to clipboard"
        );
    }

    #[test]
    fn test_shared_state_starts_idle() {
        let state = SharedState::new(Vec::new());
        assert!(!state.is_monitoring());
        assert_eq!(state.status(), MonitorStatus::Waiting);
    }
}
