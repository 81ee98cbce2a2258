//! 监控循环端到端测试：假剪贴板 + 真实 tokio 任务
//!
//! 覆盖：重写写回、回写抑制、空闲态零 I/O、启停开关、
//! 控制面变更的即时落盘。

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clipboard_rewrite::clipboard::{ClipboardBackend, ClipboardError};
use clipboard_rewrite::monitor::{MonitorHandle, MonitorStatus};
use clipboard_rewrite::rules::Rule;
use clipboard_rewrite::settings::{RuleStore, Settings};

/// 进程内共享的假剪贴板：内容可从测试侧改写，读写次数可观测
#[derive(Clone)]
struct FakeClipboard {
    content: Arc<Mutex<String>>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl FakeClipboard {
    fn new() -> Self {
        Self {
            content: Arc::new(Mutex::new(String::new())),
            reads: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn set(&self, text: &str) {
        *self.content.lock().expect("fake clipboard lock") = text.to_string();
    }

    fn get(&self) -> String {
        self.content.lock().expect("fake clipboard lock").clone()
    }
}

impl ClipboardBackend for FakeClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.get())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.set(text);
        Ok(())
    }
}

fn unique_temp_dir() -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock error")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("clipboard-rewrite-loop-test-{nanos}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn rule(pattern: &str, replacement: &str, enabled: bool) -> Rule {
    let mut rule = Rule {
        pattern: pattern.to_string(),
        replacement: replacement.to_string(),
        enabled,
        matcher: None,
    };
    let _ = rule.compile();
    rule
}

fn fast_settings(rules: Vec<Rule>) -> Settings {
    Settings {
        rules,
        interval_ms: 10,
    }
}

/// 空闲态→激活态的切换加首个节拍最多约 210ms，留足余量
const SETTLE: Duration = Duration::from_millis(600);

#[tokio::test(flavor = "multi_thread")]
async fn test_rewrites_clipboard_and_suppresses_feedback() {
    let dir = unique_temp_dir();
    let store = RuleStore::new(dir.join("settings.json"));
    let fake = FakeClipboard::new();

    let handle = MonitorHandle::launch(
        store,
        fast_settings(vec![rule("foo", "bar", true)]),
        fake.clone(),
    );
    handle.start();

    fake.set("foofoo");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(fake.get(), "barbar");
    assert_eq!(fake.writes.load(Ordering::SeqCst), 1);
    assert_eq!(handle.status(), MonitorStatus::Rewritten);

    // 自身写回的值在后续轮次中不再触发写入
    tokio::time::sleep(SETTLE).await;
    assert_eq!(fake.writes.load(Ordering::SeqCst), 1);
    assert_eq!(fake.get(), "barbar");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_idle_loop_does_no_clipboard_io() {
    let dir = unique_temp_dir();
    let store = RuleStore::new(dir.join("settings.json"));
    let fake = FakeClipboard::new();

    let _handle = MonitorHandle::launch(
        store,
        fast_settings(vec![rule("foo", "bar", true)]),
        fake.clone(),
    );
    // 不调用 start()

    fake.set("foofoo");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(fake.reads.load(Ordering::SeqCst), 0);
    assert_eq!(fake.writes.load(Ordering::SeqCst), 0);
    assert_eq!(fake.get(), "foofoo");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stop_halts_processing() {
    let dir = unique_temp_dir();
    let store = RuleStore::new(dir.join("settings.json"));
    let fake = FakeClipboard::new();

    let handle = MonitorHandle::launch(
        store,
        fast_settings(vec![rule("foo", "bar", true)]),
        fake.clone(),
    );
    handle.start();
    fake.set("foo one");
    tokio::time::sleep(SETTLE).await;
    assert_eq!(fake.get(), "bar one");

    handle.stop();
    assert_eq!(handle.status(), MonitorStatus::Stopped);
    tokio::time::sleep(SETTLE).await;

    fake.set("foo two");
    tokio::time::sleep(SETTLE).await;
    assert_eq!(fake.get(), "foo two");

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_settings_passes_text_through() {
    let dir = unique_temp_dir();
    let store = RuleStore::new(dir.join("missing.json"));
    // 设置文件缺失 → 空规则列表，start() 仍可用
    let settings = store.load();
    assert!(settings.rules.is_empty());

    let fake = FakeClipboard::new();
    let handle = MonitorHandle::launch(store, fast_settings(settings.rules), fake.clone());
    handle.start();

    fake.set("plain text");
    tokio::time::sleep(SETTLE).await;

    // 无规则 → 原样通过，不写回
    assert_eq!(fake.get(), "plain text");
    assert_eq!(fake.writes.load(Ordering::SeqCst), 0);

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_control_surface_mutations_persist() {
    let dir = unique_temp_dir();
    let path = dir.join("settings.json");
    let store = RuleStore::new(&path);
    let fake = FakeClipboard::new();

    let handle = MonitorHandle::launch(store.clone(), fast_settings(Vec::new()), fake);

    handle.add_rule("foo", "bar").expect("add valid rule");
    handle.add_rule(r"(\d+)", "#$1#").expect("add second rule");
    assert!(handle.add_rule("[", "x").is_err());

    let on_disk = store.load();
    assert_eq!(on_disk.rules.len(), 2);
    assert_eq!(on_disk.rules[0].pattern, "foo");

    handle.set_enabled(1, false).expect("disable rule");
    assert!(!store.load().rules[1].enabled);

    handle.delete_rule(0).expect("delete rule");
    let remaining = store.load();
    assert_eq!(remaining.rules.len(), 1);
    assert_eq!(remaining.rules[0].pattern, r"(\d+)");

    assert!(handle.set_enabled(5, true).is_err());
    assert!(handle.delete_rule(5).is_err());

    let _ = std::fs::remove_dir_all(dir);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rule_added_at_runtime_takes_effect() {
    let dir = unique_temp_dir();
    let store = RuleStore::new(dir.join("settings.json"));
    let fake = FakeClipboard::new();

    let handle = MonitorHandle::launch(store, fast_settings(Vec::new()), fake.clone());
    handle.start();

    fake.set("hello world");
    tokio::time::sleep(SETTLE).await;
    assert_eq!(fake.get(), "hello world");

    handle.add_rule("world", "clipboard").expect("add rule");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(fake.get(), "hello clipboard");

    let _ = std::fs::remove_dir_all(dir);
}
