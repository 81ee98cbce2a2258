//! # 剪贴板重写工具 — 无头入口
//!
//! 本文件仅负责初始化：日志、设置加载、监控任务启动与退出等待。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use clipboard_rewrite::clipboard::SystemClipboard;
use clipboard_rewrite::monitor::MonitorHandle;
use clipboard_rewrite::settings::RuleStore;

/// 设置文件默认放在工作目录下
const SETTINGS_FILE: &str = "settings.json";

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = RuleStore::new(SETTINGS_FILE);
    let settings = store.load();
    log::info!(
        "📄 已加载 {} 条规则，轮询间隔 {:?}",
        settings.rules.len(),
        settings.interval()
    );

    let backend = match SystemClipboard::new() {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("📋 打开系统剪贴板失败，无法启动: {}", err);
            std::process::exit(1);
        }
    };

    let handle = MonitorHandle::launch(store, settings, backend);
    handle.start();
    log::info!("📋 状态: {}", handle.status());

    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("收到 Ctrl-C，正在退出"),
        Err(err) => log::error!("等待退出信号失败: {}", err),
    }
    handle.stop();
}
