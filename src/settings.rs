//! 设置持久化模块（规则存储）
//!
//! # 设计思路
//!
//! 设置文件是人类可读、可 diff 的 JSON：顶层是有序规则数组
//! `{pattern, replacement, enabled}` 加轮询间隔 `interval_ms`。
//! 规则数组的顺序就是应用顺序，加载与保存必须原样保留。
//!
//! 容错原则：
//! - 文件缺失 / 无法解析 → 回退为空规则列表 + 默认间隔，记日志，不报错。
//! - 单条规则正则无效 → 逐条记日志，该规则保留（matcher 缺失），
//!   用户后续的有效编辑不会丢失。
//! - 保存失败 → 记日志，磁盘上的旧状态保持不变，内存状态仍是权威。
//!
//! # 实现思路
//!
//! - `serde_json::to_string_pretty` 保证稳定缩进；编译产物 `matcher`
//!   通过 `#[serde(skip)]` 排除在持久化之外。
//! - 间隔缺失或为零时回退默认值 500ms。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::rules::Rule;

/// 默认轮询间隔（毫秒）
pub const DEFAULT_INTERVAL_MS: u64 = 500;

fn default_interval_ms() -> u64 {
    DEFAULT_INTERVAL_MS
}

/// 持久化聚合：有序规则列表 + 轮询间隔
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// 轮询间隔；零值（等同缺失）回退默认值
    pub fn interval(&self) -> Duration {
        if self.interval_ms == 0 {
            Duration::from_millis(DEFAULT_INTERVAL_MS)
        } else {
            Duration::from_millis(self.interval_ms)
        }
    }
}

/// 规则存储：负责 Settings 与磁盘之间的往返
#[derive(Debug, Clone)]
pub struct RuleStore {
    path: PathBuf,
}

impl RuleStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 从磁盘加载设置
    ///
    /// 任何失败都降级为默认设置并记日志——配置错误永不致命。
    /// 每条非空 `pattern` 尝试编译；失败的规则保留在列表中但无 matcher。
    pub fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) => {
                log::warn!(
                    "📄 设置文件 {} 不可读（{}），使用默认设置",
                    self.path.display(),
                    err
                );
                return Settings::default();
            }
        };

        let mut settings: Settings = match serde_json::from_str(&content) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!(
                    "📄 设置文件 {} 解析失败（{}），使用默认设置",
                    self.path.display(),
                    err
                );
                return Settings::default();
            }
        };

        for (index, rule) in settings.rules.iter_mut().enumerate() {
            if let Err(err) = rule.compile() {
                log::warn!("⚠️ 第 {} 条规则的正则无效，已跳过编译: {}", index, err);
            }
        }

        settings
    }

    /// 将设置写入磁盘（稳定键序 + 缩进，便于 diff）
    ///
    /// 只序列化持久化字段；失败由调用方记日志后继续，旧文件不受影响。
    pub fn save(&self, settings: &Settings) -> Result<(), AppError> {
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
