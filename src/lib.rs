//! # 剪贴板重写工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │              控制面（上层 UI / 无头入口 main）             │
//! │                                                          │
//! │  add_rule ── set_enabled ── delete_rule ── start/stop    │
//! │       │                                        │          │
//! └───────┼────────────────────────────────────────┼─────────┘
//!         ↕ MonitorHandle（共享状态 + 即时落盘）     │
//! ┌───────┼────────────────────────────────────────┼─────────┐
//! │       ↕              核心 (Rust)               ↕          │
//! │                                                          │
//! │  ┌─ error ────── AppError (统一错误类型)                  │
//! │  │                                                       │
//! │  ├─ settings ─── RuleStore: 规则 + 间隔的 JSON 持久化      │
//! │  │                                                       │
//! │  ├─ rules ────── Rule (pattern/replacement/enabled)      │
//! │  │   └─ engine       有序折叠式正则替换                    │
//! │  │                                                       │
//! │  ├─ clipboard ── ClipboardBackend trait + arboard 实现    │
//! │  │   └─ classify     文本判定 / 大小上限                   │
//! │  │                                                       │
//! │  └─ monitor ──── 轮询循环状态机 + SharedState             │
//! │      └─ cycle        读→分类→对比→重写→写回 单轮语义       │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，配置类错误只降级不致命 |
//! | [`settings`] | 设置文件（规则列表 + 轮询间隔）的加载与保存 |
//! | [`rules`] | 规则类型与有序应用引擎，坏正则保留但跳过 |
//! | [`clipboard`] | 剪贴板边界抽象、非文本错误分类、内容过滤 |
//! | [`monitor`] | 常驻监控循环、共享状态、控制面句柄 |

pub mod clipboard;
pub mod error;
pub mod monitor;
pub mod rules;
pub mod settings;
