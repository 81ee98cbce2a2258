//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义全局统一的 `AppError` 枚举，替代各模块中分散的
//! `.map_err(|e| e.to_string())`、`format!(...)`、`expect()` 等不一致模式。
//!
//! 核心原则：配置类错误（设置文件损坏、正则无效）只降级不致命，
//! 因此大部分调用方对 `AppError` 的处理是记录日志后继续运行。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 剪贴板边界有独立的 [`ClipboardError`](crate::clipboard::ClipboardError)，
//!   通过 `From` 转换并入 `AppError`，无需手动 map。

use crate::clipboard::ClipboardError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 剪贴板读写操作失败
    #[error("剪贴板操作失败: {0}")]
    Clipboard(#[from] ClipboardError),

    /// 设置文件读写 / 序列化失败
    #[error("设置存储错误: {0}")]
    Settings(String),

    /// 规则操作失败（正则无效、索引越界）
    #[error("规则错误: {0}")]
    Rule(String),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),
}
