//! 剪贴板边界模块
//!
//! # 设计思路
//!
//! 把宿主剪贴板抽象成一个最小读写接口 [`ClipboardBackend`]，
//! 监控循环只依赖该 trait，测试可以注入内存假实现。
//!
//! 关键点是错误分类：「剪贴板里不是文本」对监控循环来说不是故障，
//! 而是一个正常分支（跳过本轮）。因此在边界处显式区分
//! [`ClipboardError::NonText`] 与硬错误，而不是在上层比对错误字符串。
//!
//! # 实现思路
//!
//! - 生产实现 [`SystemClipboard`] 包装 `arboard::Clipboard`。
//! - `arboard` 的 `ContentNotAvailable` / `ConversionFailure`
//!   映射为 `NonText`，其余映射为硬错误。
//! - 文本/大小过滤归子模块 `classify`。

pub mod classify;

/// 剪贴板边界错误
///
/// `NonText` 是分类结果而非故障：监控循环据此设置状态并跳过本轮，
/// 其余变体才按 I/O 错误处理。
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// 剪贴板当前内容不是文本（图片、文件等格式）
    #[error("剪贴板内容不是文本")]
    NonText,

    /// 无法打开 / 占用中等平台层故障
    #[error("剪贴板不可用: {0}")]
    Unavailable(String),

    /// 其他读写失败
    #[error("剪贴板读写失败: {0}")]
    Io(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ContentNotAvailable => ClipboardError::NonText,
            arboard::Error::ConversionFailure => ClipboardError::NonText,
            arboard::Error::ClipboardNotSupported => {
                ClipboardError::Unavailable("平台不支持剪贴板".to_string())
            }
            arboard::Error::ClipboardOccupied => {
                ClipboardError::Unavailable("剪贴板被其他进程占用".to_string())
            }
            other => ClipboardError::Io(other.to_string()),
        }
    }
}

/// 宿主剪贴板的最小读写接口
///
/// 监控循环的唯一外部依赖。读写均为同步调用（本地 I/O，无需超时）。
pub trait ClipboardBackend {
    /// 读取当前剪贴板文本；非文本内容返回 [`ClipboardError::NonText`]
    fn read_text(&mut self) -> Result<String, ClipboardError>;

    /// 将文本写入剪贴板（整体替换）
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// 基于 `arboard` 的系统剪贴板实现
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner = arboard::Clipboard::new()?;
        Ok(Self { inner })
    }
}

impl ClipboardBackend for SystemClipboard {
    fn read_text(&mut self) -> Result<String, ClipboardError> {
        Ok(self.inner.get_text()?)
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        Ok(self.inner.set_text(text)?)
    }
}
