//! 内容分类模块
//!
//! # 设计思路
//!
//! 剪贴板读出的字符串不一定适合做正则重写：可能混入二进制控制字节
//! （某些应用会把非文本数据塞进文本格式），也可能大到让正则与序列化
//! 的开销失控。本模块在内容进入规则引擎之前做两道门：
//! 文本判定与大小上限。被拒内容按「跳过」处理，不算错误。
//!
//! # 实现思路
//!
//! - 控制字节判定使用预编译正则，排除集为 C0 控制区中
//!   除 Tab / LF / CR 之外的字节。
//! - 通过 `once_cell::sync::Lazy` 在首次调用时编译，后续零成本复用。
//! - 大小上限按字节数计，超限内容跳过而非截断。

use once_cell::sync::Lazy;
use regex::Regex;

/// 文本大小上限：512 × 512 字节（256 KiB）
///
/// 超过此上限的内容跳过重写，避免正则回溯与写回成本失控。
pub const MAX_TEXT_SIZE: usize = 512 * 512;

/// 非法控制字节集：C0 控制区去掉 Tab(09)、LF(0A)、CR(0D)
static CONTROL_BYTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F]").unwrap());

/// 判断内容是否为可处理文本
///
/// 非空且不含非法控制字节即为文本。常见空白（Tab、换行、回车）允许。
pub fn is_text_content(content: &str) -> bool {
    !content.is_empty() && !CONTROL_BYTES.is_match(content)
}

/// 判断内容是否超过大小上限
pub fn is_too_large(content: &str) -> bool {
    content.len() > MAX_TEXT_SIZE
}
