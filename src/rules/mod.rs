//! 替换规则模块
//!
//! # 设计思路
//!
//! 一条规则由三个持久化字段（pattern / replacement / enabled）和一个
//! 派生缓存（编译后的 `matcher`）组成。`pattern` 是唯一事实来源：
//! `matcher` 随时可以从它重建，永不落盘。
//!
//! 编译失败的规则**保留在列表中**（用户可以稍后修正），
//! 仅在应用时跳过。这保证了设置文件里一条坏规则不会丢掉用户数据。
//!
//! # 实现思路
//!
//! - `matcher: Option<Regex>` 标注 `#[serde(skip)]`，反序列化后为 `None`，
//!   由 [`Rule::compile`] 按需重建。
//! - 相等性只比较持久化字段（`Regex` 本身不可比较，也不应参与比较）。
//! - 规则应用算法归子模块 `engine`。

pub mod engine;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 单条替换规则
///
/// `replacement` 支持 `$1` 形式的反向引用，交由 `regex` 的模板展开处理。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// 匹配模式（正则，事实来源，持久化）
    pub pattern: String,
    /// 替换模板（持久化）
    pub replacement: String,
    /// 是否参与替换（持久化）
    pub enabled: bool,
    /// 编译后的匹配器（派生缓存，编译失败时为 `None`，永不持久化）
    #[serde(skip)]
    pub matcher: Option<Regex>,
}

impl Rule {
    /// 创建一条新规则并立即编译模式
    ///
    /// 模式无效时返回错误（新增入口拒绝坏规则；
    /// 从磁盘加载的坏规则另走 [`Rule::compile`] 的宽容路径）。
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, regex::Error> {
        let matcher = Regex::new(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            enabled: true,
            matcher: Some(matcher),
        })
    }

    /// 从 `pattern` 重建 `matcher`
    ///
    /// 空模式或编译失败均置 `None`；编译失败返回错误供调用方记录日志，
    /// 规则本身不被丢弃。
    pub fn compile(&mut self) -> Result<(), regex::Error> {
        self.matcher = None;
        if self.pattern.is_empty() {
            return Ok(());
        }
        self.matcher = Some(Regex::new(&self.pattern)?);
        Ok(())
    }
}

/// 只比较持久化字段，派生的 `matcher` 不参与
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.replacement == other.replacement
            && self.enabled == other.enabled
    }
}

impl Eq for Rule {}
