//! 规则应用引擎
//!
//! # 设计思路
//!
//! 把有序规则列表从左到右折叠到输入文本上：每条启用且编译成功的规则
//! 对**当前中间结果**做一次全量替换，输出作为下一条规则的输入。
//! 列表顺序即应用顺序，由调用方控制并在持久化中原样保留。
//!
//! 确定性是硬要求：相同规则列表 + 相同输入必须得到相同输出——
//! 无随机性、无外部状态。监控循环的回写抑制正是建立在
//! 「不变的输入再应用一次仍不变」之上。
//!
//! # 实现思路
//!
//! - `Regex::replace_all` 处理所有非重叠匹配并展开 `$1` 反向引用。
//! - 禁用 / 无 matcher 的规则是空操作。

use super::Rule;

/// 将有序规则列表应用于输入文本
///
/// 禁用规则与编译失败的规则直接跳过。无任何规则命中时返回原文的拷贝。
pub fn apply_rules(rules: &[Rule], text: &str) -> String {
    let mut current = text.to_string();
    for rule in rules {
        if !rule.enabled {
            continue;
        }
        let Some(matcher) = &rule.matcher else {
            continue;
        };
        current = matcher
            .replace_all(&current, rule.replacement.as_str())
            .into_owned();
    }
    current
}
