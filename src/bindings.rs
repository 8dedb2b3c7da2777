//! 参数登记与合并：按覆盖语义合并命名参数，原样字面量替换进 SQL 文本。

use crate::flavor::Flavor;
use crate::value::{BindValue, SqlValue};

/// 有序的参数映射：参数名 → 值。
///
/// 合并时后来者覆盖先来者（保留首次出现的位置）。比较相等时不关心顺序。
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<(String, SqlValue)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// 写入一个参数；同名参数的值被覆盖。
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SqlValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// 按顺序把 `other` 覆盖到自身。
    pub fn merge(&mut self, other: &Bindings) {
        for (name, value) in &other.entries {
            self.insert(name.clone(), value.clone());
        }
    }

    pub fn get(&self, name: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn into_vec(self) -> Vec<(String, SqlValue)> {
        self.entries
    }
}

impl PartialEq for Bindings {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(n, v)| other.get(n).is_some_and(|ov| ov == v))
    }
}

impl<K, V> FromIterator<(K, V)> for Bindings
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut b = Self::new();
        for (k, v) in iter {
            b.insert(k, v);
        }
        b
    }
}

impl IntoIterator for Bindings {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// 链上收集到的原始登记（含原样字面量），同样是覆盖语义。
#[derive(Debug, Clone, Default)]
pub(crate) struct BindRegistry {
    entries: Vec<(String, BindValue)>,
}

impl BindRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, value: &BindValue) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value.clone(),
            None => self.entries.push((name.to_string(), value.clone())),
        }
    }

    pub(crate) fn merge_bindings(&mut self, other: &Bindings) {
        for (name, value) in other.iter() {
            self.insert(name, &BindValue::Value(value.clone()));
        }
    }

    /// 拆分为返回给调用方的参数映射和需要替换进文本的字面量。
    pub(crate) fn split(self) -> (Bindings, Vec<(String, String)>) {
        let mut bindings = Bindings::new();
        let mut literals = Vec::new();
        for (name, value) in self.entries {
            match value {
                BindValue::Value(v) => bindings.insert(name, v),
                BindValue::Raw(s) => literals.push((name, s)),
            }
        }
        (bindings, literals)
    }
}

/// 把 `text` 中参数的占位符替换为给定文本，只扫描一遍。
///
/// 每个前缀位置取能匹配的最长参数名（`replacements` 与 `other_names` 一起比较），
/// 所以 `foo_1` 不会误伤 `foo_10` 的占位符；替换进去的文本不会再被扫描。
/// 没有后缀的风格（`:name`）要求参数名之后不能紧跟标识符字符。
pub(crate) fn substitute<'a>(
    text: &str,
    flavor: Flavor,
    replacements: &'a [(String, String)],
    other_names: impl IntoIterator<Item = &'a str>,
) -> String {
    if replacements.is_empty() {
        return text.to_string();
    }
    let mut names: Vec<(&str, Option<&str>)> = replacements
        .iter()
        .map(|(n, r)| (n.as_str(), Some(r.as_str())))
        .collect();
    names.extend(other_names.into_iter().map(|n| (n, None)));
    names.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));

    let prefix = flavor.bind_prefix();
    let postfix = flavor.bind_postfix();
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while !rest.is_empty() {
        let Some(at) = rest.find(prefix) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..at]);
        rest = &rest[at..];

        if let Some((len, replacement)) = match_placeholder(rest, prefix, postfix, &names) {
            out.push_str(replacement.unwrap_or(&rest[..len]));
            rest = &rest[len..];
            continue;
        }
        let step = rest.chars().next().map_or(0, char::len_utf8);
        if step == 0 {
            break;
        }
        out.push_str(&rest[..step]);
        rest = &rest[step..];
    }
    out
}

/// `s` 以某个占位符开头时返回其字节长度与替换文本（`None` 表示原样保留）。
fn match_placeholder<'a>(
    s: &str,
    prefix: &str,
    postfix: &str,
    names: &[(&str, Option<&'a str>)],
) -> Option<(usize, Option<&'a str>)> {
    let body = s.strip_prefix(prefix)?;
    names.iter().find_map(|(name, replacement)| {
        let tail = body.strip_prefix(*name)?.strip_prefix(postfix)?;
        if postfix.is_empty() && tail.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
            return None;
        }
        Some((s.len() - tail.len(), *replacement))
    })
}

/// 诊断渲染：把普通参数的占位符替换为其值的可读形式。
pub(crate) fn substitute_values(text: &str, flavor: Flavor, bindings: &Bindings) -> String {
    let printable: Vec<(String, String)> = bindings
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_literal()))
        .collect();
    substitute(text, flavor, &printable, [])
}
