//! Exists：把 SELECT 包成 `EXISTS (...)` / `NOT EXISTS (...)` 条件片段。

use crate::bindings::Bindings;
use crate::chain::{IntoPredicates, Predicate};
use crate::error::MalformedQuery;
use crate::flavor::Flavor;
use crate::select::SelectQuery;
use crate::statement::Statement;
use crate::string_builder::{indent_lines, strip_terminator};

/// 作为 WHERE 参数传入外层语句时，渲染文本作为一个 AND 条件拼入，
/// 参数原名合并进外层（同名参数由调用方自行避免）。
#[derive(Debug, Clone)]
pub struct Exists {
    inner: SelectQuery,
    negated: bool,
}

pub fn exists(inner: SelectQuery) -> Exists {
    Exists::new(inner)
}

pub fn not_exists(inner: SelectQuery) -> Exists {
    Exists::negated(inner)
}

impl Exists {
    pub fn new(inner: SelectQuery) -> Self {
        Self {
            inner,
            negated: false,
        }
    }

    pub fn negated(inner: SelectQuery) -> Self {
        Self {
            inner,
            negated: true,
        }
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }
}

impl Statement for Exists {
    fn render(&self) -> Result<String, MalformedQuery> {
        let body = self.inner.render()?;
        let prefix = if self.negated { "NOT " } else { "" };
        Ok(format!(
            "{prefix}EXISTS (\n{})",
            indent_lines(strip_terminator(&body), 2)
        ))
    }

    fn bindings(&self) -> Bindings {
        self.inner.bindings()
    }

    fn flavor(&self) -> Flavor {
        self.inner.flavor()
    }
}

impl From<Exists> for Predicate {
    fn from(e: Exists) -> Self {
        Self::Statement(Box::new(e))
    }
}

impl IntoPredicates for Exists {
    fn extend_into_predicates(self, dst: &mut Vec<Predicate>) {
        dst.push(self.into());
    }
}
