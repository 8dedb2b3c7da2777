//! SelectQuery：不可变的 SELECT 链。

use crate::chain::{Chain, Operation, StatementKind, impl_chain_common};
use crate::exists::Exists;
use crate::flavor::Flavor;
use crate::macros::{IntoStrings, collect_into_strings};
use std::fmt::Display;

/// 用默认 flavor 创建 SELECT。
pub fn select<T>(cols: T) -> SelectQuery
where
    T: IntoStrings,
{
    Flavor::default().select(cols)
}

impl Flavor {
    /// 用指定 flavor 创建 SELECT 根节点。
    pub fn select<T>(self, cols: T) -> SelectQuery
    where
        T: IntoStrings,
    {
        let ops = collect_into_strings(cols)
            .into_iter()
            .map(Operation::Column)
            .collect();
        SelectQuery {
            chain: Chain::root(StatementKind::Select, self, ops),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectQuery {
    chain: Chain,
}

impl_chain_common!(SelectQuery);

impl SelectQuery {
    fn push_all<T>(&self, items: T, op: fn(String) -> Operation) -> Self
    where
        T: IntoStrings,
    {
        Self {
            chain: self
                .chain
                .push(collect_into_strings(items).into_iter().map(op).collect()),
        }
    }

    fn push_one(&self, op: Operation) -> Self {
        Self {
            chain: self.chain.push(vec![op]),
        }
    }

    /// 追加更多列。
    pub fn select<T>(&self, cols: T) -> Self
    where
        T: IntoStrings,
    {
        self.push_all(cols, Operation::Column)
    }

    /// `DISTINCT ON (...)`，表达式按出现顺序累积。
    pub fn distinct_on<T>(&self, exprs: T) -> Self
    where
        T: IntoStrings,
    {
        self.push_all(exprs, Operation::DistinctOn)
    }

    pub fn group_by<T>(&self, cols: T) -> Self
    where
        T: IntoStrings,
    {
        self.push_all(cols, Operation::GroupBy)
    }

    pub fn having<T>(&self, exprs: T) -> Self
    where
        T: IntoStrings,
    {
        self.push_all(exprs, Operation::Having)
    }

    pub fn order_by<T>(&self, cols: T) -> Self
    where
        T: IntoStrings,
    {
        self.push_all(cols, Operation::OrderBy)
    }

    pub fn limit(&self, limit: impl Display) -> Self {
        self.push_one(Operation::Limit(limit.to_string()))
    }

    pub fn offset(&self, offset: impl Display) -> Self {
        self.push_one(Operation::Offset(offset.to_string()))
    }

    pub fn top(&self, top: impl Display) -> Self {
        self.push_one(Operation::Top(top.to_string()))
    }

    /// 追加在所有子句之后的自由文本（例如 `FOR UPDATE`）。
    pub fn extra(&self, sql: impl Into<String>) -> Self {
        self.push_one(Operation::Extra(sql.into()))
    }

    /// `EXISTS (...)` 条件片段。
    pub fn exists(&self) -> Exists {
        Exists::new(self.clone())
    }

    /// `NOT EXISTS (...)` 条件片段。
    pub fn not_exists(&self) -> Exists {
        Exists::negated(self.clone())
    }
}
