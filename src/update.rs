//! UpdateQuery：不可变的 UPDATE 链。

use crate::chain::{Chain, Operation, StatementKind, impl_chain_common};
use crate::flavor::Flavor;
use crate::macros::{IntoStrings, collect_into_strings};
use crate::value::BindValue;

/// 用默认 flavor 创建 UPDATE。
pub fn update(table: impl Into<String>) -> UpdateQuery {
    Flavor::default().update(table)
}

impl Flavor {
    pub fn update(self, table: impl Into<String>) -> UpdateQuery {
        UpdateQuery {
            chain: Chain::root(
                StatementKind::Update,
                self,
                vec![Operation::Table(table.into())],
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateQuery {
    chain: Chain,
}

impl_chain_common!(UpdateQuery);

impl UpdateQuery {
    /// 原始赋值片段，例如 `"col = col + 1"`。
    pub fn set<T>(&self, assignments: T) -> Self
    where
        T: IntoStrings,
    {
        Self {
            chain: self.chain.push(
                collect_into_strings(assignments)
                    .into_iter()
                    .map(Operation::Set)
                    .collect(),
            ),
        }
    }

    /// 等值赋值，自动生成参数名 `<column>_bind`。
    pub fn set_eq<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<BindValue>,
    {
        Self {
            chain: self.chain.set_eq(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn returning<T>(&self, exprs: T) -> Self
    where
        T: IntoStrings,
    {
        Self {
            chain: self.chain.push(
                collect_into_strings(exprs)
                    .into_iter()
                    .map(Operation::Returning)
                    .collect(),
            ),
        }
    }

    /// WHERE 之后、RETURNING 之前的自由文本。
    pub fn extra(&self, sql: impl Into<String>) -> Self {
        Self {
            chain: self.chain.push(vec![Operation::Extra(sql.into())]),
        }
    }
}
