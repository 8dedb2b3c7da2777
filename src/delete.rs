//! DeleteQuery：不可变的 DELETE 链。

use crate::chain::{Chain, Operation, StatementKind, impl_chain_common};
use crate::flavor::Flavor;
use crate::macros::{IntoStrings, collect_into_strings};

/// 用默认 flavor 创建 DELETE。
pub fn delete(table: impl Into<String>) -> DeleteQuery {
    Flavor::default().delete(table)
}

impl Flavor {
    pub fn delete(self, table: impl Into<String>) -> DeleteQuery {
        DeleteQuery {
            chain: Chain::root(
                StatementKind::Delete,
                self,
                vec![Operation::Table(table.into())],
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeleteQuery {
    chain: Chain,
}

impl_chain_common!(DeleteQuery);

impl DeleteQuery {
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
}
