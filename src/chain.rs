//! 不可变链式节点：每次构建调用返回一个新节点，父节点保持不变。
//!
//! 节点只记录自己这一步新增的操作与参数，并通过 `Arc` 指向父节点。
//! 编译时从根到叶展开所有操作，参数按同样顺序覆盖合并。
//! 一个节点可以被多个后续调用当作分叉点复用，分支之间互不影响。

use crate::bindings::{BindRegistry, Bindings, substitute};
use crate::compiler::compile;
use crate::error::MalformedQuery;
use crate::flavor::Flavor;
use crate::statement::Statement;
use crate::value::BindValue;
use std::sync::{Arc, OnceLock};

/// 语句类型，在根节点上确定后整条链不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Update,
    Delete,
}

/// JOIN 关键字。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            Self::Inner => "JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
        }
    }
}

/// JOIN 条件：`on` 与 `using` 必须且只能给一个。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinCriteria {
    pub on: Option<String>,
    pub using: Option<String>,
}

impl JoinCriteria {
    pub fn on(expr: impl Into<String>) -> Self {
        Self {
            on: Some(expr.into()),
            using: None,
        }
    }

    pub fn using(cols: impl Into<String>) -> Self {
        Self {
            on: None,
            using: Some(cols.into()),
        }
    }

    pub fn with_on(mut self, expr: impl Into<String>) -> Self {
        self.on = Some(expr.into());
        self
    }

    pub fn with_using(mut self, cols: impl Into<String>) -> Self {
        self.using = Some(cols.into());
        self
    }

    fn resolve(self) -> Result<JoinConstraint, MalformedQuery> {
        match (self.on, self.using) {
            (Some(_), Some(_)) => Err(MalformedQuery::JoinCriteriaConflict),
            (Some(on), None) => Ok(JoinConstraint::On(on)),
            (None, Some(using)) => Ok(JoinConstraint::Using(using)),
            (None, None) => Err(MalformedQuery::MissingJoinCriteria),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum JoinConstraint {
    On(String),
    Using(String),
}

impl JoinConstraint {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            Self::On(_) => "ON",
            Self::Using(_) => "USING",
        }
    }

    pub(crate) fn criteria(&self) -> &str {
        match self {
            Self::On(s) | Self::Using(s) => s,
        }
    }
}

/// WHERE 条件片段：原始 SQL 或嵌套语句（例如 EXISTS）。
#[derive(Debug, Clone)]
pub enum Predicate {
    Sql(String),
    Statement(Box<dyn Statement>),
}

impl Predicate {
    /// 把任意语句当作一个条件片段；其参数会合并进外层语句。
    pub fn statement(stmt: impl Statement + 'static) -> Self {
        Self::Statement(Box::new(stmt))
    }
}

impl From<&str> for Predicate {
    fn from(s: &str) -> Self {
        Self::Sql(s.to_string())
    }
}

impl From<String> for Predicate {
    fn from(s: String) -> Self {
        Self::Sql(s)
    }
}

/// 一次 `where_` 调用可以接受单个或多个条件。
pub trait IntoPredicates {
    fn extend_into_predicates(self, dst: &mut Vec<Predicate>);
}

impl IntoPredicates for &str {
    fn extend_into_predicates(self, dst: &mut Vec<Predicate>) {
        dst.push(self.into());
    }
}

impl IntoPredicates for String {
    fn extend_into_predicates(self, dst: &mut Vec<Predicate>) {
        dst.push(self.into());
    }
}

impl IntoPredicates for Predicate {
    fn extend_into_predicates(self, dst: &mut Vec<Predicate>) {
        dst.push(self);
    }
}

impl<const N: usize, T> IntoPredicates for [T; N]
where
    T: Into<Predicate>,
{
    fn extend_into_predicates(self, dst: &mut Vec<Predicate>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T> IntoPredicates for Vec<T>
where
    T: Into<Predicate>,
{
    fn extend_into_predicates(self, dst: &mut Vec<Predicate>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

#[derive(Debug, Clone)]
pub(crate) enum FromItem {
    Table(String),
    Join {
        kind: JoinKind,
        expr: String,
        constraint: JoinConstraint,
    },
}

/// 链上的一个操作。`add` 类操作按出现顺序累积，`set` 类操作后写覆盖先写。
#[derive(Debug, Clone)]
pub(crate) enum Operation {
    Column(String),
    DistinctOn(String),
    From(FromItem),
    Where(Predicate),
    GroupBy(String),
    OrderBy(String),
    Having(String),
    Limit(String),
    Offset(String),
    Top(String),
    Table(String),
    Set(String),
    Returning(String),
    Extra(String),
}

#[derive(Debug)]
struct Node {
    parent: Option<Arc<Node>>,
    kind: StatementKind,
    flavor: Flavor,
    operations: Vec<Operation>,
    binds: Vec<(String, BindValue)>,
    /// 截至本节点（含）链上登记的参数个数。
    bind_len: usize,
    compiled: OnceLock<Result<String, MalformedQuery>>,
}

/// 指向链上某个节点的句柄，克隆只增加引用计数。
#[derive(Debug, Clone)]
pub(crate) struct Chain {
    node: Arc<Node>,
}

impl Chain {
    pub(crate) fn root(kind: StatementKind, flavor: Flavor, operations: Vec<Operation>) -> Self {
        Self {
            node: Arc::new(Node {
                parent: None,
                kind,
                flavor,
                operations,
                binds: Vec::new(),
                bind_len: 0,
                compiled: OnceLock::new(),
            }),
        }
    }

    pub(crate) fn flavor(&self) -> Flavor {
        self.node.flavor
    }

    fn child(&self, operations: Vec<Operation>, binds: Vec<(String, BindValue)>) -> Self {
        Self {
            node: Arc::new(Node {
                parent: Some(Arc::clone(&self.node)),
                kind: self.node.kind,
                flavor: self.node.flavor,
                bind_len: self.node.bind_len + binds.len(),
                operations,
                binds,
                compiled: OnceLock::new(),
            }),
        }
    }

    pub(crate) fn push(&self, operations: Vec<Operation>) -> Self {
        self.child(operations, Vec::new())
    }

    /// 从根到当前节点的路径。
    fn ancestry(&self) -> Vec<&Node> {
        let mut nodes = Vec::new();
        let mut cur = Some(self.node.as_ref());
        while let Some(node) = cur {
            nodes.push(node);
            cur = node.parent.as_deref();
        }
        nodes.reverse();
        nodes
    }

    fn operations(&self) -> Vec<&Operation> {
        self.ancestry()
            .into_iter()
            .flat_map(|node| node.operations.iter())
            .collect()
    }

    fn registry(&self) -> BindRegistry {
        let mut registry = BindRegistry::new();
        for node in self.ancestry() {
            for op in &node.operations {
                if let Operation::Where(Predicate::Statement(stmt)) = op {
                    registry.merge_bindings(&stmt.bindings());
                }
            }
            for (name, value) in &node.binds {
                registry.insert(name, value);
            }
        }
        registry
    }

    fn is_bind_visible(&self, name: &str) -> bool {
        self.ancestry()
            .iter()
            .any(|node| node.binds.iter().any(|(n, _)| n == name))
    }

    /// 编译后的文本（未替换字面量），每个节点只编译一次。
    pub(crate) fn compiled(&self) -> Result<&str, MalformedQuery> {
        self.node
            .compiled
            .get_or_init(|| {
                let operations = self.operations();
                tracing::trace!(
                    target: "halo_chain::compile",
                    kind = ?self.node.kind,
                    operations = operations.len(),
                    "compiling statement"
                );
                compile(&operations, self.node.kind)
            })
            .as_deref()
            .map_err(Clone::clone)
    }

    pub(crate) fn render(&self) -> Result<String, MalformedQuery> {
        let text = self.compiled()?;
        let (bindings, literals) = self.registry().split();
        Ok(substitute(text, self.node.flavor, &literals, bindings.names()))
    }

    pub(crate) fn bindings(&self) -> Bindings {
        self.registry().split().0
    }

    pub(crate) fn bind(&self, pairs: Vec<(String, BindValue)>) -> Self {
        self.child(Vec::new(), pairs)
    }

    pub(crate) fn from(&self, tables: Vec<String>) -> Self {
        self.push(
            tables
                .into_iter()
                .map(|t| Operation::From(FromItem::Table(t)))
                .collect(),
        )
    }

    pub(crate) fn join(
        &self,
        kind: JoinKind,
        expr: String,
        criteria: JoinCriteria,
    ) -> Result<Self, MalformedQuery> {
        let constraint = criteria.resolve()?;
        Ok(self.join_item(kind, expr, constraint))
    }

    pub(crate) fn join_item(
        &self,
        kind: JoinKind,
        expr: String,
        constraint: JoinConstraint,
    ) -> Self {
        self.push(vec![Operation::From(FromItem::Join {
            kind,
            expr,
            constraint,
        })])
    }

    pub(crate) fn where_(&self, predicates: Vec<Predicate>) -> Self {
        self.push(predicates.into_iter().map(Operation::Where).collect())
    }

    /// `column = <placeholder>` 条件；参数名为 `<column>_bind_<n>`，
    /// `n` 是生成时链上已登记的参数个数。
    pub(crate) fn where_eq(&self, pairs: Vec<(String, BindValue)>) -> Self {
        let mut operations = Vec::with_capacity(pairs.len());
        let mut binds = Vec::with_capacity(pairs.len());
        for (column, value) in pairs {
            let name = format!("{column}_bind_{}", self.node.bind_len + binds.len());
            let expr = format!("{column} = {}", self.node.flavor.placeholder(&name));
            operations.push(Operation::Where(Predicate::Sql(expr)));
            binds.push((name, value));
        }
        self.child(operations, binds)
    }

    /// `column = <placeholder>` 赋值；参数名为 `<column>_bind`，
    /// 已被占用时退回 `<column>_bind_<n>`。
    pub(crate) fn set_eq(&self, pairs: Vec<(String, BindValue)>) -> Self {
        let mut operations = Vec::with_capacity(pairs.len());
        let mut binds: Vec<(String, BindValue)> = Vec::with_capacity(pairs.len());
        for (column, value) in pairs {
            let mut name = format!("{column}_bind");
            if self.is_bind_visible(&name) || binds.iter().any(|(n, _)| *n == name) {
                name = format!("{column}_bind_{}", self.node.bind_len + binds.len());
            }
            let expr = format!("{column} = {}", self.node.flavor.placeholder(&name));
            operations.push(Operation::Set(expr));
            binds.push((name, value));
        }
        self.child(operations, binds)
    }
}

/// 为 SELECT/UPDATE/DELETE 生成共享的链式方法与 `Statement` 实现。
macro_rules! impl_chain_common {
    ($ty:ident) => {
        impl $ty {
            pub fn flavor(&self) -> $crate::flavor::Flavor {
                self.chain.flavor()
            }

            /// 最终 SQL 文本。
            pub fn query(&self) -> Result<String, $crate::error::MalformedQuery> {
                self.chain.render()
            }

            pub fn binds(&self) -> $crate::bindings::Bindings {
                self.chain.bindings()
            }

            pub fn from<T>(&self, tables: T) -> Self
            where
                T: $crate::macros::IntoStrings,
            {
                Self {
                    chain: self
                        .chain
                        .from($crate::macros::collect_into_strings(tables)),
                }
            }

            pub fn join(
                &self,
                table: impl Into<String>,
                criteria: $crate::chain::JoinCriteria,
            ) -> Result<Self, $crate::error::MalformedQuery> {
                self.join_with($crate::chain::JoinKind::Inner, table, criteria)
            }

            pub fn left_join(
                &self,
                table: impl Into<String>,
                criteria: $crate::chain::JoinCriteria,
            ) -> Result<Self, $crate::error::MalformedQuery> {
                self.join_with($crate::chain::JoinKind::Left, table, criteria)
            }

            pub fn join_with(
                &self,
                kind: $crate::chain::JoinKind,
                table: impl Into<String>,
                criteria: $crate::chain::JoinCriteria,
            ) -> Result<Self, $crate::error::MalformedQuery> {
                Ok(Self {
                    chain: self.chain.join(kind, table.into(), criteria)?,
                })
            }

            pub fn join_on(&self, table: impl Into<String>, on: impl Into<String>) -> Self {
                self.join_item(
                    $crate::chain::JoinKind::Inner,
                    table,
                    $crate::chain::JoinConstraint::On(on.into()),
                )
            }

            pub fn join_using(&self, table: impl Into<String>, using: impl Into<String>) -> Self {
                self.join_item(
                    $crate::chain::JoinKind::Inner,
                    table,
                    $crate::chain::JoinConstraint::Using(using.into()),
                )
            }

            pub fn left_join_on(&self, table: impl Into<String>, on: impl Into<String>) -> Self {
                self.join_item(
                    $crate::chain::JoinKind::Left,
                    table,
                    $crate::chain::JoinConstraint::On(on.into()),
                )
            }

            pub fn left_join_using(
                &self,
                table: impl Into<String>,
                using: impl Into<String>,
            ) -> Self {
                self.join_item(
                    $crate::chain::JoinKind::Left,
                    table,
                    $crate::chain::JoinConstraint::Using(using.into()),
                )
            }

            fn join_item(
                &self,
                kind: $crate::chain::JoinKind,
                table: impl Into<String>,
                constraint: $crate::chain::JoinConstraint,
            ) -> Self {
                Self {
                    chain: self.chain.join_item(kind, table.into(), constraint),
                }
            }

            /// 原始条件片段，按出现顺序以 AND 连接。
            pub fn where_<T>(&self, predicates: T) -> Self
            where
                T: $crate::chain::IntoPredicates,
            {
                let mut preds = Vec::new();
                predicates.extend_into_predicates(&mut preds);
                Self {
                    chain: self.chain.where_(preds),
                }
            }

            /// 等值条件，自动生成参数名。
            pub fn where_eq<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
            where
                K: Into<String>,
                V: Into<$crate::value::BindValue>,
            {
                Self {
                    chain: self.chain.where_eq(
                        pairs
                            .into_iter()
                            .map(|(k, v)| (k.into(), v.into()))
                            .collect(),
                    ),
                }
            }

            /// 手动登记参数，同名时后者覆盖前者。
            pub fn bind<K, V>(&self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
            where
                K: Into<String>,
                V: Into<$crate::value::BindValue>,
            {
                Self {
                    chain: self.chain.bind(
                        pairs
                            .into_iter()
                            .map(|(k, v)| (k.into(), v.into()))
                            .collect(),
                    ),
                }
            }
        }

        impl $crate::statement::Statement for $ty {
            fn render(&self) -> Result<String, $crate::error::MalformedQuery> {
                self.chain.render()
            }

            fn bindings(&self) -> $crate::bindings::Bindings {
                self.chain.bindings()
            }

            fn flavor(&self) -> $crate::flavor::Flavor {
                self.chain.flavor()
            }
        }
    };
}

pub(crate) use impl_chain_common;
