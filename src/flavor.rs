//! SQL Flavor（方言）：控制命名占位符的前后缀以及 INSERT 缺列时的默认值。

use crate::value::{BindValue, SqlValue};
use std::fmt;

/// 目标驱动的占位符风格。
///
/// flavor 在语句的根节点上确定，之后链上的每个节点都沿用它。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flavor {
    /// `%(name)s`，缺列默认绑定 `NULL`。
    #[default]
    MySQL,
    /// `%(name)s`，缺列默认使用原样的 `DEFAULT`。
    PostgreSQL,
    /// `:name`，缺列默认绑定 `NULL`。
    SQLite,
    /// `:name`，缺列默认绑定 `NULL`。
    SQLServer,
    /// 自定义前后缀。
    Custom {
        prefix: &'static str,
        postfix: &'static str,
    },
}

impl Flavor {
    pub fn bind_prefix(self) -> &'static str {
        match self {
            Self::MySQL | Self::PostgreSQL => "%(",
            Self::SQLite | Self::SQLServer => ":",
            Self::Custom { prefix, .. } => prefix,
        }
    }

    pub fn bind_postfix(self) -> &'static str {
        match self {
            Self::MySQL | Self::PostgreSQL => ")s",
            Self::SQLite | Self::SQLServer => "",
            Self::Custom { postfix, .. } => postfix,
        }
    }

    /// 生成参数名对应的占位符文本。
    pub fn placeholder(self, name: &str) -> String {
        format!("{}{name}{}", self.bind_prefix(), self.bind_postfix())
    }

    /// INSERT 行缺少某列时使用的默认值。
    pub fn insert_default(self) -> InsertDefault {
        match self {
            Self::PostgreSQL => InsertDefault::Raw("DEFAULT".to_string()),
            _ => InsertDefault::Value(SqlValue::Null),
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::MySQL => "MySQL",
            Self::PostgreSQL => "PostgreSQL",
            Self::SQLite => "SQLite",
            Self::SQLServer => "SQLServer",
            Self::Custom { .. } => "Custom",
        };
        f.write_str(s)
    }
}

/// INSERT 缺列策略。
#[derive(Debug, Clone, PartialEq)]
pub enum InsertDefault {
    /// 绑定一个普通值（参数名仍是 `<column>_<row>`）。
    Value(SqlValue),
    /// 原样拼入，例如 `DEFAULT`。
    Raw(String),
    /// 不允许缺列：渲染时返回 `MalformedQuery::MissingInsertValue`。
    Unset,
}

impl From<BindValue> for InsertDefault {
    fn from(v: BindValue) -> Self {
        match v {
            BindValue::Value(v) => Self::Value(v),
            BindValue::Raw(s) => Self::Raw(s),
        }
    }
}
