//! halo-sql-chain：不可变链式 SQL 文本生成器。
//!
//! 每次构建调用返回新的语句对象，原对象不变，可以安全地分叉复用：
//!
//! ```
//! use halo_chain::{select, where_eq};
//!
//! let base = select("id").from("users");
//! let active = base.where_("active");
//! let bob = where_eq!(base, name = "bob");
//!
//! assert_eq!(base.query().unwrap(), "SELECT id\n  FROM users;");
//! assert_eq!(active.query().unwrap(), "SELECT id\n  FROM users\n WHERE active;");
//! assert_eq!(
//!     bob.query().unwrap(),
//!     "SELECT id\n  FROM users\n WHERE name = %(name_bind_0)s;"
//! );
//! ```
//!
//! 渲染结果是 `(文本, 参数映射)`，由调用方交给数据库驱动执行。

pub mod bindings;
pub mod chain;
#[cfg(test)]
mod chain_tests;
mod compiler;
pub mod cte;
pub mod delete;
pub mod error;
pub mod exists;
#[cfg(test)]
mod exists_tests;
pub mod flavor;
pub mod insert;
pub mod macros;
pub use crate::macros::*;
#[cfg(test)]
mod macros_tests;
pub mod render;
pub mod select;
pub mod statement;
mod string_builder;
pub mod update;
#[cfg(test)]
mod update_delete_tests;
pub mod value;

pub use crate::bindings::Bindings;
pub use crate::chain::{IntoPredicates, JoinCriteria, JoinKind, Predicate, StatementKind};
pub use crate::cte::{With, WithQuery, with};
pub use crate::delete::{DeleteQuery, delete};
pub use crate::error::MalformedQuery;
pub use crate::exists::{Exists, exists, not_exists};
pub use crate::flavor::{Flavor, InsertDefault};
pub use crate::insert::{InsertQuery, Row, insert};
pub use crate::render::{RenderOptions, render, render_with};
pub use crate::select::{SelectQuery, select};
pub use crate::statement::Statement;
pub use crate::update::{UpdateQuery, update};
pub use crate::value::{BindValue, SqlValue, raw};
