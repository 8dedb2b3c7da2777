//! WITH 组合：若干命名子语句加一条主语句。
//!
//! ```text
//! WITH a AS
//!   (SELECT ...
//!      FROM ...),
//! b AS
//!   (...)
//! SELECT ...;
//! ```

use crate::bindings::Bindings;
use crate::error::MalformedQuery;
use crate::flavor::Flavor;
use crate::statement::Statement;
use crate::string_builder::{indent_continuation, strip_terminator};

/// 从第一个命名子语句开始构建 WITH。
pub fn with(name: impl Into<String>, stmt: impl Statement + 'static) -> With {
    With::new().and(name, stmt)
}

/// 尚未指定主语句的 WITH 前缀。
#[derive(Debug, Clone, Default)]
pub struct With {
    ctes: Vec<(String, Box<dyn Statement>)>,
}

impl With {
    pub fn new() -> Self {
        Self::default()
    }

    /// 再追加一个命名子语句，按声明顺序输出。
    pub fn and(mut self, name: impl Into<String>, stmt: impl Statement + 'static) -> Self {
        self.ctes.push((name.into(), Box::new(stmt)));
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ctes.iter().map(|(name, _)| name.as_str())
    }

    /// 指定主语句，得到可以渲染的 `WithQuery`。
    pub fn primary(self, stmt: impl Statement + 'static) -> WithQuery {
        WithQuery {
            ctes: self.ctes,
            primary: Box::new(stmt),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WithQuery {
    ctes: Vec<(String, Box<dyn Statement>)>,
    primary: Box<dyn Statement>,
}

impl WithQuery {
    pub fn query(&self) -> Result<String, MalformedQuery> {
        self.assemble(|stmt| stmt.render())
    }

    /// 依次取每个子语句和主语句的文本并拼接。
    fn assemble<F>(&self, text: F) -> Result<String, MalformedQuery>
    where
        F: Fn(&dyn Statement) -> Result<String, MalformedQuery>,
    {
        let mut entries = Vec::with_capacity(self.ctes.len());
        for (name, stmt) in &self.ctes {
            let body = text(stmt.as_ref())?;
            entries.push(format!(
                "{name} AS\n{})",
                indent_continuation(strip_terminator(&body), "  (", 3)
            ));
        }
        let primary = text(self.primary.as_ref())?;
        if entries.is_empty() {
            return Ok(primary);
        }
        Ok(format!("WITH {}\n{primary}", entries.join(",\n")))
    }

    /// 子语句参数按声明顺序合并，主语句最后覆盖。
    pub fn binds(&self) -> Bindings {
        let mut binds = Bindings::new();
        for (_, stmt) in &self.ctes {
            binds.merge(&stmt.bindings());
        }
        binds.merge(&self.primary.bindings());
        binds
    }
}

impl Statement for WithQuery {
    fn render(&self) -> Result<String, MalformedQuery> {
        self.query()
    }

    fn bindings(&self) -> Bindings {
        self.binds()
    }

    /// 以主语句的 flavor 为准。
    fn flavor(&self) -> Flavor {
        self.primary.flavor()
    }

    /// 每个子语句按自己的 flavor 代入参数值。
    fn loggable(&self) -> Result<String, MalformedQuery> {
        self.assemble(|stmt| stmt.loggable())
    }
}
