//! InsertQuery：由表名、若干行数据与列/默认值策略生成 INSERT。
//!
//! 不是链式节点：所有配置都在同一个 builder 上完成，渲染时一次性生成文本。

use crate::bindings::Bindings;
use crate::error::MalformedQuery;
use crate::flavor::{Flavor, InsertDefault};
use crate::macros::{IntoStrings, collect_into_strings};
use crate::statement::Statement;
use crate::string_builder::{StringBuilder, indent_lines, strip_terminator};
use crate::value::BindValue;
use std::collections::{BTreeMap, BTreeSet};

/// 一行数据：列名 → 值。
pub type Row = BTreeMap<String, BindValue>;

/// 由 `(列名, 值)` 构造一行。
pub fn row<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Row
where
    K: Into<String>,
    V: Into<BindValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// 用默认 flavor 创建 INSERT。
pub fn insert(table: impl Into<String>) -> InsertQuery {
    Flavor::default().insert(table)
}

impl Flavor {
    pub fn insert(self, table: impl Into<String>) -> InsertQuery {
        InsertQuery {
            flavor: self,
            table: table.into(),
            rows: Vec::new(),
            columns: None,
            default: self.insert_default(),
            statement: None,
            on_conflict: None,
            returning: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsertQuery {
    flavor: Flavor,
    table: String,
    rows: Vec<Row>,
    columns: Option<Vec<String>>,
    default: InsertDefault,
    statement: Option<Box<dyn Statement>>,
    on_conflict: Option<String>,
    returning: Vec<String>,
}

impl InsertQuery {
    pub fn new(table: impl Into<String>) -> Self {
        insert(table)
    }

    /// 追加一行。
    pub fn row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// 追加多行。
    pub fn rows(&mut self, rows: impl IntoIterator<Item = Row>) -> &mut Self {
        self.rows.extend(rows);
        self
    }

    /// 显式指定列；不指定时使用所有行的列名并集（排序后）。
    pub fn columns<T>(&mut self, cols: T) -> &mut Self
    where
        T: IntoStrings,
    {
        self.columns = Some(collect_into_strings(cols));
        self
    }

    /// 行缺少某列时使用的值；`raw(..)` 表示原样拼入。
    pub fn default_value(&mut self, value: impl Into<BindValue>) -> &mut Self {
        self.default = InsertDefault::from(value.into());
        self
    }

    /// 不允许缺列，缺列时渲染返回错误。
    pub fn no_default(&mut self) -> &mut Self {
        self.default = InsertDefault::Unset;
        self
    }

    /// `INSERT INTO t (...) <statement>`，语句的参数会合并进来。
    pub fn statement(&mut self, stmt: impl Statement + 'static) -> &mut Self {
        self.statement = Some(Box::new(stmt));
        self
    }

    /// `ON CONFLICT <clause>`，原样输出。
    pub fn on_conflict(&mut self, clause: impl Into<String>) -> &mut Self {
        self.on_conflict = Some(clause.into());
        self
    }

    pub fn returning<T>(&mut self, exprs: T) -> &mut Self
    where
        T: IntoStrings,
    {
        self.returning = collect_into_strings(exprs);
        self
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// 最终使用的列顺序。
    pub fn resolved_columns(&self) -> Vec<String> {
        if let Some(cols) = &self.columns {
            return cols.clone();
        }
        let union: BTreeSet<&String> = self.rows.iter().flat_map(|r| r.keys()).collect();
        union.into_iter().cloned().collect()
    }

    pub fn query(&self) -> Result<String, MalformedQuery> {
        let columns = self.resolved_columns();

        let mut buf = StringBuilder::new();
        buf.write_str("INSERT INTO ");
        buf.write_str(&self.table);
        if !columns.is_empty() {
            buf.write_str(" (");
            buf.write_strings(&columns, ", ");
            buf.write_str(")");
        }

        if let Some(stmt) = &self.statement {
            let body = stmt.render()?;
            buf.write_str("\n");
            buf.write_str(&indent_lines(strip_terminator(&body), 2));
        } else if self.rows.is_empty() {
            buf.write_str(" DEFAULT VALUES");
        } else {
            let rows = self
                .rows
                .iter()
                .enumerate()
                .map(|(index, row)| self.render_row(index, row, &columns))
                .collect::<Result<Vec<_>, _>>()?;
            buf.write_str("\n  VALUES\n");
            buf.write_strings(&rows, ",\n");
        }

        buf.write_opt("\nON CONFLICT ", self.on_conflict.as_deref());
        buf.write_section("\nRETURNING ", &self.returning, ", ");
        buf.write_str(";");
        Ok(buf.into_string())
    }

    fn render_row(
        &self,
        index: usize,
        row: &Row,
        columns: &[String],
    ) -> Result<String, MalformedQuery> {
        let mut cells = Vec::with_capacity(columns.len());
        for column in columns {
            let placeholder = || self.flavor.placeholder(&format!("{column}_{index}"));
            let cell = match row.get(column) {
                Some(BindValue::Raw(s)) => s.clone(),
                Some(BindValue::Value(_)) => placeholder(),
                None => match &self.default {
                    InsertDefault::Value(_) => placeholder(),
                    InsertDefault::Raw(s) => s.clone(),
                    InsertDefault::Unset => {
                        return Err(MalformedQuery::MissingInsertValue {
                            row: index,
                            column: column.clone(),
                        });
                    }
                },
            };
            cells.push(cell);
        }
        Ok(format!("({})", cells.join(", ")))
    }

    /// 参数映射：`<column>_<row>`，原样字面量不在其中。
    ///
    /// 带 `statement` 时行数据只用于推断列名，参数只来自该语句。
    pub fn binds(&self) -> Bindings {
        let mut binds = Bindings::new();
        if let Some(stmt) = &self.statement {
            binds.merge(&stmt.bindings());
            return binds;
        }

        let columns = self.resolved_columns();
        for (index, row) in self.rows.iter().enumerate() {
            for column in &columns {
                let name = format!("{column}_{index}");
                match (row.get(column), &self.default) {
                    (Some(BindValue::Value(v)), _) => binds.insert(name, v.clone()),
                    (None, InsertDefault::Value(v)) => binds.insert(name, v.clone()),
                    _ => {}
                }
            }
        }
        binds
    }
}

impl Statement for InsertQuery {
    fn render(&self) -> Result<String, MalformedQuery> {
        self.query()
    }

    fn bindings(&self) -> Bindings {
        self.binds()
    }

    fn flavor(&self) -> Flavor {
        self.flavor
    }
}
