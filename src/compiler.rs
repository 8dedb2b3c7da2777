//! 编译器：把展开后的操作列表一次性归入各子句，再按语句类型拼接文本。
//!
//! 续行统一缩进到 `SELECT ` 的宽度（7 个空格），分隔符属于输出约定的一部分。

use crate::chain::{FromItem, Operation, Predicate, StatementKind};
use crate::error::MalformedQuery;
use crate::string_builder::StringBuilder;

const SEP: &str = "\n       ";
const COLUMN_SEP: &str = ",\n       ";
const WHERE_SEP: &str = " AND\n       ";
const HAVING_SEP: &str = " AND\n       ";
const GROUP_BY_SEP: &str = ",\n         ";
const ORDER_BY_SEP: &str = ",\n         ";
const SET_SEP: &str = ",\n       ";
const RETURNING_SEP: &str = ", ";

#[derive(Debug, Default)]
struct Clauses {
    table: Option<String>,
    columns: Vec<String>,
    distinct_on: Vec<String>,
    from: Vec<String>,
    where_: Vec<String>,
    group_by: Vec<String>,
    having: Vec<String>,
    order_by: Vec<String>,
    top: Option<String>,
    limit: Option<String>,
    offset: Option<String>,
    set: Vec<String>,
    returning: Vec<String>,
    extra: Vec<String>,
}

impl Clauses {
    fn collect(operations: &[&Operation]) -> Result<Self, MalformedQuery> {
        let mut c = Self::default();
        for op in operations {
            match op {
                Operation::Column(s) => c.columns.push(s.clone()),
                Operation::DistinctOn(s) => c.distinct_on.push(s.clone()),
                Operation::From(FromItem::Table(expr)) => {
                    // 新的基表另起一项，上一项末尾补逗号
                    if let Some(last) = c.from.last_mut() {
                        last.push(',');
                    }
                    c.from.push(expr.clone());
                }
                Operation::From(FromItem::Join {
                    kind,
                    expr,
                    constraint,
                }) => {
                    let Some(last) = c.from.last_mut() else {
                        return Err(MalformedQuery::JoinWithoutFrom(expr.clone()));
                    };
                    last.push_str("\n  ");
                    last.push_str(kind.keyword());
                    last.push(' ');
                    last.push_str(expr);
                    last.push_str(SEP);
                    last.push_str(constraint.keyword());
                    last.push(' ');
                    last.push_str(constraint.criteria());
                }
                Operation::Where(Predicate::Sql(s)) => c.where_.push(s.clone()),
                Operation::Where(Predicate::Statement(stmt)) => c.where_.push(stmt.render()?),
                Operation::GroupBy(s) => c.group_by.push(s.clone()),
                Operation::OrderBy(s) => c.order_by.push(s.clone()),
                Operation::Having(s) => c.having.push(s.clone()),
                Operation::Limit(s) => c.limit = Some(s.clone()),
                Operation::Offset(s) => c.offset = Some(s.clone()),
                Operation::Top(s) => c.top = Some(s.clone()),
                Operation::Table(s) => c.table = Some(s.clone()),
                Operation::Set(s) => c.set.push(s.clone()),
                Operation::Returning(s) => c.returning.push(s.clone()),
                Operation::Extra(s) => c.extra.push(s.clone()),
            }
        }
        Ok(c)
    }

    fn write_from_where(&self, buf: &mut StringBuilder) {
        buf.write_section("\n  FROM ", &self.from, SEP);
        buf.write_section("\n WHERE ", &self.where_, WHERE_SEP);
    }

    fn write_extra(&self, buf: &mut StringBuilder) {
        buf.write_section("\n", &self.extra, "\n");
    }

    fn select(&self) -> Result<String, MalformedQuery> {
        if self.columns.is_empty() {
            return Err(MalformedQuery::NoColumns);
        }

        let mut buf = StringBuilder::new();
        buf.write_str("SELECT ");
        if let Some(top) = &self.top {
            buf.write_str("TOP ");
            buf.write_str(top);
            buf.write_str(SEP);
        }
        if !self.distinct_on.is_empty() {
            buf.write_str("DISTINCT ON (");
            buf.write_strings(&self.distinct_on, ", ");
            buf.write_str(")");
            buf.write_str(SEP);
        }
        buf.write_strings(&self.columns, COLUMN_SEP);

        self.write_from_where(&mut buf);
        buf.write_section("\nGROUP BY ", &self.group_by, GROUP_BY_SEP);
        buf.write_section("\nHAVING ", &self.having, HAVING_SEP);
        buf.write_section("\nORDER BY ", &self.order_by, ORDER_BY_SEP);
        buf.write_opt("\n LIMIT ", self.limit.as_deref());
        buf.write_opt("\nOFFSET ", self.offset.as_deref());
        self.write_extra(&mut buf);
        buf.write_str(";");
        Ok(buf.into_string())
    }

    fn update(&self) -> String {
        let mut buf = StringBuilder::new();
        buf.write_str("UPDATE ");
        buf.write_str(self.table.as_deref().unwrap_or_default());
        buf.write_section("\n   SET ", &self.set, SET_SEP);
        self.write_from_where(&mut buf);
        self.write_extra(&mut buf);
        buf.write_section("\nRETURNING ", &self.returning, RETURNING_SEP);
        buf.write_str(";");
        buf.into_string()
    }

    fn delete(&self) -> String {
        let mut buf = StringBuilder::new();
        buf.write_str("DELETE FROM ");
        buf.write_str(self.table.as_deref().unwrap_or_default());
        self.write_from_where(&mut buf);
        buf.write_section("\nRETURNING ", &self.returning, RETURNING_SEP);
        buf.write_str(";");
        buf.into_string()
    }
}

/// 把完整的操作列表编译为 SQL 文本（含结尾的 `;`，不替换字面量）。
pub(crate) fn compile(
    operations: &[&Operation],
    kind: StatementKind,
) -> Result<String, MalformedQuery> {
    let clauses = Clauses::collect(operations)?;
    match kind {
        StatementKind::Select => clauses.select(),
        StatementKind::Update => Ok(clauses.update()),
        StatementKind::Delete => Ok(clauses.delete()),
    }
}
