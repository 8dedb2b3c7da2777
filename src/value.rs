//! 参数值类型：普通值（走占位符）与原样字面量（直接拼进 SQL）。

use std::borrow::Cow;
use time::macros::format_description;

/// SQL 参数值。
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    I64(i64),
    U64(u64),
    F64(f64),
    String(Cow<'static, str>),
    Bytes(Vec<u8>),
    DateTime(time::OffsetDateTime),
}

impl SqlValue {
    /// 将 `Option<T>` 映射为 `SqlValue`：`None => Null`，`Some(v) => v.into()`。
    pub fn from_option<T: Into<SqlValue>>(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }

    /// 可读的 SQL 字面量形式，仅用于日志/诊断，不能用来执行。
    pub fn to_literal(&self) -> String {
        let mut out = String::new();
        match self {
            Self::Null => out.push_str("NULL"),
            Self::Bool(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
            Self::I64(n) => out.push_str(&n.to_string()),
            Self::U64(n) => out.push_str(&n.to_string()),
            Self::F64(n) => out.push_str(&n.to_string()),
            Self::String(s) => quote_string(&mut out, s),
            Self::Bytes(b) => {
                out.push_str("X'");
                push_hex(&mut out, b);
                out.push('\'');
            }
            Self::DateTime(dt) => {
                let fmt = format_description!(
                    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6] [offset_hour sign:mandatory]:[offset_minute]"
                );
                let s = dt.format(&fmt).unwrap_or_else(|_| dt.to_string());
                quote_string(&mut out, &s);
            }
        }
        out
    }
}

fn quote_string(out: &mut String, s: &str) {
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
}

fn push_hex(out: &mut String, data: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in data {
        out.push(HEX[((b >> 4) & 0xF) as usize] as char);
        out.push(HEX[(b & 0xF) as usize] as char);
    }
}

impl From<()> for SqlValue {
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i8> for SqlValue {
    fn from(v: i8) -> Self {
        Self::I64(i64::from(v))
    }
}

impl From<i16> for SqlValue {
    fn from(v: i16) -> Self {
        Self::I64(i64::from(v))
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        Self::I64(i64::from(v))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        Self::I64(v)
    }
}

impl From<u8> for SqlValue {
    fn from(v: u8) -> Self {
        Self::U64(u64::from(v))
    }
}

impl From<u16> for SqlValue {
    fn from(v: u16) -> Self {
        Self::U64(u64::from(v))
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        Self::U64(u64::from(v))
    }
}

impl From<u64> for SqlValue {
    fn from(v: u64) -> Self {
        Self::U64(v)
    }
}

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::F64(f64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::String(Cow::Owned(v))
    }
}

impl From<&'static str> for SqlValue {
    fn from(v: &'static str) -> Self {
        Self::String(Cow::Borrowed(v))
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<time::OffsetDateTime> for SqlValue {
    fn from(v: time::OffsetDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        Self::from_option(v)
    }
}

/// 绑定到某个参数名上的值。
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    /// 普通值：SQL 中保留占位符，值进入参数映射。
    Value(SqlValue),
    /// 原样字面量：渲染时替换掉占位符，不进入参数映射。
    Raw(String),
}

/// Raw：标记为原样拼入 SQL（例如 `DEFAULT`、`now()`）。
pub fn raw(expr: impl Into<String>) -> BindValue {
    BindValue::Raw(expr.into())
}

impl BindValue {
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl From<SqlValue> for BindValue {
    fn from(v: SqlValue) -> Self {
        Self::Value(v)
    }
}

macro_rules! impl_bind_value_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for BindValue {
                fn from(v: $ty) -> Self {
                    Self::Value(SqlValue::from(v))
                }
            }
        )*
    };
}

impl_bind_value_from!(
    (),
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    &'static str,
    Vec<u8>,
    time::OffsetDateTime,
);

impl<T: Into<SqlValue>> From<Option<T>> for BindValue {
    fn from(v: Option<T>) -> Self {
        Self::Value(SqlValue::from_option(v))
    }
}
