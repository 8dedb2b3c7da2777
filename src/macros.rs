//! 宏集合：为链式调用提供可变参数与 `column = value` 风格的封装。
//!
//! 例如 `where_eq!(q, id = 5, name = "bob")` 等价于
//! `q.where_eq(vec![("id", 5.into()), ("name", "bob".into())])`。

#[doc(hidden)]
#[macro_export]
macro_rules! __collect_strings {
    () => {
        Vec::<String>::new()
    };
    ($($value:expr),+ $(,)?) => {{
        let mut values = Vec::<String>::new();
        $(
            $crate::extend_into_strings($value, &mut values);
        )*
        values
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __builder_with_strings {
    ($builder:expr, $method:ident $(, $arg:expr)* $(,)?) => {
        $builder.$method($crate::__collect_strings!($($arg),*))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __collect_pairs {
    ($($col:ident = $val:expr),* $(,)?) => {{
        let pairs: Vec<(String, $crate::BindValue)> = vec![
            $((stringify!($col).to_string(), $crate::BindValue::from($val))),*
        ];
        pairs
    }};
}

pub trait IntoStrings {
    fn extend_into_strings(self, dst: &mut Vec<String>);
}

impl IntoStrings for String {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self);
    }
}

impl IntoStrings for &str {
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.push(self.to_string());
    }
}

impl<const N: usize, T> IntoStrings for [T; N]
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

impl<T> IntoStrings for &[T]
where
    T: Into<String> + Clone,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        for item in self {
            dst.push(item.clone().into());
        }
    }
}

impl<T> IntoStrings for Vec<T>
where
    T: Into<String>,
{
    fn extend_into_strings(self, dst: &mut Vec<String>) {
        dst.extend(self.into_iter().map(Into::into));
    }
}

#[doc(hidden)]
pub fn extend_into_strings<T>(value: T, dst: &mut Vec<String>)
where
    T: IntoStrings,
{
    value.extend_into_strings(dst);
}

#[doc(hidden)]
pub fn collect_into_strings<T>(value: T) -> Vec<String>
where
    T: IntoStrings,
{
    let mut dst = Vec::new();
    value.extend_into_strings(&mut dst);
    dst
}

/// 为 `SelectQuery::select` 提供可变参数调用。
#[macro_export]
macro_rules! select_cols {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $crate::__builder_with_strings!($builder, select $(, $col)*)
    };
}
pub use crate::select_cols;

/// 为 `from` 提供可变参数调用。
#[macro_export]
macro_rules! from_tables {
    ($builder:expr $(, $table:expr)* $(,)?) => {
        $crate::__builder_with_strings!($builder, from $(, $table)*)
    };
}
pub use crate::from_tables;

/// 为 `where_` 提供可变参数调用（只接受字符串片段）。
#[macro_export]
macro_rules! where_exprs {
    ($builder:expr $(, $expr:expr)* $(,)?) => {
        $crate::__builder_with_strings!($builder, where_ $(, $expr)*)
    };
}
pub use crate::where_exprs;

/// 为 `group_by` 提供可变参数调用。
#[macro_export]
macro_rules! group_by_cols {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $crate::__builder_with_strings!($builder, group_by $(, $col)*)
    };
}
pub use crate::group_by_cols;

/// 为 `order_by` 提供可变参数调用。
#[macro_export]
macro_rules! order_by_cols {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $crate::__builder_with_strings!($builder, order_by $(, $col)*)
    };
}
pub use crate::order_by_cols;

/// 为 `returning` 提供可变参数调用。
#[macro_export]
macro_rules! returning_cols {
    ($builder:expr $(, $col:expr)* $(,)?) => {
        $crate::__builder_with_strings!($builder, returning $(, $col)*)
    };
}
pub use crate::returning_cols;

/// `where_eq!(q, id = 5, name = "bob")`：按书写顺序生成等值条件。
#[macro_export]
macro_rules! where_eq {
    ($builder:expr $(, $col:ident = $val:expr)* $(,)?) => {
        $builder.where_eq($crate::__collect_pairs!($($col = $val),*))
    };
}
pub use crate::where_eq;

/// `set_eq!(u, col1 = "test")`：UPDATE 的等值赋值。
#[macro_export]
macro_rules! set_eq {
    ($builder:expr $(, $col:ident = $val:expr)* $(,)?) => {
        $builder.set_eq($crate::__collect_pairs!($($col = $val),*))
    };
}
pub use crate::set_eq;

/// `bind!(q, name = value)`：手动登记参数。
#[macro_export]
macro_rules! bind {
    ($builder:expr $(, $name:ident = $val:expr)* $(,)?) => {
        $builder.bind($crate::__collect_pairs!($($name = $val),*))
    };
}
pub use crate::bind;

/// `row!(name = "a", phone = raw("DEFAULT"))`：构造一行 INSERT 数据。
#[macro_export]
macro_rules! row {
    ($($col:ident = $val:expr),* $(,)?) => {
        $crate::__collect_pairs!($($col = $val),*)
            .into_iter()
            .collect::<$crate::Row>()
    };
}
pub use crate::row;
