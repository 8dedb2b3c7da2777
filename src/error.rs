//! 构建或编译语句时的错误。

/// 语句结构不合法（唯一的错误种类）。
///
/// JOIN 条件相关的错误在调用 `join` 时立即返回；其余在编译/渲染时返回。
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum MalformedQuery {
    #[error("malformed query: can't specify both ON and USING")]
    JoinCriteriaConflict,
    #[error("malformed query: no join criteria specified")]
    MissingJoinCriteria,
    #[error("malformed query: SELECT without any column")]
    NoColumns,
    #[error("malformed query: JOIN {0} has no preceding FROM item")]
    JoinWithoutFrom(String),
    #[error("malformed query: row {row} has no value for column {column} and no default is set")]
    MissingInsertValue { row: usize, column: String },
}
