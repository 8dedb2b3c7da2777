//! 渲染入口：`(SQL 文本, 参数映射)`，并按配置输出 `tracing` 事件。

use crate::bindings::Bindings;
use crate::error::MalformedQuery;
use crate::statement::Statement;
use tracing::Level;

/// 渲染时的日志配置。
///
/// 取代进程级的全局日志开关：每次调用显式传入。
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// 事件级别。
    pub level: Level,
    /// 是否输出 SQL。
    pub log_sql: bool,
    /// 输出把参数值代入后的可读文本，而不是带占位符的文本。
    pub log_loggable: bool,
    /// 按字符截断 SQL；`None` 表示不截断。
    pub max_sql_length: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            log_sql: true,
            log_loggable: false,
            max_sql_length: Some(200),
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn log_sql(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    pub fn log_loggable(mut self, enabled: bool) -> Self {
        self.log_loggable = enabled;
        self
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub(crate) fn truncate_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.chars().count() > max => {
                let head: String = sql.chars().take(max).collect();
                format!("{head}...")
            }
            _ => sql.to_string(),
        }
    }
}

/// 渲染语句，使用默认日志配置。
pub fn render<S>(stmt: &S) -> Result<(String, Bindings), MalformedQuery>
where
    S: Statement + ?Sized,
{
    render_with(stmt, &RenderOptions::default())
}

/// 渲染语句并按 `opts` 输出一条 `halo_chain.sql` 事件。
pub fn render_with<S>(stmt: &S, opts: &RenderOptions) -> Result<(String, Bindings), MalformedQuery>
where
    S: Statement + ?Sized,
{
    let sql = stmt.render()?;
    let bindings = stmt.bindings();

    if opts.log_sql {
        let shown = if opts.log_loggable {
            stmt.loggable()?
        } else {
            sql.clone()
        };
        emit(opts, &opts.truncate_sql(&shown), bindings.len());
    }

    Ok((sql, bindings))
}

fn emit(opts: &RenderOptions, sql: &str, bind_count: usize) {
    macro_rules! emit_at_level {
        ($level:expr, $($field:tt)*) => {
            match $level {
                Level::ERROR => tracing::error!($($field)*),
                Level::WARN => tracing::warn!($($field)*),
                Level::INFO => tracing::info!($($field)*),
                Level::DEBUG => tracing::debug!($($field)*),
                Level::TRACE => tracing::trace!($($field)*),
            }
        };
    }

    emit_at_level!(
        opts.level,
        target: "halo_chain.sql",
        bind_count,
        sql = %sql,
        "render statement"
    );
}
