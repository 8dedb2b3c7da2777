//! 文本拼接与缩进工具。

#[derive(Debug, Default, Clone)]
pub(crate) struct StringBuilder {
    buf: String,
}

impl StringBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: String::new() }
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// 写入 `items` 并以 `sep` 分隔。
    pub(crate) fn write_strings(&mut self, items: &[String], sep: &str) {
        for (i, s) in items.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(sep);
            }
            self.buf.push_str(s);
        }
    }

    /// `items` 非空时写入 `keyword` 再写入分隔后的 `items`；为空则整段省略。
    pub(crate) fn write_section(&mut self, keyword: &str, items: &[String], sep: &str) {
        if items.is_empty() {
            return;
        }
        self.buf.push_str(keyword);
        self.write_strings(items, sep);
    }

    /// 同 `write_section`，用于单值子句。
    pub(crate) fn write_opt(&mut self, keyword: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.buf.push_str(keyword);
            self.buf.push_str(v);
        }
    }

    pub(crate) fn into_string(self) -> String {
        self.buf
    }
}

/// 每一行前面加 `indent` 个空格。
pub(crate) fn indent_lines(s: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    s.lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 首行加 `first`，其余行加 `indent` 个空格。
pub(crate) fn indent_continuation(s: &str, first: &str, indent: usize) -> String {
    let pad = " ".repeat(indent);
    s.lines()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{first}{line}")
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 去掉语句末尾的 `;`，用于把完整语句嵌入另一条语句。
pub(crate) fn strip_terminator(s: &str) -> &str {
    s.strip_suffix(';').unwrap_or(s)
}
