//! Statement：所有可渲染语句的统一接口（SELECT/UPDATE/DELETE/INSERT/WITH/EXISTS）。

use crate::bindings::{Bindings, substitute_values};
use crate::error::MalformedQuery;
use crate::flavor::Flavor;
use dyn_clone::DynClone;

/// 可以嵌入其他语句的可渲染对象。
pub trait Statement: DynClone + std::fmt::Debug + Send + Sync {
    /// 最终 SQL 文本，原样字面量已经替换进去。
    fn render(&self) -> Result<String, MalformedQuery>;

    /// 参数映射，不含原样字面量。
    fn bindings(&self) -> Bindings;

    fn flavor(&self) -> Flavor;

    /// 仅供日志查看：普通参数的占位符被替换为值的可读形式。
    fn loggable(&self) -> Result<String, MalformedQuery> {
        let sql = self.render()?;
        Ok(substitute_values(&sql, self.flavor(), &self.bindings()))
    }
}

dyn_clone::clone_trait_object!(Statement);

impl Statement for Box<dyn Statement> {
    fn render(&self) -> Result<String, MalformedQuery> {
        (**self).render()
    }

    fn bindings(&self) -> Bindings {
        (**self).bindings()
    }

    fn flavor(&self) -> Flavor {
        (**self).flavor()
    }

    fn loggable(&self) -> Result<String, MalformedQuery> {
        (**self).loggable()
    }
}
