//! 自动索引
//!
//! 把类型（写入定义表）或实例（写入 Bean 表）登记到其祖先链和接口集合中
//! 每一个尚未被占用的标识符下，先登记者优先。

use tracing::trace;

use super::bean::Bean;
use super::registry::{Definition, Identifier};
use super::Container;

impl Container {
    /// 类型自身、祖先链、全部接口，按此顺序
    fn index_ids(&self, type_name: &str) -> Vec<Identifier> {
        let mut ids = self.catalog.ancestors(type_name);
        ids.extend(self.catalog.interfaces(type_name));
        ids
    }

    pub(crate) fn auto_register_class(&self, class: &str) {
        for id in self.index_ids(class) {
            if self
                .registry
                .insert_definition_if_absent(id.clone(), || Definition::of_type(class))
            {
                trace!(id = %id, class, "Auto-indexed definition");
            }
        }
    }

    /// 数据值不参与索引
    pub(crate) fn auto_register_bean(&self, bean: &Bean) {
        let Some(instance) = bean.as_instance() else {
            return;
        };

        for id in self.index_ids(instance.type_name()) {
            if self.registry.insert_bean_if_absent(id.clone(), bean) {
                trace!(id = %id, type_name = instance.type_name(), "Auto-indexed bean");
            }
        }
    }
}
