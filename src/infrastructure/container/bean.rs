//! Bean：容器中已解析的值

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::descriptor::Injectable;
use super::registry::Identifier;

/// 已登记类型的实例
///
/// 持有运行时类型名和共享的实例句柄，克隆只复制句柄。
#[derive(Clone)]
pub struct Instance {
    type_name: Identifier,
    value: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub fn new<T: Any + Send + Sync>(type_name: impl Into<Identifier>, value: T) -> Self {
        Self::from_arc(type_name, Arc::new(value))
    }

    pub fn from_arc(type_name: impl Into<Identifier>, value: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            type_name: type_name.into(),
            value,
        }
    }

    /// 以 `T::TYPE_NAME` 作为运行时类型名包装实例
    pub fn of<T: Injectable>(value: T) -> Self {
        Self::new(T::TYPE_NAME, value)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.value.clone().downcast::<T>().ok()
    }

    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// 容器中存放的值
#[derive(Clone, Debug)]
pub enum Bean {
    /// 普通数据：字符串、数字、列表、映射
    Data(Value),
    /// 已登记类型的对象，参与自动索引
    Object(Instance),
}

impl Bean {
    pub fn data(value: impl Into<Value>) -> Self {
        Bean::Data(value.into())
    }

    pub fn object<T: Injectable>(value: T) -> Self {
        Bean::Object(Instance::of(value))
    }

    /// `Data(Null)` 视为缺失
    pub fn is_absent(&self) -> bool {
        matches!(self, Bean::Data(Value::Null))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Bean::Object(_))
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Bean::Object(instance) => Some(instance),
            Bean::Data(_) => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Bean::Data(value) => Some(value),
            Bean::Object(_) => None,
        }
    }

    /// 运行时类型名；数据值返回其 JSON 类别
    pub fn type_name(&self) -> &str {
        match self {
            Bean::Object(instance) => instance.type_name(),
            Bean::Data(Value::Null) => "null",
            Bean::Data(Value::Bool(_)) => "bool",
            Bean::Data(Value::Number(_)) => "number",
            Bean::Data(Value::String(_)) => "string",
            Bean::Data(Value::Array(_)) => "array",
            Bean::Data(Value::Object(_)) => "map",
        }
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.as_instance().and_then(Instance::downcast::<T>)
    }

    /// 将数据值反序列化为 `T`
    pub fn deserialize<T: DeserializeOwned>(&self) -> Option<T> {
        self.as_data()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// 对象比较句柄，数据比较内容
    pub fn ptr_eq(&self, other: &Bean) -> bool {
        match (self, other) {
            (Bean::Object(a), Bean::Object(b)) => a.ptr_eq(b),
            (Bean::Data(a), Bean::Data(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for Bean {
    fn from(value: Value) -> Self {
        Bean::Data(value)
    }
}

impl From<Instance> for Bean {
    fn from(instance: Instance) -> Self {
        Bean::Object(instance)
    }
}

impl From<&str> for Bean {
    fn from(value: &str) -> Self {
        Bean::Data(Value::from(value))
    }
}

impl From<String> for Bean {
    fn from(value: String) -> Self {
        Bean::Data(Value::from(value))
    }
}

impl From<i64> for Bean {
    fn from(value: i64) -> Self {
        Bean::Data(Value::from(value))
    }
}

impl From<bool> for Bean {
    fn from(value: bool) -> Self {
        Bean::Data(Value::from(value))
    }
}
