use thiserror::Error;

/// 工厂或构造函数返回的底层错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 参数错误：标识符、定义或依赖不合法
    Argument,
    /// 值错误：配置结构不符合约定
    Value,
    /// 服务创建失败
    Creation,
    /// 配置文件读取或解析失败
    Config,
}

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("invalid id: {0:?}")]
    InvalidId(String),
    #[error("definition cannot be empty")]
    EmptyDefinition,
    #[error("definition '{0}' is neither a factory nor a known class")]
    UnknownDefinition(String),
    #[error("bean is not an instance of {id} (found {actual})")]
    NotAnInstance { id: String, actual: String },
    #[error("{class} is not a subclass of {id}")]
    NotASubclass { class: String, id: String },
    #[error("create {class} instance failed: can't find a bean with id [{parameter}]")]
    MissingDependency { class: String, parameter: String },
    #[error("constructor of {class} has no argument named '{parameter}'")]
    MissingArgument { class: String, parameter: String },
    #[error("type mismatch for '{id}': expected {expected}, found {actual}")]
    TypeMismatch {
        id: String,
        expected: String,
        actual: String,
    },
    #[error("invalid key for bean: {0}")]
    InvalidBeanKey(String),
    #[error("failed to create '{service}': {source}")]
    CreationFailed {
        service: String,
        #[source]
        source: BoxError,
    },
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ContainerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ContainerError::InvalidBeanKey(_) => ErrorKind::Value,
            ContainerError::CreationFailed { .. } => ErrorKind::Creation,
            ContainerError::Config(_) => ErrorKind::Config,
            _ => ErrorKind::Argument,
        }
    }

    pub fn is_argument_error(&self) -> bool {
        self.kind() == ErrorKind::Argument
    }

    pub fn is_value_error(&self) -> bool {
        self.kind() == ErrorKind::Value
    }

    pub(crate) fn creation_failed(service: impl Into<String>, source: BoxError) -> Self {
        ContainerError::CreationFailed {
            service: service.into(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Failed to parse JSON from '{0}': {1}")]
    JsonParse(String, #[source] serde_json::Error),
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),
    #[error("Section '{section}' is malformed: {reason}")]
    MalformedSection { section: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ContainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert!(ContainerError::EmptyDefinition.is_argument_error());
        assert!(ContainerError::InvalidId(String::new()).is_argument_error());
        assert!(ContainerError::InvalidBeanKey("0".into()).is_value_error());

        let err = ContainerError::creation_failed("db", "connection refused".into());
        assert_eq!(err.kind(), ErrorKind::Creation);

        let err: ContainerError = ConfigError::UnsupportedFormat("yaml".into()).into();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_missing_dependency_message_names_parameter() {
        let err = ContainerError::MissingDependency {
            class: "Mailer".into(),
            parameter: "transport".into(),
        };
        let message = err.to_string();
        assert!(message.contains("Mailer"));
        assert!(message.contains("[transport]"));
    }
}
