//! 配置校验模块
//!
//! 校验规则：
//! - name 非空
//! - base_path 非空
//! - extension 非空、不以 `.` 开头、不含路径分隔符

use contracts::{ContractError, DispatcherConfig};

/// 校验 DispatcherConfig
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &DispatcherConfig) -> Result<(), ContractError> {
    validate_name(config)?;
    validate_base_path(config)?;
    validate_extension(config)?;
    Ok(())
}

fn validate_name(config: &DispatcherConfig) -> Result<(), ContractError> {
    if config.name.trim().is_empty() {
        return Err(ContractError::config_validation(
            "name",
            "dispatcher name cannot be empty",
        ));
    }
    Ok(())
}

fn validate_base_path(config: &DispatcherConfig) -> Result<(), ContractError> {
    if config.base_path.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "base_path",
            "base_path cannot be empty",
        ));
    }
    Ok(())
}

fn validate_extension(config: &DispatcherConfig) -> Result<(), ContractError> {
    let ext = &config.extension;
    if ext.is_empty() {
        return Err(ContractError::config_validation(
            "extension",
            "extension cannot be empty",
        ));
    }
    if ext.starts_with('.') {
        return Err(ContractError::config_validation(
            "extension",
            format!("extension must not start with '.', got '{ext}'"),
        ));
    }
    if ext.contains(['/', '\\', '\0']) {
        return Err(ContractError::config_validation(
            "extension",
            format!("extension must not contain a path separator, got '{ext}'"),
        ));
    }
    Ok(())
}
