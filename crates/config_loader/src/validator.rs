//! 配置校验模块
//!
//! 校验规则 (硬错误)：
//! - 严重级别在已知范围内 (0..=7)
//! - multifile 启用时 separate 中的分类名非空且唯一
//!
//! 空配置总是合法：所有字段取零值时不报错。
//! 非致命问题通过 [`warnings`] 返回。

use std::collections::HashSet;

use contracts::{ContractError, LogConfig, Severity};

/// 校验 LogConfig 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(config: &LogConfig) -> Result<(), ContractError> {
    validate_levels(config)?;
    validate_separate(config)?;
    Ok(())
}

/// 收集非致命警告
pub fn warnings(config: &LogConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if !config.async_mode && config.chan_length > 0 {
        warnings.push(format!(
            "chan_length = {} is ignored because async is disabled",
            config.chan_length
        ));
    }

    if !config.multifile && !config.separate.is_empty() {
        warnings.push(format!(
            "separate = {:?} is ignored because multifile is disabled",
            config.separate
        ));
    }

    if !config.adapter_console && config.console_level != Severity::default() {
        warnings.push(format!(
            "console_level = {} is ignored because adapter_console is disabled",
            config.console_level
        ));
    }

    if config.file.is_empty() {
        warnings.push("file is empty - the file sink will fail to open".to_string());
    }

    if !config.rotate && (config.maxlines > 0 || config.maxsize > 0 || config.daily) {
        warnings.push(
            "maxlines / maxsize / daily are set but rotate is disabled".to_string(),
        );
    }

    warnings
}

/// 校验严重级别
fn validate_levels(config: &LogConfig) -> Result<(), ContractError> {
    if config.adapter_console && !config.console_level.is_known() {
        return Err(ContractError::config_validation(
            "console_level",
            format!(
                "severity must be within 0..=7, got {}",
                config.console_level.rank()
            ),
        ));
    }

    if !config.file_level.is_known() {
        return Err(ContractError::config_validation(
            "file_level",
            format!(
                "severity must be within 0..=7, got {}",
                config.file_level.rank()
            ),
        ));
    }

    Ok(())
}

/// 校验分文件配置
fn validate_separate(config: &LogConfig) -> Result<(), ContractError> {
    if !config.multifile {
        return Ok(());
    }

    let mut seen = HashSet::new();
    for (idx, category) in config.separate.iter().enumerate() {
        if category.trim().is_empty() {
            return Err(ContractError::config_validation(
                format!("separate[{}]", idx),
                "category name cannot be empty",
            ));
        }
        if !seen.insert(category.as_str()) {
            return Err(ContractError::config_validation(
                format!("separate[{}]", idx),
                format!("duplicate category '{}'", category),
            ));
        }
    }
    Ok(())
}
