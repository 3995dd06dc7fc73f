//! 服务配置
//!
//! 启动时构造一次并显式传入，不使用全局状态。
//! 支持TOML文件加载与环境变量覆盖。

use dwgmap_core::TessellationConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 服务配置根结构
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
    #[serde(default)]
    pub converter: ConverterConfig,
    #[serde(default)]
    pub tessellation: TessellationSettings,
    /// 地图底图服务的访问令牌，仅透传给前端，引擎不使用
    #[serde(default)]
    pub map_token: Option<String>,
}

impl ServerConfig {
    fn default_port() -> u16 {
        4000
    }

    /// 从显式路径加载配置
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 自动发现配置：优先读取环境变量 `DWGMAP_CONFIG` 指定的路径，
    /// 否则寻找 `./config/default.toml`；文件缺失时返回默认配置。
    /// `PORT` 与 `DWGMAP_MAP_TOKEN` 始终可覆盖对应项。
    pub fn discover() -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = env::var_os("DWGMAP_CONFIG") {
            Self::from_file(PathBuf::from(path))?
        } else {
            let default_path = Path::new("config").join("default.toml");
            if default_path.exists() {
                Self::from_file(default_path)?
            } else {
                Self::default()
            }
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Ok(token) = env::var("DWGMAP_MAP_TOKEN") {
            self.map_token = Some(token);
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: Self::default_port(),
            converter: ConverterConfig::default(),
            tessellation: TessellationSettings::default(),
            map_token: None,
        }
    }
}

/// 外部转换工具配置
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterConfig {
    #[serde(default = "ConverterConfig::default_tool")]
    pub tool: String,
    /// 外部工具的最长运行时间，超时即判请求失败
    #[serde(default = "ConverterConfig::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ConverterConfig {
    fn default_tool() -> String {
        "dwg2dxf".to_string()
    }

    fn default_timeout_secs() -> u64 {
        60
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            tool: Self::default_tool(),
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// 曲线细分配置，默认值与引擎保持一致
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TessellationSettings {
    #[serde(default = "TessellationSettings::default_segments")]
    pub circle_segments: usize,
    #[serde(default = "TessellationSettings::default_segments")]
    pub arc_segments: usize,
}

impl TessellationSettings {
    fn default_segments() -> usize {
        64
    }
}

impl Default for TessellationSettings {
    fn default() -> Self {
        Self {
            circle_segments: Self::default_segments(),
            arc_segments: Self::default_segments(),
        }
    }
}

impl From<TessellationSettings> for TessellationConfig {
    fn from(settings: TessellationSettings) -> Self {
        Self {
            circle_segments: settings.circle_segments,
            arc_segments: settings.arc_segments,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 4000);
        assert_eq!(config.converter.tool, "dwg2dxf");
        assert_eq!(config.converter.timeout_secs, 60);
        assert_eq!(config.tessellation.circle_segments, 64);
        assert!(config.map_token.is_none());
    }

    #[test]
    fn test_load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        writeln!(
            file,
            r#"
            port = 8080
            map_token = "pk.test"

            [converter]
            tool = "/opt/libredwg/bin/dwg2dxf"
            timeout_secs = 10

            [tessellation]
            circle_segments = 32
            "#
        )
        .unwrap();

        let config = ServerConfig::from_file(file.path()).expect("load config");
        assert_eq!(config.port, 8080);
        assert_eq!(config.map_token.as_deref(), Some("pk.test"));
        assert_eq!(config.converter.tool, "/opt/libredwg/bin/dwg2dxf");
        assert_eq!(config.converter.timeout_secs, 10);
        assert_eq!(config.tessellation.circle_segments, 32);
        // 未给出的字段落回默认
        assert_eq!(config.tessellation.arc_segments, 64);
    }

    #[test]
    fn test_port_env_override() {
        let mut config = ServerConfig::default();
        env::set_var("PORT", "9999");
        config.apply_env();
        env::remove_var("PORT");
        assert_eq!(config.port, 9999);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ServerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
