//! 外部DWG转换工具适配
//!
//! DWG二进制格式的解码交给系统安装的命令行工具（默认 `dwg2dxf`），
//! 本层只负责进程调用、退出码检查与超时控制。

use crate::error::FileError;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

/// DWG → DXF 转换能力；注入以便测试时替换为确定性实现
pub trait DrawingConverter: Send + Sync {
    fn convert(
        &self,
        input: &Path,
        output: &Path,
    ) -> impl Future<Output = Result<(), FileError>> + Send;
}

/// 调用外部命令行工具的转换器
///
/// 约定：`<tool> <input> <output>`，退出码0视为成功。
/// 标准输出/错误继承自服务进程，工具诊断直接进服务日志。
#[derive(Debug, Clone)]
pub struct Dwg2Dxf {
    tool: String,
    timeout: Duration,
}

impl Dwg2Dxf {
    pub fn new(tool: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            timeout,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }
}

impl Default for Dwg2Dxf {
    fn default() -> Self {
        Self::new("dwg2dxf", Duration::from_secs(60))
    }
}

impl DrawingConverter for Dwg2Dxf {
    fn convert(
        &self,
        input: &Path,
        output: &Path,
    ) -> impl Future<Output = Result<(), FileError>> + Send {
        async move {
            info!(tool = self.tool.as_str(), input = %input.display(), "converting drawing");

            let mut command = Command::new(&self.tool);
            // 超时后子进程随句柄一起回收，避免悬挂的工具占住资源
            command.arg(input).arg(output).kill_on_drop(true);

            let wait = async {
                let mut child = command.spawn().map_err(|source| FileError::ToolSpawn {
                    tool: self.tool.clone(),
                    source,
                })?;
                child.wait().await.map_err(FileError::Io)
            };

            let status = tokio::time::timeout(self.timeout, wait)
                .await
                .map_err(|_| FileError::Timeout {
                    tool: self.tool.clone(),
                    seconds: self.timeout.as_secs(),
                })??;

            if status.success() {
                Ok(())
            } else {
                // 被信号终止时没有退出码
                Err(FileError::ToolExit {
                    tool: self.tool.clone(),
                    code: status.code().unwrap_or(-1),
                })
            }
        }
    }
}
