//! 目录重载信号
//!
//! SIGUSR1 开启读时重载，SIGUSR2 关闭。

use std::sync::Arc;

use tokio::signal::unix::{SignalKind, signal};
use tokio::task::JoinHandle;
use tracing::info;

use crate::application::ReloadControl;

/// 启动信号监听任务
pub fn spawn_reload_signal_listener(
    control: Arc<dyn ReloadControl>,
) -> std::io::Result<JoinHandle<()>> {
    let mut enable = signal(SignalKind::user_defined1())?;
    let mut disable = signal(SignalKind::user_defined2())?;

    Ok(tokio::spawn(async move {
        loop {
            tokio::select! {
                Some(()) = enable.recv() => {
                    info!(signal = "SIGUSR1", "Received signal");
                    control.set_reload_enabled(true);
                }
                Some(()) = disable.recv() => {
                    info!(signal = "SIGUSR2", "Received signal");
                    control.set_reload_enabled(false);
                }
                else => break,
            }
        }
    }))
}
