//! 商品目录存储
//!
//! 单写多读：快照保存在 `ArcSwap` 中，读取方互不阻塞；
//! 重载由互斥锁串行化，锁只在读取-解析-替换期间持有。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use arc_swap::ArcSwap;
use boutique_telemetry::{record_catalog_load, set_catalog_size};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{Catalog, CatalogSource};
use crate::error::CatalogError;

/// 目录重载开关（管理控制通道）
pub trait ReloadControl: Send + Sync {
    fn set_reload_enabled(&self, enabled: bool);

    fn reload_enabled(&self) -> bool;
}

/// 商品目录存储
pub struct CatalogStore {
    source: Arc<dyn CatalogSource>,
    snapshot: ArcSwap<Catalog>,
    reload_lock: Mutex<()>,
    reload_enabled: AtomicBool,
}

impl CatalogStore {
    /// 创建尚未加载的存储
    pub fn new(source: Arc<dyn CatalogSource>, reload_enabled: bool) -> Self {
        Self {
            source,
            snapshot: ArcSwap::from_pointee(Catalog::default()),
            reload_lock: Mutex::new(()),
            reload_enabled: AtomicBool::new(reload_enabled),
        }
    }

    /// 创建存储并完成首次加载
    ///
    /// 首次加载失败时返回错误，由调用方终止启动。
    pub async fn open(
        source: Arc<dyn CatalogSource>,
        reload_enabled: bool,
    ) -> Result<Self, CatalogError> {
        let store = Self::new(source, reload_enabled);
        store.load().await?;
        Ok(store)
    }

    /// 从数据源加载目录并原子替换当前快照
    ///
    /// 失败时记录警告并保留原快照。
    pub async fn load(&self) -> Result<Arc<Catalog>, CatalogError> {
        let _guard = self.reload_lock.lock().await;

        let started = Instant::now();
        let result = match self.source.read().await {
            Ok(bytes) => Catalog::parse(&bytes),
            Err(e) => Err(e),
        };
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(catalog) => {
                let catalog = Arc::new(catalog);
                self.snapshot.store(Arc::clone(&catalog));

                record_catalog_load(true, elapsed_ms);
                set_catalog_size(catalog.len());
                info!(
                    source = %self.source.describe(),
                    products = catalog.len(),
                    "successfully parsed product catalog json"
                );

                Ok(catalog)
            }
            Err(e) => {
                record_catalog_load(false, elapsed_ms);
                warn!(
                    source = %self.source.describe(),
                    error = %e,
                    "failed to load product catalog, keeping previous snapshot"
                );

                Err(e)
            }
        }
    }

    /// 当前快照，不触发重载
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.snapshot.load_full()
    }

    /// 读取当前目录
    ///
    /// 开启重载或目录为空时先尝试重载；重载失败时返回现有快照（可能为空）。
    pub async fn current_products(&self) -> Arc<Catalog> {
        let current = self.snapshot();
        if !self.reload_enabled() && !current.is_empty() {
            return current;
        }

        match self.load().await {
            Ok(catalog) => catalog,
            Err(_) => self.snapshot(),
        }
    }
}

impl ReloadControl for CatalogStore {
    fn set_reload_enabled(&self, enabled: bool) {
        self.reload_enabled.store(enabled, Ordering::Release);
        if enabled {
            info!("Enable catalog reloading");
        } else {
            info!("Disable catalog reloading");
        }
    }

    fn reload_enabled(&self) -> bool {
        self.reload_enabled.load(Ordering::Acquire)
    }
}
