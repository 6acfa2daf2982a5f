//! domain-core - 跨服务共享的领域核心类型

mod money;

pub use money::*;
