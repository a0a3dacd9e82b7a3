//! Persistencia en disco para el trait `KvStorage`.
//! Este crate expone la configuración (`PersistenceConfig`) y el
//! almacenamiento basado en ficheros (`FileStorage`). La implementación
//! detallada está en `file_storage.rs`.

mod config;
mod file_storage;

pub use config::{PersistenceConfig, DEFAULT_DRAFTS_DIR};
pub use file_storage::{new_from_env, FileStorage};
