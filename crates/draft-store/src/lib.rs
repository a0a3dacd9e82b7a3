//! Crate `draft-store`: persistencia local de borradores en curso
//!
//! Este crate define el puerto de almacenamiento clave/valor (`KvStorage`),
//! el formato del registro persistido (`StoredRecord`), el contenedor
//! genérico `PersistentDraftStore` y la utilidad pura `reorder` usada por las
//! listas ordenadas de los asistentes. También expone implementaciones en
//! memoria útiles para pruebas (`InMemoryStorage`, `FailingStorage`) y un
//! reloj manual (`ManualClock`).
//!
//! Diseño resumido:
//! - Mejor esfuerzo: ningún fallo de almacenamiento llega al llamador; el
//!   store sigue operando sólo en memoria.
//! - Versionado: un registro sólo se acepta si su `v` coincide con la versión
//!   configurada; si no, se usa la fábrica `initial`.
//! - Debounce: cada cambio rearma un único plazo de escritura; el bucle de
//!   eventos dueño del store llama a `poll` para materializarla.
//!
//! Ejemplo rápido:
//! ```rust
//! use draft_store::{DraftStoreConfig, InMemoryStorage, ManualClock, PersistentDraftStore};
//! use std::sync::Arc;
//! let storage = Arc::new(InMemoryStorage::new());
//! let clock = Arc::new(ManualClock::default());
//! let mut store = PersistentDraftStore::open(DraftStoreConfig::new("post_draft_1"),
//!                                            storage.clone(),
//!                                            clock.clone(),
//!                                            || String::from("hola"));
//! store.set_state("hola mundo".to_string());
//! clock.advance_ms(600);
//! assert!(store.poll());
//! assert!(storage.contains("post_draft_1"));
//! ```
pub mod clock;
pub mod errors;
pub mod record;
pub mod reorder;
pub mod storage;
pub mod store;
pub mod stubs;

pub use clock::*;
pub use errors::*;
pub use record::*;
pub use reorder::*;
pub use storage::*;
pub use store::*;
pub use stubs::*;
