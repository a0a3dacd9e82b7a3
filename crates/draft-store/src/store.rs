// Archivo: store.rs
// Propósito: implementar `PersistentDraftStore`, el contenedor genérico que
// respalda cada borrador en curso con durabilidad local de mejor esfuerzo.
//
// Nota: el store no tiene hilos ni temporizadores propios. Cada cambio de
// estado rearma un único plazo (`pending`); el bucle de eventos que posee el
// store llama a `poll` y la escritura ocurre cuando el plazo ya venció. Así
// hay como mucho una escritura pendiente por store y siempre refleja el
// estado más reciente.
use crate::clock::Clock;
use crate::record::{decode_record, StoredRecord};
use crate::storage::KvStorage;
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Debounce por defecto entre el último cambio y la escritura.
pub const DEFAULT_DEBOUNCE_MS: u64 = 600;
/// Versión de esquema por defecto.
pub const DEFAULT_VERSION: u32 = 1;

/// Parámetros de un store: clave, debounce y versión.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStoreConfig {
  /// Clave única del borrador (p.ej. `practice_draft_<uuid>`).
  pub key: String,
  pub debounce_ms: u64,
  pub version: u32,
}

impl DraftStoreConfig {
  /// Configuración con los valores por defecto para `key`.
  pub fn new(key: impl Into<String>) -> Self {
    Self { key: key.into(), debounce_ms: DEFAULT_DEBOUNCE_MS, version: DEFAULT_VERSION }
  }

  pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
    self.debounce_ms = debounce_ms;
    self
  }

  pub fn with_version(mut self, version: u32) -> Self {
    self.version = version;
    self
  }

  fn debounce(&self) -> Duration {
    Duration::milliseconds(i64::try_from(self.debounce_ms).unwrap_or(i64::MAX / 1_000_000))
  }
}

type InitialFn<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Contenedor de estado por clave con escritura diferida al almacenamiento.
///
/// - Al abrirse se hidrata desde el registro en `key` si existe y su versión
///   coincide; si no, desde la fábrica `initial`.
/// - Cada cambio rearma el debounce; `poll` escribe cuando vence.
/// - `clear` borra el registro y vuelve a `initial()`.
///
/// Ningún fallo del almacenamiento se propaga: se registra en el log y el
/// store sigue funcionando sólo en memoria.
pub struct PersistentDraftStore<T> {
  config: DraftStoreConfig,
  storage: Arc<dyn KvStorage>,
  clock: Arc<dyn Clock>,
  initial: InitialFn<T>,
  state: T,
  /// Plazo de la única escritura pendiente, si la hay.
  pending: Option<DateTime<Utc>>,
}

impl<T> PersistentDraftStore<T> where T: Serialize + DeserializeOwned
{
  /// Abre el store e hidrata el estado inicial.
  pub fn open<F>(config: DraftStoreConfig, storage: Arc<dyn KvStorage>, clock: Arc<dyn Clock>, initial: F) -> Self
    where F: Fn() -> T + Send + Sync + 'static
  {
    let state = hydrate(&config, storage.as_ref(), &initial);
    Self { config, storage, clock, initial: Box::new(initial), state, pending: None }
  }

  pub fn state(&self) -> &T {
    &self.state
  }

  pub fn config(&self) -> &DraftStoreConfig {
    &self.config
  }

  pub fn key(&self) -> &str {
    &self.config.key
  }

  /// Reemplaza el estado y rearma la escritura diferida.
  pub fn set_state(&mut self, next: T) {
    self.state = next;
    self.schedule();
  }

  /// Modifica el estado en sitio y rearma la escritura diferida.
  pub fn update<F>(&mut self, f: F)
    where F: FnOnce(&mut T)
  {
    f(&mut self.state);
    self.schedule();
  }

  /// Plazo de la escritura pendiente.
  pub fn pending_deadline(&self) -> Option<DateTime<Utc>> {
    self.pending
  }

  pub fn has_pending_write(&self) -> bool {
    self.pending.is_some()
  }

  /// Dispara la escritura pendiente si su plazo ya venció.
  ///
  /// Devuelve `true` sólo si el registro llegó al almacenamiento. Un fallo
  /// consume igualmente el plazo: no hay reintentos hasta el próximo cambio.
  pub fn poll(&mut self) -> bool {
    match self.pending {
      Some(deadline) if self.clock.now() >= deadline => {
        self.pending = None;
        self.write_now()
      }
      _ => false,
    }
  }

  /// Escribe ya la escritura pendiente (cierre de la aplicación).
  pub fn flush(&mut self) -> bool {
    if self.pending.take().is_some() {
      self.write_now()
    } else {
      false
    }
  }

  /// Cambia clave, debounce o versión en caliente.
  ///
  /// Cancela la escritura pendiente de la configuración anterior y programa
  /// una escritura del estado actual con la nueva. No migra datos.
  pub fn reconfigure(&mut self, config: DraftStoreConfig) {
    if config == self.config {
      return;
    }
    log::debug!("store '{}' reconfigurado como '{}' (v{})", self.config.key, config.key, config.version);
    self.pending = None;
    self.config = config;
    self.schedule();
  }

  /// Borra el registro (idempotente) y reinicia el estado con `initial()`.
  pub fn clear(&mut self) {
    self.pending = None;
    if let Err(e) = self.storage.delete(&self.config.key) {
      log::debug!("no se pudo borrar el borrador '{}': {}", self.config.key, e);
    }
    self.state = (self.initial)();
  }

  fn schedule(&mut self) {
    let now = self.clock.now();
    self.pending = Some(now.checked_add_signed(self.config.debounce()).unwrap_or(DateTime::<Utc>::MAX_UTC));
  }

  fn write_now(&self) -> bool {
    let record = StoredRecord::new(self.config.version, &self.state, self.clock.now().timestamp_millis());
    let raw = match record.to_json() {
      Ok(raw) => raw,
      Err(e) => {
        log::warn!("no se pudo serializar el borrador '{}': {}", self.config.key, e);
        return false;
      }
    };
    match self.storage.set(&self.config.key, &raw) {
      Ok(()) => true,
      Err(e) => {
        log::debug!("escritura del borrador '{}' ignorada: {}", self.config.key, e);
        false
      }
    }
  }
}

impl<T: fmt::Debug> fmt::Debug for PersistentDraftStore<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PersistentDraftStore")
     .field("config", &self.config)
     .field("state", &self.state)
     .field("pending", &self.pending)
     .finish()
  }
}

fn hydrate<T, F>(config: &DraftStoreConfig, storage: &dyn KvStorage, initial: &F) -> T
  where T: DeserializeOwned,
        F: Fn() -> T
{
  match storage.get(&config.key) {
    Ok(Some(raw)) => match decode_record::<T>(&raw, config.version) {
      Some(record) => {
        log::debug!("borrador '{}' recuperado (updated={})", config.key, record.updated);
        record.data
      }
      None => {
        log::debug!("registro '{}' inválido o de otra versión; se empieza de cero", config.key);
        initial()
      }
    },
    Ok(None) => initial(),
    Err(e) => {
      log::debug!("lectura del borrador '{}' ignorada: {}", config.key, e);
      initial()
    }
  }
}
