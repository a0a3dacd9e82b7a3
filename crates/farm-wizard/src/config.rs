use draft_store::{DraftStoreConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_VERSION};
use serde::{Deserialize, Serialize};

/// Latencia artificial por defecto del guardado.
pub const DEFAULT_SAVE_DELAY_MS: u64 = 400;

/// Configuracion compartida por todos los asistentes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardConfig {
  /// Debounce de la escritura local del borrador.
  pub debounce_ms: u64,
  /// Versión de esquema de los registros locales.
  pub version: u32,
  /// Latencia simulada entre pulsar "guardar" y emitir el borrador.
  pub save_delay_ms: u64,
}

impl Default for WizardConfig {
  fn default() -> Self {
    WizardConfig { debounce_ms: DEFAULT_DEBOUNCE_MS, version: DEFAULT_VERSION, save_delay_ms: DEFAULT_SAVE_DELAY_MS }
  }
}

impl WizardConfig {
  /// Lee `DRAFTS_DEBOUNCE_MS`, `DRAFTS_VERSION` y `DRAFTS_SAVE_DELAY_MS`
  /// (tras cargar `.env`). Valores inválidos usan el defecto.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();
    Self::from_lookup(|name| std::env::var(name).ok())
  }

  pub fn from_lookup<F>(lookup: F) -> Self
    where F: Fn(&str) -> Option<String>
  {
    let defaults = Self::default();
    WizardConfig { debounce_ms: parse_or("DRAFTS_DEBOUNCE_MS", &lookup, defaults.debounce_ms),
                   version: parse_or("DRAFTS_VERSION", &lookup, defaults.version),
                   save_delay_ms: parse_or("DRAFTS_SAVE_DELAY_MS", &lookup, defaults.save_delay_ms) }
  }

  /// Configuracion del store para la clave `key`.
  pub fn store_config(&self, key: impl Into<String>) -> DraftStoreConfig {
    DraftStoreConfig::new(key).with_debounce_ms(self.debounce_ms).with_version(self.version)
  }
}

fn parse_or<T, F>(name: &str, lookup: &F, default: T) -> T
  where T: std::str::FromStr + Copy,
        F: Fn(&str) -> Option<String>
{
  match lookup(name) {
    Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                                     log::warn!("{} inválido ('{}'); se usa el valor por defecto", name, raw);
                                     default
                                   }),
    None => default,
  }
}
