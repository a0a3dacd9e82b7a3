// Archivo: clock.rs
// Propósito: abstraer la fuente de tiempo para que los plazos de debounce y
// las marcas `updated` sean deterministas en pruebas.
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Mutex;

/// Fuente de tiempo inyectada en los stores y asistentes.
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Reloj de pared.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Reloj manual para pruebas: sólo avanza cuando se le pide.
#[derive(Debug)]
pub struct ManualClock {
  now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
  /// Crea un reloj detenido en `start`.
  pub fn new(start: DateTime<Utc>) -> Self {
    Self { now: Mutex::new(start) }
  }

  /// Avanza el reloj `ms` milisegundos.
  pub fn advance_ms(&self, ms: i64) {
    let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
    *now += Duration::milliseconds(ms);
  }

  /// Fija el instante actual.
  pub fn set(&self, at: DateTime<Utc>) {
    *self.now.lock().unwrap_or_else(|e| e.into_inner()) = at;
  }
}

impl Default for ManualClock {
  /// Arranca en 2024-01-01T00:00:00Z.
  fn default() -> Self {
    Self::new(Utc.timestamp_millis_opt(1_704_067_200_000).single().unwrap_or_default())
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock().unwrap_or_else(|e| e.into_inner())
  }
}
