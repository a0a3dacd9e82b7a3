use crate::step::ErrorMap;

/// Paso de un asistente.
///
/// Un paso sólo describe: nombre, título visible, campos enfocables y la
/// validación que decide si se puede abandonar. El control de flujo vive
/// en `MultiStepForm`.
pub trait WizardStep<D>: Send + Sync {
  /// Identificador del paso.
  fn name(&self) -> &str;

  /// Título mostrado al usuario.
  fn title(&self) -> &str {
    self.name()
  }

  /// Campos del paso, en orden de tabulación.
  fn fields(&self) -> &[&'static str] {
    &[]
  }

  /// Valida el borrador para este paso. Un mapa vacío permite avanzar.
  fn validate(&self, _draft: &D) -> ErrorMap {
    ErrorMap::new()
  }
}

type Validator<D> = Box<dyn Fn(&D) -> ErrorMap + Send + Sync>;

/// Paso construido a partir de un cierre, para formularios ad hoc.
pub struct FnStep<D> {
  name: String,
  title: String,
  fields: Vec<&'static str>,
  validator: Validator<D>,
}

impl<D> FnStep<D> {
  pub fn new<F>(name: impl Into<String>, fields: Vec<&'static str>, validator: F) -> Self
    where F: Fn(&D) -> ErrorMap + Send + Sync + 'static
  {
    let name = name.into();
    Self { title: name.clone(), name, fields, validator: Box::new(validator) }
  }

  /// Paso sin validación (por ejemplo, una revisión final).
  pub fn always_valid(name: impl Into<String>) -> Self {
    Self::new(name, Vec::new(), |_| ErrorMap::new())
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }
}

impl<D> WizardStep<D> for FnStep<D> {
  fn name(&self) -> &str {
    &self.name
  }

  fn title(&self) -> &str {
    &self.title
  }

  fn fields(&self) -> &[&'static str] {
    &self.fields
  }

  fn validate(&self, draft: &D) -> ErrorMap {
    (self.validator)(draft)
  }
}
