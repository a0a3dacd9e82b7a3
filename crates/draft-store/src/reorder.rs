// Archivo: reorder.rs
// Propósito: mover un elemento de una secuencia ordenada de `from` a `to`
// conservando el orden relativo del resto.
//
// No valida rangos: es un remove + insert. Quien llama (acciones "subir" /
// "bajar" de los pasos) debe acotar `to` con `clamp_index`.
use std::borrow::Cow;

/// Devuelve `list` con el elemento de `from` reubicado en `to`.
///
/// Si `from == to` devuelve el mismo slice prestado, sin copiar.
///
/// # Panics
/// Si `from` o `to` quedan fuera de `0..list.len()`.
pub fn reorder<T: Clone>(list: &[T], from: usize, to: usize) -> Cow<'_, [T]> {
  if from == to {
    return Cow::Borrowed(list);
  }
  let mut out = list.to_vec();
  reorder_in_place(&mut out, from, to);
  Cow::Owned(out)
}

/// Variante en sitio de [`reorder`] para listas propias.
pub fn reorder_in_place<T>(list: &mut Vec<T>, from: usize, to: usize) {
  if from == to {
    return;
  }
  let item = list.remove(from);
  list.insert(to, item);
}

/// Acota `index` a `[0, len - 1]`. Con `len == 0` devuelve 0.
pub fn clamp_index(len: usize, index: isize) -> usize {
  if len == 0 || index <= 0 {
    return 0;
  }
  (index as usize).min(len - 1)
}
