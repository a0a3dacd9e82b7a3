use draft_store::{clamp_index, reorder, reorder_in_place};
use std::borrow::Cow;

#[test]
fn same_index_returns_input_without_copy() {
  let list: Vec<String> = ["riego", "poda", "cosecha"].iter().map(|s| s.to_string()).collect();
  for i in 0..list.len() {
    match reorder(&list, i, i) {
      Cow::Borrowed(b) => assert!(std::ptr::eq(b, list.as_slice())),
      Cow::Owned(_) => panic!("copia innecesaria para {}", i),
    }
  }
}

#[test]
fn every_move_preserves_elements_and_relative_order() {
  let list: Vec<u32> = (0..6).collect();
  for from in 0..list.len() {
    for to in 0..list.len() {
      if from == to {
        continue;
      }
      let out = reorder(&list, from, to).into_owned();
      assert_eq!(out.len(), list.len());
      assert_eq!(out[to], list[from]);

      let mut sorted = out.clone();
      sorted.sort();
      assert_eq!(sorted, list);

      // el resto mantiene su orden relativo
      let rest_before: Vec<u32> = list.iter().copied().filter(|x| *x != list[from]).collect();
      let rest_after: Vec<u32> = out.iter().copied().filter(|x| *x != list[from]).collect();
      assert_eq!(rest_before, rest_after);
    }
  }
}

#[test]
fn in_place_matches_pure_version() {
  let list = vec!['a', 'b', 'c', 'd'];
  let mut owned = list.clone();
  reorder_in_place(&mut owned, 3, 0);
  assert_eq!(owned, reorder(&list, 3, 0).into_owned());
  assert_eq!(owned, vec!['d', 'a', 'b', 'c']);
}

#[test]
fn move_up_and_down_with_clamped_targets() {
  let list = vec![1, 2, 3];
  // "subir" el primero: el destino se acota a 0 y no hay copia
  let to = clamp_index(list.len(), -1);
  assert!(matches!(reorder(&list, 0, to), Cow::Borrowed(_)));
  // "bajar" el último
  let to = clamp_index(list.len(), 2 + 1);
  assert!(matches!(reorder(&list, 2, to), Cow::Borrowed(_)));
  let to = clamp_index(list.len(), 1 + 1);
  assert_eq!(reorder(&list, 1, to).as_ref(), &[1, 3, 2]);
}
