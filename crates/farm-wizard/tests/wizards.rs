use draft_store::{Clock, InMemoryStorage, KvStorage, ManualClock};
use farm_domain::{Draft, DraftStatus, MediaSelection, PostDraft, QuestionKind};
use farm_wizard::{draft_key, NavOutcome, SaveCallback, SaveOutcome, WizardConfig, WizardFactory, WizardKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;

fn factory() -> (WizardFactory, Arc<InMemoryStorage>, Arc<ManualClock>) {
  let storage = Arc::new(InMemoryStorage::new());
  let clock = Arc::new(ManualClock::default());
  let kv: Arc<dyn KvStorage> = storage.clone();
  let clk: Arc<dyn Clock> = clock.clone();
  let config = WizardConfig { save_delay_ms: 0, ..WizardConfig::default() };
  (WizardFactory::new(kv, clk, config), storage, clock)
}

fn ignore<D: Send + 'static>() -> SaveCallback<D> {
  Box::new(|_| Ok(()))
}

#[test]
fn post_wizard_checks_content_then_classification() {
  let (factory, _, _) = factory();
  let mut wizard = factory.open_post(None, None, ignore()).expect("open");
  assert_eq!(wizard.step_names(), vec!["content", "classification", "review"]);

  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("title"), Some("El título es obligatorio"));
  assert_eq!(wizard.errors().get("content"), Some("El contenido es obligatorio"));

  wizard.edit("title", |d| d.title = "Abc".into()).expect("edit");
  wizard.edit("content", |d| d.content = "Cómo cuidar el suelo en invierno".into()).expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("title"), Some("El título debe tener al menos 5 caracteres"));

  wizard.edit("title", |d| d.title = "Abono verde".into()).expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Moved { to: 1 });

  wizard.edit("media", |d| d.media = MediaSelection::image("ftp://x/foto.jpg", "")).expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("category"), Some("Selecciona una categoría"));
  assert_eq!(wizard.errors().get("media"), Some("La URL debe empezar por http:// o https://"));
  assert_eq!(wizard.errors().first_field(), Some("category"));

  wizard.edit("category", |d| d.category = Some("suelos".into())).expect("edit");
  wizard.edit("media", |d| d.media = MediaSelection::video("https://videos.example/abono")).expect("edit");
  wizard.edit("tags", |d| {
          d.add_tag(" Abono ");
          d.add_tag("abono");
        })
        .expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Moved { to: 2 });
  assert_eq!(wizard.draft().tags, vec!["abono".to_string()]);
  assert!(matches!(wizard.save().expect("save"), SaveOutcome::Saved(_)));
}

#[test]
fn practice_wizard_requires_categories_and_meaningful_steps() {
  let (factory, _, _) = factory();
  let initial = json!({
    "title": "Rotación de cultivos",
    "summary": "Alternar familias de plantas para cortar plagas"
  });
  let mut wizard = factory.open_practice(None, Some(initial), ignore()).expect("open");
  assert_eq!(wizard.step_count(), 5);
  assert_eq!(wizard.next().expect("next"), NavOutcome::Moved { to: 1 });

  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("categories"), Some("Selecciona al menos una categoría"));
  wizard.edit("categories", |d| {
          d.toggle_category("cultivos");
        })
        .expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Moved { to: 2 });

  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("steps"), Some("Añade al menos un paso"));
  wizard.edit("steps", |d| {
          d.steps.push("Dividir la parcela en cuatro");
          d.steps.push("ab");
        })
        .expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("steps"), Some("El paso 2 debe tener al menos 3 caracteres"));

  wizard.edit("steps", |d| {
          d.steps.move_up(1);
        })
        .expect("edit");
  assert_eq!(wizard.draft().steps.get(0).map(|s| s.text.as_str()), Some("ab"));
  assert!(wizard.draft().steps.is_dense());
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("steps"), Some("El paso 1 debe tener al menos 3 caracteres"));
}

#[test]
fn question_answers_depend_on_kind() {
  let (factory, _, _) = factory();
  let initial = json!({ "statement": "¿Cuándo se siembra el ajo?", "category": "huerta" });
  let mut wizard = factory.open_question(None, Some(initial), ignore()).expect("open");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Moved { to: 1 });

  wizard.edit("choices", |d| {
          d.add_choice("En otoño", false);
        })
        .expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("choices"), Some("Añade al menos 2 opciones"));

  wizard.edit("choices", |d| {
          d.add_choice("En verano", false);
        })
        .expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("choices"), Some("Marca al menos una opción correcta"));

  wizard.merge_patch(&json!({ "kind": QuestionKind::TrueFalse })).expect("patch");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("trueFalseAnswer"), Some("Indica si la afirmación es verdadera o falsa"));
  wizard.merge_patch(&json!({ "trueFalseAnswer": true })).expect("patch");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Moved { to: 2 });

  wizard.edit("explanation", |d| d.explanation = "corta".into()).expect("edit");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  wizard.edit("explanation", |d| d.explanation.clear()).expect("edit");
  assert!(matches!(wizard.save().expect("save"), SaveOutcome::Saved(_)));
}

#[test]
fn open_answer_needs_reference_answer() {
  let (factory, _, _) = factory();
  let initial = json!({
    "statement": "Explica qué es el compostaje",
    "category": "suelos",
    "kind": "open_answer"
  });
  let mut wizard = factory.open_question(None, Some(initial), ignore()).expect("open");
  wizard.next().expect("next");
  assert_eq!(wizard.next().expect("next"), NavOutcome::Blocked);
  assert_eq!(wizard.errors().get("referenceAnswer"), Some("Escribe la respuesta de referencia"));
}

#[test]
fn initial_partial_cannot_set_status() {
  let (factory, _, _) = factory();
  let wizard = factory.open_post(None, Some(json!({ "status": "saved", "title": "Siembra" })), ignore()).expect("open");
  assert_eq!(wizard.draft().status(), DraftStatus::Draft);
  assert_eq!(wizard.draft().title, "Siembra");
}

#[test]
fn invalid_initial_partial_is_rejected() {
  let (factory, storage, _) = factory();
  assert!(factory.open_post(None, Some(json!({ "tags": "no es lista" })), ignore()).is_err());
  assert!(factory.open_post(None, Some(json!(42)), ignore()).is_err());
  assert_eq!(storage.writes(), 0);
}

#[test]
fn drafts_can_be_listed_resumed_and_discarded() {
  let (factory, storage, clock) = factory();
  let initial = json!({ "title": "Riego por goteo" });
  let mut wizard = factory.open_post(None, Some(initial), ignore()).expect("open");
  let id = wizard.draft().id();
  assert_eq!(wizard.store_key(), draft_key("post", &id));
  assert_eq!(wizard.draft().title, "Riego por goteo");

  wizard.edit("content", |d| d.content = "Mangueras con goteros cada 30 cm".into()).expect("edit");
  clock.advance_ms(600);
  wizard.poll();
  storage.seed("preferencias", "{}");

  assert_eq!(factory.list_drafts().expect("list"), vec![(WizardKind::Post, id)]);

  // el registro gana sobre el parcial inicial
  let resumed = factory.open_post(Some(id), Some(json!({ "title": "otro" })), ignore()).expect("resume");
  let expected: PostDraft = wizard.draft().clone();
  assert_eq!(resumed.draft(), &expected);

  factory.discard(WizardKind::Post, &id).expect("discard");
  assert!(factory.list_drafts().expect("list").is_empty());
  factory.discard(WizardKind::Post, &id).expect("discard twice");
}

#[test]
fn saved_draft_is_not_listed_anymore() {
  let (factory, _, clock) = factory();
  let initial = json!({
    "title": "Poda de frutales",
    "content": "Podar en invierno, con herramientas limpias",
    "category": "frutales"
  });
  let mut wizard = factory.open_post(None, Some(initial), ignore()).expect("open");
  wizard.edit("tags", |d| {
          d.add_tag("poda");
        })
        .expect("edit");
  clock.advance_ms(600);
  wizard.poll();
  assert_eq!(factory.list_drafts().expect("list").len(), 1);

  wizard.next().expect("next");
  wizard.next().expect("next");
  assert!(matches!(wizard.save().expect("save"), SaveOutcome::Saved(_)));
  assert!(factory.list_drafts().expect("list").is_empty());
}
