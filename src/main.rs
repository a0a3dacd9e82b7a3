use std::error::Error;
use std::fmt::Debug;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use draft_store::{Clock, KvStorage, SystemClock};
use farm_domain::{Difficulty, Draft, MediaSelection, PostDraft, PracticeDraft, QuestionDraft, QuestionKind};
use farm_wizard::{Key, KeyOutcome, MultiStepForm, NavOutcome, SaveCallback, SaveOutcome, WizardConfig, WizardError,
                  WizardFactory, WizardKind};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Comandos específicos de cada tipo de borrador. Devuelve `Ok(false)` si
/// el comando no es de este tipo.
type EditCommand<D> = fn(&mut MultiStepForm<D>, &str, &str) -> Result<bool, WizardError>;

/// Pequeño menú interactivo para redactar borradores de la comunidad.
///
/// Opciones soportadas:
/// 1) Nueva publicación
/// 2) Nueva buena práctica
/// 3) Nueva pregunta del quiz
/// 4) Ver borradores guardados en este equipo
/// 5) Retomar un borrador
/// 6) Descartar un borrador
/// 7) Salir
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Almacenamiento en disco (DRAFTS_DIR) y configuración de los asistentes
    let storage: Arc<dyn KvStorage> = Arc::new(draft_persistence::new_from_env()?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let factory = WizardFactory::new(storage, clock, WizardConfig::from_env());

    exit_on_eof(run_menu(&factory))?;
    Ok(())
}

/// Fin de la entrada en el menú principal equivale a "Salir".
fn exit_on_eof(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            println!("Saliendo...");
            Ok(())
        }
        other => other,
    }
}

fn run_menu(factory: &WizardFactory) -> io::Result<()> {
    loop {
        println!("\n== Borradores de la comunidad ==");
        println!("1) Nueva publicación");
        println!("2) Nueva buena práctica");
        println!("3) Nueva pregunta del quiz");
        println!("4) Ver borradores guardados");
        println!("5) Retomar un borrador");
        println!("6) Descartar un borrador");
        println!("7) Salir");
        let choice = prompt("Elige una opción: ")?;
        match choice.trim() {
            "1" => open_and_run(factory, WizardKind::Post, None)?,
            "2" => open_and_run(factory, WizardKind::Practice, None)?,
            "3" => open_and_run(factory, WizardKind::Question, None)?,
            "4" => match factory.list_drafts() {
                Ok(drafts) if drafts.is_empty() => println!("No hay borradores guardados"),
                Ok(drafts) => {
                    println!("\nTIPO       | ID");
                    println!("-----------------------------------------------");
                    for (kind, id) in drafts {
                        println!("{:<10} | {}", kind, id);
                    }
                }
                Err(e) => eprintln!("Error listando borradores: {}", e),
            },
            "5" => {
                let Some((kind, id)) = ask_draft()? else { continue };
                open_and_run(factory, kind, Some(id))?;
            }
            "6" => {
                let Some((kind, id)) = ask_draft()? else { continue };
                let confirm = prompt(&format!("¿Descartar {} {}? escribe 'si' para confirmar: ", kind, id))?;
                if confirm.trim().to_lowercase() == "si" {
                    match factory.discard(kind, &id) {
                        Ok(()) => println!("Borrador descartado: {}", id),
                        Err(e) => eprintln!("Error descartando borrador: {}", e),
                    }
                } else {
                    println!("Descarte cancelado");
                }
            }
            "7" => {
                println!("Saliendo...");
                return Ok(());
            }
            other => println!("Opción inválida: {}", other),
        }
    }
}

fn open_and_run(factory: &WizardFactory, kind: WizardKind, id: Option<Uuid>) -> io::Result<()> {
    let opened = match kind {
        WizardKind::Post => factory.open_post(id, None, print_saved()).map(|mut w| run_wizard(&mut w, post_command)),
        WizardKind::Practice => {
            factory.open_practice(id, None, print_saved()).map(|mut w| run_wizard(&mut w, practice_command))
        }
        WizardKind::Question => {
            factory.open_question(id, None, print_saved()).map(|mut w| run_wizard(&mut w, question_command))
        }
    };
    match opened {
        Ok(result) => result,
        Err(e) => {
            eprintln!("No se pudo abrir el asistente: {}", e);
            Ok(())
        }
    }
}

/// Callback de guardado de la CLI: muestra el borrador emitido.
fn print_saved<D: Serialize + Send + 'static>() -> SaveCallback<D> {
    Box::new(|draft| {
        match serde_json::to_string_pretty(&draft) {
            Ok(json) => println!("\nBorrador publicado:\n{}", json),
            Err(e) => eprintln!("No se pudo mostrar el borrador: {}", e),
        }
        Ok(())
    })
}

fn run_wizard<D: Draft + Debug>(wizard: &mut MultiStepForm<D>, edit: EditCommand<D>) -> io::Result<()> {
    println!("\nBorrador {} (escribe 'ayuda' para ver los comandos)", wizard.draft().id());
    while wizard.is_open() {
        if let Some(outcome) = wizard.poll() {
            report_save(&outcome);
            continue;
        }
        print_step(wizard);
        let line = match prompt("> ") {
            Ok(line) => line,
            Err(e) => {
                // fin de la entrada: no perder la última edición
                wizard.flush();
                return Err(e);
            }
        };
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let result = match command {
            "" => Ok(()),
            "ayuda" => {
                print_help();
                Ok(())
            }
            "ver" => {
                match serde_json::to_string_pretty(wizard.draft()) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("{}", e),
                }
                Ok(())
            }
            "next" => wizard.next().map(|nav| report_nav(&nav)),
            "back" => wizard.back().map(|nav| report_nav(&nav)),
            "save" => wizard.save().map(|outcome| {
                report_save(&outcome);
                if let SaveOutcome::Pending { ready_at } = outcome {
                    wait_until(ready_at);
                }
            }),
            "json" => serde_json::from_str::<serde_json::Value>(rest).map_err(WizardError::from)
                                                                     .and_then(|patch| wizard.merge_patch(&patch)),
            "salir" => {
                // deja el borrador en disco para retomarlo luego
                wizard.flush();
                println!("Borrador guardado en este equipo");
                return Ok(());
            }
            other => match other.parse::<Key>() {
                Ok(key) if matches!(key, Key::Escape | Key::Tab | Key::BackTab) => {
                    match wizard.handle_key(key) {
                        KeyOutcome::Cancelled => println!("Asistente cancelado; el borrador se ha descartado"),
                        KeyOutcome::FocusMoved(field) => println!("Foco en: {}", field),
                        KeyOutcome::Ignored => {}
                    }
                    Ok(())
                }
                _ => match edit(wizard, other, rest) {
                    Ok(true) => Ok(()),
                    Ok(false) => {
                        println!("Comando desconocido: {}", other);
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
            },
        };
        if let Err(e) = result {
            eprintln!("Error: {}", e);
        }
    }
    Ok(())
}

fn print_step<D: Draft>(wizard: &MultiStepForm<D>) {
    println!("\n-- Paso {}/{}: {} --", wizard.current_step() + 1, wizard.step_count(), wizard.current_title());
    println!("Campos: {}", wizard.current_fields().join(", "));
    if let Some(focused) = wizard.focus().focused() {
        println!("Foco: {}", focused);
    }
    for (field, message) in wizard.errors().iter() {
        println!("  ! {}: {}", field, message);
    }
    if let Some(failure) = wizard.last_failure() {
        println!("  ! {}", failure.message);
    }
}

fn print_help() {
    println!("Comunes: next | back | save | tab | shift-tab | esc | ver | json <objeto> | salir");
    println!("Publicación: set title|content|category <texto> | tag <t> | untag <t> | image <url> <alt> | video <url> | nomedia");
    println!("Práctica: set title|summary <texto> | cat <c> | step add <texto> | step edit <n> <texto> | step rm <n> | step up <n> | step down <n> | image | video | nomedia");
    println!("Pregunta: set statement|explanation|answer|category <texto> | kind <tipo> | difficulty <nivel> | choice <texto> | correct <n> | unchoice <n> | tf verdadero|falso");
}

fn report_nav(nav: &NavOutcome) {
    match nav {
        NavOutcome::Moved { to } => println!("Paso {}", to + 1),
        NavOutcome::Blocked => println!("Revisa los campos marcados"),
        NavOutcome::Stayed => {}
    }
}

fn report_save<D: Debug>(outcome: &SaveOutcome<D>) {
    match outcome {
        SaveOutcome::Pending { .. } => println!("Guardando..."),
        SaveOutcome::Saved(_) => println!("Guardado"),
        SaveOutcome::Blocked { step } => println!("El paso {} tiene errores", step + 1),
        SaveOutcome::Failed(failure) => println!("No se pudo guardar: {}", failure.message),
    }
}

fn wait_until(at: chrono::DateTime<chrono::Utc>) {
    if let Ok(left) = (at - chrono::Utc::now()).to_std() {
        std::thread::sleep(left);
    }
}

fn post_command(wizard: &mut MultiStepForm<PostDraft>, command: &str, rest: &str) -> Result<bool, WizardError> {
    match command {
        "set" => {
            let (field, value) = split_arg(rest);
            let value = value.to_string();
            match field {
                "title" => wizard.edit("title", |d| d.title = value)?,
                "content" => wizard.edit("content", |d| d.content = value)?,
                "category" => wizard.edit("category", |d| d.category = non_empty(value))?,
                _ => return Ok(false),
            }
        }
        "tag" => wizard.edit("tags", |d| {
                           d.add_tag(rest);
                       })?,
        "untag" => wizard.edit("tags", |d| {
                             d.remove_tag(rest);
                         })?,
        _ => return media_command(wizard, command, rest, |d: &mut PostDraft, m| d.media = m),
    }
    Ok(true)
}

fn practice_command(wizard: &mut MultiStepForm<PracticeDraft>,
                    command: &str,
                    rest: &str)
                    -> Result<bool, WizardError> {
    match command {
        "set" => {
            let (field, value) = split_arg(rest);
            let value = value.to_string();
            match field {
                "title" => wizard.edit("title", |d| d.title = value)?,
                "summary" => wizard.edit("summary", |d| d.summary = value)?,
                _ => return Ok(false),
            }
        }
        "cat" => wizard.edit("categories", |d| {
                           d.toggle_category(rest);
                       })?,
        "step" => {
            let (action, arg) = split_arg(rest);
            let (n, text) = split_arg(arg);
            let target = parse_index(n).and_then(|i| wizard.draft().steps.get(i).map(|s| (i, s.id)));
            match (action, target) {
                ("add", _) => {
                    let text = arg.to_string();
                    wizard.edit("steps", |d| {
                              d.steps.push(text);
                          })?
                }
                ("edit", Some((_, id))) => {
                    let mut outcome = Ok(());
                    let text = text.to_string();
                    wizard.edit("steps", |d| outcome = d.steps.set_text(&id, text))?;
                    outcome?;
                }
                ("rm", Some((_, id))) => wizard.edit("steps", |d| {
                                                   d.steps.remove(&id);
                                               })?,
                ("up", Some((i, _))) => wizard.edit("steps", |d| {
                                                  d.steps.move_up(i);
                                              })?,
                ("down", Some((i, _))) => wizard.edit("steps", |d| {
                                                    d.steps.move_down(i);
                                                })?,
                _ => println!("Uso: step add <texto> | step edit|rm|up|down <n>"),
            }
        }
        _ => return media_command(wizard, command, rest, |d: &mut PracticeDraft, m| d.media = m),
    }
    Ok(true)
}

fn question_command(wizard: &mut MultiStepForm<QuestionDraft>,
                    command: &str,
                    rest: &str)
                    -> Result<bool, WizardError> {
    match command {
        "set" => {
            let (field, value) = split_arg(rest);
            let value = value.to_string();
            match field {
                "statement" => wizard.edit("statement", |d| d.statement = value)?,
                "explanation" => wizard.edit("explanation", |d| d.explanation = value)?,
                "answer" => wizard.edit("referenceAnswer", |d| d.reference_answer = value)?,
                "category" => wizard.edit("category", |d| d.category = non_empty(value))?,
                _ => return Ok(false),
            }
        }
        "kind" => {
            let kind: QuestionKind = rest.parse()?;
            wizard.edit("kind", |d| d.kind = kind)?;
        }
        "difficulty" => {
            let difficulty: Difficulty = rest.parse()?;
            wizard.edit("difficulty", |d| d.difficulty = difficulty)?;
        }
        "choice" => {
            let text = rest.to_string();
            wizard.edit("choices", |d| {
                      d.add_choice(text, false);
                  })?;
        }
        "correct" | "unchoice" => {
            let Some(id) = parse_index(rest).and_then(|i| wizard.draft().choices.get(i).map(|c| c.id)) else {
                println!("Opción inexistente: {}", rest);
                return Ok(true);
            };
            let mut outcome = Ok(());
            if command == "correct" {
                wizard.edit("choices", |d| outcome = d.toggle_correct(&id).map(|_| ()))?;
            } else {
                wizard.edit("choices", |d| outcome = d.remove_choice(&id).map(|_| ()))?;
            }
            outcome?;
        }
        "tf" => {
            let answer = match rest {
                "verdadero" | "v" | "true" => true,
                "falso" | "f" | "false" => false,
                _ => return Ok(false),
            };
            wizard.edit("trueFalseAnswer", |d| d.true_false_answer = Some(answer))?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

fn media_command<D, F>(wizard: &mut MultiStepForm<D>, command: &str, rest: &str, set: F) -> Result<bool, WizardError>
    where D: Draft,
          F: FnOnce(&mut D, MediaSelection)
{
    let media = match command {
        "image" => {
            let (url, alt) = split_arg(rest);
            MediaSelection::image(url, alt)
        }
        "video" => MediaSelection::video(rest),
        "nomedia" => MediaSelection::None,
        _ => return Ok(false),
    };
    wizard.edit("media", |d| set(d, media))?;
    Ok(true)
}

fn ask_draft() -> io::Result<Option<(WizardKind, Uuid)>> {
    let kind_s = prompt("Tipo (post, practice, question): ")?;
    let Ok(kind) = kind_s.parse::<WizardKind>() else {
        eprintln!("Tipo inválido");
        return Ok(None);
    };
    let id_s = prompt("Id del borrador (UUID): ")?;
    match Uuid::parse_str(id_s.trim()) {
        Ok(id) => Ok(Some((kind, id))),
        Err(_) => {
            eprintln!("UUID inválido");
            Ok(None)
        }
    }
}

fn split_arg(s: &str) -> (&str, &str) {
    let (head, tail) = s.split_once(' ').unwrap_or((s, ""));
    (head, tail.trim())
}

/// Índices de la CLI: empiezan en 1.
fn parse_index(s: &str) -> Option<usize> {
    s.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    read_input(&mut io::stdin().lock())
}

/// Lee una línea; cero bytes leídos es `UnexpectedEof`.
fn read_input<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut s = String::new();
    if reader.read_line(&mut s)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "entrada cerrada"));
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn closed_input_reads_as_eof() {
        let mut input = Cursor::new("7\n");
        assert_eq!(read_input(&mut input).unwrap(), "7\n");
        let err = read_input(&mut input).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn eof_at_the_menu_exits_cleanly() {
        let eof = io::Error::new(io::ErrorKind::UnexpectedEof, "entrada cerrada");
        assert!(exit_on_eof(Err(eof)).is_ok());
        let broken = io::Error::new(io::ErrorKind::BrokenPipe, "tubería rota");
        assert_eq!(exit_on_eof(Err(broken)).unwrap_err().kind(), io::ErrorKind::BrokenPipe);
        assert!(exit_on_eof(Ok(())).is_ok());
    }
}
