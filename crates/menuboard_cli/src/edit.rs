//! Line-oriented menu editing session.
//!
//! One command per line; paths are JSON pointers (`/items/fries/0/price`).

use crate::CliResult;
use menuboard_core::{
    chunk_with_start, move_item, remove_item, update_item, EditorSession, KeyChord,
    MenuRepository, MenuScreen, MenuService, MoveDirection,
};
use serde_json::Value;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

const HELP: &str = "\
commands:
  show [pointer]                 print the document or one value
  set <pointer> <json>           replace one value
  update <pointer> <index> <field> <json>
                                 set one field of an array item
  move <pointer> <index> up|down reorder an array item
  remove <pointer> <index>       delete an array item
  undo | redo | ctrl+z | ctrl+y  history navigation
  columns <pointer> <count>      preview how an array splits into columns
  status                         dirty flag, save state, history depth
  save                           persist the document
  quit                           leave (unsaved changes are discarded)";

/// Outcome of one edit command.
#[derive(Debug, PartialEq, Eq)]
enum EditOutcome {
    Recorded,
    MissingPath,
    NotAnArray,
    NotAnObject,
}

pub fn run_session<R, I, O>(
    service: &MenuService<R>,
    screen: MenuScreen,
    input: I,
    mut output: O,
) -> CliResult<()>
where
    R: MenuRepository,
    I: BufRead,
    O: Write,
{
    let default = screen.default_document()?;
    let mut session = EditorSession::new(default);
    if !session.load_result(service.get_document(screen)) {
        writeln!(output, "warning: could not load stored {screen} menu; editing defaults")?;
    }
    writeln!(output, "editing {screen}; type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "help" => writeln!(output, "{HELP}")?,
            "quit" | "exit" => {
                if session.is_dirty() {
                    writeln!(output, "discarding unsaved changes")?;
                }
                break;
            }
            "show" => {
                let value = if rest.is_empty() {
                    Some(session.document())
                } else {
                    session.document().pointer(rest)
                };
                match value {
                    Some(value) => writeln!(output, "{}", serde_json::to_string_pretty(value)?)?,
                    None => writeln!(output, "no value at `{rest}`")?,
                }
            }
            "set" => {
                let Some((pointer, raw)) = rest.split_once(' ') else {
                    writeln!(output, "usage: set <pointer> <json>")?;
                    continue;
                };
                match serde_json::from_str::<Value>(raw.trim()) {
                    Ok(value) => {
                        let outcome = set_value(&mut session, pointer, value);
                        report(&mut output, outcome, pointer)?;
                    }
                    Err(err) => writeln!(output, "invalid JSON value: {err}")?,
                }
            }
            "update" => {
                let mut parts = rest.splitn(4, ' ');
                let parsed = match (parts.next(), parts.next(), parts.next(), parts.next()) {
                    (Some(pointer), Some(index), Some(field), Some(raw)) => index
                        .parse::<usize>()
                        .ok()
                        .map(|index| (pointer, index, field, raw.trim())),
                    _ => None,
                };
                let Some((pointer, index, field, raw)) = parsed else {
                    writeln!(output, "usage: update <pointer> <index> <field> <json>")?;
                    continue;
                };
                match serde_json::from_str::<Value>(raw) {
                    Ok(value) => {
                        let outcome = update_field(&mut session, pointer, index, field, value);
                        report(&mut output, outcome, pointer)?;
                    }
                    Err(err) => writeln!(output, "invalid JSON value: {err}")?,
                }
            }
            "move" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [pointer, index, direction] => index
                        .parse::<usize>()
                        .ok()
                        .zip(MoveDirection::parse(direction))
                        .map(|(index, direction)| (*pointer, index, direction)),
                    _ => None,
                };
                let Some((pointer, index, direction)) = parsed else {
                    writeln!(output, "usage: move <pointer> <index> up|down")?;
                    continue;
                };
                let outcome = edit_array(&mut session, pointer, |items| {
                    move_item(items, index, direction)
                });
                report(&mut output, outcome, pointer)?;
            }
            "remove" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [pointer, index] => index.parse::<usize>().ok().map(|index| (*pointer, index)),
                    _ => None,
                };
                let Some((pointer, index)) = parsed else {
                    writeln!(output, "usage: remove <pointer> <index>")?;
                    continue;
                };
                let outcome = edit_array(&mut session, pointer, |items| remove_item(items, index));
                report(&mut output, outcome, pointer)?;
            }
            "columns" => {
                let parts: Vec<&str> = rest.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [pointer, count] => count.parse::<usize>().ok().map(|count| (*pointer, count)),
                    _ => None,
                };
                let Some((pointer, count)) = parsed else {
                    writeln!(output, "usage: columns <pointer> <count>")?;
                    continue;
                };
                match session.document().pointer(pointer) {
                    Some(Value::Array(items)) => {
                        for (column, chunk) in chunk_with_start(items, count).iter().enumerate() {
                            let end = chunk.start + chunk.items.len();
                            let label = column + 1;
                            writeln!(output, "column {label}: items {}..{end}", chunk.start)?;
                        }
                    }
                    Some(_) => writeln!(output, "`{pointer}` is not an array")?,
                    None => writeln!(output, "no value at `{pointer}`")?,
                }
            }
            "undo" => {
                let moved = session.undo();
                writeln!(output, "{}", if moved { "undone" } else { "nothing to undo" })?;
            }
            "redo" => {
                let moved = session.redo();
                writeln!(output, "{}", if moved { "redone" } else { "nothing to redo" })?;
            }
            "status" => writeln!(
                output,
                "dirty={} save_state={} undo={} redo={}",
                session.is_dirty(),
                session.expire_saved(Instant::now()).as_str(),
                session.history().undo_depth(),
                session.history().redo_depth()
            )?,
            "save" => {
                if !session.can_save() {
                    writeln!(output, "no unsaved changes")?;
                    continue;
                }
                let persist =
                    |document: &Value| service.save_document(screen, document).map(|_| ());
                match session.save(persist) {
                    Ok(()) => writeln!(output, "saved")?,
                    Err(err) => writeln!(output, "save failed: {err}")?,
                }
            }
            other => match KeyChord::parse(other) {
                Some(chord) if chord.ctrl || chord.meta => {
                    match session.handle_shortcut(&chord, false) {
                        Some(command) => writeln!(output, "{command:?}")?,
                        None => writeln!(output, "no binding for `{other}`")?,
                    }
                }
                _ => writeln!(output, "unknown command `{other}`; type `help`")?,
            },
        }
    }

    Ok(())
}

fn report<O: Write>(output: &mut O, outcome: EditOutcome, pointer: &str) -> CliResult<()> {
    match outcome {
        EditOutcome::Recorded => writeln!(output, "ok")?,
        EditOutcome::MissingPath => writeln!(output, "no value at `{pointer}`")?,
        EditOutcome::NotAnArray => writeln!(output, "`{pointer}` is not an array")?,
        EditOutcome::NotAnObject => writeln!(output, "item in `{pointer}` is not an object")?,
    }
    Ok(())
}

fn set_value(session: &mut EditorSession<Value>, pointer: &str, value: Value) -> EditOutcome {
    let mut outcome = EditOutcome::MissingPath;
    session.apply(|current| {
        if current.pointer(pointer).is_none() {
            return Arc::clone(current);
        }
        let mut next = Value::clone(current);
        if let Some(slot) = next.pointer_mut(pointer) {
            *slot = value;
        }
        outcome = EditOutcome::Recorded;
        Arc::new(next)
    });
    outcome
}

fn update_field(
    session: &mut EditorSession<Value>,
    pointer: &str,
    index: usize,
    field: &str,
    value: Value,
) -> EditOutcome {
    match session.document().pointer(pointer) {
        Some(Value::Array(items)) => match items.get(index) {
            Some(Value::Object(_)) => {}
            Some(_) => return EditOutcome::NotAnObject,
            None => return EditOutcome::MissingPath,
        },
        Some(_) => return EditOutcome::NotAnArray,
        None => return EditOutcome::MissingPath,
    }
    edit_array(session, pointer, |items| {
        update_item(items, index, |item| {
            if let Value::Object(fields) = item {
                fields.insert(field.to_string(), value);
            }
        })
    })
}

fn edit_array<F>(session: &mut EditorSession<Value>, pointer: &str, transform: F) -> EditOutcome
where
    F: FnOnce(&[Value]) -> Vec<Value>,
{
    let mut outcome = EditOutcome::MissingPath;
    session.apply(|current| {
        let items = match current.pointer(pointer) {
            Some(Value::Array(items)) => items,
            Some(_) => {
                outcome = EditOutcome::NotAnArray;
                return Arc::clone(current);
            }
            None => return Arc::clone(current),
        };
        let replaced = transform(items);
        let mut next = Value::clone(current);
        if let Some(slot) = next.pointer_mut(pointer) {
            *slot = Value::Array(replaced);
        }
        outcome = EditOutcome::Recorded;
        Arc::new(next)
    });
    outcome
}

#[cfg(test)]
mod tests {
    use super::run_session;
    use menuboard_core::{JsonFileMenuRepository, MenuRepository, MenuScreen, MenuService};
    use serde_json::json;

    fn run(service: &MenuService<&JsonFileMenuRepository>, script: &str) -> String {
        let mut output = Vec::new();
        run_session(service, MenuScreen::S2, script.as_bytes(), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn set_undo_redo_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileMenuRepository::new(dir.path());
        let service = MenuService::new(&repo);
        let document = json!({ "fries": [{ "price": "3.91" }, { "price": "5.22" }] });
        service.save_document(MenuScreen::S2, &document).unwrap();

        let transcript = run(
            &service,
            "set /fries/0/price \"4.00\"\nundo\nredo\nmove /fries 0 down\nctrl+z\nsave\nstatus\n",
        );
        assert!(transcript.contains("undone"));
        assert!(transcript.contains("redone"));
        assert!(transcript.contains("Undo"));
        assert!(transcript.contains("saved"));
        assert!(transcript.contains("dirty=false save_state=saved undo=1 redo=1"));

        let stored = repo.read_document(MenuScreen::S2).unwrap().unwrap();
        assert_eq!(stored, json!({ "fries": [{ "price": "4.00" }, { "price": "5.22" }] }));
    }

    #[test]
    fn invalid_paths_are_reported_without_recording() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileMenuRepository::new(dir.path());
        let service = MenuService::new(&repo);
        service.save_document(MenuScreen::S2, &json!({ "title": "Hot" })).unwrap();

        let transcript = run(&service, "set /missing 1\nremove /title 0\nsave\nstatus\nquit\n");
        assert!(transcript.contains("no value at `/missing`"));
        assert!(transcript.contains("`/title` is not an array"));
        assert!(transcript.contains("no unsaved changes"));
        assert!(transcript.contains("undo=0 redo=0"));
    }

    #[test]
    fn columns_preview_splits_arrays() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileMenuRepository::new(dir.path());
        let service = MenuService::new(&repo);
        service
            .save_document(MenuScreen::S2, &json!({ "items": [1, 2, 3, 4, 5] }))
            .unwrap();

        let transcript = run(&service, "columns /items 2\ncolumns /missing 2\n");
        assert!(transcript.contains("column 1: items 0..3"));
        assert!(transcript.contains("column 2: items 3..5"));
        assert!(transcript.contains("no value at `/missing`"));
    }

    #[test]
    fn update_sets_one_field_of_an_item() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileMenuRepository::new(dir.path());
        let service = MenuService::new(&repo);
        let document = json!({ "fries": [{ "name": "Small", "price": "3.91" }], "title": "Hot" });
        service.save_document(MenuScreen::S2, &document).unwrap();

        let script = concat!(
            "update /fries 0 price \"4.25\"\n",
            "update /fries 3 price 1\n",
            "update /title 0 x 1\n",
            "save\n",
        );
        let transcript = run(&service, script);
        assert!(transcript.contains("no value at `/fries`"));
        assert!(transcript.contains("`/title` is not an array"));
        assert!(transcript.contains("saved"));

        let stored = repo.read_document(MenuScreen::S2).unwrap().unwrap();
        assert_eq!(
            stored.pointer("/fries/0"),
            Some(&json!({ "name": "Small", "price": "4.25" }))
        );
    }
}
