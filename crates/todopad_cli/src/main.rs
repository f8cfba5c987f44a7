//! Command-line surface for todopad.
//!
//! # Responsibility
//! - Translate argv into store operations and re-render the list after
//!   each one (return-and-redraw).
//! - Resolve the platform data directory and bootstrap logging + storage.
//!
//! Presentation glue only: every mutation goes through the store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use directories::ProjectDirs;
use std::env;
use std::error::Error;
use std::process::ExitCode;
use todopad_core::db::open_db;
use todopad_core::{
    default_log_level, init_logging, Priority, SqliteTodoRepository, Todo, TodoId, TodoRepository,
    TodoStore,
};

const USAGE: &str = "usage: todopad [command]

commands:
  list                                show all tasks (default)
  add <name> [priority] [deadline]    add a task (priority 1-3, default 3)
  done <id>                           mark a task completed
  undone <id>                         mark a task not completed
  edit <id> <name> [priority] [deadline]
                                      replace a task's fields
  rm <id>                             delete a task
  clear-done                          delete all completed tasks
  sort <deadline|priority>            reorder the list
  count                               print the number of open tasks
  name <display name>                 set the greeting name
  export                              print the list as JSON

ids may be abbreviated to any unique prefix.
deadlines accept RFC 3339, YYYY-MM-DD or YYYY-MM-DDTHH:MM.";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("todopad: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("list");

    if matches!(command, "help" | "--help" | "-h") {
        println!("{USAGE}");
        return Ok(());
    }

    let dirs = ProjectDirs::from("dev", "todopad", "todopad")
        .ok_or("unable to resolve a data directory for this platform")?;
    let data_dir = dirs.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    let log_dir = data_dir.join("logs");
    if let Some(log_dir) = log_dir.to_str() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("todopad: logging disabled: {err}");
        }
    }

    let conn = open_db(data_dir.join("todopad.db"))?;
    let mut store = TodoStore::new(SqliteTodoRepository::new(&conn));
    store.initialize();

    match command {
        "list" => {}
        "add" => {
            let name = args
                .get(1)
                .ok_or("usage: todopad add <name> [priority] [deadline]")?;
            let priority = match args.get(2) {
                Some(raw) => parse_priority(raw)?,
                None => Priority::default(),
            };
            let deadline = match args.get(3) {
                Some(raw) => Some(parse_deadline(raw)?),
                None => None,
            };
            store.create(name, priority, deadline);
            if let Some(error) = &store.form().name_error {
                return Err(error.clone().into());
            }
        }
        "done" | "undone" => {
            let raw = args.get(1).ok_or("usage: todopad done|undone <id>")?;
            let id = resolve_id(store.todos(), raw)?;
            store.toggle_done(id, command == "done");
        }
        "edit" => {
            let raw = args
                .get(1)
                .ok_or("usage: todopad edit <id> <name> [priority] [deadline]")?;
            let id = resolve_id(store.todos(), raw)?;
            store.begin_edit(id);
            if let Some(name) = args.get(2) {
                store.set_form_name(name.clone());
            }
            if let Some(raw) = args.get(3) {
                store.set_form_priority(parse_priority(raw)?);
            }
            if let Some(raw) = args.get(4) {
                store.set_form_deadline(Some(parse_deadline(raw)?));
            }
            store.update();
            if let Some(error) = store.form().name_error.clone() {
                store.cancel_edit();
                return Err(error.into());
            }
        }
        "rm" => {
            let raw = args.get(1).ok_or("usage: todopad rm <id>")?;
            let id = resolve_id(store.todos(), raw)?;
            store.remove(id);
        }
        "clear-done" => store.remove_completed(),
        "sort" => match args.get(1).map(String::as_str) {
            Some("deadline") => store.sort_by_deadline(),
            Some("priority") => store.sort_by_priority(),
            _ => return Err("usage: todopad sort <deadline|priority>".into()),
        },
        "count" => {
            println!("{}", store.uncompleted_count());
            return Ok(());
        }
        "name" => {
            let value = args[1..].join(" ");
            if value.is_empty() {
                return Err("usage: todopad name <display name>".into());
            }
            SqliteTodoRepository::new(&conn).save_display_name(&value)?;
        }
        "export" => {
            println!("{}", serde_json::to_string_pretty(store.todos())?);
            return Ok(());
        }
        other => {
            return Err(format!("unknown command `{other}`; try `todopad help`").into());
        }
    }

    let display_name = SqliteTodoRepository::new(&conn)
        .load_display_name()
        .ok()
        .flatten();
    render(&store, display_name.as_deref());
    Ok(())
}

fn render<R: TodoRepository>(store: &TodoStore<R>, display_name: Option<&str>) {
    match display_name {
        Some(name) => println!("todopad — hello, {name}"),
        None => println!("todopad"),
    }
    println!("{} task(s) remaining", store.uncompleted_count());
    println!();

    if store.todos().is_empty() {
        println!("  (no tasks)");
        return;
    }

    for todo in store.todos() {
        let id = todo.id.to_string();
        let check = if todo.is_done { "x" } else { " " };
        let deadline = todo
            .deadline
            .map(|deadline| deadline.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "no deadline".to_string());
        println!(
            "  [{check}] {}  !{}  {:<16}  {}",
            &id[..8],
            u8::from(todo.priority),
            deadline,
            todo.name
        );
    }
}

fn resolve_id(todos: &[Todo], raw: &str) -> Result<TodoId, Box<dyn Error>> {
    let needle = raw.to_ascii_lowercase();
    let matches: Vec<TodoId> = todos
        .iter()
        .map(|todo| todo.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(format!("no task matches id `{raw}`").into()),
        _ => Err(format!("id `{raw}` is ambiguous; use more characters").into()),
    }
}

fn parse_priority(raw: &str) -> Result<Priority, Box<dyn Error>> {
    let value: u8 = raw
        .parse()
        .map_err(|_| format!("priority must be 1, 2 or 3, got `{raw}`"))?;
    Ok(Priority::try_from(value)?)
}

fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, Box<dyn Error>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed.and_utc());
        }
    }
    if let Ok(parsed) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(start_of_day) = parsed.and_hms_opt(0, 0, 0) {
            return Ok(start_of_day.and_utc());
        }
    }
    Err(format!("cannot parse deadline `{raw}`; use RFC 3339, YYYY-MM-DD or YYYY-MM-DDTHH:MM").into())
}
