use anyhow::{bail, Context, Result};
use momentum_core::{
    builder::{FeedBuilder, TodoBuilder},
    config::AppConfig,
    domain::todo::{Todo, TodoId},
    presentation::todo_view_model::TodoViewModel,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage:
  momentum feed
  momentum todo list
  momentum todo add <title> [notes]
  momentum todo edit <id> <title> [notes]
  momentum todo toggle <id>
  momentum todo delete <id>";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["feed"] => run_feed(&config).await,
        ["todo", rest @ ..] => run_todo(&config, rest).await,
        _ => bail!("{USAGE}"),
    }
}

async fn run_feed(config: &AppConfig) -> Result<()> {
    let view_model = FeedBuilder::new(config).build(config.use_mock)?;
    view_model.load_data().await;

    let state = view_model.state();
    for character in &state.characters {
        let species = character.species.as_deref().unwrap_or("unknown");
        println!("{:>5}  {}  ({species})", character.id, character.name);
    }
    if let Some(message) = state.error_message {
        bail!(message);
    }
    Ok(())
}

async fn run_todo(config: &AppConfig, args: &[&str]) -> Result<()> {
    let view_model = TodoBuilder::new(config).build(config.use_mock).await?;
    view_model.load_todos().await;

    match args {
        [] | ["list"] => {}
        ["add", title, rest @ ..] => view_model.create_todo(title, rest.first().map(|n| n.to_string())).await,
        ["edit", id, title, rest @ ..] => {
            let mut todo = find(&view_model, id)?;
            todo.title = title.to_string();
            todo.notes = rest.first().map(|n| n.to_string());
            view_model.update_todo(todo).await;
        }
        ["toggle", id] => view_model.toggle_completion(parse_id(id)?).await,
        ["delete", id] => view_model.delete_todo(parse_id(id)?).await,
        _ => bail!("{USAGE}"),
    }

    print_todos(&view_model);
    if let Some(message) = view_model.error_message() {
        bail!(message);
    }
    Ok(())
}

fn parse_id(raw: &str) -> Result<TodoId> { raw.parse().with_context(|| format!("invalid to-do id `{raw}`")) }

fn find(view_model: &TodoViewModel, raw: &str) -> Result<Todo> {
    let id = parse_id(raw)?;
    view_model
        .todos()
        .into_iter()
        .find(|t| t.id == id)
        .with_context(|| format!("no to-do with id {id}"))
}

fn print_todos(view_model: &TodoViewModel) {
    for (heading, todos) in [("Active", view_model.active_todos()), ("Completed", view_model.completed_todos())] {
        if todos.is_empty() { continue; }
        println!("{heading}:");
        for todo in todos {
            let mark = if todo.is_completed { 'x' } else { ' ' };
            match &todo.notes {
                Some(notes) => println!("  [{mark}] {}  {}  ({notes})", todo.id, todo.title),
                None => println!("  [{mark}] {}  {}", todo.id, todo.title),
            }
        }
    }
}
