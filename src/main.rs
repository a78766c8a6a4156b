use log::{debug, info};
use std::env;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use quickbite::{
    fetch_detail, fetch_list, spawn_session, AppConfig, DetailView, FilterDimension,
    MealDbClient, QueryDescriptor, QuickBiteError, RequestState, SessionEvent, SessionView,
};

const USAGE: &str = "Usage: quickbite [search <text> | category <label> | cuisine <label> | lookup <id> | filters | interactive]";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = AppConfig::load()?;
    debug!("Loaded configuration: {:?}", config);
    let api = MealDbClient::new(&config)?;

    let command = args.first().map(String::as_str).unwrap_or("search");
    let rest = args.get(1..).unwrap_or_default().join(" ");

    match command {
        "search" => {
            let query = if rest.is_empty() {
                QueryDescriptor::EmptySearch
            } else {
                QueryDescriptor::Search(rest)
            };
            print_list(&fetch_list(&api, &config, query).await);
        }
        "category" | "cuisine" => {
            if rest.is_empty() {
                return Err(format!("{} requires a label", command).into());
            }
            let query = if command == "category" {
                QueryDescriptor::Category(rest)
            } else {
                QueryDescriptor::Cuisine(rest)
            };
            print_list(&fetch_list(&api, &config, query).await);
        }
        "lookup" => {
            if rest.is_empty() {
                return Err("lookup requires a recipe id".into());
            }
            print_detail(&fetch_detail(&api, &rest).await);
        }
        "filters" => print_filter_catalog(),
        "interactive" => run_interactive(&config, api).await?,
        "-h" | "--help" => println!("{}", USAGE),
        other => return Err(format!("Unknown command '{}'\n{}", other, USAGE).into()),
    }

    Ok(())
}

/// Drive a session from stdin, printing the view after every change.
async fn run_interactive(
    config: &AppConfig,
    api: MealDbClient,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting interactive session against {}", api.base_url());
    let session = spawn_session(config, Arc::new(api));

    let mut views = session.subscribe();
    let printer = tokio::spawn(async move {
        while views.changed().await.is_ok() {
            let view = views.borrow_and_update().clone();
            print_view(&view);
        }
    });

    println!("Type to search. Commands: :filter <Dimension> <label>, :open <id>, :close, :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Some(event)) => session.send(event),
            Ok(None) => break,
            Err(e) => eprintln!("{}", e),
        }
    }

    session.shutdown().await;
    let _ = printer.await;
    Ok(())
}

/// `Ok(None)` means quit.
fn parse_line(line: &str) -> Result<Option<SessionEvent>, QuickBiteError> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(SessionEvent::SearchTextChanged(line.to_string())));
    };

    let mut parts = command.trim().splitn(2, ' ');
    let name = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default().trim();

    match name {
        "quit" | "q" => Ok(None),
        "close" => Ok(Some(SessionEvent::DetailClosed)),
        "open" if !arg.is_empty() => Ok(Some(SessionEvent::RecipeSelected(arg.to_string()))),
        "filter" => {
            let (dimension, label) = arg.split_once(' ').ok_or_else(|| {
                QuickBiteError::InvalidArgument(":filter needs a dimension and a label".to_string())
            })?;
            let dimension: FilterDimension = dimension.parse()?;
            Ok(Some(SessionEvent::FilterToggled(dimension, label.trim().to_string())))
        }
        _ => Err(QuickBiteError::InvalidArgument(format!(
            "Unknown command ':{}'",
            command.trim()
        ))),
    }
}

fn print_view(view: &SessionView) {
    println!();
    match view.filters.active() {
        Some((dimension, label)) => println!("[{}: {}]", dimension, label),
        None if !view.search_text.is_empty() => println!("[search: {}]", view.search_text),
        None => {}
    }
    print_list(&view.list);
    if view.detail.is_open() {
        print_detail(&view.detail);
    }
}

fn print_list(state: &RequestState) {
    match state {
        RequestState::Idle => {}
        RequestState::Loading => println!("Finding yummy recipes..."),
        RequestState::Failed(message) => println!("{}", message),
        RequestState::Success(recipes) if recipes.is_empty() => {
            println!("No recipes found. Try another search or filter!")
        }
        RequestState::Success(recipes) => {
            for recipe in recipes {
                println!("{:>8}  {}", recipe.id, recipe.name);
            }
        }
    }
}

fn print_detail(view: &DetailView) {
    match view {
        DetailView::Closed => {}
        DetailView::Loading => println!("Loading recipe..."),
        DetailView::NotFound => println!("Recipe not found."),
        DetailView::Loaded(detail) => {
            println!("# {} ({})", detail.name, detail.dietary_type());
            if let Some(category) = &detail.category {
                println!("Category: {}", category);
            }
            println!("\nIngredients:");
            for line in detail.ingredient_lines() {
                println!("  - {}", line);
            }
            println!("\nInstructions:\n{}", detail.instructions);
        }
    }
}

fn print_filter_catalog() {
    for dimension in FilterDimension::ALL {
        let note = if dimension.affects_query() {
            ""
        } else {
            " (display only)"
        };
        println!("{}{}: {}", dimension, note, dimension.labels().join(", "));
    }
}
