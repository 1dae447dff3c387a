use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use storefront_client::FixtureClient;
use storefront_config::Configuration;
use storefront_flux::{selectors, StoreState, Storefront};

mod commands;
mod logger;

use commands::{Command, HELP};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

fn usage() -> String {
    "usage: storefront-repl <fixtures.json> [config.toml]".to_string()
}

fn main() -> anyhow::Result<()> {
    let log_file = logger::init()?;
    log::info!("Starting storefront-repl");

    let mut args = std::env::args().skip(1);
    let fixtures = args.next().map(PathBuf::from).with_context(usage)?;
    let config = match args.next() {
        Some(path) => Configuration::load_from(&PathBuf::from(path))?,
        None => Configuration::load(),
    };

    let client = FixtureClient::from_path(&fixtures)?;
    let mut storefront = Storefront::new(config, Arc::new(client.clone()), Arc::new(client))?;
    storefront.subscribe(|event| println!("  ~ {}", event.name()));

    println!("logging to {}", log_file.display());
    println!("type 'help' for commands");

    run(&mut storefront)?;

    log::info!("Exiting storefront-repl");
    Ok(())
}

fn run(storefront: &mut Storefront) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("error: {:#}", e);
                continue;
            }
        };
        log::debug!("Command: {:?}", command);

        match command {
            Command::Quit => return Ok(()),
            Command::Help => println!("{}", HELP),
            Command::Show => print_results(storefront.state()),
            command => {
                execute(storefront, command);
                if !storefront.wait(FETCH_TIMEOUT) {
                    println!("still waiting on the backend, results may be incomplete");
                }
                print_summary(storefront.state());
            }
        }
    }
}

fn execute(storefront: &mut Storefront, command: Command) {
    match command {
        Command::Search(query) => storefront.search(query),
        Command::Refine { field, value } => storefront.refine(field, value),
        Command::Range { field, low, high } => storefront.refine_range(field, low, high),
        Command::Select { field, index } => storefront.select(field, index),
        Command::Unrefine { field, index } => storefront.unrefine(field, index),
        Command::Reset(field) => storefront.reset(field),
        Command::Page(page) => storefront.page(page),
        Command::Size(size) => storefront.resize(size),
        Command::Sort(index) => storefront.sort(index),
        Command::Collection(name) => storefront.switch_collection(name),
        Command::MoreRefinements(field) => storefront.more_refinements(field),
        Command::MoreProducts(amount) => storefront.more_products(amount),
        Command::Autocomplete(text) => storefront.autocomplete(text),
        Command::Details(id) => storefront.details(id),
        Command::Count(collection) => storefront.count_records(collection),
        Command::Show | Command::Help | Command::Quit => {}
    }
}

fn print_summary(state: &StoreState) {
    let page = selectors::page(state);
    println!(
        "query: {:?} | {} records | page {}/{} | collection {}",
        selectors::query(state).unwrap_or(""),
        selectors::record_count(state),
        page.current,
        page.last,
        selectors::collection(state)
    );
    if let Some(url) = &state.data.redirect {
        println!("redirect: {}", url);
    }
    let suggestions = &selectors::autocomplete(state).suggestions;
    if !suggestions.is_empty() {
        println!("suggestions: {}", suggestions.join(", "));
    }
    if let Some(product) = selectors::details_product(state) {
        println!("details: {}", product.id().unwrap_or("?"));
    }
}

fn print_results(state: &StoreState) {
    print_summary(state);

    for navigation in selectors::navigations(state) {
        let refinements: Vec<String> = navigation
            .refinements
            .iter()
            .enumerate()
            .map(|(index, refinement)| {
                let mark = if navigation.is_selected(index) { "*" } else { "" };
                let label = match refinement.as_value() {
                    Some(value) => value.to_string(),
                    None => format!("{:?}", refinement),
                };
                format!("[{}]{}{}", index, mark, label)
            })
            .collect();
        let more = if navigation.more { " (+more)" } else { "" };
        println!("  {}: {}{}", navigation.label, refinements.join(" "), more);
    }

    for product in selectors::products(state) {
        println!("  - {}", product.id().unwrap_or("?"));
    }
}
