use clap::Parser;
use click_rank::pages::{Page, PageSet};
use click_rank::ranking::{RankChange, RankSnapshot};
use click_rank::store::{self, JsonFileStore, PageStore};
use click_rank::{EngineConfig, parsers, relations};
use std::error::Error;

mod args;
use args::{Args, Command};

fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    if let Err(e) = run(args) {
        ::log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => {
            ::log::info!("Loading configuration from {}", path.display());
            EngineConfig::from_file(path)?
        }
        None => EngineConfig::default(),
    };

    let mut store = JsonFileStore::open_with(&args.store, config.ranking)?;
    let mut set = PageSet::new(store.get_all()?, config);

    match args.command {
        Command::List => {
            let mut pages: Vec<&Page> = set.pages().iter().collect();
            pages.sort_by(|a, b| b.rank.total_cmp(&a.rank));
            print_pages(&pages, None, args.json)?;
        }
        Command::Search { query } => {
            let results = set.ranked_search(&query);
            if results.is_empty() && !args.json {
                println!("No pages match {:?}", query);
            } else {
                print_pages(&results, None, args.json)?;
            }
        }
        Command::Click { id } => {
            let snapshot = set.snapshot();
            if !set.click(id) {
                println!("No page with id {}", id);
                return Ok(());
            }

            let mut pages: Vec<&Page> = set.pages().iter().collect();
            pages.sort_by(|a, b| b.rank.total_cmp(&a.rank));
            print_pages(&pages, Some(&snapshot), args.json)?;

            if !args.json {
                let related = set.related(id);
                if !related.is_empty() {
                    println!();
                    println!("Related pages:");
                    print_pages(&related, None, false)?;
                }
            }

            // One write for the whole click
            store.replace_all(set.into_pages())?;
        }
        Command::Related { id, limit } => {
            let limit = limit.unwrap_or(set.config().related_limit);
            let related = relations::related_to(id, set.pages(), limit);
            print_pages(&related, None, args.json)?;
        }
        Command::Edges { focus } => {
            let edges = match focus {
                Some(id) => set.focus_edges(id),
                None => set.edges(),
            };
            if args.json {
                println!("{}", serde_json::to_string_pretty(&edges)?);
            } else {
                for edge in &edges {
                    println!("{} -> {} ({:.2})", edge.source, edge.target, edge.weight);
                }
            }
        }
        Command::Reset => {
            store::reset(&mut store)?;
            println!("Store {} reset to the demo pages", store.path().display());
        }
        Command::Ingest { file } => {
            let ingested = parsers::ingest_file(
                &file,
                set.next_id()?,
                &set.config().ingest,
                &set.config().ranking,
            )?;
            let count = ingested.len();
            set.extend(ingested);
            store.replace_all(set.into_pages())?;
            println!("Added {} pages from {}", count, file.display());
        }
    }

    Ok(())
}

fn print_pages(
    pages: &[&Page],
    snapshot: Option<&RankSnapshot>,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(pages)?);
        return Ok(());
    }

    for page in pages {
        let change = match snapshot.map(|s| s.change(page)) {
            Some(RankChange::Up(delta)) => format!("  +{:.1}", delta),
            Some(RankChange::Down(delta)) => format!("  -{:.1}", delta),
            _ => String::new(),
        };
        println!(
            "{:>4}  {:>5.1}  {}  [click {:.0}% stay {:.0}% return {:.0}%]{}",
            page.id,
            page.rank,
            page.title,
            page.click_probability * 100.0,
            page.stay_probability * 100.0,
            page.return_rate * 100.0,
            change
        );
    }
    Ok(())
}
