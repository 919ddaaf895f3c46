use anyhow::Context;
use clap::Parser;
use material_search::autocomplete::{AutocompleteSession, Commit, Dropdown};
use material_search::browse::{
    BrowseFilters, DEFAULT_PAGE_SIZE, Facet, SortKey, category_counts, filter_and_sort_with,
    paginate,
};
use material_search::catalog::load_catalog;
use material_search::cli::{Cli, Commands};
use material_search::config::SearchConfig;
use material_search::history::FileHistoryStore;
use material_search::record::Material;
use material_search::search::Ranker;
use material_search::tracing::LogOptions;

fn describe(material: &Material) -> String {
    format!(
        "{} | {} | {}, {} | {}",
        material.title, material.author, material.department, material.year, material.kind
    )
}

fn history_store(cli: &Cli) -> anyhow::Result<FileHistoryStore> {
    let path = match &cli.history {
        Some(path) => path.clone(),
        None => FileHistoryStore::default_location()
            .context("No local data directory available; pass --history <file>")?,
    };
    Ok(FileHistoryStore::new(path))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    material_search::tracing::init(LogOptions {
        verbose: cli.verbose,
        json: cli.log_json,
    });

    let config = match &cli.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };
    let ranker = Ranker::new(&config);

    match &cli.command {
        Commands::Search {
            query,
            limit,
            min_score,
        } => {
            let materials = load_catalog(&cli.catalog)?;
            let mut options = ranker.default_options();
            options.limit = *limit;
            if let Some(min_score) = min_score {
                options.min_score = *min_score;
            }

            let results = ranker.search(&materials, query, &options);
            if results.is_empty() {
                println!("No materials found for '{}'", query);
            }
            for result in results {
                println!("{:>6.3}  {}", result.score, describe(result.record));
            }
        }
        Commands::Browse {
            query,
            category,
            year,
            kind,
            sort,
            page,
        } => {
            let materials = load_catalog(&cli.catalog)?;
            let filters = BrowseFilters {
                search_query: query.clone(),
                category: Facet::from_selection(category),
                year: Facet::from_selection(year),
                kind: Facet::from_selection(kind),
                sort_by: SortKey::from(sort.as_str()),
            };

            let results = filter_and_sort_with(&ranker, &materials, &filters);
            let page = paginate(&results, *page, DEFAULT_PAGE_SIZE);
            println!(
                "Page {} of {} ({} materials)",
                page.number,
                page.total_pages.max(1),
                page.total_items
            );
            for material in page.items {
                println!("  {}", describe(material));
            }
        }
        Commands::Suggest { query, commit } => {
            let materials = load_catalog(&cli.catalog)?;
            let mut session = AutocompleteSession::open(history_store(&cli)?, &config);
            session.set_candidates(materials);
            session.set_query(query.as_str());

            match session.view() {
                Dropdown::Hidden => println!("(nothing to suggest)"),
                Dropdown::Recent(recent) => {
                    println!("Recent searches:");
                    for term in recent {
                        println!("  {}", term);
                    }
                }
                Dropdown::Suggestions(suggestions) => {
                    println!("Suggestions:");
                    for suggestion in suggestions {
                        println!("{:>6.3}  {}", suggestion.score, describe(suggestion.record));
                    }
                }
                Dropdown::NoResults { query } => println!("No materials found for \"{}\"", query),
            }

            if *commit && let Some(Commit::Query(term)) = session.commit_query(query) {
                println!("Saved \"{}\" to recent searches", term);
            }
        }
        Commands::History { clear } => {
            let mut session =
                AutocompleteSession::<Material, _>::open(history_store(&cli)?, &config);
            if *clear {
                session.clear_history();
                println!("Cleared recent searches");
            } else if session.recent_searches().is_empty() {
                println!("No recent searches");
            } else {
                for term in session.recent_searches() {
                    println!("{}", term);
                }
            }
        }
        Commands::Categories => {
            let materials = load_catalog(&cli.catalog)?;
            for (category, count) in category_counts(&materials) {
                println!("{:>5}  {}", count, category);
            }
        }
    }

    Ok(())
}
