use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use site_pages::config::AppConfig;
use site_pages::infra::sharepoint::client::{SharePointClient, SharePointConfig};
use site_pages::{BrowserSettings, FilterClause, ListScope, PagesBrowser};

#[derive(Debug, Parser)]
#[command(name = "site-pages", about = "Browse a site pages library")]
struct Cli {
    /// Config file (defaults to the per-user config directory).
    #[arg(long)]
    config: Option<PathBuf>,
    /// View whose columns are shown; overrides `view_id` from the config.
    #[arg(long)]
    view: Option<String>,
    /// Sub-folder of the pages library to browse.
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    search: Option<String>,
    /// Column filter as `Field=value1,value2`; repeatable.
    #[arg(long = "filter", value_name = "FIELD=VALUES")]
    filters: Vec<String>,
    /// Sort column; descending on first use.
    #[arg(long)]
    sort: Option<String>,
    #[arg(long)]
    page_size: Option<usize>,
    /// Page to show, as typed by a user.
    #[arg(long)]
    page: Option<String>,
    /// Print the distinct values of a column instead of the page.
    #[arg(long, value_name = "FIELD")]
    distinct: Option<String>,
    /// Print alert links for the shown page.
    #[arg(long)]
    alert_links: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;
    let view_id = cli
        .view
        .clone()
        .filter(|view| !view.is_empty())
        .unwrap_or_else(|| config.view_id.clone());
    if view_id.is_empty() {
        anyhow::bail!("no view configured; pass --view or set view_id")
    }

    let client = SharePointClient::new(SharePointConfig {
        web_url: config.site_url.clone(),
        list_title: config.list_title.clone(),
        access_token: config.access_token.clone(),
        timeout: config.request_timeout(),
    })?;

    let page_size = cli.page_size.unwrap_or(config.page_size);
    if !config.page_size_options.contains(&page_size) {
        warn!(page_size, options = ?config.page_size_options, "page size is not one of the configured options");
    }

    let scope = ListScope::new(config.server_relative_url()?).with_category(cli.category.clone());
    let mut browser = PagesBrowser::new(
        Arc::new(client),
        BrowserSettings {
            web_url: config.site_url.clone(),
            list_title: config.list_title.clone(),
            page_size,
            fetch_cap: config.fetch_cap,
            scope,
        },
    );

    browser.load_view(&view_id)?;

    if let Some(search) = &cli.search {
        browser.set_search_text(search.clone());
        browser.submit_search()?;
    }
    for raw in &cli.filters {
        let clause = parse_filter(&browser, raw)?;
        browser.apply_filter(clause)?;
    }
    if let Some(sort) = &cli.sort {
        browser.sort_by(sort.clone())?;
    }
    if let Some(page) = &cli.page {
        browser.go_to_page_input(page);
    }

    if let Some(column) = &cli.distinct {
        for value in browser.distinct_values(column) {
            println!("{}", value.label());
        }
        return Ok(());
    }

    print_page(&browser);
    if cli.alert_links {
        print_alert_links(&mut browser)?;
    }
    Ok(())
}

fn parse_filter(browser: &PagesBrowser, raw: &str) -> Result<FilterClause> {
    let (field, values) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("filter must look like FIELD=VALUES: {raw}"))?;
    let column = browser
        .columns()
        .iter()
        .find(|column| column.internal_name == field)
        .with_context(|| format!("column {field} is not part of the view"))?;
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty());
    Ok(FilterClause::new(field, column.column_type.clone(), values))
}

fn print_page(browser: &PagesBrowser) {
    for record in browser.visible() {
        let marker = if record.subscribed() { "*" } else { " " };
        println!(
            "{marker} {:>6}  {}  {}",
            record.item_id().map(|id| id.to_string()).unwrap_or_default(),
            record.title().unwrap_or(""),
            record.file_ref().unwrap_or("")
        );
    }
    let state = browser.state();
    println!(
        "{} (view {})",
        state.scope().folder_path(),
        state.view_id().unwrap_or("-")
    );
    let sort = browser.sort();
    println!(
        "page {}/{} ({} items, sorted by {} {:?})",
        browser.page(),
        browser.total_pages(),
        browser.total_items(),
        sort.field,
        sort.direction
    );
}

fn print_alert_links(browser: &mut PagesBrowser) -> Result<()> {
    let rows: Vec<(i64, String)> = browser
        .visible()
        .iter()
        .filter(|record| !record.subscribed())
        .filter_map(|record| Some((record.item_id()?, record.file_ref()?.to_string())))
        .collect();
    for (item_id, file_ref) in rows {
        println!("{item_id}: {}", browser.subscribe_url(item_id, &file_ref)?);
    }
    println!("manage: {}", browser.manage_alerts_url("")?);
    Ok(())
}
