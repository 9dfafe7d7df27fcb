use std::time::Duration;

use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    Res,
    catalog::{Catalog, CatalogError, HttpCatalog},
    config::Settings,
    types::{self, ResultEntry, ResultKind, ResultTableRow, Scope},
};

/// Logs in and searches for `query`, keeping only results of `kind`.
pub async fn lookup(
    settings: &Settings,
    query: &str,
    kind: ResultKind,
    scope: Scope,
) -> Res<(HttpCatalog, Vec<ResultEntry>)> {
    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Looking up requested {kind}"));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = search(settings, query, kind, scope).await;
    pb.finish_and_clear();
    result
}

async fn search(
    settings: &Settings,
    query: &str,
    kind: ResultKind,
    scope: Scope,
) -> Res<(HttpCatalog, Vec<ResultEntry>)> {
    let catalog = HttpCatalog::login(settings).await?;
    let entries = types::filter_by_kind(catalog.search(query, scope).await?, kind);

    if entries.is_empty() {
        return Err(CatalogError::NoResults {
            query: query.to_string(),
        }
        .into());
    }

    Ok((catalog, entries))
}

/// Prints the results as a numbered table and asks for one of them.
pub async fn choose(mut entries: Vec<ResultEntry>, prompt: &str) -> Res<ResultEntry> {
    let rows: Vec<ResultTableRow> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| ResultTableRow::from_entry(i, e))
        .collect();
    println!("{}", Table::new(rows));

    let count = entries.len();
    let prompt = prompt.to_string();
    let index = tokio::task::spawn_blocking(move || {
        Input::<usize>::new()
            .with_prompt(prompt)
            .validate_with(move |i: &usize| -> Result<(), String> {
                if *i < count {
                    Ok(())
                } else {
                    Err(format!("Pick a number between 0 and {}", count - 1))
                }
            })
            .interact_text()
    })
    .await??;

    Ok(entries.swap_remove(index))
}
