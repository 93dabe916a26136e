//! Locators command handler

use crate::commands::LocatorsArgs;
use crate::error::{CliError, CliResult};
use frontdesk::pages::all_pages;
use frontdesk::{locator_table, LocatorEntry, PageObject};
use std::fmt::Write;

/// Screens matching `page` (all screens when `None`)
pub fn select_pages(page: Option<&str>) -> CliResult<Vec<Box<dyn PageObject>>> {
    let pages = all_pages();
    let Some(wanted) = page else {
        return Ok(pages);
    };
    let known: Vec<&str> = pages.iter().map(|p| p.page_name()).collect();
    if !known.iter().any(|name| name.eq_ignore_ascii_case(wanted)) {
        return Err(CliError::invalid_argument(format!(
            "unknown page {wanted:?} (expected one of: {})",
            known.join(", ")
        )));
    }
    Ok(pages
        .into_iter()
        .filter(|p| p.page_name().eq_ignore_ascii_case(wanted))
        .collect())
}

/// Plain-text table of every locator on `pages`
pub fn render_locators(pages: &[Box<dyn PageObject>]) -> String {
    let rows: Vec<LocatorEntry> = pages.iter().flat_map(|p| locator_table(p.as_ref())).collect();
    let name_width = rows.iter().map(|r| r.name.len()).max().unwrap_or(0);

    let mut out = String::new();
    let mut current = "";
    for row in &rows {
        if row.page != current {
            current = row.page;
            let _ = writeln!(out, "[{current}]");
        }
        let nth = row.nth.map(|n| format!(" [{n}]")).unwrap_or_default();
        let _ = writeln!(
            out,
            "  {:<name_width$}  {:<10} {}{nth}",
            row.name, row.strategy, row.selector
        );
    }
    out
}

/// Execute the locators command
pub fn execute_locators(args: &LocatorsArgs) -> CliResult<()> {
    let pages = select_pages(args.page.as_deref())?;
    if args.json {
        let rows: Vec<LocatorEntry> =
            pages.iter().flat_map(|p| locator_table(p.as_ref())).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", render_locators(&pages));
    }
    Ok(())
}
