use anyhow::Result;
use owo_colors::OwoColorize;
use seminar_core::AppContext;
use seminar_core::dashboard::DashboardTab;

use crate::render::{Render, pluralize};

pub async fn run(ctx: &AppContext, tab: DashboardTab, search: Option<String>) -> Result<()> {
    let mut dashboard = ctx.dashboard().await?;
    dashboard.tab = tab;
    if let Some(term) = search {
        dashboard.set_search(term);
    }

    println!("{}", dashboard.greeting().bold());
    if let Some(line) = dashboard.membership_line() {
        println!("{}", line.dimmed());
    }
    println!();

    match dashboard.tab {
        DashboardTab::Overview => {
            let unread = dashboard.unread_count();
            println!(
                "  {} {}",
                dashboard.filtered_documents().len(),
                pluralize("document", dashboard.filtered_documents().len())
            );
            println!("  {} unread {}", unread, pluralize("notification", unread));
        }
        DashboardTab::Documents => {
            let docs = dashboard.filtered_documents();
            if docs.is_empty() {
                println!("{}", "No documents found.".dimmed());
            }
            for doc in docs {
                println!("  {}", doc.render());
            }
        }
        DashboardTab::Notifications => {
            if dashboard.notifications().is_empty() {
                println!("{}", "No notifications.".dimmed());
            }
            for note in dashboard.notifications() {
                println!("  {}", note.render());
            }
        }
        DashboardTab::Settings => {
            let config = ctx.config();
            println!("  API:        {}", config.api_url);
            println!("  Page size:  {}", config.page_size);
            println!("  Downloads:  {}", config.download_dir.display());
        }
    }

    Ok(())
}
