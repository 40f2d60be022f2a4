//! Interactive resource browser.
//!
//! A line-oriented loop over one [`ListController`]: search input is
//! debounced exactly like a search box, page navigation and filters go
//! through the controller, and deletes pass the confirmation gate. Failed
//! fetches keep showing the last good page under an error banner.

use std::io::Write as _;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::controller::{ListController, Snapshot};
use crate::application::debounce::DebouncedSearch;
use crate::application::error::AppError;
use crate::application::events::SearchBroadcast;
use crate::application::pagination::ItemPage;
use crate::application::services::ResourceService;
use crate::config::Settings;
use crate::domain::entities::{
    CategoryRecord, CommentRecord, ContactMessageRecord, PostRecord, ProjectRecord, QuoteRecord,
    TagRecord,
};
use crate::domain::types::ResourceKind;
use crate::infra::error::InfraError;
use crate::infra::http::ApiClient;
use crate::infra::services::{
    CategoryClient, CommentClient, MessageClient, PostClient, ProjectClient, QuoteClient, TagClient,
};

const CELL_WIDTH: usize = 40;

pub async fn run(
    api: &ApiClient,
    settings: &Settings,
    resource: ResourceKind,
) -> Result<(), AppError> {
    match resource {
        ResourceKind::Posts => {
            let service: Arc<dyn ResourceService<PostRecord>> =
                Arc::new(PostClient::new(api.clone()));
            browse_loop(service, settings).await
        }
        ResourceKind::Categories => {
            let service: Arc<dyn ResourceService<CategoryRecord>> =
                Arc::new(CategoryClient::new(api.clone()));
            browse_loop(service, settings).await
        }
        ResourceKind::Tags => {
            let service: Arc<dyn ResourceService<TagRecord>> =
                Arc::new(TagClient::new(api.clone()));
            browse_loop(service, settings).await
        }
        ResourceKind::Comments => {
            let service: Arc<dyn ResourceService<CommentRecord>> =
                Arc::new(CommentClient::new(api.clone()));
            browse_loop(service, settings).await
        }
        ResourceKind::Messages => {
            let service: Arc<dyn ResourceService<ContactMessageRecord>> =
                Arc::new(MessageClient::new(api.clone()));
            browse_loop(service, settings).await
        }
        ResourceKind::Projects => {
            let service: Arc<dyn ResourceService<ProjectRecord>> =
                Arc::new(ProjectClient::new(api.clone()));
            browse_loop(service, settings).await
        }
        ResourceKind::Quotes => {
            let service: Arc<dyn ResourceService<QuoteRecord>> =
                Arc::new(QuoteClient::new(api.clone()));
            browse_loop(service, settings).await
        }
    }
}

async fn browse_loop<T>(
    service: Arc<dyn ResourceService<T>>,
    settings: &Settings,
) -> Result<(), AppError>
where
    T: TableRow + Clone + Send + Sync + 'static,
{
    let controller = ListController::new(service, settings.list.page_size.get())
        .with_fetch_timeout(settings.api.timeout);

    let (tx, mut settled) = mpsc::unbounded_channel();
    let mut search = DebouncedSearch::new(settings.list.search_debounce, move |text| {
        let _ = tx.send(text);
    })
    .with_broadcast(SearchBroadcast::new());

    controller.refresh().await;
    render(&controller.snapshot());
    prompt()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(text) = settled.recv() => {
                controller.set_search(text).await;
                render(&controller.snapshot());
                prompt()?;
            }
            line = lines.next_line() => {
                let Some(line) = line.map_err(InfraError::from)? else {
                    break;
                };
                let command = match BrowseCommand::parse(&line) {
                    Ok(command) => command,
                    Err(usage) => {
                        println!("{usage}");
                        prompt()?;
                        continue;
                    }
                };
                if matches!(command, BrowseCommand::Quit) {
                    break;
                }
                apply(&controller, &mut search, command).await;
                render(&controller.snapshot());
                prompt()?;
            }
        }
    }

    Ok(())
}

async fn apply<T>(
    controller: &ListController<T>,
    search: &mut DebouncedSearch,
    command: BrowseCommand,
) where
    T: TableRow + Clone + Send + Sync + 'static,
{
    match command {
        BrowseCommand::Quit => {}
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::Nop => {}
        BrowseCommand::Refresh => controller.refresh().await,
        BrowseCommand::Search(text) => {
            // Applied via the debounce channel once the input settles.
            search.update(text);
        }
        BrowseCommand::Page(page) => {
            if let Err(err) = controller.set_page(page).await {
                println!("error: {err}");
            }
        }
        BrowseCommand::Next => {
            let snapshot = controller.snapshot();
            if snapshot.query.page() >= snapshot.total_pages {
                println!("already on the last page");
            } else if let Err(err) = controller.set_page(snapshot.query.page() + 1).await {
                println!("error: {err}");
            }
        }
        BrowseCommand::Prev => {
            let snapshot = controller.snapshot();
            if snapshot.query.page() <= 1 {
                println!("already on the first page");
            } else if let Err(err) = controller.set_page(snapshot.query.page() - 1).await {
                println!("error: {err}");
            }
        }
        BrowseCommand::Filter { name, value } => controller.set_filter(name, value).await,
        BrowseCommand::Toggle { name, value } => controller.toggle_filter(name, value).await,
        BrowseCommand::Delete(id) => controller.request_delete(id),
        BrowseCommand::Confirm => {
            if let Err(err) = controller.confirm_delete().await {
                println!("error: {err}");
            }
        }
        BrowseCommand::Cancel => controller.cancel_delete(),
        BrowseCommand::Flag { id, enabled } => {
            if let Err(err) = controller.set_approval(&id, enabled).await {
                println!("error: {err}");
            }
        }
    }
}

const HELP: &str = "\
commands:
  search <text>          debounced server-side search
  page <n> | next | prev page navigation
  filter <name> <value>  set a single-select filter (value `all` clears it)
  toggle <name> <value>  toggle a multi-select filter value
  refresh                reload the current page
  delete <id>            arm deletion of one item
  confirm | cancel       resolve the pending deletion
  approve <id> | reject <id>   comment moderation
  read <id> | unread <id>      message read state
  help                   this text
  quit                   leave the browser";

#[derive(Debug, Clone, PartialEq, Eq)]
enum BrowseCommand {
    Quit,
    Help,
    Nop,
    Refresh,
    Search(String),
    Page(u32),
    Next,
    Prev,
    Filter { name: String, value: String },
    Toggle { name: String, value: String },
    Delete(String),
    Confirm,
    Cancel,
    Flag { id: String, enabled: bool },
}

impl BrowseCommand {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(BrowseCommand::Nop);
        };
        let rest: Vec<&str> = words.collect();

        match (head, rest.as_slice()) {
            ("quit" | "q" | "exit", []) => Ok(BrowseCommand::Quit),
            ("help" | "?", []) => Ok(BrowseCommand::Help),
            ("refresh", []) => Ok(BrowseCommand::Refresh),
            ("search", terms) => Ok(BrowseCommand::Search(terms.join(" "))),
            ("page", [page]) => page
                .parse()
                .map(BrowseCommand::Page)
                .map_err(|_| format!("not a page number: {page}")),
            ("next" | "n", []) => Ok(BrowseCommand::Next),
            ("prev" | "p", []) => Ok(BrowseCommand::Prev),
            ("filter", [name, value]) => Ok(BrowseCommand::Filter {
                name: (*name).to_string(),
                value: (*value).to_string(),
            }),
            ("toggle", [name, value]) => Ok(BrowseCommand::Toggle {
                name: (*name).to_string(),
                value: (*value).to_string(),
            }),
            ("delete", [id]) => Ok(BrowseCommand::Delete((*id).to_string())),
            ("confirm" | "y", []) => Ok(BrowseCommand::Confirm),
            ("cancel", []) => Ok(BrowseCommand::Cancel),
            ("approve" | "read", [id]) => Ok(BrowseCommand::Flag {
                id: (*id).to_string(),
                enabled: true,
            }),
            ("reject" | "unread", [id]) => Ok(BrowseCommand::Flag {
                id: (*id).to_string(),
                enabled: false,
            }),
            _ => Err(format!("unknown command: {line} (try `help`)")),
        }
    }
}

fn prompt() -> Result<(), AppError> {
    print!("> ");
    std::io::stdout().flush().map_err(InfraError::from)?;
    Ok(())
}

fn render<T: TableRow>(snapshot: &Snapshot<T>) {
    if let Some(err) = snapshot.load.error() {
        println!("error: {err}");
    }
    if snapshot.load.is_loading() {
        println!("loading...");
    }

    let page = snapshot.load.loaded().or(snapshot.last_loaded.as_ref());
    match page {
        Some(page) => render_table(page),
        None => println!("(no data)"),
    }

    println!(
        "page {} of {} ({} total)",
        snapshot.query.page(),
        snapshot.total_pages,
        page.map_or(0, |p| p.total_count)
    );
    if !snapshot.query.search().is_empty() {
        println!("search: {:?}", snapshot.query.search());
    }
    if let Some(id) = snapshot.pending_delete.as_ref() {
        println!("delete {id}? type `confirm` or `cancel`");
    }
}

fn render_table<T: TableRow>(page: &ItemPage<T>) {
    println!("{}", T::columns().join(" | "));
    for item in &page.items {
        let cells: Vec<String> = item.cells().iter().map(|cell| truncate(cell)).collect();
        println!("{}", cells.join(" | "));
    }
}

fn truncate(cell: &str) -> String {
    let flat = cell.replace('\n', " ");
    if flat.chars().count() <= CELL_WIDTH {
        return flat;
    }
    let head: String = flat.chars().take(CELL_WIDTH - 1).collect();
    format!("{head}…")
}

/// Row rendering for the browser table.
trait TableRow {
    fn columns() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

impl TableRow for PostRecord {
    fn columns() -> &'static [&'static str] {
        &["id", "title", "published", "pinned", "created"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.published.to_string(),
            self.pinned.to_string(),
            self.created_at.date().to_string(),
        ]
    }
}

impl TableRow for CategoryRecord {
    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone()]
    }
}

impl TableRow for TagRecord {
    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone()]
    }
}

impl TableRow for CommentRecord {
    fn columns() -> &'static [&'static str] {
        &["id", "author", "post", "approved", "body"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.author.clone(),
            self.post_title.clone(),
            self.approved.to_string(),
            self.body.clone(),
        ]
    }
}

impl TableRow for ContactMessageRecord {
    fn columns() -> &'static [&'static str] {
        &["id", "from", "read", "received", "message"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            format!("{} <{}>", self.name, self.email),
            self.read.to_string(),
            self.created_at.date().to_string(),
            self.message.clone(),
        ]
    }
}

impl TableRow for ProjectRecord {
    fn columns() -> &'static [&'static str] {
        &["id", "title", "published", "created"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.title.clone(),
            self.published.to_string(),
            self.created_at.date().to_string(),
        ]
    }
}

impl TableRow for QuoteRecord {
    fn columns() -> &'static [&'static str] {
        &["id", "quote", "author"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.content.clone(),
            self.author.clone().unwrap_or_default(),
        ]
    }
}
