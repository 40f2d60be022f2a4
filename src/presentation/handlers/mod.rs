//! One-shot subcommand handlers. Each resource gets its own module that
//! builds the matching client, runs the command, and prints JSON.

pub mod categories;
pub mod comments;
pub mod dashboard;
pub mod messages;
pub mod posts;
pub mod projects;
pub mod quotes;
pub mod settings;
pub mod tags;

use tokio::io::AsyncReadExt;

use crate::application::error::AppError;
use crate::application::pagination::ListQuery;
use crate::config::ListArgs;
use crate::infra::error::InfraError;

/// Fixed query for a one-shot `list` invocation.
pub(crate) fn list_query(args: &ListArgs, page_size: u32) -> ListQuery {
    let mut query = ListQuery::new(page_size);
    if let Some(search) = args.search.as_ref() {
        query.set_search(search.clone());
    }
    query.set_page(args.page);
    query
}

/// Read a whole document from stdin, for `create --body`-style flags that
/// were omitted on the command line.
pub(crate) async fn read_stdin() -> Result<String, AppError> {
    let mut buf = String::new();
    tokio::io::stdin()
        .read_to_string(&mut buf)
        .await
        .map_err(InfraError::from)?;
    Ok(buf)
}
