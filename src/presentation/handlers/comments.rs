use crate::application::error::AppError;
use crate::application::services::ResourceService;
use crate::config::CommentsCommand;
use crate::domain::types::CommentStatus;
use crate::infra::http::ApiClient;
use crate::infra::services::CommentClient;
use crate::presentation::print::print_json;

use super::list_query;

pub async fn handle(api: &ApiClient, cmd: CommentsCommand, page_size: u32) -> Result<(), AppError> {
    let client = CommentClient::new(api.clone());
    match cmd {
        CommentsCommand::List { query, status } => {
            let mut query = list_query(&query, page_size);
            if !matches!(status, CommentStatus::All) {
                query.set_filter("status", status.as_str());
            }
            let page = client.list(&query).await?;
            print_json(&page)
        }
        CommentsCommand::Approve { id } => {
            client.set_flag(&id, true).await?;
            println!("approved");
            Ok(())
        }
        CommentsCommand::Reject { id } => {
            client.set_flag(&id, false).await?;
            println!("approval revoked");
            Ok(())
        }
        CommentsCommand::Delete { id } => {
            client.remove(&id).await?;
            println!("deleted");
            Ok(())
        }
    }
}
