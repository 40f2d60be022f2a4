use crate::application::error::AppError;
use crate::application::services::ResourceService;
use crate::config::MessagesCommand;
use crate::infra::http::ApiClient;
use crate::infra::services::MessageClient;
use crate::presentation::print::print_json;

use super::list_query;

pub async fn handle(api: &ApiClient, cmd: MessagesCommand, page_size: u32) -> Result<(), AppError> {
    let client = MessageClient::new(api.clone());
    match cmd {
        MessagesCommand::List { query } => {
            let page = client.list(&list_query(&query, page_size)).await?;
            print_json(&page)
        }
        MessagesCommand::Read { id } => {
            client.set_flag(&id, true).await?;
            println!("marked read");
            Ok(())
        }
        MessagesCommand::Unread { id } => {
            client.set_flag(&id, false).await?;
            println!("marked unread");
            Ok(())
        }
        MessagesCommand::UnreadCount => {
            let count = client.unread_count().await?;
            print_json(&serde_json::json!({ "count": count }))
        }
        MessagesCommand::Delete { id } => {
            client.remove(&id).await?;
            println!("deleted");
            Ok(())
        }
    }
}
