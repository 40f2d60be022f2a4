use crate::application::error::AppError;
use crate::application::services::ResourceService;
use crate::config::QuotesCommand;
use crate::infra::http::ApiClient;
use crate::infra::http::models::QuotePayload;
use crate::infra::services::QuoteClient;
use crate::presentation::print::print_json;

use super::list_query;

pub async fn handle(api: &ApiClient, cmd: QuotesCommand, page_size: u32) -> Result<(), AppError> {
    let client = QuoteClient::new(api.clone());
    match cmd {
        QuotesCommand::List { query } => {
            let page = client.list(&list_query(&query, page_size)).await?;
            print_json(&page)
        }
        QuotesCommand::Create { content, author } => {
            let payload = QuotePayload {
                content: Some(content),
                author,
                ..Default::default()
            };
            let quote = client.create(&payload).await?;
            print_json(&quote)
        }
        QuotesCommand::Delete { id } => {
            client.remove(&id).await?;
            println!("deleted");
            Ok(())
        }
    }
}
