use crate::application::error::AppError;
use crate::application::services::ResourceService;
use crate::config::TagsCommand;
use crate::infra::http::ApiClient;
use crate::infra::services::TagClient;
use crate::presentation::print::print_json;

use super::list_query;

pub async fn handle(api: &ApiClient, cmd: TagsCommand, page_size: u32) -> Result<(), AppError> {
    let client = TagClient::new(api.clone());
    match cmd {
        TagsCommand::List { query } => {
            let page = client.list(&list_query(&query, page_size)).await?;
            print_json(&page)
        }
        TagsCommand::Create { name } => {
            let tag = client.create(&name).await?;
            print_json(&tag)
        }
        TagsCommand::Rename { id, name } => {
            let tag = client.rename(&id, &name).await?;
            print_json(&tag)
        }
        TagsCommand::Delete { id } => {
            client.remove(&id).await?;
            println!("deleted");
            Ok(())
        }
    }
}
