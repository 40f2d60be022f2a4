use crate::application::error::AppError;
use crate::application::services::ResourceService;
use crate::config::CategoriesCommand;
use crate::infra::http::ApiClient;
use crate::infra::services::CategoryClient;
use crate::presentation::print::print_json;

use super::list_query;

pub async fn handle(
    api: &ApiClient,
    cmd: CategoriesCommand,
    page_size: u32,
) -> Result<(), AppError> {
    let client = CategoryClient::new(api.clone());
    match cmd {
        CategoriesCommand::List { query } => {
            let page = client.list(&list_query(&query, page_size)).await?;
            print_json(&page)
        }
        CategoriesCommand::Create { name } => {
            let category = client.create(&name).await?;
            print_json(&category)
        }
        CategoriesCommand::Rename { id, name } => {
            let category = client.rename(&id, &name).await?;
            print_json(&category)
        }
        CategoriesCommand::Delete { id } => {
            client.remove(&id).await?;
            println!("deleted");
            Ok(())
        }
    }
}
