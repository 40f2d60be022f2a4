use crate::application::error::AppError;
use crate::application::services::ResourceService;
use crate::config::ProjectsCommand;
use crate::infra::http::ApiClient;
use crate::infra::http::models::ProjectPayload;
use crate::infra::services::ProjectClient;
use crate::presentation::print::print_json;

use super::list_query;

pub async fn handle(api: &ApiClient, cmd: ProjectsCommand, page_size: u32) -> Result<(), AppError> {
    let client = ProjectClient::new(api.clone());
    match cmd {
        ProjectsCommand::List { query } => {
            let page = client.list(&list_query(&query, page_size)).await?;
            print_json(&page)
        }
        ProjectsCommand::Get { id } => {
            let project = client.get(&id).await?;
            print_json(&project)
        }
        ProjectsCommand::Create {
            title,
            description,
            publish,
        } => {
            let payload = ProjectPayload {
                title: Some(title),
                description,
                published: Some(publish),
                ..Default::default()
            };
            let project = client.create(&payload).await?;
            print_json(&project)
        }
        ProjectsCommand::Delete { id } => {
            client.remove(&id).await?;
            println!("deleted");
            Ok(())
        }
    }
}
