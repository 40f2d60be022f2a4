use crate::application::error::AppError;
use crate::application::services::ResourceService;
use crate::config::PostsCommand;
use crate::domain::types::PublishState;
use crate::infra::http::ApiClient;
use crate::infra::http::models::PostPayload;
use crate::infra::services::PostClient;
use crate::presentation::print::print_json;

use super::{list_query, read_stdin};

pub async fn handle(api: &ApiClient, cmd: PostsCommand, page_size: u32) -> Result<(), AppError> {
    let client = PostClient::new(api.clone());
    match cmd {
        PostsCommand::List { query, state } => {
            let mut query = list_query(&query, page_size);
            if !matches!(state, PublishState::All) {
                query.set_filter("status", state.as_str());
            }
            let page = client.list(&query).await?;
            print_json(&page)
        }
        PostsCommand::Get { id } => {
            let post = client.get(&id).await?;
            print_json(&post)
        }
        PostsCommand::Create {
            title,
            body,
            publish,
        } => {
            let body = match body {
                Some(body) => body,
                None => read_stdin().await?,
            };
            let payload = PostPayload {
                title: Some(title),
                body: Some(body),
                published: Some(publish),
                ..Default::default()
            };
            let post = client.create(&payload).await?;
            print_json(&post)
        }
        PostsCommand::Update {
            id,
            title,
            body,
            published,
        } => {
            let payload = PostPayload {
                title,
                body,
                published,
                ..Default::default()
            };
            let post = client.update(&id, &payload).await?;
            print_json(&post)
        }
        PostsCommand::Delete { id } => {
            client.remove(&id).await?;
            println!("deleted");
            Ok(())
        }
    }
}
