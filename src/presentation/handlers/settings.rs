use crate::application::error::AppError;
use crate::config::SettingsCommand;
use crate::infra::http::ApiClient;
use crate::infra::http::models::SettingsPayload;
use crate::infra::services::SettingsClient;
use crate::presentation::print::print_json;

pub async fn handle(api: &ApiClient, cmd: SettingsCommand) -> Result<(), AppError> {
    let client = SettingsClient::new(api.clone());
    match cmd {
        SettingsCommand::Get => {
            let settings = client.get().await?;
            print_json(&settings)
        }
        SettingsCommand::Update {
            name,
            tagline,
            logo_url,
            theme,
            posts_per_page,
            seo_title,
            seo_description,
        } => {
            let payload = SettingsPayload {
                blog_name: name,
                tagline,
                logo_url,
                theme,
                posts_per_page,
                seo_title,
                seo_description,
                ..Default::default()
            };
            let settings = client.update(&payload).await?;
            print_json(&settings)
        }
    }
}
