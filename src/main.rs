use std::process;

use clap::Parser;

use quillboard::{
    application::error::AppError,
    config::{self, CliArgs, Command},
    infra::{http::ApiClient, telemetry},
    presentation::{
        browse,
        handlers::{
            categories, comments, dashboard, messages, posts, projects, quotes,
            settings as settings_handler, tags,
        },
        print::print_json,
    },
};
use tracing::{Dispatch, Level, dispatcher, error};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let cli = CliArgs::parse();
    let settings = config::load(&cli)?;

    telemetry::init(&settings.logging)?;

    let api = ApiClient::new(
        settings.api.base_url.as_str(),
        settings.api.key.clone(),
        settings.api.timeout,
    )?;
    let page_size = settings.list.page_size.get();

    match cli.command {
        Command::Browse(args) => browse::run(&api, &settings, args.resource).await,
        Command::Health => {
            let report = api.health().await;
            print_json(&report)
        }
        Command::Dashboard => dashboard::handle(&api).await,
        Command::Posts(args) => posts::handle(&api, args.command, page_size).await,
        Command::Categories(args) => categories::handle(&api, args.command, page_size).await,
        Command::Tags(args) => tags::handle(&api, args.command, page_size).await,
        Command::Comments(args) => comments::handle(&api, args.command, page_size).await,
        Command::Messages(args) => messages::handle(&api, args.command, page_size).await,
        Command::Projects(args) => projects::handle(&api, args.command, page_size).await,
        Command::Quotes(args) => quotes::handle(&api, args.command, page_size).await,
        Command::Settings(args) => settings_handler::handle(&api, args.command).await,
    }
}
