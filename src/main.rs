use clap::Parser;
use commenter::core::config::{CliOverrides, CommenterConfig, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "commenter", about = "Comment on forum posts from the terminal")]
struct Args {
    /// Post to comment on (overrides config and COMMENTER_POST_ID)
    #[arg(short, long)]
    post: Option<String>,

    /// Forum base URL (overrides config and COMMENTER_BASE_URL)
    #[arg(short, long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to commenter.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("commenter.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        CommenterConfig::default()
    });
    let config = resolve(
        &file_config,
        &CliOverrides {
            post_id: args.post.as_deref(),
            base_url: args.base_url.as_deref(),
        },
    );

    log::info!(
        "Commenter starting up against {} (post: {:?})",
        config.base_url,
        config.post_id
    );

    commenter::tui::run(config)
}
