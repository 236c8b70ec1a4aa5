use clap::Parser;
use lobby_client::{DEFAULT_BACKEND_URL, JoinForm, join};
use reqwest::Client;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Join a university lobby")]
struct Args {
    nickname: String,

    university: String,

    #[arg(long, env = "BACKEND_URL", default_value = DEFAULT_BACKEND_URL)]
    backend_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let form = JoinForm::new(&args.nickname, &args.university)?;
    let response = join(&Client::new(), &args.backend_url, &form).await?;

    println!("{}", response.message);

    Ok(())
}
