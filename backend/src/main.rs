#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lobby_server::start_server().await
}
