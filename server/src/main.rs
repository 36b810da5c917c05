use server::runner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    runner::run().await
}
