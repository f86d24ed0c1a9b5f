#[tokio::main]
async fn main() -> anyhow::Result<()> {
    loan_expiration_notifier::run().await?;
    Ok(())
}
