use anyhow::Result;
use scrutiny_client::DesignClient;

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = std::env::var("SCRUTINY_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string());
    let client = DesignClient::new(base_url)?;

    let checks = client.check_types().await?;
    println!("Available checks:");
    for check in &checks {
        println!("  {} ({})", check.value, check.name);
    }

    let models = client.models().await?;
    println!("\nVision models:");
    for model in &models {
        let marker = if model.recommended { " [recommended]" } else { "" };
        println!("  {} - {} ({}){}", model.id, model.name, model.provider, marker);
    }

    Ok(())
}
