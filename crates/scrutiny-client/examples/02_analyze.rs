use anyhow::Result;
use scrutiny_client::{AnalyzeRequest, CheckKind, DesignClient, ScreenImage};

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = std::env::var("SCRUTINY_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string());
    let client = DesignClient::new(base_url)?;

    let screen = std::fs::read("login_screen.png")?;

    let request = AnalyzeRequest::new("The login screen must offer email and password fields.")
        .project_name("demo")
        .checks(vec![CheckKind::Traceability, CheckKind::UiText])
        .image(ScreenImage::new("login_screen.png", "image/png", screen));

    let report = client.analyze(request).await?;

    println!("Screens analyzed: {}", report.num_screens);
    println!("{}", report.full_report);

    Ok(())
}
