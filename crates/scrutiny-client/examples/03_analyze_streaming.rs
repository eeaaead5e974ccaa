use anyhow::Result;
use scrutiny_client::{AnalyzeRequest, DesignClient, ScreenImage, StreamCallbacks};

#[tokio::main]
async fn main() -> Result<()> {
    let base_url = std::env::var("SCRUTINY_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000/api/v1".to_string());
    let client = DesignClient::new(base_url)?;

    let screen = std::fs::read("login_screen.png")?;

    let request = AnalyzeRequest::new("The login screen must offer email and password fields.")
        .project_name("demo")
        .image(ScreenImage::new("login_screen.png", "image/png", screen));

    let callbacks = StreamCallbacks::new()
        .on_progress(|envelope| {
            let percent = envelope.progress.unwrap_or(0);
            let message = envelope.message.as_deref().unwrap_or("");
            println!("[{:3}%] {}", percent, message);
        })
        .on_complete(|data| {
            println!("analysis complete");
            if let Some(report) = data.get("full_report").and_then(|v| v.as_str()) {
                println!("{}", report);
            }
        })
        .on_error(|error| eprintln!("analysis failed: {}", error));

    client.analyze_stream(request, callbacks).await;

    Ok(())
}
