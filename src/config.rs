//! Client Configuration

/// Backend base URL, baked in at build time.
/// Override with e.g. `QUIZ_API_URL=https://api.example.com trunk build`.
pub fn api_base() -> &'static str {
    option_env!("QUIZ_API_URL").unwrap_or("http://localhost:3000")
}
