pub const GREETING: &str = "Hello, SoundTrip!";

pub async fn index() -> &'static str {
    GREETING
}
