//! Print synced lyrics and track metadata from QQ Music as a JSON envelope.

use lyricfetch::variant::Variant;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    lyricfetch::cli::run(Variant::QqLyrics).await
}
