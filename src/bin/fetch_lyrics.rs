//! Print synced lyrics for a title and optional artist as a JSON envelope.

use lyricfetch::variant::Variant;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    lyricfetch::cli::run(Variant::Lyrics).await
}
