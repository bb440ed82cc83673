//! Print the QQ Music lyric tracks for a song mid as a BOM-prefixed JSON envelope.

use lyricfetch::variant::Variant;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    lyricfetch::cli::run(Variant::QqLyricByMid).await
}
