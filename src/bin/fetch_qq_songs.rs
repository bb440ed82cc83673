//! Print up to six QQ Music song candidates as a JSON envelope.

use lyricfetch::variant::Variant;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    lyricfetch::cli::run(Variant::QqSongs).await
}
