use crate::api;
use crate::args;
use crate::config::Config;
use crate::emit::Emitter;
use crate::envelope::Envelope;
use crate::error::FetchError;
use crate::logging;
use crate::pipeline::{self, Lookup};
use crate::qq::QqMusicClient;
use crate::variant::Variant;
use std::future::Future;
use std::io::{self, Write};
use std::process::ExitCode;

/// Entry point shared by every helper binary.
pub async fn run(variant: Variant) -> ExitCode {
    let _guard = logging::init_file_logging().ok();

    let config = Config::from_env();
    let config = &config;
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    run_with(variant, &argv, config, &mut stdout, &mut stderr, |lookup| async move {
        execute(variant, config, &lookup).await
    })
    .await
}

/// Parse `argv`, announce, look up and write exactly one envelope to `out`.
///
/// Exits with 1 only when the title is missing, in which case `lookup` is
/// never called. Lookup failures are reported in the envelope with exit
/// code 0. The status line is the only thing written to `err`.
pub async fn run_with<O, E, F, Fut>(
    variant: Variant,
    argv: &[String],
    config: &Config,
    out: &mut O,
    err: &mut E,
    lookup: F,
) -> ExitCode
where
    O: Write,
    E: Write,
    F: FnOnce(Lookup) -> Fut,
    Fut: Future<Output = Envelope>,
{
    let emitter = Emitter::new(config.bom_for(variant), variant.ascii_only());
    tracing::info!("{} invoked with {} argument(s)", variant.bin_name(), argv.len());

    let invocation = match args::parse(argv) {
        Ok(invocation) => invocation,
        Err(e) => {
            tracing::warn!("{}: {}", variant.bin_name(), e);
            write_envelope(&emitter, out, &pipeline::missing_arguments(variant, argv.len()));
            return ExitCode::FAILURE;
        }
    };

    let request = Lookup::new(&invocation, config.query_order_for(variant));
    if variant.announces() {
        let shown = match variant {
            Variant::QqLyricByMid => &request.title,
            _ => &request.query,
        };
        if let Err(e) = emitter.write_status(err, shown) {
            tracing::warn!("Could not write status line: {:#}", e);
        }
    }

    let envelope = lookup(request).await;
    tracing::info!(
        "{} finished: success={}",
        variant.bin_name(),
        envelope.is_success()
    );
    write_envelope(&emitter, out, &envelope);

    ExitCode::SUCCESS
}

fn write_envelope<O: Write>(emitter: &Emitter, out: &mut O, envelope: &Envelope) {
    if let Err(e) = emitter.write_envelope(out, envelope) {
        tracing::error!("Could not emit envelope: {:#}", e);
    }
}

async fn execute(variant: Variant, config: &Config, lookup: &Lookup) -> Envelope {
    let client = match config.http_client() {
        Ok(client) => client,
        Err(e) => {
            let err = FetchError::from(e);
            return match variant {
                Variant::QqLyricByMid => Envelope::from_id_error(&err, &lookup.title),
                _ => lookup.failure(&err),
            };
        }
    };

    match variant {
        Variant::Lyrics => {
            let providers = api::default_providers(&client, config);
            pipeline::fetch_lyrics(&providers, lookup).await
        }
        Variant::QqLyrics => {
            let qq = QqMusicClient::new(client, config);
            pipeline::fetch_qq_lyrics(&qq, lookup).await
        }
        Variant::QqLyricByMid => {
            let qq = QqMusicClient::new(client, config);
            pipeline::fetch_qq_lyric_by_mid(&qq, &lookup.title).await
        }
        Variant::QqSongs => {
            let qq = QqMusicClient::new(client, config);
            pipeline::fetch_qq_songs(&qq, lookup).await
        }
    }
}
