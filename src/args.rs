use crate::error::FetchError;
use clap::Parser;

/// Positional arguments as the caller passes them.
/// Anything beyond the second value is accepted and ignored.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct RawArgs {
    #[arg(allow_hyphen_values = true)]
    title: Option<String>,

    #[arg(allow_hyphen_values = true)]
    artist: Option<String>,

    #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    rest: Vec<String>,
}

/// A parsed helper invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub title: String,
    pub artist: Option<String>,
}

/// Parse the arguments following the program name.
pub fn parse(args: &[String]) -> Result<Invocation, FetchError> {
    let (title, artist) = match RawArgs::try_parse_from(args) {
        Ok(raw) => (raw.title, raw.artist),
        Err(e) => {
            // Values clap refuses are still positional values to us.
            tracing::debug!("clap rejected arguments ({:?}), reading positionally", e.kind());
            (args.first().cloned(), args.get(1).cloned())
        }
    };

    let Some(title) = title else {
        return Err(FetchError::MissingArguments {
            received: args.len(),
        });
    };

    Ok(Invocation { title, artist })
}
