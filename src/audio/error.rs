use std::path::PathBuf;

/// Why a recording could not be loaded. The message becomes the reason of
/// the `Error` media event.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("no audio output device: {0}")]
    NoOutput(String),

    #[error("could not open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
