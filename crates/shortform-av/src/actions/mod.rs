//! Media processing actions.
//!
//! Currently a single action: re-encoding a clip into a fixed-size vertical
//! frame with ffmpeg.

mod encode;

pub use encode::{
    encode_vertical, fit_and_pad_filter, vertical_encode_command, EncodeSettings, AUDIO_BITRATE,
    AUDIO_CODEC, DEFAULT_HWACCEL,
};
