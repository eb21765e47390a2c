//! Input collection: typed text and `.txt` / `.srt` files.

pub mod collector;

pub use collector::{
    decode_text, is_accepted, read_text_file, InputCollector, InputError, ACCEPTED_EXTENSIONS,
};
