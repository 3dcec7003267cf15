//! qreveal-code: turns text into the dark modules of a QR code.
//!
//! The QR symbol itself comes from the `qrcode` crate. This crate only reads
//! the resulting module grid and records, for each dark module, how many dark
//! modules surround it in its 5x5 neighborhood. That count drives the reveal
//! ordering in `qreveal-scene`.
//!
//! ```
//! let code = qreveal_code::extract("A");
//! assert_eq!(code.width, 21);
//! assert!(code.dots.iter().all(|d| (1..=25).contains(&d.surround_count)));
//! ```

mod code;
mod encode;
mod grid;

pub use code::{Code, Dot, MAX_SURROUND, SURROUND_RADIUS};
pub use encode::{EncodeError, EncodeOptions, ErrorCorrection, MAX_VERSION, encode};
pub use grid::{BitMatrix, ModuleGrid};

/// Extract the dots of `text` encoded in byte mode at error-correction level L.
///
/// Text the encoder cannot fit yields [`Code::empty`] rather than an error.
pub fn extract(text: &str) -> Code {
    extract_with(text, &EncodeOptions::default())
}

/// [`extract`] with an explicit encoder configuration.
pub fn extract_with(text: &str, options: &EncodeOptions) -> Code {
    match encode(text, options) {
        Ok(qr) => {
            let code = Code::from_grid(&qr);
            log::debug!(
                "encoded {} bytes into a {}x{} code with {} dots",
                text.len(),
                code.width,
                code.width,
                code.dots.len()
            );
            code
        }
        Err(err) => {
            log::debug!("nothing to render for {} bytes: {err}", text.len());
            Code::empty()
        }
    }
}
