//! # qrgrid
//!
//! A Rust library for encoding text into QR code module matrices
//! (ISO/IEC 18004) with Reed-Solomon error correction, automatic version
//! and mode selection, and penalty-scored masking.
//!
//! The output is the finished module grid plus the metadata chosen during
//! encoding. Rendering the grid to an image or terminal is left to the
//! caller: a renderer only needs [`QRCode::width`] and [`QRCode::dark`].
//!
//! ## Quick start
//!
//! ```rust
//! use qrgrid::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage: the smallest fitting version, EC level and the best
//! // mask are all chosen automatically
//! let qr = QRBuilder::new("Hello, World!").build()?;
//! for r in 0..qr.width() {
//!     for c in 0..qr.width() {
//!         print!("{}", if qr.dark(r, c) { "##" } else { "  " });
//!     }
//!     println!();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Full configuration
//!
//! ```rust
//! use qrgrid::{ECLevel, MaskPattern, Mode, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HELLO WORLD")
//!     .version(2)                // QR version (size); smallest fit if unset
//!     .ec_level(ECLevel::M)      // error correction level, default L
//!     .mode(Mode::Alphanumeric)  // encoding mode, auto-detected if unset
//!     .mask(MaskPattern::new(3)) // fixed mask; best mask by penalty if unset
//!     .build()?;
//!
//! assert_eq!(qr.width(), 25);
//! # Ok(())
//! # }
//! ```
//!
//! ## Inspecting the codeword pipeline
//!
//! ```rust
//! use qrgrid::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let plan = QRBuilder::new("HELLO").prepare()?;
//! assert_eq!(plan.data_codewords().len() + plan.ecc_codewords().len(), 26);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub(crate) mod common;

pub use builder::{CodewordPlan, QRBuilder, QRCode};
pub use common::codec::Mode;
pub use common::ec::{Block, Gf256};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
