//! Output generation for the report page.
//!
//! # Submodules
//!
//! - [`html`]: Pure conversion of a [`crate::models::TrendReport`] into the
//!   self-contained report document
//!
//! The pipeline in `main.rs` owns persistence; nothing in here touches the
//! filesystem.
//!
//! # Output structure
//!
//! ```text
//! output_dir/
//! └── index.html    # overwritten on every run
//! ```

pub mod html;
