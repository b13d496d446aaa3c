//! Progress reporting for running downloads.
//!
//! Download tasks only talk to the [`ProgressSinkFactory`] and [`ProgressSink`]
//! traits. A task creates one sink once it knows its destination, lets the sink
//! observe the response body by wrapping the reader, and marks it finished on
//! every exit path.
//!
//! - `sink` - The sink traits and [`NoProgress`]
//! - `display` - [`ProgressDisplay`], an indicatif implementation
//! - `style` - Progress bar styling options and templates
//!
//! # Examples
//!
//! ```rust
//! use volley::progress::{ProgressBarOpts, ProgressDisplay, ProgressSinkFactory, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::new(
//!     ProgressBarOpts::hidden(),
//!     ProgressBarOpts::hidden(),
//! ));
//! let sink = display.create_sink(1024, "Download report.pdf");
//! sink.finish(None, true);
//! ```

pub(crate) mod display;
pub(crate) mod sink;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use sink::{BoxedReader, NoProgress, ProgressSink, ProgressSinkFactory};
pub use style::{ProgressBarOpts, StyleOptions};
