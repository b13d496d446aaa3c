//! Progress bar styling.
//!
//! A [`ProgressDisplay`](super::ProgressDisplay) draws two kinds of bars: one
//! `tasks` bar counting finished downloads, and one `transfer` bar per response
//! body. Bodies of unknown size get a spinner instead of a bar.
//!
//! ```rust
//! use volley::progress::{ProgressBarOpts, StyleOptions};
//!
//! let quiet_tasks = StyleOptions::new(
//!     ProgressBarOpts::hidden(),
//!     ProgressBarOpts::with_pip_style(),
//! );
//! assert!(quiet_tasks.is_enabled());
//! assert!(!StyleOptions::hidden().is_enabled());
//! ```

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::warn;

/// Styles for the `tasks` bar and the `transfer` bars.
///
/// By default the `tasks` bar stays on screen once every download returned,
/// while `transfer` bars are cleared as soon as their download completes.
#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub(crate) tasks: ProgressBarOpts,
    pub(crate) transfer: ProgressBarOpts,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            tasks: ProgressBarOpts::new(
                Some(ProgressBarOpts::TEMPLATE_TASKS.into()),
                Some(ProgressBarOpts::CHARS_FINE.into()),
                true,
                false,
            ),
            transfer: ProgressBarOpts::with_pip_style(),
        }
    }
}

impl StyleOptions {
    pub fn new(tasks: ProgressBarOpts, transfer: ProgressBarOpts) -> Self {
        Self { tasks, transfer }
    }

    /// Draw nothing at all.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden())
    }

    /// Whether anything gets drawn.
    pub fn is_enabled(&self) -> bool {
        self.tasks.enabled || self.transfer.enabled
    }

    /// Options of the bar counting finished downloads.
    pub fn tasks(&self) -> &ProgressBarOpts {
        &self.tasks
    }

    /// Options of the per-download bars.
    pub fn transfer(&self) -> &ProgressBarOpts {
        &self.transfer
    }
}

/// Look of a single progress bar.
#[derive(Debug, Clone)]
pub struct ProgressBarOpts {
    template: Option<String>,
    /// At least 3 characters: "filled", "current" and "to do".
    progress_chars: Option<String>,
    pub(crate) enabled: bool,
    /// Clear the bar once its download completed.
    pub(crate) clear: bool,
}

impl Default for ProgressBarOpts {
    fn default() -> Self {
        Self::new(None, None, true, true)
    }
}

impl ProgressBarOpts {
    /// Finished downloads out of those that started streaming.
    ///
    /// `████████████████████▍                    3/6 downloads (50%) eta 00:00:04`
    pub const TEMPLATE_TASKS: &'static str =
        "{bar:40.blue} {pos:>}/{len} downloads ({percent}%) eta {eta_precise:.blue}";
    /// Pip-like transfer bar, prefixed with the download label.
    ///
    /// `Download report.pdf ━━━━━━━━━━━━━━━━━━━━ 211.23 KiB/211.23 KiB 1008.31 KiB/s eta 0s`
    pub const TEMPLATE_PIP: &'static str =
        "{msg} {bar:40.green/black} {bytes:>11.green}/{total_bytes:<11.green} {bytes_per_sec:>13.red} eta {eta:.blue}";
    /// Transfer of unknown size.
    ///
    /// `⠙ Download stream 1.02 MiB 512.00 KiB/s 00:00:02`
    pub const TEMPLATE_SPINNER: &'static str =
        "{spinner:.green} {msg} {bytes:>11.green} {bytes_per_sec:>13.red} {elapsed:.blue}";
    /// `"█▉▊▋▌▍▎▏  "`
    pub const CHARS_FINE: &'static str = "█▉▊▋▌▍▎▏  ";
    /// `"━╾╴─"`
    pub const CHARS_LINE: &'static str = "━╾╴─";

    pub fn new(
        template: Option<String>,
        progress_chars: Option<String>,
        enabled: bool,
        clear: bool,
    ) -> Self {
        Self {
            template,
            progress_chars,
            enabled,
            clear,
        }
    }

    /// Transfer bar looking like the Python package installer pip.
    pub fn with_pip_style() -> Self {
        Self::new(
            Some(Self::TEMPLATE_PIP.into()),
            Some(Self::CHARS_LINE.into()),
            true,
            true,
        )
    }

    /// A bar that is never drawn.
    pub fn hidden() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Set to `true` to clear the bar once its download completed.
    pub fn set_clear(&mut self, clear: bool) {
        self.clear = clear;
    }

    /// Style for a bar of known length.
    ///
    /// An unparsable template falls back to indicatif's default bar.
    pub fn to_progress_style(&self) -> ProgressStyle {
        let style = match &self.template {
            Some(template) => with_template(ProgressStyle::default_bar(), template),
            None => ProgressStyle::default_bar(),
        };
        match &self.progress_chars {
            Some(chars) => style.progress_chars(chars),
            None => style,
        }
    }

    /// A bar of `len` units.
    ///
    /// Disabled bars are never drawn but still track their length and
    /// position.
    pub fn to_progress_bar(&self, len: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }
        ProgressBar::new(len).with_style(self.to_progress_style())
    }

    /// A spinner counting bytes of a body whose size is unknown.
    pub fn to_spinner(&self) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::with_draw_target(None, ProgressDrawTarget::hidden());
        }
        ProgressBar::no_length().with_style(with_template(
            ProgressStyle::default_spinner(),
            Self::TEMPLATE_SPINNER,
        ))
    }
}

fn with_template(style: ProgressStyle, template: &str) -> ProgressStyle {
    match style.clone().template(template) {
        Ok(templated) => templated,
        Err(e) => {
            warn!(template = %template, error = %e, "invalid progress bar template");
            style
        }
    }
}
