//! Terminal progress bars backed by indicatif.
//!
//! [`ProgressDisplay`] is the default [`ProgressSinkFactory`]. Every sink it
//! hands out is a transfer bar following one response body. The tasks bar
//! counts finished downloads out of those that reached the streaming stage, so
//! its length grows as downloads start. [`close`](ProgressSinkFactory::close)
//! finishes it; the next sink starts a fresh count.
//!
//! # Examples
//!
//! ```rust,no_run
//! use volley::progress::{ProgressDisplay, ProgressSinkFactory, StyleOptions};
//!
//! let display = ProgressDisplay::new(StyleOptions::default());
//! let sink = display.create_sink(1024, "Download file.zip");
//! sink.finish(None, true);
//! display.close();
//! ```

use super::sink::{BoxedReader, ProgressSink, ProgressSinkFactory};
use super::StyleOptions;

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::sync::{Arc, Mutex, PoisonError};

/// Draws one tasks bar plus a transfer bar per running download.
#[derive(Debug, Clone)]
pub struct ProgressDisplay {
    multi: MultiProgress,
    tasks: ProgressBar,
    /// Set by `close`, cleared by the next sink.
    closed: Arc<Mutex<bool>>,
    style_options: StyleOptions,
}

impl ProgressDisplay {
    pub fn new(style_options: StyleOptions) -> Self {
        let multi = if style_options.is_enabled() {
            MultiProgress::new()
        } else {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        };
        let tasks = multi.add(style_options.tasks().to_progress_bar(0));

        Self {
            multi,
            tasks,
            closed: Arc::new(Mutex::new(false)),
            style_options,
        }
    }

    /// The bar counting finished downloads.
    pub fn tasks_bar(&self) -> &ProgressBar {
        &self.tasks
    }

    pub fn style_options(&self) -> &StyleOptions {
        &self.style_options
    }
}

impl Default for ProgressDisplay {
    fn default() -> Self {
        Self::new(StyleOptions::default())
    }
}

impl ProgressSinkFactory for ProgressDisplay {
    fn create_sink(&self, total: u64, label: &str) -> Box<dyn ProgressSink> {
        let transfer = self.style_options.transfer();
        let bar = match total {
            0 => transfer.to_spinner(),
            len => transfer.to_progress_bar(len),
        };
        let bar = self.multi.add(bar);
        bar.set_message(label.to_string());

        let mut closed = self.closed.lock().unwrap_or_else(PoisonError::into_inner);
        if std::mem::take(&mut *closed) {
            self.tasks.reset();
            self.tasks.set_length(0);
        }
        self.tasks.inc_length(1);
        drop(closed);

        Box::new(TransferSink {
            bar,
            tasks: self.tasks.clone(),
            clear: transfer.clear,
        })
    }

    fn close(&self) {
        let mut closed = self.closed.lock().unwrap_or_else(PoisonError::into_inner);
        *closed = true;
        if self.style_options.tasks().clear {
            self.tasks.finish_and_clear();
        } else {
            self.tasks.finish();
        }
    }
}

struct TransferSink {
    bar: ProgressBar,
    tasks: ProgressBar,
    clear: bool,
}

impl ProgressSink for TransferSink {
    fn wrap_reader(&self, reader: BoxedReader) -> BoxedReader {
        Box::new(self.bar.wrap_async_read(reader))
    }

    fn finish(&self, total: Option<u64>, complete: bool) {
        let settled = total.unwrap_or_else(|| self.bar.position());
        self.bar.set_length(settled);

        if !complete {
            self.bar.abandon();
        } else if self.clear {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish();
        }
        self.tasks.inc(1);
    }
}
