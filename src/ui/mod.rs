//! Terminal presentation
//!
//! Uses `cliclack` for spinners and prompts and `indicatif` for the
//! concatenation progress bar, falling back to plain bracketed lines when
//! stdout is not a terminal or a CI runner is detected.
//!
//! # Example
//!
//! ```rust,ignore
//! use repocat::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect().with_auto_yes(args.yes);
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Resolving https://github.com/owner/repo...");
//! // ... fetch ...
//! spinner.stop("Cloned https://github.com/owner/repo");
//!
//! if ui::confirm(&ctx, "Proceed with concatenation?", false).await? {
//!     ui::outro_success(&ctx, "Files concatenated to: out.txt");
//! }
//! ```

mod context;
mod output;
mod progress;
mod prompts;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, outro_warn, remark, section, step_info, step_ok,
    step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::{ConcatProgress, TaskSpinner};
pub use prompts::confirm;
