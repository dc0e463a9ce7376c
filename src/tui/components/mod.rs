//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: post id and status line
//! - `Avatar`: initials of the signed-in user
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `Composer`: session-gated comment form, owns the `InputBox`
//! - `InputBox`: auto-growing draft field
//! - `CommentList`: scrollable thread of the selected post
//! - `LoginModal`: sign-in overlay for signed-out users
//!
//! Components receive external data as props (struct fields or constructor
//! arguments) rather than reaching into `App`, so each one can be rendered
//! against a `TestBackend` in isolation.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status line)
//! ├── avatar.rs        (user initials)
//! ├── composer.rs      (session-gated form)
//! ├── input_box/       (auto-growing text input)
//! ├── comment_list.rs  (post + comments)
//! └── login_modal.rs   (sign-in overlay)
//! ```

pub mod avatar;
pub mod comment_list;
pub mod composer;
pub mod input_box;
pub mod login_modal;
mod title_bar;

pub use comment_list::{CommentList, CommentListState, FeedStatus};
pub use composer::{Composer, ComposerEvent};
pub use input_box::{InputBox, InputEvent};
pub use login_modal::{LoginEvent, LoginModalState};
pub use title_bar::TitleBar;
