//! File actions.
//!
//! - [`delete`]: removal of one file, permanently or to the system trash,
//!   after checking it still has its scanned size
//! - [`resolve`]: the per-group delete-or-skip protocol driven by a
//!   [`Selector`](crate::prompt::Selector)
//!
//! ```no_run
//! use dupehunter::actions::{DeleteMethod, Resolver};
//! use dupehunter::prompt::LineSelector;
//!
//! # let groups: Vec<dupehunter::duplicates::DuplicateGroup> = Vec::new();
//! let mut resolver = Resolver::new(DeleteMethod::Remove);
//! let report = resolver.resolve_all(&groups, &mut LineSelector::stdio()).unwrap();
//! println!("{}", report.summary());
//! ```

pub mod delete;
pub mod resolve;

pub use delete::{
    delete_to_trash, delete_verified, permanent_delete, DeleteError, DeleteMethod, DeleteResult,
};
pub use resolve::{
    GroupOutcome, Resolution, ResolutionReport, Resolver, DELETE_PROMPT, SKIP_CHOICE,
};
