//! # Keyhold Page
//!
//! Logic of the per-tab page context. The DOM itself stays with the
//! extension glue, which hands over [`PageSnapshot`]s and implements
//! [`PageDriver`] and [`SavePrompt`].
//!
//! ## Components
//!
//! - [`fields`] - username, password, form and button discovery
//! - [`CaptureDetector`] - stages submitted logins with the background
//! - [`OfferCoordinator`] - offers to save the staged login on the next page
//! - [`plan_fill`] / [`AutoLoginScheduler`] - autofill and auto-login
//! - [`PageSession`] - the page-load sequence tying them together

pub mod autofill;
pub mod capture;
pub mod client;
pub mod fields;
pub mod offer;
pub mod session;
pub mod snapshot;

pub use autofill::{plan_fill, AutoLoginScheduler, FillPlan, PageDriver, SubmitAction};
pub use capture::{CaptureDetector, CaptureOutcome, SubmissionTrigger};
pub use client::{BackgroundClient, LocalBackgroundClient};
pub use offer::{OfferCoordinator, OfferOutcome, PromptDecision, SavePrompt};
pub use session::{PageInit, PageSession, PageTimings};
pub use snapshot::{
    ButtonElement, ButtonTag, ElementId, FormElement, FormId, InputElement, PageSnapshot,
    SnapshotBuilder,
};
