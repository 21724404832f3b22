//! Application layer coordinating state, events, and actions.
//!
//! Sits between a presentation layer (which only renders [`AppState`] and
//! dispatches intents) and the fetcher/storage layers.
//!
//! # Architecture
//!
//! ```text
//! Intent → Event → handle_event → State Mutation → Actions → Controller
//!                       ↑                                        ↓
//!                       └──── FetchCompleted / FavoritesPersisted ┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects emitted by the event handler
//! - [`controller`]: Runtime that executes actions and applies completions
//! - [`handler`]: Event processing and state transitions
//! - [`modes`]: Browsing/Favorites view mode
//! - [`state`]: Central view-state container
//!
//! # Example
//!
//! ```rust
//! use gifshelf::app::{handle_event, Action, AppState, Event};
//! use gifshelf::storage::Favorites;
//!
//! let mut state = AppState::new(Favorites::default());
//! let (render, actions) = handle_event(&mut state, &Event::Start);
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! ```

pub mod actions;
pub mod controller;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use controller::Controller;
pub use handler::{handle_event, Event, FAVORITES_SAVE_FAILED_MESSAGE};
pub use modes::ViewMode;
pub use state::AppState;
