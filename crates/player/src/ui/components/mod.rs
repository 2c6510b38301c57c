//! Reusable UI components.
//!
//! Shared form controls, banners and panels used across multiple views.

mod description_panel;
pub use description_panel::DescriptionPanel;

mod dice_log_panel;
pub use dice_log_panel::DiceLogPanel;

mod error_banner;
pub use error_banner::ErrorBanner;

mod form_field;
pub use form_field::FormField;

mod nav_bar;
pub use nav_bar::NavBar;
