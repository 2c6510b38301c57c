//! One view per screen.

mod admin_panel;
mod character_creation;
mod character_list;
mod character_sheet;
mod dice_roller;
mod login;
mod main_menu;
mod register;

pub use admin_panel::{AdminPanel, AdminUserView};
pub use character_creation::CharacterCreation;
pub use character_list::CharacterList;
pub use character_sheet::CharacterSheetView;
pub use dice_roller::DiceRoller;
pub use login::LoginView;
pub use main_menu::MainMenu;
pub use register::RegisterView;
