//! Session state management
//!
//! Tracks the signed-in user and the screen currently shown.

use std::sync::Arc;

use dioxus::prelude::*;
use tavernkeep_domain::{CharacterId, User, UserId};
use tavernkeep_engine::App;

/// Screens of the desktop window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Register,
    Menu,
    CreateCharacter,
    Characters,
    Sheet(CharacterId),
    Dice,
    Admin,
    AdminUser(UserId),
}

impl Screen {
    /// Screens reachable without signing in.
    pub fn is_public(self) -> bool {
        matches!(self, Screen::Login | Screen::Register)
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Screen::Admin | Screen::AdminUser(_))
    }

    /// Where the "Back" button leads.
    pub fn parent(self) -> Screen {
        match self {
            Screen::Login => Screen::Login,
            Screen::Register => Screen::Login,
            Screen::Sheet(_) => Screen::Characters,
            Screen::AdminUser(_) => Screen::Admin,
            _ => Screen::Menu,
        }
    }
}

/// Decide which screen may actually be shown to `user`.
pub fn resolve_screen(requested: Screen, user: Option<&User>) -> Screen {
    match user {
        None if requested.is_public() => requested,
        None => Screen::Login,
        Some(_) if requested.is_public() => Screen::Menu,
        Some(u) if requested.requires_admin() && !u.is_admin => Screen::Menu,
        Some(_) => requested,
    }
}

/// What the window renders, with the user each signed-in view needs.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Login,
    Register,
    Menu(User),
    CreateCharacter(User),
    Characters(User),
    Sheet(User, CharacterId),
    Dice,
    Admin(User),
    AdminUser(User, UserId),
}

impl View {
    /// The screen this view stands for.
    pub fn screen(&self) -> Screen {
        match self {
            View::Login => Screen::Login,
            View::Register => Screen::Register,
            View::Menu(_) => Screen::Menu,
            View::CreateCharacter(_) => Screen::CreateCharacter,
            View::Characters(_) => Screen::Characters,
            View::Sheet(_, id) => Screen::Sheet(*id),
            View::Dice => Screen::Dice,
            View::Admin(_) => Screen::Admin,
            View::AdminUser(_, target) => Screen::AdminUser(*target),
        }
    }
}

/// Pick the view for a requested screen after applying the access rules.
pub fn view_for(requested: Screen, user: Option<User>) -> View {
    let screen = resolve_screen(requested, user.as_ref());
    let Some(user) = user else {
        return match screen {
            Screen::Register => View::Register,
            _ => View::Login,
        };
    };
    match screen {
        // resolve_screen never keeps a public screen for a signed-in user
        Screen::Login | Screen::Register | Screen::Menu => View::Menu(user),
        Screen::CreateCharacter => View::CreateCharacter(user),
        Screen::Characters => View::Characters(user),
        Screen::Sheet(id) => View::Sheet(user, id),
        Screen::Dice => View::Dice,
        Screen::Admin => View::Admin(user),
        Screen::AdminUser(target) => View::AdminUser(user, target),
    }
}

/// Signed-in user and navigation.
#[derive(Clone, Copy)]
pub struct SessionState {
    pub user: Signal<Option<User>>,
    pub screen: Signal<Screen>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            user: Signal::new(None),
            screen: Signal::new(Screen::Login),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn is_admin(&self) -> bool {
        self.user.read().as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn sign_in(&mut self, user: User) {
        tracing::info!(user_id = %user.id, "Signed in");
        self.user.set(Some(user));
        self.screen.set(Screen::Menu);
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.read().as_ref() {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        self.user.set(None);
        self.screen.set(Screen::Login);
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.screen.set(screen);
    }

    pub fn back(&mut self) {
        let parent = self.screen.read().parent();
        self.screen.set(parent);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared engine handle provided as context once the database is open.
#[derive(Clone)]
pub struct AppHandle(pub Arc<App>);

impl PartialEq for AppHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for AppHandle {
    type Target = App;

    fn deref(&self) -> &App {
        &self.0
    }
}

/// Hook to access the engine from Dioxus context
pub fn use_app() -> AppHandle {
    use_context::<AppHandle>()
}

/// Hook to access the session from Dioxus context
pub fn use_session() -> SessionState {
    use_context::<SessionState>()
}

#[cfg(test)]
mod tests {
    use tavernkeep_domain::{Email, Username};

    use super::*;

    fn user(is_admin: bool) -> User {
        User {
            id: UserId::from_raw(7),
            username: Username::new("grog").expect("valid"),
            email: Email::new("grog@example.com").expect("valid"),
            is_admin,
        }
    }

    #[test]
    fn signed_out_users_only_see_public_screens() {
        assert_eq!(resolve_screen(Screen::Register, None), Screen::Register);
        assert_eq!(resolve_screen(Screen::Dice, None), Screen::Login);
        assert_eq!(
            resolve_screen(Screen::Sheet(CharacterId::from_raw(1)), None),
            Screen::Login
        );
    }

    #[test]
    fn admin_screens_need_the_admin_flag() {
        let player = user(false);
        let admin = user(true);
        assert_eq!(resolve_screen(Screen::Admin, Some(&player)), Screen::Menu);
        assert_eq!(
            resolve_screen(Screen::AdminUser(UserId::from_raw(3)), Some(&player)),
            Screen::Menu
        );
        assert_eq!(resolve_screen(Screen::Admin, Some(&admin)), Screen::Admin);
    }

    #[test]
    fn signed_in_users_skip_login() {
        assert_eq!(resolve_screen(Screen::Login, Some(&user(false))), Screen::Menu);
        assert_eq!(resolve_screen(Screen::Dice, Some(&user(false))), Screen::Dice);
    }

    #[test]
    fn back_goes_to_parent_screen() {
        assert_eq!(Screen::Sheet(CharacterId::from_raw(2)).parent(), Screen::Characters);
        assert_eq!(Screen::AdminUser(UserId::from_raw(2)).parent(), Screen::Admin);
        assert_eq!(Screen::Register.parent(), Screen::Login);
        assert_eq!(Screen::Dice.parent(), Screen::Menu);
    }

    #[test]
    fn signed_out_view_is_login_or_register() {
        assert_eq!(view_for(Screen::Login, None), View::Login);
        assert_eq!(view_for(Screen::Register, None), View::Register);
        for screen in [
            Screen::Menu,
            Screen::CreateCharacter,
            Screen::Characters,
            Screen::Sheet(CharacterId::from_raw(1)),
            Screen::Dice,
            Screen::Admin,
            Screen::AdminUser(UserId::from_raw(3)),
        ] {
            assert_eq!(view_for(screen, None), View::Login, "{screen:?}");
        }
    }

    #[test]
    fn signed_in_view_follows_the_screen() {
        let player = user(false);
        let id = CharacterId::from_raw(4);
        assert_eq!(view_for(Screen::Login, Some(player.clone())), View::Menu(player.clone()));
        assert_eq!(view_for(Screen::Register, Some(player.clone())), View::Menu(player.clone()));
        assert_eq!(view_for(Screen::Menu, Some(player.clone())), View::Menu(player.clone()));
        assert_eq!(
            view_for(Screen::CreateCharacter, Some(player.clone())),
            View::CreateCharacter(player.clone())
        );
        assert_eq!(
            view_for(Screen::Characters, Some(player.clone())),
            View::Characters(player.clone())
        );
        assert_eq!(
            view_for(Screen::Sheet(id), Some(player.clone())),
            View::Sheet(player.clone(), id)
        );
        assert_eq!(view_for(Screen::Dice, Some(player.clone())), View::Dice);
    }

    #[test]
    fn admin_views_need_the_admin_flag() {
        let player = user(false);
        let admin = user(true);
        let target = UserId::from_raw(3);
        assert_eq!(view_for(Screen::Admin, Some(player.clone())), View::Menu(player.clone()));
        assert_eq!(
            view_for(Screen::AdminUser(target), Some(player.clone())),
            View::Menu(player)
        );
        assert_eq!(view_for(Screen::Admin, Some(admin.clone())), View::Admin(admin.clone()));
        assert_eq!(
            view_for(Screen::AdminUser(target), Some(admin.clone())),
            View::AdminUser(admin, target)
        );
    }

    #[test]
    fn view_maps_back_to_its_screen() {
        let target = UserId::from_raw(3);
        assert_eq!(view_for(Screen::Register, None).screen(), Screen::Register);
        assert_eq!(
            view_for(Screen::AdminUser(target), Some(user(true))).screen(),
            Screen::AdminUser(target)
        );
    }
}
