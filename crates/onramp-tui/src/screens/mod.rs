//! Screen components, one per route.

use crate::component::Component;
use crate::screen::RouteId;

pub mod dashboard;
pub mod landing;
pub mod login;
pub mod profile;
pub mod register;

/// Construct every screen, keyed by route.
pub fn create_screens() -> Vec<(RouteId, Box<dyn Component>)> {
    vec![
        (RouteId::Landing, Box::new(landing::LandingScreen::new())),
        (RouteId::Register, Box::new(register::RegisterScreen::new())),
        (RouteId::Profile, Box::new(profile::ProfileScreen::new())),
        (
            RouteId::Dashboard,
            Box::new(dashboard::DashboardScreen::new()),
        ),
        (RouteId::Login, Box::new(login::LoginScreen::new())),
    ]
}
