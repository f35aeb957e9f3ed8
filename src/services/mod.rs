//! Service layer: login, link CRUD, redirect resolution, visit counting
//! and the embedded frontend shell.

mod admin;
mod auth;
mod frontend;
mod redirect;
mod visits;

pub use admin::{AdminService, LinkEntry, PostNewLink, PutLink};
pub use auth::{AuthService, LoginRequest};
pub use frontend::FrontendService;
pub use redirect::RedirectService;
pub use visits::VisitCounter;
